mod admin;
mod apartment;
mod building;
mod expense;
mod notification;
mod payment;
mod user;
