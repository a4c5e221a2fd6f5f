pub mod admin;
pub mod api;
pub mod app;
pub mod expense;
pub mod property;
pub mod user;
