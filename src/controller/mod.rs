//! HTTP handlers, grouped by resource.

pub mod admin;
pub mod apartment;
pub mod building;
pub mod expense;
pub mod extract;
pub mod notification;
pub mod payment;
pub mod user;
