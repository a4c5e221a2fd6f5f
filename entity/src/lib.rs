pub mod prelude;

pub mod apartment;
pub mod building;
pub mod expense;
pub mod notification;
pub mod payment;
pub mod subscription;
pub mod super_admin;
pub mod user;
