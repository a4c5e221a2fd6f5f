//! Business logic built on top of the repositories.

pub mod admin;
pub mod expense;
pub mod ledger;
pub mod sync;
