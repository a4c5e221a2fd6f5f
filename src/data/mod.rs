//! Database repositories.
//!
//! Each repository wraps a [`sea_orm::DatabaseConnection`] reference and owns
//! the queries for one table. The store is the sole synchronization point:
//! cross-request invariants (payment settlement, resident upserts, first-login
//! identity claims) rely on conditional updates and uniqueness constraints
//! rather than application-level locks.

pub mod apartment;
pub mod building;
pub mod expense;
pub mod notification;
pub mod payment;
pub mod subscription;
pub mod super_admin;
pub mod user;
