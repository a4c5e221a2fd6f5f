//! Server application core modules.
//!
//! This crate contains all backend functionality for the Koina expense
//! management platform: HTTP routing, the two authentication realms, database
//! repositories, resident reconciliation, and the expense/payment ledger that
//! tracks checkout sessions issued through the payment processor.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod policy;
pub mod provider;
pub mod router;
pub mod service;
pub mod startup;
