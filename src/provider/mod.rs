//! HTTP clients for external collaborators.
//!
//! Both clients take their base URL at construction time so tests can point
//! them at a mock server.

pub mod checkout;
pub mod identity;
