//! Shared test infrastructure for the Koina server.
//!
//! Provides an in-memory database with the full schema, a mock HTTP server
//! standing in for the identity provider and the payment processor, and
//! factories for common fixture rows.

pub mod constant;
pub mod error;
pub mod fixtures;
pub mod setup;

pub use error::TestError;
pub use setup::TestSetup;
