//! Error types for the Koina server.
//!
//! A single [`Error`] enum aggregates domain-specific error types and external
//! library errors. All variants implement `IntoResponse` for Axum; validation
//! and auth errors are surfaced verbatim to the client while persistence and
//! unexpected errors are logged server-side and replaced with a generic
//! message.

pub mod auth;
pub mod config;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    error::{auth::AuthError, config::ConfigError},
    model::api::ErrorDto,
    provider::checkout::CheckoutError,
};

/// Main error type for the Koina server.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Authentication or authorization error in either realm.
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// Malformed input; carries the first schema violation.
    #[error("{0}")]
    Validation(String),
    /// Requested entity does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),
    /// Attempt to pay an expense that is already settled.
    #[error("Expense already paid")]
    AlreadySettled,
    /// Deletion blocked by rows that still reference the target.
    #[error("{0}")]
    Conflict(String),
    /// The payment processor integration is not configured.
    #[error("Payment processing is not configured")]
    ProcessorUnavailable,
    /// Internal error indicating a bug in Koina's code.
    #[error("Internal error: {0}")]
    Internal(String),
    /// Payment processor error (transport failure or API rejection).
    #[error(transparent)]
    Checkout(#[from] CheckoutError),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),
    /// Identity provider transport error.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::Config(err) => err.into_response(),
            Self::Auth(err) => err.into_response(),
            Self::Validation(message) => error_response(StatusCode::BAD_REQUEST, message),
            Self::NotFound(entity) => {
                error_response(StatusCode::NOT_FOUND, format!("{entity} not found"))
            }
            Self::AlreadySettled => {
                error_response(StatusCode::BAD_REQUEST, "Expense already paid".to_string())
            }
            Self::Conflict(message) => error_response(StatusCode::CONFLICT, message),
            Self::ProcessorUnavailable => error_response(
                StatusCode::SERVICE_UNAVAILABLE,
                "Payment processing is not configured".to_string(),
            ),
            err => InternalServerError(err).into_response(),
        }
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorDto { error: message })).into_response()
}

/// Wrapper converting any displayable error into a 500 response.
///
/// Logs the full error message for debugging and returns a generic body to
/// avoid leaking internals to API consumers.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
