use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Authentication and authorization failures across both realms.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("No authorization header")]
    MissingCredential,
    #[error("Identity provider rejected the supplied credential")]
    InvalidCredential,
    #[error("Identity {0:?} verified upstream but has no local user record")]
    UserNotProvisioned(String),
    #[error("Role does not permit this operation")]
    Forbidden,
    #[error("Super-admin token is missing, expired, or revoked")]
    InvalidAdminToken,
    #[error("Unknown email or wrong password")]
    InvalidLogin,
    #[error("Current password did not verify")]
    IncorrectPassword,
    #[error("Setup key mismatch")]
    InvalidSetupKey,
    #[error("Phone {0:?} is not registered on any apartment")]
    PhoneNotRegistered(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::MissingCredential => (StatusCode::UNAUTHORIZED, "No authorization header"),
            Self::InvalidCredential | Self::InvalidAdminToken => {
                (StatusCode::UNAUTHORIZED, "Invalid token")
            }
            Self::UserNotProvisioned(external_id) => {
                tracing::debug!(external_id = %external_id, "{}", self);

                (StatusCode::UNAUTHORIZED, "User not synced in database")
            }
            Self::Forbidden => (StatusCode::FORBIDDEN, "Forbidden"),
            Self::InvalidLogin => (StatusCode::UNAUTHORIZED, "Invalid credentials"),
            Self::IncorrectPassword => (StatusCode::UNAUTHORIZED, "Current password is incorrect"),
            Self::InvalidSetupKey => (StatusCode::FORBIDDEN, "Invalid setup key"),
            Self::PhoneNotRegistered(_) => (
                StatusCode::FORBIDDEN,
                "Phone not registered. Please contact your building manager.",
            ),
        };

        (
            status,
            Json(ErrorDto {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}
