//! Request extractors for the two authentication realms.

use axum::{extract::FromRequestParts, http::header, http::request::Parts};

use crate::{
    error::{auth::AuthError, Error},
    model::app::AppState,
    service::{admin::AdminService, sync::ResidentSyncService},
};

/// Authenticated resident-realm user, resolved from a provider bearer token.
///
/// A valid provider credential alone is not enough: the subject must map to a
/// provisioned local account, claimed by phone number on first sign-in.
pub struct AuthUser(pub entity::user::Model);

/// Authenticated super-admin, resolved from a locally signed console token.
pub struct AdminUser(pub entity::super_admin::Model);

fn bearer_token(parts: &Parts) -> Result<&str, AuthError> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AuthError::MissingCredential)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let identity = state
            .identity
            .verify_bearer(token)
            .await?
            .ok_or(AuthError::InvalidCredential)?;

        let sync = ResidentSyncService::new(&state.db);
        let user = sync.resolve_identity(&identity).await?;

        Ok(Self(user))
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let admin_service = AdminService::new(&state.db, &state.admin_token_secret);
        let admin = admin_service.verify_token(token).await?;

        Ok(Self(admin))
    }
}
