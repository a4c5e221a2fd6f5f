use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    controller::extract::AuthUser,
    error::Error,
    model::{
        api::ErrorDto,
        app::AppState,
        user::{CheckPhoneRequest, CheckPhoneResponse, SyncUserRequest, UserDto},
    },
    service::sync::ResidentSyncService,
};

pub static USER_TAG: &str = "users";

/// Check whether a phone number has been provisioned, and in which role
///
/// Pre-login probe used by clients to route sign-in; intentionally
/// unauthenticated.
#[utoipa::path(
    post,
    path = "/api/users/check-phone",
    tag = USER_TAG,
    request_body = CheckPhoneRequest,
    responses(
        (status = 200, description = "Lookup result", body = CheckPhoneResponse),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn check_phone(
    State(state): State<AppState>,
    Json(request): Json<CheckPhoneRequest>,
) -> Result<impl IntoResponse, Error> {
    let sync = ResidentSyncService::new(&state.db);

    let response = sync.check_phone(&request.phone).await?;

    Ok((StatusCode::OK, Json(response)))
}

/// Link a provider identity to its provisioned account after first login
#[utoipa::path(
    post,
    path = "/api/users/sync",
    tag = USER_TAG,
    request_body = SyncUserRequest,
    responses(
        (status = 200, description = "Account linked or already linked", body = UserDto),
        (status = 401, description = "Identity has no phone to link by", body = ErrorDto),
        (status = 403, description = "Phone not registered by any manager", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn sync_user(
    State(state): State<AppState>,
    Json(request): Json<SyncUserRequest>,
) -> Result<impl IntoResponse, Error> {
    request.validate()?;

    let sync = ResidentSyncService::new(&state.db);

    let user = sync.sync_user(request).await?;

    Ok((StatusCode::OK, Json(UserDto::from(user))))
}

/// Get the requesting user's profile
#[utoipa::path(
    get,
    path = "/api/protected/profile",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Success when fetching the profile", body = UserDto),
        (status = 401, description = "Missing or invalid credential", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_profile(AuthUser(user): AuthUser) -> Result<impl IntoResponse, Error> {
    Ok((StatusCode::OK, Json(UserDto::from(user))))
}
