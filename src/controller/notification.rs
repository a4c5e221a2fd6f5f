use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    controller::extract::AuthUser,
    data::notification::NotificationRepository,
    error::Error,
    model::{api::ErrorDto, app::AppState, expense::NotificationDto},
};

pub static NOTIFICATION_TAG: &str = "notifications";

/// List the requesting user's notifications, newest first
#[utoipa::path(
    get,
    path = "/api/protected/notifications",
    tag = NOTIFICATION_TAG,
    responses(
        (status = 200, description = "Success when listing notifications", body = Vec<NotificationDto>),
        (status = 401, description = "Missing or invalid credential", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, Error> {
    let notification_repository = NotificationRepository::new(&state.db);

    let notifications: Vec<NotificationDto> = notification_repository
        .get_many_by_user_id(user.id)
        .await?
        .into_iter()
        .map(NotificationDto::from)
        .collect();

    Ok((StatusCode::OK, Json(notifications)))
}

/// Mark one of the requesting user's notifications as read
#[utoipa::path(
    post,
    path = "/api/protected/notifications/{id}/read",
    tag = NOTIFICATION_TAG,
    params(("id" = i32, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Notification marked read", body = NotificationDto),
        (status = 404, description = "Notification not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn mark_notification_read(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let notification_repository = NotificationRepository::new(&state.db);

    // Another user's notification is indistinguishable from a missing one.
    let owned = notification_repository
        .get_by_id(id)
        .await?
        .filter(|notification| notification.user_id == user.id);
    if owned.is_none() {
        return Err(Error::NotFound("Notification"));
    }

    let notification = notification_repository
        .mark_read(id)
        .await?
        .ok_or(Error::NotFound("Notification"))?;

    Ok((StatusCode::OK, Json(NotificationDto::from(notification))))
}
