//! Tests for the notification endpoints, including the ownership rule on
//! mark-read.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use entity::{notification::NotificationType, user::UserRole};

use koina::{
    controller::extract::AuthUser,
    controller::notification::{list_notifications, mark_notification_read},
    data::{notification::NotificationRepository, user::UserRepository},
    error::Error,
};
use koina_test_utils::{setup::test_setup, TestError};

async fn users(
    db: &sea_orm::DatabaseConnection,
) -> Result<(entity::user::Model, entity::user::Model), TestError> {
    let repository = UserRepository::new(db);
    let owner = repository
        .upsert_resident(
            "+15550001".to_string(),
            "Dana Owner".to_string(),
            UserRole::Owner,
        )
        .await?;
    let tenant = repository
        .upsert_resident(
            "+15550002".to_string(),
            "Eli Tenant".to_string(),
            UserRole::Tenant,
        )
        .await?;

    Ok((owner, tenant))
}

/// Listing returns only the requester's notifications.
#[tokio::test]
async fn list_is_scoped_to_requester() -> Result<(), TestError> {
    let test = test_setup().await;
    let (owner, tenant) = users(&test.state.db).await?;

    let repository = NotificationRepository::new(&test.state.db);
    repository
        .create(
            owner.id,
            "New Expense".to_string(),
            "Elevator repair".to_string(),
            NotificationType::Alert,
        )
        .await?;

    let result = list_notifications(State(test.state.clone()), AuthUser(tenant.clone())).await;
    assert!(result.is_ok());
    assert_eq!(result.unwrap().into_response().status(), StatusCode::OK);

    assert_eq!(repository.count_by_user_id(owner.id).await?, 1);
    assert_eq!(repository.count_by_user_id(tenant.id).await?, 0);

    Ok(())
}

/// Marking another user's notification reads as not found and flips nothing.
#[tokio::test]
async fn mark_read_requires_ownership() -> Result<(), TestError> {
    let test = test_setup().await;
    let (owner, tenant) = users(&test.state.db).await?;

    let repository = NotificationRepository::new(&test.state.db);
    let notification = repository
        .create(
            owner.id,
            "New Expense".to_string(),
            "Elevator repair".to_string(),
            NotificationType::Alert,
        )
        .await?;

    let result = mark_notification_read(
        State(test.state.clone()),
        AuthUser(tenant),
        Path(notification.id),
    )
    .await;
    assert!(matches!(result, Err(Error::NotFound("Notification"))));

    let untouched = repository.get_by_id(notification.id).await?.unwrap();
    assert!(!untouched.is_read);

    let owned = mark_notification_read(
        State(test.state.clone()),
        AuthUser(owner),
        Path(notification.id),
    )
    .await;
    assert!(owned.is_ok());

    let read = repository.get_by_id(notification.id).await?.unwrap();
    assert!(read.is_read);

    Ok(())
}
