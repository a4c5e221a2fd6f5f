//! Tests for the identity gate: phone probe, account linking, and bearer
//! verification against the mocked identity provider.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use entity::user::UserRole;

use koina::{
    controller::extract::AuthUser,
    controller::user::{check_phone, get_profile, sync_user},
    data::user::UserRepository,
    error::{auth::AuthError, Error},
    model::user::{CheckPhoneRequest, SyncUserRequest},
    service::sync::ResidentSyncService,
};
use koina_test_utils::{
    fixtures::{factory, mockito as mock},
    setup::test_setup,
    TestError,
};

/// A provisioned phone reports its role; an unknown one reports absence.
#[tokio::test]
async fn check_phone_reports_provisioning() -> Result<(), TestError> {
    let test = test_setup().await;
    UserRepository::new(&test.state.db)
        .upsert_resident(
            "+15550001".to_string(),
            "Dana Owner".to_string(),
            UserRole::Owner,
        )
        .await?;

    let found = check_phone(
        State(test.state.clone()),
        Json(CheckPhoneRequest {
            phone: "+15550001".to_string(),
        }),
    )
    .await;
    assert!(found.is_ok());
    assert_eq!(found.unwrap().into_response().status(), StatusCode::OK);

    let missing = check_phone(
        State(test.state.clone()),
        Json(CheckPhoneRequest {
            phone: "+15559999".to_string(),
        }),
    )
    .await;
    assert!(missing.is_ok());
    assert_eq!(missing.unwrap().into_response().status(), StatusCode::OK);

    Ok(())
}

/// Syncing a provisioned phone links the subject; repeating it is a no-op.
#[tokio::test]
async fn sync_links_once() -> Result<(), TestError> {
    let test = test_setup().await;
    let user_repository = UserRepository::new(&test.state.db);
    user_repository
        .upsert_resident(
            "+15550001".to_string(),
            "Dana Owner".to_string(),
            UserRole::Owner,
        )
        .await?;

    let request = || SyncUserRequest {
        id: "sub-aaa".to_string(),
        email: Some("dana@example.com".to_string()),
        full_name: "Dana Owner".to_string(),
        phone: Some("+15550001".to_string()),
    };

    let first = sync_user(State(test.state.clone()), Json(request())).await;
    assert!(first.is_ok());

    let second = sync_user(State(test.state.clone()), Json(request())).await;
    assert!(second.is_ok());

    let linked = user_repository.get_by_external_id("sub-aaa").await?.unwrap();
    assert_eq!(linked.phone.as_deref(), Some("+15550001"));
    assert_eq!(linked.email.as_deref(), Some("dana@example.com"));

    Ok(())
}

/// Syncing an unregistered phone is rejected and provisions nothing.
#[tokio::test]
async fn sync_rejects_unregistered_phone() -> Result<(), TestError> {
    let test = test_setup().await;

    let result = sync_user(
        State(test.state.clone()),
        Json(SyncUserRequest {
            id: "sub-bbb".to_string(),
            email: None,
            full_name: "Stranger".to_string(),
            phone: Some("+15559999".to_string()),
        }),
    )
    .await;

    assert!(matches!(
        result,
        Err(Error::Auth(AuthError::PhoneNotRegistered(_)))
    ));

    let user = UserRepository::new(&test.state.db)
        .get_by_phone("+15559999")
        .await?;
    assert!(user.is_none());

    Ok(())
}

/// The profile endpoint echoes the authenticated account.
#[tokio::test]
async fn profile_returns_account() -> Result<(), TestError> {
    let test = test_setup().await;
    let manager = factory::create_manager(&test.state.db).await?;

    let result = get_profile(AuthUser(manager)).await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().into_response().status(), StatusCode::OK);

    Ok(())
}

/// A provider-verified identity resolves to the linked account.
#[tokio::test]
async fn verified_identity_resolves_account() -> Result<(), TestError> {
    let mut test = test_setup().await;
    UserRepository::new(&test.state.db)
        .upsert_resident(
            "+15550001".to_string(),
            "Dana Owner".to_string(),
            UserRole::Owner,
        )
        .await?;

    let identity_mock = mock::mock_identity_user(
        &mut test.server,
        "sub-ccc",
        Some("dana@example.com"),
        Some("+15550001"),
    );

    let identity = test
        .state
        .identity
        .verify_bearer("provider-token")
        .await
        .unwrap()
        .unwrap();
    identity_mock.assert();

    let sync = ResidentSyncService::new(&test.state.db);
    let user = sync.resolve_identity(&identity).await.unwrap();
    assert_eq!(user.external_id.as_deref(), Some("sub-ccc"));
    assert_eq!(user.role, UserRole::Owner);

    Ok(())
}

/// A rejected bearer resolves to no identity at all.
#[tokio::test]
async fn rejected_bearer_resolves_to_none() -> Result<(), TestError> {
    let mut test = test_setup().await;

    let identity_mock = mock::mock_identity_rejection(&mut test.server);

    let identity = test
        .state
        .identity
        .verify_bearer("bad-token")
        .await
        .unwrap();
    identity_mock.assert();

    assert!(identity.is_none());

    Ok(())
}
