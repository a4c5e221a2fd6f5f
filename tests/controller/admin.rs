//! Tests for the super-admin console endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use entity::user::UserRole;

use koina::{
    controller::admin::{
        change_password, create_manager, delete_manager, get_admin_profile, list_managers,
        list_residents, login, setup, stats, update_manager,
    },
    controller::extract::AdminUser,
    data::user::UserRepository,
    error::{auth::AuthError, Error},
    model::admin::{
        AdminLoginRequest, AdminSetupRequest, ChangePasswordRequest, CreateManagerRequest,
        UpdateManagerRequest,
    },
};
use koina_test_utils::{
    constant::TEST_ADMIN_SETUP_KEY, fixtures::factory, setup::test_setup, TestError,
};

fn setup_request(key: &str) -> AdminSetupRequest {
    AdminSetupRequest {
        email: "root@example.com".to_string(),
        password: "hunter2hunter2".to_string(),
        full_name: "Root Admin".to_string(),
        setup_key: key.to_string(),
    }
}

/// Setup with the right key creates the account; login then succeeds.
#[tokio::test]
async fn setup_and_login() -> Result<(), TestError> {
    let test = test_setup().await;

    let created = setup(
        State(test.state.clone()),
        Json(setup_request(TEST_ADMIN_SETUP_KEY)),
    )
    .await;
    assert!(created.is_ok());
    assert_eq!(
        created.unwrap().into_response().status(),
        StatusCode::CREATED
    );

    let logged_in = login(
        State(test.state.clone()),
        Json(AdminLoginRequest {
            email: "root@example.com".to_string(),
            password: "hunter2hunter2".to_string(),
        }),
    )
    .await;
    assert!(logged_in.is_ok());
    assert_eq!(logged_in.unwrap().into_response().status(), StatusCode::OK);

    Ok(())
}

/// A wrong setup key is rejected.
#[tokio::test]
async fn setup_rejects_wrong_key() -> Result<(), TestError> {
    let test = test_setup().await;

    let result = setup(State(test.state.clone()), Json(setup_request("wrong"))).await;

    assert!(matches!(
        result,
        Err(Error::Auth(AuthError::InvalidSetupKey))
    ));

    Ok(())
}

/// Manager CRUD through the console.
#[tokio::test]
async fn manager_crud() -> Result<(), TestError> {
    let test = test_setup().await;
    let admin = factory::create_super_admin(&test.state.db, "root@example.com", "hunter2").await?;

    let created = create_manager(
        State(test.state.clone()),
        AdminUser(admin.clone()),
        Json(CreateManagerRequest {
            full_name: "Maria Manager".to_string(),
            email: Some("maria@example.com".to_string()),
            phone: Some("+15550100".to_string()),
        }),
    )
    .await;
    assert!(created.is_ok());
    assert_eq!(
        created.unwrap().into_response().status(),
        StatusCode::CREATED
    );

    let managers = UserRepository::new(&test.state.db)
        .get_many_by_roles(vec![entity::user::UserRole::Manager])
        .await?;
    assert_eq!(managers.len(), 1);
    let manager_id = managers[0].id;

    let updated = update_manager(
        State(test.state.clone()),
        AdminUser(admin.clone()),
        Path(manager_id),
        Json(UpdateManagerRequest {
            full_name: Some("Maria M. Manager".to_string()),
            email: None,
            phone: None,
        }),
    )
    .await;
    assert!(updated.is_ok());

    let listed = list_managers(State(test.state.clone()), AdminUser(admin.clone())).await;
    assert!(listed.is_ok());

    let deleted = delete_manager(
        State(test.state.clone()),
        AdminUser(admin),
        Path(manager_id),
    )
    .await;
    assert!(deleted.is_ok());

    let managers = UserRepository::new(&test.state.db)
        .get_many_by_roles(vec![entity::user::UserRole::Manager])
        .await?;
    assert!(managers.is_empty());

    Ok(())
}

/// A manager with an assigned building cannot be deleted.
#[tokio::test]
async fn delete_manager_with_building_conflicts() -> Result<(), TestError> {
    let test = test_setup().await;
    let admin = factory::create_super_admin(&test.state.db, "root@example.com", "hunter2").await?;
    let manager = factory::create_manager(&test.state.db).await?;
    factory::create_building(&test.state.db, manager.id).await?;

    let result = delete_manager(
        State(test.state.clone()),
        AdminUser(admin),
        Path(manager.id),
    )
    .await;

    assert!(matches!(result, Err(Error::Conflict(_))));

    Ok(())
}

/// Password rotation requires the current password.
#[tokio::test]
async fn change_password_requires_current() -> Result<(), TestError> {
    let test = test_setup().await;
    let admin = factory::create_super_admin(&test.state.db, "root@example.com", "hunter2").await?;

    let wrong = change_password(
        State(test.state.clone()),
        AdminUser(admin.clone()),
        Json(ChangePasswordRequest {
            current_password: "nope".to_string(),
            new_password: "correct-horse".to_string(),
        }),
    )
    .await;
    assert!(matches!(
        wrong,
        Err(Error::Auth(AuthError::IncorrectPassword))
    ));

    let right = change_password(
        State(test.state.clone()),
        AdminUser(admin),
        Json(ChangePasswordRequest {
            current_password: "hunter2".to_string(),
            new_password: "correct-horse".to_string(),
        }),
    )
    .await;
    assert!(right.is_ok());

    Ok(())
}

/// The residents listing returns owners and tenants, never managers.
#[tokio::test]
async fn list_residents_excludes_managers() -> Result<(), TestError> {
    let test = test_setup().await;
    let admin = factory::create_super_admin(&test.state.db, "root@example.com", "hunter2").await?;
    factory::create_manager(&test.state.db).await?;
    let user_repository = UserRepository::new(&test.state.db);
    user_repository
        .upsert_resident(
            "+15550001".to_string(),
            "Dana Owner".to_string(),
            UserRole::Owner,
        )
        .await?;
    user_repository
        .upsert_resident(
            "+15550002".to_string(),
            "Eli Tenant".to_string(),
            UserRole::Tenant,
        )
        .await?;

    let result = list_residents(State(test.state.clone()), AdminUser(admin)).await;
    assert!(result.is_ok());
    assert_eq!(result.unwrap().into_response().status(), StatusCode::OK);

    let residents = user_repository
        .get_many_by_roles(vec![UserRole::Owner, UserRole::Tenant])
        .await?;
    assert_eq!(residents.len(), 2);

    Ok(())
}

/// The profile endpoint echoes the authenticated admin.
#[tokio::test]
async fn profile_returns_admin() -> Result<(), TestError> {
    let test = test_setup().await;
    let admin = factory::create_super_admin(&test.state.db, "root@example.com", "hunter2").await?;

    let result = get_admin_profile(AdminUser(admin)).await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().into_response().status(), StatusCode::OK);

    Ok(())
}

/// Stats count roles, buildings and subscriptions.
#[tokio::test]
async fn stats_counts_platform_rows() -> Result<(), TestError> {
    let test = test_setup().await;
    let admin = factory::create_super_admin(&test.state.db, "root@example.com", "hunter2").await?;
    let manager = factory::create_manager(&test.state.db).await?;
    factory::create_building(&test.state.db, manager.id).await?;

    let result = stats(State(test.state.clone()), AdminUser(admin)).await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().into_response().status(), StatusCode::OK);

    Ok(())
}
