//! Tests for the apartment endpoints, covering resident provisioning on
//! create/update and the restricted-deletion rule.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use entity::user::UserRole;
use serde_json::{json, Map, Value};

use koina::{
    controller::apartment::{create_apartment, delete_apartment, update_apartment},
    controller::extract::AuthUser,
    data::{apartment::ApartmentRepository, user::UserRepository},
    error::{auth::AuthError, Error},
    model::property::{CreateApartmentRequest, UpdateApartmentRequest},
};
use koina_test_utils::{fixtures::factory, setup::test_setup, TestError};

fn create_request(tenant_phone: Option<&str>, shares: Option<Map<String, Value>>) -> CreateApartmentRequest {
    CreateApartmentRequest {
        identifier: "2B".to_string(),
        floor: Some("2".to_string()),
        building_id: None,
        owner_name: "Dana Owner".to_string(),
        owner_phone: Some("+15550001".to_string()),
        tenant_name: tenant_phone.map(|_| "Eli Tenant".to_string()),
        tenant_phone: tenant_phone.map(str::to_string),
        usage: None,
        status: None,
        shares,
    }
}

/// Creating an apartment with both phones provisions both accounts and bills
/// the tenant.
#[tokio::test]
async fn create_provisions_residents_and_bills_tenant() -> Result<(), TestError> {
    let test = test_setup().await;
    let manager = factory::create_manager(&test.state.db).await?;

    let result = create_apartment(
        State(test.state.clone()),
        AuthUser(manager),
        Json(create_request(Some("+15550002"), None)),
    )
    .await;

    assert!(result.is_ok());
    assert_eq!(
        result.unwrap().into_response().status(),
        StatusCode::CREATED
    );

    let user_repository = UserRepository::new(&test.state.db);
    let owner = user_repository.get_by_phone("+15550001").await?.unwrap();
    let tenant = user_repository.get_by_phone("+15550002").await?.unwrap();
    assert_eq!(owner.role, UserRole::Owner);
    assert_eq!(tenant.role, UserRole::Tenant);

    let apartments = ApartmentRepository::new(&test.state.db).get_many(None).await?;
    assert_eq!(apartments.len(), 1);
    assert_eq!(apartments[0].resident_id, Some(tenant.id));

    Ok(())
}

/// A resident may not create apartments.
#[tokio::test]
async fn resident_may_not_create_apartment() -> Result<(), TestError> {
    let test = test_setup().await;
    let owner = UserRepository::new(&test.state.db)
        .upsert_resident(
            "+15550009".to_string(),
            "Dana Owner".to_string(),
            UserRole::Owner,
        )
        .await?;

    let result = create_apartment(
        State(test.state.clone()),
        AuthUser(owner),
        Json(create_request(None, None)),
    )
    .await;

    assert!(matches!(result, Err(Error::Auth(AuthError::Forbidden))));

    let apartments = ApartmentRepository::new(&test.state.db).get_many(None).await?;
    assert!(apartments.is_empty());

    Ok(())
}

/// Negative share weights are rejected up front.
#[tokio::test]
async fn create_rejects_negative_shares() -> Result<(), TestError> {
    let test = test_setup().await;
    let manager = factory::create_manager(&test.state.db).await?;

    let mut shares = Map::new();
    shares.insert("elevator".to_string(), json!(-5));

    let result = create_apartment(
        State(test.state.clone()),
        AuthUser(manager),
        Json(create_request(None, Some(shares))),
    )
    .await;

    assert!(matches!(result, Err(Error::Validation(_))));

    Ok(())
}

/// Adding a tenant to an owner-billed apartment moves billing to the tenant.
#[tokio::test]
async fn update_moves_billing_to_new_tenant() -> Result<(), TestError> {
    let test = test_setup().await;
    let manager = factory::create_manager(&test.state.db).await?;

    let created = create_apartment(
        State(test.state.clone()),
        AuthUser(manager.clone()),
        Json(create_request(None, None)),
    )
    .await;
    assert!(created.is_ok());

    let user_repository = UserRepository::new(&test.state.db);
    let apartment_repository = ApartmentRepository::new(&test.state.db);

    let apartment = apartment_repository.get_many(None).await?.remove(0);
    let owner = user_repository.get_by_phone("+15550001").await?.unwrap();
    assert_eq!(apartment.resident_id, Some(owner.id));

    let result = update_apartment(
        State(test.state.clone()),
        AuthUser(manager),
        Path(apartment.id),
        Json(UpdateApartmentRequest {
            identifier: None,
            floor: None,
            building_id: None,
            owner_name: None,
            owner_phone: None,
            tenant_name: Some("Eli Tenant".to_string()),
            tenant_phone: Some("+15550002".to_string()),
            usage: None,
            status: None,
            shares: None,
        }),
    )
    .await;

    assert!(result.is_ok());

    let tenant = user_repository.get_by_phone("+15550002").await?.unwrap();
    let apartment = apartment_repository
        .get_by_id(apartment.id)
        .await?
        .unwrap();
    assert_eq!(apartment.resident_id, Some(tenant.id));

    Ok(())
}

/// Deleting an apartment that has expenses conflicts.
#[tokio::test]
async fn delete_apartment_with_expenses_conflicts() -> Result<(), TestError> {
    let test = test_setup().await;
    let manager = factory::create_manager(&test.state.db).await?;
    let apartment = factory::create_apartment(&test.state.db, None, None).await?;
    factory::create_expense(&test.state.db, Some(apartment.id), None).await?;

    let result = delete_apartment(
        State(test.state.clone()),
        AuthUser(manager),
        Path(apartment.id),
    )
    .await;

    assert!(matches!(result, Err(Error::Conflict(_))));

    let still_there = ApartmentRepository::new(&test.state.db)
        .get_by_id(apartment.id)
        .await?;
    assert!(still_there.is_some());

    Ok(())
}

/// Deleting an apartment with no expenses succeeds.
#[tokio::test]
async fn delete_apartment_without_expenses() -> Result<(), TestError> {
    let test = test_setup().await;
    let manager = factory::create_manager(&test.state.db).await?;
    let apartment = factory::create_apartment(&test.state.db, None, None).await?;

    let result = delete_apartment(
        State(test.state.clone()),
        AuthUser(manager),
        Path(apartment.id),
    )
    .await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().into_response().status(), StatusCode::OK);

    Ok(())
}
