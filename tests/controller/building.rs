//! Tests for the building endpoints, in particular the mutation role gate and
//! the restricted-deletion rules.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum::Json;
use entity::user::UserRole;

use koina::{
    controller::building::{create_building, delete_building, list_buildings, update_building},
    controller::extract::AuthUser,
    data::{building::BuildingRepository, user::UserRepository},
    error::{auth::AuthError, Error},
    model::property::{CreateBuildingRequest, UpdateBuildingRequest},
};
use koina_test_utils::{fixtures::factory, setup::test_setup, TestError};

/// A manager may create a building; the row records them as its manager.
#[tokio::test]
async fn manager_creates_building() -> Result<(), TestError> {
    let test = test_setup().await;
    let manager = factory::create_manager(&test.state.db).await?;

    let result = create_building(
        State(test.state.clone()),
        AuthUser(manager.clone()),
        Json(CreateBuildingRequest {
            name: "Sunset Court".to_string(),
            address: "12 Hill Rd".to_string(),
        }),
    )
    .await;

    assert!(result.is_ok());
    let response = result.unwrap().into_response();
    assert_eq!(response.status(), StatusCode::CREATED);

    let buildings = BuildingRepository::new(&test.state.db).get_all().await?;
    assert_eq!(buildings.len(), 1);
    assert_eq!(buildings[0].manager_id, manager.id);

    Ok(())
}

/// A resident's create attempt is rejected and leaves no row behind.
#[tokio::test]
async fn resident_may_not_create_building() -> Result<(), TestError> {
    let test = test_setup().await;
    let tenant = UserRepository::new(&test.state.db)
        .upsert_resident(
            "+15550002".to_string(),
            "Eli Tenant".to_string(),
            UserRole::Tenant,
        )
        .await?;

    let result = create_building(
        State(test.state.clone()),
        AuthUser(tenant),
        Json(CreateBuildingRequest {
            name: "Sunset Court".to_string(),
            address: "12 Hill Rd".to_string(),
        }),
    )
    .await;

    assert!(matches!(
        result,
        Err(Error::Auth(AuthError::Forbidden))
    ));

    let buildings = BuildingRepository::new(&test.state.db).get_all().await?;
    assert!(buildings.is_empty());

    Ok(())
}

/// Any authenticated user may list buildings.
#[tokio::test]
async fn tenant_may_list_buildings() -> Result<(), TestError> {
    let test = test_setup().await;
    let manager = factory::create_manager(&test.state.db).await?;
    factory::create_building(&test.state.db, manager.id).await?;

    let tenant = UserRepository::new(&test.state.db)
        .upsert_resident(
            "+15550002".to_string(),
            "Eli Tenant".to_string(),
            UserRole::Tenant,
        )
        .await?;

    let result = list_buildings(State(test.state.clone()), AuthUser(tenant)).await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().into_response().status(), StatusCode::OK);

    Ok(())
}

/// Updating a missing building yields 404.
#[tokio::test]
async fn update_missing_building_not_found() -> Result<(), TestError> {
    let test = test_setup().await;
    let manager = factory::create_manager(&test.state.db).await?;

    let result = update_building(
        State(test.state.clone()),
        AuthUser(manager),
        Path(42),
        Json(UpdateBuildingRequest {
            name: Some("Nowhere".to_string()),
            address: None,
        }),
    )
    .await;

    assert!(matches!(result, Err(Error::NotFound("Building"))));

    Ok(())
}

/// Deleting a building that still has apartments conflicts and deletes
/// nothing.
#[tokio::test]
async fn delete_building_with_apartments_conflicts() -> Result<(), TestError> {
    let test = test_setup().await;
    let manager = factory::create_manager(&test.state.db).await?;
    let building = factory::create_building(&test.state.db, manager.id).await?;
    factory::create_apartment(&test.state.db, Some(building.id), None).await?;

    let result = delete_building(
        State(test.state.clone()),
        AuthUser(manager),
        Path(building.id),
    )
    .await;

    assert!(matches!(result, Err(Error::Conflict(_))));

    let still_there = BuildingRepository::new(&test.state.db)
        .get_by_id(building.id)
        .await?;
    assert!(still_there.is_some());

    Ok(())
}

/// Deleting an empty building succeeds.
#[tokio::test]
async fn delete_empty_building() -> Result<(), TestError> {
    let test = test_setup().await;
    let manager = factory::create_manager(&test.state.db).await?;
    let building = factory::create_building(&test.state.db, manager.id).await?;

    let result = delete_building(
        State(test.state.clone()),
        AuthUser(manager),
        Path(building.id),
    )
    .await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().into_response().status(), StatusCode::OK);

    let gone = BuildingRepository::new(&test.state.db)
        .get_by_id(building.id)
        .await?;
    assert!(gone.is_none());

    Ok(())
}
