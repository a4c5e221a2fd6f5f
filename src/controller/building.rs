use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    controller::extract::AuthUser,
    data::{
        apartment::ApartmentRepository, building::BuildingRepository, expense::ExpenseRepository,
    },
    error::{auth::AuthError, Error},
    model::{
        api::{ErrorDto, StatusDto},
        app::AppState,
        property::{BuildingDto, CreateBuildingRequest, UpdateBuildingRequest},
    },
    policy::{can_mutate, Resource},
};

pub static BUILDING_TAG: &str = "buildings";

/// List all buildings
#[utoipa::path(
    get,
    path = "/api/protected/buildings",
    tag = BUILDING_TAG,
    responses(
        (status = 200, description = "Success when listing buildings", body = Vec<BuildingDto>),
        (status = 401, description = "Missing or invalid credential", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_buildings(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
) -> Result<impl IntoResponse, Error> {
    let building_repository = BuildingRepository::new(&state.db);

    let buildings: Vec<BuildingDto> = building_repository
        .get_all()
        .await?
        .into_iter()
        .map(BuildingDto::from)
        .collect();

    Ok((StatusCode::OK, Json(buildings)))
}

/// Create a building managed by the requesting manager
#[utoipa::path(
    post,
    path = "/api/protected/buildings",
    tag = BUILDING_TAG,
    request_body = CreateBuildingRequest,
    responses(
        (status = 201, description = "Success when creating a building", body = BuildingDto),
        (status = 400, description = "Invalid request body", body = ErrorDto),
        (status = 403, description = "Requester may not manage buildings", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_building(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<CreateBuildingRequest>,
) -> Result<impl IntoResponse, Error> {
    if !can_mutate(&user.role, Resource::Building) {
        return Err(AuthError::Forbidden.into());
    }
    request.validate()?;

    let building_repository = BuildingRepository::new(&state.db);

    let building = building_repository
        .create(request.name, request.address, user.id)
        .await?;

    Ok((StatusCode::CREATED, Json(BuildingDto::from(building))))
}

/// Update a building's name or address
#[utoipa::path(
    patch,
    path = "/api/protected/buildings/{id}",
    tag = BUILDING_TAG,
    params(("id" = i32, Path, description = "Building ID")),
    request_body = UpdateBuildingRequest,
    responses(
        (status = 200, description = "Success when updating a building", body = BuildingDto),
        (status = 403, description = "Requester may not manage buildings", body = ErrorDto),
        (status = 404, description = "Building not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_building(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateBuildingRequest>,
) -> Result<impl IntoResponse, Error> {
    if !can_mutate(&user.role, Resource::Building) {
        return Err(AuthError::Forbidden.into());
    }
    request.validate()?;

    let building_repository = BuildingRepository::new(&state.db);

    let building = building_repository
        .update(id, request.name, request.address)
        .await?
        .ok_or(Error::NotFound("Building"))?;

    Ok((StatusCode::OK, Json(BuildingDto::from(building))))
}

/// Delete a building with no apartments or expenses attached
#[utoipa::path(
    delete,
    path = "/api/protected/buildings/{id}",
    tag = BUILDING_TAG,
    params(("id" = i32, Path, description = "Building ID")),
    responses(
        (status = 200, description = "Success when deleting a building", body = StatusDto),
        (status = 403, description = "Requester may not manage buildings", body = ErrorDto),
        (status = 404, description = "Building not found", body = ErrorDto),
        (status = 409, description = "Apartments or expenses still reference the building", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_building(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    if !can_mutate(&user.role, Resource::Building) {
        return Err(AuthError::Forbidden.into());
    }

    let building_repository = BuildingRepository::new(&state.db);
    let apartment_repository = ApartmentRepository::new(&state.db);
    let expense_repository = ExpenseRepository::new(&state.db);

    if apartment_repository.count_by_building_id(id).await? > 0 {
        return Err(Error::Conflict(
            "Cannot delete a building with apartments".to_string(),
        ));
    }
    if expense_repository.count_by_building_id(id).await? > 0 {
        return Err(Error::Conflict(
            "Cannot delete a building with expenses".to_string(),
        ));
    }

    let result = building_repository.delete(id).await?;
    if result.rows_affected == 0 {
        return Err(Error::NotFound("Building"));
    }

    Ok((StatusCode::OK, Json(StatusDto::ok())))
}
