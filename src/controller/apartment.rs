use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use entity::apartment::{ApartmentUsage, OccupancyStatus};
use serde_json::Value;

use crate::{
    controller::extract::AuthUser,
    data::{
        apartment::{ApartmentPatch, ApartmentRepository, NewApartment},
        expense::ExpenseRepository,
    },
    error::{auth::AuthError, Error},
    model::{
        api::{ErrorDto, StatusDto},
        app::AppState,
        property::{
            parse_occupancy, parse_usage, ApartmentDto, ApartmentListQuery,
            CreateApartmentRequest, UpdateApartmentRequest,
        },
    },
    policy::{can_mutate, Resource},
    service::sync::ResidentSyncService,
};

pub static APARTMENT_TAG: &str = "apartments";

/// List apartments, optionally scoped to one building
#[utoipa::path(
    get,
    path = "/api/protected/apartments",
    tag = APARTMENT_TAG,
    params(ApartmentListQuery),
    responses(
        (status = 200, description = "Success when listing apartments", body = Vec<ApartmentDto>),
        (status = 401, description = "Missing or invalid credential", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_apartments(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Query(query): Query<ApartmentListQuery>,
) -> Result<impl IntoResponse, Error> {
    let apartment_repository = ApartmentRepository::new(&state.db);

    let apartments: Vec<ApartmentDto> = apartment_repository
        .get_many(query.building_id)
        .await?
        .into_iter()
        .map(ApartmentDto::from)
        .collect();

    Ok((StatusCode::OK, Json(apartments)))
}

/// Create an apartment and provision resident accounts for its phones
#[utoipa::path(
    post,
    path = "/api/protected/apartments",
    tag = APARTMENT_TAG,
    request_body = CreateApartmentRequest,
    responses(
        (status = 201, description = "Success when creating an apartment", body = ApartmentDto),
        (status = 400, description = "Invalid request body", body = ErrorDto),
        (status = 403, description = "Requester may not manage apartments", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_apartment(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<CreateApartmentRequest>,
) -> Result<impl IntoResponse, Error> {
    if !can_mutate(&user.role, Resource::Apartment) {
        return Err(AuthError::Forbidden.into());
    }
    request.validate()?;

    let apartment_repository = ApartmentRepository::new(&state.db);
    let sync = ResidentSyncService::new(&state.db);

    let usage = match &request.usage {
        Some(usage) => parse_usage(usage)?,
        None => ApartmentUsage::Residential,
    };
    let status = match &request.status {
        Some(status) => parse_occupancy(status)?,
        None => OccupancyStatus::Occupied,
    };
    let shares = request
        .shares
        .map(Value::Object)
        .unwrap_or_else(|| Value::Object(Default::default()));

    let apartment = apartment_repository
        .create(NewApartment {
            identifier: request.identifier,
            floor: request.floor,
            building_id: request.building_id,
            owner_name: request.owner_name,
            owner_phone: request.owner_phone,
            tenant_name: request.tenant_name,
            tenant_phone: request.tenant_phone,
            usage,
            status,
            shares,
        })
        .await?;

    let apartment = sync.reconcile_apartment(apartment).await?;

    Ok((StatusCode::CREATED, Json(ApartmentDto::from(apartment))))
}

/// Update an apartment and re-sync its resident accounts
#[utoipa::path(
    patch,
    path = "/api/protected/apartments/{id}",
    tag = APARTMENT_TAG,
    params(("id" = i32, Path, description = "Apartment ID")),
    request_body = UpdateApartmentRequest,
    responses(
        (status = 200, description = "Success when updating an apartment", body = ApartmentDto),
        (status = 403, description = "Requester may not manage apartments", body = ErrorDto),
        (status = 404, description = "Apartment not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_apartment(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateApartmentRequest>,
) -> Result<impl IntoResponse, Error> {
    if !can_mutate(&user.role, Resource::Apartment) {
        return Err(AuthError::Forbidden.into());
    }
    request.validate()?;

    let apartment_repository = ApartmentRepository::new(&state.db);
    let sync = ResidentSyncService::new(&state.db);

    let usage = match &request.usage {
        Some(usage) => Some(parse_usage(usage)?),
        None => None,
    };
    let status = match &request.status {
        Some(status) => Some(parse_occupancy(status)?),
        None => None,
    };

    let apartment = apartment_repository
        .update(
            id,
            ApartmentPatch {
                identifier: request.identifier,
                floor: request.floor,
                building_id: request.building_id,
                owner_name: request.owner_name,
                owner_phone: request.owner_phone,
                tenant_name: request.tenant_name,
                tenant_phone: request.tenant_phone,
                usage,
                status,
                shares: request.shares.map(Value::Object),
            },
        )
        .await?
        .ok_or(Error::NotFound("Apartment"))?;

    let apartment = sync.reconcile_apartment(apartment).await?;

    Ok((StatusCode::OK, Json(ApartmentDto::from(apartment))))
}

/// Delete an apartment with no expenses attached
#[utoipa::path(
    delete,
    path = "/api/protected/apartments/{id}",
    tag = APARTMENT_TAG,
    params(("id" = i32, Path, description = "Apartment ID")),
    responses(
        (status = 200, description = "Success when deleting an apartment", body = StatusDto),
        (status = 403, description = "Requester may not manage apartments", body = ErrorDto),
        (status = 404, description = "Apartment not found", body = ErrorDto),
        (status = 409, description = "Expenses still reference the apartment", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_apartment(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    if !can_mutate(&user.role, Resource::Apartment) {
        return Err(AuthError::Forbidden.into());
    }

    let apartment_repository = ApartmentRepository::new(&state.db);
    let expense_repository = ExpenseRepository::new(&state.db);

    if expense_repository.count_by_apartment_id(id).await? > 0 {
        return Err(Error::Conflict(
            "Cannot delete an apartment with expenses".to_string(),
        ));
    }

    let result = apartment_repository.delete(id).await?;
    if result.rows_affected == 0 {
        return Err(Error::NotFound("Apartment"));
    }

    Ok((StatusCode::OK, Json(StatusDto::ok())))
}
