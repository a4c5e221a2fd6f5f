use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    controller::extract::AdminUser,
    error::Error,
    model::{
        admin::{
            AdminDto, AdminLoginRequest, AdminLoginResponse, AdminSetupRequest,
            AdminSetupResponse, ChangePasswordRequest, CreateManagerRequest, StatsDto,
            SubscriptionDto, UpdateManagerRequest,
        },
        api::{ErrorDto, StatusDto},
        app::AppState,
        user::UserDto,
    },
    service::admin::AdminService,
};

pub static ADMIN_TAG: &str = "super-admin";

/// Bootstrap the first console account, gated by the setup key
#[utoipa::path(
    post,
    path = "/api/super-admin/setup",
    tag = ADMIN_TAG,
    request_body = AdminSetupRequest,
    responses(
        (status = 201, description = "Console account created", body = AdminSetupResponse),
        (status = 403, description = "Invalid setup key", body = ErrorDto),
        (status = 409, description = "Setup already completed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn setup(
    State(state): State<AppState>,
    Json(request): Json<AdminSetupRequest>,
) -> Result<impl IntoResponse, Error> {
    let admin_service = AdminService::new(&state.db, &state.admin_token_secret);

    let response = admin_service.setup(request, &state.admin_setup_key).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Log into the console with email and password
#[utoipa::path(
    post,
    path = "/api/super-admin/login",
    tag = ADMIN_TAG,
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Signed token and admin profile", body = AdminLoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<AdminLoginRequest>,
) -> Result<impl IntoResponse, Error> {
    let admin_service = AdminService::new(&state.db, &state.admin_token_secret);

    let response = admin_service.login(request).await?;

    Ok((StatusCode::OK, Json(response)))
}

/// Get the requesting admin's profile
#[utoipa::path(
    get,
    path = "/api/super-admin/protected/profile",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Success when fetching the profile", body = AdminDto),
        (status = 401, description = "Missing or invalid console token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_admin_profile(AdminUser(admin): AdminUser) -> Result<impl IntoResponse, Error> {
    Ok((StatusCode::OK, Json(AdminDto::from(admin))))
}

/// Rotate the requesting admin's password
#[utoipa::path(
    post,
    path = "/api/super-admin/protected/change-password",
    tag = ADMIN_TAG,
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = StatusDto),
        (status = 401, description = "Current password is incorrect", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn change_password(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, Error> {
    let admin_service = AdminService::new(&state.db, &state.admin_token_secret);

    admin_service.change_password(admin.id, request).await?;

    Ok((StatusCode::OK, Json(StatusDto::ok())))
}

/// List all manager accounts
#[utoipa::path(
    get,
    path = "/api/super-admin/protected/managers",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Success when listing managers", body = Vec<UserDto>),
        (status = 401, description = "Missing or invalid console token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_managers(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> Result<impl IntoResponse, Error> {
    let admin_service = AdminService::new(&state.db, &state.admin_token_secret);

    let managers: Vec<UserDto> = admin_service
        .list_managers()
        .await?
        .into_iter()
        .map(UserDto::from)
        .collect();

    Ok((StatusCode::OK, Json(managers)))
}

/// Create a manager account
#[utoipa::path(
    post,
    path = "/api/super-admin/protected/managers",
    tag = ADMIN_TAG,
    request_body = CreateManagerRequest,
    responses(
        (status = 201, description = "Manager created", body = UserDto),
        (status = 400, description = "Invalid request body", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_manager(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Json(request): Json<CreateManagerRequest>,
) -> Result<impl IntoResponse, Error> {
    let admin_service = AdminService::new(&state.db, &state.admin_token_secret);

    let manager = admin_service.create_manager(request).await?;

    Ok((StatusCode::CREATED, Json(UserDto::from(manager))))
}

/// Update a manager account
#[utoipa::path(
    patch,
    path = "/api/super-admin/protected/managers/{id}",
    tag = ADMIN_TAG,
    params(("id" = i32, Path, description = "Manager user ID")),
    request_body = UpdateManagerRequest,
    responses(
        (status = 200, description = "Manager updated", body = UserDto),
        (status = 404, description = "Manager not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_manager(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateManagerRequest>,
) -> Result<impl IntoResponse, Error> {
    let admin_service = AdminService::new(&state.db, &state.admin_token_secret);

    let manager = admin_service.update_manager(id, request).await?;

    Ok((StatusCode::OK, Json(UserDto::from(manager))))
}

/// Delete a manager with no assigned buildings
#[utoipa::path(
    delete,
    path = "/api/super-admin/protected/managers/{id}",
    tag = ADMIN_TAG,
    params(("id" = i32, Path, description = "Manager user ID")),
    responses(
        (status = 200, description = "Manager deleted", body = StatusDto),
        (status = 404, description = "Manager not found", body = ErrorDto),
        (status = 409, description = "Buildings still reference the manager", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_manager(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let admin_service = AdminService::new(&state.db, &state.admin_token_secret);

    admin_service.delete_manager(id).await?;

    Ok((StatusCode::OK, Json(StatusDto::ok())))
}

/// List all resident accounts across the platform
#[utoipa::path(
    get,
    path = "/api/super-admin/protected/residents",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Success when listing residents", body = Vec<UserDto>),
        (status = 401, description = "Missing or invalid console token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_residents(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> Result<impl IntoResponse, Error> {
    let admin_service = AdminService::new(&state.db, &state.admin_token_secret);

    let residents: Vec<UserDto> = admin_service
        .list_residents()
        .await?
        .into_iter()
        .map(UserDto::from)
        .collect();

    Ok((StatusCode::OK, Json(residents)))
}

/// List all subscriptions joined with their owning user
#[utoipa::path(
    get,
    path = "/api/super-admin/protected/subscriptions",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Success when listing subscriptions", body = Vec<SubscriptionDto>),
        (status = 401, description = "Missing or invalid console token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_subscriptions(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> Result<impl IntoResponse, Error> {
    let admin_service = AdminService::new(&state.db, &state.admin_token_secret);

    let subscriptions = admin_service.list_subscriptions().await?;

    Ok((StatusCode::OK, Json(subscriptions)))
}

/// Platform-wide counters for the console dashboard
#[utoipa::path(
    get,
    path = "/api/super-admin/protected/stats",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Success when fetching stats", body = StatsDto),
        (status = 401, description = "Missing or invalid console token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn stats(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> Result<impl IntoResponse, Error> {
    let admin_service = AdminService::new(&state.db, &state.admin_token_secret);

    let stats = admin_service.stats().await?;

    Ok((StatusCode::OK, Json(stats)))
}
