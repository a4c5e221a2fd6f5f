use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    controller::extract::AuthUser,
    error::{auth::AuthError, Error},
    model::{
        api::{ErrorDto, StatusDto},
        app::AppState,
        expense::{CreateExpenseRequest, ExpenseDto, ExpenseListQuery, UpdateExpenseRequest},
    },
    policy::{can_mutate, Resource},
    service::expense::ExpenseService,
};

pub static EXPENSE_TAG: &str = "expenses";

/// List expenses filtered by building, apartment, and/or status
#[utoipa::path(
    get,
    path = "/api/protected/expenses",
    tag = EXPENSE_TAG,
    params(ExpenseListQuery),
    responses(
        (status = 200, description = "Success when listing expenses", body = Vec<ExpenseDto>),
        (status = 401, description = "Missing or invalid credential", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_expenses(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Query(query): Query<ExpenseListQuery>,
) -> Result<impl IntoResponse, Error> {
    let expense_service = ExpenseService::new(&state.db);

    let expenses: Vec<ExpenseDto> = expense_service
        .list(&query)
        .await?
        .into_iter()
        .map(ExpenseDto::from)
        .collect();

    Ok((StatusCode::OK, Json(expenses)))
}

/// Create an expense, alerting the billing resident for apartment-scoped ones
#[utoipa::path(
    post,
    path = "/api/protected/expenses",
    tag = EXPENSE_TAG,
    request_body = CreateExpenseRequest,
    responses(
        (status = 201, description = "Success when creating an expense", body = ExpenseDto),
        (status = 400, description = "Invalid request body", body = ErrorDto),
        (status = 403, description = "Requester may not manage expenses", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_expense(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<CreateExpenseRequest>,
) -> Result<impl IntoResponse, Error> {
    if !can_mutate(&user.role, Resource::Expense) {
        return Err(AuthError::Forbidden.into());
    }

    let expense_service = ExpenseService::new(&state.db);

    let expense = expense_service.create(request).await?;

    Ok((StatusCode::CREATED, Json(ExpenseDto::from(expense))))
}

/// Update an expense's descriptive fields
#[utoipa::path(
    patch,
    path = "/api/protected/expenses/{id}",
    tag = EXPENSE_TAG,
    params(("id" = i32, Path, description = "Expense ID")),
    request_body = UpdateExpenseRequest,
    responses(
        (status = 200, description = "Success when updating an expense", body = ExpenseDto),
        (status = 403, description = "Requester may not manage expenses", body = ErrorDto),
        (status = 404, description = "Expense not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_expense(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateExpenseRequest>,
) -> Result<impl IntoResponse, Error> {
    if !can_mutate(&user.role, Resource::Expense) {
        return Err(AuthError::Forbidden.into());
    }

    let expense_service = ExpenseService::new(&state.db);

    let expense = expense_service.update(id, request).await?;

    Ok((StatusCode::OK, Json(ExpenseDto::from(expense))))
}

/// Delete an expense with no recorded payments
#[utoipa::path(
    delete,
    path = "/api/protected/expenses/{id}",
    tag = EXPENSE_TAG,
    params(("id" = i32, Path, description = "Expense ID")),
    responses(
        (status = 200, description = "Success when deleting an expense", body = StatusDto),
        (status = 403, description = "Requester may not manage expenses", body = ErrorDto),
        (status = 404, description = "Expense not found", body = ErrorDto),
        (status = 409, description = "Payments still reference the expense", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_expense(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    if !can_mutate(&user.role, Resource::Expense) {
        return Err(AuthError::Forbidden.into());
    }

    let expense_service = ExpenseService::new(&state.db);

    expense_service.delete(id).await?;

    Ok((StatusCode::OK, Json(StatusDto::ok())))
}
