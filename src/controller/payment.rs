use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    controller::extract::AuthUser,
    error::Error,
    model::{
        api::{ErrorDto, StatusDto},
        app::AppState,
        expense::{CheckoutRequest, CheckoutSessionDto, PaymentDto, ProcessorEventDto},
    },
    service::ledger::LedgerService,
};

pub static PAYMENT_TAG: &str = "payments";

/// Open a hosted checkout session for an unsettled expense
#[utoipa::path(
    post,
    path = "/api/protected/create-checkout-session",
    tag = PAYMENT_TAG,
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Checkout session created", body = CheckoutSessionDto),
        (status = 400, description = "Expense already paid", body = ErrorDto),
        (status = 404, description = "Expense not found", body = ErrorDto),
        (status = 503, description = "Payment processing is not configured", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_checkout_session(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<CheckoutRequest>,
) -> Result<impl IntoResponse, Error> {
    let ledger = LedgerService::new(&state.db, state.checkout.as_ref(), &state.public_url);

    let session = ledger.initiate(&user, request.expense_id).await?;

    Ok((StatusCode::OK, Json(session)))
}

/// List the requesting user's payments
#[utoipa::path(
    get,
    path = "/api/protected/payments",
    tag = PAYMENT_TAG,
    responses(
        (status = 200, description = "Success when listing payments", body = Vec<PaymentDto>),
        (status = 401, description = "Missing or invalid credential", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_payments(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, Error> {
    let ledger = LedgerService::new(&state.db, state.checkout.as_ref(), &state.public_url);

    let payments: Vec<PaymentDto> = ledger
        .payments_for(user.id)
        .await?
        .into_iter()
        .map(PaymentDto::from)
        .collect();

    Ok((StatusCode::OK, Json(payments)))
}

/// Apply a processor callback to the payment ledger
///
/// Unauthenticated by design; the processor calls it directly. Replays of the
/// same event are absorbed without duplicating side effects.
#[utoipa::path(
    post,
    path = "/api/payments/webhook",
    tag = PAYMENT_TAG,
    request_body = ProcessorEventDto,
    responses(
        (status = 200, description = "Event applied or already applied", body = StatusDto),
        (status = 400, description = "Event carries no payment reference", body = ErrorDto),
        (status = 404, description = "No payment matches the event", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn webhook(
    State(state): State<AppState>,
    Json(event): Json<ProcessorEventDto>,
) -> Result<impl IntoResponse, Error> {
    let ledger = LedgerService::new(&state.db, state.checkout.as_ref(), &state.public_url);

    ledger.reconcile(event).await?;

    Ok((StatusCode::OK, Json(StatusDto::ok())))
}
