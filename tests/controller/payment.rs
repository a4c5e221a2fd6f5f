//! Tests for checkout initiation and webhook reconciliation, including replay
//! behavior.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use entity::{expense::ExpenseStatus, payment::PaymentStatus, user::UserRole};

use koina::{
    controller::extract::AuthUser,
    controller::payment::{create_checkout_session, list_payments, webhook},
    data::{
        expense::ExpenseRepository, notification::NotificationRepository,
        payment::PaymentRepository, user::UserRepository,
    },
    error::Error,
    model::expense::{CheckoutRequest, ProcessorEventDto, ProcessorOutcome},
};
use koina_test_utils::{
    fixtures::{factory, mockito as mock},
    setup::{test_setup, TestSetup},
    TestError,
};

async fn resident(test: &TestSetup) -> Result<entity::user::Model, TestError> {
    let user = UserRepository::new(&test.state.db)
        .upsert_resident(
            "+15550001".to_string(),
            "Dana Owner".to_string(),
            UserRole::Owner,
        )
        .await?;

    Ok(user)
}

/// A successful checkout records a pending payment tied to the session.
#[tokio::test]
async fn checkout_records_pending_payment() -> Result<(), TestError> {
    let mut test = test_setup().await;
    let user = resident(&test).await?;
    let expense = factory::create_expense(&test.state.db, None, None).await?;

    let checkout_mock = mock::mock_checkout_session(&mut test.server, "cs_test_1", None);

    let result = create_checkout_session(
        State(test.state.clone()),
        AuthUser(user.clone()),
        Json(CheckoutRequest {
            expense_id: expense.id,
        }),
    )
    .await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().into_response().status(), StatusCode::OK);
    checkout_mock.assert();

    let payment = PaymentRepository::new(&test.state.db)
        .get_by_checkout_session_id("cs_test_1")
        .await?
        .unwrap();
    assert_eq!(payment.status, PaymentStatus::Pending);
    assert_eq!(payment.expense_id, expense.id);
    assert_eq!(payment.user_id, user.id);
    assert_eq!(payment.amount, expense.amount);

    Ok(())
}

/// Paying an already-settled expense is rejected before any processor call.
#[tokio::test]
async fn checkout_rejects_settled_expense() -> Result<(), TestError> {
    let test = test_setup().await;
    let user = resident(&test).await?;
    let expense = factory::create_expense(&test.state.db, None, None).await?;
    ExpenseRepository::new(&test.state.db)
        .mark_paid(expense.id)
        .await?;

    let result = create_checkout_session(
        State(test.state.clone()),
        AuthUser(user),
        Json(CheckoutRequest {
            expense_id: expense.id,
        }),
    )
    .await;

    assert!(matches!(result, Err(Error::AlreadySettled)));

    let payments = PaymentRepository::new(&test.state.db)
        .count_by_expense_id(expense.id)
        .await?;
    assert_eq!(payments, 0);

    Ok(())
}

/// Checkout answers 503 when the processor is not configured.
#[tokio::test]
async fn checkout_unavailable_without_processor() -> Result<(), TestError> {
    let test = TestSetup::without_checkout().await?;
    let user = resident(&test).await?;
    let expense = factory::create_expense(&test.state.db, None, None).await?;

    let result = create_checkout_session(
        State(test.state.clone()),
        AuthUser(user),
        Json(CheckoutRequest {
            expense_id: expense.id,
        }),
    )
    .await;

    assert!(matches!(result, Err(Error::ProcessorUnavailable)));

    Ok(())
}

/// A completed webhook settles the expense and notifies the payer once, even
/// when replayed.
#[tokio::test]
async fn webhook_settles_once() -> Result<(), TestError> {
    let test = test_setup().await;
    let user = resident(&test).await?;
    let expense = factory::create_expense(&test.state.db, None, None).await?;

    PaymentRepository::new(&test.state.db)
        .create_pending(
            expense.id,
            user.id,
            expense.amount,
            Some("cs_test_1".to_string()),
            None,
        )
        .await?;

    let event = || ProcessorEventDto {
        session_id: Some("cs_test_1".to_string()),
        payment_intent_id: Some("pi_test_1".to_string()),
        outcome: ProcessorOutcome::Completed,
    };

    let first = webhook(State(test.state.clone()), Json(event())).await;
    assert!(first.is_ok());
    assert_eq!(first.unwrap().into_response().status(), StatusCode::OK);

    let replay = webhook(State(test.state.clone()), Json(event())).await;
    assert!(replay.is_ok());
    assert_eq!(replay.unwrap().into_response().status(), StatusCode::OK);

    let expense = ExpenseRepository::new(&test.state.db)
        .get_by_id(expense.id)
        .await?
        .unwrap();
    assert_eq!(expense.status, ExpenseStatus::Paid);

    let notifications = NotificationRepository::new(&test.state.db)
        .get_many_by_user_id(user.id)
        .await?;
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].title, "Payment received");

    Ok(())
}

/// A failed webhook marks the payment failed and leaves the expense pending.
#[tokio::test]
async fn webhook_failure_leaves_expense_pending() -> Result<(), TestError> {
    let test = test_setup().await;
    let user = resident(&test).await?;
    let expense = factory::create_expense(&test.state.db, None, None).await?;

    let payment = PaymentRepository::new(&test.state.db)
        .create_pending(
            expense.id,
            user.id,
            expense.amount,
            Some("cs_test_2".to_string()),
            None,
        )
        .await?;

    let result = webhook(
        State(test.state.clone()),
        Json(ProcessorEventDto {
            session_id: Some("cs_test_2".to_string()),
            payment_intent_id: None,
            outcome: ProcessorOutcome::Failed,
        }),
    )
    .await;
    assert!(result.is_ok());

    let payment = PaymentRepository::new(&test.state.db)
        .get_by_id(payment.id)
        .await?
        .unwrap();
    assert_eq!(payment.status, PaymentStatus::Failed);

    let expense = ExpenseRepository::new(&test.state.db)
        .get_by_id(expense.id)
        .await?
        .unwrap();
    assert_eq!(expense.status, ExpenseStatus::Pending);

    Ok(())
}

/// An event that matches no payment yields 404.
#[tokio::test]
async fn webhook_unknown_session_not_found() -> Result<(), TestError> {
    let test = test_setup().await;

    let result = webhook(
        State(test.state.clone()),
        Json(ProcessorEventDto {
            session_id: Some("cs_unknown".to_string()),
            payment_intent_id: None,
            outcome: ProcessorOutcome::Completed,
        }),
    )
    .await;

    assert!(matches!(result, Err(Error::NotFound("Payment"))));

    Ok(())
}

/// Users see their own payments only.
#[tokio::test]
async fn list_payments_scoped_to_user() -> Result<(), TestError> {
    let test = test_setup().await;
    let payer = resident(&test).await?;
    let other = UserRepository::new(&test.state.db)
        .upsert_resident(
            "+15550002".to_string(),
            "Eli Tenant".to_string(),
            UserRole::Tenant,
        )
        .await?;
    let expense = factory::create_expense(&test.state.db, None, None).await?;

    PaymentRepository::new(&test.state.db)
        .create_pending(
            expense.id,
            payer.id,
            expense.amount,
            Some("cs_test_3".to_string()),
            None,
        )
        .await?;

    let own = PaymentRepository::new(&test.state.db)
        .get_many_by_user_id(payer.id)
        .await?;
    assert_eq!(own.len(), 1);

    let result = list_payments(State(test.state.clone()), AuthUser(other.clone())).await;
    assert!(result.is_ok());

    let others = PaymentRepository::new(&test.state.db)
        .get_many_by_user_id(other.id)
        .await?;
    assert!(others.is_empty());

    Ok(())
}
