//! Tests for the expense endpoints: role gating, resident alerting, filters
//! and the restricted-deletion rule.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use entity::user::UserRole;
use rust_decimal::Decimal;

use koina::{
    controller::expense::{create_expense, delete_expense, list_expenses, update_expense},
    controller::extract::AuthUser,
    data::{
        apartment::ApartmentRepository, expense::ExpenseRepository,
        notification::NotificationRepository, payment::PaymentRepository, user::UserRepository,
    },
    error::{auth::AuthError, Error},
    model::expense::{CreateExpenseRequest, ExpenseListQuery, UpdateExpenseRequest},
};
use koina_test_utils::{fixtures::factory, setup::test_setup, TestError};

fn request(apartment_id: Option<i32>, building_id: Option<i32>) -> CreateExpenseRequest {
    CreateExpenseRequest {
        title: "Elevator repair".to_string(),
        description: None,
        amount: Decimal::new(4500, 2),
        category: "maintenance".to_string(),
        supplier: None,
        due_date: Utc::now().naive_utc(),
        apartment_id,
        building_id,
    }
}

/// An apartment-scoped expense alerts the unit's billing resident.
#[tokio::test]
async fn apartment_expense_alerts_resident() -> Result<(), TestError> {
    let test = test_setup().await;
    let manager = factory::create_manager(&test.state.db).await?;
    let apartment = factory::create_apartment(&test.state.db, None, None).await?;

    let resident = UserRepository::new(&test.state.db)
        .upsert_resident(
            "+15550001".to_string(),
            "Dana Owner".to_string(),
            UserRole::Owner,
        )
        .await?;
    ApartmentRepository::new(&test.state.db)
        .set_resident_id(apartment.id, Some(resident.id))
        .await?;

    let result = create_expense(
        State(test.state.clone()),
        AuthUser(manager),
        Json(request(Some(apartment.id), None)),
    )
    .await;

    assert!(result.is_ok());
    assert_eq!(
        result.unwrap().into_response().status(),
        StatusCode::CREATED
    );

    let notifications = NotificationRepository::new(&test.state.db)
        .get_many_by_user_id(resident.id)
        .await?;
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].title, "New Expense");

    Ok(())
}

/// A tenant may not create expenses, and the rejected call writes nothing.
#[tokio::test]
async fn tenant_may_not_create_expense() -> Result<(), TestError> {
    let test = test_setup().await;
    let tenant = UserRepository::new(&test.state.db)
        .upsert_resident(
            "+15550002".to_string(),
            "Eli Tenant".to_string(),
            UserRole::Tenant,
        )
        .await?;

    let result = create_expense(
        State(test.state.clone()),
        AuthUser(tenant),
        Json(request(None, None)),
    )
    .await;

    assert!(matches!(result, Err(Error::Auth(AuthError::Forbidden))));

    let expenses = ExpenseRepository::new(&test.state.db)
        .get_many(Default::default())
        .await?;
    assert!(expenses.is_empty());

    Ok(())
}

/// An unknown status filter is rejected as validation error.
#[tokio::test]
async fn list_rejects_unknown_status() -> Result<(), TestError> {
    let test = test_setup().await;
    let manager = factory::create_manager(&test.state.db).await?;

    let result = list_expenses(
        State(test.state.clone()),
        AuthUser(manager),
        Query(ExpenseListQuery {
            building_id: None,
            apartment_id: None,
            status: Some("settled".to_string()),
        }),
    )
    .await;

    assert!(matches!(result, Err(Error::Validation(_))));

    Ok(())
}

/// Listing with filters succeeds.
#[tokio::test]
async fn list_with_filters() -> Result<(), TestError> {
    let test = test_setup().await;
    let manager = factory::create_manager(&test.state.db).await?;
    factory::create_expense(&test.state.db, None, None).await?;

    let result = list_expenses(
        State(test.state.clone()),
        AuthUser(manager),
        Query(ExpenseListQuery {
            building_id: None,
            apartment_id: None,
            status: Some("pending".to_string()),
        }),
    )
    .await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().into_response().status(), StatusCode::OK);

    Ok(())
}

/// Updates touch descriptive fields only.
#[tokio::test]
async fn update_expense_fields() -> Result<(), TestError> {
    let test = test_setup().await;
    let manager = factory::create_manager(&test.state.db).await?;
    let expense = factory::create_expense(&test.state.db, None, None).await?;

    let result = update_expense(
        State(test.state.clone()),
        AuthUser(manager),
        Path(expense.id),
        Json(UpdateExpenseRequest {
            title: Some("Elevator overhaul".to_string()),
            description: None,
            amount: Some(Decimal::new(9900, 2)),
            category: None,
            supplier: None,
            due_date: None,
        }),
    )
    .await;

    assert!(result.is_ok());

    let updated = ExpenseRepository::new(&test.state.db)
        .get_by_id(expense.id)
        .await?
        .unwrap();
    assert_eq!(updated.title, "Elevator overhaul");
    assert_eq!(updated.amount, Decimal::new(9900, 2));
    assert_eq!(updated.category, "maintenance");

    Ok(())
}

/// Deleting an expense with recorded payments conflicts.
#[tokio::test]
async fn delete_expense_with_payments_conflicts() -> Result<(), TestError> {
    let test = test_setup().await;
    let manager = factory::create_manager(&test.state.db).await?;
    let expense = factory::create_expense(&test.state.db, None, None).await?;

    PaymentRepository::new(&test.state.db)
        .create_pending(
            expense.id,
            manager.id,
            expense.amount,
            Some("cs_test_1".to_string()),
            None,
        )
        .await?;

    let result = delete_expense(
        State(test.state.clone()),
        AuthUser(manager),
        Path(expense.id),
    )
    .await;

    assert!(matches!(result, Err(Error::Conflict(_))));

    Ok(())
}
