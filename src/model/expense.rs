use chrono::NaiveDateTime;
use entity::expense::ExpenseStatus;
use rust_decimal::Decimal;
use sea_orm::ActiveEnum;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{error::Error, model::property::require_non_empty};

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDto {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub category: String,
    pub supplier: Option<String>,
    pub due_date: NaiveDateTime,
    pub status: String,
    pub apartment_id: Option<i32>,
    pub building_id: Option<i32>,
    pub created_at: NaiveDateTime,
}

impl From<entity::expense::Model> for ExpenseDto {
    fn from(expense: entity::expense::Model) -> Self {
        Self {
            id: expense.id,
            title: expense.title,
            description: expense.description,
            amount: expense.amount,
            category: expense.category,
            supplier: expense.supplier,
            due_date: expense.due_date,
            status: expense.status.to_value(),
            apartment_id: expense.apartment_id,
            building_id: expense.building_id,
            created_at: expense.created_at,
        }
    }
}

/// Optional equality predicates for expense listing; all present predicates
/// are ANDed.
#[derive(Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseListQuery {
    pub building_id: Option<i32>,
    pub apartment_id: Option<i32>,
    pub status: Option<String>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseRequest {
    pub title: String,
    pub description: Option<String>,
    pub amount: Decimal,
    /// Conventionally utilities/maintenance/cleaning/insurance/other, but any
    /// manager-defined category is accepted.
    pub category: String,
    pub supplier: Option<String>,
    pub due_date: NaiveDateTime,
    /// Null for a building-wide common expense.
    pub apartment_id: Option<i32>,
    pub building_id: Option<i32>,
}

impl CreateExpenseRequest {
    pub fn validate(&self) -> Result<(), Error> {
        require_non_empty("title", &self.title)?;
        require_non_empty("category", &self.category)?;
        if self.amount < Decimal::ZERO {
            return Err(Error::Validation(
                "amount must not be negative".to_string(),
            ));
        }

        Ok(())
    }
}

/// Descriptive-field updates only; `status` transitions flow through the
/// payment ledger, never through PATCH.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExpenseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub category: Option<String>,
    pub supplier: Option<String>,
    pub due_date: Option<NaiveDateTime>,
}

impl UpdateExpenseRequest {
    pub fn validate(&self) -> Result<(), Error> {
        if let Some(title) = &self.title {
            require_non_empty("title", title)?;
        }
        if let Some(category) = &self.category {
            require_non_empty("category", category)?;
        }
        if let Some(amount) = &self.amount {
            if *amount < Decimal::ZERO {
                return Err(Error::Validation(
                    "amount must not be negative".to_string(),
                ));
            }
        }

        Ok(())
    }
}

pub fn parse_expense_status(value: &str) -> Result<ExpenseStatus, Error> {
    ExpenseStatus::try_from_value(&value.to_string())
        .map_err(|_| Error::Validation(format!("Unknown status {value:?}")))
}

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDto {
    pub id: i32,
    pub expense_id: i32,
    pub user_id: i32,
    pub amount: Decimal,
    pub status: String,
    pub checkout_session_id: Option<String>,
    pub payment_intent_id: Option<String>,
    pub payment_date: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

impl From<entity::payment::Model> for PaymentDto {
    fn from(payment: entity::payment::Model) -> Self {
        Self {
            id: payment.id,
            expense_id: payment.expense_id,
            user_id: payment.user_id,
            amount: payment.amount,
            status: payment.status.to_value(),
            checkout_session_id: payment.checkout_session_id,
            payment_intent_id: payment.payment_intent_id,
            payment_date: payment.payment_date,
            created_at: payment.created_at,
        }
    }
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub expense_id: i32,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct CheckoutSessionDto {
    /// Hosted checkout URL the client is redirected to.
    pub url: String,
}

/// Outcome reported by the processor's asynchronous callback.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProcessorOutcome {
    Completed,
    Failed,
}

/// Simplified processor callback body; signature verification is handled at
/// the edge and is out of scope here.
#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProcessorEventDto {
    pub session_id: Option<String>,
    pub payment_intent_id: Option<String>,
    pub outcome: ProcessorOutcome,
}

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDto {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub is_read: bool,
    pub created_at: NaiveDateTime,
}

impl From<entity::notification::Model> for NotificationDto {
    fn from(notification: entity::notification::Model) -> Self {
        Self {
            id: notification.id,
            user_id: notification.user_id,
            title: notification.title,
            message: notification.message,
            kind: notification.kind.to_value(),
            is_read: notification.is_read,
            created_at: notification.created_at,
        }
    }
}
