use entity::{expense::ExpenseStatus, notification::NotificationType};
use rust_decimal::{prelude::ToPrimitive, Decimal, RoundingStrategy};
use sea_orm::DatabaseConnection;

use crate::{
    data::{
        expense::ExpenseRepository, notification::NotificationRepository,
        payment::PaymentRepository,
    },
    error::Error,
    model::expense::{CheckoutSessionDto, ProcessorEventDto, ProcessorOutcome},
    provider::checkout::{CheckoutClient, CheckoutSessionParams},
};

/// Currency all expenses are charged in.
const CURRENCY: &str = "usd";

/// Payment lifecycle: checkout initiation and processor-callback
/// reconciliation.
pub struct LedgerService<'a> {
    db: &'a DatabaseConnection,
    checkout: Option<&'a CheckoutClient>,
    public_url: &'a str,
}

impl<'a> LedgerService<'a> {
    /// Creates a new instance of [`LedgerService`]
    pub fn new(
        db: &'a DatabaseConnection,
        checkout: Option<&'a CheckoutClient>,
        public_url: &'a str,
    ) -> Self {
        Self {
            db,
            checkout,
            public_url,
        }
    }

    /// Opens a hosted checkout session for an unsettled expense and records
    /// the attempt as a pending payment.
    pub async fn initiate(
        &self,
        user: &entity::user::Model,
        expense_id: i32,
    ) -> Result<CheckoutSessionDto, Error> {
        let checkout = self.checkout.ok_or(Error::ProcessorUnavailable)?;
        let expense_repository = ExpenseRepository::new(self.db);
        let payment_repository = PaymentRepository::new(self.db);

        let expense = expense_repository
            .get_by_id(expense_id)
            .await?
            .ok_or(Error::NotFound("Expense"))?;
        if expense.status == ExpenseStatus::Paid {
            return Err(Error::AlreadySettled);
        }

        let amount_minor = to_minor_units(expense.amount)?;
        let description = match &expense.description {
            Some(description) => format!("{} ({})", description, expense.category),
            None => format!("{} expense", expense.category),
        };

        let session = checkout
            .create_session(CheckoutSessionParams {
                amount_minor,
                currency: CURRENCY,
                product_name: &expense.title,
                product_description: &description,
                expense_id: expense.id,
                user_id: user.id,
                success_url: format!(
                    "{}/payment-success?session_id={{CHECKOUT_SESSION_ID}}",
                    self.public_url
                ),
                cancel_url: format!("{}/payment-cancelled", self.public_url),
            })
            .await?;

        payment_repository
            .create_pending(
                expense.id,
                user.id,
                expense.amount,
                Some(session.id),
                session.payment_intent,
            )
            .await?;

        Ok(CheckoutSessionDto { url: session.url })
    }

    /// Applies a processor callback to the ledger.
    ///
    /// Replays are absorbed: the pending-to-terminal transition happens at
    /// most once, and the settlement side effects (expense marked paid, the
    /// payer notified) fire only on the call that performs it.
    pub async fn reconcile(&self, event: ProcessorEventDto) -> Result<(), Error> {
        let payment_repository = PaymentRepository::new(self.db);

        let payment = match (&event.session_id, &event.payment_intent_id) {
            (Some(session_id), _) => {
                payment_repository
                    .get_by_checkout_session_id(session_id)
                    .await?
            }
            (None, Some(payment_intent_id)) => {
                payment_repository
                    .get_by_payment_intent_id(payment_intent_id)
                    .await?
            }
            (None, None) => {
                return Err(Error::Validation(
                    "session_id or payment_intent_id is required".to_string(),
                ))
            }
        };
        let payment = payment.ok_or(Error::NotFound("Payment"))?;

        match event.outcome {
            ProcessorOutcome::Completed => {
                let transitioned = payment_repository
                    .complete_if_pending(payment.id, event.payment_intent_id)
                    .await?;
                if transitioned {
                    self.settle(&payment).await?;
                }
            }
            ProcessorOutcome::Failed => {
                payment_repository.fail_if_pending(payment.id).await?;
            }
        }

        Ok(())
    }

    /// Settlement side effects, run once per payment.
    async fn settle(&self, payment: &entity::payment::Model) -> Result<(), Error> {
        let expense_repository = ExpenseRepository::new(self.db);
        let notification_repository = NotificationRepository::new(self.db);

        let expense = expense_repository.mark_paid(payment.expense_id).await?;

        let title = expense
            .map(|expense| expense.title)
            .unwrap_or_else(|| "expense".to_string());
        notification_repository
            .create(
                payment.user_id,
                "Payment received".to_string(),
                format!("Your payment of {} for {} was received", payment.amount, title),
                NotificationType::Info,
            )
            .await?;

        Ok(())
    }

    /// Lists a user's own payment history.
    pub async fn payments_for(
        &self,
        user_id: i32,
    ) -> Result<Vec<entity::payment::Model>, Error> {
        let payment_repository = PaymentRepository::new(self.db);

        let payments = payment_repository.get_many_by_user_id(user_id).await?;

        Ok(payments)
    }
}

/// Converts a major-unit decimal amount to integer minor units, rounding
/// midpoints away from zero so 10.005 charges 1001 cents.
pub fn to_minor_units(amount: Decimal) -> Result<i64, Error> {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|minor| minor.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|minor| minor.to_i64())
        .ok_or_else(|| Error::Validation("amount out of range".to_string()))
}
