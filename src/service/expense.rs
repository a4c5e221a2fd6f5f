use entity::notification::NotificationType;
use sea_orm::DatabaseConnection;

use crate::{
    data::{
        apartment::ApartmentRepository,
        expense::{ExpenseFilters, ExpensePatch, ExpenseRepository, NewExpense},
        notification::NotificationRepository,
        payment::PaymentRepository,
    },
    error::Error,
    model::expense::{
        parse_expense_status, CreateExpenseRequest, ExpenseListQuery, UpdateExpenseRequest,
    },
};

/// Expense lifecycle except settlement, which belongs to the payment ledger.
pub struct ExpenseService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ExpenseService<'a> {
    /// Creates a new instance of [`ExpenseService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(
        &self,
        query: &ExpenseListQuery,
    ) -> Result<Vec<entity::expense::Model>, Error> {
        let expense_repository = ExpenseRepository::new(self.db);

        let status = match &query.status {
            Some(status) => Some(parse_expense_status(status)?),
            None => None,
        };

        let expenses = expense_repository
            .get_many(ExpenseFilters {
                building_id: query.building_id,
                apartment_id: query.apartment_id,
                status,
            })
            .await?;

        Ok(expenses)
    }

    /// Creates an expense and, when it targets an occupied apartment, alerts
    /// the unit's billing resident.
    ///
    /// Building-wide expenses produce no notification; there is no single
    /// resident to charge.
    pub async fn create(
        &self,
        request: CreateExpenseRequest,
    ) -> Result<entity::expense::Model, Error> {
        request.validate()?;

        let expense_repository = ExpenseRepository::new(self.db);
        let apartment_repository = ApartmentRepository::new(self.db);
        let notification_repository = NotificationRepository::new(self.db);

        let expense = expense_repository
            .create(NewExpense {
                title: request.title,
                description: request.description,
                amount: request.amount,
                category: request.category,
                supplier: request.supplier,
                due_date: request.due_date,
                apartment_id: request.apartment_id,
                building_id: request.building_id,
            })
            .await?;

        if let Some(apartment_id) = expense.apartment_id {
            let resident_id = apartment_repository
                .get_by_id(apartment_id)
                .await?
                .and_then(|apartment| apartment.resident_id);

            if let Some(resident_id) = resident_id {
                notification_repository
                    .create(
                        resident_id,
                        "New Expense".to_string(),
                        format!(
                            "A new expense of {} has been added to your apartment: {}",
                            expense.amount, expense.title
                        ),
                        NotificationType::Alert,
                    )
                    .await?;
            }
        }

        Ok(expense)
    }

    pub async fn update(
        &self,
        id: i32,
        request: UpdateExpenseRequest,
    ) -> Result<entity::expense::Model, Error> {
        request.validate()?;

        let expense_repository = ExpenseRepository::new(self.db);

        let expense = expense_repository
            .update(
                id,
                ExpensePatch {
                    title: request.title,
                    description: request.description,
                    amount: request.amount,
                    category: request.category,
                    supplier: request.supplier,
                    due_date: request.due_date,
                },
            )
            .await?
            .ok_or(Error::NotFound("Expense"))?;

        Ok(expense)
    }

    /// Deletes an expense unless payments reference it.
    pub async fn delete(&self, id: i32) -> Result<(), Error> {
        let expense_repository = ExpenseRepository::new(self.db);
        let payment_repository = PaymentRepository::new(self.db);

        let payments = payment_repository.count_by_expense_id(id).await?;
        if payments > 0 {
            return Err(Error::Conflict(
                "Cannot delete an expense with recorded payments".to_string(),
            ));
        }

        let result = expense_repository.delete(id).await?;
        if result.rows_affected == 0 {
            return Err(Error::NotFound("Expense"));
        }

        Ok(())
    }
}
