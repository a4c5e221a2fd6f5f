use chrono::{NaiveDateTime, Utc};
use entity::expense::ExpenseStatus;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, DeleteResult,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
};

/// Column values for a new expense row, already validated.
pub struct NewExpense {
    pub title: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub category: String,
    pub supplier: Option<String>,
    pub due_date: NaiveDateTime,
    pub apartment_id: Option<i32>,
    pub building_id: Option<i32>,
}

/// Partial update of descriptive fields; status is excluded on purpose, it
/// only changes through payment settlement.
#[derive(Default)]
pub struct ExpensePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub category: Option<String>,
    pub supplier: Option<String>,
    pub due_date: Option<NaiveDateTime>,
}

/// Optional equality predicates, ANDed when present.
#[derive(Default)]
pub struct ExpenseFilters {
    pub building_id: Option<i32>,
    pub apartment_id: Option<i32>,
    pub status: Option<ExpenseStatus>,
}

pub struct ExpenseRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ExpenseRepository<'a> {
    /// Creates a new instance of [`ExpenseRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_many(
        &self,
        filters: ExpenseFilters,
    ) -> Result<Vec<entity::expense::Model>, DbErr> {
        let mut query = entity::prelude::Expense::find();
        if let Some(building_id) = filters.building_id {
            query = query.filter(entity::expense::Column::BuildingId.eq(building_id));
        }
        if let Some(apartment_id) = filters.apartment_id {
            query = query.filter(entity::expense::Column::ApartmentId.eq(apartment_id));
        }
        if let Some(status) = filters.status {
            query = query.filter(entity::expense::Column::Status.eq(status));
        }

        query.all(self.db).await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<entity::expense::Model>, DbErr> {
        entity::prelude::Expense::find_by_id(id).one(self.db).await
    }

    pub async fn create(&self, expense: NewExpense) -> Result<entity::expense::Model, DbErr> {
        let expense = entity::expense::ActiveModel {
            title: ActiveValue::Set(expense.title),
            description: ActiveValue::Set(expense.description),
            amount: ActiveValue::Set(expense.amount),
            category: ActiveValue::Set(expense.category),
            supplier: ActiveValue::Set(expense.supplier),
            due_date: ActiveValue::Set(expense.due_date),
            status: ActiveValue::Set(ExpenseStatus::Pending),
            apartment_id: ActiveValue::Set(expense.apartment_id),
            building_id: ActiveValue::Set(expense.building_id),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        expense.insert(self.db).await
    }

    pub async fn update(
        &self,
        id: i32,
        patch: ExpensePatch,
    ) -> Result<Option<entity::expense::Model>, DbErr> {
        let expense = match entity::prelude::Expense::find_by_id(id).one(self.db).await? {
            Some(expense) => expense,
            None => return Ok(None),
        };

        let mut expense_am = expense.into_active_model();
        if let Some(title) = patch.title {
            expense_am.title = ActiveValue::Set(title);
        }
        if let Some(description) = patch.description {
            expense_am.description = ActiveValue::Set(Some(description));
        }
        if let Some(amount) = patch.amount {
            expense_am.amount = ActiveValue::Set(amount);
        }
        if let Some(category) = patch.category {
            expense_am.category = ActiveValue::Set(category);
        }
        if let Some(supplier) = patch.supplier {
            expense_am.supplier = ActiveValue::Set(Some(supplier));
        }
        if let Some(due_date) = patch.due_date {
            expense_am.due_date = ActiveValue::Set(due_date);
        }

        let expense = expense_am.update(self.db).await?;

        Ok(Some(expense))
    }

    pub async fn mark_paid(&self, id: i32) -> Result<Option<entity::expense::Model>, DbErr> {
        let expense = match entity::prelude::Expense::find_by_id(id).one(self.db).await? {
            Some(expense) => expense,
            None => return Ok(None),
        };

        let mut expense_am = expense.into_active_model();
        expense_am.status = ActiveValue::Set(ExpenseStatus::Paid);

        let expense = expense_am.update(self.db).await?;

        Ok(Some(expense))
    }

    /// Deletes an expense
    ///
    /// Returns OK regardless of the expense existing, to confirm the deletion
    /// result check the [`DeleteResult::rows_affected`] field.
    pub async fn delete(&self, id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Expense::delete_by_id(id)
            .exec(self.db)
            .await
    }

    pub async fn count_by_apartment_id(&self, apartment_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Expense::find()
            .filter(entity::expense::Column::ApartmentId.eq(apartment_id))
            .count(self.db)
            .await
    }

    pub async fn count_by_building_id(&self, building_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Expense::find()
            .filter(entity::expense::Column::BuildingId.eq(building_id))
            .count(self.db)
            .await
    }
}
