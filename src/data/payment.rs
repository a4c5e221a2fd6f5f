use chrono::Utc;
use entity::payment::PaymentStatus;
use rust_decimal::Decimal;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter,
};

pub struct PaymentRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PaymentRepository<'a> {
    /// Creates a new instance of [`PaymentRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<entity::payment::Model>, DbErr> {
        entity::prelude::Payment::find_by_id(id).one(self.db).await
    }

    pub async fn get_by_checkout_session_id(
        &self,
        checkout_session_id: &str,
    ) -> Result<Option<entity::payment::Model>, DbErr> {
        entity::prelude::Payment::find()
            .filter(entity::payment::Column::CheckoutSessionId.eq(checkout_session_id))
            .one(self.db)
            .await
    }

    pub async fn get_by_payment_intent_id(
        &self,
        payment_intent_id: &str,
    ) -> Result<Option<entity::payment::Model>, DbErr> {
        entity::prelude::Payment::find()
            .filter(entity::payment::Column::PaymentIntentId.eq(payment_intent_id))
            .one(self.db)
            .await
    }

    pub async fn get_many_by_user_id(
        &self,
        user_id: i32,
    ) -> Result<Vec<entity::payment::Model>, DbErr> {
        entity::prelude::Payment::find()
            .filter(entity::payment::Column::UserId.eq(user_id))
            .all(self.db)
            .await
    }

    /// Records an initiated checkout as a pending payment.
    pub async fn create_pending(
        &self,
        expense_id: i32,
        user_id: i32,
        amount: Decimal,
        checkout_session_id: Option<String>,
        payment_intent_id: Option<String>,
    ) -> Result<entity::payment::Model, DbErr> {
        let payment = entity::payment::ActiveModel {
            expense_id: ActiveValue::Set(expense_id),
            user_id: ActiveValue::Set(user_id),
            amount: ActiveValue::Set(amount),
            status: ActiveValue::Set(PaymentStatus::Pending),
            checkout_session_id: ActiveValue::Set(checkout_session_id),
            payment_intent_id: ActiveValue::Set(payment_intent_id),
            payment_date: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        payment.insert(self.db).await
    }

    /// Moves a pending payment to completed and stamps the payment date.
    ///
    /// The status predicate makes the transition single-shot: a replayed
    /// processor callback matches zero rows. Returns whether this call
    /// performed the transition.
    pub async fn complete_if_pending(
        &self,
        id: i32,
        payment_intent_id: Option<String>,
    ) -> Result<bool, DbErr> {
        let mut update = entity::prelude::Payment::update_many()
            .col_expr(
                entity::payment::Column::Status,
                Expr::value(PaymentStatus::Completed),
            )
            .col_expr(
                entity::payment::Column::PaymentDate,
                Expr::value(Some(Utc::now().naive_utc())),
            )
            .filter(entity::payment::Column::Id.eq(id))
            .filter(entity::payment::Column::Status.eq(PaymentStatus::Pending));

        if let Some(payment_intent_id) = payment_intent_id {
            update = update.col_expr(
                entity::payment::Column::PaymentIntentId,
                Expr::value(Some(payment_intent_id)),
            );
        }

        let result = update.exec(self.db).await?;

        Ok(result.rows_affected == 1)
    }

    /// Moves a pending payment to failed. Returns whether this call performed
    /// the transition.
    pub async fn fail_if_pending(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Payment::update_many()
            .col_expr(
                entity::payment::Column::Status,
                Expr::value(PaymentStatus::Failed),
            )
            .filter(entity::payment::Column::Id.eq(id))
            .filter(entity::payment::Column::Status.eq(PaymentStatus::Pending))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    pub async fn count_by_expense_id(&self, expense_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Payment::find()
            .filter(entity::payment::Column::ExpenseId.eq(expense_id))
            .count(self.db)
            .await
    }
}
