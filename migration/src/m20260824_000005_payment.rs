use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20260824_000001_user::Users, m20260824_000004_expense::Expenses};

static IDX_PAYMENT_EXPENSE_ID: &str = "idx-payments-expense_id";
static IDX_PAYMENT_USER_ID: &str = "idx-payments-user_id";
static FK_PAYMENT_EXPENSE_ID: &str = "fk-payments-expense_id";
static FK_PAYMENT_USER_ID: &str = "fk-payments-user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(pk_auto(Payments::Id))
                    .col(integer(Payments::ExpenseId))
                    .col(integer(Payments::UserId))
                    .col(decimal_len(Payments::Amount, 10, 2))
                    .col(
                        ColumnDef::new(Payments::CheckoutSessionId)
                            .string()
                            .null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Payments::PaymentIntentId)
                            .string()
                            .null()
                            .unique_key(),
                    )
                    .col(string_len(Payments::Status, 32))
                    .col(timestamp_null(Payments::PaymentDate))
                    .col(timestamp(Payments::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_PAYMENT_EXPENSE_ID)
                    .table(Payments::Table)
                    .col(Payments::ExpenseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_PAYMENT_USER_ID)
                    .table(Payments::Table)
                    .col(Payments::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_PAYMENT_EXPENSE_ID)
                    .from_tbl(Payments::Table)
                    .from_col(Payments::ExpenseId)
                    .to_tbl(Expenses::Table)
                    .to_col(Expenses::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_PAYMENT_USER_ID)
                    .from_tbl(Payments::Table)
                    .from_col(Payments::UserId)
                    .to_tbl(Users::Table)
                    .to_col(Users::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_PAYMENT_USER_ID)
                    .table(Payments::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_PAYMENT_EXPENSE_ID)
                    .table(Payments::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_PAYMENT_USER_ID)
                    .table(Payments::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_PAYMENT_EXPENSE_ID)
                    .table(Payments::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Payments::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Payments {
    Table,
    Id,
    ExpenseId,
    UserId,
    Amount,
    CheckoutSessionId,
    PaymentIntentId,
    Status,
    PaymentDate,
    CreatedAt,
}
