use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260824_000001_user::Users;

static IDX_SUBSCRIPTION_USER_ID: &str = "idx-subscriptions-user_id";
static FK_SUBSCRIPTION_USER_ID: &str = "fk-subscriptions-user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Subscriptions::Table)
                    .if_not_exists()
                    .col(pk_auto(Subscriptions::Id))
                    .col(integer(Subscriptions::UserId))
                    .col(string_null(Subscriptions::ProcessorCustomerId))
                    .col(string_null(Subscriptions::ProcessorSubscriptionId))
                    .col(string_null(Subscriptions::ProcessorPriceId))
                    .col(string_len(Subscriptions::Status, 32))
                    .col(timestamp_null(Subscriptions::CurrentPeriodStart))
                    .col(timestamp_null(Subscriptions::CurrentPeriodEnd))
                    .col(timestamp(Subscriptions::CreatedAt))
                    .col(timestamp(Subscriptions::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_SUBSCRIPTION_USER_ID)
                    .table(Subscriptions::Table)
                    .col(Subscriptions::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_SUBSCRIPTION_USER_ID)
                    .from_tbl(Subscriptions::Table)
                    .from_col(Subscriptions::UserId)
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
                    .name(FK_SUBSCRIPTION_USER_ID)
                    .table(Subscriptions::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_SUBSCRIPTION_USER_ID)
                    .table(Subscriptions::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Subscriptions::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Subscriptions {
    Table,
    Id,
    UserId,
    ProcessorCustomerId,
    ProcessorSubscriptionId,
    ProcessorPriceId,
    Status,
    CurrentPeriodStart,
    CurrentPeriodEnd,
    CreatedAt,
    UpdatedAt,
}
