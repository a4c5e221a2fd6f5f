use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20260824_000002_building::Buildings, m20260824_000003_apartment::Apartments};

static IDX_EXPENSE_BUILDING_ID: &str = "idx-expenses-building_id";
static IDX_EXPENSE_APARTMENT_ID: &str = "idx-expenses-apartment_id";
static FK_EXPENSE_BUILDING_ID: &str = "fk-expenses-building_id";
static FK_EXPENSE_APARTMENT_ID: &str = "fk-expenses-apartment_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(pk_auto(Expenses::Id))
                    .col(string(Expenses::Title))
                    .col(string_null(Expenses::Description))
                    .col(decimal_len(Expenses::Amount, 10, 2))
                    .col(string(Expenses::Category))
                    .col(string_null(Expenses::Supplier))
                    .col(timestamp(Expenses::DueDate))
                    .col(string_len(Expenses::Status, 32))
                    .col(integer_null(Expenses::ApartmentId))
                    .col(integer_null(Expenses::BuildingId))
                    .col(timestamp(Expenses::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_EXPENSE_BUILDING_ID)
                    .table(Expenses::Table)
                    .col(Expenses::BuildingId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_EXPENSE_APARTMENT_ID)
                    .table(Expenses::Table)
                    .col(Expenses::ApartmentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_EXPENSE_BUILDING_ID)
                    .from_tbl(Expenses::Table)
                    .from_col(Expenses::BuildingId)
                    .to_tbl(Buildings::Table)
                    .to_col(Buildings::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_EXPENSE_APARTMENT_ID)
                    .from_tbl(Expenses::Table)
                    .from_col(Expenses::ApartmentId)
                    .to_tbl(Apartments::Table)
                    .to_col(Apartments::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_EXPENSE_APARTMENT_ID)
                    .table(Expenses::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_EXPENSE_BUILDING_ID)
                    .table(Expenses::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_EXPENSE_APARTMENT_ID)
                    .table(Expenses::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_EXPENSE_BUILDING_ID)
                    .table(Expenses::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Expenses {
    Table,
    Id,
    Title,
    Description,
    Amount,
    Category,
    Supplier,
    DueDate,
    Status,
    ApartmentId,
    BuildingId,
    CreatedAt,
}
