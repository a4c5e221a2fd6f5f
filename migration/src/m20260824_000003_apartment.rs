use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20260824_000001_user::Users, m20260824_000002_building::Buildings};

static IDX_APARTMENT_BUILDING_ID: &str = "idx-apartments-building_id";
static FK_APARTMENT_BUILDING_ID: &str = "fk-apartments-building_id";
static FK_APARTMENT_RESIDENT_ID: &str = "fk-apartments-resident_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Apartments::Table)
                    .if_not_exists()
                    .col(pk_auto(Apartments::Id))
                    .col(string(Apartments::Identifier))
                    .col(string_null(Apartments::Floor))
                    .col(integer_null(Apartments::BuildingId))
                    .col(integer_null(Apartments::ResidentId))
                    .col(string(Apartments::OwnerName))
                    .col(string_null(Apartments::OwnerPhone))
                    .col(string_null(Apartments::TenantName))
                    .col(string_null(Apartments::TenantPhone))
                    .col(string_len(Apartments::Usage, 32))
                    .col(string_len(Apartments::Status, 32))
                    .col(json_binary(Apartments::Shares))
                    .col(timestamp(Apartments::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_APARTMENT_BUILDING_ID)
                    .table(Apartments::Table)
                    .col(Apartments::BuildingId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_APARTMENT_BUILDING_ID)
                    .from_tbl(Apartments::Table)
                    .from_col(Apartments::BuildingId)
                    .to_tbl(Buildings::Table)
                    .to_col(Buildings::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_APARTMENT_RESIDENT_ID)
                    .from_tbl(Apartments::Table)
                    .from_col(Apartments::ResidentId)
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
                    .name(FK_APARTMENT_RESIDENT_ID)
                    .table(Apartments::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_APARTMENT_BUILDING_ID)
                    .table(Apartments::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_APARTMENT_BUILDING_ID)
                    .table(Apartments::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Apartments::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Apartments {
    Table,
    Id,
    Identifier,
    Floor,
    BuildingId,
    ResidentId,
    OwnerName,
    OwnerPhone,
    TenantName,
    TenantPhone,
    Usage,
    Status,
    Shares,
    CreatedAt,
}
