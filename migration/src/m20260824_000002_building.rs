use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260824_000001_user::Users;

static IDX_BUILDING_MANAGER_ID: &str = "idx-buildings-manager_id";
static FK_BUILDING_MANAGER_ID: &str = "fk-buildings-manager_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Buildings::Table)
                    .if_not_exists()
                    .col(pk_auto(Buildings::Id))
                    .col(string(Buildings::Name))
                    .col(string(Buildings::Address))
                    .col(integer(Buildings::ManagerId))
                    .col(timestamp(Buildings::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_BUILDING_MANAGER_ID)
                    .table(Buildings::Table)
                    .col(Buildings::ManagerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_BUILDING_MANAGER_ID)
                    .from_tbl(Buildings::Table)
                    .from_col(Buildings::ManagerId)
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
                    .name(FK_BUILDING_MANAGER_ID)
                    .table(Buildings::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_BUILDING_MANAGER_ID)
                    .table(Buildings::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Buildings::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Buildings {
    Table,
    Id,
    Name,
    Address,
    ManagerId,
    CreatedAt,
}
