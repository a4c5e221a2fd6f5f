use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SuperAdmins::Table)
                    .if_not_exists()
                    .col(pk_auto(SuperAdmins::Id))
                    .col(string_uniq(SuperAdmins::Email))
                    .col(string(SuperAdmins::PasswordHash))
                    .col(string(SuperAdmins::FullName))
                    .col(timestamp(SuperAdmins::CreatedAt))
                    .col(timestamp(SuperAdmins::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SuperAdmins::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum SuperAdmins {
    Table,
    Id,
    Email,
    PasswordHash,
    FullName,
    CreatedAt,
    UpdatedAt,
}
