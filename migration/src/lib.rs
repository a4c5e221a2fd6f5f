pub use sea_orm_migration::prelude::*;

mod m20260824_000001_user;
mod m20260824_000002_building;
mod m20260824_000003_apartment;
mod m20260824_000004_expense;
mod m20260824_000005_payment;
mod m20260824_000006_notification;
mod m20260824_000007_subscription;
mod m20260824_000008_super_admin;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260824_000001_user::Migration),
            Box::new(m20260824_000002_building::Migration),
            Box::new(m20260824_000003_apartment::Migration),
            Box::new(m20260824_000004_expense::Migration),
            Box::new(m20260824_000005_payment::Migration),
            Box::new(m20260824_000006_notification::Migration),
            Box::new(m20260824_000007_subscription::Migration),
            Box::new(m20260824_000008_super_admin::Migration),
        ]
    }
}
