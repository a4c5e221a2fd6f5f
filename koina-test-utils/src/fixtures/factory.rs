//! Factories inserting common fixture rows through the production
//! repositories.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use chrono::Utc;
use entity::apartment::{ApartmentUsage, OccupancyStatus};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use serde_json::json;

use koina::data::{
    apartment::{ApartmentRepository, NewApartment},
    building::BuildingRepository,
    expense::{ExpenseRepository, NewExpense},
    super_admin::SuperAdminRepository,
    user::UserRepository,
};

use crate::error::TestError;

pub async fn create_manager(db: &DatabaseConnection) -> Result<entity::user::Model, TestError> {
    let manager = UserRepository::new(db)
        .create_manager(
            "Maria Manager".to_string(),
            Some("maria@example.com".to_string()),
            Some("+15550100".to_string()),
        )
        .await?;

    Ok(manager)
}

pub async fn create_building(
    db: &DatabaseConnection,
    manager_id: i32,
) -> Result<entity::building::Model, TestError> {
    let building = BuildingRepository::new(db)
        .create(
            "Sunset Court".to_string(),
            "12 Hill Rd".to_string(),
            manager_id,
        )
        .await?;

    Ok(building)
}

/// Apartment with an owner phone and optionally a tenant phone; resident
/// accounts are not provisioned here, call the sync service for that.
pub async fn create_apartment(
    db: &DatabaseConnection,
    building_id: Option<i32>,
    tenant_phone: Option<&str>,
) -> Result<entity::apartment::Model, TestError> {
    let apartment = ApartmentRepository::new(db)
        .create(NewApartment {
            identifier: "2B".to_string(),
            floor: Some("2".to_string()),
            building_id,
            owner_name: "Dana Owner".to_string(),
            owner_phone: Some("+15550001".to_string()),
            tenant_name: tenant_phone.map(|_| "Eli Tenant".to_string()),
            tenant_phone: tenant_phone.map(str::to_string),
            usage: ApartmentUsage::Residential,
            status: OccupancyStatus::Occupied,
            shares: json!({ "elevator": 25, "heating": 30 }),
        })
        .await?;

    Ok(apartment)
}

pub async fn create_expense(
    db: &DatabaseConnection,
    apartment_id: Option<i32>,
    building_id: Option<i32>,
) -> Result<entity::expense::Model, TestError> {
    let expense = ExpenseRepository::new(db)
        .create(NewExpense {
            title: "Elevator repair".to_string(),
            description: Some("Door mechanism replacement".to_string()),
            amount: Decimal::new(4500, 2),
            category: "maintenance".to_string(),
            supplier: Some("Vertical Motion Ltd".to_string()),
            due_date: Utc::now().naive_utc(),
            apartment_id,
            building_id,
        })
        .await?;

    Ok(expense)
}

pub async fn create_super_admin(
    db: &DatabaseConnection,
    email: &str,
    password: &str,
) -> Result<entity::super_admin::Model, TestError> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| TestError::Fixture(format!("failed to hash password: {err}")))?
        .to_string();

    let admin = SuperAdminRepository::new(db)
        .create(email.to_string(), password_hash, "Root Admin".to_string())
        .await?;

    Ok(admin)
}
