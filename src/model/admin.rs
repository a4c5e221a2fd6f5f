use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::Error, model::property::require_non_empty};

/// Claims carried by the signed super-admin token.
#[derive(Serialize, Deserialize)]
pub struct AdminClaims {
    /// Admin row ID; the row is re-resolved on every request so deleting it
    /// revokes outstanding tokens.
    pub sub: i32,
    pub email: String,
    pub exp: usize,
}

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminDto {
    pub id: i32,
    pub email: String,
    pub full_name: String,
}

impl From<entity::super_admin::Model> for AdminDto {
    fn from(admin: entity::super_admin::Model) -> Self {
        Self {
            id: admin.id,
            email: admin.email,
            full_name: admin.full_name,
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct AdminLoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct AdminLoginResponse {
    pub token: String,
    pub admin: AdminDto,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminSetupRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub setup_key: String,
}

impl AdminSetupRequest {
    pub fn validate(&self) -> Result<(), Error> {
        require_non_empty("email", &self.email)?;
        require_non_empty("password", &self.password)?;
        require_non_empty("fullName", &self.full_name)?;

        Ok(())
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminSetupResponse {
    pub success: bool,
    pub admin_id: i32,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

impl ChangePasswordRequest {
    pub fn validate(&self) -> Result<(), Error> {
        require_non_empty("newPassword", &self.new_password)
    }
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateManagerRequest {
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl CreateManagerRequest {
    pub fn validate(&self) -> Result<(), Error> {
        require_non_empty("fullName", &self.full_name)
    }
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateManagerRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl UpdateManagerRequest {
    pub fn validate(&self) -> Result<(), Error> {
        if let Some(full_name) = &self.full_name {
            require_non_empty("fullName", full_name)?;
        }

        Ok(())
    }
}

/// Subscription joined with the owning user's name for the console view.
#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionDto {
    pub id: i32,
    pub user_id: i32,
    pub status: String,
    pub processor_price_id: Option<String>,
    pub current_period_end: Option<NaiveDateTime>,
    pub user_full_name: Option<String>,
}

impl SubscriptionDto {
    pub fn from_joined(
        subscription: entity::subscription::Model,
        user: Option<entity::user::Model>,
    ) -> Self {
        Self {
            id: subscription.id,
            user_id: subscription.user_id,
            status: subscription.status,
            processor_price_id: subscription.processor_price_id,
            current_period_end: subscription.current_period_end,
            user_full_name: user.map(|user| user.full_name),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsDto {
    pub total_managers: u64,
    pub total_residents: u64,
    pub total_buildings: u64,
    pub total_subscriptions: u64,
    pub active_subscriptions: u64,
}
