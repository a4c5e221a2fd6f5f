use chrono::NaiveDateTime;
use sea_orm::ActiveEnum;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::Error;

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i32,
    pub external_id: Option<String>,
    pub email: Option<String>,
    pub full_name: String,
    pub role: String,
    pub phone: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<entity::user::Model> for UserDto {
    fn from(user: entity::user::Model) -> Self {
        Self {
            id: user.id,
            external_id: user.external_id,
            email: user.email,
            full_name: user.full_name,
            role: user.role.to_value(),
            phone: user.phone,
            created_at: user.created_at,
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct CheckPhoneRequest {
    pub phone: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct CheckPhoneResponse {
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl CheckPhoneResponse {
    pub fn found(user: &entity::user::Model) -> Self {
        Self {
            exists: true,
            role: Some(user.role.to_value()),
        }
    }

    pub fn not_found() -> Self {
        Self {
            exists: false,
            role: None,
        }
    }
}

/// Payload posted by a client after its first successful login with the
/// identity provider, linking the provider identity to a pre-registered row.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyncUserRequest {
    /// Provider-issued subject ID.
    pub id: String,
    pub email: Option<String>,
    pub full_name: String,
    pub phone: Option<String>,
}

impl SyncUserRequest {
    pub fn validate(&self) -> Result<(), Error> {
        if self.id.trim().is_empty() {
            return Err(Error::Validation("id is required".to_string()));
        }
        if self.full_name.trim().is_empty() {
            return Err(Error::Validation("fullName is required".to_string()));
        }

        Ok(())
    }
}
