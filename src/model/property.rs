use chrono::NaiveDateTime;
use entity::apartment::{ApartmentUsage, OccupancyStatus};
use sea_orm::ActiveEnum;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};

use crate::error::Error;

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BuildingDto {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub manager_id: i32,
    pub created_at: NaiveDateTime,
}

impl From<entity::building::Model> for BuildingDto {
    fn from(building: entity::building::Model) -> Self {
        Self {
            id: building.id,
            name: building.name,
            address: building.address,
            manager_id: building.manager_id,
            created_at: building.created_at,
        }
    }
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBuildingRequest {
    pub name: String,
    pub address: String,
}

impl CreateBuildingRequest {
    pub fn validate(&self) -> Result<(), Error> {
        require_non_empty("name", &self.name)?;
        require_non_empty("address", &self.address)?;

        Ok(())
    }
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBuildingRequest {
    pub name: Option<String>,
    pub address: Option<String>,
}

impl UpdateBuildingRequest {
    pub fn validate(&self) -> Result<(), Error> {
        if let Some(name) = &self.name {
            require_non_empty("name", name)?;
        }
        if let Some(address) = &self.address {
            require_non_empty("address", address)?;
        }

        Ok(())
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApartmentDto {
    pub id: i32,
    pub identifier: String,
    pub floor: Option<String>,
    pub building_id: Option<i32>,
    pub resident_id: Option<i32>,
    pub owner_name: String,
    pub owner_phone: Option<String>,
    pub tenant_name: Option<String>,
    pub tenant_phone: Option<String>,
    pub usage: String,
    pub status: String,
    #[schema(value_type = Object)]
    pub shares: Value,
    pub created_at: NaiveDateTime,
}

impl From<entity::apartment::Model> for ApartmentDto {
    fn from(apartment: entity::apartment::Model) -> Self {
        Self {
            id: apartment.id,
            identifier: apartment.identifier,
            floor: apartment.floor,
            building_id: apartment.building_id,
            resident_id: apartment.resident_id,
            owner_name: apartment.owner_name,
            owner_phone: apartment.owner_phone,
            tenant_name: apartment.tenant_name,
            tenant_phone: apartment.tenant_phone,
            usage: apartment.usage.to_value(),
            status: apartment.status.to_value(),
            shares: apartment.shares,
            created_at: apartment.created_at,
        }
    }
}

#[derive(Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ApartmentListQuery {
    pub building_id: Option<i32>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateApartmentRequest {
    pub identifier: String,
    pub floor: Option<String>,
    pub building_id: Option<i32>,
    pub owner_name: String,
    pub owner_phone: Option<String>,
    pub tenant_name: Option<String>,
    pub tenant_phone: Option<String>,
    pub usage: Option<String>,
    pub status: Option<String>,
    #[schema(value_type = Object)]
    pub shares: Option<Map<String, Value>>,
}

impl CreateApartmentRequest {
    pub fn validate(&self) -> Result<(), Error> {
        require_non_empty("identifier", &self.identifier)?;
        require_non_empty("ownerName", &self.owner_name)?;
        if let Some(usage) = &self.usage {
            parse_usage(usage)?;
        }
        if let Some(status) = &self.status {
            parse_occupancy(status)?;
        }
        if let Some(shares) = &self.shares {
            validate_shares(shares)?;
        }

        Ok(())
    }
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApartmentRequest {
    pub identifier: Option<String>,
    pub floor: Option<String>,
    pub building_id: Option<i32>,
    pub owner_name: Option<String>,
    pub owner_phone: Option<String>,
    pub tenant_name: Option<String>,
    pub tenant_phone: Option<String>,
    pub usage: Option<String>,
    pub status: Option<String>,
    #[schema(value_type = Object)]
    pub shares: Option<Map<String, Value>>,
}

impl UpdateApartmentRequest {
    pub fn validate(&self) -> Result<(), Error> {
        if let Some(identifier) = &self.identifier {
            require_non_empty("identifier", identifier)?;
        }
        if let Some(owner_name) = &self.owner_name {
            require_non_empty("ownerName", owner_name)?;
        }
        if let Some(usage) = &self.usage {
            parse_usage(usage)?;
        }
        if let Some(status) = &self.status {
            parse_occupancy(status)?;
        }
        if let Some(shares) = &self.shares {
            validate_shares(shares)?;
        }

        Ok(())
    }
}

pub fn parse_usage(value: &str) -> Result<ApartmentUsage, Error> {
    ApartmentUsage::try_from_value(&value.to_string())
        .map_err(|_| Error::Validation(format!("Unknown usage {value:?}")))
}

pub fn parse_occupancy(value: &str) -> Result<OccupancyStatus, Error> {
    OccupancyStatus::try_from_value(&value.to_string())
        .map_err(|_| Error::Validation(format!("Unknown status {value:?}")))
}

/// Category names are manager-defined free text; only the weights are
/// constrained, to non-negative numbers.
pub fn validate_shares(shares: &Map<String, Value>) -> Result<(), Error> {
    for (category, weight) in shares {
        let valid = weight.as_f64().map(|value| value >= 0.0).unwrap_or(false);
        if !valid {
            return Err(Error::Validation(format!(
                "Share for {category:?} must be a non-negative number"
            )));
        }
    }

    Ok(())
}

pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        return Err(Error::Validation(format!("{field} is required")));
    }

    Ok(())
}
