use chrono::Utc;
use entity::apartment::{ApartmentUsage, OccupancyStatus};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, DeleteResult,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
};
use serde_json::Value;

/// Column values for a new apartment row, already parsed and validated.
pub struct NewApartment {
    pub identifier: String,
    pub floor: Option<String>,
    pub building_id: Option<i32>,
    pub owner_name: String,
    pub owner_phone: Option<String>,
    pub tenant_name: Option<String>,
    pub tenant_phone: Option<String>,
    pub usage: ApartmentUsage,
    pub status: OccupancyStatus,
    pub shares: Value,
}

/// Partial update; `None` leaves the column unchanged.
#[derive(Default)]
pub struct ApartmentPatch {
    pub identifier: Option<String>,
    pub floor: Option<String>,
    pub building_id: Option<i32>,
    pub owner_name: Option<String>,
    pub owner_phone: Option<String>,
    pub tenant_name: Option<String>,
    pub tenant_phone: Option<String>,
    pub usage: Option<ApartmentUsage>,
    pub status: Option<OccupancyStatus>,
    pub shares: Option<Value>,
}

pub struct ApartmentRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ApartmentRepository<'a> {
    /// Creates a new instance of [`ApartmentRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_many(
        &self,
        building_id: Option<i32>,
    ) -> Result<Vec<entity::apartment::Model>, DbErr> {
        let mut query = entity::prelude::Apartment::find();
        if let Some(building_id) = building_id {
            query = query.filter(entity::apartment::Column::BuildingId.eq(building_id));
        }

        query.all(self.db).await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<entity::apartment::Model>, DbErr> {
        entity::prelude::Apartment::find_by_id(id)
            .one(self.db)
            .await
    }

    pub async fn create(
        &self,
        apartment: NewApartment,
    ) -> Result<entity::apartment::Model, DbErr> {
        let apartment = entity::apartment::ActiveModel {
            identifier: ActiveValue::Set(apartment.identifier),
            floor: ActiveValue::Set(apartment.floor),
            building_id: ActiveValue::Set(apartment.building_id),
            owner_name: ActiveValue::Set(apartment.owner_name),
            owner_phone: ActiveValue::Set(apartment.owner_phone),
            tenant_name: ActiveValue::Set(apartment.tenant_name),
            tenant_phone: ActiveValue::Set(apartment.tenant_phone),
            usage: ActiveValue::Set(apartment.usage),
            status: ActiveValue::Set(apartment.status),
            shares: ActiveValue::Set(apartment.shares),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        apartment.insert(self.db).await
    }

    pub async fn update(
        &self,
        id: i32,
        patch: ApartmentPatch,
    ) -> Result<Option<entity::apartment::Model>, DbErr> {
        let apartment = match entity::prelude::Apartment::find_by_id(id)
            .one(self.db)
            .await?
        {
            Some(apartment) => apartment,
            None => return Ok(None),
        };

        let mut apartment_am = apartment.into_active_model();
        if let Some(identifier) = patch.identifier {
            apartment_am.identifier = ActiveValue::Set(identifier);
        }
        if let Some(floor) = patch.floor {
            apartment_am.floor = ActiveValue::Set(Some(floor));
        }
        if let Some(building_id) = patch.building_id {
            apartment_am.building_id = ActiveValue::Set(Some(building_id));
        }
        if let Some(owner_name) = patch.owner_name {
            apartment_am.owner_name = ActiveValue::Set(owner_name);
        }
        if let Some(owner_phone) = patch.owner_phone {
            apartment_am.owner_phone = ActiveValue::Set(Some(owner_phone));
        }
        if let Some(tenant_name) = patch.tenant_name {
            apartment_am.tenant_name = ActiveValue::Set(Some(tenant_name));
        }
        if let Some(tenant_phone) = patch.tenant_phone {
            apartment_am.tenant_phone = ActiveValue::Set(Some(tenant_phone));
        }
        if let Some(usage) = patch.usage {
            apartment_am.usage = ActiveValue::Set(usage);
        }
        if let Some(status) = patch.status {
            apartment_am.status = ActiveValue::Set(status);
        }
        if let Some(shares) = patch.shares {
            apartment_am.shares = ActiveValue::Set(shares);
        }

        let apartment = apartment_am.update(self.db).await?;

        Ok(Some(apartment))
    }

    /// Points the unit's billing target at the given user, or clears it.
    pub async fn set_resident_id(
        &self,
        id: i32,
        resident_id: Option<i32>,
    ) -> Result<Option<entity::apartment::Model>, DbErr> {
        let apartment = match entity::prelude::Apartment::find_by_id(id)
            .one(self.db)
            .await?
        {
            Some(apartment) => apartment,
            None => return Ok(None),
        };

        let mut apartment_am = apartment.into_active_model();
        apartment_am.resident_id = ActiveValue::Set(resident_id);

        let apartment = apartment_am.update(self.db).await?;

        Ok(Some(apartment))
    }

    /// Deletes an apartment
    ///
    /// Returns OK regardless of the apartment existing, to confirm the
    /// deletion result check the [`DeleteResult::rows_affected`] field.
    pub async fn delete(&self, id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Apartment::delete_by_id(id)
            .exec(self.db)
            .await
    }

    pub async fn count_by_building_id(&self, building_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Apartment::find()
            .filter(entity::apartment::Column::BuildingId.eq(building_id))
            .count(self.db)
            .await
    }
}
