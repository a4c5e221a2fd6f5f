use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, DeleteResult,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
};

pub struct BuildingRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BuildingRepository<'a> {
    /// Creates a new instance of [`BuildingRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_all(&self) -> Result<Vec<entity::building::Model>, DbErr> {
        entity::prelude::Building::find().all(self.db).await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<entity::building::Model>, DbErr> {
        entity::prelude::Building::find_by_id(id).one(self.db).await
    }

    pub async fn create(
        &self,
        name: String,
        address: String,
        manager_id: i32,
    ) -> Result<entity::building::Model, DbErr> {
        let building = entity::building::ActiveModel {
            name: ActiveValue::Set(name),
            address: ActiveValue::Set(address),
            manager_id: ActiveValue::Set(manager_id),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        building.insert(self.db).await
    }

    pub async fn update(
        &self,
        id: i32,
        name: Option<String>,
        address: Option<String>,
    ) -> Result<Option<entity::building::Model>, DbErr> {
        let building = match entity::prelude::Building::find_by_id(id).one(self.db).await? {
            Some(building) => building,
            None => return Ok(None),
        };

        let mut building_am = building.into_active_model();
        if let Some(name) = name {
            building_am.name = ActiveValue::Set(name);
        }
        if let Some(address) = address {
            building_am.address = ActiveValue::Set(address);
        }

        let building = building_am.update(self.db).await?;

        Ok(Some(building))
    }

    /// Deletes a building
    ///
    /// Returns OK regardless of the building existing, to confirm the
    /// deletion result check the [`DeleteResult::rows_affected`] field.
    pub async fn delete(&self, id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Building::delete_by_id(id)
            .exec(self.db)
            .await
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Building::find().count(self.db).await
    }

    pub async fn count_by_manager_id(&self, manager_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Building::find()
            .filter(entity::building::Column::ManagerId.eq(manager_id))
            .count(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::DbErr;

    use crate::data::{building::BuildingRepository, test::setup_db, user::UserRepository};

    /// Expect success creating and updating a building owned by a manager
    #[tokio::test]
    async fn test_create_and_update_building() -> Result<(), DbErr> {
        let db = setup_db().await?;
        let user_repository = UserRepository::new(&db);
        let building_repository = BuildingRepository::new(&db);

        let manager = user_repository
            .create_manager("Maria Manager".to_string(), None, None)
            .await?;
        let building = building_repository
            .create("Sunset Court".to_string(), "12 Hill Rd".to_string(), manager.id)
            .await?;

        let updated = building_repository
            .update(building.id, Some("Sunset Towers".to_string()), None)
            .await?
            .unwrap();

        assert_eq!(updated.name, "Sunset Towers");
        assert_eq!(updated.address, "12 Hill Rd");
        assert_eq!(
            building_repository.count_by_manager_id(manager.id).await?,
            1
        );

        Ok(())
    }

    /// Expect None when updating a building that does not exist
    #[tokio::test]
    async fn test_update_missing_building() -> Result<(), DbErr> {
        let db = setup_db().await?;
        let building_repository = BuildingRepository::new(&db);

        let result = building_repository
            .update(42, Some("Nowhere".to_string()), None)
            .await?;

        assert!(result.is_none());

        Ok(())
    }
}
