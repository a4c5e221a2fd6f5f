use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter,
};

pub struct SuperAdminRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SuperAdminRepository<'a> {
    /// Creates a new instance of [`SuperAdminRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<entity::super_admin::Model>, DbErr> {
        entity::prelude::SuperAdmin::find_by_id(id).one(self.db).await
    }

    pub async fn get_by_email(
        &self,
        email: &str,
    ) -> Result<Option<entity::super_admin::Model>, DbErr> {
        entity::prelude::SuperAdmin::find()
            .filter(entity::super_admin::Column::Email.eq(email))
            .one(self.db)
            .await
    }

    pub async fn create(
        &self,
        email: String,
        password_hash: String,
        full_name: String,
    ) -> Result<entity::super_admin::Model, DbErr> {
        let admin = entity::super_admin::ActiveModel {
            email: ActiveValue::Set(email),
            password_hash: ActiveValue::Set(password_hash),
            full_name: ActiveValue::Set(full_name),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        admin.insert(self.db).await
    }

    pub async fn update_password(
        &self,
        id: i32,
        password_hash: String,
    ) -> Result<Option<entity::super_admin::Model>, DbErr> {
        let admin = match entity::prelude::SuperAdmin::find_by_id(id).one(self.db).await? {
            Some(admin) => admin,
            None => return Ok(None),
        };

        let mut admin_am = admin.into_active_model();
        admin_am.password_hash = ActiveValue::Set(password_hash);
        admin_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        let admin = admin_am.update(self.db).await?;

        Ok(Some(admin))
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::SuperAdmin::find().count(self.db).await
    }
}
