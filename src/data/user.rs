use chrono::Utc;
use entity::user::UserRole;
use sea_orm::{
    sea_query::{Expr, OnConflict},
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, DeleteResult,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
};

pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    /// Creates a new instance of [`UserRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find_by_id(id).one(self.db).await
    }

    /// Gets a user by the identity provider's subject ID.
    pub async fn get_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::ExternalId.eq(external_id))
            .one(self.db)
            .await
    }

    pub async fn get_by_phone(&self, phone: &str) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Phone.eq(phone))
            .one(self.db)
            .await
    }

    pub async fn get_many_by_roles(
        &self,
        roles: Vec<UserRole>,
    ) -> Result<Vec<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Role.is_in(roles))
            .all(self.db)
            .await
    }

    pub async fn count_by_roles(&self, roles: Vec<UserRole>) -> Result<u64, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Role.is_in(roles))
            .count(self.db)
            .await
    }

    /// Creates a manager account; identity linkage happens later when the
    /// manager first signs in with a matching phone number.
    pub async fn create_manager(
        &self,
        full_name: String,
        email: Option<String>,
        phone: Option<String>,
    ) -> Result<entity::user::Model, DbErr> {
        let user = entity::user::ActiveModel {
            full_name: ActiveValue::Set(full_name),
            email: ActiveValue::Set(email),
            phone: ActiveValue::Set(phone),
            role: ActiveValue::Set(UserRole::Manager),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        user.insert(self.db).await
    }

    pub async fn update(
        &self,
        id: i32,
        full_name: Option<String>,
        email: Option<String>,
        phone: Option<String>,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        let user = match entity::prelude::User::find_by_id(id).one(self.db).await? {
            Some(user) => user,
            None => return Ok(None),
        };

        let mut user_am = user.into_active_model();
        if let Some(full_name) = full_name {
            user_am.full_name = ActiveValue::Set(full_name);
        }
        if let Some(email) = email {
            user_am.email = ActiveValue::Set(Some(email));
        }
        if let Some(phone) = phone {
            user_am.phone = ActiveValue::Set(Some(phone));
        }

        let user = user_am.update(self.db).await?;

        Ok(Some(user))
    }

    /// Deletes a user
    ///
    /// Returns OK regardless of the user existing, to confirm the deletion
    /// result check the [`DeleteResult::rows_affected`] field.
    pub async fn delete(&self, id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::User::delete_by_id(id).exec(self.db).await
    }

    /// Inserts a resident account keyed by phone number, or refreshes the
    /// name and role of the existing row with that phone.
    ///
    /// Re-registering the same phone never produces a second row, so repeated
    /// apartment saves stay idempotent.
    pub async fn upsert_resident(
        &self,
        phone: String,
        full_name: String,
        role: UserRole,
    ) -> Result<entity::user::Model, DbErr> {
        let user = entity::user::ActiveModel {
            full_name: ActiveValue::Set(full_name),
            phone: ActiveValue::Set(Some(phone)),
            role: ActiveValue::Set(role),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        entity::prelude::User::insert(user)
            .on_conflict(
                OnConflict::column(entity::user::Column::Phone)
                    .update_columns([
                        entity::user::Column::FullName,
                        entity::user::Column::Role,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(self.db)
            .await
    }

    /// Links a provisioned account to its identity provider subject on first
    /// sign-in.
    ///
    /// The update only matches a row whose `external_id` is still unset, so a
    /// second subject presenting the same phone number cannot take over an
    /// already-claimed account. Returns the number of rows claimed (0 or 1).
    pub async fn claim_external_id(
        &self,
        phone: &str,
        external_id: &str,
        email: Option<String>,
        full_name: Option<String>,
    ) -> Result<u64, DbErr> {
        let mut update = entity::prelude::User::update_many()
            .col_expr(
                entity::user::Column::ExternalId,
                Expr::value(Some(external_id.to_string())),
            )
            .filter(entity::user::Column::Phone.eq(phone))
            .filter(entity::user::Column::ExternalId.is_null());

        if let Some(email) = email {
            update = update.col_expr(entity::user::Column::Email, Expr::value(Some(email)));
        }
        if let Some(full_name) = full_name {
            update = update.col_expr(entity::user::Column::FullName, Expr::value(full_name));
        }

        let result = update.exec(self.db).await?;

        Ok(result.rows_affected)
    }
}
