use chrono::Utc;
use entity::notification::NotificationType;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};

pub struct NotificationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> NotificationRepository<'a> {
    /// Creates a new instance of [`NotificationRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: i32,
        title: String,
        message: String,
        kind: NotificationType,
    ) -> Result<entity::notification::Model, DbErr> {
        let notification = entity::notification::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            title: ActiveValue::Set(title),
            message: ActiveValue::Set(message),
            kind: ActiveValue::Set(kind),
            is_read: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        notification.insert(self.db).await
    }

    /// Gets a user's notifications, newest first.
    pub async fn get_many_by_user_id(
        &self,
        user_id: i32,
    ) -> Result<Vec<entity::notification::Model>, DbErr> {
        entity::prelude::Notification::find()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .order_by_desc(entity::notification::Column::CreatedAt)
            .order_by_desc(entity::notification::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn get_by_id(
        &self,
        id: i32,
    ) -> Result<Option<entity::notification::Model>, DbErr> {
        entity::prelude::Notification::find_by_id(id)
            .one(self.db)
            .await
    }

    pub async fn mark_read(
        &self,
        id: i32,
    ) -> Result<Option<entity::notification::Model>, DbErr> {
        let notification = match entity::prelude::Notification::find_by_id(id)
            .one(self.db)
            .await?
        {
            Some(notification) => notification,
            None => return Ok(None),
        };

        let mut notification_am = notification.into_active_model();
        notification_am.is_read = ActiveValue::Set(true);

        let notification = notification_am.update(self.db).await?;

        Ok(Some(notification))
    }

    pub async fn count_by_user_id(&self, user_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Notification::find()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .count(self.db)
            .await
    }
}
