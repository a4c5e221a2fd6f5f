use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
};

pub struct SubscriptionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SubscriptionRepository<'a> {
    /// Creates a new instance of [`SubscriptionRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets all subscriptions joined with their owning user, for the console
    /// listing.
    pub async fn get_all_with_user(
        &self,
    ) -> Result<
        Vec<(
            entity::subscription::Model,
            Option<entity::user::Model>,
        )>,
        DbErr,
    > {
        entity::prelude::Subscription::find()
            .find_also_related(entity::user::Entity)
            .all(self.db)
            .await
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Subscription::find().count(self.db).await
    }

    pub async fn count_by_status(&self, status: &str) -> Result<u64, DbErr> {
        entity::prelude::Subscription::find()
            .filter(entity::subscription::Column::Status.eq(status))
            .count(self.db)
            .await
    }
}
