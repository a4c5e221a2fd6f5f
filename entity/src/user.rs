use sea_orm::entity::prelude::*;

/// Role assigned to a user account.
///
/// Residents (owners and tenants) are derived from apartment records by the
/// resident sync engine; managers are created from the super-admin console.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum UserRole {
    #[sea_orm(string_value = "manager")]
    Manager,
    #[sea_orm(string_value = "owner")]
    Owner,
    #[sea_orm(string_value = "tenant")]
    Tenant,
    #[sea_orm(string_value = "super_admin")]
    SuperAdmin,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Identity-provider subject ID, claimed on first login. Rows created by
    /// the resident sync engine start out with no external ID.
    #[sea_orm(unique)]
    pub external_id: Option<String>,
    #[sea_orm(unique)]
    pub email: Option<String>,
    pub full_name: String,
    pub role: UserRole,
    #[sea_orm(unique)]
    pub phone: Option<String>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::building::Entity")]
    Buildings,
    #[sea_orm(has_many = "super::payment::Entity")]
    Payments,
    #[sea_orm(has_many = "super::notification::Entity")]
    Notifications,
    #[sea_orm(has_many = "super::subscription::Entity")]
    Subscriptions,
}

impl Related<super::building::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Buildings.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl Related<super::notification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notifications.def()
    }
}

impl Related<super::subscription::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subscriptions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
