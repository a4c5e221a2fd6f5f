use sea_orm::entity::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum ApartmentUsage {
    #[sea_orm(string_value = "residential")]
    Residential,
    #[sea_orm(string_value = "storage")]
    Storage,
    #[sea_orm(string_value = "commercial")]
    Commercial,
    #[sea_orm(string_value = "parking")]
    Parking,
}

#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum OccupancyStatus {
    #[sea_orm(string_value = "occupied")]
    Occupied,
    #[sea_orm(string_value = "vacant")]
    Vacant,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "apartments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Unit label, e.g. "A2" or "B-storage".
    pub identifier: String,
    pub floor: Option<String>,
    pub building_id: Option<i32>,
    /// User that receives notifications for this unit. Maintained by the
    /// resident sync engine, not supplied by clients.
    pub resident_id: Option<i32>,
    pub owner_name: String,
    pub owner_phone: Option<String>,
    pub tenant_name: Option<String>,
    pub tenant_phone: Option<String>,
    pub usage: ApartmentUsage,
    pub status: OccupancyStatus,
    /// Free-form expense-category name to numeric share weight.
    pub shares: Json,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::building::Entity",
        from = "Column::BuildingId",
        to = "super::building::Column::Id"
    )]
    Building,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ResidentId",
        to = "super::user::Column::Id"
    )]
    Resident,
    #[sea_orm(has_many = "super::expense::Entity")]
    Expenses,
}

impl Related<super::building::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Building.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Resident.def()
    }
}

impl Related<super::expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
