use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "airplane")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub airplane_type_id: i32,
    pub rows: i32,
    pub seats_in_row: i32,
}

impl Model {
    /// Derived from the seat grid, never stored.
    pub fn capacity(&self) -> i32 {
        self.rows * self.seats_in_row
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::airplane_type::Entity",
        from = "Column::AirplaneTypeId",
        to = "super::airplane_type::Column::Id"
    )]
    AirplaneType,
    #[sea_orm(has_many = "super::flight::Entity")]
    Flights,
}

impl Related<super::airplane_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AirplaneType.def()
    }
}

impl Related<super::flight::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Flights.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
