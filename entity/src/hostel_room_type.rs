use sea_orm::entity::prelude::*;

use crate::{sea_orm_active_enums::RoomType, types::StringList};

/// Capacity and pricing of one room tier of a hostel.
///
/// `version` is bumped on every inventory change and used as an optimistic concurrency token.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "hostel_room_type")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub hostel_id: i32,
    pub position: i32,
    pub room_type: RoomType,
    pub total_rooms: i32,
    pub available_rooms: i32,
    pub beds_per_room: i32,
    pub price_per_bed: f64,
    pub security_deposit: f64,
    #[sea_orm(column_type = "Json")]
    pub amenities: StringList,
    pub version: i32,
}

impl Model {
    /// Whether the free rooms of this tier can hold `beds` more students.
    pub fn can_accommodate(&self, beds: i32) -> bool {
        self.available_rooms * self.beds_per_room >= beds
    }

    pub fn total_beds(&self) -> i32 {
        self.total_rooms * self.beds_per_room
    }

    pub fn available_beds(&self) -> i32 {
        self.available_rooms * self.beds_per_room
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::hostel::Entity",
        from = "Column::HostelId",
        to = "super::hostel::Column::Id"
    )]
    Hostel,
}

impl Related<super::hostel::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Hostel.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
