use sea_orm::entity::prelude::*;

use crate::{
    sea_orm_active_enums::{HostelStatus, HostelType},
    types::{
        HostelContact, HostelImages, HostelRules, MessDetails, NearbyInstitutions,
        RatingBreakdown, StringList,
    },
};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "hostel")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub owner_id: i32,
    pub name: String,
    pub hostel_type: HostelType,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub address: String,
    pub landmark: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub place_id: Option<String>,
    #[sea_orm(column_type = "Json")]
    pub nearby_universities: NearbyInstitutions,
    #[sea_orm(column_type = "Json")]
    pub nearby_departments: NearbyInstitutions,
    #[sea_orm(column_type = "Json")]
    pub contact: HostelContact,
    #[sea_orm(column_type = "Json")]
    pub facilities: StringList,
    #[sea_orm(column_type = "Json")]
    pub images: HostelImages,
    #[sea_orm(column_type = "Json")]
    pub mess: MessDetails,
    #[sea_orm(column_type = "Json")]
    pub rules: HostelRules,
    pub status: HostelStatus,
    pub approved_by: Option<i32>,
    pub approval_date: Option<DateTime>,
    pub rejection_reason: Option<String>,
    pub admin_notes: Option<String>,
    pub rating_average: f64,
    pub rating_total_reviews: i32,
    #[sea_orm(column_type = "Json")]
    pub rating_breakdown: RatingBreakdown,
    pub views: i32,
    pub booking_requests: i32,
    pub successful_bookings: i32,
    pub is_featured: bool,
    pub priority: i32,
    pub last_updated_by: Option<i32>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::habs_user::Entity",
        from = "Column::OwnerId",
        to = "super::habs_user::Column::Id"
    )]
    Owner,
    #[sea_orm(has_many = "super::hostel_room_type::Entity")]
    HostelRoomType,
}

impl Related<super::habs_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::hostel_room_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HostelRoomType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
