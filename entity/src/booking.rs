use sea_orm::entity::prelude::*;

use crate::{
    sea_orm_active_enums::{BookingStatus, RoomType},
    types::{
        BookingDocuments, BookingPreferences, CheckInRecord, CheckOutRecord, Communications,
        OwnerResponse, PaymentRecord, ReviewRecord,
    },
};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "booking")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub student_id: i32,
    pub hostel_id: i32,
    pub hostel_owner_id: i32,
    pub room_type: RoomType,
    pub beds_requested: i32,
    pub check_in_date: Date,
    pub check_out_date: Date,
    pub months: i32,
    pub price_per_bed: f64,
    pub total_bed_cost: f64,
    pub mess_charges: f64,
    pub security_deposit: f64,
    pub total_amount: f64,
    pub gst: f64,
    pub final_amount: f64,
    pub discount: f64,
    pub advance_amount: f64,
    pub status: BookingStatus,
    #[sea_orm(column_type = "Json")]
    pub preferences: BookingPreferences,
    #[sea_orm(column_type = "Json", nullable)]
    pub owner_response: Option<OwnerResponse>,
    #[sea_orm(column_type = "Json", nullable)]
    pub check_in: Option<CheckInRecord>,
    #[sea_orm(column_type = "Json", nullable)]
    pub check_out: Option<CheckOutRecord>,
    #[sea_orm(column_type = "Json")]
    pub payment: PaymentRecord,
    #[sea_orm(column_type = "Json", nullable)]
    pub review: Option<ReviewRecord>,
    #[sea_orm(column_type = "Json")]
    pub communications: Communications,
    #[sea_orm(column_type = "Json")]
    pub documents: BookingDocuments,
    pub auto_cancel_at: DateTime,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::habs_user::Entity",
        from = "Column::StudentId",
        to = "super::habs_user::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::habs_user::Entity",
        from = "Column::HostelOwnerId",
        to = "super::habs_user::Column::Id"
    )]
    HostelOwner,
    #[sea_orm(
        belongs_to = "super::hostel::Entity",
        from = "Column::HostelId",
        to = "super::hostel::Column::Id"
    )]
    Hostel,
    #[sea_orm(has_many = "super::booking_status_history::Entity")]
    BookingStatusHistory,
}

impl Related<super::hostel::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Hostel.def()
    }
}

impl Related<super::booking_status_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BookingStatusHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
