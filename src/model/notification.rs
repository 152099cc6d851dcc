use entity::sea_orm_active_enums::{BookingStatus, RoomType};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::booking::DeductionDto;

/// Frame pushed to WebSocket subscribers
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NotificationDto {
    pub event: String,
    pub room: String,
    #[schema(value_type = Object)]
    pub data: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewBookingRequestEvent {
    pub booking_id: i32,
    pub student_name: String,
    pub hostel_name: String,
    pub room_type: RoomType,
    pub beds_requested: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponseEvent {
    pub booking_id: i32,
    pub status: BookingStatus,
    pub hostel_name: String,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingCancelledEvent {
    pub booking_id: i32,
    pub cancelled_by: String,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckedInEvent {
    pub booking_id: i32,
    pub room_number: String,
    pub bed_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckedOutEvent {
    pub booking_id: i32,
    pub refund_amount: f64,
    pub deductions: Vec<DeductionDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HostelModerationEvent {
    pub hostel_id: i32,
    pub hostel_name: String,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingMessageEvent {
    pub booking_id: i32,
    pub from_user_id: i32,
    pub subject: Option<String>,
    pub message: String,
}
