use chrono::{NaiveDate, NaiveDateTime};
use entity::{
    sea_orm_active_enums::{BookingStatus, RoomType},
    types::{
        BookingDocument, BookingPreferences, CheckInRecord, CheckOutRecord, Communication,
        CounterOffer, OwnerResponse, PaymentRecord, ReviewRecord, RoomCondition,
    },
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::model::api::PaginationDto;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_duration"))]
pub struct DurationDto {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[validate(range(min = 1, max = 60, message = "Duration must be between 1 and 60 months"))]
    pub months: i32,
}

fn validate_duration(duration: &DurationDto) -> Result<(), ValidationError> {
    if duration.check_out > duration.check_in {
        Ok(())
    } else {
        Err(ValidationError::new("duration")
            .with_message("Check-out date must be after check-in date".into()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PricingDto {
    pub price_per_bed: f64,
    pub total_bed_cost: f64,
    pub mess_charges: f64,
    pub security_deposit: f64,
    /// Subtotal before tax
    pub total_amount: f64,
    pub gst: f64,
    pub final_amount: f64,
    pub discount: f64,
    pub advance_amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingDto {
    pub id: i32,
    pub student_id: i32,
    pub hostel_id: i32,
    pub hostel_owner_id: i32,
    pub room_type: RoomType,
    pub beds_requested: i32,
    pub duration: DurationDto,
    pub pricing: PricingDto,
    pub status: BookingStatus,
    pub preferences: BookingPreferences,
    pub owner_response: Option<OwnerResponse>,
    pub check_in: Option<CheckInRecord>,
    pub check_out: Option<CheckOutRecord>,
    pub payment: PaymentRecord,
    pub review: Option<ReviewRecord>,
    pub communications: Vec<Communication>,
    pub documents: Vec<BookingDocument>,
    pub auto_cancel_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<entity::booking::Model> for BookingDto {
    fn from(model: entity::booking::Model) -> Self {
        Self {
            id: model.id,
            student_id: model.student_id,
            hostel_id: model.hostel_id,
            hostel_owner_id: model.hostel_owner_id,
            room_type: model.room_type,
            beds_requested: model.beds_requested,
            duration: DurationDto {
                check_in: model.check_in_date,
                check_out: model.check_out_date,
                months: model.months,
            },
            pricing: PricingDto {
                price_per_bed: model.price_per_bed,
                total_bed_cost: model.total_bed_cost,
                mess_charges: model.mess_charges,
                security_deposit: model.security_deposit,
                total_amount: model.total_amount,
                gst: model.gst,
                final_amount: model.final_amount,
                discount: model.discount,
                advance_amount: model.advance_amount,
            },
            status: model.status,
            preferences: model.preferences,
            owner_response: model.owner_response,
            check_in: model.check_in,
            check_out: model.check_out,
            payment: model.payment,
            review: model.review,
            communications: model.communications.0,
            documents: model.documents.0,
            auto_cancel_at: model.auto_cancel_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusHistoryDto {
    pub status: BookingStatus,
    pub timestamp: NaiveDateTime,
    pub updated_by: Option<i32>,
    pub reason: Option<String>,
    pub notes: Option<String>,
}

impl From<entity::booking_status_history::Model> for StatusHistoryDto {
    fn from(model: entity::booking_status_history::Model) -> Self {
        Self {
            status: model.status,
            timestamp: model.created_at,
            updated_by: model.updated_by,
            reason: model.reason,
            notes: model.notes,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetailDto {
    pub booking: BookingDto,
    pub hostel_name: String,
    pub student_name: String,
    pub status_history: Vec<StatusHistoryDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookingListDto {
    pub bookings: Vec<BookingDto>,
    pub pagination: PaginationDto,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookingQuery {
    pub status: Option<BookingStatus>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdminBookingQuery {
    pub status: Option<BookingStatus>,
    /// Case-insensitive match against student name, student email, or hostel name
    pub search: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingDto {
    pub hostel_id: i32,
    pub room_type: RoomType,
    #[validate(range(min = 1, max = 10, message = "Beds requested must be between 1 and 10"))]
    pub beds_requested: i32,
    #[validate(nested)]
    pub duration: DurationDto,
    #[serde(default)]
    pub preferences: BookingPreferences,
}

/// Changes a student may make while their request is still pending
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingDto {
    #[validate(range(min = 1, max = 10, message = "Beds requested must be between 1 and 10"))]
    pub beds_requested: Option<i32>,
    #[validate(nested)]
    pub duration: Option<DurationDto>,
    pub preferences: Option<BookingPreferences>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RespondAction {
    Approve,
    Reject,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RespondBookingDto {
    pub action: RespondAction,
    pub message: Option<String>,
    pub counter_offer: Option<CounterOffer>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CancelBookingDto {
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckInDto {
    #[validate(length(min = 1, message = "Room number is required"))]
    pub room_number: String,
    pub bed_number: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct DeductionDto {
    #[validate(length(min = 1))]
    pub item: String,
    #[validate(range(min = 0.0, message = "Deduction amount cannot be negative"))]
    pub amount: f64,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CheckOutDto {
    pub condition: RoomCondition,
    #[serde(default)]
    #[validate(nested)]
    pub deductions: Vec<DeductionDto>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckOutResultDto {
    pub booking: BookingDto,
    pub refund_amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompleteBookingDto {
    #[validate(range(min = 0.0))]
    pub amount: f64,
    #[validate(length(min = 1, message = "Settlement method is required"))]
    pub method: String,
    pub transaction_id: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate, ToSchema)]
pub struct ReviewRatingDto {
    #[validate(range(min = 1, max = 5))]
    pub overall: i32,
    #[validate(range(min = 1, max = 5))]
    pub cleanliness: i32,
    #[validate(range(min = 1, max = 5))]
    pub food: i32,
    #[validate(range(min = 1, max = 5))]
    pub location: i32,
    #[validate(range(min = 1, max = 5))]
    pub facilities: i32,
    #[validate(range(min = 1, max = 5))]
    pub staff: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDto {
    #[validate(nested)]
    pub rating: ReviewRatingDto,
    #[validate(length(max = 1000))]
    pub comment: Option<String>,
    #[serde(default)]
    pub photos: Vec<String>,
    pub would_recommend: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordPaymentDto {
    #[validate(range(exclusive_min = 0.0, message = "Payment amount must be positive"))]
    pub amount: f64,
    #[validate(length(min = 1, message = "Payment method is required"))]
    pub method: String,
    pub transaction_id: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct BookingMessageDto {
    pub subject: Option<String>,
    #[validate(length(min = 1, max = 2000))]
    pub message: String,
}
