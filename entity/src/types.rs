//! Structured sub-records stored as JSON columns.
//!
//! Nested documents that are always read and written together with their parent row (profiles,
//! preferences, lifecycle records on a booking) are persisted as JSON rather than split into
//! separate tables.

use chrono::NaiveDateTime;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::sea_orm_active_enums::{HostelType, RoomType};

/// Room type preference where `any` matches every tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RoomTypePreference {
    #[default]
    Any,
    Single,
    Double,
    Triple,
}

impl RoomTypePreference {
    pub fn matches(&self, room_type: RoomType) -> bool {
        matches!(
            (self, room_type),
            (Self::Any, _)
                | (Self::Single, RoomType::Single)
                | (Self::Double, RoomType::Double)
                | (Self::Triple, RoomType::Triple)
        )
    }
}

/// Hostel type preference where `any` matches every hostel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum HostelTypePreference {
    #[default]
    Any,
    Boys,
    Girls,
    Coed,
}

impl HostelTypePreference {
    pub fn matches(&self, hostel_type: HostelType) -> bool {
        matches!(
            (self, hostel_type),
            (Self::Any, _)
                | (Self::Boys, HostelType::Boys)
                | (Self::Girls, HostelType::Girls)
                | (Self::Coed, HostelType::Coed)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MessType {
    Veg,
    NonVeg,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RoomCondition {
    Excellent,
    Good,
    Fair,
    Poor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Partial,
    Completed,
    Refunded,
}

/// Search preferences used to rank hostels for a student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentPreferences {
    pub budget_min: f64,
    pub budget_max: f64,
    pub room_type: RoomTypePreference,
    pub facilities: Vec<String>,
    pub hostel_type: HostelTypePreference,
    pub max_distance_km: f64,
}

impl Default for StudentPreferences {
    fn default() -> Self {
        Self {
            budget_min: 0.0,
            budget_max: 50000.0,
            room_type: RoomTypePreference::Any,
            facilities: Vec::new(),
            hostel_type: HostelTypePreference::Any,
            max_distance_km: 10.0,
        }
    }
}

#[derive(
    Debug, Clone, PartialEq, Default, Serialize, Deserialize, FromJsonQueryResult, ToSchema,
)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentProfile {
    pub university_id: Option<i32>,
    pub college_id: Option<i32>,
    pub department_id: Option<i32>,
    pub institution_name: Option<String>,
    pub course: Option<String>,
    pub year: Option<i32>,
    pub student_id: Option<String>,
    #[serde(default)]
    pub preferences: StudentPreferences,
}

#[derive(
    Debug, Clone, PartialEq, Default, Serialize, Deserialize, FromJsonQueryResult, ToSchema,
)]
#[serde(rename_all = "camelCase", default)]
pub struct OwnerProfile {
    pub business_name: Option<String>,
    pub business_registration: Option<String>,
    pub business_phone: Option<String>,
    pub address: Option<String>,
    pub is_approved: bool,
    pub approval_date: Option<NaiveDateTime>,
    pub total_hostels: i32,
}

#[derive(
    Debug, Clone, PartialEq, Default, Serialize, Deserialize, FromJsonQueryResult, ToSchema,
)]
pub struct StringList(pub Vec<String>);

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TravelTimes {
    pub walking_minutes: i32,
    pub driving_minutes: i32,
    pub transit_minutes: i32,
}

/// Cached proximity of a hostel to a university or department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NearbyInstitution {
    pub institution_id: i32,
    pub name: String,
    pub distance_km: f64,
    pub travel_time: TravelTimes,
}

#[derive(
    Debug, Clone, PartialEq, Default, Serialize, Deserialize, FromJsonQueryResult, ToSchema,
)]
pub struct NearbyInstitutions(pub Vec<NearbyInstitution>);

#[derive(
    Debug, Clone, PartialEq, Default, Serialize, Deserialize, FromJsonQueryResult, ToSchema,
)]
#[serde(rename_all = "camelCase", default)]
pub struct HostelContact {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub whatsapp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HostelImage {
    pub url: String,
    pub caption: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

#[derive(
    Debug, Clone, PartialEq, Default, Serialize, Deserialize, FromJsonQueryResult, ToSchema,
)]
pub struct HostelImages(pub Vec<HostelImage>);

#[derive(
    Debug, Clone, PartialEq, Default, Serialize, Deserialize, FromJsonQueryResult, ToSchema,
)]
#[serde(rename_all = "camelCase", default)]
pub struct MessDetails {
    pub available: bool,
    pub mess_type: Option<MessType>,
    pub price_per_month: f64,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromJsonQueryResult, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct HostelRules {
    pub minimum_stay_months: i32,
    pub advance_payment_months: i32,
    pub notice_period_days: i32,
    pub gate_closing_time: Option<String>,
    pub visitors_allowed: bool,
    pub smoking_allowed: bool,
    pub alcohol_allowed: bool,
    #[serde(default)]
    pub other: Vec<String>,
}

impl Default for HostelRules {
    fn default() -> Self {
        Self {
            minimum_stay_months: 1,
            advance_payment_months: 1,
            notice_period_days: 30,
            gate_closing_time: None,
            visitors_allowed: true,
            smoking_allowed: false,
            alcohol_allowed: false,
            other: Vec::new(),
        }
    }
}

/// Per-axis review averages of a hostel.
#[derive(
    Debug, Clone, PartialEq, Default, Serialize, Deserialize, FromJsonQueryResult, ToSchema,
)]
#[serde(rename_all = "camelCase")]
pub struct RatingBreakdown {
    pub cleanliness: f64,
    pub food: f64,
    pub location: f64,
    pub facilities: f64,
    pub staff: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContact {
    pub name: String,
    pub phone: String,
    pub relation: Option<String>,
}

#[derive(
    Debug, Clone, PartialEq, Default, Serialize, Deserialize, FromJsonQueryResult, ToSchema,
)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingPreferences {
    #[serde(default)]
    pub mess_required: bool,
    pub mess_type: Option<MessType>,
    pub special_requests: Option<String>,
    pub emergency_contact: Option<EmergencyContact>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CounterOffer {
    pub price_per_bed: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromJsonQueryResult, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerResponse {
    pub message: Option<String>,
    pub counter_offer: Option<CounterOffer>,
    pub responded_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromJsonQueryResult, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRecord {
    pub actual_date: NaiveDateTime,
    pub verified_by: i32,
    pub room_number: String,
    pub bed_number: Option<String>,
    pub keys_issued: bool,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Deduction {
    pub item: String,
    pub amount: f64,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinalSettlement {
    pub amount: f64,
    pub method: String,
    pub transaction_id: Option<String>,
    pub date: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromJsonQueryResult, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckOutRecord {
    pub actual_date: NaiveDateTime,
    pub verified_by: i32,
    pub condition: RoomCondition,
    pub deductions: Vec<Deduction>,
    pub refund_amount: f64,
    pub notes: Option<String>,
    pub final_settlement: Option<FinalSettlement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentEntry {
    pub amount: f64,
    pub method: String,
    pub transaction_id: Option<String>,
    pub notes: Option<String>,
    pub recorded_by: i32,
    pub date: NaiveDateTime,
}

#[derive(
    Debug, Clone, PartialEq, Default, Serialize, Deserialize, FromJsonQueryResult, ToSchema,
)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentRecord {
    pub status: PaymentStatus,
    pub paid_amount: f64,
    pub history: Vec<PaymentEntry>,
    pub refund_amount: f64,
    pub refund_date: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRating {
    pub overall: i32,
    pub cleanliness: i32,
    pub food: i32,
    pub location: i32,
    pub facilities: i32,
    pub staff: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromJsonQueryResult, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    pub rating: ReviewRating,
    pub comment: Option<String>,
    pub photos: Vec<String>,
    pub would_recommend: bool,
    pub submitted_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Communication {
    pub from_user_id: i32,
    pub to_user_id: i32,
    pub subject: Option<String>,
    pub message: String,
    pub sent_at: NaiveDateTime,
}

#[derive(
    Debug, Clone, PartialEq, Default, Serialize, Deserialize, FromJsonQueryResult, ToSchema,
)]
pub struct Communications(pub Vec<Communication>);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingDocument {
    pub kind: String,
    pub url: String,
    pub uploaded_at: NaiveDateTime,
}

#[derive(
    Debug, Clone, PartialEq, Default, Serialize, Deserialize, FromJsonQueryResult, ToSchema,
)]
pub struct BookingDocuments(pub Vec<BookingDocument>);
