use chrono::NaiveDateTime;
use entity::{
    sea_orm_active_enums::{HostelStatus, HostelType, RoomType},
    types::{
        HostelContact, HostelImage, HostelRules, HostelTypePreference, MessDetails,
        NearbyInstitution, RatingBreakdown, RoomTypePreference,
    },
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::model::api::PaginationDto;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomTypeDto {
    pub id: i32,
    pub room_type: RoomType,
    pub total_rooms: i32,
    pub available_rooms: i32,
    pub beds_per_room: i32,
    pub price_per_bed: f64,
    pub security_deposit: f64,
    pub amenities: Vec<String>,
}

impl From<entity::hostel_room_type::Model> for RoomTypeDto {
    fn from(model: entity::hostel_room_type::Model) -> Self {
        Self {
            id: model.id,
            room_type: model.room_type,
            total_rooms: model.total_rooms,
            available_rooms: model.available_rooms,
            beds_per_room: model.beds_per_room,
            price_per_bed: model.price_per_bed,
            security_deposit: model.security_deposit,
            amenities: model.amenities.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HostelLocationDto {
    pub address: String,
    pub landmark: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub place_id: Option<String>,
    pub nearby_universities: Vec<NearbyInstitution>,
    pub nearby_departments: Vec<NearbyInstitution>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RatingsDto {
    pub average: f64,
    pub total_reviews: i32,
    pub breakdown: RatingBreakdown,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HostelDto {
    pub id: i32,
    pub owner_id: i32,
    pub name: String,
    pub hostel_type: HostelType,
    pub description: String,
    pub location: HostelLocationDto,
    pub contact: HostelContact,
    pub facilities: Vec<String>,
    pub images: Vec<HostelImage>,
    pub mess: MessDetails,
    pub rules: HostelRules,
    pub room_types: Vec<RoomTypeDto>,
    pub status: HostelStatus,
    pub approval_date: Option<NaiveDateTime>,
    pub rejection_reason: Option<String>,
    pub ratings: RatingsDto,
    pub views: i32,
    pub booking_requests: i32,
    pub successful_bookings: i32,
    pub is_featured: bool,
    pub total_beds: i32,
    pub available_beds: i32,
    /// Distance from the searched coordinates, present on geographic searches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl HostelDto {
    /// Builds the public view of a hostel from its row and its ordered room types.
    pub fn from_parts(
        hostel: entity::hostel::Model,
        room_types: Vec<entity::hostel_room_type::Model>,
    ) -> Self {
        let total_beds = room_types.iter().map(|r| r.total_beds()).sum();
        let available_beds = room_types.iter().map(|r| r.available_beds()).sum();

        Self {
            id: hostel.id,
            owner_id: hostel.owner_id,
            name: hostel.name,
            hostel_type: hostel.hostel_type,
            description: hostel.description,
            location: HostelLocationDto {
                address: hostel.address,
                landmark: hostel.landmark,
                city: hostel.city,
                state: hostel.state,
                pincode: hostel.pincode,
                country: hostel.country,
                latitude: hostel.latitude,
                longitude: hostel.longitude,
                place_id: hostel.place_id,
                nearby_universities: hostel.nearby_universities.0,
                nearby_departments: hostel.nearby_departments.0,
            },
            contact: hostel.contact,
            facilities: hostel.facilities.0,
            images: hostel.images.0,
            mess: hostel.mess,
            rules: hostel.rules,
            room_types: room_types.into_iter().map(RoomTypeDto::from).collect(),
            status: hostel.status,
            approval_date: hostel.approval_date,
            rejection_reason: hostel.rejection_reason,
            ratings: RatingsDto {
                average: hostel.rating_average,
                total_reviews: hostel.rating_total_reviews,
                breakdown: hostel.rating_breakdown,
            },
            views: hostel.views,
            booking_requests: hostel.booking_requests,
            successful_bookings: hostel.successful_bookings,
            is_featured: hostel.is_featured,
            total_beds,
            available_beds,
            distance_km: None,
            created_at: hostel.created_at,
            updated_at: hostel.updated_at,
        }
    }
}

fn validate_pincode(pincode: &str) -> Result<(), ValidationError> {
    if pincode.len() == 6 && pincode.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("pincode").with_message("Pincode must be 6 digits".into()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomTypeInputDto {
    pub room_type: RoomType,
    #[validate(range(min = 1, message = "A room type needs at least one room"))]
    pub total_rooms: i32,
    /// Defaults to the rooms not held by approved or checked-in bookings when omitted
    pub available_rooms: Option<i32>,
    #[validate(range(min = 1, max = 3))]
    pub beds_per_room: i32,
    #[validate(range(min = 0.0))]
    pub price_per_bed: f64,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub security_deposit: f64,
    #[serde(default)]
    pub amenities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HostelLocationInputDto {
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    pub landmark: Option<String>,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "State is required"))]
    pub state: String,
    #[validate(custom(function = "validate_pincode"))]
    pub pincode: String,
    pub country: Option<String>,
    /// Geocoded from the address when omitted
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateHostelDto {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    pub hostel_type: HostelType,
    #[validate(length(min = 10, max = 2000))]
    pub description: String,
    #[validate(nested)]
    pub location: HostelLocationInputDto,
    #[serde(default)]
    pub contact: HostelContact,
    #[serde(default)]
    pub facilities: Vec<String>,
    #[serde(default)]
    pub images: Vec<HostelImage>,
    #[serde(default)]
    pub mess: MessDetails,
    #[serde(default)]
    pub rules: HostelRules,
    #[validate(length(min = 1, message = "At least one room type is required"), nested)]
    pub room_types: Vec<RoomTypeInputDto>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHostelDto {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,
    pub hostel_type: Option<HostelType>,
    #[validate(length(min = 10, max = 2000))]
    pub description: Option<String>,
    #[validate(nested)]
    pub location: Option<HostelLocationInputDto>,
    pub contact: Option<HostelContact>,
    pub facilities: Option<Vec<String>>,
    pub images: Option<Vec<HostelImage>>,
    pub mess: Option<MessDetails>,
    pub rules: Option<HostelRules>,
    #[validate(length(min = 1, message = "At least one room type is required"), nested)]
    pub room_types: Option<Vec<RoomTypeInputDto>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum SearchSort {
    #[default]
    CreatedAt,
    Price,
    Rating,
    Distance,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Filters accepted by the public hostel search
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct HostelSearchQuery {
    /// Case-insensitive match against name, description, or address
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub hostel_type: Option<HostelTypePreference>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Comma separated facilities, every one must be offered
    pub facilities: Option<String>,
    pub room_type: Option<RoomTypePreference>,
    pub university_id: Option<i32>,
    pub department_id: Option<i32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Search radius in kilometres around `latitude`/`longitude`, defaults to 10
    pub radius: Option<f64>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub sort_by: Option<SearchSort>,
    pub sort_order: Option<SortOrder>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationDto {
    pub hostel: HostelDto,
    pub score: f64,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HostelSearchResultDto {
    pub hostels: Vec<HostelDto>,
    pub pagination: PaginationDto,
    pub recommendations: Vec<RecommendationDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HostelDetailDto {
    pub hostel: HostelDto,
    pub similar_hostels: Vec<HostelDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HostelListDto {
    pub hostels: Vec<HostelDto>,
    pub pagination: PaginationDto,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MyHostelsQuery {
    pub status: Option<HostelStatus>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct ApproveHostelDto {
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RejectHostelDto {
    #[validate(length(min = 1, message = "Rejection reason is required"))]
    pub reason: String,
    pub notes: Option<String>,
}
