use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CoordinatesDto {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Transit,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct GeocodeRequestDto {
    #[validate(length(min = 3, message = "Address is required"))]
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeDto {
    pub latitude: f64,
    pub longitude: f64,
    pub place_id: Option<String>,
    pub formatted_address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressDto {
    pub formatted_address: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct DistanceRequestDto {
    #[validate(nested)]
    pub origin: CoordinatesDto,
    #[validate(nested)]
    pub destination: CoordinatesDto,
    #[serde(default)]
    pub mode: TravelMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DistanceDto {
    pub distance_meters: f64,
    pub duration_seconds: f64,
    pub distance_text: String,
    pub duration_text: String,
    /// True when the provider was unavailable and a straight-line estimate was used
    pub estimated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteLegDto {
    pub distance_meters: f64,
    pub duration_seconds: f64,
    /// Encoded polyline, absent for estimates
    pub geometry: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RouteDto {
    pub routes: Vec<RouteLegDto>,
    pub estimated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct TravelTimesRequestDto {
    #[validate(nested)]
    pub origin: CoordinatesDto,
    #[validate(nested)]
    pub destination: CoordinatesDto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TravelTimesDto {
    pub walking: DistanceDto,
    pub driving: DistanceDto,
    pub transit: DistanceDto,
}

fn default_nearby_radius() -> u32 {
    5000
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct NearbySearchDto {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    /// Search radius in metres
    #[validate(range(min = 1, max = 50000))]
    #[serde(default = "default_nearby_radius")]
    pub radius: u32,
    #[serde(default)]
    pub keyword: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NearbyPlaceDto {
    pub name: String,
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// Metres from the search point
    pub distance: Option<f64>,
    pub place_id: Option<String>,
    pub category: Option<String>,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDetailDto {
    pub name: Option<String>,
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub place_id: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub rating: Option<f64>,
    pub photos: Vec<String>,
}
