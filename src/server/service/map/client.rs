//! HTTP client for the map provider.
//!
//! Requests authenticate with an OAuth client-credentials token which is cached until shortly
//! before it expires.

use std::{sync::Arc, time::Duration};

use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use tokio::{sync::RwLock, time::Instant};

use crate::{
    model::map::{
        AddressDto, CoordinatesDto, GeocodeDto, NearbyPlaceDto, PlaceDetailDto, RouteLegDto,
        TravelMode,
    },
    server::error::map::MapError,
};

const TOKEN_PATH: &str = "/advancedmaps/v1/oauth/access_token";
const GEOCODE_PATH: &str = "/advancedmaps/v1/geocoding";
const REVERSE_GEOCODE_PATH: &str = "/advancedmaps/v1/rev_geocoding";
const DISTANCE_PATH: &str = "/advancedmaps/v1/distance_matrix/driving";
const ROUTE_PATH: &str = "/advancedmaps/v1/routing";
const NEARBY_PATH: &str = "/advancedmaps/v1/nearby";
const PLACE_DETAIL_PATH: &str = "/advancedmaps/v1/place_detail";

/// Tokens are refreshed this long before the provider says they expire
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Deserialize)]
struct ResultsResponse<T> {
    #[serde(default = "Vec::new")]
    results: Vec<T>,
}

#[derive(Deserialize)]
struct GeocodeResult {
    #[serde(deserialize_with = "number_or_string")]
    lat: f64,
    #[serde(deserialize_with = "number_or_string")]
    lng: f64,
    formatted_address: Option<String>,
    place_id: Option<String>,
}

#[derive(Deserialize)]
struct ReverseGeocodeResult {
    formatted_address: Option<String>,
    city: Option<String>,
    state: Option<String>,
    pincode: Option<String>,
}

#[derive(Deserialize)]
struct DistanceResult {
    #[serde(deserialize_with = "number_or_string")]
    distance: f64,
    #[serde(deserialize_with = "number_or_string")]
    duration: f64,
}

#[derive(Deserialize)]
struct RouteResponse {
    #[serde(default = "Vec::new")]
    routes: Vec<RouteResult>,
}

#[derive(Deserialize)]
struct RouteResult {
    #[serde(deserialize_with = "number_or_string")]
    distance: f64,
    #[serde(deserialize_with = "number_or_string")]
    duration: f64,
    geometry: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NearbyResponse {
    #[serde(default = "Vec::new")]
    suggested_locations: Vec<NearbyResult>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NearbyResult {
    place_name: String,
    place_address: Option<String>,
    #[serde(deserialize_with = "number_or_string")]
    lat: f64,
    #[serde(deserialize_with = "number_or_string")]
    lng: f64,
    distance: Option<f64>,
    place_id: Option<String>,
    category_code: Option<String>,
    #[serde(default)]
    keywords: Vec<String>,
}

#[derive(Deserialize)]
struct PlaceDetailResult {
    name: Option<String>,
    formatted_address: Option<String>,
    #[serde(deserialize_with = "number_or_string")]
    lat: f64,
    #[serde(deserialize_with = "number_or_string")]
    lng: f64,
    phone: Option<String>,
    website: Option<String>,
    rating: Option<f64>,
    #[serde(default)]
    photos: Vec<String>,
}

/// The provider sends some numeric fields as JSON strings.
fn number_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(value) => Ok(value),
        NumberOrString::String(value) => value.trim().parse().map_err(serde::de::Error::custom),
    }
}

fn coordinate_param(point: CoordinatesDto) -> String {
    format!("{},{}", point.latitude, point.longitude)
}

/// Cheaply cloneable client; clones share the HTTP connection pool and the token cache.
#[derive(Clone)]
pub struct MapClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Option<(String, String)>,
    token: Arc<RwLock<Option<CachedToken>>>,
}

impl MapClient {
    /// Builds a client for the provider at `base_url`.
    ///
    /// Without both credentials every request fails with [`MapError::NotConfigured`], which
    /// callers with a fallback treat like any other provider failure.
    pub fn new(
        base_url: impl Into<String>,
        client_id: Option<String>,
        client_secret: Option<String>,
    ) -> Result<Self, MapError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("habs/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials: client_id.zip(client_secret),
            token: Arc::new(RwLock::new(None)),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    /// Returns the cached token or fetches a new one when it is missing or about to expire
    async fn access_token(&self) -> Result<String, MapError> {
        let (client_id, client_secret) = self.credentials.as_ref().ok_or(MapError::NotConfigured)?;

        if let Some(token) = self.token.read().await.as_ref() {
            if Instant::now() < token.expires_at {
                return Ok(token.access_token.clone());
            }
        }

        let mut cached = self.token.write().await;
        // Another request may have refreshed the token while we waited for the lock
        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.expires_at {
                return Ok(token.access_token.clone());
            }
        }

        let response = self
            .http
            .post(format!("{}{}", self.base_url, TOKEN_PATH))
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", client_id.as_str()),
                ("client_secret", client_secret.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MapError::UnexpectedStatus(response.status()));
        }

        let token: TokenResponse = response.json().await?;
        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_EXPIRY_MARGIN);

        tracing::debug!("Fetched map provider access token valid for {:?}", lifetime);

        *cached = Some(CachedToken {
            access_token: token.access_token.clone(),
            expires_at: Instant::now() + lifetime,
        });

        Ok(token.access_token)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, MapError> {
        let token = self.access_token().await?;

        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(token)
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MapError::UnexpectedStatus(response.status()));
        }

        Ok(response.json().await?)
    }

    /// Resolves an address to coordinates using the best match
    pub async fn geocode(&self, address: &str) -> Result<GeocodeDto, MapError> {
        let response: ResultsResponse<GeocodeResult> = self
            .get(
                GEOCODE_PATH,
                &[("address", address.to_string()), ("itemCount", "1".to_string())],
            )
            .await?;

        let result = response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| MapError::NoResults(address.to_string()))?;

        Ok(GeocodeDto {
            latitude: result.lat,
            longitude: result.lng,
            place_id: result.place_id,
            formatted_address: result.formatted_address,
        })
    }

    pub async fn reverse_geocode(&self, point: CoordinatesDto) -> Result<AddressDto, MapError> {
        let response: ResultsResponse<ReverseGeocodeResult> = self
            .get(
                REVERSE_GEOCODE_PATH,
                &[
                    ("lat", point.latitude.to_string()),
                    ("lng", point.longitude.to_string()),
                ],
            )
            .await?;

        let result = response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| MapError::NoResults(coordinate_param(point)))?;

        Ok(AddressDto {
            formatted_address: result.formatted_address.unwrap_or_default(),
            city: result.city,
            state: result.state,
            pincode: result.pincode,
        })
    }

    /// Driving distance in metres and duration in seconds between two points
    pub async fn driving_distance(
        &self,
        origin: CoordinatesDto,
        destination: CoordinatesDto,
    ) -> Result<(f64, f64), MapError> {
        let response: ResultsResponse<DistanceResult> = self
            .get(
                DISTANCE_PATH,
                &[
                    ("origins", coordinate_param(origin)),
                    ("destinations", coordinate_param(destination)),
                    ("sources", "coordinates".to_string()),
                    ("targets", "coordinates".to_string()),
                ],
            )
            .await?;

        let result = response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| MapError::NoResults(coordinate_param(destination)))?;

        Ok((result.distance, result.duration))
    }

    /// Alternative routes between two points for a travel mode
    pub async fn route(
        &self,
        origin: CoordinatesDto,
        destination: CoordinatesDto,
        mode: TravelMode,
    ) -> Result<Vec<RouteLegDto>, MapError> {
        let route_type = match mode {
            TravelMode::Walking => "walking",
            TravelMode::Driving | TravelMode::Transit => "driving",
        };

        let response: RouteResponse = self
            .get(
                ROUTE_PATH,
                &[
                    ("start", coordinate_param(origin)),
                    ("end", coordinate_param(destination)),
                    ("routeType", route_type.to_string()),
                    ("alternatives", "true".to_string()),
                    ("geometries", "polyline".to_string()),
                ],
            )
            .await?;

        if response.routes.is_empty() {
            return Err(MapError::NoResults(coordinate_param(destination)));
        }

        Ok(response
            .routes
            .into_iter()
            .map(|route| RouteLegDto {
                distance_meters: route.distance,
                duration_seconds: route.duration,
                geometry: route.geometry,
            })
            .collect())
    }

    /// Places around a point matching `keyword`, closest first
    pub async fn nearby(
        &self,
        point: CoordinatesDto,
        radius_meters: u32,
        keyword: &str,
    ) -> Result<Vec<NearbyPlaceDto>, MapError> {
        let response: NearbyResponse = self
            .get(
                NEARBY_PATH,
                &[
                    ("lat", point.latitude.to_string()),
                    ("lng", point.longitude.to_string()),
                    ("radius", radius_meters.to_string()),
                    ("keyword", keyword.to_string()),
                    ("sortBy", "dist:asc".to_string()),
                ],
            )
            .await?;

        Ok(response
            .suggested_locations
            .into_iter()
            .map(|place| NearbyPlaceDto {
                name: place.place_name,
                address: place.place_address,
                latitude: place.lat,
                longitude: place.lng,
                distance: place.distance,
                place_id: place.place_id,
                category: place.category_code,
                keywords: place.keywords,
            })
            .collect())
    }

    pub async fn place_details(&self, place_id: &str) -> Result<PlaceDetailDto, MapError> {
        let response: ResultsResponse<PlaceDetailResult> = self
            .get(PLACE_DETAIL_PATH, &[("place_id", place_id.to_string())])
            .await?;

        let result = response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| MapError::NoResults(place_id.to_string()))?;

        Ok(PlaceDetailDto {
            name: result.name,
            address: result.formatted_address,
            latitude: result.lat,
            longitude: result.lng,
            place_id: place_id.to_string(),
            phone: result.phone,
            website: result.website,
            rating: result.rating,
            photos: result.photos,
        })
    }
}
