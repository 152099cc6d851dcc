use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        map::{
            AddressDto, CoordinatesDto, DistanceDto, DistanceRequestDto, GeocodeDto,
            GeocodeRequestDto, NearbyPlaceDto, NearbySearchDto, PlaceDetailDto, RouteDto,
            TravelTimesDto, TravelTimesRequestDto,
        },
    },
    server::{
        controller::util::json::ValidJson,
        error::Error,
        model::app::AppState,
        service::map::MapService,
    },
};

pub static MAP_TAG: &str = "map";

/// Resolve an address to coordinates
#[utoipa::path(
    post,
    path = "/api/map/geocode",
    tag = MAP_TAG,
    request_body = GeocodeRequestDto,
    responses(
        (status = 200, description = "Coordinates of the address", body = GeocodeDto),
        (status = 400, description = "Address is required", body = ErrorDto),
        (status = 404, description = "No results for the address", body = ErrorDto),
        (status = 500, description = "Map provider unavailable", body = ErrorDto)
    ),
)]
pub async fn geocode(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<GeocodeRequestDto>,
) -> Result<impl IntoResponse, Error> {
    let result = MapService::new(&state.map_client)
        .geocode(&request.address)
        .await?;

    Ok((StatusCode::OK, Json(result)))
}

/// Resolve coordinates to an address
#[utoipa::path(
    post,
    path = "/api/map/reverse-geocode",
    tag = MAP_TAG,
    request_body = CoordinatesDto,
    responses(
        (status = 200, description = "Address at the coordinates", body = AddressDto),
        (status = 400, description = "Invalid coordinates", body = ErrorDto),
        (status = 404, description = "No address at the coordinates", body = ErrorDto),
        (status = 500, description = "Map provider unavailable", body = ErrorDto)
    ),
)]
pub async fn reverse_geocode(
    State(state): State<AppState>,
    ValidJson(point): ValidJson<CoordinatesDto>,
) -> Result<impl IntoResponse, Error> {
    let address = MapService::new(&state.map_client)
        .reverse_geocode(point)
        .await?;

    Ok((StatusCode::OK, Json(address)))
}

/// Distance and travel time between two points
///
/// Falls back to a straight-line estimate when the provider is unavailable.
#[utoipa::path(
    post,
    path = "/api/map/distance",
    tag = MAP_TAG,
    request_body = DistanceRequestDto,
    responses(
        (status = 200, description = "Distance and duration", body = DistanceDto),
        (status = 400, description = "Invalid coordinates", body = ErrorDto)
    ),
)]
pub async fn distance(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<DistanceRequestDto>,
) -> Result<impl IntoResponse, Error> {
    let distance = MapService::new(&state.map_client)
        .distance(request.origin, request.destination, request.mode)
        .await;

    Ok((StatusCode::OK, Json(distance)))
}

/// Routes between two points
#[utoipa::path(
    post,
    path = "/api/map/route",
    tag = MAP_TAG,
    request_body = DistanceRequestDto,
    responses(
        (status = 200, description = "Routes, or a single estimated leg", body = RouteDto),
        (status = 400, description = "Invalid coordinates", body = ErrorDto)
    ),
)]
pub async fn route(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<DistanceRequestDto>,
) -> Result<impl IntoResponse, Error> {
    let route = MapService::new(&state.map_client)
        .route(request.origin, request.destination, request.mode)
        .await;

    Ok((StatusCode::OK, Json(route)))
}

/// Walking, driving, and transit times between two points
#[utoipa::path(
    post,
    path = "/api/map/travel-times",
    tag = MAP_TAG,
    request_body = TravelTimesRequestDto,
    responses(
        (status = 200, description = "Travel times per mode", body = TravelTimesDto),
        (status = 400, description = "Invalid coordinates", body = ErrorDto)
    ),
)]
pub async fn travel_times(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<TravelTimesRequestDto>,
) -> Result<impl IntoResponse, Error> {
    let times = MapService::new(&state.map_client)
        .travel_times(request.origin, request.destination)
        .await;

    Ok((StatusCode::OK, Json(times)))
}

/// Places around a point, optionally filtered by keyword
#[utoipa::path(
    post,
    path = "/api/map/nearby",
    tag = MAP_TAG,
    request_body = NearbySearchDto,
    responses(
        (status = 200, description = "Nearby places, closest first", body = Vec<NearbyPlaceDto>),
        (status = 400, description = "Invalid coordinates or radius", body = ErrorDto),
        (status = 500, description = "Map provider unavailable", body = ErrorDto)
    ),
)]
pub async fn nearby(
    State(state): State<AppState>,
    ValidJson(search): ValidJson<NearbySearchDto>,
) -> Result<impl IntoResponse, Error> {
    let places = MapService::new(&state.map_client).nearby(search).await?;

    Ok((StatusCode::OK, Json(places)))
}

#[utoipa::path(
    get,
    path = "/api/map/place/{place_id}",
    tag = MAP_TAG,
    params(
        ("place_id" = String, Path, description = "Provider place ID"),
    ),
    responses(
        (status = 200, description = "Place details", body = PlaceDetailDto),
        (status = 404, description = "Unknown place", body = ErrorDto),
        (status = 500, description = "Map provider unavailable", body = ErrorDto)
    ),
)]
pub async fn place_details(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let place = MapService::new(&state.map_client)
        .place_details(&place_id)
        .await?;

    Ok((StatusCode::OK, Json(place)))
}
