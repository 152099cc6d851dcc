//! Geocoding, distances, and routing with straight-line fallbacks.
//!
//! Geocoding has no sensible fallback and fails with the provider. Distance, route, and travel
//! time lookups degrade to a haversine estimate so callers always receive an answer.

pub mod client;

use entity::types::{NearbyInstitution, NearbyInstitutions, TravelTimes};

use crate::{
    model::map::{
        AddressDto, CoordinatesDto, DistanceDto, GeocodeDto, NearbyPlaceDto, NearbySearchDto,
        PlaceDetailDto, RouteDto, RouteLegDto, TravelMode, TravelTimesDto,
    },
    server::{
        error::Error,
        service::map::client::MapClient,
        util::geo::{self, estimate_minutes, format_distance, format_duration, haversine_km},
    },
};

/// Public transport is assumed to take this much longer than driving the same road distance
const TRANSIT_FACTOR: f64 = 1.5;

/// Universities within this distance of a hostel are cached on the listing
pub const NEARBY_UNIVERSITY_KM: f64 = 50.0;
/// Departments within this distance of a hostel are cached on the listing
pub const NEARBY_DEPARTMENT_KM: f64 = 25.0;

pub struct MapService<'a> {
    client: &'a MapClient,
}

impl<'a> MapService<'a> {
    /// Creates a new instance of [`MapService`]
    pub fn new(client: &'a MapClient) -> Self {
        Self { client }
    }

    pub async fn geocode(&self, address: &str) -> Result<GeocodeDto, Error> {
        Ok(self.client.geocode(address).await?)
    }

    pub async fn reverse_geocode(&self, point: CoordinatesDto) -> Result<AddressDto, Error> {
        Ok(self.client.reverse_geocode(point).await?)
    }

    /// Places near a point; like geocoding this has no estimate to fall back to
    pub async fn nearby(&self, search: NearbySearchDto) -> Result<Vec<NearbyPlaceDto>, Error> {
        let point = CoordinatesDto {
            latitude: search.latitude,
            longitude: search.longitude,
        };

        Ok(self
            .client
            .nearby(point, search.radius, search.keyword.trim())
            .await?)
    }

    pub async fn place_details(&self, place_id: &str) -> Result<PlaceDetailDto, Error> {
        Ok(self.client.place_details(place_id).await?)
    }

    /// Distance and duration between two points, estimated when the provider fails
    pub async fn distance(
        &self,
        origin: CoordinatesDto,
        destination: CoordinatesDto,
        mode: TravelMode,
    ) -> DistanceDto {
        let result = match mode {
            TravelMode::Driving => self.client.driving_distance(origin, destination).await,
            TravelMode::Transit => self
                .client
                .driving_distance(origin, destination)
                .await
                .map(|(meters, seconds)| (meters, seconds * TRANSIT_FACTOR)),
            TravelMode::Walking => self
                .client
                .route(origin, destination, TravelMode::Walking)
                .await
                .map(|routes| {
                    routes
                        .first()
                        .map(|fastest| (fastest.distance_meters, fastest.duration_seconds))
                        .unwrap_or_default()
                }),
        };

        match result {
            Ok((distance_meters, duration_seconds)) => DistanceDto {
                distance_meters,
                duration_seconds,
                distance_text: format_distance(distance_meters),
                duration_text: format_duration(duration_seconds),
                estimated: false,
            },
            Err(err) => {
                tracing::warn!(mode = ?mode, "Falling back to estimated distance: {}", err);

                geo::estimate(straight_line_km(origin, destination), mode)
            }
        }
    }

    /// Alternative routes between two points, or a single estimated leg when the provider fails
    pub async fn route(
        &self,
        origin: CoordinatesDto,
        destination: CoordinatesDto,
        mode: TravelMode,
    ) -> RouteDto {
        match self.client.route(origin, destination, mode).await {
            Ok(mut routes) => {
                if mode == TravelMode::Transit {
                    for route in &mut routes {
                        route.duration_seconds *= TRANSIT_FACTOR;
                    }
                }

                RouteDto {
                    routes,
                    estimated: false,
                }
            }
            Err(err) => {
                tracing::warn!(mode = ?mode, "Falling back to estimated route: {}", err);

                let estimate = geo::estimate(straight_line_km(origin, destination), mode);

                RouteDto {
                    routes: vec![RouteLegDto {
                        distance_meters: estimate.distance_meters,
                        duration_seconds: estimate.duration_seconds,
                        geometry: None,
                    }],
                    estimated: true,
                }
            }
        }
    }

    /// Walking, driving, and transit durations between two points.
    ///
    /// Transit is derived from the driving result rather than requested separately.
    pub async fn travel_times(
        &self,
        origin: CoordinatesDto,
        destination: CoordinatesDto,
    ) -> TravelTimesDto {
        let driving = self.distance(origin, destination, TravelMode::Driving).await;
        let walking = self.distance(origin, destination, TravelMode::Walking).await;

        let transit = if driving.estimated {
            geo::estimate(straight_line_km(origin, destination), TravelMode::Transit)
        } else {
            let duration_seconds = driving.duration_seconds * TRANSIT_FACTOR;

            DistanceDto {
                duration_seconds,
                duration_text: format_duration(duration_seconds),
                ..driving.clone()
            }
        };

        TravelTimesDto {
            walking,
            driving,
            transit,
        }
    }
}

fn straight_line_km(origin: CoordinatesDto, destination: CoordinatesDto) -> f64 {
    haversine_km(
        origin.latitude,
        origin.longitude,
        destination.latitude,
        destination.longitude,
    )
}

/// A university or department that can be cached as nearby when it has coordinates.
pub struct LocatedInstitution<'n> {
    pub id: i32,
    pub name: &'n str,
    pub latitude: f64,
    pub longitude: f64,
}

/// Institutions within `max_km` of `origin`, closest first, with estimated travel times.
///
/// Travel times use the per-mode average speeds so a listing with many nearby institutions does
/// not fan out into one provider request per institution.
pub fn nearby_institutions<'n>(
    origin: CoordinatesDto,
    candidates: impl IntoIterator<Item = LocatedInstitution<'n>>,
    max_km: f64,
) -> NearbyInstitutions {
    let mut nearby: Vec<NearbyInstitution> = candidates
        .into_iter()
        .filter_map(|institution| {
            let distance_km = haversine_km(
                origin.latitude,
                origin.longitude,
                institution.latitude,
                institution.longitude,
            );

            (distance_km <= max_km).then(|| NearbyInstitution {
                institution_id: institution.id,
                name: institution.name.to_string(),
                distance_km: crate::server::util::money::round2(distance_km),
                travel_time: TravelTimes {
                    walking_minutes: estimate_minutes(distance_km, TravelMode::Walking),
                    driving_minutes: estimate_minutes(distance_km, TravelMode::Driving),
                    transit_minutes: estimate_minutes(distance_km, TravelMode::Transit),
                },
            })
        })
        .collect();

    nearby.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

    NearbyInstitutions(nearby)
}

#[cfg(test)]
mod tests {
    use habs_test_utils::prelude::*;

    use super::*;

    const ORIGIN: CoordinatesDto = CoordinatesDto {
        latitude: 28.6139,
        longitude: 77.2090,
    };
    const DESTINATION: CoordinatesDto = CoordinatesDto {
        latitude: 28.6889,
        longitude: 77.2100,
    };

    fn configured_client(test: &TestContext) -> MapClient {
        MapClient::new(
            test.map_url(),
            Some(TEST_MAP_CLIENT_ID.to_string()),
            Some(TEST_MAP_CLIENT_SECRET.to_string()),
        )
        .unwrap()
    }

    mod distance {
        use super::*;

        /// Expect a provider distance to be returned unestimated with formatted text
        #[tokio::test]
        async fn uses_provider_result() -> Result<(), TestError> {
            let mut test = TestBuilder::new().with_map_token_endpoint(1).build().await?;
            let mock = test.map().create_distance_endpoint(8400.0, 1260.0, 1);

            let client = configured_client(&test);
            let result = MapService::new(&client)
                .distance(ORIGIN, DESTINATION, TravelMode::Driving)
                .await;

            assert!(!result.estimated);
            assert_eq!(result.distance_text, "8.4 km");
            assert_eq!(result.duration_text, "21 min");
            mock.assert();

            Ok(())
        }

        /// Expect a provider failure to degrade to a haversine estimate
        #[tokio::test]
        async fn falls_back_on_provider_error() -> Result<(), TestError> {
            let mut test = TestBuilder::new().with_map_token_endpoint(1).build().await?;
            let mock = test.map().create_error_endpoint(
                "GET",
                "/advancedmaps/v1/distance_matrix/driving",
                500,
                1,
            );

            let client = configured_client(&test);
            let result = MapService::new(&client)
                .distance(ORIGIN, DESTINATION, TravelMode::Driving)
                .await;

            let expected = geo::estimate(straight_line_km(ORIGIN, DESTINATION), TravelMode::Driving);
            assert!(result.estimated);
            assert_eq!(result, expected);
            mock.assert();

            Ok(())
        }
    }

    mod travel_times {
        use super::*;

        /// Expect transit to be derived from the driving duration
        #[tokio::test]
        async fn derives_transit_from_driving() -> Result<(), TestError> {
            let mut test = TestBuilder::new().with_map_token_endpoint(1).build().await?;
            test.map().create_distance_endpoint(8400.0, 1200.0, 1);
            test.map().create_route_endpoint(8000.0, 6000.0, 1);

            let client = configured_client(&test);
            let result = MapService::new(&client)
                .travel_times(ORIGIN, DESTINATION)
                .await;

            assert_eq!(result.driving.duration_seconds, 1200.0);
            assert_eq!(result.walking.duration_seconds, 6000.0);
            assert_eq!(result.transit.duration_seconds, 1800.0);
            assert_eq!(result.transit.duration_text, "30 min");
            assert!(!result.transit.estimated);

            Ok(())
        }

        /// Expect every mode to be estimated when the provider is not configured
        #[tokio::test]
        async fn estimates_without_provider() -> Result<(), TestError> {
            let test = TestBuilder::new().build().await?;

            let client = MapClient::new(test.map_url(), None, None).unwrap();
            let result = MapService::new(&client)
                .travel_times(ORIGIN, DESTINATION)
                .await;

            assert!(result.walking.estimated);
            assert!(result.driving.estimated);
            assert!(result.transit.estimated);
            assert!(result.walking.duration_seconds > result.transit.duration_seconds);
            assert!(result.transit.duration_seconds > result.driving.duration_seconds);

            Ok(())
        }
    }

    mod nearby_institutions {
        use super::*;

        /// Expect institutions beyond the radius to be excluded and the rest sorted by distance
        #[test]
        fn filters_and_sorts_by_distance() {
            let candidates = vec![
                LocatedInstitution {
                    id: 1,
                    name: "Far University",
                    latitude: 19.0760,
                    longitude: 72.8777,
                },
                LocatedInstitution {
                    id: 2,
                    name: "North Campus",
                    latitude: 28.6889,
                    longitude: 77.2100,
                },
                LocatedInstitution {
                    id: 3,
                    name: "Next Door",
                    latitude: 28.6140,
                    longitude: 77.2091,
                },
            ];

            let nearby = nearby_institutions(ORIGIN, candidates, NEARBY_UNIVERSITY_KM).0;

            assert_eq!(nearby.len(), 2);
            assert_eq!(nearby[0].institution_id, 3);
            assert_eq!(nearby[1].institution_id, 2);
            assert!(nearby[1].travel_time.walking_minutes > nearby[1].travel_time.driving_minutes);
        }
    }
}
