//! Map provider HTTP mock endpoints.

use mockito::{Matcher, Mock};

use crate::{constant::TEST_MAP_TOKEN, TestContext};

impl TestContext {
    pub fn map(&mut self) -> MapFixtures<'_> {
        MapFixtures { context: self }
    }
}

pub struct MapFixtures<'a> {
    context: &'a mut TestContext,
}

impl<'a> MapFixtures<'a> {
    /// Create the OAuth client-credentials token endpoint, issuing a day-long token.
    pub fn create_token_endpoint(&mut self, expected_requests: usize) -> Mock {
        let body = serde_json::json!({
            "access_token": TEST_MAP_TOKEN,
            "token_type": "bearer",
            "expires_in": 86400,
        });

        self.context
            .server
            .mock("POST", "/advancedmaps/v1/oauth/access_token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create a geocoding endpoint resolving any address to the given coordinates.
    pub fn create_geocode_endpoint(
        &mut self,
        latitude: f64,
        longitude: f64,
        expected_requests: usize,
    ) -> Mock {
        let body = serde_json::json!({
            "results": [{
                "lat": latitude.to_string(),
                "lng": longitude.to_string(),
                "formatted_address": "1 University Road, Delhi",
                "place_id": "test-place",
                "eLoc": "ABC123",
            }]
        });

        self.context
            .server
            .mock("GET", "/advancedmaps/v1/geocoding")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create a driving distance matrix endpoint.
    pub fn create_distance_endpoint(
        &mut self,
        distance_meters: f64,
        duration_seconds: f64,
        expected_requests: usize,
    ) -> Mock {
        let body = serde_json::json!({
            "results": [{ "distance": distance_meters, "duration": duration_seconds }]
        });

        self.context
            .server
            .mock("GET", "/advancedmaps/v1/distance_matrix/driving")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create a routing endpoint returning a single route for any travel mode.
    pub fn create_route_endpoint(
        &mut self,
        distance_meters: f64,
        duration_seconds: f64,
        expected_requests: usize,
    ) -> Mock {
        let body = serde_json::json!({
            "routes": [{
                "distance": distance_meters,
                "duration": duration_seconds,
                "geometry": "_p~iF~ps|U_ulLnnqC",
            }]
        });

        self.context
            .server
            .mock("GET", "/advancedmaps/v1/routing")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create a nearby search endpoint returning two places, closest first.
    pub fn create_nearby_endpoint(&mut self, expected_requests: usize) -> Mock {
        let body = serde_json::json!({
            "suggestedLocations": [
                {
                    "placeName": "Central Library",
                    "placeAddress": "University Road, Delhi",
                    "lat": "28.612",
                    "lng": "77.201",
                    "distance": 320.0,
                    "placeId": "library-1",
                    "eLoc": "LIB001",
                    "categoryCode": "EDULIB",
                    "keywords": ["library"],
                },
                {
                    "placeName": "City Library",
                    "placeAddress": "Ring Road, Delhi",
                    "lat": 28.618,
                    "lng": 77.205,
                    "distance": 850.0,
                    "placeId": "library-2",
                    "categoryCode": "EDULIB",
                },
            ]
        });

        self.context
            .server
            .mock("GET", "/advancedmaps/v1/nearby")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create a place detail endpoint; `name` of `None` answers with no results.
    pub fn create_place_detail_endpoint(
        &mut self,
        name: Option<&str>,
        expected_requests: usize,
    ) -> Mock {
        let results = match name {
            Some(name) => serde_json::json!([{
                "name": name,
                "formatted_address": "1 University Road, Delhi",
                "lat": "28.6139",
                "lng": "77.209",
                "place_id": "test-place",
                "phone": "011-2766-7000",
                "rating": 4.5,
            }]),
            None => serde_json::json!([]),
        };

        self.context
            .server
            .mock("GET", "/advancedmaps/v1/place_detail")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::json!({ "results": results }).to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create an endpoint answering every request to `path` with `status` and an empty body.
    pub fn create_error_endpoint(
        &mut self,
        method: &str,
        path: &str,
        status: usize,
        expected_requests: usize,
    ) -> Mock {
        self.context
            .server
            .mock(method, path)
            .match_query(Matcher::Any)
            .with_status(status)
            .expect(expected_requests)
            .create()
    }
}
