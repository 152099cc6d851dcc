//! Shared setup for HTTP-level integration tests.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, Response, StatusCode},
    Router,
};
use habs::server::{
    model::{app::AppState, auth::JwtKeys, db::UserModel},
    router,
    service::{map::client::MapClient, notification::NotificationHub},
};
use habs_test_utils::prelude::*;
use serde::{de::DeserializeOwned, Serialize};
use tower::ServiceExt;

/// Extension trait building the application around a [`TestContext`]
pub trait TestContextExt {
    /// Application state backed by the test database and the mock map provider
    fn state(&self) -> AppState;

    /// The full router with ledger endpoints mounted
    fn app(&self) -> Router;

    /// Bearer token for the given account
    fn token(&self, user: &UserModel) -> String;
}

impl TestContextExt for TestContext {
    fn state(&self) -> AppState {
        let map_client = MapClient::new(
            self.map_url(),
            Some(TEST_MAP_CLIENT_ID.to_string()),
            Some(TEST_MAP_CLIENT_SECRET.to_string()),
        )
        .expect("Failed to build map client");

        AppState {
            db: self.db.clone(),
            jwt: JwtKeys::new(TEST_JWT_SECRET),
            map_client,
            notifier: NotificationHub::new(),
            ledger_enabled: true,
        }
    }

    fn app(&self) -> Router {
        router::routes(true).with_state(self.state())
    }

    fn token(&self, user: &UserModel) -> String {
        JwtKeys::new(TEST_JWT_SECRET)
            .issue(user)
            .expect("Failed to issue token")
    }
}

/// Builds a request with an optional bearer token and JSON body
pub fn request<T: Serialize>(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<&T>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Sends a request through the router
pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

/// Asserts the response status and deserializes its JSON body
pub async fn json_body<T: DeserializeOwned>(resp: Response<Body>, status: StatusCode) -> T {
    assert_eq!(resp.status(), status);

    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Builds a bodiless GET request
pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    request::<()>(Method::GET, uri, token, None)
}
