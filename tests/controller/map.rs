use super::*;

fn points() -> Value {
    json!({
        "origin": { "latitude": 28.6139, "longitude": 77.2090 },
        "destination": { "latitude": 28.5355, "longitude": 77.3910 }
    })
}

#[tokio::test]
/// Expect an estimate when the map provider cannot be reached
async fn distance_falls_back_to_estimate() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let resp = send(
        test.app(),
        request(Method::POST, "/api/map/distance", None, Some(&points())),
    )
    .await;

    let body: Value = json_body(resp, StatusCode::OK).await;
    assert_eq!(body["estimated"], true);
    assert!(body["distanceMeters"].as_f64().is_some_and(|d| d > 15_000.0));

    Ok(())
}

#[tokio::test]
/// Expect transit estimates to take longer than driving
async fn travel_times_per_mode() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let resp = send(
        test.app(),
        request(Method::POST, "/api/map/travel-times", None, Some(&points())),
    )
    .await;

    let body: Value = json_body(resp, StatusCode::OK).await;
    let driving = body["driving"]["durationSeconds"].as_f64().unwrap();
    let transit = body["transit"]["durationSeconds"].as_f64().unwrap();
    let walking = body["walking"]["durationSeconds"].as_f64().unwrap();
    assert!(transit > driving);
    assert!(walking > driving);

    Ok(())
}

#[tokio::test]
/// Expect out of range coordinates to be rejected
async fn rejects_invalid_coordinates() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let body = json!({
        "origin": { "latitude": 128.0, "longitude": 77.2090 },
        "destination": { "latitude": 28.5355, "longitude": 77.3910 }
    });
    let resp = send(
        test.app(),
        request(Method::POST, "/api/map/distance", None, Some(&body)),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
/// Expect geocoding to resolve through the provider
async fn geocodes_address() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_map_token_endpoint(1)
        .with_geocode_endpoint(28.6139, 77.2090, 1)
        .build()
        .await?;

    let resp = send(
        test.app(),
        request(
            Method::POST,
            "/api/map/geocode",
            None,
            Some(&json!({ "address": "Connaught Place, New Delhi" })),
        ),
    )
    .await;

    let body: Value = json_body(resp, StatusCode::OK).await;
    assert_eq!(body["latitude"], 28.6139);
    assert_eq!(body["longitude"], 77.2090);
    test.assert_mocks();

    Ok(())
}

#[tokio::test]
/// Expect nearby places from the provider, closest first
async fn searches_nearby_places() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_map_token_endpoint(1).build().await?;
    let mock = test.map().create_nearby_endpoint(1);

    let resp = send(
        test.app(),
        request(
            Method::POST,
            "/api/map/nearby",
            None,
            Some(&json!({ "latitude": 28.61, "longitude": 77.2, "keyword": "library" })),
        ),
    )
    .await;

    let body: Value = json_body(resp, StatusCode::OK).await;
    assert_eq!(body.as_array().map(Vec::len), Some(2));
    assert_eq!(body[0]["name"], "Central Library");
    assert_eq!(body[0]["placeId"], "library-1");
    mock.assert();

    Ok(())
}

#[tokio::test]
/// Expect a radius outside the accepted range to be rejected before calling the provider
async fn rejects_oversized_radius() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let resp = send(
        test.app(),
        request(
            Method::POST,
            "/api/map/nearby",
            None,
            Some(&json!({ "latitude": 28.61, "longitude": 77.2, "radius": 500000 })),
        ),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
/// Expect place details for a known place and 404 for an unknown one
async fn place_details() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_map_token_endpoint(1).build().await?;
    let mock = test.map().create_place_detail_endpoint(Some("University of Delhi"), 1);

    let resp = send(test.app(), get("/api/map/place/test-place", None)).await;

    let body: Value = json_body(resp, StatusCode::OK).await;
    assert_eq!(body["name"], "University of Delhi");
    assert_eq!(body["placeId"], "test-place");
    assert_eq!(body["latitude"], 28.6139);
    mock.assert();

    let mut test = TestBuilder::new().with_map_token_endpoint(1).build().await?;
    let mock = test.map().create_place_detail_endpoint(None, 1);

    let resp = send(test.app(), get("/api/map/place/missing", None)).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    mock.assert();

    Ok(())
}
