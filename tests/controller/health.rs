use super::*;

#[tokio::test]
/// Expect the health check to report OK without authentication
async fn reports_ok() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let resp = send(test.app(), get("/health", None)).await;

    let body: Value = json_body(resp, StatusCode::OK).await;
    assert_eq!(body["status"], "OK");
    assert!(body["timestamp"].is_string());

    Ok(())
}

#[tokio::test]
/// Expect the OpenAPI document to be served
async fn serves_openapi_document() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let resp = send(test.app(), get("/api/docs/openapi.json", None)).await;

    let body: Value = json_body(resp, StatusCode::OK).await;
    assert!(body["paths"]["/api/bookings/{id}/respond"].is_object());
    assert!(body["paths"]["/api/ledger/bookings/{id}"].is_object());

    Ok(())
}
