use super::*;

#[tokio::test]
/// Expect registration to return a token usable on the profile endpoint
async fn registers_and_fetches_profile() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let app = test.app();

    let registration = json!({
        "name": "Asha Rao",
        "email": "Asha@Example.com",
        "password": "secret123",
        "role": "student",
        "phone": "9876543210"
    });
    let resp = send(
        app.clone(),
        request(Method::POST, "/api/auth/register", None, Some(&registration)),
    )
    .await;
    let body: Value = json_body(resp, StatusCode::CREATED).await;
    assert_eq!(body["user"]["email"], "asha@example.com");
    assert!(body["user"].get("passwordHash").is_none());

    let token = body["token"].as_str().unwrap();
    let resp = send(app, get("/api/auth/me", Some(token))).await;
    let me: Value = json_body(resp, StatusCode::OK).await;
    assert_eq!(me["name"], "Asha Rao");
    assert_eq!(me["role"], "student");

    Ok(())
}

#[tokio::test]
/// Expect login with the fixture password to succeed and a wrong password to be rejected
async fn logs_in_with_password() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    test.user().insert_student("student@example.com").await?;
    let app = test.app();

    let credentials = json!({ "email": "student@example.com", "password": TEST_PASSWORD });
    let resp = send(
        app.clone(),
        request(Method::POST, "/api/auth/login", None, Some(&credentials)),
    )
    .await;
    let body: Value = json_body(resp, StatusCode::OK).await;
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));

    let credentials = json!({ "email": "student@example.com", "password": "wrong-password" });
    let resp = send(
        app,
        request(Method::POST, "/api/auth/login", None, Some(&credentials)),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
/// Expect students to be refused by the administrator login
async fn admin_login_rejects_students() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    test.user().insert_student("student@example.com").await?;

    let credentials = json!({ "email": "student@example.com", "password": TEST_PASSWORD });
    let resp = send(
        test.app(),
        request(Method::POST, "/api/auth/admin-login", None, Some(&credentials)),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}

#[tokio::test]
/// Expect 401 without a token and with a token signed by another secret
async fn requires_valid_token() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let student = test.user().insert_student("student@example.com").await?;
    let forged = habs::server::model::auth::JwtKeys::new("not-the-secret")
        .issue(&student)
        .unwrap();

    let resp = send(test.app(), get("/api/auth/me", None)).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = send(test.app(), get("/api/auth/me", Some(&forged))).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
/// Expect malformed JSON to be answered with 400 rather than axum's default rejection
async fn malformed_body_is_bad_request() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;

    let resp = send(
        test.app(),
        request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(&json!({ "email": "student@example.com" })),
        ),
    )
    .await;

    let body: Value = json_body(resp, StatusCode::BAD_REQUEST).await;
    assert!(body["message"].is_string());

    Ok(())
}
