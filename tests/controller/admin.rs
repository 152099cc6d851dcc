use entity::sea_orm_active_enums::HostelStatus;

use super::*;

#[tokio::test]
/// Expect non-admins to be refused the dashboard
async fn dashboard_requires_admin() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    let owner = test.user().insert_owner("owner@example.com").await?;
    let admin = test.user().insert_admin("admin@example.com").await?;

    let resp = send(
        test.app(),
        get("/api/admin/dashboard", Some(&test.token(&owner))),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = send(
        test.app(),
        get("/api/admin/dashboard", Some(&test.token(&admin))),
    )
    .await;
    let stats: Value = json_body(resp, StatusCode::OK).await;
    assert_eq!(stats["users"]["owners"], 1);

    Ok(())
}

#[tokio::test]
/// Expect an approved hostel to become publicly visible
async fn approves_pending_hostel() -> Result<(), TestError> {
    let test = TestBuilder::new().with_booking_tables().build().await?;
    let owner = test.user().insert_owner("owner@example.com").await?;
    let admin = test.user().insert_admin("admin@example.com").await?;
    let hostel = test
        .hostel()
        .insert_hostel(owner.id, "Pending Hostel", HostelStatus::Pending)
        .await?;
    let app = test.app();
    let uri = format!("/api/hostels/{}", hostel.id);

    let resp = send(app.clone(), get(&uri, None)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = send(
        app.clone(),
        get("/api/admin/hostels/pending", Some(&test.token(&admin))),
    )
    .await;
    let pending: Value = json_body(resp, StatusCode::OK).await;
    assert_eq!(pending["hostels"][0]["id"], hostel.id);

    let resp = send(
        app.clone(),
        request(
            Method::PUT,
            &format!("/api/admin/hostels/{}/approve", hostel.id),
            Some(&test.token(&admin)),
            Some(&json!({ "notes": "Documents checked" })),
        ),
    )
    .await;
    let approved: Value = json_body(resp, StatusCode::OK).await;
    assert_eq!(approved["status"], "approved");

    let resp = send(app, get(&uri, None)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
/// Expect a suspended account to lose access on its next request
async fn suspension_revokes_access() -> Result<(), TestError> {
    let test = TestBuilder::new().with_booking_tables().build().await?;
    let student = test.user().insert_student("student@example.com").await?;
    let admin = test.user().insert_admin("admin@example.com").await?;
    let student_token = test.token(&student);
    let app = test.app();

    let resp = send(
        app.clone(),
        request(
            Method::PUT,
            &format!("/api/admin/users/{}/suspend", student.id),
            Some(&test.token(&admin)),
            Some(&json!({ "suspended": true, "reason": "Spam" })),
        ),
    )
    .await;
    let user: Value = json_body(resp, StatusCode::OK).await;
    assert_eq!(user["isSuspended"], true);

    let resp = send(app, get("/api/auth/me", Some(&student_token))).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}
