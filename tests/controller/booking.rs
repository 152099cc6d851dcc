use entity::sea_orm_active_enums::{BookingStatus, HostelStatus};

use super::*;

fn booking_request(hostel_id: i32) -> Value {
    json!({
        "hostelId": hostel_id,
        "roomType": "double",
        "bedsRequested": 2,
        "duration": { "checkIn": "2026-01-01", "checkOut": "2026-07-01", "months": 6 }
    })
}

#[tokio::test]
/// Expect a student's request to be priced, then approved by the owner with rooms reserved
async fn request_then_approve() -> Result<(), TestError> {
    let test = TestBuilder::new().with_booking_tables().build().await?;
    let student = test.user().insert_student("student@example.com").await?;
    let owner = test.user().insert_owner("owner@example.com").await?;
    let (hostel, _) = test.hostel().insert_approved_hostel(owner.id).await?;
    let app = test.app();

    let resp = send(
        app.clone(),
        request(
            Method::POST,
            "/api/bookings",
            Some(&test.token(&student)),
            Some(&booking_request(hostel.id)),
        ),
    )
    .await;
    let booking: Value = json_body(resp, StatusCode::CREATED).await;
    assert_eq!(booking["status"], "pending");
    assert_eq!(booking["pricing"]["finalAmount"], 89680.0);

    let uri = format!("/api/bookings/{}/respond", booking["id"]);
    let resp = send(
        app.clone(),
        request(
            Method::PUT,
            &uri,
            Some(&test.token(&owner)),
            Some(&json!({ "action": "approve", "message": "Welcome" })),
        ),
    )
    .await;
    let approved: Value = json_body(resp, StatusCode::OK).await;
    assert_eq!(approved["status"], "approved");

    let resp = send(app, get(&format!("/api/hostels/{}", hostel.id), None)).await;
    let detail: Value = json_body(resp, StatusCode::OK).await;
    assert_eq!(detail["hostel"]["roomTypes"][0]["availableRooms"], 9);

    Ok(())
}

#[tokio::test]
/// Expect role guards to refuse owners creating bookings and students responding to them
async fn enforces_roles() -> Result<(), TestError> {
    let test = TestBuilder::new().with_booking_tables().build().await?;
    let student = test.user().insert_student("student@example.com").await?;
    let owner = test.user().insert_owner("owner@example.com").await?;
    let (hostel, room_type) = test.hostel().insert_approved_hostel(owner.id).await?;
    let booking = test
        .booking()
        .insert_booking(student.id, &hostel, &room_type, 2, BookingStatus::Pending)
        .await?;
    let app = test.app();

    let resp = send(
        app.clone(),
        request(
            Method::POST,
            "/api/bookings",
            Some(&test.token(&owner)),
            Some(&booking_request(hostel.id)),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = send(
        app,
        request(
            Method::PUT,
            &format!("/api/bookings/{}/respond", booking.id),
            Some(&test.token(&student)),
            Some(&json!({ "action": "approve" })),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}

#[tokio::test]
/// Expect another owner's response and a stranger's read to look like a missing booking
async fn hides_bookings_from_other_accounts() -> Result<(), TestError> {
    let test = TestBuilder::new().with_booking_tables().build().await?;
    let student = test.user().insert_student("student@example.com").await?;
    let stranger = test.user().insert_student("stranger@example.com").await?;
    let owner = test.user().insert_owner("owner@example.com").await?;
    let other_owner = test.user().insert_owner("other@example.com").await?;
    let (hostel, room_type) = test.hostel().insert_approved_hostel(owner.id).await?;
    let booking = test
        .booking()
        .insert_booking(student.id, &hostel, &room_type, 2, BookingStatus::Pending)
        .await?;
    let app = test.app();

    let resp = send(
        app.clone(),
        request(
            Method::PUT,
            &format!("/api/bookings/{}/respond", booking.id),
            Some(&test.token(&other_owner)),
            Some(&json!({ "action": "reject", "message": "No" })),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let uri = format!("/api/bookings/{}", booking.id);
    let resp = send(app.clone(), get(&uri, Some(&test.token(&stranger)))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = send(app, get(&uri, Some(&test.token(&student)))).await;
    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
/// Expect requests for hostels awaiting moderation to be refused
async fn rejects_unapproved_hostels() -> Result<(), TestError> {
    let test = TestBuilder::new().with_booking_tables().build().await?;
    let student = test.user().insert_student("student@example.com").await?;
    let owner = test.user().insert_owner("owner@example.com").await?;
    let hostel = test
        .hostel()
        .insert_hostel(owner.id, "Pending Hostel", HostelStatus::Pending)
        .await?;

    let resp = send(
        test.app(),
        request(
            Method::POST,
            "/api/bookings",
            Some(&test.token(&student)),
            Some(&booking_request(hostel.id)),
        ),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
/// Expect a student's booking list to include only their own requests
async fn lists_own_bookings() -> Result<(), TestError> {
    let test = TestBuilder::new().with_booking_tables().build().await?;
    let student = test.user().insert_student("student@example.com").await?;
    let other = test.user().insert_student("other@example.com").await?;
    let owner = test.user().insert_owner("owner@example.com").await?;
    let (hostel, room_type) = test.hostel().insert_approved_hostel(owner.id).await?;
    test.booking()
        .insert_booking(student.id, &hostel, &room_type, 1, BookingStatus::Pending)
        .await?;
    test.booking()
        .insert_booking(other.id, &hostel, &room_type, 1, BookingStatus::Pending)
        .await?;

    let resp = send(
        test.app(),
        get("/api/bookings/my-bookings", Some(&test.token(&student))),
    )
    .await;

    let body: Value = json_body(resp, StatusCode::OK).await;
    assert_eq!(body["bookings"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["pagination"]["totalItems"], 1);

    Ok(())
}
