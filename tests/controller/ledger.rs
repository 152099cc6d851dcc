use entity::sea_orm_active_enums::BookingStatus;

use super::*;

#[tokio::test]
/// Expect an approved booking to be recorded and then verify against its terms
async fn records_and_verifies_booking() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    let student = test.user().insert_student("student@example.com").await?;
    let owner = test.user().insert_owner("owner@example.com").await?;
    let (hostel, room_type) = test.hostel().insert_approved_hostel(owner.id).await?;
    let booking = test
        .booking()
        .insert_booking(student.id, &hostel, &room_type, 1, BookingStatus::Approved)
        .await?;
    let token = test.token(&student);
    let app = test.app();

    let uri = format!("/api/ledger/bookings/{}", booking.id);
    let resp = send(
        app.clone(),
        request::<()>(Method::POST, &uri, Some(&token), None),
    )
    .await;
    let record: Value = json_body(resp, StatusCode::OK).await;
    assert_eq!(record["txHash"].as_str().map(str::len), Some(64));
    assert_eq!(record["blockNumber"], 1);

    let resp = send(app, get(&format!("{}/verify", uri), Some(&token))).await;
    let verification: Value = json_body(resp, StatusCode::OK).await;
    assert_eq!(verification["verified"], true);
    assert_eq!(verification["txHash"], record["txHash"]);

    Ok(())
}

#[tokio::test]
/// Expect pending bookings to have no terms to record
async fn refuses_pending_booking() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    let student = test.user().insert_student("student@example.com").await?;
    let owner = test.user().insert_owner("owner@example.com").await?;
    let (hostel, room_type) = test.hostel().insert_approved_hostel(owner.id).await?;
    let booking = test
        .booking()
        .insert_booking(student.id, &hostel, &room_type, 1, BookingStatus::Pending)
        .await?;

    let resp = send(
        test.app(),
        request::<()>(
            Method::POST,
            &format!("/api/ledger/bookings/{}", booking.id),
            Some(&test.token(&student)),
            None,
        ),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
/// Expect ledger routes to be absent when the ledger is disabled
async fn not_mounted_when_disabled() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    let student = test.user().insert_student("student@example.com").await?;

    let mut state = test.state();
    state.ledger_enabled = false;
    let app = habs::server::router::routes(false).with_state(state);

    let resp = send(
        app,
        get("/api/ledger/bookings/1/verify", Some(&test.token(&student))),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
/// Expect a recorded fingerprint to be found by hash by a participant but not by others
async fn looks_up_transaction() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    let student = test.user().insert_student("student@example.com").await?;
    let outsider = test.user().insert_student("outsider@example.com").await?;
    let owner = test.user().insert_owner("owner@example.com").await?;
    let (hostel, room_type) = test.hostel().insert_approved_hostel(owner.id).await?;
    let booking = test
        .booking()
        .insert_booking(student.id, &hostel, &room_type, 1, BookingStatus::Approved)
        .await?;
    let app = test.app();

    let resp = send(
        app.clone(),
        request::<()>(
            Method::POST,
            &format!("/api/ledger/bookings/{}", booking.id),
            Some(&test.token(&owner)),
            None,
        ),
    )
    .await;
    let record: Value = json_body(resp, StatusCode::OK).await;
    let uri = format!(
        "/api/ledger/transactions/{}",
        record["txHash"].as_str().unwrap()
    );

    let resp = send(app.clone(), get(&uri, Some(&test.token(&student)))).await;
    let transaction: Value = json_body(resp, StatusCode::OK).await;
    assert_eq!(transaction["bookingId"], booking.id);
    assert_eq!(transaction["blockNumber"], record["blockNumber"]);
    assert_eq!(transaction["confirmations"], 1);

    let resp = send(app.clone(), get(&uri, Some(&test.token(&outsider)))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = send(
        app,
        get("/api/ledger/transactions/xyz", Some(&test.token(&student))),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}
