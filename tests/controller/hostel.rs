use entity::sea_orm_active_enums::{BookingStatus, HostelStatus, RoomType};

use super::*;

fn new_hostel() -> Value {
    json!({
        "name": "Sunrise Residency",
        "hostelType": "coed",
        "description": "Quiet rooms a short walk from the north campus",
        "location": {
            "address": "12 Mall Road",
            "city": "Delhi",
            "state": "Delhi",
            "pincode": "110007",
            "latitude": 28.6889,
            "longitude": 77.2100
        },
        "roomTypes": [{
            "roomType": "single",
            "totalRooms": 5,
            "bedsPerRoom": 1,
            "pricePerBed": 7000.0
        }]
    })
}

fn double_tier(total_rooms: i32, price_per_bed: f64) -> Value {
    json!({
        "roomTypes": [{
            "roomType": "double",
            "totalRooms": total_rooms,
            "bedsPerRoom": 2,
            "pricePerBed": price_per_bed,
            "securityDeposit": 4000.0
        }]
    })
}

#[tokio::test]
/// Expect search to list approved hostels only and apply name and price filters
async fn search_filters() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    let owner = test.user().insert_owner("owner@example.com").await?;
    test.hostel().insert_approved_hostel(owner.id).await?;
    let budget = test
        .hostel()
        .insert_hostel(owner.id, "Budget Stay", HostelStatus::Approved)
        .await?;
    test.hostel()
        .insert_room_type(budget.id, RoomType::Single, 4, 4, 1, 3000.0, 1000.0)
        .await?;
    test.hostel()
        .insert_hostel(owner.id, "Budget Pending", HostelStatus::Pending)
        .await?;
    let app = test.app();

    let resp = send(app.clone(), get("/api/hostels", None)).await;
    let all: Value = json_body(resp, StatusCode::OK).await;
    assert_eq!(all["pagination"]["totalItems"], 2);

    let resp = send(app.clone(), get("/api/hostels?search=budget", None)).await;
    let by_name: Value = json_body(resp, StatusCode::OK).await;
    assert_eq!(by_name["pagination"]["totalItems"], 1);
    assert_eq!(by_name["hostels"][0]["id"], budget.id);

    let resp = send(app, get("/api/hostels?maxPrice=4000", None)).await;
    let by_price: Value = json_body(resp, StatusCode::OK).await;
    assert_eq!(by_price["pagination"]["totalItems"], 1);
    assert_eq!(by_price["hostels"][0]["name"], "Budget Stay");

    Ok(())
}

#[tokio::test]
/// Expect only hostel owners to submit listings, which start pending
async fn create_requires_owner() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    let owner = test.user().insert_owner("owner@example.com").await?;
    let student = test.user().insert_student("student@example.com").await?;
    let app = test.app();

    let resp = send(
        app.clone(),
        request(Method::POST, "/api/hostels", None, Some(&new_hostel())),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = send(
        app.clone(),
        request(
            Method::POST,
            "/api/hostels",
            Some(&test.token(&student)),
            Some(&new_hostel()),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = send(
        app.clone(),
        request(
            Method::POST,
            "/api/hostels",
            Some(&test.token(&owner)),
            Some(&new_hostel()),
        ),
    )
    .await;
    let created: Value = json_body(resp, StatusCode::CREATED).await;
    assert_eq!(created["status"], "pending");
    assert_eq!(created["roomTypes"][0]["availableRooms"], 5);

    let resp = send(app, get("/api/hostels", None)).await;
    let listed: Value = json_body(resp, StatusCode::OK).await;
    assert_eq!(listed["pagination"]["totalItems"], 0);

    Ok(())
}

#[tokio::test]
/// Expect updates to be limited to the hostel's own owner
async fn update_requires_ownership() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    let owner = test.user().insert_owner("owner@example.com").await?;
    let other_owner = test.user().insert_owner("other@example.com").await?;
    let student = test.user().insert_student("student@example.com").await?;
    let (hostel, _) = test.hostel().insert_approved_hostel(owner.id).await?;
    let uri = format!("/api/hostels/{}", hostel.id);
    let changes = json!({ "name": "Renamed Hostel" });
    let app = test.app();

    let resp = send(
        app.clone(),
        request(Method::PUT, &uri, Some(&test.token(&student)), Some(&changes)),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = send(
        app.clone(),
        request(Method::PUT, &uri, Some(&test.token(&other_owner)), Some(&changes)),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = send(
        app,
        request(Method::PUT, &uri, Some(&test.token(&owner)), Some(&changes)),
    )
    .await;
    let updated: Value = json_body(resp, StatusCode::OK).await;
    assert_eq!(updated["name"], "Renamed Hostel");

    Ok(())
}

#[tokio::test]
/// Expect a price change to keep rooms held by an approved booking and a cut below them to fail
async fn update_keeps_held_rooms() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    let owner = test.user().insert_owner("owner@example.com").await?;
    let student = test.user().insert_student("student@example.com").await?;
    let hostel = test
        .hostel()
        .insert_hostel(owner.id, "Held Rooms", HostelStatus::Approved)
        .await?;
    let room_type = test
        .hostel()
        .insert_room_type(hostel.id, RoomType::Double, 10, 8, 2, 6000.0, 4000.0)
        .await?;
    test.booking()
        .insert_booking(student.id, &hostel, &room_type, 3, BookingStatus::Approved)
        .await?;
    let uri = format!("/api/hostels/{}", hostel.id);
    let token = test.token(&owner);
    let app = test.app();

    let resp = send(
        app.clone(),
        request(Method::PUT, &uri, Some(&token), Some(&double_tier(10, 6500.0))),
    )
    .await;
    let updated: Value = json_body(resp, StatusCode::OK).await;
    assert_eq!(updated["roomTypes"][0]["id"], room_type.id);
    assert_eq!(updated["roomTypes"][0]["availableRooms"], 8);
    assert_eq!(updated["roomTypes"][0]["pricePerBed"], 6500.0);

    let resp = send(
        app,
        request(Method::PUT, &uri, Some(&token), Some(&double_tier(1, 6500.0))),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
/// Expect deletion to be refused while bookings are active and allowed afterwards
async fn delete_checks_active_bookings() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    let owner = test.user().insert_owner("owner@example.com").await?;
    let student = test.user().insert_student("student@example.com").await?;
    let (busy, room_type) = test.hostel().insert_approved_hostel(owner.id).await?;
    let idle = test
        .hostel()
        .insert_hostel(owner.id, "Idle Hostel", HostelStatus::Approved)
        .await?;
    test.booking()
        .insert_booking(student.id, &busy, &room_type, 1, BookingStatus::Pending)
        .await?;
    let token = test.token(&owner);
    let app = test.app();

    let resp = send(
        app.clone(),
        request::<()>(
            Method::DELETE,
            &format!("/api/hostels/{}", busy.id),
            Some(&test.token(&student)),
            None,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = send(
        app.clone(),
        request::<()>(
            Method::DELETE,
            &format!("/api/hostels/{}", busy.id),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = send(
        app.clone(),
        request::<()>(
            Method::DELETE,
            &format!("/api/hostels/{}", idle.id),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(app, get(&format!("/api/hostels/{}", idle.id), None)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}
