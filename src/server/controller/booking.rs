use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        booking::{
            BookingDetailDto, BookingDto, BookingListDto, BookingMessageDto, BookingQuery,
            CancelBookingDto, CheckInDto, CheckOutDto, CheckOutResultDto, CompleteBookingDto,
            CreateBookingDto, RecordPaymentDto, RespondBookingDto, ReviewDto, UpdateBookingDto,
        },
    },
    server::{
        controller::util::json::ValidJson,
        error::Error,
        model::{app::AppState, auth::AuthUser},
        service::booking::BookingService,
    },
};

pub static BOOKING_TAG: &str = "booking";

fn booking_service(state: &AppState) -> BookingService<'_> {
    BookingService::new(&state.db, &state.notifier)
}

/// Request beds at an approved hostel
#[utoipa::path(
    post,
    path = "/api/bookings",
    tag = BOOKING_TAG,
    security(("bearer" = [])),
    request_body = CreateBookingDto,
    responses(
        (status = 201, description = "Booking request submitted", body = BookingDto),
        (status = 400, description = "Invalid input, unavailable room type, or too few beds", body = ErrorDto),
        (status = 403, description = "Students only", body = ErrorDto),
        (status = 404, description = "Hostel not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_booking(
    State(state): State<AppState>,
    user: AuthUser,
    ValidJson(request): ValidJson<CreateBookingDto>,
) -> Result<impl IntoResponse, Error> {
    let student = user.require_student()?;

    let booking = booking_service(&state).create(student, request).await?;

    Ok((StatusCode::CREATED, Json(booking)))
}

/// List the signed-in student's bookings, or the bookings on the signed-in owner's hostels
#[utoipa::path(
    get,
    path = "/api/bookings/my-bookings",
    tag = BOOKING_TAG,
    security(("bearer" = [])),
    params(BookingQuery),
    responses(
        (status = 200, description = "Page of bookings", body = BookingListDto),
        (status = 403, description = "Students and hostel owners only", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn my_bookings(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(query): Query<BookingQuery>,
) -> Result<impl IntoResponse, Error> {
    let bookings = booking_service(&state).list_mine(&user, query).await?;

    Ok((StatusCode::OK, Json(bookings)))
}

/// Get a booking with its status history
#[utoipa::path(
    get,
    path = "/api/bookings/{id}",
    tag = BOOKING_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking", body = BookingDetailDto),
        (status = 404, description = "Booking not found or not accessible", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_booking(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let booking = booking_service(&state).get(&user, id).await?;

    Ok((StatusCode::OK, Json(booking)))
}

/// Change a pending booking request
#[utoipa::path(
    put,
    path = "/api/bookings/{id}",
    tag = BOOKING_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    request_body = UpdateBookingDto,
    responses(
        (status = 200, description = "Updated booking", body = BookingDto),
        (status = 400, description = "Invalid input or booking is no longer pending", body = ErrorDto),
        (status = 403, description = "Students only", body = ErrorDto),
        (status = 404, description = "Booking not found or not accessible", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_booking(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    ValidJson(changes): ValidJson<UpdateBookingDto>,
) -> Result<impl IntoResponse, Error> {
    let student = user.require_student()?;

    let booking = booking_service(&state).update(student, id, changes).await?;

    Ok((StatusCode::OK, Json(booking)))
}

/// Approve or reject a pending booking request
#[utoipa::path(
    put,
    path = "/api/bookings/{id}/respond",
    tag = BOOKING_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    request_body = RespondBookingDto,
    responses(
        (status = 200, description = "Booking approved or rejected", body = BookingDto),
        (status = 400, description = "Not enough rooms left", body = ErrorDto),
        (status = 403, description = "Hostel owners only", body = ErrorDto),
        (status = 404, description = "No pending booking with this ID on the owner's hostels", body = ErrorDto),
        (status = 409, description = "Room availability changed concurrently", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn respond(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    ValidJson(response): ValidJson<RespondBookingDto>,
) -> Result<impl IntoResponse, Error> {
    let owner = user.require_owner()?;

    let booking = booking_service(&state).respond(owner, id, response).await?;

    Ok((StatusCode::OK, Json(booking)))
}

/// Cancel a booking
///
/// Students and owners may cancel their own bookings, admins may cancel any.
#[utoipa::path(
    put,
    path = "/api/bookings/{id}/cancel",
    tag = BOOKING_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    request_body = CancelBookingDto,
    responses(
        (status = 200, description = "Booking cancelled", body = BookingDto),
        (status = 400, description = "Booking can no longer be cancelled", body = ErrorDto),
        (status = 404, description = "Booking not found or not accessible", body = ErrorDto),
        (status = 409, description = "Room availability changed concurrently", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn cancel(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i32>,
    ValidJson(request): ValidJson<CancelBookingDto>,
) -> Result<impl IntoResponse, Error> {
    let booking = booking_service(&state).cancel(&user, id, request).await?;

    Ok((StatusCode::OK, Json(booking)))
}

/// Check the student in to an approved booking
#[utoipa::path(
    put,
    path = "/api/bookings/{id}/checkin",
    tag = BOOKING_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    request_body = CheckInDto,
    responses(
        (status = 200, description = "Student checked in", body = BookingDto),
        (status = 400, description = "Booking is not approved", body = ErrorDto),
        (status = 403, description = "Hostel owners only", body = ErrorDto),
        (status = 404, description = "Booking not found or not accessible", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn check_in(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    ValidJson(request): ValidJson<CheckInDto>,
) -> Result<impl IntoResponse, Error> {
    let owner = user.require_owner()?;

    let booking = booking_service(&state).check_in(owner, id, request).await?;

    Ok((StatusCode::OK, Json(booking)))
}

/// Check the student out and settle the security deposit
#[utoipa::path(
    put,
    path = "/api/bookings/{id}/checkout",
    tag = BOOKING_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    request_body = CheckOutDto,
    responses(
        (status = 200, description = "Student checked out with the deposit refund", body = CheckOutResultDto),
        (status = 400, description = "Student is not checked in", body = ErrorDto),
        (status = 403, description = "Hostel owners only", body = ErrorDto),
        (status = 404, description = "Booking not found or not accessible", body = ErrorDto),
        (status = 409, description = "Room availability changed concurrently", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn check_out(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    ValidJson(request): ValidJson<CheckOutDto>,
) -> Result<impl IntoResponse, Error> {
    let owner = user.require_owner()?;

    let result = booking_service(&state).check_out(owner, id, request).await?;

    Ok((StatusCode::OK, Json(result)))
}

/// Close a checked-out booking with its final settlement
#[utoipa::path(
    put,
    path = "/api/bookings/{id}/complete",
    tag = BOOKING_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    request_body = CompleteBookingDto,
    responses(
        (status = 200, description = "Booking completed", body = BookingDto),
        (status = 400, description = "Booking is not checked out", body = ErrorDto),
        (status = 403, description = "Hostel owners only", body = ErrorDto),
        (status = 404, description = "Booking not found or not accessible", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn complete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    ValidJson(request): ValidJson<CompleteBookingDto>,
) -> Result<impl IntoResponse, Error> {
    let owner = user.require_owner()?;

    let booking = booking_service(&state).complete(owner, id, request).await?;

    Ok((StatusCode::OK, Json(booking)))
}

/// Review the stay of a checked-out or completed booking
#[utoipa::path(
    post,
    path = "/api/bookings/{id}/review",
    tag = BOOKING_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    request_body = ReviewDto,
    responses(
        (status = 200, description = "Review recorded", body = BookingDto),
        (status = 400, description = "Invalid rating, already reviewed, or stay not finished", body = ErrorDto),
        (status = 403, description = "Students only", body = ErrorDto),
        (status = 404, description = "Booking not found or not accessible", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn review(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    ValidJson(review): ValidJson<ReviewDto>,
) -> Result<impl IntoResponse, Error> {
    let student = user.require_student()?;

    let booking = booking_service(&state).review(student, id, review).await?;

    Ok((StatusCode::OK, Json(booking)))
}

/// Record a payment received for a booking
#[utoipa::path(
    post,
    path = "/api/bookings/{id}/payments",
    tag = BOOKING_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    request_body = RecordPaymentDto,
    responses(
        (status = 200, description = "Payment recorded", body = BookingDto),
        (status = 400, description = "Invalid amount or booking closed for payments", body = ErrorDto),
        (status = 403, description = "Hostel owners and admins only", body = ErrorDto),
        (status = 404, description = "Booking not found or not accessible", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn record_payment(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i32>,
    ValidJson(request): ValidJson<RecordPaymentDto>,
) -> Result<impl IntoResponse, Error> {
    let booking = booking_service(&state)
        .record_payment(&user, id, request)
        .await?;

    Ok((StatusCode::OK, Json(booking)))
}

/// Send a message to the other party of a booking
#[utoipa::path(
    post,
    path = "/api/bookings/{id}/messages",
    tag = BOOKING_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    request_body = BookingMessageDto,
    responses(
        (status = 200, description = "Message sent", body = BookingDto),
        (status = 400, description = "Invalid message", body = ErrorDto),
        (status = 404, description = "Booking not found or not accessible", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn send_message(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i32>,
    ValidJson(request): ValidJson<BookingMessageDto>,
) -> Result<impl IntoResponse, Error> {
    let booking = booking_service(&state)
        .send_message(&user, id, request)
        .await?;

    Ok((StatusCode::OK, Json(booking)))
}
