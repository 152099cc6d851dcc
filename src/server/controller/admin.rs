use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        admin::DashboardStatsDto,
        api::{ErrorDto, PageQuery},
        booking::{AdminBookingQuery, BookingListDto},
        hostel::{ApproveHostelDto, HostelDto, HostelListDto, RejectHostelDto},
        user::{SuspendUserDto, UserDto, UserListDto, UserQuery},
    },
    server::{
        controller::util::json::ValidJson,
        error::Error,
        model::{app::AppState, auth::AuthUser},
        service::admin::AdminService,
    },
};

pub static ADMIN_TAG: &str = "admin";

fn admin_service(state: &AppState) -> AdminService<'_> {
    AdminService::new(&state.db, &state.notifier)
}

/// Platform statistics and recent activity
#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    tag = ADMIN_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Dashboard statistics", body = DashboardStatsDto),
        (status = 403, description = "Admins only", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn dashboard(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, Error> {
    user.require_admin()?;

    let stats = admin_service(&state).dashboard().await?;

    Ok((StatusCode::OK, Json(stats)))
}

/// Hostels awaiting moderation, oldest first
#[utoipa::path(
    get,
    path = "/api/admin/hostels/pending",
    tag = ADMIN_TAG,
    security(("bearer" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "Page of pending hostels", body = HostelListDto),
        (status = 403, description = "Admins only", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn pending_hostels(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, Error> {
    user.require_admin()?;

    let hostels = admin_service(&state).pending_hostels(query).await?;

    Ok((StatusCode::OK, Json(hostels)))
}

/// Approve a hostel listing
#[utoipa::path(
    put,
    path = "/api/admin/hostels/{id}/approve",
    tag = ADMIN_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Hostel ID")),
    request_body = ApproveHostelDto,
    responses(
        (status = 200, description = "Hostel approved", body = HostelDto),
        (status = 403, description = "Admins only", body = ErrorDto),
        (status = 404, description = "Hostel not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn approve_hostel(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    ValidJson(request): ValidJson<ApproveHostelDto>,
) -> Result<impl IntoResponse, Error> {
    let admin = user.require_admin()?;

    let hostel = admin_service(&state)
        .approve_hostel(admin, id, request)
        .await?;

    Ok((StatusCode::OK, Json(hostel)))
}

/// Reject a hostel listing with a reason
#[utoipa::path(
    put,
    path = "/api/admin/hostels/{id}/reject",
    tag = ADMIN_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Hostel ID")),
    request_body = RejectHostelDto,
    responses(
        (status = 200, description = "Hostel rejected", body = HostelDto),
        (status = 400, description = "Rejection reason is required", body = ErrorDto),
        (status = 403, description = "Admins only", body = ErrorDto),
        (status = 404, description = "Hostel not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn reject_hostel(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    ValidJson(request): ValidJson<RejectHostelDto>,
) -> Result<impl IntoResponse, Error> {
    let admin = user.require_admin()?;

    let hostel = admin_service(&state)
        .reject_hostel(admin, id, request)
        .await?;

    Ok((StatusCode::OK, Json(hostel)))
}

/// List accounts by role or name and email search
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = ADMIN_TAG,
    security(("bearer" = [])),
    params(UserQuery),
    responses(
        (status = 200, description = "Page of users", body = UserListDto),
        (status = 403, description = "Admins only", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_users(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<UserQuery>,
) -> Result<impl IntoResponse, Error> {
    user.require_admin()?;

    let users = admin_service(&state).list_users(query).await?;

    Ok((StatusCode::OK, Json(users)))
}

/// Suspend or reactivate an account
#[utoipa::path(
    put,
    path = "/api/admin/users/{id}/suspend",
    tag = ADMIN_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "User ID")),
    request_body = SuspendUserDto,
    responses(
        (status = 200, description = "Suspension updated", body = UserDto),
        (status = 400, description = "Admins cannot suspend themselves", body = ErrorDto),
        (status = 403, description = "Admins only", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn suspend_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    ValidJson(request): ValidJson<SuspendUserDto>,
) -> Result<impl IntoResponse, Error> {
    let admin = user.require_admin()?;

    let user = admin_service(&state).suspend_user(admin, id, request).await?;

    Ok((StatusCode::OK, Json(user)))
}

/// Verify a hostel owner's business
#[utoipa::path(
    put,
    path = "/api/admin/users/{id}/approve",
    tag = ADMIN_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Owner approved", body = UserDto),
        (status = 403, description = "Admins only", body = ErrorDto),
        (status = 404, description = "Hostel owner not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn approve_owner(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let admin = user.require_admin()?;

    let owner = admin_service(&state).approve_owner(admin, id).await?;

    Ok((StatusCode::OK, Json(owner)))
}

/// List every booking by status or student and hostel search
#[utoipa::path(
    get,
    path = "/api/admin/bookings",
    tag = ADMIN_TAG,
    security(("bearer" = [])),
    params(AdminBookingQuery),
    responses(
        (status = 200, description = "Page of bookings", body = BookingListDto),
        (status = 403, description = "Admins only", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<AdminBookingQuery>,
) -> Result<impl IntoResponse, Error> {
    user.require_admin()?;

    let bookings = admin_service(&state).list_bookings(query).await?;

    Ok((StatusCode::OK, Json(bookings)))
}
