use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        hostel::{
            CreateHostelDto, HostelDetailDto, HostelDto, HostelListDto, HostelSearchQuery,
            HostelSearchResultDto, MyHostelsQuery, UpdateHostelDto,
        },
    },
    server::{
        controller::util::json::ValidJson,
        error::Error,
        model::{
            app::AppState,
            auth::{AuthUser, OptionalAuthUser},
        },
        service::hostel::HostelService,
    },
};

pub static HOSTEL_TAG: &str = "hostel";

fn hostel_service(state: &AppState) -> HostelService<'_> {
    HostelService::new(&state.db, &state.map_client, &state.notifier)
}

/// Search approved hostels
///
/// Signed-in students also receive the best scoring hostels of the page as recommendations.
#[utoipa::path(
    get,
    path = "/api/hostels",
    tag = HOSTEL_TAG,
    params(HostelSearchQuery),
    responses(
        (status = 200, description = "Page of matching hostels", body = HostelSearchResultDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn search(
    State(state): State<AppState>,
    OptionalAuthUser(viewer): OptionalAuthUser,
    Query(query): Query<HostelSearchQuery>,
) -> Result<impl IntoResponse, Error> {
    let results = hostel_service(&state)
        .search(query, viewer.as_ref())
        .await?;

    Ok((StatusCode::OK, Json(results)))
}

/// Get a hostel with similar listings
#[utoipa::path(
    get,
    path = "/api/hostels/{id}",
    tag = HOSTEL_TAG,
    params(("id" = i32, Path, description = "Hostel ID")),
    responses(
        (status = 200, description = "Hostel", body = HostelDetailDto),
        (status = 404, description = "Hostel not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_hostel(
    State(state): State<AppState>,
    OptionalAuthUser(viewer): OptionalAuthUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let hostel = hostel_service(&state).get(id, viewer.as_ref()).await?;

    Ok((StatusCode::OK, Json(hostel)))
}

/// Submit a new hostel listing for moderation
#[utoipa::path(
    post,
    path = "/api/hostels",
    tag = HOSTEL_TAG,
    security(("bearer" = [])),
    request_body = CreateHostelDto,
    responses(
        (status = 201, description = "Hostel submitted", body = HostelDto),
        (status = 400, description = "Invalid input or address could not be geocoded", body = ErrorDto),
        (status = 403, description = "Hostel owners only", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_hostel(
    State(state): State<AppState>,
    user: AuthUser,
    ValidJson(hostel): ValidJson<CreateHostelDto>,
) -> Result<impl IntoResponse, Error> {
    let owner = user.require_owner()?;

    let hostel = hostel_service(&state).create(owner, hostel).await?;

    Ok((StatusCode::CREATED, Json(hostel)))
}

/// Update an owned hostel listing
#[utoipa::path(
    put,
    path = "/api/hostels/{id}",
    tag = HOSTEL_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Hostel ID")),
    request_body = UpdateHostelDto,
    responses(
        (status = 200, description = "Updated hostel", body = HostelDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 403, description = "Hostel owners only", body = ErrorDto),
        (status = 404, description = "Hostel not found or not owned", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_hostel(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    ValidJson(changes): ValidJson<UpdateHostelDto>,
) -> Result<impl IntoResponse, Error> {
    let owner = user.require_owner()?;

    let hostel = hostel_service(&state).update(owner, id, changes).await?;

    Ok((StatusCode::OK, Json(hostel)))
}

/// Delete an owned hostel listing without active bookings
#[utoipa::path(
    delete,
    path = "/api/hostels/{id}",
    tag = HOSTEL_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Hostel ID")),
    responses(
        (status = 200, description = "Hostel deleted", body = MessageDto),
        (status = 400, description = "Hostel has active bookings", body = ErrorDto),
        (status = 403, description = "Hostel owners only", body = ErrorDto),
        (status = 404, description = "Hostel not found or not owned", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_hostel(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let owner = user.require_owner()?;

    hostel_service(&state).delete(owner, id).await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("Hostel deleted successfully")),
    ))
}

/// List the signed-in owner's hostels
#[utoipa::path(
    get,
    path = "/api/hostels/owner/my-hostels",
    tag = HOSTEL_TAG,
    security(("bearer" = [])),
    params(MyHostelsQuery),
    responses(
        (status = 200, description = "Page of owned hostels", body = HostelListDto),
        (status = 403, description = "Hostel owners only", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn my_hostels(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<MyHostelsQuery>,
) -> Result<impl IntoResponse, Error> {
    let owner = user.require_owner()?;

    let hostels = hostel_service(&state).my_hostels(owner, query).await?;

    Ok((StatusCode::OK, Json(hostels)))
}
