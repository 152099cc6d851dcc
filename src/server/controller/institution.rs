use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        institution::{
            CollegeDto, CreateCollegeDto, CreateDepartmentDto, CreateUniversityDto, DepartmentDto,
            UniversityDetailDto, UniversityDto, UniversityListDto, UniversityQuery,
            UniversityStatsDto, UpdateUniversityDto,
        },
    },
    server::{
        controller::util::json::ValidJson,
        error::Error,
        model::{app::AppState, auth::AuthUser},
        service::institution::InstitutionService,
    },
};

pub static INSTITUTION_TAG: &str = "institution";

/// List active universities
#[utoipa::path(
    get,
    path = "/api/universities",
    tag = INSTITUTION_TAG,
    params(UniversityQuery),
    responses(
        (status = 200, description = "Page of universities", body = UniversityListDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_universities(
    State(state): State<AppState>,
    Query(query): Query<UniversityQuery>,
) -> Result<impl IntoResponse, Error> {
    let universities = InstitutionService::new(&state.db)
        .list_universities(query)
        .await?;

    Ok((StatusCode::OK, Json(universities)))
}

/// Catalog statistics over active universities
#[utoipa::path(
    get,
    path = "/api/universities/stats",
    tag = INSTITUTION_TAG,
    responses(
        (status = 200, description = "University counts and student totals", body = UniversityStatsDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn university_stats(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let stats = InstitutionService::new(&state.db).university_stats().await?;

    Ok((StatusCode::OK, Json(stats)))
}

/// Get a university with its colleges
#[utoipa::path(
    get,
    path = "/api/universities/{id}",
    tag = INSTITUTION_TAG,
    params(("id" = i32, Path, description = "University ID")),
    responses(
        (status = 200, description = "University", body = UniversityDetailDto),
        (status = 404, description = "University not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_university(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let university = InstitutionService::new(&state.db).get_university(id).await?;

    Ok((StatusCode::OK, Json(university)))
}

/// List the colleges of a university
#[utoipa::path(
    get,
    path = "/api/universities/{id}/colleges",
    tag = INSTITUTION_TAG,
    params(("id" = i32, Path, description = "University ID")),
    responses(
        (status = 200, description = "Colleges", body = Vec<CollegeDto>),
        (status = 404, description = "University not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_colleges(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let colleges = InstitutionService::new(&state.db).list_colleges(id).await?;

    Ok((StatusCode::OK, Json(colleges)))
}

/// List the departments of a college
#[utoipa::path(
    get,
    path = "/api/universities/{id}/colleges/{college_id}/departments",
    tag = INSTITUTION_TAG,
    params(
        ("id" = i32, Path, description = "University ID"),
        ("college_id" = i32, Path, description = "College ID")
    ),
    responses(
        (status = 200, description = "Departments", body = Vec<DepartmentDto>),
        (status = 404, description = "College not found in this university", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_departments(
    State(state): State<AppState>,
    Path((id, college_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, Error> {
    let departments = InstitutionService::new(&state.db)
        .list_departments(id, college_id)
        .await?;

    Ok((StatusCode::OK, Json(departments)))
}

/// Get a department
#[utoipa::path(
    get,
    path = "/api/universities/departments/{id}",
    tag = INSTITUTION_TAG,
    params(("id" = i32, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Department", body = DepartmentDto),
        (status = 404, description = "Department not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_department(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let department = InstitutionService::new(&state.db).get_department(id).await?;

    Ok((StatusCode::OK, Json(department)))
}

/// Add a university to the catalog
#[utoipa::path(
    post,
    path = "/api/universities",
    tag = INSTITUTION_TAG,
    security(("bearer" = [])),
    request_body = CreateUniversityDto,
    responses(
        (status = 201, description = "University created", body = UniversityDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 403, description = "Admins only", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_university(
    State(state): State<AppState>,
    user: AuthUser,
    ValidJson(university): ValidJson<CreateUniversityDto>,
) -> Result<impl IntoResponse, Error> {
    user.require_admin()?;

    let university = InstitutionService::new(&state.db)
        .create_university(university)
        .await?;

    Ok((StatusCode::CREATED, Json(university)))
}

/// Update a university
#[utoipa::path(
    put,
    path = "/api/universities/{id}",
    tag = INSTITUTION_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "University ID")),
    request_body = UpdateUniversityDto,
    responses(
        (status = 200, description = "Updated university", body = UniversityDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 403, description = "Admins only", body = ErrorDto),
        (status = 404, description = "University not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_university(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    ValidJson(changes): ValidJson<UpdateUniversityDto>,
) -> Result<impl IntoResponse, Error> {
    user.require_admin()?;

    let university = InstitutionService::new(&state.db)
        .update_university(id, changes)
        .await?;

    Ok((StatusCode::OK, Json(university)))
}

/// Deactivate a university
///
/// The university is hidden from the catalog; existing references stay intact.
#[utoipa::path(
    delete,
    path = "/api/universities/{id}",
    tag = INSTITUTION_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "University ID")),
    responses(
        (status = 200, description = "University deactivated", body = MessageDto),
        (status = 403, description = "Admins only", body = ErrorDto),
        (status = 404, description = "University not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn deactivate_university(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    user.require_admin()?;

    InstitutionService::new(&state.db)
        .deactivate_university(id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("University deactivated successfully")),
    ))
}

/// Add a college to a university
#[utoipa::path(
    post,
    path = "/api/universities/{id}/colleges",
    tag = INSTITUTION_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "University ID")),
    request_body = CreateCollegeDto,
    responses(
        (status = 201, description = "College created", body = CollegeDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 403, description = "Admins only", body = ErrorDto),
        (status = 404, description = "University not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_college(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    ValidJson(college): ValidJson<CreateCollegeDto>,
) -> Result<impl IntoResponse, Error> {
    user.require_admin()?;

    let college = InstitutionService::new(&state.db)
        .create_college(id, college)
        .await?;

    Ok((StatusCode::CREATED, Json(college)))
}

/// Add a department to a college
#[utoipa::path(
    post,
    path = "/api/universities/{id}/colleges/{college_id}/departments",
    tag = INSTITUTION_TAG,
    security(("bearer" = [])),
    params(
        ("id" = i32, Path, description = "University ID"),
        ("college_id" = i32, Path, description = "College ID")
    ),
    request_body = CreateDepartmentDto,
    responses(
        (status = 201, description = "Department created", body = DepartmentDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 403, description = "Admins only", body = ErrorDto),
        (status = 404, description = "College not found in this university", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_department(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, college_id)): Path<(i32, i32)>,
    ValidJson(department): ValidJson<CreateDepartmentDto>,
) -> Result<impl IntoResponse, Error> {
    user.require_admin()?;

    let department = InstitutionService::new(&state.db)
        .create_department(id, college_id, department)
        .await?;

    Ok((StatusCode::CREATED, Json(department)))
}
