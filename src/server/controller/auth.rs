use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        user::{
            AuthResponseDto, ChangePasswordDto, LoginDto, RegisterDto, UpdateProfileDto, UserDto,
        },
    },
    server::{
        controller::util::json::ValidJson,
        error::Error,
        model::{app::AppState, auth::AuthUser},
        service::{auth::AuthService, user::UserService},
    },
};

pub static AUTH_TAG: &str = "auth";

/// Register a student or hostel owner account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = AUTH_TAG,
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Account created", body = AuthResponseDto),
        (status = 400, description = "Invalid input or email already in use", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    ValidJson(registration): ValidJson<RegisterDto>,
) -> Result<impl IntoResponse, Error> {
    let response = AuthService::new(&state.db, &state.jwt)
        .register(registration)
        .await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Sign in with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Signed in", body = AuthResponseDto),
        (status = 400, description = "Invalid email or password", body = ErrorDto),
        (status = 403, description = "Account is suspended", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    ValidJson(credentials): ValidJson<LoginDto>,
) -> Result<impl IntoResponse, Error> {
    let response = AuthService::new(&state.db, &state.jwt)
        .login(credentials)
        .await?;

    Ok((StatusCode::OK, Json(response)))
}

/// Sign in to an administrator account
#[utoipa::path(
    post,
    path = "/api/auth/admin-login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Signed in", body = AuthResponseDto),
        (status = 400, description = "Invalid email or password", body = ErrorDto),
        (status = 403, description = "Account is not an administrator or is suspended", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn admin_login(
    State(state): State<AppState>,
    ValidJson(credentials): ValidJson<LoginDto>,
) -> Result<impl IntoResponse, Error> {
    let response = AuthService::new(&state.db, &state.jwt)
        .admin_login(credentials)
        .await?;

    Ok((StatusCode::OK, Json(response)))
}

/// Get the signed-in account
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = AUTH_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Signed-in account", body = UserDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Account is suspended", body = ErrorDto)
    ),
)]
pub async fn me(AuthUser(user): AuthUser) -> Result<impl IntoResponse, Error> {
    Ok((StatusCode::OK, Json(UserDto::from(user))))
}

/// Update name, contact details, or the role profile of the signed-in account
#[utoipa::path(
    put,
    path = "/api/auth/profile",
    tag = AUTH_TAG,
    security(("bearer" = [])),
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Updated account", body = UserDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidJson(update): ValidJson<UpdateProfileDto>,
) -> Result<impl IntoResponse, Error> {
    let user = UserService::new(&state.db)
        .update_profile(&user, update)
        .await?;

    Ok((StatusCode::OK, Json(user)))
}

/// Replace the password of the signed-in account
#[utoipa::path(
    post,
    path = "/api/auth/change-password",
    tag = AUTH_TAG,
    security(("bearer" = [])),
    request_body = ChangePasswordDto,
    responses(
        (status = 200, description = "Password changed", body = MessageDto),
        (status = 400, description = "Current password is incorrect", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn change_password(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidJson(change): ValidJson<ChangePasswordDto>,
) -> Result<impl IntoResponse, Error> {
    AuthService::new(&state.db, &state.jwt)
        .change_password(&user, change)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("Password changed successfully")),
    ))
}

/// Acknowledge a logout
///
/// Tokens are stateless, clients sign out by discarding theirs.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Logged out", body = MessageDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto)
    ),
)]
pub async fn logout(AuthUser(user): AuthUser) -> Result<impl IntoResponse, Error> {
    tracing::debug!(user_id = user.id, "User logged out");

    Ok((StatusCode::OK, Json(MessageDto::new("Logged out successfully"))))
}
