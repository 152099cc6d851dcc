use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use entity::sea_orm_active_enums::UserRole;
use thiserror::Error;

use crate::{model::api::ErrorDto, server::error::InternalServerError};

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("No bearer token was provided with the request")]
    MissingToken,
    #[error("Bearer token failed validation: {0}")]
    InvalidToken(jsonwebtoken::errors::Error),
    #[error("User ID {0:?} from a valid token no longer exists")]
    UserNotInDatabase(i32),
    #[error("User ID {0:?} is suspended")]
    Suspended(i32),
    #[error("User ID {user_id:?} with role {role} attempted an action reserved for {required}")]
    Forbidden {
        user_id: i32,
        role: UserRole,
        required: &'static str,
    },
    #[error("Login failed due to an unknown email or wrong password")]
    InvalidCredentials,
    #[error("Admin login attempted by non-admin user ID {0:?}")]
    NotAdmin(i32),
    #[error("Registration attempted with an email that is already in use")]
    EmailTaken,
    #[error("Password change failed for user ID {0:?} due to an incorrect current password")]
    IncorrectPassword(i32),
    #[error("Failed to hash password: {0}")]
    PasswordHash(String),
}

impl AuthError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "Access denied. No token provided.".to_string(),
            ),
            Self::InvalidToken(_) => (StatusCode::UNAUTHORIZED, "Invalid token.".to_string()),
            Self::UserNotInDatabase(_) => (
                StatusCode::UNAUTHORIZED,
                "Invalid token. User not found.".to_string(),
            ),
            Self::Suspended(_) => (StatusCode::FORBIDDEN, "Account is suspended.".to_string()),
            Self::Forbidden { required, .. } => (
                StatusCode::FORBIDDEN,
                format!("Access denied. {} only.", required),
            ),
            Self::NotAdmin(_) => (
                StatusCode::FORBIDDEN,
                "Access denied. Admin account required.".to_string(),
            ),
            Self::InvalidCredentials => (
                StatusCode::BAD_REQUEST,
                "Invalid email or password".to_string(),
            ),
            Self::EmailTaken => (
                StatusCode::BAD_REQUEST,
                "User already exists with this email".to_string(),
            ),
            Self::IncorrectPassword(_) => (
                StatusCode::BAD_REQUEST,
                "Current password is incorrect".to_string(),
            ),
            Self::PasswordHash(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        if let Self::PasswordHash(_) = self {
            return InternalServerError(self).into_response();
        }

        tracing::debug!("{}", self);

        let (status, message) = self.status_and_message();

        (status, Json(ErrorDto::new(message))).into_response()
    }
}
