//! Error types for the HABS server application.
//!
//! Each domain (authentication, bookings, hostels, map provider, configuration) has its own
//! error enum mapping to the HTTP status a client should see. All of them are aggregated into
//! [`Error`], which implements `IntoResponse` so handlers can propagate failures with `?`.

pub mod auth;
pub mod booking;
pub mod config;
pub mod hostel;
pub mod map;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        auth::AuthError, booking::BookingError, config::ConfigError, hostel::HostelError,
        map::MapError,
    },
};

/// Main error type for the HABS server application.
///
/// Aggregates all domain-specific error types and external library errors into a single type.
/// `#[from]` conversions allow propagation with `?`, and the `IntoResponse` implementation
/// maps every variant onto the documented error taxonomy.
///
/// # Status mapping
/// - 400 Bad Request - validation failures, invalid lifecycle transitions, capacity problems
/// - 401 Unauthorized - missing, invalid, or stale bearer tokens
/// - 403 Forbidden - role mismatch or suspended accounts
/// - 404 Not Found - absent resources or resources the caller does not own
/// - 409 Conflict - lost optimistic concurrency race on room inventory
/// - 500 Internal Server Error - everything else, with details only in debug builds
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Authentication or authorization error.
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Booking lifecycle error.
    #[error(transparent)]
    BookingError(#[from] BookingError),
    /// Hostel listing error.
    #[error(transparent)]
    HostelError(#[from] HostelError),
    /// Map provider error.
    #[error(transparent)]
    MapError(#[from] MapError),
    /// Request payload failed declarative validation.
    #[error(transparent)]
    ValidationErrors(#[from] validator::ValidationErrors),
    /// Request is malformed or violates a business rule.
    #[error("{0}")]
    BadRequest(String),
    /// Resource is absent or not visible to the caller.
    #[error("{0}")]
    NotFound(String),
    /// Internal error indicating a bug in HABS' code.
    #[error("Internal error: {0}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Token signing error.
    #[error(transparent)]
    JwtError(#[from] jsonwebtoken::errors::Error),
    /// JSON (de)serialization error.
    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),
    /// Cron scheduler error (job registration, scheduler startup).
    #[error(transparent)]
    SchedulerError(#[from] tokio_cron_scheduler::JobSchedulerError),
    /// I/O error (binding the listener).
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// Converts application errors into HTTP responses.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::BookingError(err) => err.into_response(),
            Self::HostelError(err) => err.into_response(),
            Self::MapError(err) => err.into_response(),
            Self::ValidationErrors(errors) => {
                tracing::debug!(errors = %errors, "Request failed validation");

                bad_request(validation_message(&errors))
            }
            Self::BadRequest(message) => {
                tracing::debug!("{}", message);

                bad_request(message)
            }
            Self::NotFound(message) => {
                tracing::debug!("{}", message);

                (StatusCode::NOT_FOUND, Json(ErrorDto::new(message))).into_response()
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Builds a 400 Bad Request response with the provided message.
pub fn bad_request(message: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorDto::new(message))).into_response()
}

/// Flattens validator errors into a single human readable message.
///
/// Uses the custom message of each failed rule when present, falling back to the field name.
pub fn validation_message(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = Vec::new();
    collect_messages(errors, &mut messages);

    if messages.is_empty() {
        "Invalid request".to_string()
    } else {
        messages.join(", ")
    }
}

fn collect_messages(errors: &validator::ValidationErrors, messages: &mut Vec<String>) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {}", field));
                    messages.push(message);
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_messages(nested, messages),
            ValidationErrorsKind::List(items) => {
                for nested in items.values() {
                    collect_messages(nested, messages);
                }
            }
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// The error is logged in full. Clients receive a generic message, with the underlying error
/// attached as `details` only in debug builds.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        let details = cfg!(debug_assertions).then(|| self.0.to_string());

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                message: "Internal server error".to_string(),
                details,
            }),
        )
            .into_response()
    }
}
