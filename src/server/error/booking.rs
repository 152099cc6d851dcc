use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use entity::sea_orm_active_enums::{BookingStatus, RoomType};
use thiserror::Error;

use crate::{model::api::ErrorDto, server::service::booking::lifecycle::BookingAction};

#[derive(Error, Debug)]
pub enum BookingError {
    /// Booking is absent, not visible to the caller, or no longer in the expected status
    #[error("Booking ID {0:?} not found or not accessible")]
    NotFound(i32),
    #[error("Cannot {action} a booking that is {from}")]
    InvalidTransition {
        from: BookingStatus,
        action: BookingAction,
    },
    #[error("Room type {0} is not available at this hostel")]
    RoomTypeUnavailable(RoomType),
    #[error("Not enough beds available: {available} free, {requested} requested")]
    InsufficientBeds { available: i32, requested: i32 },
    #[error("This hostel requires a minimum stay of {0} month(s)")]
    MinimumStay(i32),
    #[error("Only pending bookings can be modified")]
    NotEditable,
    #[error("A review has already been submitted for this booking")]
    AlreadyReviewed,
    #[error("Reviews can only be submitted after check-out, this booking is {0}")]
    NotReviewable(BookingStatus),
    #[error("Payments cannot be recorded on a booking that is {0}")]
    PaymentsClosed(BookingStatus),
    #[error("Room inventory for room type ID {0:?} changed concurrently")]
    InventoryConflict(i32),
    #[error("Booking ID {0:?} changed concurrently")]
    ConcurrentUpdate(i32),
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let status = match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InventoryConflict(_) | Self::ConcurrentUpdate(_) => StatusCode::CONFLICT,
            _ => StatusCode::BAD_REQUEST,
        };

        let message = match self {
            Self::NotFound(_) => "Booking not found or unauthorized".to_string(),
            Self::InventoryConflict(_) => {
                "Room availability changed while processing the request, please retry".to_string()
            }
            Self::ConcurrentUpdate(_) => {
                "The booking changed while processing the request, please retry".to_string()
            }
            err => err.to_string(),
        };

        (status, Json(ErrorDto::new(message))).into_response()
    }
}
