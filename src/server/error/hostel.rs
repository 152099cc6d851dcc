use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use entity::sea_orm_active_enums::RoomType;
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum HostelError {
    #[error("Hostel ID {0:?} not found or not accessible")]
    NotFound(i32),
    #[error("Cannot delete hostel with active bookings")]
    HasActiveBookings,
    #[error("Could not determine coordinates for the hostel address")]
    LocationUnresolved,
    #[error("Room type {0} is listed more than once")]
    DuplicateRoomType(RoomType),
    #[error("Room type {0} has more available rooms than total rooms")]
    AvailabilityExceedsTotal(RoomType),
    #[error("Room type {room_type} has {held} room(s) held by bookings, total rooms cannot be lower")]
    TotalBelowHeld { room_type: RoomType, held: i32 },
    #[error("Room type {room_type} has only {free} room(s) not held by bookings")]
    AvailabilityExceedsFree { room_type: RoomType, free: i32 },
    #[error("Room type {0} still has rooms held by bookings and cannot be removed")]
    RoomTypeInUse(RoomType),
    #[error("Room type ID {0:?} changed while the hostel was being updated")]
    RoomTypeConflict(i32),
}

impl IntoResponse for HostelError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::NotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(ErrorDto::new("Hostel not found or unauthorized")),
            )
                .into_response(),
            Self::RoomTypeConflict(_) => (
                StatusCode::CONFLICT,
                Json(ErrorDto::new(
                    "Room availability changed while saving the hostel, please retry",
                )),
            )
                .into_response(),
            err => (StatusCode::BAD_REQUEST, Json(ErrorDto::new(err.to_string()))).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Expect inventory conflicts to be retryable and capacity errors to be bad requests
    #[test]
    fn maps_status_codes() {
        let cases = [
            (HostelError::NotFound(1), StatusCode::NOT_FOUND),
            (HostelError::RoomTypeConflict(1), StatusCode::CONFLICT),
            (HostelError::RoomTypeInUse(RoomType::Double), StatusCode::BAD_REQUEST),
            (
                HostelError::TotalBelowHeld {
                    room_type: RoomType::Double,
                    held: 2,
                },
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
