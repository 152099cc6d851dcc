//! Booking status state machine.
//!
//! Every status change goes through [`transition`], which decides whether an action is allowed
//! from the current status and what it does to room inventory.

use std::fmt;

use entity::sea_orm_active_enums::BookingStatus;

use crate::server::error::booking::BookingError;

/// Something a participant (or the auto-cancel sweep) does to a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingAction {
    Approve,
    Reject,
    Cancel,
    /// Cancellation of a request the owner never answered
    Expire,
    CheckIn,
    CheckOut,
    Complete,
}

impl fmt::Display for BookingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Cancel => "cancel",
            Self::Expire => "expire",
            Self::CheckIn => "check in",
            Self::CheckOut => "check out",
            Self::Complete => "complete",
        })
    }
}

/// What a transition does to the available rooms of the booked room type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryEffect {
    None,
    Reserve,
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: BookingStatus,
    pub to: BookingStatus,
    pub effect: InventoryEffect,
}

/// Resolves `action` taken on a booking in status `from`.
pub fn transition(from: BookingStatus, action: BookingAction) -> Result<Transition, BookingError> {
    use BookingStatus::*;

    let (to, effect) = match (from, action) {
        (Pending, BookingAction::Approve) => (Approved, InventoryEffect::Reserve),
        (Pending, BookingAction::Reject) => (Rejected, InventoryEffect::None),
        (Pending, BookingAction::Cancel) | (Pending, BookingAction::Expire) => {
            (Cancelled, InventoryEffect::None)
        }
        (Approved, BookingAction::Cancel) => (Cancelled, InventoryEffect::Release),
        (Approved, BookingAction::CheckIn) => (CheckedIn, InventoryEffect::None),
        (CheckedIn, BookingAction::CheckOut) => (CheckedOut, InventoryEffect::Release),
        (CheckedOut, BookingAction::Complete) => (Completed, InventoryEffect::None),
        (from, action) => return Err(BookingError::InvalidTransition { from, action }),
    };

    Ok(Transition { from, to, effect })
}

/// Whether a review may be attached to a booking in this status
pub fn is_reviewable(status: BookingStatus) -> bool {
    matches!(status, BookingStatus::CheckedOut | BookingStatus::Completed)
}

/// Whether payments may be recorded against a booking in this status
pub fn accepts_payments(status: BookingStatus) -> bool {
    matches!(
        status,
        BookingStatus::Approved | BookingStatus::CheckedIn | BookingStatus::CheckedOut
    )
}

/// Rooms occupied by `beds` beds, rounding partial rooms up.
pub fn rooms_for_beds(beds: i32, beds_per_room: i32) -> i32 {
    if beds_per_room <= 0 {
        return beds.max(0);
    }

    (beds + beds_per_room - 1) / beds_per_room
}

/// Available rooms after applying `effect` for a booking of `beds` beds.
///
/// Reservation never goes below zero and is skipped entirely when nothing is free; release
/// never exceeds `total_rooms`.
pub fn apply_effect(
    effect: InventoryEffect,
    room_type: &entity::hostel_room_type::Model,
    beds: i32,
) -> i32 {
    let rooms = rooms_for_beds(beds, room_type.beds_per_room);

    match effect {
        InventoryEffect::None => room_type.available_rooms,
        InventoryEffect::Reserve if room_type.available_rooms == 0 => 0,
        InventoryEffect::Reserve => (room_type.available_rooms - rooms).max(0),
        InventoryEffect::Release => (room_type.available_rooms + rooms).min(room_type.total_rooms),
    }
}
