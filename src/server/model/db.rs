//! Database model type aliases.
//!
//! Short names for the SeaORM entity models used throughout the server, so signatures don't need
//! to spell out the `entity` crate paths.

/// Account of a student, hostel owner, or administrator.
pub type UserModel = entity::habs_user::Model;

pub type UniversityModel = entity::university::Model;
pub type CollegeModel = entity::college::Model;
pub type DepartmentModel = entity::department::Model;

/// Hostel listing without its room types.
pub type HostelModel = entity::hostel::Model;

/// One room tier of a hostel, carrying capacity, price, and the inventory version token.
pub type RoomTypeModel = entity::hostel_room_type::Model;

/// Booking request with its pricing snapshot and lifecycle records.
pub type BookingModel = entity::booking::Model;

/// Append-only entry of a booking's status timeline.
pub type StatusHistoryModel = entity::booking_status_history::Model;

/// Content fingerprint recorded for a booking.
pub type LedgerEntryModel = entity::ledger_entry::Model;
