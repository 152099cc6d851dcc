pub mod prelude;

pub mod booking;
pub mod booking_status_history;
pub mod college;
pub mod department;
pub mod habs_user;
pub mod hostel;
pub mod hostel_room_type;
pub mod ledger_entry;
pub mod sea_orm_active_enums;
pub mod types;
pub mod university;
