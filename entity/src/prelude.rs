pub use super::booking::Entity as Booking;
pub use super::booking_status_history::Entity as BookingStatusHistory;
pub use super::college::Entity as College;
pub use super::department::Entity as Department;
pub use super::habs_user::Entity as HabsUser;
pub use super::hostel::Entity as Hostel;
pub use super::hostel_room_type::Entity as HostelRoomType;
pub use super::ledger_entry::Entity as LedgerEntry;
pub use super::university::Entity as University;
