pub use sea_orm_migration::prelude::*;

mod m20251017_000001_university;
mod m20251017_000002_college;
mod m20251017_000003_department;
mod m20251017_000004_habs_user;
mod m20251017_000005_hostel;
mod m20251017_000006_hostel_room_type;
mod m20251017_000007_booking;
mod m20251017_000008_booking_status_history;
mod m20251017_000009_ledger_entry;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251017_000001_university::Migration),
            Box::new(m20251017_000002_college::Migration),
            Box::new(m20251017_000003_department::Migration),
            Box::new(m20251017_000004_habs_user::Migration),
            Box::new(m20251017_000005_hostel::Migration),
            Box::new(m20251017_000006_hostel_room_type::Migration),
            Box::new(m20251017_000007_booking::Migration),
            Box::new(m20251017_000008_booking_status_history::Migration),
            Box::new(m20251017_000009_ledger_entry::Migration),
        ]
    }
}
