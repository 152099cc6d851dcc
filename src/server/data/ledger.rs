use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

/// Append-only store of booking fingerprints. An entry's ID doubles as its block number.
pub struct LedgerRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> LedgerRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn append(
        &self,
        booking_id: i32,
        content_hash: String,
        recorded_by: i32,
    ) -> Result<entity::ledger_entry::Model, DbErr> {
        entity::ledger_entry::ActiveModel {
            booking_id: ActiveValue::Set(booking_id),
            content_hash: ActiveValue::Set(content_hash),
            recorded_by: ActiveValue::Set(recorded_by),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Most recent entry carrying `content_hash`
    pub async fn find_by_hash(
        &self,
        content_hash: &str,
    ) -> Result<Option<entity::ledger_entry::Model>, DbErr> {
        entity::prelude::LedgerEntry::find()
            .filter(entity::ledger_entry::Column::ContentHash.eq(content_hash))
            .order_by_desc(entity::ledger_entry::Column::Id)
            .one(self.db)
            .await
    }

    /// Number of entries from block `block_number` onwards
    pub async fn count_from(&self, block_number: i32) -> Result<u64, DbErr> {
        entity::prelude::LedgerEntry::find()
            .filter(entity::ledger_entry::Column::Id.gte(block_number))
            .count(self.db)
            .await
    }

    /// Most recent fingerprint recorded for a booking
    pub async fn latest_for_booking(
        &self,
        booking_id: i32,
    ) -> Result<Option<entity::ledger_entry::Model>, DbErr> {
        entity::prelude::LedgerEntry::find()
            .filter(entity::ledger_entry::Column::BookingId.eq(booking_id))
            .order_by_desc(entity::ledger_entry::Column::Id)
            .one(self.db)
            .await
    }
}
