use chrono::NaiveDateTime;
use entity::sea_orm_active_enums::BookingStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

/// Append-only log of booking status changes. Entries are never updated or removed.
pub struct StatusHistoryRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> StatusHistoryRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn record(
        &self,
        booking_id: i32,
        status: BookingStatus,
        updated_by: Option<i32>,
        reason: Option<String>,
        notes: Option<String>,
        at: NaiveDateTime,
    ) -> Result<entity::booking_status_history::Model, DbErr> {
        entity::booking_status_history::ActiveModel {
            booking_id: ActiveValue::Set(booking_id),
            status: ActiveValue::Set(status),
            updated_by: ActiveValue::Set(updated_by),
            reason: ActiveValue::Set(reason),
            notes: ActiveValue::Set(notes),
            created_at: ActiveValue::Set(at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// History of a booking in the order it was recorded
    pub async fn list_for_booking(
        &self,
        booking_id: i32,
    ) -> Result<Vec<entity::booking_status_history::Model>, DbErr> {
        entity::prelude::BookingStatusHistory::find()
            .filter(entity::booking_status_history::Column::BookingId.eq(booking_id))
            .order_by_asc(entity::booking_status_history::Column::Id)
            .all(self.db)
            .await
    }
}
