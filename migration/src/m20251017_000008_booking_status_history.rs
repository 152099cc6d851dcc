use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251017_000007_booking::Booking;

static IDX_STATUS_HISTORY_BOOKING_ID: &str = "idx-booking_status_history-booking_id";
static FK_STATUS_HISTORY_BOOKING_ID: &str = "fk-booking_status_history-booking_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BookingStatusHistory::Table)
                    .if_not_exists()
                    .col(pk_auto(BookingStatusHistory::Id))
                    .col(integer(BookingStatusHistory::BookingId))
                    .col(string_len(BookingStatusHistory::Status, 16))
                    .col(integer_null(BookingStatusHistory::UpdatedBy))
                    .col(string_null(BookingStatusHistory::Reason))
                    .col(text_null(BookingStatusHistory::Notes))
                    .col(timestamp(BookingStatusHistory::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_STATUS_HISTORY_BOOKING_ID)
                    .table(BookingStatusHistory::Table)
                    .col(BookingStatusHistory::BookingId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_STATUS_HISTORY_BOOKING_ID)
                    .from_tbl(BookingStatusHistory::Table)
                    .from_col(BookingStatusHistory::BookingId)
                    .to_tbl(Booking::Table)
                    .to_col(Booking::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_STATUS_HISTORY_BOOKING_ID)
                    .table(BookingStatusHistory::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_STATUS_HISTORY_BOOKING_ID)
                    .table(BookingStatusHistory::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(BookingStatusHistory::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum BookingStatusHistory {
    Table,
    Id,
    BookingId,
    Status,
    UpdatedBy,
    Reason,
    Notes,
    CreatedAt,
}
