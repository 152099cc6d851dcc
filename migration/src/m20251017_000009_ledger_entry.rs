use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251017_000007_booking::Booking;

static IDX_LEDGER_ENTRY_BOOKING_ID: &str = "idx-ledger_entry-booking_id";
static FK_LEDGER_ENTRY_BOOKING_ID: &str = "fk-ledger_entry-booking_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LedgerEntry::Table)
                    .if_not_exists()
                    .col(pk_auto(LedgerEntry::Id))
                    .col(integer(LedgerEntry::BookingId))
                    .col(string_len(LedgerEntry::ContentHash, 64))
                    .col(integer(LedgerEntry::RecordedBy))
                    .col(timestamp(LedgerEntry::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_LEDGER_ENTRY_BOOKING_ID)
                    .table(LedgerEntry::Table)
                    .col(LedgerEntry::BookingId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_LEDGER_ENTRY_BOOKING_ID)
                    .from_tbl(LedgerEntry::Table)
                    .from_col(LedgerEntry::BookingId)
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
                    .name(FK_LEDGER_ENTRY_BOOKING_ID)
                    .table(LedgerEntry::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_LEDGER_ENTRY_BOOKING_ID)
                    .table(LedgerEntry::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(LedgerEntry::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum LedgerEntry {
    Table,
    Id,
    BookingId,
    ContentHash,
    RecordedBy,
    CreatedAt,
}
