use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20251017_000004_habs_user::HabsUser, m20251017_000005_hostel::Hostel};

static IDX_BOOKING_STUDENT_ID: &str = "idx-booking-student_id";
static IDX_BOOKING_HOSTEL_OWNER_ID: &str = "idx-booking-hostel_owner_id";
static IDX_BOOKING_HOSTEL_ID_STATUS: &str = "idx-booking-hostel_id-status";
static FK_BOOKING_STUDENT_ID: &str = "fk-booking-student_id";
static FK_BOOKING_HOSTEL_OWNER_ID: &str = "fk-booking-hostel_owner_id";
static FK_BOOKING_HOSTEL_ID: &str = "fk-booking-hostel_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Booking::Table)
                    .if_not_exists()
                    .col(pk_auto(Booking::Id))
                    .col(integer(Booking::StudentId))
                    .col(integer(Booking::HostelId))
                    .col(integer(Booking::HostelOwnerId))
                    .col(string_len(Booking::RoomType, 8))
                    .col(integer(Booking::BedsRequested))
                    .col(date(Booking::CheckInDate))
                    .col(date(Booking::CheckOutDate))
                    .col(integer(Booking::Months))
                    .col(double(Booking::PricePerBed))
                    .col(double(Booking::TotalBedCost))
                    .col(double(Booking::MessCharges))
                    .col(double(Booking::SecurityDeposit))
                    .col(double(Booking::TotalAmount))
                    .col(double(Booking::Gst))
                    .col(double(Booking::FinalAmount))
                    .col(double(Booking::Discount).default(0.0))
                    .col(double(Booking::AdvanceAmount).default(0.0))
                    .col(string_len(Booking::Status, 16))
                    .col(json(Booking::Preferences))
                    .col(json_null(Booking::OwnerResponse))
                    .col(json_null(Booking::CheckIn))
                    .col(json_null(Booking::CheckOut))
                    .col(json(Booking::Payment))
                    .col(json_null(Booking::Review))
                    .col(json(Booking::Communications))
                    .col(json(Booking::Documents))
                    .col(timestamp(Booking::AutoCancelAt))
                    .col(timestamp(Booking::CreatedAt))
                    .col(timestamp(Booking::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        for (name, col) in [
            (IDX_BOOKING_STUDENT_ID, Booking::StudentId),
            (IDX_BOOKING_HOSTEL_OWNER_ID, Booking::HostelOwnerId),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Booking::Table)
                        .col(col)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .create_index(
                Index::create()
                    .name(IDX_BOOKING_HOSTEL_ID_STATUS)
                    .table(Booking::Table)
                    .col(Booking::HostelId)
                    .col(Booking::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_BOOKING_STUDENT_ID)
                    .from_tbl(Booking::Table)
                    .from_col(Booking::StudentId)
                    .to_tbl(HabsUser::Table)
                    .to_col(HabsUser::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_BOOKING_HOSTEL_OWNER_ID)
                    .from_tbl(Booking::Table)
                    .from_col(Booking::HostelOwnerId)
                    .to_tbl(HabsUser::Table)
                    .to_col(HabsUser::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_BOOKING_HOSTEL_ID)
                    .from_tbl(Booking::Table)
                    .from_col(Booking::HostelId)
                    .to_tbl(Hostel::Table)
                    .to_col(Hostel::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            FK_BOOKING_HOSTEL_ID,
            FK_BOOKING_HOSTEL_OWNER_ID,
            FK_BOOKING_STUDENT_ID,
        ] {
            manager
                .drop_foreign_key(
                    ForeignKey::drop()
                        .name(name)
                        .table(Booking::Table)
                        .to_owned(),
                )
                .await?;
        }

        for name in [
            IDX_BOOKING_HOSTEL_ID_STATUS,
            IDX_BOOKING_HOSTEL_OWNER_ID,
            IDX_BOOKING_STUDENT_ID,
        ] {
            manager
                .drop_index(Index::drop().name(name).table(Booking::Table).to_owned())
                .await?;
        }

        manager
            .drop_table(Table::drop().table(Booking::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Booking {
    Table,
    Id,
    StudentId,
    HostelId,
    HostelOwnerId,
    RoomType,
    BedsRequested,
    CheckInDate,
    CheckOutDate,
    Months,
    PricePerBed,
    TotalBedCost,
    MessCharges,
    SecurityDeposit,
    TotalAmount,
    Gst,
    FinalAmount,
    Discount,
    AdvanceAmount,
    Status,
    Preferences,
    OwnerResponse,
    CheckIn,
    CheckOut,
    Payment,
    Review,
    Communications,
    Documents,
    AutoCancelAt,
    CreatedAt,
    UpdatedAt,
}
