use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251017_000004_habs_user::HabsUser;

static IDX_HOSTEL_OWNER_ID: &str = "idx-hostel-owner_id";
static IDX_HOSTEL_STATUS_CITY: &str = "idx-hostel-status-city";
static FK_HOSTEL_OWNER_ID: &str = "fk-hostel-owner_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Hostel::Table)
                    .if_not_exists()
                    .col(pk_auto(Hostel::Id))
                    .col(integer(Hostel::OwnerId))
                    .col(string(Hostel::Name))
                    .col(string_len(Hostel::HostelType, 8))
                    .col(text(Hostel::Description))
                    .col(string(Hostel::Address))
                    .col(string_null(Hostel::Landmark))
                    .col(string(Hostel::City))
                    .col(string(Hostel::State))
                    .col(string(Hostel::Pincode))
                    .col(string(Hostel::Country))
                    .col(double(Hostel::Latitude))
                    .col(double(Hostel::Longitude))
                    .col(string_null(Hostel::PlaceId))
                    .col(json(Hostel::NearbyUniversities))
                    .col(json(Hostel::NearbyDepartments))
                    .col(json(Hostel::Contact))
                    .col(json(Hostel::Facilities))
                    .col(json(Hostel::Images))
                    .col(json(Hostel::Mess))
                    .col(json(Hostel::Rules))
                    .col(string_len(Hostel::Status, 16))
                    .col(integer_null(Hostel::ApprovedBy))
                    .col(timestamp_null(Hostel::ApprovalDate))
                    .col(string_null(Hostel::RejectionReason))
                    .col(text_null(Hostel::AdminNotes))
                    .col(double(Hostel::RatingAverage).default(0.0))
                    .col(integer(Hostel::RatingTotalReviews).default(0))
                    .col(json(Hostel::RatingBreakdown))
                    .col(integer(Hostel::Views).default(0))
                    .col(integer(Hostel::BookingRequests).default(0))
                    .col(integer(Hostel::SuccessfulBookings).default(0))
                    .col(boolean(Hostel::IsFeatured).default(false))
                    .col(integer(Hostel::Priority).default(0))
                    .col(integer_null(Hostel::LastUpdatedBy))
                    .col(timestamp(Hostel::CreatedAt))
                    .col(timestamp(Hostel::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_HOSTEL_OWNER_ID)
                    .table(Hostel::Table)
                    .col(Hostel::OwnerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_HOSTEL_STATUS_CITY)
                    .table(Hostel::Table)
                    .col(Hostel::Status)
                    .col(Hostel::City)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_HOSTEL_OWNER_ID)
                    .from_tbl(Hostel::Table)
                    .from_col(Hostel::OwnerId)
                    .to_tbl(HabsUser::Table)
                    .to_col(HabsUser::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_HOSTEL_OWNER_ID)
                    .table(Hostel::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_HOSTEL_STATUS_CITY)
                    .table(Hostel::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_HOSTEL_OWNER_ID)
                    .table(Hostel::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Hostel::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Hostel {
    Table,
    Id,
    OwnerId,
    Name,
    HostelType,
    Description,
    Address,
    Landmark,
    City,
    State,
    Pincode,
    Country,
    Latitude,
    Longitude,
    PlaceId,
    NearbyUniversities,
    NearbyDepartments,
    Contact,
    Facilities,
    Images,
    Mess,
    Rules,
    Status,
    ApprovedBy,
    ApprovalDate,
    RejectionReason,
    AdminNotes,
    RatingAverage,
    RatingTotalReviews,
    RatingBreakdown,
    Views,
    BookingRequests,
    SuccessfulBookings,
    IsFeatured,
    Priority,
    LastUpdatedBy,
    CreatedAt,
    UpdatedAt,
}
