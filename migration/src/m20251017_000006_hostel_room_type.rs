use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251017_000005_hostel::Hostel;

static IDX_ROOM_TYPE_HOSTEL_ID_ROOM_TYPE: &str = "idx-hostel_room_type-hostel_id-room_type";
static FK_ROOM_TYPE_HOSTEL_ID: &str = "fk-hostel_room_type-hostel_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(HostelRoomType::Table)
                    .if_not_exists()
                    .col(pk_auto(HostelRoomType::Id))
                    .col(integer(HostelRoomType::HostelId))
                    .col(integer(HostelRoomType::Position))
                    .col(string_len(HostelRoomType::RoomType, 8))
                    .col(integer(HostelRoomType::TotalRooms))
                    .col(integer(HostelRoomType::AvailableRooms))
                    .col(integer(HostelRoomType::BedsPerRoom))
                    .col(double(HostelRoomType::PricePerBed))
                    .col(double(HostelRoomType::SecurityDeposit).default(0.0))
                    .col(json(HostelRoomType::Amenities))
                    .col(integer(HostelRoomType::Version).default(0))
                    .check(Expr::col(HostelRoomType::AvailableRooms).gte(0))
                    .check(
                        Expr::col(HostelRoomType::AvailableRooms)
                            .lte(Expr::col(HostelRoomType::TotalRooms)),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ROOM_TYPE_HOSTEL_ID_ROOM_TYPE)
                    .table(HostelRoomType::Table)
                    .col(HostelRoomType::HostelId)
                    .col(HostelRoomType::RoomType)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_ROOM_TYPE_HOSTEL_ID)
                    .from_tbl(HostelRoomType::Table)
                    .from_col(HostelRoomType::HostelId)
                    .to_tbl(Hostel::Table)
                    .to_col(Hostel::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_ROOM_TYPE_HOSTEL_ID)
                    .table(HostelRoomType::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_ROOM_TYPE_HOSTEL_ID_ROOM_TYPE)
                    .table(HostelRoomType::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(HostelRoomType::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum HostelRoomType {
    Table,
    Id,
    HostelId,
    Position,
    RoomType,
    TotalRooms,
    AvailableRooms,
    BedsPerRoom,
    PricePerBed,
    SecurityDeposit,
    Amenities,
    Version,
}
