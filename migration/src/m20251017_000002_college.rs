use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251017_000001_university::University;

static IDX_COLLEGE_UNIVERSITY_ID: &str = "idx-college-university_id";
static FK_COLLEGE_UNIVERSITY_ID: &str = "fk-college-university_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(College::Table)
                    .if_not_exists()
                    .col(pk_auto(College::Id))
                    .col(integer(College::UniversityId))
                    .col(string(College::Name))
                    .col(string_null(College::ShortName))
                    .col(string_len(College::CollegeType, 16))
                    .col(string_null(College::Address))
                    .col(string_null(College::City))
                    .col(double_null(College::Latitude))
                    .col(double_null(College::Longitude))
                    .col(boolean(College::IsActive).default(true))
                    .col(timestamp(College::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_COLLEGE_UNIVERSITY_ID)
                    .table(College::Table)
                    .col(College::UniversityId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_COLLEGE_UNIVERSITY_ID)
                    .from_tbl(College::Table)
                    .from_col(College::UniversityId)
                    .to_tbl(University::Table)
                    .to_col(University::Id)
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
                    .name(FK_COLLEGE_UNIVERSITY_ID)
                    .table(College::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_COLLEGE_UNIVERSITY_ID)
                    .table(College::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(College::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum College {
    Table,
    Id,
    UniversityId,
    Name,
    ShortName,
    CollegeType,
    Address,
    City,
    Latitude,
    Longitude,
    IsActive,
    CreatedAt,
}
