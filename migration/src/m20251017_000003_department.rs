use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20251017_000001_university::University, m20251017_000002_college::College};

static IDX_DEPARTMENT_COLLEGE_ID: &str = "idx-department-college_id";
static FK_DEPARTMENT_COLLEGE_ID: &str = "fk-department-college_id";
static FK_DEPARTMENT_UNIVERSITY_ID: &str = "fk-department-university_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Department::Table)
                    .if_not_exists()
                    .col(pk_auto(Department::Id))
                    .col(integer(Department::CollegeId))
                    .col(integer(Department::UniversityId))
                    .col(string(Department::Name))
                    .col(string_null(Department::ShortName))
                    .col(string_len(Department::Category, 16))
                    .col(double_null(Department::Latitude))
                    .col(double_null(Department::Longitude))
                    .col(boolean(Department::IsActive).default(true))
                    .col(timestamp(Department::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_DEPARTMENT_COLLEGE_ID)
                    .table(Department::Table)
                    .col(Department::CollegeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_DEPARTMENT_COLLEGE_ID)
                    .from_tbl(Department::Table)
                    .from_col(Department::CollegeId)
                    .to_tbl(College::Table)
                    .to_col(College::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_DEPARTMENT_UNIVERSITY_ID)
                    .from_tbl(Department::Table)
                    .from_col(Department::UniversityId)
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
                    .name(FK_DEPARTMENT_UNIVERSITY_ID)
                    .table(Department::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_DEPARTMENT_COLLEGE_ID)
                    .table(Department::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_DEPARTMENT_COLLEGE_ID)
                    .table(Department::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Department::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Department {
    Table,
    Id,
    CollegeId,
    UniversityId,
    Name,
    ShortName,
    Category,
    Latitude,
    Longitude,
    IsActive,
    CreatedAt,
}
