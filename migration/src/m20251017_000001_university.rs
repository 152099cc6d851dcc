use sea_orm_migration::{prelude::*, schema::*};

static IDX_UNIVERSITY_CITY_STATE: &str = "idx-university-city-state";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(University::Table)
                    .if_not_exists()
                    .col(pk_auto(University::Id))
                    .col(string(University::Name))
                    .col(string_null(University::ShortName))
                    .col(string_len(University::UniversityType, 16))
                    .col(integer_null(University::Established))
                    .col(string_null(University::Address))
                    .col(string(University::City))
                    .col(string(University::State))
                    .col(string_null(University::Pincode))
                    .col(double_null(University::Latitude))
                    .col(double_null(University::Longitude))
                    .col(string_null(University::Website))
                    .col(text_null(University::Description))
                    .col(integer(University::StudentCount).default(0))
                    .col(boolean(University::IsActive).default(true))
                    .col(timestamp(University::CreatedAt))
                    .col(timestamp(University::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_UNIVERSITY_CITY_STATE)
                    .table(University::Table)
                    .col(University::City)
                    .col(University::State)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_UNIVERSITY_CITY_STATE)
                    .table(University::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(University::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum University {
    Table,
    Id,
    Name,
    ShortName,
    UniversityType,
    Established,
    Address,
    City,
    State,
    Pincode,
    Latitude,
    Longitude,
    Website,
    Description,
    StudentCount,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
