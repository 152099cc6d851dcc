use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(HabsUser::Table)
                    .if_not_exists()
                    .col(pk_auto(HabsUser::Id))
                    .col(string(HabsUser::Name))
                    .col(string_uniq(HabsUser::Email))
                    .col(string(HabsUser::PasswordHash))
                    .col(string_null(HabsUser::Phone))
                    .col(string_null(HabsUser::ProfileImage))
                    .col(string_len(HabsUser::Role, 16))
                    .col(boolean(HabsUser::IsVerified).default(false))
                    .col(boolean(HabsUser::IsSuspended).default(false))
                    .col(string_null(HabsUser::SuspensionReason))
                    .col(timestamp_null(HabsUser::SuspendedAt))
                    .col(integer_null(HabsUser::SuspendedBy))
                    .col(timestamp_null(HabsUser::LastLogin))
                    .col(integer(HabsUser::LoginCount).default(0))
                    .col(json_null(HabsUser::StudentProfile))
                    .col(json_null(HabsUser::OwnerProfile))
                    .col(timestamp(HabsUser::CreatedAt))
                    .col(timestamp(HabsUser::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HabsUser::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum HabsUser {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    Phone,
    ProfileImage,
    Role,
    IsVerified,
    IsSuspended,
    SuspensionReason,
    SuspendedAt,
    SuspendedBy,
    LastLogin,
    LoginCount,
    StudentProfile,
    OwnerProfile,
    CreatedAt,
    UpdatedAt,
}
