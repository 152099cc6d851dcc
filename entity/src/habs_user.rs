use sea_orm::entity::prelude::*;

use crate::{
    sea_orm_active_enums::UserRole,
    types::{OwnerProfile, StudentProfile},
};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "habs_user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub profile_image: Option<String>,
    pub role: UserRole,
    pub is_verified: bool,
    pub is_suspended: bool,
    pub suspension_reason: Option<String>,
    pub suspended_at: Option<DateTime>,
    pub suspended_by: Option<i32>,
    pub last_login: Option<DateTime>,
    pub login_count: i32,
    #[sea_orm(column_type = "Json", nullable)]
    pub student_profile: Option<StudentProfile>,
    #[sea_orm(column_type = "Json", nullable)]
    pub owner_profile: Option<OwnerProfile>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::hostel::Entity")]
    Hostel,
}

impl Related<super::hostel::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Hostel.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
