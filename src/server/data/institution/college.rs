use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::model::institution::CreateCollegeDto;

pub struct CollegeRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CollegeRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        university_id: i32,
        college: CreateCollegeDto,
    ) -> Result<entity::college::Model, DbErr> {
        entity::college::ActiveModel {
            university_id: ActiveValue::Set(university_id),
            name: ActiveValue::Set(college.name),
            short_name: ActiveValue::Set(college.short_name),
            college_type: ActiveValue::Set(college.college_type),
            address: ActiveValue::Set(college.address),
            city: ActiveValue::Set(college.city),
            latitude: ActiveValue::Set(college.latitude),
            longitude: ActiveValue::Set(college.longitude),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Finds an active college belonging to the given university
    pub async fn get_in_university(
        &self,
        university_id: i32,
        college_id: i32,
    ) -> Result<Option<entity::college::Model>, DbErr> {
        entity::prelude::College::find_by_id(college_id)
            .filter(entity::college::Column::UniversityId.eq(university_id))
            .filter(entity::college::Column::IsActive.eq(true))
            .one(self.db)
            .await
    }

    /// Active colleges of a university ordered by name
    pub async fn list_by_university(
        &self,
        university_id: i32,
    ) -> Result<Vec<entity::college::Model>, DbErr> {
        entity::prelude::College::find()
            .filter(entity::college::Column::UniversityId.eq(university_id))
            .filter(entity::college::Column::IsActive.eq(true))
            .order_by_asc(entity::college::Column::Name)
            .all(self.db)
            .await
    }
}
