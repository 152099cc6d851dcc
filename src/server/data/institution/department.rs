use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::model::institution::CreateDepartmentDto;

pub struct DepartmentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DepartmentRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        university_id: i32,
        college_id: i32,
        department: CreateDepartmentDto,
    ) -> Result<entity::department::Model, DbErr> {
        entity::department::ActiveModel {
            college_id: ActiveValue::Set(college_id),
            university_id: ActiveValue::Set(university_id),
            name: ActiveValue::Set(department.name),
            short_name: ActiveValue::Set(department.short_name),
            category: ActiveValue::Set(department.category),
            latitude: ActiveValue::Set(department.latitude),
            longitude: ActiveValue::Set(department.longitude),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn get_active(&self, id: i32) -> Result<Option<entity::department::Model>, DbErr> {
        entity::prelude::Department::find_by_id(id)
            .filter(entity::department::Column::IsActive.eq(true))
            .one(self.db)
            .await
    }

    /// Active departments of a college ordered by name
    pub async fn list_by_college(
        &self,
        college_id: i32,
    ) -> Result<Vec<entity::department::Model>, DbErr> {
        entity::prelude::Department::find()
            .filter(entity::department::Column::CollegeId.eq(college_id))
            .filter(entity::department::Column::IsActive.eq(true))
            .order_by_asc(entity::department::Column::Name)
            .all(self.db)
            .await
    }

    /// Active departments with known coordinates
    pub async fn list_located(&self) -> Result<Vec<entity::department::Model>, DbErr> {
        entity::prelude::Department::find()
            .filter(entity::department::Column::IsActive.eq(true))
            .filter(entity::department::Column::Latitude.is_not_null())
            .filter(entity::department::Column::Longitude.is_not_null())
            .all(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use habs_test_utils::prelude::*;

    use crate::server::data::institution::department::DepartmentRepository;

    /// Expect only departments with coordinates to be returned for proximity checks
    #[tokio::test]
    async fn lists_located_departments() -> Result<(), TestError> {
        let test = TestBuilder::new().with_institution_tables().build().await?;
        let university = test
            .institution()
            .insert_university("University of Delhi", 28.68, 77.21)
            .await?;
        let college = test
            .institution()
            .insert_college(university.id, "Faculty of Technology")
            .await?;
        let department = test
            .institution()
            .insert_department(college.id, university.id, "Computer Science", 28.69, 77.21)
            .await?;

        let repo = DepartmentRepository::new(&test.db);
        let located = repo.list_located().await?;
        let by_college = repo.list_by_college(college.id).await?;

        assert_eq!(located.len(), 1);
        assert_eq!(by_college[0].id, department.id);

        Ok(())
    }
}
