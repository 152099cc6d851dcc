//! University, college, and department fixtures.

use chrono::Utc;
use entity::sea_orm_active_enums::{CollegeType, DepartmentCategory, UniversityType};
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn institution(&self) -> InstitutionFixtures<'_> {
        InstitutionFixtures { context: self }
    }
}

pub struct InstitutionFixtures<'a> {
    context: &'a TestContext,
}

impl<'a> InstitutionFixtures<'a> {
    /// Insert an active central university in Delhi at the given coordinates.
    pub async fn insert_university(
        &self,
        name: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<entity::university::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::University::insert(entity::university::ActiveModel {
                name: ActiveValue::Set(name.to_string()),
                short_name: ActiveValue::Set(None),
                university_type: ActiveValue::Set(UniversityType::Central),
                established: ActiveValue::Set(Some(1922)),
                address: ActiveValue::Set(None),
                city: ActiveValue::Set("Delhi".to_string()),
                state: ActiveValue::Set("Delhi".to_string()),
                pincode: ActiveValue::Set(Some("110007".to_string())),
                latitude: ActiveValue::Set(Some(latitude)),
                longitude: ActiveValue::Set(Some(longitude)),
                website: ActiveValue::Set(None),
                description: ActiveValue::Set(None),
                is_active: ActiveValue::Set(true),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.context.db)
            .await?,
        )
    }

    pub async fn insert_college(
        &self,
        university_id: i32,
        name: &str,
    ) -> Result<entity::college::Model, TestError> {
        Ok(
            entity::prelude::College::insert(entity::college::ActiveModel {
                university_id: ActiveValue::Set(university_id),
                name: ActiveValue::Set(name.to_string()),
                short_name: ActiveValue::Set(None),
                college_type: ActiveValue::Set(CollegeType::Constituent),
                address: ActiveValue::Set(None),
                city: ActiveValue::Set(Some("Delhi".to_string())),
                latitude: ActiveValue::Set(None),
                longitude: ActiveValue::Set(None),
                is_active: ActiveValue::Set(true),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.context.db)
            .await?,
        )
    }

    pub async fn insert_department(
        &self,
        college_id: i32,
        university_id: i32,
        name: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<entity::department::Model, TestError> {
        Ok(
            entity::prelude::Department::insert(entity::department::ActiveModel {
                college_id: ActiveValue::Set(college_id),
                university_id: ActiveValue::Set(university_id),
                name: ActiveValue::Set(name.to_string()),
                short_name: ActiveValue::Set(None),
                category: ActiveValue::Set(DepartmentCategory::Engineering),
                latitude: ActiveValue::Set(Some(latitude)),
                longitude: ActiveValue::Set(Some(longitude)),
                is_active: ActiveValue::Set(true),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.context.db)
            .await?,
        )
    }
}
