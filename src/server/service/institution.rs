//! University, college, and department catalog.

use std::collections::HashMap;

use entity::sea_orm_active_enums::UniversityType;
use sea_orm::DatabaseConnection;

use crate::{
    model::{
        api::{PageQuery, PaginationDto},
        institution::{
            CollegeDto, CreateCollegeDto, CreateDepartmentDto, CreateUniversityDto,
            DepartmentDto, StateStatsDto, UniversityDetailDto, UniversityDto, UniversityListDto,
            UniversityQuery, UniversityStatsDto, UniversityTotalsDto, UpdateUniversityDto,
        },
    },
    server::{
        data::institution::{
            college::CollegeRepository,
            department::DepartmentRepository,
            university::{UniversityFilter, UniversityRepository},
        },
        error::Error,
    },
};

const DEFAULT_PAGE_SIZE: u64 = 20;
const TOP_STATES: usize = 10;

fn university_not_found() -> Error {
    Error::NotFound("University not found".to_string())
}

fn college_not_found() -> Error {
    Error::NotFound("College not found".to_string())
}

pub struct InstitutionService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> InstitutionService<'a> {
    /// Creates a new instance of [`InstitutionService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_universities(
        &self,
        query: UniversityQuery,
    ) -> Result<UniversityListDto, Error> {
        let (page, limit) = PageQuery::resolve(query.page, query.limit, DEFAULT_PAGE_SIZE);

        let filter = UniversityFilter {
            state: query.state.as_deref(),
            city: query.city.as_deref(),
            university_type: query.university_type,
            search: query.search.as_deref(),
        };

        let (universities, total) = UniversityRepository::new(self.db)
            .list(filter, page, limit)
            .await?;

        Ok(UniversityListDto {
            universities: universities.into_iter().map(UniversityDto::from).collect(),
            pagination: PaginationDto::new(page, limit, total),
        })
    }

    /// Counts of active universities by type and by state, with their student totals
    pub async fn university_stats(&self) -> Result<UniversityStatsDto, Error> {
        let census = UniversityRepository::new(self.db).census().await?;

        let mut stats = UniversityTotalsDto::default();
        let mut by_state: HashMap<String, StateStatsDto> = HashMap::new();

        for (university_type, state, students) in census {
            stats.total_universities += 1;
            stats.total_students += i64::from(students);
            match university_type {
                UniversityType::Central => stats.central_universities += 1,
                UniversityType::State => stats.state_universities += 1,
                UniversityType::Private => stats.private_universities += 1,
                UniversityType::Deemed => stats.deemed_universities += 1,
            }

            let entry = by_state.entry(state.clone()).or_insert(StateStatsDto {
                state,
                count: 0,
                students: 0,
            });
            entry.count += 1;
            entry.students += i64::from(students);
        }

        let mut state_wise_stats: Vec<StateStatsDto> = by_state.into_values().collect();
        state_wise_stats.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.state.cmp(&b.state)));
        state_wise_stats.truncate(TOP_STATES);

        Ok(UniversityStatsDto {
            stats,
            state_wise_stats,
        })
    }

    /// An active university together with its active colleges
    pub async fn get_university(&self, id: i32) -> Result<UniversityDetailDto, Error> {
        let university = UniversityRepository::new(self.db)
            .get_active(id)
            .await?
            .ok_or_else(university_not_found)?;

        let colleges = CollegeRepository::new(self.db)
            .list_by_university(university.id)
            .await?;

        Ok(UniversityDetailDto {
            university: university.into(),
            colleges: colleges.into_iter().map(CollegeDto::from).collect(),
        })
    }

    pub async fn list_colleges(&self, university_id: i32) -> Result<Vec<CollegeDto>, Error> {
        UniversityRepository::new(self.db)
            .get_active(university_id)
            .await?
            .ok_or_else(university_not_found)?;

        let colleges = CollegeRepository::new(self.db)
            .list_by_university(university_id)
            .await?;

        Ok(colleges.into_iter().map(CollegeDto::from).collect())
    }

    /// Departments of a college, which must belong to the given university
    pub async fn list_departments(
        &self,
        university_id: i32,
        college_id: i32,
    ) -> Result<Vec<DepartmentDto>, Error> {
        CollegeRepository::new(self.db)
            .get_in_university(university_id, college_id)
            .await?
            .ok_or_else(college_not_found)?;

        let departments = DepartmentRepository::new(self.db)
            .list_by_college(college_id)
            .await?;

        Ok(departments.into_iter().map(DepartmentDto::from).collect())
    }

    pub async fn get_department(&self, id: i32) -> Result<DepartmentDto, Error> {
        let department = DepartmentRepository::new(self.db)
            .get_active(id)
            .await?
            .ok_or_else(|| Error::NotFound("Department not found".to_string()))?;

        Ok(department.into())
    }

    pub async fn create_university(
        &self,
        university: CreateUniversityDto,
    ) -> Result<UniversityDto, Error> {
        let university = UniversityRepository::new(self.db).create(university).await?;

        tracing::info!(university_id = university.id, "Created university");

        Ok(university.into())
    }

    pub async fn update_university(
        &self,
        id: i32,
        changes: UpdateUniversityDto,
    ) -> Result<UniversityDto, Error> {
        let university = UniversityRepository::new(self.db)
            .update(id, changes)
            .await?
            .ok_or_else(university_not_found)?;

        Ok(university.into())
    }

    /// Hides a university from the catalog; its rows are kept for existing references
    pub async fn deactivate_university(&self, id: i32) -> Result<(), Error> {
        UniversityRepository::new(self.db)
            .update(
                id,
                UpdateUniversityDto {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await?
            .ok_or_else(university_not_found)?;

        tracing::info!(university_id = id, "Deactivated university");

        Ok(())
    }

    pub async fn create_college(
        &self,
        university_id: i32,
        college: CreateCollegeDto,
    ) -> Result<CollegeDto, Error> {
        UniversityRepository::new(self.db)
            .get(university_id)
            .await?
            .ok_or_else(university_not_found)?;

        let college = CollegeRepository::new(self.db)
            .create(university_id, college)
            .await?;

        Ok(college.into())
    }

    pub async fn create_department(
        &self,
        university_id: i32,
        college_id: i32,
        department: CreateDepartmentDto,
    ) -> Result<DepartmentDto, Error> {
        CollegeRepository::new(self.db)
            .get_in_university(university_id, college_id)
            .await?
            .ok_or_else(college_not_found)?;

        let department = DepartmentRepository::new(self.db)
            .create(university_id, college_id, department)
            .await?;

        Ok(department.into())
    }
}

#[cfg(test)]
mod tests {
    use habs_test_utils::prelude::*;

    use crate::{
        model::institution::{CreateDepartmentDto, UniversityQuery},
        server::{error::Error, service::institution::InstitutionService},
    };

    /// Expect a deactivated university to disappear from listing and lookup
    #[tokio::test]
    async fn deactivated_university_is_hidden() -> Result<(), TestError> {
        let test = TestBuilder::new().with_institution_tables().build().await?;
        let kept = test
            .institution()
            .insert_university("University of Delhi", 28.6889, 77.21)
            .await?;
        let hidden = test
            .institution()
            .insert_university("Closed University", 28.6, 77.2)
            .await?;
        let service = InstitutionService::new(&test.db);

        service.deactivate_university(hidden.id).await.unwrap();

        let listed = service
            .list_universities(UniversityQuery::default())
            .await
            .unwrap();
        assert_eq!(listed.pagination.total_items, 1);
        assert_eq!(listed.universities[0].id, kept.id);
        assert!(matches!(
            service.get_university(hidden.id).await,
            Err(Error::NotFound(_))
        ));

        Ok(())
    }

    /// Expect departments to be refused for a college of another university
    #[tokio::test]
    async fn department_requires_matching_university() -> Result<(), TestError> {
        let test = TestBuilder::new().with_institution_tables().build().await?;
        let delhi = test
            .institution()
            .insert_university("University of Delhi", 28.6889, 77.21)
            .await?;
        let other = test
            .institution()
            .insert_university("Other University", 28.5, 77.1)
            .await?;
        let college = test.institution().insert_college(delhi.id, "Hindu College").await?;
        let service = InstitutionService::new(&test.db);

        let result = service
            .create_department(
                other.id,
                college.id,
                CreateDepartmentDto {
                    name: "Physics".to_string(),
                    short_name: None,
                    category: entity::sea_orm_active_enums::DepartmentCategory::Science,
                    latitude: None,
                    longitude: None,
                },
            )
            .await;

        assert!(matches!(result, Err(Error::NotFound(_))));
        assert!(service.list_departments(delhi.id, college.id).await.unwrap().is_empty());

        Ok(())
    }

    /// Expect the university detail to include its colleges
    #[tokio::test]
    async fn university_detail_lists_colleges() -> Result<(), TestError> {
        let test = TestBuilder::new().with_institution_tables().build().await?;
        let university = test
            .institution()
            .insert_university("University of Delhi", 28.6889, 77.21)
            .await?;
        test.institution().insert_college(university.id, "Hindu College").await?;

        let detail = InstitutionService::new(&test.db)
            .get_university(university.id)
            .await
            .unwrap();

        assert_eq!(detail.colleges.len(), 1);
        assert_eq!(detail.colleges[0].name, "Hindu College");

        Ok(())
    }

    /// Expect totals by type and per-state counts over active universities only
    #[tokio::test]
    async fn summarises_universities() -> Result<(), TestError> {
        use entity::sea_orm_active_enums::UniversityType;

        use crate::model::institution::UpdateUniversityDto;

        let test = TestBuilder::new().with_institution_tables().build().await?;
        let service = InstitutionService::new(&test.db);

        let universities = [
            ("University of Delhi", UniversityType::Central, "Delhi", 90000),
            ("Guru Gobind Singh University", UniversityType::State, "Delhi", 40000),
            ("University of Mumbai", UniversityType::State, "Maharashtra", 60000),
            ("Closed University", UniversityType::Private, "Goa", 500),
        ];
        for (name, university_type, state, student_count) in universities {
            let university = test.institution().insert_university(name, 28.6, 77.2).await?;
            service
                .update_university(
                    university.id,
                    UpdateUniversityDto {
                        university_type: Some(university_type),
                        state: Some(state.to_string()),
                        student_count: Some(student_count),
                        is_active: Some(state != "Goa"),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();
        }

        let summary = service.university_stats().await.unwrap();

        assert_eq!(summary.stats.total_universities, 3);
        assert_eq!(summary.stats.central_universities, 1);
        assert_eq!(summary.stats.state_universities, 2);
        assert_eq!(summary.stats.private_universities, 0);
        assert_eq!(summary.stats.total_students, 190000);
        assert_eq!(summary.state_wise_stats.len(), 2);
        assert_eq!(summary.state_wise_stats[0].state, "Delhi");
        assert_eq!(summary.state_wise_stats[0].count, 2);
        assert_eq!(summary.state_wise_stats[0].students, 130000);

        Ok(())
    }

    /// Expect zeroed totals for an empty catalog
    #[tokio::test]
    async fn empty_catalog_stats() -> Result<(), TestError> {
        let test = TestBuilder::new().with_institution_tables().build().await?;

        let summary = InstitutionService::new(&test.db)
            .university_stats()
            .await
            .unwrap();

        assert_eq!(summary.stats, Default::default());
        assert!(summary.state_wise_stats.is_empty());

        Ok(())
    }
}
