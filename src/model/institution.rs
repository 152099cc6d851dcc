use chrono::NaiveDateTime;
use entity::sea_orm_active_enums::{CollegeType, DepartmentCategory, UniversityType};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::model::api::PaginationDto;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UniversityDto {
    pub id: i32,
    pub name: String,
    pub short_name: Option<String>,
    pub university_type: UniversityType,
    pub established: Option<i32>,
    pub address: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub student_count: i32,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

impl From<entity::university::Model> for UniversityDto {
    fn from(model: entity::university::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            short_name: model.short_name,
            university_type: model.university_type,
            established: model.established,
            address: model.address,
            city: model.city,
            state: model.state,
            pincode: model.pincode,
            latitude: model.latitude,
            longitude: model.longitude,
            website: model.website,
            description: model.description,
            student_count: model.student_count,
            is_active: model.is_active,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CollegeDto {
    pub id: i32,
    pub university_id: i32,
    pub name: String,
    pub short_name: Option<String>,
    pub college_type: CollegeType,
    pub address: Option<String>,
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<entity::college::Model> for CollegeDto {
    fn from(model: entity::college::Model) -> Self {
        Self {
            id: model.id,
            university_id: model.university_id,
            name: model.name,
            short_name: model.short_name,
            college_type: model.college_type,
            address: model.address,
            city: model.city,
            latitude: model.latitude,
            longitude: model.longitude,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentDto {
    pub id: i32,
    pub college_id: i32,
    pub university_id: i32,
    pub name: String,
    pub short_name: Option<String>,
    pub category: DepartmentCategory,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<entity::department::Model> for DepartmentDto {
    fn from(model: entity::department::Model) -> Self {
        Self {
            id: model.id,
            college_id: model.college_id,
            university_id: model.university_id,
            name: model.name,
            short_name: model.short_name,
            category: model.category,
            latitude: model.latitude,
            longitude: model.longitude,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UniversityDetailDto {
    pub university: UniversityDto,
    pub colleges: Vec<CollegeDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UniversityListDto {
    pub universities: Vec<UniversityDto>,
    pub pagination: PaginationDto,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UniversityTotalsDto {
    pub total_universities: u64,
    pub central_universities: u64,
    pub state_universities: u64,
    pub private_universities: u64,
    pub deemed_universities: u64,
    pub total_students: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StateStatsDto {
    pub state: String,
    pub count: u64,
    pub students: i64,
}

/// Catalog totals over active universities
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UniversityStatsDto {
    pub stats: UniversityTotalsDto,
    /// States with the most universities, at most ten
    pub state_wise_stats: Vec<StateStatsDto>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UniversityQuery {
    pub state: Option<String>,
    pub city: Option<String>,
    #[serde(rename = "type")]
    pub university_type: Option<UniversityType>,
    /// Case-insensitive match against name or short name
    pub search: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUniversityDto {
    #[validate(length(min = 2, max = 200))]
    pub name: String,
    pub short_name: Option<String>,
    pub university_type: UniversityType,
    #[validate(range(min = 1800, max = 2100))]
    pub established: Option<i32>,
    pub address: Option<String>,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "State is required"))]
    pub state: String,
    pub pincode: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
    #[validate(url)]
    pub website: Option<String>,
    pub description: Option<String>,
    /// Enrolled students across all colleges
    #[validate(range(min = 0))]
    #[serde(default)]
    pub student_count: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUniversityDto {
    #[validate(length(min = 2, max = 200))]
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub university_type: Option<UniversityType>,
    pub established: Option<i32>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
    #[validate(url)]
    pub website: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub student_count: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCollegeDto {
    #[validate(length(min = 2, max = 200))]
    pub name: String,
    pub short_name: Option<String>,
    pub college_type: CollegeType,
    pub address: Option<String>,
    pub city: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDepartmentDto {
    #[validate(length(min = 2, max = 200))]
    pub name: String,
    pub short_name: Option<String>,
    pub category: DepartmentCategory,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}
