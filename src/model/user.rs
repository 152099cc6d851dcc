use chrono::NaiveDateTime;
use entity::{
    sea_orm_active_enums::UserRole,
    types::{OwnerProfile, StudentProfile},
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::model::api::PaginationDto;

/// Indian mobile number: ten digits starting with 6-9
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let mut chars = phone.chars();
    let valid = phone.len() == 10
        && matches!(chars.next(), Some('6'..='9'))
        && chars.all(|c| c.is_ascii_digit());

    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("phone").with_message("Please provide a valid phone number".into()))
    }
}

/// Public view of an account, never carries credentials
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub profile_image: Option<String>,
    pub role: UserRole,
    pub is_verified: bool,
    pub is_suspended: bool,
    pub suspension_reason: Option<String>,
    pub last_login: Option<NaiveDateTime>,
    pub login_count: i32,
    pub student_profile: Option<StudentProfile>,
    pub owner_profile: Option<OwnerProfile>,
    pub created_at: NaiveDateTime,
}

impl From<entity::habs_user::Model> for UserDto {
    fn from(user: entity::habs_user::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            profile_image: user.profile_image,
            role: user.role,
            is_verified: user.is_verified,
            is_suspended: user.is_suspended,
            suspension_reason: user.suspension_reason,
            last_login: user.last_login,
            login_count: user.login_count,
            student_profile: user.student_profile,
            owner_profile: user.owner_profile,
            created_at: user.created_at,
        }
    }
}

/// Roles a visitor may sign up as; administrators are provisioned separately
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationRole {
    Student,
    HostelOwner,
}

impl From<RegistrationRole> for UserRole {
    fn from(role: RegistrationRole) -> Self {
        match role {
            RegistrationRole::Student => UserRole::Student,
            RegistrationRole::HostelOwner => UserRole::HostelOwner,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDto {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: String,
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    pub role: RegistrationRole,
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginDto {
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Issued bearer token together with the signed-in account
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthResponseDto {
    pub token: String,
    pub user: UserDto,
}

/// Business details an owner may edit; approval fields are admin-controlled
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerProfileUpdateDto {
    pub business_name: Option<String>,
    pub business_registration: Option<String>,
    #[validate(custom(function = "validate_phone"))]
    pub business_phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileDto {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: Option<String>,
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
    #[validate(url(message = "Profile image must be a URL"))]
    pub profile_image: Option<String>,
    pub student_profile: Option<StudentProfile>,
    #[validate(nested)]
    pub owner_profile: Option<OwnerProfileUpdateDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordDto {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    #[validate(length(min = 6, message = "New password must be at least 6 characters"))]
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SuspendUserDto {
    pub suspended: bool,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserQuery {
    pub role: Option<UserRole>,
    /// Case-insensitive match against name or email
    pub search: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserListDto {
    pub users: Vec<UserDto>,
    pub pagination: PaginationDto,
}
