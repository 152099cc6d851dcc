//! User account fixtures.

pub mod factory;

use std::sync::OnceLock;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use chrono::Utc;
use entity::{
    sea_orm_active_enums::UserRole,
    types::{OwnerProfile, StudentProfile},
};
use sea_orm::{ActiveValue, EntityTrait};

use crate::{constant::TEST_PASSWORD, error::TestError, TestContext};

impl TestContext {
    pub fn user(&self) -> UserFixtures<'_> {
        UserFixtures { context: self }
    }
}

pub struct UserFixtures<'a> {
    context: &'a TestContext,
}

/// Argon2 hash of [`TEST_PASSWORD`], computed once per test binary
fn test_password_hash() -> Result<String, TestError> {
    static HASH: OnceLock<String> = OnceLock::new();

    if let Some(hash) = HASH.get() {
        return Ok(hash.clone());
    }

    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(TEST_PASSWORD.as_bytes(), &salt)
        .map_err(|e| TestError::PasswordHash(e.to_string()))?
        .to_string();

    Ok(HASH.get_or_init(|| hash).clone())
}

impl<'a> UserFixtures<'a> {
    /// Insert an account with [`TEST_PASSWORD`] and the default profile for its role.
    pub async fn insert_user(
        &self,
        email: &str,
        role: UserRole,
    ) -> Result<entity::habs_user::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::HabsUser::insert(entity::habs_user::ActiveModel {
                name: ActiveValue::Set("Test User".to_string()),
                email: ActiveValue::Set(email.to_string()),
                password_hash: ActiveValue::Set(test_password_hash()?),
                phone: ActiveValue::Set(Some("9876543210".to_string())),
                profile_image: ActiveValue::Set(None),
                role: ActiveValue::Set(role),
                is_verified: ActiveValue::Set(false),
                is_suspended: ActiveValue::Set(false),
                suspension_reason: ActiveValue::Set(None),
                suspended_at: ActiveValue::Set(None),
                suspended_by: ActiveValue::Set(None),
                last_login: ActiveValue::Set(None),
                login_count: ActiveValue::Set(0),
                student_profile: ActiveValue::Set(
                    (role == UserRole::Student).then(StudentProfile::default),
                ),
                owner_profile: ActiveValue::Set(
                    (role == UserRole::HostelOwner).then(OwnerProfile::default),
                ),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.context.db)
            .await?,
        )
    }

    pub async fn insert_student(&self, email: &str) -> Result<entity::habs_user::Model, TestError> {
        self.insert_user(email, UserRole::Student).await
    }

    pub async fn insert_owner(&self, email: &str) -> Result<entity::habs_user::Model, TestError> {
        self.insert_user(email, UserRole::HostelOwner).await
    }

    pub async fn insert_admin(&self, email: &str) -> Result<entity::habs_user::Model, TestError> {
        self.insert_user(email, UserRole::Admin).await
    }

    /// Insert an account that an administrator has suspended.
    pub async fn insert_suspended_user(
        &self,
        email: &str,
        role: UserRole,
    ) -> Result<entity::habs_user::Model, TestError> {
        let user = self.insert_user(email, role).await?;

        Ok(
            entity::prelude::HabsUser::update(entity::habs_user::ActiveModel {
                id: ActiveValue::Unchanged(user.id),
                is_suspended: ActiveValue::Set(true),
                suspension_reason: ActiveValue::Set(Some("Test suspension".to_string())),
                suspended_at: ActiveValue::Set(Some(Utc::now().naive_utc())),
                ..Default::default()
            })
            .exec(&self.context.db)
            .await?,
        )
    }
}
