use entity::sea_orm_active_enums::UserRole;
use sea_orm::DatabaseConnection;

use crate::{
    model::user::{UpdateProfileDto, UserDto},
    server::{
        data::user::{ProfileChanges, UserRepository},
        error::{auth::AuthError, Error},
        model::db::UserModel,
    },
};

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    /// Creates a new instance of [`UserService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Applies a self-service profile update.
    ///
    /// Role profiles only apply to the matching role. Owners may edit their business details, but
    /// approval state and the hostel counter are kept from the stored profile.
    pub async fn update_profile(
        &self,
        user: &UserModel,
        update: UpdateProfileDto,
    ) -> Result<UserDto, Error> {
        let student_profile = update
            .student_profile
            .filter(|_| user.role == UserRole::Student);

        let owner_profile = update
            .owner_profile
            .filter(|_| user.role == UserRole::HostelOwner)
            .map(|changes| {
                let mut profile = user.owner_profile.clone().unwrap_or_default();
                if changes.business_name.is_some() {
                    profile.business_name = changes.business_name;
                }
                if changes.business_registration.is_some() {
                    profile.business_registration = changes.business_registration;
                }
                if changes.business_phone.is_some() {
                    profile.business_phone = changes.business_phone;
                }
                if changes.address.is_some() {
                    profile.address = changes.address;
                }
                profile
            });

        let updated = UserRepository::new(self.db)
            .update_profile(
                user.id,
                ProfileChanges {
                    name: update.name.map(|name| name.trim().to_string()),
                    phone: update.phone,
                    profile_image: update.profile_image,
                    student_profile,
                    owner_profile,
                },
            )
            .await?
            .ok_or(AuthError::UserNotInDatabase(user.id))?;

        Ok(updated.into())
    }
}
