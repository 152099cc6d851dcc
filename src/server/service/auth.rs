//! Account registration, password login, and bearer-token authentication.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use entity::sea_orm_active_enums::UserRole;
use sea_orm::DatabaseConnection;

use crate::{
    model::user::{AuthResponseDto, ChangePasswordDto, LoginDto, RegisterDto},
    server::{
        data::user::{NewUser, UserRepository},
        error::{auth::AuthError, Error},
        model::{auth::JwtKeys, db::UserModel},
    },
};

/// Hashes a password with Argon2id and a random salt
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswordHash(e.to_string()))
}

/// Returns false for a wrong password as well as for a malformed stored hash
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(password_hash) else {
        tracing::warn!("Stored password hash could not be parsed");
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    jwt: &'a JwtKeys,
}

impl<'a> AuthService<'a> {
    /// Creates a new instance of [`AuthService`]
    pub fn new(db: &'a DatabaseConnection, jwt: &'a JwtKeys) -> Self {
        Self { db, jwt }
    }

    fn respond_with_token(&self, user: UserModel) -> Result<AuthResponseDto, Error> {
        let token = self.jwt.issue(&user)?;

        Ok(AuthResponseDto {
            token,
            user: user.into(),
        })
    }

    /// Creates a student or hostel owner account and signs it in
    pub async fn register(&self, registration: RegisterDto) -> Result<AuthResponseDto, Error> {
        let user_repo = UserRepository::new(self.db);

        if user_repo.find_by_email(&registration.email).await?.is_some() {
            return Err(AuthError::EmailTaken.into());
        }

        let user = user_repo
            .create(NewUser {
                name: registration.name.trim().to_string(),
                email: registration.email.trim().to_string(),
                password_hash: hash_password(&registration.password)?,
                phone: registration.phone,
                role: registration.role.into(),
            })
            .await?;

        tracing::info!(user_id = user.id, role = %user.role, "Registered new account");

        self.respond_with_token(user)
    }

    /// Verifies credentials, records the login, and issues a token
    pub async fn login(&self, credentials: LoginDto) -> Result<AuthResponseDto, Error> {
        let user = self.check_credentials(&credentials).await?;

        self.complete_login(user).await
    }

    /// Like [`Self::login`] but only for administrator accounts
    pub async fn admin_login(&self, credentials: LoginDto) -> Result<AuthResponseDto, Error> {
        let user = self.check_credentials(&credentials).await?;

        if user.role != UserRole::Admin {
            return Err(AuthError::NotAdmin(user.id).into());
        }

        self.complete_login(user).await
    }

    async fn check_credentials(&self, credentials: &LoginDto) -> Result<UserModel, Error> {
        let user = UserRepository::new(self.db)
            .find_by_email(&credentials.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(&credentials.password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials.into());
        }

        if user.is_suspended {
            return Err(AuthError::Suspended(user.id).into());
        }

        Ok(user)
    }

    async fn complete_login(&self, user: UserModel) -> Result<AuthResponseDto, Error> {
        let user_repo = UserRepository::new(self.db);
        user_repo.record_login(user.id).await?;

        let user = user_repo
            .get(user.id)
            .await?
            .ok_or(AuthError::UserNotInDatabase(user.id))?;

        tracing::debug!(user_id = user.id, "User logged in");

        self.respond_with_token(user)
    }

    pub async fn change_password(
        &self,
        user: &UserModel,
        change: ChangePasswordDto,
    ) -> Result<(), Error> {
        if !verify_password(&change.current_password, &user.password_hash) {
            return Err(AuthError::IncorrectPassword(user.id).into());
        }

        let updated = UserRepository::new(self.db)
            .set_password_hash(user.id, hash_password(&change.new_password)?)
            .await?;

        if !updated {
            return Err(AuthError::UserNotInDatabase(user.id).into());
        }

        tracing::info!(user_id = user.id, "Password changed");

        Ok(())
    }

    /// Resolves a bearer token to the current state of its account.
    ///
    /// The account is reloaded so suspensions and deletions take effect before the token expires.
    pub async fn authenticate(&self, token: &str) -> Result<UserModel, Error> {
        let claims = self.jwt.verify(token)?;

        let user = UserRepository::new(self.db)
            .get(claims.id)
            .await?
            .ok_or(AuthError::UserNotInDatabase(claims.id))?;

        if user.is_suspended {
            return Err(AuthError::Suspended(user.id).into());
        }

        Ok(user)
    }

    /// Creates the configured administrator account unless the email is already registered
    pub async fn bootstrap_admin(&self, email: &str, password: &str) -> Result<(), Error> {
        let user_repo = UserRepository::new(self.db);

        if let Some(existing) = user_repo.find_by_email(email).await? {
            if existing.role != UserRole::Admin {
                tracing::warn!(
                    user_id = existing.id,
                    "Configured admin email belongs to a non-admin account"
                );
            }
            return Ok(());
        }

        let admin = user_repo
            .create(NewUser {
                name: "Administrator".to_string(),
                email: email.to_string(),
                password_hash: hash_password(password)?,
                phone: None,
                role: UserRole::Admin,
            })
            .await?;

        tracing::info!(user_id = admin.id, "Created administrator account");

        Ok(())
    }
}
