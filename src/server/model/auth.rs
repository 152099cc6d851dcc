//! Bearer-token claims and authentication extractors.

use axum::{extract::FromRequestParts, http::request::Parts};
use chrono::{Duration, Utc};
use entity::sea_orm_active_enums::UserRole;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::server::{
    error::{auth::AuthError, Error},
    model::{app::AppState, db::UserModel},
    service::auth::AuthService,
};

/// Lifetime of an issued bearer token
pub const TOKEN_LIFETIME: Duration = Duration::days(7);

/// HS256 signing and verification keys derived from the configured secret.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Signs a token for the user that expires after [`TOKEN_LIFETIME`].
    pub fn issue(&self, user: &UserModel) -> Result<String, Error> {
        let now = Utc::now();
        let claims = Claims {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: (now + TOKEN_LIFETIME).timestamp(),
        };

        Ok(jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &self.encoding,
        )?)
    }

    /// Verifies signature and expiry of a token, returning its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(AuthError::InvalidToken)
    }
}

/// Claims carried by HABS bearer tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub id: i32,
    pub email: String,
    pub role: UserRole,
    pub iat: i64,
    pub exp: i64,
}

/// Extracts the raw token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// The authenticated caller, reloaded from the database on every request.
///
/// Rejects with 401 when the token is missing, invalid, or belongs to a deleted account, and with
/// 403 when the account is suspended.
#[derive(Debug, Clone)]
pub struct AuthUser(pub UserModel);

impl AuthUser {
    fn require(&self, role: UserRole, required: &'static str) -> Result<&UserModel, Error> {
        if self.0.role == role {
            Ok(&self.0)
        } else {
            Err(AuthError::Forbidden {
                user_id: self.0.id,
                role: self.0.role,
                required,
            }
            .into())
        }
    }

    pub fn require_student(&self) -> Result<&UserModel, Error> {
        self.require(UserRole::Student, "Students")
    }

    pub fn require_owner(&self) -> Result<&UserModel, Error> {
        self.require(UserRole::HostelOwner, "Hostel owners")
    }

    pub fn require_admin(&self) -> Result<&UserModel, Error> {
        self.require(UserRole::Admin, "Admins")
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AuthError::MissingToken)?;

        let user = AuthService::new(&state.db, &state.jwt)
            .authenticate(token)
            .await?;

        Ok(Self(user))
    }
}

/// Like [`AuthUser`] but never rejects: requests with no usable token are anonymous.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<UserModel>);

impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(parts) else {
            return Ok(Self(None));
        };

        match AuthService::new(&state.db, &state.jwt)
            .authenticate(token)
            .await
        {
            Ok(user) => Ok(Self(Some(user))),
            Err(Error::AuthError(err)) => {
                tracing::debug!("Ignoring unusable optional token: {}", err);

                Ok(Self(None))
            }
            Err(err) => Err(err),
        }
    }
}
