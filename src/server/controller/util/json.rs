use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::server::error::Error;

/// JSON request body that has passed its declarative validation rules.
///
/// Malformed bodies and rule violations are both rejected with a 400 carrying the usual
/// `{"message": ...}` error body.
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| Error::BadRequest(rejection.body_text()))?;

        payload.validate()?;

        Ok(Self(payload))
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::StatusCode, response::IntoResponse};

    use super::*;
    use crate::model::user::LoginDto;

    fn request(body: &str) -> Request {
        Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    /// Expect a well formed, valid body to be extracted
    #[tokio::test]
    async fn extracts_valid_body() {
        let body = r#"{"email":"student@example.com","password":"secret"}"#;

        let ValidJson(login) = ValidJson::<LoginDto>::from_request(request(body), &())
            .await
            .unwrap();

        assert_eq!(login.email, "student@example.com");
    }

    /// Expect malformed JSON and rule violations to be 400 responses
    #[tokio::test]
    async fn rejects_bad_bodies() {
        let malformed = ValidJson::<LoginDto>::from_request(request("{"), &())
            .await
            .unwrap_err();
        assert_eq!(malformed.into_response().status(), StatusCode::BAD_REQUEST);

        let invalid = ValidJson::<LoginDto>::from_request(
            request(r#"{"email":"nope","password":""}"#),
            &(),
        )
        .await
        .unwrap_err();
        assert!(matches!(invalid, Error::ValidationErrors(_)));
    }
}
