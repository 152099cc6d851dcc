use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{model::api::ErrorDto, server::error::InternalServerError};

#[derive(Error, Debug)]
pub enum MapError {
    #[error("Map provider credentials are not configured")]
    NotConfigured,
    #[error("Map provider returned no results for {0}")]
    NoResults(String),
    #[error("Map provider responded with status {0}")]
    UnexpectedStatus(reqwest::StatusCode),
    #[error(transparent)]
    Request(#[from] reqwest::Error),
}

impl IntoResponse for MapError {
    fn into_response(self) -> Response {
        match self {
            Self::NoResults(_) => {
                tracing::debug!("{}", self);

                (
                    StatusCode::NOT_FOUND,
                    Json(ErrorDto::new("No results found for the requested location")),
                )
                    .into_response()
            }
            err => InternalServerError(err).into_response(),
        }
    }
}
