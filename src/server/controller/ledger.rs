use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        ledger::{LedgerRecordDto, LedgerTransactionDto, LedgerVerificationDto},
    },
    server::{
        error::Error,
        model::{app::AppState, auth::AuthUser},
        service::ledger::LedgerService,
    },
};

pub static LEDGER_TAG: &str = "ledger";

/// Record a fingerprint of an approved booking's terms
#[utoipa::path(
    post,
    path = "/api/ledger/bookings/{id}",
    tag = LEDGER_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Fingerprint recorded", body = LedgerRecordDto),
        (status = 400, description = "Booking has no agreed terms yet", body = ErrorDto),
        (status = 404, description = "Booking not found or not accessible", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn record_booking(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let record = LedgerService::new(&state.db).record(&user, id).await?;

    Ok((StatusCode::OK, Json(record)))
}

/// Check a booking's current terms against its latest recorded fingerprint
#[utoipa::path(
    get,
    path = "/api/ledger/bookings/{id}/verify",
    tag = LEDGER_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Verification result", body = LedgerVerificationDto),
        (status = 404, description = "Booking not found or not accessible", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn verify_booking(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let verification = LedgerService::new(&state.db).verify(&user, id).await?;

    Ok((StatusCode::OK, Json(verification)))
}

/// Look up a recorded fingerprint by its hash
#[utoipa::path(
    get,
    path = "/api/ledger/transactions/{hash}",
    tag = LEDGER_TAG,
    security(("bearer" = [])),
    params(("hash" = String, Path, description = "Hex encoded fingerprint")),
    responses(
        (status = 200, description = "Ledger entry", body = LedgerTransactionDto),
        (status = 400, description = "Malformed hash", body = ErrorDto),
        (status = 404, description = "No visible entry with this hash", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn lookup_transaction(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(hash): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let transaction = LedgerService::new(&state.db).lookup(&user, &hash).await?;

    Ok((StatusCode::OK, Json(transaction)))
}
