use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Fingerprint of a booking's agreed terms as stored in the ledger
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LedgerRecordDto {
    pub booking_id: i32,
    /// Hex encoded SHA-256 of the booking terms
    pub tx_hash: String,
    /// Sequence number of the entry in the ledger
    pub block_number: i32,
    pub recorded_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LedgerVerificationDto {
    pub booking_id: i32,
    /// True when the latest recorded fingerprint matches the booking's current terms
    pub verified: bool,
    pub tx_hash: Option<String>,
    pub block_number: Option<i32>,
}

/// A ledger entry looked up by its fingerprint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LedgerTransactionDto {
    pub tx_hash: String,
    pub block_number: i32,
    pub booking_id: i32,
    pub recorded_by: i32,
    pub recorded_at: NaiveDateTime,
    /// Entries appended at or after this one
    pub confirmations: u64,
}
