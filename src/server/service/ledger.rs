//! Content fingerprints of agreed booking terms.
//!
//! A fingerprint is the SHA-256 of the booking's terms serialized as JSON. It detects later
//! edits to those terms but is not a signature: anyone with database access can re-record it.

use chrono::NaiveDate;
use entity::sea_orm_active_enums::{BookingStatus, RoomType, UserRole};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::{
    model::ledger::{LedgerRecordDto, LedgerTransactionDto, LedgerVerificationDto},
    server::{
        data::{booking::BookingRepository, ledger::LedgerRepository},
        error::{booking::BookingError, Error},
        model::db::{BookingModel, UserModel},
    },
};

/// The parts of a booking both parties agreed to on approval.
///
/// Payments, messages, and stay records change during a booking and are left out.
#[derive(Serialize)]
struct BookingTerms {
    booking_id: i32,
    student_id: i32,
    hostel_id: i32,
    hostel_owner_id: i32,
    room_type: RoomType,
    beds_requested: i32,
    check_in: NaiveDate,
    check_out: NaiveDate,
    months: i32,
    price_per_bed: f64,
    mess_charges: f64,
    security_deposit: f64,
    gst: f64,
    discount: f64,
    final_amount: f64,
}

impl From<&BookingModel> for BookingTerms {
    fn from(booking: &BookingModel) -> Self {
        Self {
            booking_id: booking.id,
            student_id: booking.student_id,
            hostel_id: booking.hostel_id,
            hostel_owner_id: booking.hostel_owner_id,
            room_type: booking.room_type,
            beds_requested: booking.beds_requested,
            check_in: booking.check_in_date,
            check_out: booking.check_out_date,
            months: booking.months,
            price_per_bed: booking.price_per_bed,
            mess_charges: booking.mess_charges,
            security_deposit: booking.security_deposit,
            gst: booking.gst,
            discount: booking.discount,
            final_amount: booking.final_amount,
        }
    }
}

/// Hex encoded SHA-256 of a booking's agreed terms
pub fn fingerprint(booking: &BookingModel) -> Result<String, Error> {
    let terms = serde_json::to_vec(&BookingTerms::from(booking))?;

    Ok(format!("{:x}", Sha256::digest(&terms)))
}

fn is_fingerprint(hash: &str) -> bool {
    hash.len() == 64 && hash.bytes().all(|b| b.is_ascii_hexdigit())
}

fn has_agreed_terms(status: BookingStatus) -> bool {
    matches!(
        status,
        BookingStatus::Approved
            | BookingStatus::CheckedIn
            | BookingStatus::CheckedOut
            | BookingStatus::Completed
    )
}

pub struct LedgerService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LedgerService<'a> {
    /// Creates a new instance of [`LedgerService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    async fn visible_booking(&self, user: &UserModel, booking_id: i32) -> Result<BookingModel, Error> {
        BookingRepository::new(self.db)
            .get(booking_id)
            .await?
            .filter(|b| {
                user.role == UserRole::Admin
                    || b.student_id == user.id
                    || b.hostel_owner_id == user.id
            })
            .ok_or_else(|| BookingError::NotFound(booking_id).into())
    }

    /// Appends the current fingerprint of an approved booking
    pub async fn record(&self, user: &UserModel, booking_id: i32) -> Result<LedgerRecordDto, Error> {
        let booking = self.visible_booking(user, booking_id).await?;
        if !has_agreed_terms(booking.status) {
            return Err(Error::BadRequest(format!(
                "Only approved bookings can be recorded, this booking is {}",
                booking.status
            )));
        }

        let entry = LedgerRepository::new(self.db)
            .append(booking.id, fingerprint(&booking)?, user.id)
            .await?;

        tracing::info!(booking_id, block_number = entry.id, "Recorded booking fingerprint");

        Ok(LedgerRecordDto {
            booking_id,
            tx_hash: entry.content_hash,
            block_number: entry.id,
            recorded_at: entry.created_at,
        })
    }

    /// Finds the entry recording `tx_hash`, if its booking is visible to the user
    pub async fn lookup(&self, user: &UserModel, tx_hash: &str) -> Result<LedgerTransactionDto, Error> {
        let tx_hash = tx_hash.to_ascii_lowercase();
        if !is_fingerprint(&tx_hash) {
            return Err(Error::BadRequest(
                "Transaction hash must be 64 hexadecimal characters".to_string(),
            ));
        }

        let not_found = || Error::NotFound("Transaction not found".to_string());
        let ledger_repo = LedgerRepository::new(self.db);

        let entry = ledger_repo
            .find_by_hash(&tx_hash)
            .await?
            .ok_or_else(not_found)?;
        match self.visible_booking(user, entry.booking_id).await {
            Ok(_) => {}
            Err(Error::BookingError(BookingError::NotFound(_))) => return Err(not_found()),
            Err(err) => return Err(err),
        }

        let confirmations = ledger_repo.count_from(entry.id).await?;

        Ok(LedgerTransactionDto {
            tx_hash: entry.content_hash,
            block_number: entry.id,
            booking_id: entry.booking_id,
            recorded_by: entry.recorded_by,
            recorded_at: entry.created_at,
            confirmations,
        })
    }

    /// Compares the latest recorded fingerprint against the booking's current terms
    pub async fn verify(
        &self,
        user: &UserModel,
        booking_id: i32,
    ) -> Result<LedgerVerificationDto, Error> {
        let booking = self.visible_booking(user, booking_id).await?;

        let Some(entry) = LedgerRepository::new(self.db)
            .latest_for_booking(booking_id)
            .await?
        else {
            return Ok(LedgerVerificationDto {
                booking_id,
                verified: false,
                tx_hash: None,
                block_number: None,
            });
        };

        let verified = entry.content_hash == fingerprint(&booking)?;
        if !verified {
            tracing::warn!(booking_id, block_number = entry.id, "Booking terms differ from recorded fingerprint");
        }

        Ok(LedgerVerificationDto {
            booking_id,
            verified,
            tx_hash: Some(entry.content_hash),
            block_number: Some(entry.id),
        })
    }
}
