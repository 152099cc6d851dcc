//! Booking fixtures.

use chrono::{NaiveDate, Utc};
use entity::{
    sea_orm_active_enums::BookingStatus,
    types::{BookingDocuments, BookingPreferences, Communications, PaymentRecord},
};
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn booking(&self) -> BookingFixtures<'_> {
        BookingFixtures { context: self }
    }
}

pub struct BookingFixtures<'a> {
    context: &'a TestContext,
}

impl<'a> BookingFixtures<'a> {
    /// Insert a six month booking in the given status together with one history entry.
    ///
    /// Pricing columns are filled from the room type without mess charges. Room inventory is
    /// not adjusted, so tests exercising inventory should go through the booking service.
    pub async fn insert_booking(
        &self,
        student_id: i32,
        hostel: &entity::hostel::Model,
        room_type: &entity::hostel_room_type::Model,
        beds_requested: i32,
        status: BookingStatus,
    ) -> Result<entity::booking::Model, TestError> {
        let now = Utc::now().naive_utc();
        let months = 6;
        let total_bed_cost = room_type.price_per_bed * f64::from(beds_requested * months);
        let subtotal = total_bed_cost + room_type.security_deposit;
        let gst = (subtotal * 0.18 * 100.0).round() / 100.0;

        let booking = entity::prelude::Booking::insert(entity::booking::ActiveModel {
            student_id: ActiveValue::Set(student_id),
            hostel_id: ActiveValue::Set(hostel.id),
            hostel_owner_id: ActiveValue::Set(hostel.owner_id),
            room_type: ActiveValue::Set(room_type.room_type),
            beds_requested: ActiveValue::Set(beds_requested),
            check_in_date: ActiveValue::Set(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap_or_default()),
            check_out_date: ActiveValue::Set(NaiveDate::from_ymd_opt(2026, 7, 1).unwrap_or_default()),
            months: ActiveValue::Set(months),
            price_per_bed: ActiveValue::Set(room_type.price_per_bed),
            total_bed_cost: ActiveValue::Set(total_bed_cost),
            mess_charges: ActiveValue::Set(0.0),
            security_deposit: ActiveValue::Set(room_type.security_deposit),
            total_amount: ActiveValue::Set(subtotal),
            gst: ActiveValue::Set(gst),
            final_amount: ActiveValue::Set(subtotal + gst),
            discount: ActiveValue::Set(0.0),
            advance_amount: ActiveValue::Set(0.0),
            status: ActiveValue::Set(status),
            preferences: ActiveValue::Set(BookingPreferences::default()),
            owner_response: ActiveValue::Set(None),
            check_in: ActiveValue::Set(None),
            check_out: ActiveValue::Set(None),
            payment: ActiveValue::Set(PaymentRecord::default()),
            review: ActiveValue::Set(None),
            communications: ActiveValue::Set(Communications::default()),
            documents: ActiveValue::Set(BookingDocuments::default()),
            auto_cancel_at: ActiveValue::Set(now + chrono::Duration::hours(24)),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(&self.context.db)
        .await?;

        entity::prelude::BookingStatusHistory::insert(
            entity::booking_status_history::ActiveModel {
                booking_id: ActiveValue::Set(booking.id),
                status: ActiveValue::Set(status),
                updated_by: ActiveValue::Set(Some(student_id)),
                reason: ActiveValue::Set(None),
                notes: ActiveValue::Set(None),
                created_at: ActiveValue::Set(now),
                ..Default::default()
            },
        )
        .exec(&self.context.db)
        .await?;

        Ok(booking)
    }
}
