//! Booking aggregate repositories.

pub mod status_history;

use chrono::{Duration, NaiveDate, NaiveDateTime, Utc};
use entity::{
    sea_orm_active_enums::{BookingStatus, RoomType},
    types::{
        BookingDocuments, BookingPreferences, Communications, PaymentRecord, ReviewRecord,
    },
};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::{model::booking::PricingDto, server::data::page_index};

/// How long a pending request may wait for an owner response
pub const AUTO_CANCEL_AFTER: Duration = Duration::hours(24);

/// A validated booking request with its computed pricing.
pub struct NewBooking {
    pub student_id: i32,
    pub hostel_id: i32,
    pub hostel_owner_id: i32,
    pub room_type: RoomType,
    pub beds_requested: i32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub months: i32,
    pub pricing: PricingDto,
    pub preferences: BookingPreferences,
}

/// Whose bookings a listing covers
#[derive(Debug, Clone, Copy)]
pub enum BookingScope {
    Student(i32),
    Owner(i32),
    All,
}

/// Students and hostels matched by an admin search; a booking matches if either side does.
pub struct SearchMatches {
    pub student_ids: Vec<i32>,
    pub hostel_ids: Vec<i32>,
}

pub struct BookingFilter {
    pub scope: BookingScope,
    pub status: Option<BookingStatus>,
    pub matches: Option<SearchMatches>,
}

pub struct BookingRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> BookingRepository<'a, C> {
    /// Creates a new instance of [`BookingRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a booking in `pending` status with its auto-cancel deadline set
    pub async fn create(&self, booking: NewBooking) -> Result<entity::booking::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let pricing = booking.pricing;

        entity::booking::ActiveModel {
            student_id: ActiveValue::Set(booking.student_id),
            hostel_id: ActiveValue::Set(booking.hostel_id),
            hostel_owner_id: ActiveValue::Set(booking.hostel_owner_id),
            room_type: ActiveValue::Set(booking.room_type),
            beds_requested: ActiveValue::Set(booking.beds_requested),
            check_in_date: ActiveValue::Set(booking.check_in),
            check_out_date: ActiveValue::Set(booking.check_out),
            months: ActiveValue::Set(booking.months),
            price_per_bed: ActiveValue::Set(pricing.price_per_bed),
            total_bed_cost: ActiveValue::Set(pricing.total_bed_cost),
            mess_charges: ActiveValue::Set(pricing.mess_charges),
            security_deposit: ActiveValue::Set(pricing.security_deposit),
            total_amount: ActiveValue::Set(pricing.total_amount),
            gst: ActiveValue::Set(pricing.gst),
            final_amount: ActiveValue::Set(pricing.final_amount),
            discount: ActiveValue::Set(pricing.discount),
            advance_amount: ActiveValue::Set(pricing.advance_amount),
            status: ActiveValue::Set(BookingStatus::Pending),
            preferences: ActiveValue::Set(booking.preferences),
            owner_response: ActiveValue::Set(None),
            check_in: ActiveValue::Set(None),
            check_out: ActiveValue::Set(None),
            payment: ActiveValue::Set(PaymentRecord::default()),
            review: ActiveValue::Set(None),
            communications: ActiveValue::Set(Communications::default()),
            documents: ActiveValue::Set(BookingDocuments::default()),
            auto_cancel_at: ActiveValue::Set(now + AUTO_CANCEL_AFTER),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn get(&self, booking_id: i32) -> Result<Option<entity::booking::Model>, DbErr> {
        entity::prelude::Booking::find_by_id(booking_id)
            .one(self.db)
            .await
    }

    /// Writes `changes` only if the booking is still in `expected` status.
    ///
    /// Returns the updated booking, or `None` when the booking does not exist or another writer
    /// moved it out of `expected` first.
    pub async fn update_if_status(
        &self,
        booking_id: i32,
        expected: BookingStatus,
        mut changes: entity::booking::ActiveModel,
    ) -> Result<Option<entity::booking::Model>, DbErr> {
        changes.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        let result = entity::prelude::Booking::update_many()
            .set(changes)
            .filter(entity::booking::Column::Id.eq(booking_id))
            .filter(entity::booking::Column::Status.eq(expected))
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get(booking_id).await
    }

    /// Writes `changes` only if the booking is unchanged since `booking` was read.
    ///
    /// Guards read-modify-write updates of the embedded records with the status and the last
    /// modification time. Returns `None` when another writer got there first.
    pub async fn update_if_unchanged(
        &self,
        booking: &entity::booking::Model,
        mut changes: entity::booking::ActiveModel,
    ) -> Result<Option<entity::booking::Model>, DbErr> {
        changes.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        let result = entity::prelude::Booking::update_many()
            .set(changes)
            .filter(entity::booking::Column::Id.eq(booking.id))
            .filter(entity::booking::Column::Status.eq(booking.status))
            .filter(entity::booking::Column::UpdatedAt.eq(booking.updated_at))
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get(booking.id).await
    }

    /// Sets the review of a booking in `expected` status that has none yet.
    ///
    /// Returns `None` when the booking left `expected` or was reviewed in the meantime.
    pub async fn attach_review(
        &self,
        booking_id: i32,
        expected: BookingStatus,
        review: ReviewRecord,
    ) -> Result<Option<entity::booking::Model>, DbErr> {
        let result = entity::prelude::Booking::update_many()
            .set(entity::booking::ActiveModel {
                review: ActiveValue::Set(Some(review)),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .filter(entity::booking::Column::Id.eq(booking_id))
            .filter(entity::booking::Column::Status.eq(expected))
            .filter(entity::booking::Column::Review.is_null())
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get(booking_id).await
    }

    /// Pages through bookings, newest first
    pub async fn list(
        &self,
        filter: BookingFilter,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<entity::booking::Model>, u64), DbErr> {
        let mut query = entity::prelude::Booking::find()
            .order_by_desc(entity::booking::Column::CreatedAt)
            .order_by_desc(entity::booking::Column::Id);

        match filter.scope {
            BookingScope::Student(student_id) => {
                query = query.filter(entity::booking::Column::StudentId.eq(student_id))
            }
            BookingScope::Owner(owner_id) => {
                query = query.filter(entity::booking::Column::HostelOwnerId.eq(owner_id))
            }
            BookingScope::All => {}
        }
        if let Some(status) = filter.status {
            query = query.filter(entity::booking::Column::Status.eq(status));
        }
        if let Some(matches) = filter.matches {
            query = query.filter(
                Condition::any()
                    .add(entity::booking::Column::StudentId.is_in(matches.student_ids))
                    .add(entity::booking::Column::HostelId.is_in(matches.hostel_ids)),
            );
        }

        let paginator = query.paginate(self.db, limit);
        let total = paginator.num_items().await?;
        let bookings = paginator.fetch_page(page_index(page)).await?;

        Ok((bookings, total))
    }

    /// Number of bookings on a hostel that hold or may soon hold inventory
    pub async fn count_active_for_hostel(&self, hostel_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Booking::find()
            .filter(entity::booking::Column::HostelId.eq(hostel_id))
            .filter(entity::booking::Column::Status.is_in(BookingStatus::ACTIVE))
            .count(self.db)
            .await
    }

    /// Room type and bed count of every booking on a hostel that currently holds rooms
    pub async fn held_beds_for_hostel(&self, hostel_id: i32) -> Result<Vec<(RoomType, i32)>, DbErr> {
        entity::prelude::Booking::find()
            .select_only()
            .column(entity::booking::Column::RoomType)
            .column(entity::booking::Column::BedsRequested)
            .filter(entity::booking::Column::HostelId.eq(hostel_id))
            .filter(entity::booking::Column::Status.is_in(BookingStatus::HOLDING))
            .into_tuple()
            .all(self.db)
            .await
    }

    /// Bookings of a hostel carrying a review
    pub async fn list_reviewed_for_hostel(
        &self,
        hostel_id: i32,
    ) -> Result<Vec<entity::booking::Model>, DbErr> {
        entity::prelude::Booking::find()
            .filter(entity::booking::Column::HostelId.eq(hostel_id))
            .filter(entity::booking::Column::Review.is_not_null())
            .all(self.db)
            .await
    }

    /// Pending bookings whose response deadline is before `now`
    pub async fn list_expired_pending(
        &self,
        now: NaiveDateTime,
    ) -> Result<Vec<entity::booking::Model>, DbErr> {
        entity::prelude::Booking::find()
            .filter(entity::booking::Column::Status.eq(BookingStatus::Pending))
            .filter(entity::booking::Column::AutoCancelAt.lt(now))
            .order_by_asc(entity::booking::Column::AutoCancelAt)
            .all(self.db)
            .await
    }

    /// Counts bookings in any of `statuses`, or all bookings when empty
    pub async fn count(&self, statuses: &[BookingStatus]) -> Result<u64, DbErr> {
        let mut query = entity::prelude::Booking::find();
        if !statuses.is_empty() {
            query = query.filter(entity::booking::Column::Status.is_in(statuses.to_vec()));
        }

        query.count(self.db).await
    }

    /// Sum of final amounts of completed bookings
    pub async fn completed_revenue(&self) -> Result<f64, DbErr> {
        let amounts: Vec<f64> = entity::prelude::Booking::find()
            .select_only()
            .column(entity::booking::Column::FinalAmount)
            .filter(entity::booking::Column::Status.eq(BookingStatus::Completed))
            .into_tuple()
            .all(self.db)
            .await?;

        Ok(amounts.into_iter().sum())
    }

    /// Creation time, status, and final amount of bookings created at or after `since`
    pub async fn created_since(
        &self,
        since: NaiveDateTime,
    ) -> Result<Vec<(NaiveDateTime, BookingStatus, f64)>, DbErr> {
        entity::prelude::Booking::find()
            .select_only()
            .column(entity::booking::Column::CreatedAt)
            .column(entity::booking::Column::Status)
            .column(entity::booking::Column::FinalAmount)
            .filter(entity::booking::Column::CreatedAt.gte(since))
            .into_tuple()
            .all(self.db)
            .await
    }

    pub async fn recent(&self, limit: u64) -> Result<Vec<entity::booking::Model>, DbErr> {
        entity::prelude::Booking::find()
            .order_by_desc(entity::booking::Column::CreatedAt)
            .order_by_desc(entity::booking::Column::Id)
            .limit(limit)
            .all(self.db)
            .await
    }
}
