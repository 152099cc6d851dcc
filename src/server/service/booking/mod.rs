//! Booking lifecycle operations.
//!
//! Every mutation runs in one database transaction. Status writes are guarded by the status the
//! booking was read in and room inventory writes by the room type's version, so a concurrent
//! writer surfaces as a not-found or conflict error instead of a lost update. Notifications are
//! published only after the transaction commits.

pub mod lifecycle;
pub mod pricing;

use chrono::{NaiveDateTime, Utc};
use entity::{
    sea_orm_active_enums::{BookingStatus, UserRole},
    types::{
        BookingPreferences, CheckInRecord, CheckOutRecord, Communication, Deduction,
        FinalSettlement, OwnerResponse, PaymentEntry, PaymentStatus, RatingBreakdown,
        ReviewRating, ReviewRecord,
    },
};
use sea_orm::{ActiveValue, ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::{
    model::{
        api::{PageQuery, PaginationDto},
        booking::{
            BookingDetailDto, BookingDto, BookingListDto, BookingMessageDto, BookingQuery,
            CancelBookingDto, CheckInDto, CheckOutDto, CheckOutResultDto, CompleteBookingDto,
            CreateBookingDto, DurationDto, PricingDto, RecordPaymentDto, RespondAction,
            RespondBookingDto, ReviewDto, UpdateBookingDto,
        },
        notification::{
            BookingCancelledEvent, BookingMessageEvent, BookingResponseEvent, CheckedInEvent,
            CheckedOutEvent, NewBookingRequestEvent,
        },
    },
    server::{
        data::{
            booking::{
                status_history::StatusHistoryRepository, BookingFilter, BookingRepository,
                BookingScope, NewBooking,
            },
            hostel::{room_type::RoomTypeRepository, HostelRepository, RatingSummary},
            user::UserRepository,
        },
        error::{auth::AuthError, booking::BookingError, hostel::HostelError, Error},
        model::db::{BookingModel, HostelModel, RoomTypeModel, UserModel},
        service::{
            booking::{
                lifecycle::{BookingAction, InventoryEffect},
                pricing::PriceInputs,
            },
            notification::{
                NotificationHub, Room, BOOKING_CANCELLED, BOOKING_MESSAGE, BOOKING_RESPONSE,
                CHECKED_IN, CHECKED_OUT, NEW_BOOKING_REQUEST,
            },
        },
        util::money::{round1, round2},
    },
};

const DEFAULT_PAGE_SIZE: u64 = 10;

const AUTO_CANCEL_REASON: &str = "No response from the hostel owner within 24 hours";

/// Who changed a booking's status and why, recorded in its status history.
struct StatusChange {
    action: BookingAction,
    actor: Option<i32>,
    reason: Option<String>,
    notes: Option<String>,
}

impl StatusChange {
    fn by(action: BookingAction, actor: i32) -> Self {
        Self {
            action,
            actor: Some(actor),
            reason: None,
            notes: None,
        }
    }
}

fn can_view(booking: &BookingModel, user: &UserModel) -> bool {
    user.role == UserRole::Admin
        || booking.student_id == user.id
        || booking.hostel_owner_id == user.id
}

/// Rejects requests the room tier cannot hold or that are shorter than the hostel allows
fn check_request(
    hostel: &HostelModel,
    room_type: &RoomTypeModel,
    beds: i32,
    months: i32,
) -> Result<(), BookingError> {
    let free_beds = room_type.available_rooms * room_type.beds_per_room;
    if free_beds < beds {
        return Err(BookingError::InsufficientBeds {
            available: free_beds,
            requested: beds,
        });
    }

    let minimum = hostel.rules.minimum_stay_months;
    if months < minimum {
        return Err(BookingError::MinimumStay(minimum));
    }

    Ok(())
}

fn price(
    hostel: &HostelModel,
    room_type: &RoomTypeModel,
    beds: i32,
    months: i32,
    preferences: &BookingPreferences,
) -> PricingDto {
    let mess_per_month = (preferences.mess_required && hostel.mess.available)
        .then_some(hostel.mess.price_per_month);

    pricing::compute(PriceInputs {
        price_per_bed: room_type.price_per_bed,
        beds,
        months,
        security_deposit: room_type.security_deposit,
        mess_per_month,
        discount: 0.0,
    })
}

/// Hostel aggregate over every submitted review: overall average and per-axis means.
pub fn rating_summary(ratings: &[ReviewRating]) -> RatingSummary {
    if ratings.is_empty() {
        return RatingSummary {
            average: 0.0,
            total_reviews: 0,
            breakdown: RatingBreakdown::default(),
        };
    }

    let count = ratings.len() as f64;
    let mean = |axis: fn(&ReviewRating) -> i32| {
        round1(ratings.iter().map(|r| f64::from(axis(r))).sum::<f64>() / count)
    };

    RatingSummary {
        average: mean(|r| r.overall),
        total_reviews: ratings.len() as i32,
        breakdown: RatingBreakdown {
            cleanliness: mean(|r| r.cleanliness),
            food: mean(|r| r.food),
            location: mean(|r| r.location),
            facilities: mean(|r| r.facilities),
            staff: mean(|r| r.staff),
        },
    }
}

async fn find_visible<C: ConnectionTrait>(
    db: &C,
    booking_id: i32,
    allowed: impl FnOnce(&BookingModel) -> bool,
) -> Result<BookingModel, Error> {
    BookingRepository::new(db)
        .get(booking_id)
        .await?
        .filter(allowed)
        .ok_or_else(|| BookingError::NotFound(booking_id).into())
}

/// Reserves or releases the rooms held by `booking`.
///
/// A room tier removed from the listing since the booking was made is left alone.
async fn adjust_inventory<C: ConnectionTrait>(
    txn: &C,
    booking: &BookingModel,
    effect: InventoryEffect,
) -> Result<(), Error> {
    let repo = RoomTypeRepository::new(txn);

    let Some(room_type) = repo.find(booking.hostel_id, booking.room_type).await? else {
        tracing::warn!(
            booking_id = booking.id,
            room_type = %booking.room_type,
            "Room type is no longer listed, inventory left unchanged"
        );
        return Ok(());
    };

    let available = lifecycle::apply_effect(effect, &room_type, booking.beds_requested);
    if available == room_type.available_rooms {
        return Ok(());
    }

    if !repo.set_available_rooms(&room_type, available).await? {
        return Err(BookingError::InventoryConflict(room_type.id).into());
    }

    Ok(())
}

/// Moves `booking` through `change.action`, writing `changes` together with the new status.
///
/// Applies the transition's inventory effect and appends one history entry stamped with the
/// booking's new `updated_at`.
async fn advance<C: ConnectionTrait>(
    txn: &C,
    booking: &BookingModel,
    change: StatusChange,
    mut changes: entity::booking::ActiveModel,
) -> Result<BookingModel, Error> {
    let transition = lifecycle::transition(booking.status, change.action)?;
    changes.status = ActiveValue::Set(transition.to);

    let updated = BookingRepository::new(txn)
        .update_if_status(booking.id, transition.from, changes)
        .await?
        .ok_or(BookingError::NotFound(booking.id))?;

    if transition.effect != InventoryEffect::None {
        adjust_inventory(txn, booking, transition.effect).await?;
    }

    StatusHistoryRepository::new(txn)
        .record(
            booking.id,
            transition.to,
            change.actor,
            change.reason,
            change.notes,
            updated.updated_at,
        )
        .await?;

    Ok(updated)
}

pub struct BookingService<'a> {
    db: &'a DatabaseConnection,
    notifier: &'a NotificationHub,
}

impl<'a> BookingService<'a> {
    /// Creates a new instance of [`BookingService`]
    pub fn new(db: &'a DatabaseConnection, notifier: &'a NotificationHub) -> Self {
        Self { db, notifier }
    }

    /// Submits a booking request for an approved hostel
    pub async fn create(
        &self,
        student: &UserModel,
        request: CreateBookingDto,
    ) -> Result<BookingDto, Error> {
        let hostel = HostelRepository::new(self.db)
            .get_approved(request.hostel_id)
            .await?
            .ok_or(HostelError::NotFound(request.hostel_id))?;
        let room_type = RoomTypeRepository::new(self.db)
            .find(hostel.id, request.room_type)
            .await?
            .ok_or(BookingError::RoomTypeUnavailable(request.room_type))?;

        let months = request.duration.months;
        check_request(&hostel, &room_type, request.beds_requested, months)?;
        let pricing = price(
            &hostel,
            &room_type,
            request.beds_requested,
            months,
            &request.preferences,
        );

        let txn = self.db.begin().await?;

        let booking = BookingRepository::new(&txn)
            .create(NewBooking {
                student_id: student.id,
                hostel_id: hostel.id,
                hostel_owner_id: hostel.owner_id,
                room_type: request.room_type,
                beds_requested: request.beds_requested,
                check_in: request.duration.check_in,
                check_out: request.duration.check_out,
                months,
                pricing,
                preferences: request.preferences,
            })
            .await?;
        StatusHistoryRepository::new(&txn)
            .record(
                booking.id,
                BookingStatus::Pending,
                Some(student.id),
                None,
                Some("Booking request submitted".to_string()),
                booking.created_at,
            )
            .await?;
        HostelRepository::new(&txn)
            .increment_booking_requests(hostel.id)
            .await?;

        txn.commit().await?;

        tracing::info!(
            booking_id = booking.id,
            hostel_id = hostel.id,
            student_id = student.id,
            "Booking requested"
        );

        self.notifier
            .publish(
                Room::Owner(hostel.owner_id),
                NEW_BOOKING_REQUEST,
                &NewBookingRequestEvent {
                    booking_id: booking.id,
                    student_name: student.name.clone(),
                    hostel_name: hostel.name,
                    room_type: booking.room_type,
                    beds_requested: booking.beds_requested,
                },
            )
            .await;

        Ok(booking.into())
    }

    /// Changes beds, duration, or preferences of a pending request and re-prices it
    pub async fn update(
        &self,
        student: &UserModel,
        booking_id: i32,
        changes: UpdateBookingDto,
    ) -> Result<BookingDto, Error> {
        let booking = find_visible(self.db, booking_id, |b| b.student_id == student.id).await?;
        if booking.status != BookingStatus::Pending {
            return Err(BookingError::NotEditable.into());
        }

        let hostel = HostelRepository::new(self.db)
            .get(booking.hostel_id)
            .await?
            .ok_or(BookingError::NotFound(booking_id))?;
        let room_type = RoomTypeRepository::new(self.db)
            .find(booking.hostel_id, booking.room_type)
            .await?
            .ok_or(BookingError::RoomTypeUnavailable(booking.room_type))?;

        let beds = changes.beds_requested.unwrap_or(booking.beds_requested);
        let duration = changes.duration.unwrap_or(DurationDto {
            check_in: booking.check_in_date,
            check_out: booking.check_out_date,
            months: booking.months,
        });
        let preferences = changes.preferences.unwrap_or(booking.preferences);

        check_request(&hostel, &room_type, beds, duration.months)?;
        let pricing = price(&hostel, &room_type, beds, duration.months, &preferences);

        let updated = BookingRepository::new(self.db)
            .update_if_status(
                booking_id,
                BookingStatus::Pending,
                entity::booking::ActiveModel {
                    beds_requested: ActiveValue::Set(beds),
                    check_in_date: ActiveValue::Set(duration.check_in),
                    check_out_date: ActiveValue::Set(duration.check_out),
                    months: ActiveValue::Set(duration.months),
                    price_per_bed: ActiveValue::Set(pricing.price_per_bed),
                    total_bed_cost: ActiveValue::Set(pricing.total_bed_cost),
                    mess_charges: ActiveValue::Set(pricing.mess_charges),
                    security_deposit: ActiveValue::Set(pricing.security_deposit),
                    total_amount: ActiveValue::Set(pricing.total_amount),
                    gst: ActiveValue::Set(pricing.gst),
                    final_amount: ActiveValue::Set(pricing.final_amount),
                    preferences: ActiveValue::Set(preferences),
                    ..Default::default()
                },
            )
            .await?
            .ok_or(BookingError::NotEditable)?;

        tracing::info!(booking_id, "Pending booking updated");

        Ok(updated.into())
    }

    /// Approves or rejects a pending request on one of the owner's hostels.
    ///
    /// Approval reserves rooms for the requested beds.
    pub async fn respond(
        &self,
        owner: &UserModel,
        booking_id: i32,
        response: RespondBookingDto,
    ) -> Result<BookingDto, Error> {
        let action = match response.action {
            RespondAction::Approve => BookingAction::Approve,
            RespondAction::Reject => BookingAction::Reject,
        };

        let txn = self.db.begin().await?;

        let booking = find_visible(&txn, booking_id, |b| {
            b.hostel_owner_id == owner.id && b.status == BookingStatus::Pending
        })
        .await?;

        let changes = entity::booking::ActiveModel {
            owner_response: ActiveValue::Set(Some(OwnerResponse {
                message: response.message.clone(),
                counter_offer: response.counter_offer,
                responded_at: Utc::now().naive_utc(),
            })),
            ..Default::default()
        };
        let change = StatusChange {
            reason: (action == BookingAction::Reject)
                .then(|| response.message.clone())
                .flatten(),
            ..StatusChange::by(action, owner.id)
        };
        let updated = advance(&txn, &booking, change, changes).await?;

        let hostel_repo = HostelRepository::new(&txn);
        if action == BookingAction::Approve {
            hostel_repo
                .increment_successful_bookings(booking.hostel_id)
                .await?;
        }
        let hostel_name = hostel_repo
            .get(booking.hostel_id)
            .await?
            .map(|h| h.name)
            .unwrap_or_default();

        txn.commit().await?;

        tracing::info!(booking_id, status = %updated.status, "Owner responded to booking");

        self.notifier
            .publish(
                Room::Student(updated.student_id),
                BOOKING_RESPONSE,
                &BookingResponseEvent {
                    booking_id,
                    status: updated.status,
                    hostel_name,
                    message: response.message,
                },
            )
            .await;

        Ok(updated.into())
    }

    /// Cancels a pending or approved booking, releasing rooms held by an approval
    pub async fn cancel(
        &self,
        actor: &UserModel,
        booking_id: i32,
        request: CancelBookingDto,
    ) -> Result<BookingDto, Error> {
        let txn = self.db.begin().await?;

        let booking = find_visible(&txn, booking_id, |b| can_view(b, actor)).await?;
        let change = StatusChange {
            reason: request.reason.clone(),
            ..StatusChange::by(BookingAction::Cancel, actor.id)
        };
        let updated = advance(&txn, &booking, change, Default::default()).await?;

        txn.commit().await?;

        tracing::info!(booking_id, cancelled_by = actor.id, "Booking cancelled");

        let event = BookingCancelledEvent {
            booking_id,
            cancelled_by: actor.role.to_string(),
            reason: request.reason,
        };
        if actor.id != updated.hostel_owner_id {
            self.notifier
                .publish(Room::Owner(updated.hostel_owner_id), BOOKING_CANCELLED, &event)
                .await;
        }
        if actor.id != updated.student_id {
            self.notifier
                .publish(Room::Student(updated.student_id), BOOKING_CANCELLED, &event)
                .await;
        }

        Ok(updated.into())
    }

    pub async fn check_in(
        &self,
        owner: &UserModel,
        booking_id: i32,
        request: CheckInDto,
    ) -> Result<BookingDto, Error> {
        let txn = self.db.begin().await?;

        let booking = find_visible(&txn, booking_id, |b| b.hostel_owner_id == owner.id).await?;
        let changes = entity::booking::ActiveModel {
            check_in: ActiveValue::Set(Some(CheckInRecord {
                actual_date: Utc::now().naive_utc(),
                verified_by: owner.id,
                room_number: request.room_number.clone(),
                bed_number: request.bed_number.clone(),
                keys_issued: true,
                notes: request.notes.clone(),
            })),
            ..Default::default()
        };
        let change = StatusChange {
            notes: request.notes,
            ..StatusChange::by(BookingAction::CheckIn, owner.id)
        };
        let updated = advance(&txn, &booking, change, changes).await?;

        txn.commit().await?;

        tracing::info!(booking_id, "Student checked in");

        self.notifier
            .publish(
                Room::Student(updated.student_id),
                CHECKED_IN,
                &CheckedInEvent {
                    booking_id,
                    room_number: request.room_number,
                    bed_number: request.bed_number,
                },
            )
            .await;

        Ok(updated.into())
    }

    /// Records check-out and refunds the deposit less deductions, releasing the rooms
    pub async fn check_out(
        &self,
        owner: &UserModel,
        booking_id: i32,
        request: CheckOutDto,
    ) -> Result<CheckOutResultDto, Error> {
        let txn = self.db.begin().await?;

        let booking = find_visible(&txn, booking_id, |b| b.hostel_owner_id == owner.id).await?;

        let now = Utc::now().naive_utc();
        let total_deductions: f64 = request.deductions.iter().map(|d| d.amount).sum();
        let refund_amount = round2((booking.security_deposit - total_deductions).max(0.0));

        let mut payment = booking.payment.clone();
        payment.refund_amount = refund_amount;
        payment.refund_date = Some(now);

        let changes = entity::booking::ActiveModel {
            check_out: ActiveValue::Set(Some(CheckOutRecord {
                actual_date: now,
                verified_by: owner.id,
                condition: request.condition,
                deductions: request
                    .deductions
                    .iter()
                    .map(|d| Deduction {
                        item: d.item.clone(),
                        amount: d.amount,
                        reason: d.reason.clone(),
                    })
                    .collect(),
                refund_amount,
                notes: request.notes.clone(),
                final_settlement: None,
            })),
            payment: ActiveValue::Set(payment),
            ..Default::default()
        };
        let change = StatusChange {
            notes: request.notes,
            ..StatusChange::by(BookingAction::CheckOut, owner.id)
        };
        let updated = advance(&txn, &booking, change, changes).await?;

        txn.commit().await?;

        tracing::info!(booking_id, refund_amount, "Student checked out");

        self.notifier
            .publish(
                Room::Student(updated.student_id),
                CHECKED_OUT,
                &CheckedOutEvent {
                    booking_id,
                    refund_amount,
                    deductions: request.deductions,
                },
            )
            .await;

        Ok(CheckOutResultDto {
            booking: updated.into(),
            refund_amount,
        })
    }

    /// Records the final settlement of a checked out booking
    pub async fn complete(
        &self,
        owner: &UserModel,
        booking_id: i32,
        request: CompleteBookingDto,
    ) -> Result<BookingDto, Error> {
        let txn = self.db.begin().await?;

        let booking = find_visible(&txn, booking_id, |b| b.hostel_owner_id == owner.id).await?;
        lifecycle::transition(booking.status, BookingAction::Complete)?;

        let mut record = booking.check_out.clone().ok_or_else(|| {
            Error::InternalError(format!(
                "Booking {} is checked out without a check-out record",
                booking_id
            ))
        })?;
        record.final_settlement = Some(FinalSettlement {
            amount: request.amount,
            method: request.method,
            transaction_id: request.transaction_id,
            date: Utc::now().naive_utc(),
        });

        let changes = entity::booking::ActiveModel {
            check_out: ActiveValue::Set(Some(record)),
            ..Default::default()
        };
        let updated = advance(
            &txn,
            &booking,
            StatusChange::by(BookingAction::Complete, owner.id),
            changes,
        )
        .await?;

        txn.commit().await?;

        tracing::info!(booking_id, "Booking completed");

        Ok(updated.into())
    }

    /// Attaches the student's review and refreshes the hostel's rating aggregate
    pub async fn review(
        &self,
        student: &UserModel,
        booking_id: i32,
        review: ReviewDto,
    ) -> Result<BookingDto, Error> {
        let txn = self.db.begin().await?;

        let booking = find_visible(&txn, booking_id, |b| b.student_id == student.id).await?;
        if booking.review.is_some() {
            return Err(BookingError::AlreadyReviewed.into());
        }
        if !lifecycle::is_reviewable(booking.status) {
            return Err(BookingError::NotReviewable(booking.status).into());
        }

        let rating = review.rating;
        let record = ReviewRecord {
            rating: ReviewRating {
                overall: rating.overall,
                cleanliness: rating.cleanliness,
                food: rating.food,
                location: rating.location,
                facilities: rating.facilities,
                staff: rating.staff,
            },
            comment: review.comment,
            photos: review.photos,
            would_recommend: review.would_recommend.unwrap_or(true),
            submitted_at: Utc::now().naive_utc(),
        };

        let booking_repo = BookingRepository::new(&txn);
        let updated = booking_repo
            .attach_review(booking_id, booking.status, record)
            .await?
            .ok_or(BookingError::ConcurrentUpdate(booking_id))?;

        let ratings: Vec<ReviewRating> = booking_repo
            .list_reviewed_for_hostel(booking.hostel_id)
            .await?
            .into_iter()
            .filter_map(|b| b.review.map(|r| r.rating))
            .collect();
        let summary = rating_summary(&ratings);
        let average = summary.average;
        HostelRepository::new(&txn)
            .update_rating(booking.hostel_id, summary)
            .await?;

        txn.commit().await?;

        tracing::info!(
            booking_id,
            hostel_id = booking.hostel_id,
            average,
            "Review submitted"
        );

        Ok(updated.into())
    }

    /// Records a payment received for the booking, by its hostel owner or an admin
    pub async fn record_payment(
        &self,
        recorder: &UserModel,
        booking_id: i32,
        request: RecordPaymentDto,
    ) -> Result<BookingDto, Error> {
        let booking = find_visible(self.db, booking_id, |b| {
            recorder.role == UserRole::Admin || b.hostel_owner_id == recorder.id
        })
        .await?;
        if !lifecycle::accepts_payments(booking.status) {
            return Err(BookingError::PaymentsClosed(booking.status).into());
        }

        let mut payment = booking.payment.clone();
        payment.paid_amount = round2(payment.paid_amount + request.amount);
        payment.history.push(PaymentEntry {
            amount: request.amount,
            method: request.method,
            transaction_id: request.transaction_id,
            notes: request.notes,
            recorded_by: recorder.id,
            date: Utc::now().naive_utc(),
        });
        payment.status = if payment.paid_amount >= booking.final_amount {
            PaymentStatus::Completed
        } else {
            PaymentStatus::Partial
        };

        let updated = BookingRepository::new(self.db)
            .update_if_unchanged(
                &booking,
                entity::booking::ActiveModel {
                    payment: ActiveValue::Set(payment),
                    ..Default::default()
                },
            )
            .await?
            .ok_or(BookingError::ConcurrentUpdate(booking_id))?;

        tracing::info!(
            booking_id,
            amount = request.amount,
            paid = updated.payment.paid_amount,
            "Payment recorded"
        );

        Ok(updated.into())
    }

    /// Appends a message from one participant to the other
    pub async fn send_message(
        &self,
        sender: &UserModel,
        booking_id: i32,
        request: BookingMessageDto,
    ) -> Result<BookingDto, Error> {
        let booking = find_visible(self.db, booking_id, |b| {
            b.student_id == sender.id || b.hostel_owner_id == sender.id
        })
        .await?;

        let (recipient, room) = if sender.id == booking.student_id {
            (booking.hostel_owner_id, Room::Owner(booking.hostel_owner_id))
        } else {
            (booking.student_id, Room::Student(booking.student_id))
        };

        let mut communications = booking.communications.clone();
        communications.0.push(Communication {
            from_user_id: sender.id,
            to_user_id: recipient,
            subject: request.subject.clone(),
            message: request.message.clone(),
            sent_at: Utc::now().naive_utc(),
        });

        let updated = BookingRepository::new(self.db)
            .update_if_unchanged(
                &booking,
                entity::booking::ActiveModel {
                    communications: ActiveValue::Set(communications),
                    ..Default::default()
                },
            )
            .await?
            .ok_or(BookingError::ConcurrentUpdate(booking_id))?;

        self.notifier
            .publish(
                room,
                BOOKING_MESSAGE,
                &BookingMessageEvent {
                    booking_id,
                    from_user_id: sender.id,
                    subject: request.subject,
                    message: request.message,
                },
            )
            .await;

        Ok(updated.into())
    }

    /// A booking with its status timeline, visible to its participants and admins
    pub async fn get(&self, viewer: &UserModel, booking_id: i32) -> Result<BookingDetailDto, Error> {
        let booking = find_visible(self.db, booking_id, |b| can_view(b, viewer)).await?;

        let hostel_name = HostelRepository::new(self.db)
            .get(booking.hostel_id)
            .await?
            .map(|h| h.name)
            .unwrap_or_default();
        let student_name = UserRepository::new(self.db)
            .get(booking.student_id)
            .await?
            .map(|u| u.name)
            .unwrap_or_default();
        let status_history = StatusHistoryRepository::new(self.db)
            .list_for_booking(booking_id)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(BookingDetailDto {
            booking: booking.into(),
            hostel_name,
            student_name,
            status_history,
        })
    }

    /// Bookings made by a student, or placed on an owner's hostels, newest first
    pub async fn list_mine(
        &self,
        user: &UserModel,
        query: BookingQuery,
    ) -> Result<BookingListDto, Error> {
        let scope = match user.role {
            UserRole::Student => BookingScope::Student(user.id),
            UserRole::HostelOwner => BookingScope::Owner(user.id),
            UserRole::Admin => {
                return Err(AuthError::Forbidden {
                    user_id: user.id,
                    role: user.role,
                    required: "Students and hostel owners",
                }
                .into())
            }
        };

        let (page, limit) = PageQuery::resolve(query.page, query.limit, DEFAULT_PAGE_SIZE);
        let (bookings, total) = BookingRepository::new(self.db)
            .list(
                BookingFilter {
                    scope,
                    status: query.status,
                    matches: None,
                },
                page,
                limit,
            )
            .await?;

        Ok(BookingListDto {
            bookings: bookings.into_iter().map(Into::into).collect(),
            pagination: PaginationDto::new(page, limit, total),
        })
    }

    /// Cancels every pending request whose response deadline passed before `now`.
    ///
    /// Requests answered while the sweep runs are skipped. Returns how many were cancelled.
    pub async fn expire_pending(&self, now: NaiveDateTime) -> Result<usize, Error> {
        let expired = BookingRepository::new(self.db)
            .list_expired_pending(now)
            .await?;

        let mut cancelled = 0;
        for booking in expired {
            let txn = self.db.begin().await?;

            let change = StatusChange {
                action: BookingAction::Expire,
                actor: None,
                reason: Some(AUTO_CANCEL_REASON.to_string()),
                notes: None,
            };
            match advance(&txn, &booking, change, Default::default()).await {
                Ok(_) => txn.commit().await?,
                Err(Error::BookingError(BookingError::NotFound(_))) => {
                    tracing::debug!(booking_id = booking.id, "Booking answered before expiry");
                    continue;
                }
                Err(err) => return Err(err),
            }

            cancelled += 1;

            let event = BookingCancelledEvent {
                booking_id: booking.id,
                cancelled_by: "system".to_string(),
                reason: Some(AUTO_CANCEL_REASON.to_string()),
            };
            self.notifier
                .publish(Room::Student(booking.student_id), BOOKING_CANCELLED, &event)
                .await;
            self.notifier
                .publish(Room::Owner(booking.hostel_owner_id), BOOKING_CANCELLED, &event)
                .await;
        }

        if cancelled > 0 {
            tracing::info!(cancelled, "Expired unanswered booking requests");
        }

        Ok(cancelled)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::NaiveDate;
    use entity::{sea_orm_active_enums::RoomType, types::BookingPreferences};

    use crate::model::booking::{CreateBookingDto, DurationDto};

    pub(crate) fn request(hostel_id: i32, beds_requested: i32, months: i32) -> CreateBookingDto {
        CreateBookingDto {
            hostel_id,
            room_type: RoomType::Double,
            beds_requested,
            duration: DurationDto {
                check_in: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
                check_out: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
                months,
            },
            preferences: BookingPreferences::default(),
        }
    }

    mod rating_summary {
        use entity::types::ReviewRating;

        use crate::server::service::booking::rating_summary;

        fn rating(overall: i32, food: i32) -> ReviewRating {
            ReviewRating {
                overall,
                cleanliness: 4,
                food,
                location: 5,
                facilities: 3,
                staff: 4,
            }
        }

        /// Expect the overall average rounded to one decimal and per-axis means
        #[test]
        fn averages_reviews() {
            let summary = rating_summary(&[rating(5, 2), rating(4, 3), rating(4, 3)]);

            assert_eq!(summary.average, 4.3);
            assert_eq!(summary.total_reviews, 3);
            assert_eq!(summary.breakdown.food, 2.7);
            assert_eq!(summary.breakdown.location, 5.0);
        }

        #[test]
        fn empty_is_zero() {
            let summary = rating_summary(&[]);

            assert_eq!(summary.average, 0.0);
            assert_eq!(summary.total_reviews, 0);
        }
    }

    mod create {
        use entity::sea_orm_active_enums::{BookingStatus, HostelStatus, RoomType};
        use habs_test_utils::prelude::*;

        use crate::server::{
            data::{booking::status_history::StatusHistoryRepository, hostel::HostelRepository},
            error::{booking::BookingError, hostel::HostelError, Error},
            service::{
                booking::{tests::request, BookingService},
                notification::{NotificationHub, Room, NEW_BOOKING_REQUEST},
            },
        };

        /// Expect a pending booking priced at 89680 with one history entry and an owner notification
        #[tokio::test]
        async fn creates_pending_request() -> Result<(), TestError> {
            let test = TestBuilder::new().with_booking_tables().build().await?;
            let owner = test.user().insert_owner("owner@example.com").await?;
            let student = test.user().insert_student("student@example.com").await?;
            let (hostel, _) = test.hostel().insert_approved_hostel(owner.id).await?;

            let hub = NotificationHub::new();
            let mut owner_rx = hub.subscribe(Room::Owner(owner.id)).await;

            let booking = BookingService::new(&test.db, &hub)
                .create(&student, request(hostel.id, 2, 6))
                .await
                .unwrap();

            assert_eq!(booking.status, BookingStatus::Pending);
            assert_eq!(booking.pricing.total_amount, 76000.0);
            assert_eq!(booking.pricing.gst, 13680.0);
            assert_eq!(booking.pricing.final_amount, 89680.0);
            assert_eq!(booking.hostel_owner_id, owner.id);

            let history = StatusHistoryRepository::new(&test.db)
                .list_for_booking(booking.id)
                .await?;
            assert_eq!(history.len(), 1);
            assert_eq!(history[0].status, BookingStatus::Pending);

            let hostel = HostelRepository::new(&test.db).get(hostel.id).await?.unwrap();
            assert_eq!(hostel.booking_requests, 1);

            let notification = owner_rx.try_recv().unwrap();
            assert_eq!(notification.event, NEW_BOOKING_REQUEST);
            assert_eq!(notification.data["bookingId"], booking.id);

            Ok(())
        }

        /// Expect mess charges only when requested and offered by the hostel
        #[tokio::test]
        async fn adds_mess_charges() -> Result<(), TestError> {
            let test = TestBuilder::new().with_booking_tables().build().await?;
            let owner = test.user().insert_owner("owner@example.com").await?;
            let student = test.user().insert_student("student@example.com").await?;
            let (hostel, _) = test.hostel().insert_approved_hostel(owner.id).await?;

            let mut with_mess = request(hostel.id, 1, 6);
            with_mess.preferences.mess_required = true;

            let hub = NotificationHub::new();
            let booking = BookingService::new(&test.db, &hub)
                .create(&student, with_mess)
                .await
                .unwrap();

            assert_eq!(booking.pricing.mess_charges, 18000.0);
            assert_eq!(booking.pricing.total_amount, 58000.0);

            Ok(())
        }

        /// Expect NotFound for a hostel still awaiting moderation
        #[tokio::test]
        async fn rejects_unapproved_hostel() -> Result<(), TestError> {
            let test = TestBuilder::new().with_booking_tables().build().await?;
            let owner = test.user().insert_owner("owner@example.com").await?;
            let student = test.user().insert_student("student@example.com").await?;
            let hostel = test
                .hostel()
                .insert_hostel(owner.id, "Pending Hostel", HostelStatus::Pending)
                .await?;

            let hub = NotificationHub::new();
            let result = BookingService::new(&test.db, &hub)
                .create(&student, request(hostel.id, 1, 6))
                .await;

            assert!(matches!(
                result,
                Err(Error::HostelError(HostelError::NotFound(_)))
            ));

            Ok(())
        }

        /// Expect room tier, capacity, and minimum stay checks to reject the request
        #[tokio::test]
        async fn validates_request() -> Result<(), TestError> {
            let test = TestBuilder::new().with_booking_tables().build().await?;
            let owner = test.user().insert_owner("owner@example.com").await?;
            let student = test.user().insert_student("student@example.com").await?;
            let (hostel, _) = test.hostel().insert_approved_hostel(owner.id).await?;
            test.hostel()
                .insert_room_type(hostel.id, RoomType::Single, 4, 1, 1, 9000.0, 5000.0)
                .await?;

            let hub = NotificationHub::new();
            let service = BookingService::new(&test.db, &hub);

            let mut triple = request(hostel.id, 1, 6);
            triple.room_type = RoomType::Triple;
            assert!(matches!(
                service.create(&student, triple).await,
                Err(Error::BookingError(BookingError::RoomTypeUnavailable(RoomType::Triple)))
            ));

            let mut single = request(hostel.id, 2, 6);
            single.room_type = RoomType::Single;
            assert!(matches!(
                service.create(&student, single).await,
                Err(Error::BookingError(BookingError::InsufficientBeds {
                    available: 1,
                    requested: 2
                }))
            ));

            assert!(matches!(
                service.create(&student, request(hostel.id, 1, 0)).await,
                Err(Error::BookingError(BookingError::MinimumStay(1)))
            ));

            Ok(())
        }
    }

    mod update {
        use entity::sea_orm_active_enums::BookingStatus;
        use habs_test_utils::prelude::*;

        use crate::{
            model::booking::UpdateBookingDto,
            server::{
                error::{booking::BookingError, Error},
                service::{booking::BookingService, notification::NotificationHub},
            },
        };

        /// Expect a pending request to be re-priced for the new bed count
        #[tokio::test]
        async fn reprices_pending_request() -> Result<(), TestError> {
            let test = TestBuilder::new().with_booking_tables().build().await?;
            let owner = test.user().insert_owner("owner@example.com").await?;
            let student = test.user().insert_student("student@example.com").await?;
            let (hostel, room_type) = test.hostel().insert_approved_hostel(owner.id).await?;
            let booking = test
                .booking()
                .insert_booking(student.id, &hostel, &room_type, 1, BookingStatus::Pending)
                .await?;

            let hub = NotificationHub::new();
            let updated = BookingService::new(&test.db, &hub)
                .update(
                    &student,
                    booking.id,
                    UpdateBookingDto {
                        beds_requested: Some(2),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();

            assert_eq!(updated.beds_requested, 2);
            assert_eq!(updated.pricing.final_amount, 89680.0);

            Ok(())
        }

        /// Expect NotEditable once the owner approved the request
        #[tokio::test]
        async fn refuses_after_approval() -> Result<(), TestError> {
            let test = TestBuilder::new().with_booking_tables().build().await?;
            let owner = test.user().insert_owner("owner@example.com").await?;
            let student = test.user().insert_student("student@example.com").await?;
            let (hostel, room_type) = test.hostel().insert_approved_hostel(owner.id).await?;
            let booking = test
                .booking()
                .insert_booking(student.id, &hostel, &room_type, 1, BookingStatus::Approved)
                .await?;

            let hub = NotificationHub::new();
            let result = BookingService::new(&test.db, &hub)
                .update(&student, booking.id, UpdateBookingDto::default())
                .await;

            assert!(matches!(
                result,
                Err(Error::BookingError(BookingError::NotEditable))
            ));

            Ok(())
        }
    }

    mod respond {
        use entity::sea_orm_active_enums::{BookingStatus, RoomType};
        use habs_test_utils::prelude::*;

        use crate::{
            model::booking::{RespondAction, RespondBookingDto},
            server::{
                data::hostel::{room_type::RoomTypeRepository, HostelRepository},
                error::{booking::BookingError, Error},
                service::{
                    booking::{tests::request, BookingService},
                    notification::{NotificationHub, Room, BOOKING_RESPONSE},
                },
            },
        };

        fn approve() -> RespondBookingDto {
            RespondBookingDto {
                action: RespondAction::Approve,
                message: Some("Welcome".to_string()),
                counter_offer: None,
            }
        }

        /// Expect approval of 3 beds in double rooms to reserve 2 rooms and notify the student
        #[tokio::test]
        async fn approval_reserves_rooms() -> Result<(), TestError> {
            let test = TestBuilder::new().with_booking_tables().build().await?;
            let owner = test.user().insert_owner("owner@example.com").await?;
            let student = test.user().insert_student("student@example.com").await?;
            let (hostel, _) = test.hostel().insert_approved_hostel(owner.id).await?;

            let hub = NotificationHub::new();
            let mut student_rx = hub.subscribe(Room::Student(student.id)).await;
            let service = BookingService::new(&test.db, &hub);
            let booking = service.create(&student, request(hostel.id, 3, 6)).await.unwrap();

            let approved = service.respond(&owner, booking.id, approve()).await.unwrap();

            assert_eq!(approved.status, BookingStatus::Approved);
            assert_eq!(
                approved.owner_response.and_then(|r| r.message).as_deref(),
                Some("Welcome")
            );

            let room_type = RoomTypeRepository::new(&test.db)
                .find(hostel.id, RoomType::Double)
                .await?
                .unwrap();
            assert_eq!(room_type.available_rooms, 8);

            let hostel = HostelRepository::new(&test.db).get(hostel.id).await?.unwrap();
            assert_eq!(hostel.successful_bookings, 1);

            let notification = student_rx.try_recv().unwrap();
            assert_eq!(notification.event, BOOKING_RESPONSE);
            assert_eq!(notification.data["status"], "approved");

            Ok(())
        }

        /// Expect a second approval to find no pending booking and leave inventory untouched
        #[tokio::test]
        async fn second_approval_not_found() -> Result<(), TestError> {
            let test = TestBuilder::new().with_booking_tables().build().await?;
            let owner = test.user().insert_owner("owner@example.com").await?;
            let student = test.user().insert_student("student@example.com").await?;
            let (hostel, _) = test.hostel().insert_approved_hostel(owner.id).await?;

            let hub = NotificationHub::new();
            let service = BookingService::new(&test.db, &hub);
            let booking = service.create(&student, request(hostel.id, 2, 6)).await.unwrap();

            service.respond(&owner, booking.id, approve()).await.unwrap();
            let result = service.respond(&owner, booking.id, approve()).await;

            assert!(matches!(
                result,
                Err(Error::BookingError(BookingError::NotFound(_)))
            ));
            let room_type = RoomTypeRepository::new(&test.db)
                .find(hostel.id, RoomType::Double)
                .await?
                .unwrap();
            assert_eq!(room_type.available_rooms, 9);

            Ok(())
        }

        /// Expect another owner to be unable to respond
        #[tokio::test]
        async fn other_owner_not_found() -> Result<(), TestError> {
            let test = TestBuilder::new().with_booking_tables().build().await?;
            let owner = test.user().insert_owner("owner@example.com").await?;
            let other = test.user().insert_owner("other@example.com").await?;
            let student = test.user().insert_student("student@example.com").await?;
            let (hostel, room_type) = test.hostel().insert_approved_hostel(owner.id).await?;
            let booking = test
                .booking()
                .insert_booking(student.id, &hostel, &room_type, 1, BookingStatus::Pending)
                .await?;

            let hub = NotificationHub::new();
            let result = BookingService::new(&test.db, &hub)
                .respond(&other, booking.id, approve())
                .await;

            assert!(matches!(
                result,
                Err(Error::BookingError(BookingError::NotFound(_)))
            ));

            Ok(())
        }
    }

    mod cancel {
        use entity::sea_orm_active_enums::{BookingStatus, RoomType};
        use habs_test_utils::prelude::*;

        use crate::{
            model::booking::{CancelBookingDto, RespondAction, RespondBookingDto},
            server::{
                data::{
                    booking::status_history::StatusHistoryRepository,
                    hostel::room_type::RoomTypeRepository,
                },
                error::{booking::BookingError, Error},
                service::{
                    booking::{tests::request, BookingService},
                    notification::{NotificationHub, Room, BOOKING_CANCELLED},
                },
            },
        };

        /// Expect approve then cancel to restore all 10 rooms and leave three history entries
        #[tokio::test]
        async fn cancel_after_approval_releases_rooms() -> Result<(), TestError> {
            let test = TestBuilder::new().with_booking_tables().build().await?;
            let owner = test.user().insert_owner("owner@example.com").await?;
            let student = test.user().insert_student("student@example.com").await?;
            let (hostel, _) = test.hostel().insert_approved_hostel(owner.id).await?;

            let hub = NotificationHub::new();
            let mut owner_rx = hub.subscribe(Room::Owner(owner.id)).await;
            let service = BookingService::new(&test.db, &hub);
            let booking = service.create(&student, request(hostel.id, 3, 6)).await.unwrap();
            service
                .respond(
                    &owner,
                    booking.id,
                    RespondBookingDto {
                        action: RespondAction::Approve,
                        message: None,
                        counter_offer: None,
                    },
                )
                .await
                .unwrap();

            let cancelled = service
                .cancel(
                    &student,
                    booking.id,
                    CancelBookingDto {
                        reason: Some("Plans changed".to_string()),
                    },
                )
                .await
                .unwrap();

            assert_eq!(cancelled.status, BookingStatus::Cancelled);
            let room_type = RoomTypeRepository::new(&test.db)
                .find(hostel.id, RoomType::Double)
                .await?
                .unwrap();
            assert_eq!(room_type.available_rooms, 10);

            let history = StatusHistoryRepository::new(&test.db)
                .list_for_booking(booking.id)
                .await?;
            assert_eq!(history.len(), 3);
            assert_eq!(history[2].reason.as_deref(), Some("Plans changed"));

            let events: Vec<_> = std::iter::from_fn(|| owner_rx.try_recv().ok())
                .map(|n| n.event)
                .collect();
            assert_eq!(events.last().map(String::as_str), Some(BOOKING_CANCELLED));

            Ok(())
        }

        /// Expect cancelling a rejected booking to be an invalid transition
        #[tokio::test]
        async fn rejected_is_final() -> Result<(), TestError> {
            let test = TestBuilder::new().with_booking_tables().build().await?;
            let owner = test.user().insert_owner("owner@example.com").await?;
            let student = test.user().insert_student("student@example.com").await?;
            let (hostel, room_type) = test.hostel().insert_approved_hostel(owner.id).await?;
            let booking = test
                .booking()
                .insert_booking(student.id, &hostel, &room_type, 1, BookingStatus::Rejected)
                .await?;

            let hub = NotificationHub::new();
            let result = BookingService::new(&test.db, &hub)
                .cancel(&student, booking.id, CancelBookingDto::default())
                .await;

            assert!(matches!(
                result,
                Err(Error::BookingError(BookingError::InvalidTransition { .. }))
            ));

            Ok(())
        }

        /// Expect admins to cancel any booking and strangers to get NotFound
        #[tokio::test]
        async fn admin_may_cancel() -> Result<(), TestError> {
            let test = TestBuilder::new().with_booking_tables().build().await?;
            let owner = test.user().insert_owner("owner@example.com").await?;
            let student = test.user().insert_student("student@example.com").await?;
            let stranger = test.user().insert_student("stranger@example.com").await?;
            let admin = test.user().insert_admin("admin@example.com").await?;
            let (hostel, room_type) = test.hostel().insert_approved_hostel(owner.id).await?;
            let booking = test
                .booking()
                .insert_booking(student.id, &hostel, &room_type, 1, BookingStatus::Pending)
                .await?;

            let hub = NotificationHub::new();
            let service = BookingService::new(&test.db, &hub);

            assert!(matches!(
                service
                    .cancel(&stranger, booking.id, CancelBookingDto::default())
                    .await,
                Err(Error::BookingError(BookingError::NotFound(_)))
            ));

            let cancelled = service
                .cancel(&admin, booking.id, CancelBookingDto::default())
                .await
                .unwrap();
            assert_eq!(cancelled.status, BookingStatus::Cancelled);

            Ok(())
        }
    }

    mod stay {
        use entity::{
            sea_orm_active_enums::{BookingStatus, RoomType},
            types::RoomCondition,
        };
        use habs_test_utils::prelude::*;

        use crate::{
            model::booking::{
                CheckInDto, CheckOutDto, CompleteBookingDto, DeductionDto, RespondAction,
                RespondBookingDto,
            },
            server::{
                data::{
                    booking::status_history::StatusHistoryRepository,
                    hostel::room_type::RoomTypeRepository,
                },
                error::{booking::BookingError, Error},
                service::{
                    booking::{tests::request, BookingService},
                    notification::NotificationHub,
                },
            },
        };

        /// Expect approve, check-in, check-out, complete to restore rooms and refund the
        /// deposit less deductions
        #[tokio::test]
        async fn full_stay() -> Result<(), TestError> {
            let test = TestBuilder::new().with_booking_tables().build().await?;
            let owner = test.user().insert_owner("owner@example.com").await?;
            let student = test.user().insert_student("student@example.com").await?;
            let (hostel, _) = test.hostel().insert_approved_hostel(owner.id).await?;

            let hub = NotificationHub::new();
            let service = BookingService::new(&test.db, &hub);
            let booking = service.create(&student, request(hostel.id, 2, 6)).await.unwrap();
            service
                .respond(
                    &owner,
                    booking.id,
                    RespondBookingDto {
                        action: RespondAction::Approve,
                        message: None,
                        counter_offer: None,
                    },
                )
                .await
                .unwrap();

            let checked_in = service
                .check_in(
                    &owner,
                    booking.id,
                    CheckInDto {
                        room_number: "101".to_string(),
                        bed_number: Some("A".to_string()),
                        notes: None,
                    },
                )
                .await
                .unwrap();
            assert_eq!(checked_in.status, BookingStatus::CheckedIn);
            assert!(checked_in.check_in.is_some_and(|c| c.keys_issued));

            let result = service
                .check_out(
                    &owner,
                    booking.id,
                    CheckOutDto {
                        condition: RoomCondition::Good,
                        deductions: vec![DeductionDto {
                            item: "Broken chair".to_string(),
                            amount: 1500.0,
                            reason: None,
                        }],
                        notes: None,
                    },
                )
                .await
                .unwrap();
            assert_eq!(result.refund_amount, 2500.0);
            assert_eq!(result.booking.payment.refund_amount, 2500.0);
            assert_eq!(result.booking.status, BookingStatus::CheckedOut);

            let room_type = RoomTypeRepository::new(&test.db)
                .find(hostel.id, RoomType::Double)
                .await?
                .unwrap();
            assert_eq!(room_type.available_rooms, 10);

            let completed = service
                .complete(
                    &owner,
                    booking.id,
                    CompleteBookingDto {
                        amount: 2500.0,
                        method: "bank_transfer".to_string(),
                        transaction_id: None,
                    },
                )
                .await
                .unwrap();
            assert_eq!(completed.status, BookingStatus::Completed);
            assert!(completed
                .check_out
                .and_then(|c| c.final_settlement)
                .is_some());

            let history = StatusHistoryRepository::new(&test.db)
                .list_for_booking(booking.id)
                .await?;
            assert_eq!(history.len(), 5);

            Ok(())
        }

        /// Expect deductions above the deposit to floor the refund at zero
        #[tokio::test]
        async fn refund_never_negative() -> Result<(), TestError> {
            let test = TestBuilder::new().with_booking_tables().build().await?;
            let owner = test.user().insert_owner("owner@example.com").await?;
            let student = test.user().insert_student("student@example.com").await?;
            let (hostel, room_type) = test.hostel().insert_approved_hostel(owner.id).await?;
            let booking = test
                .booking()
                .insert_booking(student.id, &hostel, &room_type, 1, BookingStatus::CheckedIn)
                .await?;

            let hub = NotificationHub::new();
            let result = BookingService::new(&test.db, &hub)
                .check_out(
                    &owner,
                    booking.id,
                    CheckOutDto {
                        condition: RoomCondition::Poor,
                        deductions: vec![DeductionDto {
                            item: "Damage".to_string(),
                            amount: 9000.0,
                            reason: None,
                        }],
                        notes: None,
                    },
                )
                .await
                .unwrap();

            assert_eq!(result.refund_amount, 0.0);

            Ok(())
        }

        /// Expect check-in of a pending booking to be an invalid transition
        #[tokio::test]
        async fn check_in_requires_approval() -> Result<(), TestError> {
            let test = TestBuilder::new().with_booking_tables().build().await?;
            let owner = test.user().insert_owner("owner@example.com").await?;
            let student = test.user().insert_student("student@example.com").await?;
            let (hostel, room_type) = test.hostel().insert_approved_hostel(owner.id).await?;
            let booking = test
                .booking()
                .insert_booking(student.id, &hostel, &room_type, 1, BookingStatus::Pending)
                .await?;

            let hub = NotificationHub::new();
            let result = BookingService::new(&test.db, &hub)
                .check_in(
                    &owner,
                    booking.id,
                    CheckInDto {
                        room_number: "101".to_string(),
                        bed_number: None,
                        notes: None,
                    },
                )
                .await;

            assert!(matches!(
                result,
                Err(Error::BookingError(BookingError::InvalidTransition { .. }))
            ));

            Ok(())
        }
    }

    mod review {
        use entity::sea_orm_active_enums::BookingStatus;
        use habs_test_utils::prelude::*;

        use crate::{
            model::booking::{ReviewDto, ReviewRatingDto},
            server::{
                data::hostel::HostelRepository,
                error::{booking::BookingError, Error},
                service::{booking::BookingService, notification::NotificationHub},
            },
        };

        fn review(overall: i32) -> ReviewDto {
            ReviewDto {
                rating: ReviewRatingDto {
                    overall,
                    cleanliness: 4,
                    food: 3,
                    location: 5,
                    facilities: 4,
                    staff: 4,
                },
                comment: Some("Good stay".to_string()),
                photos: Vec::new(),
                would_recommend: None,
            }
        }

        /// Expect the hostel average over both reviews and a rejected second review
        #[tokio::test]
        async fn updates_hostel_rating_once() -> Result<(), TestError> {
            let test = TestBuilder::new().with_booking_tables().build().await?;
            let owner = test.user().insert_owner("owner@example.com").await?;
            let student = test.user().insert_student("student@example.com").await?;
            let other = test.user().insert_student("other@example.com").await?;
            let (hostel, room_type) = test.hostel().insert_approved_hostel(owner.id).await?;
            let first = test
                .booking()
                .insert_booking(student.id, &hostel, &room_type, 1, BookingStatus::CheckedOut)
                .await?;
            let second = test
                .booking()
                .insert_booking(other.id, &hostel, &room_type, 1, BookingStatus::Completed)
                .await?;

            let hub = NotificationHub::new();
            let service = BookingService::new(&test.db, &hub);

            let reviewed = service.review(&student, first.id, review(5)).await.unwrap();
            assert!(reviewed.review.is_some_and(|r| r.would_recommend));
            service.review(&other, second.id, review(4)).await.unwrap();

            let hostel = HostelRepository::new(&test.db).get(hostel.id).await?.unwrap();
            assert_eq!(hostel.rating_average, 4.5);
            assert_eq!(hostel.rating_total_reviews, 2);

            let again = service.review(&student, first.id, review(1)).await;
            assert!(matches!(
                again,
                Err(Error::BookingError(BookingError::AlreadyReviewed))
            ));

            Ok(())
        }

        /// Expect reviews of bookings that were never checked out to be refused
        #[tokio::test]
        async fn requires_check_out() -> Result<(), TestError> {
            let test = TestBuilder::new().with_booking_tables().build().await?;
            let owner = test.user().insert_owner("owner@example.com").await?;
            let student = test.user().insert_student("student@example.com").await?;
            let (hostel, room_type) = test.hostel().insert_approved_hostel(owner.id).await?;
            let booking = test
                .booking()
                .insert_booking(student.id, &hostel, &room_type, 1, BookingStatus::Approved)
                .await?;

            let hub = NotificationHub::new();
            let result = BookingService::new(&test.db, &hub)
                .review(&student, booking.id, review(5))
                .await;

            assert!(matches!(
                result,
                Err(Error::BookingError(BookingError::NotReviewable(
                    BookingStatus::Approved
                )))
            ));

            Ok(())
        }
    }

    mod record_payment {
        use entity::{sea_orm_active_enums::BookingStatus, types::PaymentStatus};
        use habs_test_utils::prelude::*;

        use crate::{
            model::booking::RecordPaymentDto,
            server::{
                error::{booking::BookingError, Error},
                service::{booking::BookingService, notification::NotificationHub},
            },
        };

        fn payment(amount: f64) -> RecordPaymentDto {
            RecordPaymentDto {
                amount,
                method: "upi".to_string(),
                transaction_id: None,
                notes: None,
            }
        }

        /// Expect partial then completed status as payments accumulate
        #[tokio::test]
        async fn accumulates_payments() -> Result<(), TestError> {
            let test = TestBuilder::new().with_booking_tables().build().await?;
            let owner = test.user().insert_owner("owner@example.com").await?;
            let student = test.user().insert_student("student@example.com").await?;
            let (hostel, room_type) = test.hostel().insert_approved_hostel(owner.id).await?;
            let booking = test
                .booking()
                .insert_booking(student.id, &hostel, &room_type, 2, BookingStatus::Approved)
                .await?;

            let hub = NotificationHub::new();
            let service = BookingService::new(&test.db, &hub);

            let partial = service
                .record_payment(&owner, booking.id, payment(40000.0))
                .await
                .unwrap();
            assert_eq!(partial.payment.status, PaymentStatus::Partial);

            let completed = service
                .record_payment(&owner, booking.id, payment(49680.0))
                .await
                .unwrap();
            assert_eq!(completed.payment.status, PaymentStatus::Completed);
            assert_eq!(completed.payment.paid_amount, 89680.0);
            assert_eq!(completed.payment.history.len(), 2);

            Ok(())
        }

        /// Expect payments on a pending request and by its student to be refused
        #[tokio::test]
        async fn refuses_closed_or_foreign() -> Result<(), TestError> {
            let test = TestBuilder::new().with_booking_tables().build().await?;
            let owner = test.user().insert_owner("owner@example.com").await?;
            let student = test.user().insert_student("student@example.com").await?;
            let (hostel, room_type) = test.hostel().insert_approved_hostel(owner.id).await?;
            let booking = test
                .booking()
                .insert_booking(student.id, &hostel, &room_type, 2, BookingStatus::Pending)
                .await?;

            let hub = NotificationHub::new();
            let service = BookingService::new(&test.db, &hub);

            assert!(matches!(
                service.record_payment(&owner, booking.id, payment(100.0)).await,
                Err(Error::BookingError(BookingError::PaymentsClosed(_)))
            ));
            assert!(matches!(
                service
                    .record_payment(&student, booking.id, payment(100.0))
                    .await,
                Err(Error::BookingError(BookingError::NotFound(_)))
            ));

            Ok(())
        }
    }

    mod send_message {
        use entity::sea_orm_active_enums::BookingStatus;
        use habs_test_utils::prelude::*;

        use crate::{
            model::booking::BookingMessageDto,
            server::service::{
                booking::BookingService,
                notification::{NotificationHub, Room, BOOKING_MESSAGE},
            },
        };

        /// Expect the owner to be notified of a student's message and the thread to grow
        #[tokio::test]
        async fn delivers_to_other_party() -> Result<(), TestError> {
            let test = TestBuilder::new().with_booking_tables().build().await?;
            let owner = test.user().insert_owner("owner@example.com").await?;
            let student = test.user().insert_student("student@example.com").await?;
            let (hostel, room_type) = test.hostel().insert_approved_hostel(owner.id).await?;
            let booking = test
                .booking()
                .insert_booking(student.id, &hostel, &room_type, 1, BookingStatus::Pending)
                .await?;

            let hub = NotificationHub::new();
            let mut owner_rx = hub.subscribe(Room::Owner(owner.id)).await;

            let updated = BookingService::new(&test.db, &hub)
                .send_message(
                    &student,
                    booking.id,
                    BookingMessageDto {
                        subject: None,
                        message: "Is parking available?".to_string(),
                    },
                )
                .await
                .unwrap();

            assert_eq!(updated.communications.len(), 1);
            assert_eq!(updated.communications[0].to_user_id, owner.id);

            let notification = owner_rx.try_recv().unwrap();
            assert_eq!(notification.event, BOOKING_MESSAGE);

            Ok(())
        }
    }

    mod get {
        use entity::sea_orm_active_enums::BookingStatus;
        use habs_test_utils::prelude::*;

        use crate::server::{
            error::{booking::BookingError, Error},
            service::{booking::BookingService, notification::NotificationHub},
        };

        /// Expect participants and admins to see the booking and others to get NotFound
        #[tokio::test]
        async fn visible_to_participants() -> Result<(), TestError> {
            let test = TestBuilder::new().with_booking_tables().build().await?;
            let owner = test.user().insert_owner("owner@example.com").await?;
            let student = test.user().insert_student("student@example.com").await?;
            let stranger = test.user().insert_owner("stranger@example.com").await?;
            let admin = test.user().insert_admin("admin@example.com").await?;
            let (hostel, room_type) = test.hostel().insert_approved_hostel(owner.id).await?;
            let booking = test
                .booking()
                .insert_booking(student.id, &hostel, &room_type, 1, BookingStatus::Pending)
                .await?;

            let hub = NotificationHub::new();
            let service = BookingService::new(&test.db, &hub);

            let detail = service.get(&student, booking.id).await.unwrap();
            assert_eq!(detail.hostel_name, hostel.name);
            assert_eq!(detail.student_name, student.name);
            assert_eq!(detail.status_history.len(), 1);

            assert!(service.get(&owner, booking.id).await.is_ok());
            assert!(service.get(&admin, booking.id).await.is_ok());
            assert!(matches!(
                service.get(&stranger, booking.id).await,
                Err(Error::BookingError(BookingError::NotFound(_)))
            ));

            Ok(())
        }
    }

    mod list_mine {
        use entity::sea_orm_active_enums::BookingStatus;
        use habs_test_utils::prelude::*;

        use crate::{
            model::booking::BookingQuery,
            server::{
                error::{auth::AuthError, Error},
                service::{booking::BookingService, notification::NotificationHub},
            },
        };

        /// Expect owners to see bookings on their hostels and admins to be refused
        #[tokio::test]
        async fn scopes_by_role() -> Result<(), TestError> {
            let test = TestBuilder::new().with_booking_tables().build().await?;
            let owner = test.user().insert_owner("owner@example.com").await?;
            let student = test.user().insert_student("student@example.com").await?;
            let admin = test.user().insert_admin("admin@example.com").await?;
            let (hostel, room_type) = test.hostel().insert_approved_hostel(owner.id).await?;
            for status in [BookingStatus::Pending, BookingStatus::Approved] {
                test.booking()
                    .insert_booking(student.id, &hostel, &room_type, 1, status)
                    .await?;
            }

            let hub = NotificationHub::new();
            let service = BookingService::new(&test.db, &hub);

            let owned = service
                .list_mine(&owner, BookingQuery::default())
                .await
                .unwrap();
            assert_eq!(owned.pagination.total_items, 2);
            assert_eq!(owned.pagination.items_per_page, 10);

            let pending = service
                .list_mine(
                    &student,
                    BookingQuery {
                        status: Some(BookingStatus::Pending),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();
            assert_eq!(pending.bookings.len(), 1);

            assert!(matches!(
                service.list_mine(&admin, BookingQuery::default()).await,
                Err(Error::AuthError(AuthError::Forbidden { .. }))
            ));

            Ok(())
        }
    }

    mod expire_pending {
        use chrono::{Duration, Utc};
        use entity::sea_orm_active_enums::BookingStatus;
        use habs_test_utils::prelude::*;

        use crate::server::{
            data::booking::BookingRepository,
            service::{booking::BookingService, notification::NotificationHub},
        };

        /// Expect only pending requests past their deadline to be cancelled
        #[tokio::test]
        async fn cancels_overdue_requests() -> Result<(), TestError> {
            let test = TestBuilder::new().with_booking_tables().build().await?;
            let owner = test.user().insert_owner("owner@example.com").await?;
            let student = test.user().insert_student("student@example.com").await?;
            let (hostel, room_type) = test.hostel().insert_approved_hostel(owner.id).await?;
            let pending = test
                .booking()
                .insert_booking(student.id, &hostel, &room_type, 1, BookingStatus::Pending)
                .await?;
            let approved = test
                .booking()
                .insert_booking(student.id, &hostel, &room_type, 1, BookingStatus::Approved)
                .await?;

            let hub = NotificationHub::new();
            let service = BookingService::new(&test.db, &hub);

            let now = Utc::now().naive_utc();
            assert_eq!(service.expire_pending(now).await.unwrap(), 0);
            assert_eq!(
                service
                    .expire_pending(now + Duration::hours(25))
                    .await
                    .unwrap(),
                1
            );

            let repo = BookingRepository::new(&test.db);
            let pending = repo.get(pending.id).await?.unwrap();
            let approved = repo.get(approved.id).await?.unwrap();
            assert_eq!(pending.status, BookingStatus::Cancelled);
            assert_eq!(approved.status, BookingStatus::Approved);

            Ok(())
        }
    }
}
