//! Administration: dashboard statistics, hostel moderation, and account management.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Utc};
use entity::sea_orm_active_enums::{BookingStatus, HostelStatus, UserRole};
use sea_orm::DatabaseConnection;

use crate::{
    model::{
        admin::{BookingStatsDto, DashboardStatsDto, HostelStatsDto, MonthlyStatDto, UserStatsDto},
        api::{PageQuery, PaginationDto},
        booking::{AdminBookingQuery, BookingListDto},
        hostel::{ApproveHostelDto, HostelDto, HostelListDto, RejectHostelDto},
        notification::HostelModerationEvent,
        user::{SuspendUserDto, UserDto, UserListDto, UserQuery},
    },
    server::{
        data::{
            booking::{BookingFilter, BookingRepository, BookingScope, SearchMatches},
            hostel::{room_type::RoomTypeRepository, HostelRepository},
            institution::university::UniversityRepository,
            user::UserRepository,
        },
        error::{hostel::HostelError, Error},
        model::db::UserModel,
        service::{
            hostel::to_dtos,
            notification::{NotificationHub, Room, HOSTEL_APPROVED, HOSTEL_REJECTED},
        },
        util::money::round2,
    },
};

const DEFAULT_PENDING_PAGE_SIZE: u64 = 10;
const DEFAULT_PAGE_SIZE: u64 = 20;
const RECENT_ACTIVITY: u64 = 5;
const MONTHLY_WINDOW: i32 = 6;

/// First day of the month `back` months before the month of `date`
fn month_start(date: NaiveDate, back: i32) -> NaiveDate {
    let index = date.year() * 12 + date.month0() as i32 - back;

    NaiveDate::from_ymd_opt(index.div_euclid(12), index.rem_euclid(12) as u32 + 1, 1)
        .unwrap_or(date)
}

/// Booking counts and completed revenue for each of the last six months, oldest first.
///
/// Months without bookings are included with zero values.
pub fn monthly_stats(
    today: NaiveDate,
    bookings: &[(NaiveDateTime, BookingStatus, f64)],
) -> Vec<MonthlyStatDto> {
    (0..MONTHLY_WINDOW)
        .rev()
        .map(|back| {
            let start = month_start(today, back);
            let in_month = bookings.iter().filter(|(created_at, _, _)| {
                created_at.year() == start.year() && created_at.month() == start.month()
            });

            let mut count = 0;
            let mut revenue = 0.0;
            for (_, status, amount) in in_month {
                count += 1;
                if *status == BookingStatus::Completed {
                    revenue += amount;
                }
            }

            MonthlyStatDto {
                month: start.format("%Y-%m").to_string(),
                bookings: count,
                revenue: round2(revenue),
            }
        })
        .collect()
}

pub struct AdminService<'a> {
    db: &'a DatabaseConnection,
    notifier: &'a NotificationHub,
}

impl<'a> AdminService<'a> {
    /// Creates a new instance of [`AdminService`]
    pub fn new(db: &'a DatabaseConnection, notifier: &'a NotificationHub) -> Self {
        Self { db, notifier }
    }

    pub async fn dashboard(&self) -> Result<DashboardStatsDto, Error> {
        let user_repo = UserRepository::new(self.db);
        let hostel_repo = HostelRepository::new(self.db);
        let booking_repo = BookingRepository::new(self.db);

        let users = UserStatsDto {
            total: user_repo.count(None).await?,
            students: user_repo.count(Some(UserRole::Student)).await?,
            owners: user_repo.count(Some(UserRole::HostelOwner)).await?,
            suspended: user_repo.count_suspended().await?,
        };
        let hostels = HostelStatsDto {
            total: hostel_repo.count(None).await?,
            approved: hostel_repo.count(Some(HostelStatus::Approved)).await?,
            pending: hostel_repo.count(Some(HostelStatus::Pending)).await?,
            rejected: hostel_repo.count(Some(HostelStatus::Rejected)).await?,
        };
        let bookings = BookingStatsDto {
            total: booking_repo.count(&[]).await?,
            pending: booking_repo.count(&[BookingStatus::Pending]).await?,
            active: booking_repo
                .count(&[BookingStatus::Approved, BookingStatus::CheckedIn])
                .await?,
            completed: booking_repo.count(&[BookingStatus::Completed]).await?,
        };

        let today = Utc::now().date_naive();
        let window_start = month_start(today, MONTHLY_WINDOW - 1)
            .and_hms_opt(0, 0, 0)
            .unwrap_or_default();
        let monthly = monthly_stats(today, &booking_repo.created_since(window_start).await?);

        let recent_hostels = to_dtos(self.db, hostel_repo.recent(RECENT_ACTIVITY).await?).await?;

        Ok(DashboardStatsDto {
            users,
            hostels,
            bookings,
            universities: UniversityRepository::new(self.db).count_active().await?,
            revenue: round2(booking_repo.completed_revenue().await?),
            monthly,
            recent_users: user_repo
                .recent(RECENT_ACTIVITY)
                .await?
                .into_iter()
                .map(Into::into)
                .collect(),
            recent_hostels,
            recent_bookings: booking_repo
                .recent(RECENT_ACTIVITY)
                .await?
                .into_iter()
                .map(Into::into)
                .collect(),
        })
    }

    /// Listings awaiting moderation, oldest submission first
    pub async fn pending_hostels(&self, query: PageQuery) -> Result<HostelListDto, Error> {
        let (page, limit) = PageQuery::resolve(query.page, query.limit, DEFAULT_PENDING_PAGE_SIZE);

        let (hostels, total) = HostelRepository::new(self.db)
            .list_by_status(HostelStatus::Pending, page, limit)
            .await?;

        Ok(HostelListDto {
            hostels: to_dtos(self.db, hostels).await?,
            pagination: PaginationDto::new(page, limit, total),
        })
    }

    async fn moderate(
        &self,
        admin: &UserModel,
        hostel_id: i32,
        status: HostelStatus,
        reason: Option<String>,
        notes: Option<String>,
    ) -> Result<HostelDto, Error> {
        let hostel = HostelRepository::new(self.db)
            .set_status(hostel_id, status, admin.id, reason.clone(), notes)
            .await?
            .ok_or(HostelError::NotFound(hostel_id))?;

        tracing::info!(hostel_id, status = ?status, admin_id = admin.id, "Hostel moderated");

        let event = if status == HostelStatus::Approved {
            HOSTEL_APPROVED
        } else {
            HOSTEL_REJECTED
        };
        self.notifier
            .publish(
                Room::Owner(hostel.owner_id),
                event,
                &HostelModerationEvent {
                    hostel_id,
                    hostel_name: hostel.name.clone(),
                    reason,
                },
            )
            .await;

        let room_types = RoomTypeRepository::new(self.db)
            .list_for_hostel(hostel_id)
            .await?;

        Ok(HostelDto::from_parts(hostel, room_types))
    }

    /// Publishes a listing and notifies its owner
    pub async fn approve_hostel(
        &self,
        admin: &UserModel,
        hostel_id: i32,
        request: ApproveHostelDto,
    ) -> Result<HostelDto, Error> {
        self.moderate(admin, hostel_id, HostelStatus::Approved, None, request.notes)
            .await
    }

    pub async fn reject_hostel(
        &self,
        admin: &UserModel,
        hostel_id: i32,
        request: RejectHostelDto,
    ) -> Result<HostelDto, Error> {
        self.moderate(
            admin,
            hostel_id,
            HostelStatus::Rejected,
            Some(request.reason),
            request.notes,
        )
        .await
    }

    pub async fn list_users(&self, query: UserQuery) -> Result<UserListDto, Error> {
        let (page, limit) = PageQuery::resolve(query.page, query.limit, DEFAULT_PAGE_SIZE);

        let (users, total) = UserRepository::new(self.db)
            .list(query.role, query.search.as_deref(), page, limit)
            .await?;

        Ok(UserListDto {
            users: users.into_iter().map(Into::into).collect(),
            pagination: PaginationDto::new(page, limit, total),
        })
    }

    /// Suspends or reactivates an account other than the caller's own
    pub async fn suspend_user(
        &self,
        admin: &UserModel,
        user_id: i32,
        request: SuspendUserDto,
    ) -> Result<UserDto, Error> {
        if user_id == admin.id {
            return Err(Error::BadRequest(
                "You cannot change the suspension of your own account".to_string(),
            ));
        }

        let user = UserRepository::new(self.db)
            .set_suspended(user_id, request.suspended, request.reason, admin.id)
            .await?
            .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

        tracing::info!(user_id, suspended = user.is_suspended, admin_id = admin.id, "User suspension changed");

        Ok(user.into())
    }

    /// Marks a hostel owner's business as verified
    pub async fn approve_owner(&self, admin: &UserModel, user_id: i32) -> Result<UserDto, Error> {
        let user_repo = UserRepository::new(self.db);

        let owner = user_repo
            .get(user_id)
            .await?
            .filter(|u| u.role == UserRole::HostelOwner)
            .ok_or_else(|| Error::NotFound("Hostel owner not found".to_string()))?;

        let mut profile = owner.owner_profile.unwrap_or_default();
        profile.is_approved = true;
        profile.approval_date = Some(Utc::now().naive_utc());

        let owner = user_repo
            .set_owner_profile(user_id, profile)
            .await?
            .ok_or_else(|| Error::NotFound("Hostel owner not found".to_string()))?;

        tracing::info!(user_id, admin_id = admin.id, "Hostel owner approved");

        Ok(owner.into())
    }

    /// Every booking, filtered by status and a student or hostel search
    pub async fn list_bookings(&self, query: AdminBookingQuery) -> Result<BookingListDto, Error> {
        let (page, limit) = PageQuery::resolve(query.page, query.limit, DEFAULT_PAGE_SIZE);

        let matches = match query.search.as_deref().map(str::trim) {
            Some(search) if !search.is_empty() => Some(SearchMatches {
                student_ids: UserRepository::new(self.db).search_ids(search).await?,
                hostel_ids: HostelRepository::new(self.db).search_ids(search).await?,
            }),
            _ => None,
        };

        let (bookings, total) = BookingRepository::new(self.db)
            .list(
                BookingFilter {
                    scope: BookingScope::All,
                    status: query.status,
                    matches,
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
}
