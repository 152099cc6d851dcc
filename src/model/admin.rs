use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{booking::BookingDto, hostel::HostelDto, user::UserDto};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserStatsDto {
    pub total: u64,
    pub students: u64,
    pub owners: u64,
    pub suspended: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HostelStatsDto {
    pub total: u64,
    pub approved: u64,
    pub pending: u64,
    pub rejected: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookingStatsDto {
    pub total: u64,
    pub pending: u64,
    /// Approved or checked in
    pub active: u64,
    pub completed: u64,
}

/// Bookings created and revenue settled in one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MonthlyStatDto {
    /// `YYYY-MM`
    pub month: String,
    pub bookings: u64,
    pub revenue: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsDto {
    pub users: UserStatsDto,
    pub hostels: HostelStatsDto,
    pub bookings: BookingStatsDto,
    pub universities: u64,
    /// Sum of final amounts of completed bookings
    pub revenue: f64,
    pub monthly: Vec<MonthlyStatDto>,
    pub recent_users: Vec<UserDto>,
    pub recent_hostels: Vec<HostelDto>,
    pub recent_bookings: Vec<BookingDto>,
}
