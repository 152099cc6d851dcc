//! Hostel listing and room type fixtures.

use chrono::Utc;
use entity::{
    sea_orm_active_enums::{HostelStatus, HostelType, RoomType},
    types::{
        HostelContact, HostelImages, HostelRules, MessDetails, MessType, NearbyInstitutions,
        RatingBreakdown, StringList,
    },
};
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestContext};

/// Coordinates every fixture hostel is placed at (central Delhi)
pub const HOSTEL_LATITUDE: f64 = 28.6139;
pub const HOSTEL_LONGITUDE: f64 = 77.2090;

impl TestContext {
    pub fn hostel(&self) -> HostelFixtures<'_> {
        HostelFixtures { context: self }
    }
}

pub struct HostelFixtures<'a> {
    context: &'a TestContext,
}

impl<'a> HostelFixtures<'a> {
    /// Insert a co-ed hostel in Delhi offering wifi and laundry with an optional veg mess.
    pub async fn insert_hostel(
        &self,
        owner_id: i32,
        name: &str,
        status: HostelStatus,
    ) -> Result<entity::hostel::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::Hostel::insert(entity::hostel::ActiveModel {
                owner_id: ActiveValue::Set(owner_id),
                name: ActiveValue::Set(name.to_string()),
                hostel_type: ActiveValue::Set(HostelType::Coed),
                description: ActiveValue::Set("A comfortable hostel for students".to_string()),
                address: ActiveValue::Set("1 University Road".to_string()),
                landmark: ActiveValue::Set(None),
                city: ActiveValue::Set("Delhi".to_string()),
                state: ActiveValue::Set("Delhi".to_string()),
                pincode: ActiveValue::Set("110007".to_string()),
                country: ActiveValue::Set("India".to_string()),
                latitude: ActiveValue::Set(HOSTEL_LATITUDE),
                longitude: ActiveValue::Set(HOSTEL_LONGITUDE),
                place_id: ActiveValue::Set(None),
                nearby_universities: ActiveValue::Set(NearbyInstitutions::default()),
                nearby_departments: ActiveValue::Set(NearbyInstitutions::default()),
                contact: ActiveValue::Set(HostelContact::default()),
                facilities: ActiveValue::Set(StringList(vec![
                    "wifi".to_string(),
                    "laundry".to_string(),
                ])),
                images: ActiveValue::Set(HostelImages::default()),
                mess: ActiveValue::Set(MessDetails {
                    available: true,
                    mess_type: Some(MessType::Veg),
                    price_per_month: 3000.0,
                    description: None,
                }),
                rules: ActiveValue::Set(HostelRules::default()),
                status: ActiveValue::Set(status),
                approved_by: ActiveValue::Set(None),
                approval_date: ActiveValue::Set(None),
                rejection_reason: ActiveValue::Set(None),
                admin_notes: ActiveValue::Set(None),
                rating_average: ActiveValue::Set(0.0),
                rating_total_reviews: ActiveValue::Set(0),
                rating_breakdown: ActiveValue::Set(RatingBreakdown::default()),
                views: ActiveValue::Set(0),
                booking_requests: ActiveValue::Set(0),
                successful_bookings: ActiveValue::Set(0),
                is_featured: ActiveValue::Set(false),
                priority: ActiveValue::Set(0),
                last_updated_by: ActiveValue::Set(None),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.context.db)
            .await?,
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert_room_type(
        &self,
        hostel_id: i32,
        room_type: RoomType,
        total_rooms: i32,
        available_rooms: i32,
        beds_per_room: i32,
        price_per_bed: f64,
        security_deposit: f64,
    ) -> Result<entity::hostel_room_type::Model, TestError> {
        Ok(
            entity::prelude::HostelRoomType::insert(entity::hostel_room_type::ActiveModel {
                hostel_id: ActiveValue::Set(hostel_id),
                position: ActiveValue::Set(0),
                room_type: ActiveValue::Set(room_type),
                total_rooms: ActiveValue::Set(total_rooms),
                available_rooms: ActiveValue::Set(available_rooms),
                beds_per_room: ActiveValue::Set(beds_per_room),
                price_per_bed: ActiveValue::Set(price_per_bed),
                security_deposit: ActiveValue::Set(security_deposit),
                amenities: ActiveValue::Set(StringList::default()),
                version: ActiveValue::Set(0),
                ..Default::default()
            })
            .exec_with_returning(&self.context.db)
            .await?,
        )
    }

    /// Insert an approved hostel with a double room tier of 10 rooms, 6000 per bed and a 4000
    /// deposit.
    pub async fn insert_approved_hostel(
        &self,
        owner_id: i32,
    ) -> Result<(entity::hostel::Model, entity::hostel_room_type::Model), TestError> {
        let hostel = self
            .insert_hostel(owner_id, "Test Hostel", HostelStatus::Approved)
            .await?;
        let room_type = self
            .insert_room_type(hostel.id, RoomType::Double, 10, 10, 2, 6000.0, 4000.0)
            .await?;

        Ok((hostel, room_type))
    }
}
