//! Hostel listing repositories.

pub mod room_type;

use chrono::{NaiveDateTime, Utc};
use entity::{
    sea_orm_active_enums::{HostelStatus, HostelType},
    types::{HostelImages, NearbyInstitutions, RatingBreakdown, StringList},
};
use migration::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, DeleteResult,
    EntityTrait, ExprTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    model::hostel::{CreateHostelDto, UpdateHostelDto},
    server::data::{contains_ignore_case, page_index},
};

/// Coordinates of a hostel together with the institutions cached as nearby.
#[derive(Debug, Clone, Default)]
pub struct ResolvedLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub place_id: Option<String>,
    pub nearby_universities: NearbyInstitutions,
    pub nearby_departments: NearbyInstitutions,
}

/// Filters applied in SQL when searching approved hostels.
#[derive(Default)]
pub struct HostelFilter<'f> {
    /// Matched against name, description, and address
    pub search: Option<&'f str>,
    pub hostel_type: Option<HostelType>,
    pub city: Option<&'f str>,
    pub state: Option<&'f str>,
}

/// Review aggregate written back to a hostel after a review is submitted.
pub struct RatingSummary {
    pub average: f64,
    pub total_reviews: i32,
    pub breakdown: RatingBreakdown,
}

pub struct HostelRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> HostelRepository<'a, C> {
    /// Creates a new instance of [`HostelRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new listing in `pending` status
    pub async fn create(
        &self,
        owner_id: i32,
        hostel: CreateHostelDto,
        location: ResolvedLocation,
    ) -> Result<entity::hostel::Model, DbErr> {
        let now = Utc::now().naive_utc();

        entity::hostel::ActiveModel {
            owner_id: ActiveValue::Set(owner_id),
            name: ActiveValue::Set(hostel.name),
            hostel_type: ActiveValue::Set(hostel.hostel_type),
            description: ActiveValue::Set(hostel.description),
            address: ActiveValue::Set(hostel.location.address),
            landmark: ActiveValue::Set(hostel.location.landmark),
            city: ActiveValue::Set(hostel.location.city),
            state: ActiveValue::Set(hostel.location.state),
            pincode: ActiveValue::Set(hostel.location.pincode),
            country: ActiveValue::Set(
                hostel
                    .location
                    .country
                    .unwrap_or_else(|| "India".to_string()),
            ),
            latitude: ActiveValue::Set(location.latitude),
            longitude: ActiveValue::Set(location.longitude),
            place_id: ActiveValue::Set(location.place_id),
            nearby_universities: ActiveValue::Set(location.nearby_universities),
            nearby_departments: ActiveValue::Set(location.nearby_departments),
            contact: ActiveValue::Set(hostel.contact),
            facilities: ActiveValue::Set(StringList(hostel.facilities)),
            images: ActiveValue::Set(HostelImages(hostel.images)),
            mess: ActiveValue::Set(hostel.mess),
            rules: ActiveValue::Set(hostel.rules),
            status: ActiveValue::Set(HostelStatus::Pending),
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
            last_updated_by: ActiveValue::Set(Some(owner_id)),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn get(&self, hostel_id: i32) -> Result<Option<entity::hostel::Model>, DbErr> {
        entity::prelude::Hostel::find_by_id(hostel_id)
            .one(self.db)
            .await
    }

    /// Finds a hostel only if it belongs to `owner_id`
    pub async fn get_owned(
        &self,
        hostel_id: i32,
        owner_id: i32,
    ) -> Result<Option<entity::hostel::Model>, DbErr> {
        entity::prelude::Hostel::find_by_id(hostel_id)
            .filter(entity::hostel::Column::OwnerId.eq(owner_id))
            .one(self.db)
            .await
    }

    /// Finds a hostel only if it is approved and therefore publicly visible
    pub async fn get_approved(
        &self,
        hostel_id: i32,
    ) -> Result<Option<entity::hostel::Model>, DbErr> {
        entity::prelude::Hostel::find_by_id(hostel_id)
            .filter(entity::hostel::Column::Status.eq(HostelStatus::Approved))
            .one(self.db)
            .await
    }

    pub async fn get_many(&self, hostel_ids: Vec<i32>) -> Result<Vec<entity::hostel::Model>, DbErr> {
        if hostel_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Hostel::find()
            .filter(entity::hostel::Column::Id.is_in(hostel_ids))
            .all(self.db)
            .await
    }

    /// Applies owner edits; `location` replaces coordinates and cached nearby institutions
    pub async fn update(
        &self,
        hostel: entity::hostel::Model,
        changes: UpdateHostelDto,
        location: Option<ResolvedLocation>,
        updated_by: i32,
    ) -> Result<entity::hostel::Model, DbErr> {
        let mut hostel_am = hostel.into_active_model();

        if let Some(name) = changes.name {
            hostel_am.name = ActiveValue::Set(name);
        }
        if let Some(hostel_type) = changes.hostel_type {
            hostel_am.hostel_type = ActiveValue::Set(hostel_type);
        }
        if let Some(description) = changes.description {
            hostel_am.description = ActiveValue::Set(description);
        }
        if let Some(address) = changes.location {
            hostel_am.address = ActiveValue::Set(address.address);
            hostel_am.landmark = ActiveValue::Set(address.landmark);
            hostel_am.city = ActiveValue::Set(address.city);
            hostel_am.state = ActiveValue::Set(address.state);
            hostel_am.pincode = ActiveValue::Set(address.pincode);
            if let Some(country) = address.country {
                hostel_am.country = ActiveValue::Set(country);
            }
        }
        if let Some(location) = location {
            hostel_am.latitude = ActiveValue::Set(location.latitude);
            hostel_am.longitude = ActiveValue::Set(location.longitude);
            hostel_am.place_id = ActiveValue::Set(location.place_id);
            hostel_am.nearby_universities = ActiveValue::Set(location.nearby_universities);
            hostel_am.nearby_departments = ActiveValue::Set(location.nearby_departments);
        }
        if let Some(contact) = changes.contact {
            hostel_am.contact = ActiveValue::Set(contact);
        }
        if let Some(facilities) = changes.facilities {
            hostel_am.facilities = ActiveValue::Set(StringList(facilities));
        }
        if let Some(images) = changes.images {
            hostel_am.images = ActiveValue::Set(HostelImages(images));
        }
        if let Some(mess) = changes.mess {
            hostel_am.mess = ActiveValue::Set(mess);
        }
        if let Some(rules) = changes.rules {
            hostel_am.rules = ActiveValue::Set(rules);
        }
        hostel_am.last_updated_by = ActiveValue::Set(Some(updated_by));
        hostel_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        hostel_am.update(self.db).await
    }

    /// Deletes a hostel along with its room types
    pub async fn delete(&self, hostel_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::HostelRoomType::delete_many()
            .filter(entity::hostel_room_type::Column::HostelId.eq(hostel_id))
            .exec(self.db)
            .await?;

        entity::prelude::Hostel::delete_by_id(hostel_id)
            .exec(self.db)
            .await
    }

    /// All approved hostels matching the SQL-expressible part of a search, newest first
    pub async fn find_approved(
        &self,
        filter: HostelFilter<'_>,
    ) -> Result<Vec<entity::hostel::Model>, DbErr> {
        let mut query = entity::prelude::Hostel::find()
            .filter(entity::hostel::Column::Status.eq(HostelStatus::Approved))
            .order_by_desc(entity::hostel::Column::CreatedAt)
            .order_by_desc(entity::hostel::Column::Id);

        if let Some(search) = filter.search.filter(|s| !s.trim().is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(contains_ignore_case(entity::hostel::Column::Name, search))
                    .add(contains_ignore_case(
                        entity::hostel::Column::Description,
                        search,
                    ))
                    .add(contains_ignore_case(entity::hostel::Column::Address, search)),
            );
        }
        if let Some(hostel_type) = filter.hostel_type {
            query = query.filter(entity::hostel::Column::HostelType.eq(hostel_type));
        }
        if let Some(city) = filter.city.filter(|s| !s.trim().is_empty()) {
            query = query.filter(contains_ignore_case(entity::hostel::Column::City, city));
        }
        if let Some(state) = filter.state.filter(|s| !s.trim().is_empty()) {
            query = query.filter(contains_ignore_case(entity::hostel::Column::State, state));
        }

        query.all(self.db).await
    }

    /// Approved hostels of the same type and city, best rated first
    pub async fn find_similar(
        &self,
        hostel: &entity::hostel::Model,
        limit: u64,
    ) -> Result<Vec<entity::hostel::Model>, DbErr> {
        entity::prelude::Hostel::find()
            .filter(entity::hostel::Column::Id.ne(hostel.id))
            .filter(entity::hostel::Column::Status.eq(HostelStatus::Approved))
            .filter(entity::hostel::Column::HostelType.eq(hostel.hostel_type))
            .filter(entity::hostel::Column::City.eq(hostel.city.clone()))
            .order_by_desc(entity::hostel::Column::RatingAverage)
            .order_by_desc(entity::hostel::Column::Id)
            .limit(limit)
            .all(self.db)
            .await
    }

    /// Pages through hostels of an owner, newest first
    pub async fn list_by_owner(
        &self,
        owner_id: i32,
        status: Option<HostelStatus>,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<entity::hostel::Model>, u64), DbErr> {
        let mut query = entity::prelude::Hostel::find()
            .filter(entity::hostel::Column::OwnerId.eq(owner_id))
            .order_by_desc(entity::hostel::Column::CreatedAt)
            .order_by_desc(entity::hostel::Column::Id);

        if let Some(status) = status {
            query = query.filter(entity::hostel::Column::Status.eq(status));
        }

        let paginator = query.paginate(self.db, limit);
        let total = paginator.num_items().await?;
        let hostels = paginator.fetch_page(page_index(page)).await?;

        Ok((hostels, total))
    }

    /// Pages through hostels in `status`, oldest first so moderators see the queue in order
    pub async fn list_by_status(
        &self,
        status: HostelStatus,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<entity::hostel::Model>, u64), DbErr> {
        let paginator = entity::prelude::Hostel::find()
            .filter(entity::hostel::Column::Status.eq(status))
            .order_by_asc(entity::hostel::Column::CreatedAt)
            .order_by_asc(entity::hostel::Column::Id)
            .paginate(self.db, limit);

        let total = paginator.num_items().await?;
        let hostels = paginator.fetch_page(page_index(page)).await?;

        Ok((hostels, total))
    }

    /// IDs of hostels whose name contains `search`
    pub async fn search_ids(&self, search: &str) -> Result<Vec<i32>, DbErr> {
        entity::prelude::Hostel::find()
            .select_only()
            .column(entity::hostel::Column::Id)
            .filter(contains_ignore_case(entity::hostel::Column::Name, search))
            .into_tuple()
            .all(self.db)
            .await
    }

    /// Records a moderation decision.
    ///
    /// Returns `None` when the hostel does not exist.
    pub async fn set_status(
        &self,
        hostel_id: i32,
        status: HostelStatus,
        moderator_id: i32,
        rejection_reason: Option<String>,
        notes: Option<String>,
    ) -> Result<Option<entity::hostel::Model>, DbErr> {
        let Some(hostel) = self.get(hostel_id).await? else {
            return Ok(None);
        };

        let now = Utc::now().naive_utc();
        let mut hostel_am = hostel.into_active_model();
        hostel_am.status = ActiveValue::Set(status);
        hostel_am.approved_by = ActiveValue::Set(Some(moderator_id));
        hostel_am.approval_date = ActiveValue::Set(Some(now));
        hostel_am.rejection_reason = ActiveValue::Set(rejection_reason);
        if notes.is_some() {
            hostel_am.admin_notes = ActiveValue::Set(notes);
        }
        hostel_am.last_updated_by = ActiveValue::Set(Some(moderator_id));
        hostel_am.updated_at = ActiveValue::Set(now);

        Ok(Some(hostel_am.update(self.db).await?))
    }

    pub async fn update_rating(&self, hostel_id: i32, rating: RatingSummary) -> Result<(), DbErr> {
        entity::prelude::Hostel::update_many()
            .col_expr(
                entity::hostel::Column::RatingAverage,
                Expr::value(rating.average),
            )
            .col_expr(
                entity::hostel::Column::RatingTotalReviews,
                Expr::value(rating.total_reviews),
            )
            .col_expr(
                entity::hostel::Column::RatingBreakdown,
                Expr::value(rating.breakdown),
            )
            .filter(entity::hostel::Column::Id.eq(hostel_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn increment_views(&self, hostel_ids: Vec<i32>) -> Result<(), DbErr> {
        self.increment(hostel_ids, entity::hostel::Column::Views)
            .await
    }

    pub async fn increment_booking_requests(&self, hostel_id: i32) -> Result<(), DbErr> {
        self.increment(vec![hostel_id], entity::hostel::Column::BookingRequests)
            .await
    }

    pub async fn increment_successful_bookings(&self, hostel_id: i32) -> Result<(), DbErr> {
        self.increment(vec![hostel_id], entity::hostel::Column::SuccessfulBookings)
            .await
    }

    async fn increment(
        &self,
        hostel_ids: Vec<i32>,
        column: entity::hostel::Column,
    ) -> Result<(), DbErr> {
        if hostel_ids.is_empty() {
            return Ok(());
        }

        entity::prelude::Hostel::update_many()
            .col_expr(column, Expr::col(column).add(1))
            .filter(entity::hostel::Column::Id.is_in(hostel_ids))
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn count(&self, status: Option<HostelStatus>) -> Result<u64, DbErr> {
        let mut query = entity::prelude::Hostel::find();
        if let Some(status) = status {
            query = query.filter(entity::hostel::Column::Status.eq(status));
        }

        query.count(self.db).await
    }

    pub async fn recent(&self, limit: u64) -> Result<Vec<entity::hostel::Model>, DbErr> {
        entity::prelude::Hostel::find()
            .order_by_desc(entity::hostel::Column::CreatedAt)
            .order_by_desc(entity::hostel::Column::Id)
            .limit(limit)
            .all(self.db)
            .await
    }

    /// Creation timestamps of hostels created at or after `since`
    pub async fn created_since(&self, since: NaiveDateTime) -> Result<Vec<NaiveDateTime>, DbErr> {
        entity::prelude::Hostel::find()
            .select_only()
            .column(entity::hostel::Column::CreatedAt)
            .filter(entity::hostel::Column::CreatedAt.gte(since))
            .into_tuple()
            .all(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    mod find_approved {
        use entity::sea_orm_active_enums::{HostelStatus, HostelType};
        use habs_test_utils::prelude::*;

        use crate::server::data::hostel::{HostelFilter, HostelRepository};

        /// Expect pending, rejected, and suspended hostels to be excluded from search
        #[tokio::test]
        async fn returns_only_approved() -> Result<(), TestError> {
            let test = TestBuilder::new().with_hostel_tables().build().await?;
            let owner = test.user().insert_owner("owner@example.com").await?;
            let approved = test
                .hostel()
                .insert_hostel(owner.id, "Approved Hostel", HostelStatus::Approved)
                .await?;
            for status in [
                HostelStatus::Pending,
                HostelStatus::Rejected,
                HostelStatus::Suspended,
            ] {
                test.hostel()
                    .insert_hostel(owner.id, "Hidden Hostel", status)
                    .await?;
            }

            let repo = HostelRepository::new(&test.db);
            let hostels = repo.find_approved(HostelFilter::default()).await?;

            assert_eq!(hostels.len(), 1);
            assert_eq!(hostels[0].id, approved.id);

            Ok(())
        }

        /// Expect free text to match case-insensitively and the type filter to apply
        #[tokio::test]
        async fn applies_text_and_type_filters() -> Result<(), TestError> {
            let test = TestBuilder::new().with_hostel_tables().build().await?;
            let owner = test.user().insert_owner("owner@example.com").await?;
            test.hostel()
                .insert_hostel(owner.id, "Sunrise Residency", HostelStatus::Approved)
                .await?;
            test.hostel()
                .insert_hostel(owner.id, "Moonlight Stay", HostelStatus::Approved)
                .await?;

            let repo = HostelRepository::new(&test.db);
            let by_text = repo
                .find_approved(HostelFilter {
                    search: Some("SUNRISE"),
                    ..Default::default()
                })
                .await?;
            let by_type = repo
                .find_approved(HostelFilter {
                    hostel_type: Some(HostelType::Girls),
                    ..Default::default()
                })
                .await?;

            assert_eq!(by_text.len(), 1);
            assert_eq!(by_text[0].name, "Sunrise Residency");
            assert!(by_type.is_empty());

            Ok(())
        }

        /// Expect Error when required database tables are not present
        #[tokio::test]
        async fn fails_when_tables_missing() -> Result<(), TestError> {
            let test = TestBuilder::new().build().await?;

            let repo = HostelRepository::new(&test.db);
            let result = repo.find_approved(HostelFilter::default()).await;

            assert!(result.is_err());

            Ok(())
        }
    }

    mod get_owned {
        use habs_test_utils::prelude::*;

        use crate::server::data::hostel::HostelRepository;

        /// Expect another owner's hostel to be invisible
        #[tokio::test]
        async fn hides_other_owners_hostel() -> Result<(), TestError> {
            let test = TestBuilder::new().with_hostel_tables().build().await?;
            let owner = test.user().insert_owner("owner@example.com").await?;
            let other = test.user().insert_owner("other@example.com").await?;
            let (hostel, _) = test.hostel().insert_approved_hostel(owner.id).await?;

            let repo = HostelRepository::new(&test.db);

            assert!(repo.get_owned(hostel.id, owner.id).await?.is_some());
            assert!(repo.get_owned(hostel.id, other.id).await?.is_none());

            Ok(())
        }
    }

    mod counters {
        use habs_test_utils::prelude::*;

        use crate::server::data::hostel::HostelRepository;

        /// Expect each counter to be incremented independently
        #[tokio::test]
        async fn increments_counters() -> Result<(), TestError> {
            let test = TestBuilder::new().with_hostel_tables().build().await?;
            let owner = test.user().insert_owner("owner@example.com").await?;
            let (hostel, _) = test.hostel().insert_approved_hostel(owner.id).await?;

            let repo = HostelRepository::new(&test.db);
            repo.increment_views(vec![hostel.id]).await?;
            repo.increment_views(vec![hostel.id]).await?;
            repo.increment_booking_requests(hostel.id).await?;

            let updated = repo.get(hostel.id).await?.unwrap();
            assert_eq!(updated.views, 2);
            assert_eq!(updated.booking_requests, 1);
            assert_eq!(updated.successful_bookings, 0);

            Ok(())
        }
    }

    mod delete {
        use habs_test_utils::prelude::*;
        use sea_orm::EntityTrait;

        use crate::server::data::hostel::HostelRepository;

        /// Expect room types to be removed together with the hostel
        #[tokio::test]
        async fn deletes_room_types() -> Result<(), TestError> {
            let test = TestBuilder::new().with_hostel_tables().build().await?;
            let owner = test.user().insert_owner("owner@example.com").await?;
            let (hostel, room_type) = test.hostel().insert_approved_hostel(owner.id).await?;

            let repo = HostelRepository::new(&test.db);
            let result = repo.delete(hostel.id).await?;

            assert_eq!(result.rows_affected, 1);
            let room_type = entity::prelude::HostelRoomType::find_by_id(room_type.id)
                .one(&test.db)
                .await?;
            assert!(room_type.is_none());

            Ok(())
        }
    }
}
