use chrono::Utc;
use entity::sea_orm_active_enums::UniversityType;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    model::institution::{CreateUniversityDto, UpdateUniversityDto},
    server::data::{contains_ignore_case, page_index},
};

/// Filters for listing universities. Only active universities are listed.
#[derive(Default)]
pub struct UniversityFilter<'f> {
    pub state: Option<&'f str>,
    pub city: Option<&'f str>,
    pub university_type: Option<UniversityType>,
    pub search: Option<&'f str>,
}

pub struct UniversityRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UniversityRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        university: CreateUniversityDto,
    ) -> Result<entity::university::Model, DbErr> {
        let now = Utc::now().naive_utc();

        entity::university::ActiveModel {
            name: ActiveValue::Set(university.name),
            short_name: ActiveValue::Set(university.short_name),
            university_type: ActiveValue::Set(university.university_type),
            established: ActiveValue::Set(university.established),
            address: ActiveValue::Set(university.address),
            city: ActiveValue::Set(university.city),
            state: ActiveValue::Set(university.state),
            pincode: ActiveValue::Set(university.pincode),
            latitude: ActiveValue::Set(university.latitude),
            longitude: ActiveValue::Set(university.longitude),
            website: ActiveValue::Set(university.website),
            description: ActiveValue::Set(university.description),
            student_count: ActiveValue::Set(university.student_count),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn get(&self, id: i32) -> Result<Option<entity::university::Model>, DbErr> {
        entity::prelude::University::find_by_id(id).one(self.db).await
    }

    /// Finds an active university by ID
    pub async fn get_active(&self, id: i32) -> Result<Option<entity::university::Model>, DbErr> {
        entity::prelude::University::find_by_id(id)
            .filter(entity::university::Column::IsActive.eq(true))
            .one(self.db)
            .await
    }

    /// Pages through active universities ordered by name
    pub async fn list(
        &self,
        filter: UniversityFilter<'_>,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<entity::university::Model>, u64), DbErr> {
        let mut query = entity::prelude::University::find()
            .filter(entity::university::Column::IsActive.eq(true))
            .order_by_asc(entity::university::Column::Name);

        if let Some(state) = filter.state.filter(|s| !s.trim().is_empty()) {
            query = query.filter(contains_ignore_case(entity::university::Column::State, state));
        }
        if let Some(city) = filter.city.filter(|s| !s.trim().is_empty()) {
            query = query.filter(contains_ignore_case(entity::university::Column::City, city));
        }
        if let Some(university_type) = filter.university_type {
            query = query.filter(entity::university::Column::UniversityType.eq(university_type));
        }
        if let Some(search) = filter.search.filter(|s| !s.trim().is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(contains_ignore_case(entity::university::Column::Name, search))
                    .add(contains_ignore_case(
                        entity::university::Column::ShortName,
                        search,
                    )),
            );
        }

        let paginator = query.paginate(self.db, limit);
        let total = paginator.num_items().await?;
        let universities = paginator.fetch_page(page_index(page)).await?;

        Ok((universities, total))
    }

    /// Active universities with known coordinates
    pub async fn list_located(&self) -> Result<Vec<entity::university::Model>, DbErr> {
        entity::prelude::University::find()
            .filter(entity::university::Column::IsActive.eq(true))
            .filter(entity::university::Column::Latitude.is_not_null())
            .filter(entity::university::Column::Longitude.is_not_null())
            .all(self.db)
            .await
    }

    /// Applies the provided fields, returning `None` when the university does not exist
    pub async fn update(
        &self,
        id: i32,
        changes: UpdateUniversityDto,
    ) -> Result<Option<entity::university::Model>, DbErr> {
        let Some(university) = self.get(id).await? else {
            return Ok(None);
        };

        let mut university_am = university.into_active_model();
        if let Some(name) = changes.name {
            university_am.name = ActiveValue::Set(name);
        }
        if let Some(short_name) = changes.short_name {
            university_am.short_name = ActiveValue::Set(Some(short_name));
        }
        if let Some(university_type) = changes.university_type {
            university_am.university_type = ActiveValue::Set(university_type);
        }
        if let Some(established) = changes.established {
            university_am.established = ActiveValue::Set(Some(established));
        }
        if let Some(address) = changes.address {
            university_am.address = ActiveValue::Set(Some(address));
        }
        if let Some(city) = changes.city {
            university_am.city = ActiveValue::Set(city);
        }
        if let Some(state) = changes.state {
            university_am.state = ActiveValue::Set(state);
        }
        if let Some(pincode) = changes.pincode {
            university_am.pincode = ActiveValue::Set(Some(pincode));
        }
        if let Some(latitude) = changes.latitude {
            university_am.latitude = ActiveValue::Set(Some(latitude));
        }
        if let Some(longitude) = changes.longitude {
            university_am.longitude = ActiveValue::Set(Some(longitude));
        }
        if let Some(website) = changes.website {
            university_am.website = ActiveValue::Set(Some(website));
        }
        if let Some(description) = changes.description {
            university_am.description = ActiveValue::Set(Some(description));
        }
        if let Some(student_count) = changes.student_count {
            university_am.student_count = ActiveValue::Set(student_count);
        }
        if let Some(is_active) = changes.is_active {
            university_am.is_active = ActiveValue::Set(is_active);
        }
        university_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        Ok(Some(university_am.update(self.db).await?))
    }

    /// Type, state, and student count of every active university
    pub async fn census(&self) -> Result<Vec<(UniversityType, String, i32)>, DbErr> {
        entity::prelude::University::find()
            .select_only()
            .column(entity::university::Column::UniversityType)
            .column(entity::university::Column::State)
            .column(entity::university::Column::StudentCount)
            .filter(entity::university::Column::IsActive.eq(true))
            .into_tuple()
            .all(self.db)
            .await
    }

    pub async fn count_active(&self) -> Result<u64, DbErr> {
        entity::prelude::University::find()
            .filter(entity::university::Column::IsActive.eq(true))
            .count(self.db)
            .await
    }
}
