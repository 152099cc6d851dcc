use chrono::Utc;
use entity::{
    sea_orm_active_enums::UserRole,
    types::{OwnerProfile, StudentProfile},
};
use migration::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    ExprTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::data::{contains_ignore_case, page_index};

/// Fields of a new account; the password must already be hashed.
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub role: UserRole,
}

/// Profile fields a user may change about themselves. `None` leaves a field untouched.
#[derive(Default)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub profile_image: Option<String>,
    pub student_profile: Option<StudentProfile>,
    pub owner_profile: Option<OwnerProfile>,
}

pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new instance of [`UserRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates an account with the empty profile matching its role
    pub async fn create(&self, user: NewUser) -> Result<entity::habs_user::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let (student_profile, owner_profile) = match user.role {
            UserRole::Student => (Some(StudentProfile::default()), None),
            UserRole::HostelOwner => (None, Some(OwnerProfile::default())),
            UserRole::Admin => (None, None),
        };

        entity::habs_user::ActiveModel {
            name: ActiveValue::Set(user.name),
            email: ActiveValue::Set(user.email.to_lowercase()),
            password_hash: ActiveValue::Set(user.password_hash),
            phone: ActiveValue::Set(user.phone),
            profile_image: ActiveValue::Set(None),
            role: ActiveValue::Set(user.role),
            is_verified: ActiveValue::Set(user.role == UserRole::Admin),
            is_suspended: ActiveValue::Set(false),
            suspension_reason: ActiveValue::Set(None),
            suspended_at: ActiveValue::Set(None),
            suspended_by: ActiveValue::Set(None),
            last_login: ActiveValue::Set(None),
            login_count: ActiveValue::Set(0),
            student_profile: ActiveValue::Set(student_profile),
            owner_profile: ActiveValue::Set(owner_profile),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn get(&self, user_id: i32) -> Result<Option<entity::habs_user::Model>, DbErr> {
        entity::prelude::HabsUser::find_by_id(user_id)
            .one(self.db)
            .await
    }

    /// Looks up an account by email, ignoring case
    pub async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<entity::habs_user::Model>, DbErr> {
        entity::prelude::HabsUser::find()
            .filter(entity::habs_user::Column::Email.eq(email.trim().to_lowercase()))
            .one(self.db)
            .await
    }

    pub async fn get_many(&self, user_ids: Vec<i32>) -> Result<Vec<entity::habs_user::Model>, DbErr> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::HabsUser::find()
            .filter(entity::habs_user::Column::Id.is_in(user_ids))
            .all(self.db)
            .await
    }

    /// Applies profile changes, returning `None` when the user does not exist
    pub async fn update_profile(
        &self,
        user_id: i32,
        changes: ProfileChanges,
    ) -> Result<Option<entity::habs_user::Model>, DbErr> {
        let Some(user) = self.get(user_id).await? else {
            return Ok(None);
        };

        let mut user_am = user.into_active_model();
        if let Some(name) = changes.name {
            user_am.name = ActiveValue::Set(name);
        }
        if let Some(phone) = changes.phone {
            user_am.phone = ActiveValue::Set(Some(phone));
        }
        if let Some(profile_image) = changes.profile_image {
            user_am.profile_image = ActiveValue::Set(Some(profile_image));
        }
        if let Some(student_profile) = changes.student_profile {
            user_am.student_profile = ActiveValue::Set(Some(student_profile));
        }
        if let Some(owner_profile) = changes.owner_profile {
            user_am.owner_profile = ActiveValue::Set(Some(owner_profile));
        }
        user_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        Ok(Some(user_am.update(self.db).await?))
    }

    pub async fn set_password_hash(&self, user_id: i32, password_hash: String) -> Result<bool, DbErr> {
        let result = entity::prelude::HabsUser::update_many()
            .col_expr(
                entity::habs_user::Column::PasswordHash,
                Expr::value(password_hash),
            )
            .col_expr(
                entity::habs_user::Column::UpdatedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(entity::habs_user::Column::Id.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Stamps the login time and bumps the login counter
    pub async fn record_login(&self, user_id: i32) -> Result<(), DbErr> {
        entity::prelude::HabsUser::update_many()
            .col_expr(
                entity::habs_user::Column::LastLogin,
                Expr::value(Some(Utc::now().naive_utc())),
            )
            .col_expr(
                entity::habs_user::Column::LoginCount,
                Expr::col(entity::habs_user::Column::LoginCount).add(1),
            )
            .filter(entity::habs_user::Column::Id.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Suspends or reactivates an account. Reactivation clears the suspension metadata.
    pub async fn set_suspended(
        &self,
        user_id: i32,
        suspended: bool,
        reason: Option<String>,
        suspended_by: i32,
    ) -> Result<Option<entity::habs_user::Model>, DbErr> {
        let Some(user) = self.get(user_id).await? else {
            return Ok(None);
        };

        let now = Utc::now().naive_utc();
        let mut user_am = user.into_active_model();
        user_am.is_suspended = ActiveValue::Set(suspended);
        if suspended {
            user_am.suspension_reason = ActiveValue::Set(reason);
            user_am.suspended_at = ActiveValue::Set(Some(now));
            user_am.suspended_by = ActiveValue::Set(Some(suspended_by));
        } else {
            user_am.suspension_reason = ActiveValue::Set(None);
            user_am.suspended_at = ActiveValue::Set(None);
            user_am.suspended_by = ActiveValue::Set(None);
        }
        user_am.updated_at = ActiveValue::Set(now);

        Ok(Some(user_am.update(self.db).await?))
    }

    /// Replaces the owner profile of an account
    pub async fn set_owner_profile(
        &self,
        user_id: i32,
        owner_profile: OwnerProfile,
    ) -> Result<Option<entity::habs_user::Model>, DbErr> {
        self.update_profile(
            user_id,
            ProfileChanges {
                owner_profile: Some(owner_profile),
                ..Default::default()
            },
        )
        .await
    }

    /// Pages through accounts filtered by role and a name/email search, newest first
    pub async fn list(
        &self,
        role: Option<UserRole>,
        search: Option<&str>,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<entity::habs_user::Model>, u64), DbErr> {
        let mut query = entity::prelude::HabsUser::find()
            .order_by_desc(entity::habs_user::Column::CreatedAt)
            .order_by_desc(entity::habs_user::Column::Id);

        if let Some(role) = role {
            query = query.filter(entity::habs_user::Column::Role.eq(role));
        }
        if let Some(search) = search.filter(|s| !s.trim().is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(contains_ignore_case(entity::habs_user::Column::Name, search))
                    .add(contains_ignore_case(entity::habs_user::Column::Email, search)),
            );
        }

        let paginator = query.paginate(self.db, limit);
        let total = paginator.num_items().await?;
        let users = paginator.fetch_page(page_index(page)).await?;

        Ok((users, total))
    }

    /// IDs of accounts whose name or email contains `search`
    pub async fn search_ids(&self, search: &str) -> Result<Vec<i32>, DbErr> {
        entity::prelude::HabsUser::find()
            .select_only()
            .column(entity::habs_user::Column::Id)
            .filter(
                Condition::any()
                    .add(contains_ignore_case(entity::habs_user::Column::Name, search))
                    .add(contains_ignore_case(entity::habs_user::Column::Email, search)),
            )
            .into_tuple()
            .all(self.db)
            .await
    }

    pub async fn count(&self, role: Option<UserRole>) -> Result<u64, DbErr> {
        let mut query = entity::prelude::HabsUser::find();
        if let Some(role) = role {
            query = query.filter(entity::habs_user::Column::Role.eq(role));
        }

        query.count(self.db).await
    }

    pub async fn count_suspended(&self) -> Result<u64, DbErr> {
        entity::prelude::HabsUser::find()
            .filter(entity::habs_user::Column::IsSuspended.eq(true))
            .count(self.db)
            .await
    }

    pub async fn recent(&self, limit: u64) -> Result<Vec<entity::habs_user::Model>, DbErr> {
        entity::prelude::HabsUser::find()
            .order_by_desc(entity::habs_user::Column::CreatedAt)
            .order_by_desc(entity::habs_user::Column::Id)
            .limit(limit)
            .all(self.db)
            .await
    }
}
