//! Factory functions for in-memory user models.

use chrono::Utc;
use entity::sea_orm_active_enums::UserRole;

/// Create an account model without touching the database, suitable for unit tests.
pub fn mock_user_model(id: i32, role: UserRole) -> entity::habs_user::Model {
    let now = Utc::now().naive_utc();

    entity::habs_user::Model {
        id,
        name: "Test User".to_string(),
        email: format!("user{}@example.com", id),
        password_hash: String::new(),
        phone: None,
        profile_image: None,
        role,
        is_verified: false,
        is_suspended: false,
        suspension_reason: None,
        suspended_at: None,
        suspended_by: None,
        last_login: None,
        login_count: 0,
        student_profile: None,
        owner_profile: None,
        created_at: now,
        updated_at: now,
    }
}
