//! HTTP routing and OpenAPI documentation configuration.
//!
//! Every API endpoint is registered here together with its utoipa specification. The collected
//! OpenAPI document is served at `/api/docs/openapi.json` with Swagger UI at `/api/docs`.

use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Registers the `bearer` security scheme referenced by protected endpoints
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// Ledger endpoints are only mounted, and only documented, when `ledger_enabled` is set.
///
/// # Example
/// ```ignore
/// let router = routes(config.ledger_enabled).with_state(app_state);
/// ```
pub fn routes(ledger_enabled: bool) -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(
        info(title = "HABS", description = "Hostel availability and booking API"),
        modifiers(&BearerAuth),
        tags(
            (name = controller::auth::AUTH_TAG, description = "Registration, login, and account profile"),
            (name = controller::institution::INSTITUTION_TAG, description = "University, college, and department catalog"),
            (name = controller::hostel::HOSTEL_TAG, description = "Hostel listings and search"),
            (name = controller::booking::BOOKING_TAG, description = "Booking requests and stays"),
            (name = controller::admin::ADMIN_TAG, description = "Moderation and platform administration"),
            (name = controller::map::MAP_TAG, description = "Geocoding, distances, and routes"),
            (name = controller::ledger::LEDGER_TAG, description = "Booking term fingerprints"),
            (name = controller::notification::NOTIFICATION_TAG, description = "Real-time notifications"),
            (name = controller::health::HEALTH_TAG, description = "Liveness"),
        )
    )]
    struct ApiDoc;

    let mut router = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::health::health))
        .routes(routes!(controller::auth::register))
        .routes(routes!(controller::auth::login))
        .routes(routes!(controller::auth::admin_login))
        .routes(routes!(controller::auth::me))
        .routes(routes!(controller::auth::update_profile))
        .routes(routes!(controller::auth::change_password))
        .routes(routes!(controller::auth::logout))
        .routes(routes!(
            controller::institution::list_universities,
            controller::institution::create_university
        ))
        .routes(routes!(controller::institution::university_stats))
        .routes(routes!(
            controller::institution::get_university,
            controller::institution::update_university,
            controller::institution::deactivate_university
        ))
        .routes(routes!(
            controller::institution::list_colleges,
            controller::institution::create_college
        ))
        .routes(routes!(
            controller::institution::list_departments,
            controller::institution::create_department
        ))
        .routes(routes!(controller::institution::get_department))
        .routes(routes!(
            controller::hostel::search,
            controller::hostel::create_hostel
        ))
        .routes(routes!(
            controller::hostel::get_hostel,
            controller::hostel::update_hostel,
            controller::hostel::delete_hostel
        ))
        .routes(routes!(controller::hostel::my_hostels))
        .routes(routes!(controller::booking::create_booking))
        .routes(routes!(controller::booking::my_bookings))
        .routes(routes!(
            controller::booking::get_booking,
            controller::booking::update_booking
        ))
        .routes(routes!(controller::booking::respond))
        .routes(routes!(controller::booking::cancel))
        .routes(routes!(controller::booking::check_in))
        .routes(routes!(controller::booking::check_out))
        .routes(routes!(controller::booking::complete))
        .routes(routes!(controller::booking::review))
        .routes(routes!(controller::booking::record_payment))
        .routes(routes!(controller::booking::send_message))
        .routes(routes!(controller::admin::dashboard))
        .routes(routes!(controller::admin::pending_hostels))
        .routes(routes!(controller::admin::approve_hostel))
        .routes(routes!(controller::admin::reject_hostel))
        .routes(routes!(controller::admin::list_users))
        .routes(routes!(controller::admin::suspend_user))
        .routes(routes!(controller::admin::approve_owner))
        .routes(routes!(controller::admin::list_bookings))
        .routes(routes!(controller::map::geocode))
        .routes(routes!(controller::map::reverse_geocode))
        .routes(routes!(controller::map::distance))
        .routes(routes!(controller::map::route))
        .routes(routes!(controller::map::travel_times))
        .routes(routes!(controller::map::nearby))
        .routes(routes!(controller::map::place_details))
        .routes(routes!(controller::notification::subscribe));

    if ledger_enabled {
        router = router
            .routes(routes!(controller::ledger::record_booking))
            .routes(routes!(controller::ledger::verify_booking))
            .routes(routes!(controller::ledger::lookup_transaction));
    }

    let (routes, api) = router.split_for_parts();

    routes
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
        .layer(TraceLayer::new_for_http())
}
