//! HTTP controller endpoints for the HABS web API.
//!
//! Axum handlers for accounts, the institution catalog, hostel listings, bookings,
//! administration, map lookups, the booking ledger, and the notification socket. Handlers
//! authenticate through the [`AuthUser`](crate::server::model::auth::AuthUser) extractor,
//! validate bodies with [`ValidJson`](util::json::ValidJson), delegate to a service, and are
//! documented for the OpenAPI document with utoipa.

pub mod admin;
pub mod auth;
pub mod booking;
pub mod health;
pub mod hostel;
pub mod institution;
pub mod ledger;
pub mod map;
pub mod notification;
pub mod util;
