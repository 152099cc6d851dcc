use sea_orm::DatabaseConnection;

use crate::server::{
    model::auth::JwtKeys,
    service::{map::client::MapClient, notification::NotificationHub},
};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt: JwtKeys,
    pub map_client: MapClient,
    pub notifier: NotificationHub,
    /// Whether booking fingerprints may be recorded and verified
    pub ledger_enabled: bool,
}
