use axum::http::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};

use crate::server::{
    config::Config,
    error::{config::ConfigError, Error},
    model::auth::JwtKeys,
    service::{auth::AuthService, map::client::MapClient},
};

/// Build the map provider client from the configured base URL and credentials
pub fn build_map_client(config: &Config) -> Result<MapClient, Error> {
    let map_client = MapClient::new(
        &config.map_api_url,
        config.map_client_id.clone(),
        config.map_client_secret.clone(),
    )?;

    if !map_client.is_configured() {
        tracing::warn!("Map credentials not set, distances will use straight-line estimates");
    }

    Ok(map_client)
}

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Create the configured administrator account when both credentials are set
pub async fn bootstrap_admin(
    db: &DatabaseConnection,
    jwt: &JwtKeys,
    config: &Config,
) -> Result<(), Error> {
    let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) else {
        return Ok(());
    };

    AuthService::new(db, jwt)
        .bootstrap_admin(&email.to_lowercase(), password)
        .await
}

/// CORS policy restricted to the client origin when one is configured
pub fn cors_layer(config: &Config) -> Result<CorsLayer, Error> {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    let Some(client_url) = &config.client_url else {
        return Ok(cors.allow_origin(Any));
    };

    let origin = HeaderValue::from_str(client_url.trim_end_matches('/'))
        .map_err(|e| ConfigError::invalid("CLIENT_URL", e))?;

    Ok(cors.allow_origin(origin))
}

/// Resolves once the process receives Ctrl+C
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }

    tracing::info!("Shutting down");
}
