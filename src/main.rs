use habs::server::{
    config::Config,
    error::Error,
    model::{app::AppState, auth::JwtKeys},
    router,
    scheduler::Scheduler,
    service::notification::NotificationHub,
    startup,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let db = startup::connect_to_database(&config).await?;
    let jwt = JwtKeys::new(&config.jwt_secret);
    let map_client = startup::build_map_client(&config)?;
    let notifier = NotificationHub::new();

    startup::bootstrap_admin(&db, &jwt, &config).await?;

    // Kept alive for the lifetime of the server
    let _scheduler = if config.auto_cancel_sweep {
        Some(
            Scheduler::new(db.clone(), notifier.clone())
                .await?
                .start()
                .await?,
        )
    } else {
        None
    };

    let app = router::routes(config.ledger_enabled)
        .with_state(AppState {
            db,
            jwt,
            map_client,
            notifier,
            ledger_enabled: config.ledger_enabled,
        })
        .layer(startup::cors_layer(&config)?);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;

    tracing::info!("Starting server on {}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(startup::shutdown_signal())
        .await?;

    Ok(())
}
