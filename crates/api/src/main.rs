use anyhow::{Context, Result};
use persistence::Database;
use tracing::info;

use mib_platform_api::{app, config, middleware};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = config::Config::load()?;

    middleware::logging::init_logging(&config.logging);
    middleware::init_metrics().context("Failed to install Prometheus recorder")?;

    info!("Starting MIB Platform API v{}", env!("CARGO_PKG_VERSION"));

    let db = Database::connect(&config.database)
        .await
        .context("Failed to connect to database")?;

    if config.database.run_migrations {
        info!("Running database migrations...");
        sqlx::migrate!("../persistence/src/migrations")
            .run(db.pool())
            .await?;
        info!("Migrations completed");
    }

    let addr = config.socket_addr().context("Invalid server address")?;
    let app = app::create_app(config, db);

    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
