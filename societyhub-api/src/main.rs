//! # SocietyHub API Server
//!
//! JSON API behind the campus society site: accounts, society pages with the
//! join/approve/leave flow, and event RSVPs.
//!
//! ```bash
//! DATABASE_URL=postgres://... JWT_SECRET=... cargo run -p societyhub-api
//! ```

use anyhow::Context;
use societyhub_api::{
    app::{build_router, AppState},
    config::Config,
};
use societyhub_shared::db::{
    migrations::run_migrations,
    pool::{close_pool, create_pool},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "societyhub_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "SocietyHub API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env().context("Failed to load configuration")?;

    let pool = create_pool(config.pool_config())
        .await
        .context("Failed to connect to the database")?;

    if config.database.run_migrations {
        run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;
    }

    let addr = config.bind_address();
    let app = build_router(AppState::new(pool.clone(), config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    close_pool(pool).await;
    tracing::info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received, draining connections...");
}
