//! # SocietyHub Seeder
//!
//! Wipes the database and loads the demo users, societies and events.
//!
//! ```bash
//! DATABASE_URL=postgres://... cargo run -p societyhub-seed
//! ```
//!
//! Exits 0 on success and 1 on any failure, in which case nothing is
//! committed.

use anyhow::Context;
use societyhub_seed::{config::SeedConfig, fixtures::SeedData, seeder, store::PgSeedStore, SeedSummary};
use societyhub_shared::db::{
    migrations::{ensure_database_exists, run_migrations},
    pool::{close_pool, create_pool, DatabaseConfig},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "societyhub_seed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match seed().await {
        Ok(summary) => {
            tracing::info!(
                users = summary.users,
                societies = summary.societies,
                events = summary.events,
                "Database seeding completed"
            );
            for email in &summary.sample_logins {
                tracing::info!(email = %email, "Sample login");
            }
        }
        Err(e) => {
            tracing::error!(error = ?e, "Seeding failed");
            std::process::exit(1);
        }
    }
}

async fn seed() -> anyhow::Result<SeedSummary> {
    let config = SeedConfig::from_env()?;

    let data = SeedData::load_dir(&config.data_dir)
        .await
        .context("Failed to load fixtures")?;

    ensure_database_exists(&config.database_url)
        .await
        .context("Failed to prepare the database")?;

    let pool = create_pool(DatabaseConfig::with_url(&config.database_url))
        .await
        .context("Failed to connect to the database")?;
    tracing::info!("Connected to database for seeding");

    if config.run_migrations {
        run_migrations(&pool).await.context("Failed to run migrations")?;
    }

    let mut store = PgSeedStore::begin(&pool).await?;
    let summary = seeder::run(&mut store, &data).await?;
    store.commit().await?;

    close_pool(pool).await;
    Ok(summary)
}
