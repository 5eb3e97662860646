/// Seeder configuration
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `SEED_DATA_DIR`: Directory holding the fixture files (default: the crate's `data/`)
/// - `RUN_MIGRATIONS`: Apply pending migrations first (default: true)
/// - `RUST_LOG`: Log filter (default: `societyhub_seed=info`)

use std::{env, path::PathBuf};

#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub database_url: String,
    pub data_dir: PathBuf,
    pub run_migrations: bool,
}

impl SeedConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let data_dir = lookup("SEED_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data"));

        let run_migrations = lookup("RUN_MIGRATIONS")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(true);

        Ok(Self {
            database_url,
            data_dir,
            run_migrations,
        })
    }
}
