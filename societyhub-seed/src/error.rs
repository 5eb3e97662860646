use societyhub_shared::auth::password::PasswordError;
use std::path::PathBuf;

/// Seeder error types
///
/// Any of these aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Fixture content cannot be seeded as-is
    #[error("Invalid fixture: {0}")]
    Fixture(String),

    #[error("Password hashing failed: {0}")]
    Password(#[from] PasswordError),

    #[error("Database error: {0}")]
    Store(#[from] sqlx::Error),

    /// The society/event links disagree after seeding
    #[error("Integrity check failed: {0}")]
    Integrity(String),
}

pub type SeedResult<T> = Result<T, SeedError>;
