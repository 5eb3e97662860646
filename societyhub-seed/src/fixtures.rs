/// Seed fixture files
///
/// Three JSON arrays live side by side in the data directory:
/// `users.json`, `societies.json` and `events.json`. Records are positional;
/// ownership links are assigned by the seeder, never read from the files.
///
/// Keys are camelCase to stay compatible with the site's existing fixtures.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::SeedError;

pub const USERS_FILE: &str = "users.json";
pub const SOCIETIES_FILE: &str = "societies.json";
pub const EVENTS_FILE: &str = "events.json";

/// A user record with its plaintext password
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFixture {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub profile_pic: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocietyFixture {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default = "default_category", alias = "type")]
    pub category: String,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, alias = "instagram")]
    pub instagram_url: Option<String>,
    #[serde(default, alias = "linkedin")]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub deactivated: bool,
}

fn default_category() -> String {
    "Other".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventFixture {
    pub title: String,
    #[serde(default)]
    pub description: String,

    /// RFC 3339 timestamp or a bare `YYYY-MM-DD` date
    pub date: String,

    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default = "default_public")]
    pub is_public: bool,
}

fn default_public() -> bool {
    true
}

impl EventFixture {
    pub fn parsed_date(&self) -> Result<DateTime<Utc>, SeedError> {
        parse_date(&self.date).map_err(|reason| {
            SeedError::Fixture(format!("event \"{}\": {}", self.title, reason))
        })
    }
}

/// Parses a fixture date
///
/// Bare dates resolve to midnight UTC.
pub fn parse_date(value: &str) -> Result<DateTime<Utc>, String> {
    let value = value.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| format!("invalid date \"{}\"", value))
}

/// The full fixture set
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub users: Vec<UserFixture>,
    pub societies: Vec<SocietyFixture>,
    pub events: Vec<EventFixture>,
}

impl SeedData {
    /// Reads the three fixture files from `dir`
    pub async fn load_dir(dir: impl AsRef<Path>) -> Result<Self, SeedError> {
        let dir = dir.as_ref();

        Ok(Self {
            users: read_array(dir.join(USERS_FILE)).await?,
            societies: read_array(dir.join(SOCIETIES_FILE)).await?,
            events: read_array(dir.join(EVENTS_FILE)).await?,
        })
    }

    /// Rejects fixture sets whose children would have no parent to point at
    pub fn check_assignable(&self) -> Result<(), SeedError> {
        if self.users.is_empty() && !self.societies.is_empty() {
            return Err(SeedError::Fixture(
                "societies need at least one user to own them".to_string(),
            ));
        }
        if self.societies.is_empty() && !self.events.is_empty() {
            return Err(SeedError::Fixture(
                "events need at least one society to host them".to_string(),
            ));
        }
        Ok(())
    }
}

async fn read_array<T>(path: PathBuf) -> Result<Vec<T>, SeedError>
where
    T: for<'de> Deserialize<'de>,
{
    let raw = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| SeedError::Io {
            path: path.clone(),
            source,
        })?;

    serde_json::from_str(&raw).map_err(|source| SeedError::Parse { path, source })
}
