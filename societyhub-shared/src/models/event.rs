/// Event model and database operations
///
/// Every event belongs to exactly one society through `society_id`. A
/// society's event sequence is read back with [`Event::ids_for_society`]
/// (insertion order), so the Society -> Event direction is always consistent
/// with the Event -> Society foreign key.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE events (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     seq BIGINT GENERATED ALWAYS AS IDENTITY,
///     society_id UUID NOT NULL REFERENCES societies(id) ON DELETE RESTRICT,
///     title VARCHAR(200) NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     date TIMESTAMPTZ NOT NULL,
///     start_time VARCHAR(20) NOT NULL DEFAULT '',
///     end_time VARCHAR(20) NOT NULL DEFAULT '',
///     location VARCHAR(255) NOT NULL DEFAULT '',
///     poster VARCHAR(512),
///     is_public BOOLEAN NOT NULL DEFAULT TRUE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use uuid::Uuid;

const EVENT_COLUMNS: &str = "id, society_id, title, description, date, start_time, end_time, \
     location, poster, is_public, created_at, updated_at";

/// Event hosted by a society
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Event {
    pub id: Uuid,

    /// Owning society
    pub society_id: Uuid,

    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,

    /// Free-text start time as entered, e.g. "10:00 AM"
    pub start_time: String,

    /// Free-text end time as entered
    pub end_time: String,

    pub location: String,
    pub poster: Option<String>,

    /// Public events accept RSVPs from non-members
    pub is_public: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEvent {
    pub society_id: Uuid,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
    pub poster: Option<String>,
    pub is_public: bool,
}

/// Event joined with its society's name, for listings
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventWithSociety {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub event: Event,
    pub society_name: Option<String>,
    pub society_deactivated: bool,
}

impl Event {
    /// Creates an event
    ///
    /// # Errors
    ///
    /// Fails with a foreign key violation if `society_id` does not exist.
    pub async fn create<'e, E>(executor: E, data: CreateEvent) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Event>(&format!(
            "INSERT INTO events (society_id, title, description, date, start_time, end_time,
                                 location, poster, is_public)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {EVENT_COLUMNS}"
        ))
        .bind(data.society_id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.date)
        .bind(data.start_time)
        .bind(data.end_time)
        .bind(data.location)
        .bind(data.poster)
        .bind(data.is_public)
        .fetch_one(executor)
        .await
    }

    /// Finds an event by ID along with its society's name
    pub async fn find_with_society<'e, E>(
        executor: E,
        id: Uuid,
    ) -> Result<Option<EventWithSociety>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, EventWithSociety>(
            r#"
            SELECT e.*, s.name AS society_name, s.deactivated AS society_deactivated
            FROM events e
            JOIN societies s ON s.id = e.society_id
            WHERE e.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    /// Lists public events with their society names, soonest first
    pub async fn list_public<'e, E>(executor: E) -> Result<Vec<EventWithSociety>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, EventWithSociety>(
            r#"
            SELECT e.*, s.name AS society_name, s.deactivated AS society_deactivated
            FROM events e
            JOIN societies s ON s.id = e.society_id
            WHERE e.is_public = TRUE
            ORDER BY e.date, e.id
            "#,
        )
        .fetch_all(executor)
        .await
    }

    /// Lists a society's events in sequence order
    pub async fn list_for_society<'e, E>(
        executor: E,
        society_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events
             WHERE society_id = $1
             ORDER BY seq"
        ))
        .bind(society_id)
        .fetch_all(executor)
        .await
    }

    /// The society's event sequence: IDs of every event whose `society_id`
    /// points at it, in sequence order
    pub async fn ids_for_society<'e, E>(
        executor: E,
        society_id: Uuid,
    ) -> Result<Vec<Uuid>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar(
            "SELECT id FROM events WHERE society_id = $1 ORDER BY seq",
        )
        .bind(society_id)
        .fetch_all(executor)
        .await
    }

    /// Counts events
    pub async fn count<'e, E>(executor: E) -> Result<i64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM events")
            .fetch_one(executor)
            .await?;

        Ok(count)
    }

    /// Deletes every event (participants cascade)
    pub async fn delete_all<'e, E>(executor: E) -> Result<u64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM events").execute(executor).await?;
        Ok(result.rows_affected())
    }
}
