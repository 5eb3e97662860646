/// RSVP participants
///
/// Participants are a set per event keyed by email, so the server is the
/// source of truth for "already RSVPed": a second RSVP with the same email
/// inserts nothing.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE event_participants (
///     event_id UUID NOT NULL REFERENCES events(id) ON DELETE CASCADE,
///     email CITEXT NOT NULL,
///     user_id UUID REFERENCES users(id) ON DELETE SET NULL,
///     name VARCHAR(100) NOT NULL,
///     reason TEXT NOT NULL DEFAULT '',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     PRIMARY KEY (event_id, email)
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use uuid::Uuid;

const PARTICIPANT_COLUMNS: &str =
    "event_id, email::TEXT AS email, user_id, name, reason, created_at";

/// An RSVP record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Participant {
    pub event_id: Uuid,
    pub email: String,

    /// Account that submitted the RSVP, if it still exists
    pub user_id: Option<Uuid>,

    pub name: String,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

/// Input for recording an RSVP
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateParticipant {
    pub event_id: Uuid,
    pub email: String,
    pub user_id: Option<Uuid>,
    pub name: String,
    pub reason: String,
}

impl Participant {
    /// Records an RSVP
    ///
    /// Returns `None` when the email already RSVPed to this event.
    pub async fn create<'e, E>(
        executor: E,
        data: CreateParticipant,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Participant>(&format!(
            "INSERT INTO event_participants (event_id, email, user_id, name, reason)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (event_id, email) DO NOTHING
             RETURNING {PARTICIPANT_COLUMNS}"
        ))
        .bind(data.event_id)
        .bind(data.email)
        .bind(data.user_id)
        .bind(data.name)
        .bind(data.reason)
        .fetch_optional(executor)
        .await
    }

    /// Lists an event's participants in RSVP order
    pub async fn list_for_event<'e, E>(executor: E, event_id: Uuid) -> Result<Vec<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Participant>(&format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM event_participants
             WHERE event_id = $1
             ORDER BY created_at, email"
        ))
        .bind(event_id)
        .fetch_all(executor)
        .await
    }

    /// Lists participants for several events at once
    pub async fn list_for_events<'e, E>(
        executor: E,
        event_ids: &[Uuid],
    ) -> Result<Vec<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Participant>(&format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM event_participants
             WHERE event_id = ANY($1)
             ORDER BY created_at, email"
        ))
        .bind(event_ids)
        .fetch_all(executor)
        .await
    }
}
