/// Society model and database operations
///
/// A society is owned by the user that created it (`created_by`). Members and
/// pending join requests live in their own tables (see `membership`), and the
/// society's event sequence is derived from `events.society_id` rather than
/// stored as a second, independently mutable array.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE societies (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(200) NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     logo VARCHAR(512),
///     cover_image VARCHAR(512),
///     category VARCHAR(50) NOT NULL DEFAULT 'Other',
///     created_by UUID NOT NULL REFERENCES users(id) ON DELETE RESTRICT,
///     contact_email VARCHAR(255),
///     phone VARCHAR(50),
///     instagram_url VARCHAR(512),
///     linkedin_url VARCHAR(512),
///     deactivated BOOLEAN NOT NULL DEFAULT FALSE,
///     activation_requested_at TIMESTAMPTZ,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use uuid::Uuid;

const SOCIETY_COLUMNS: &str = "id, name, description, logo, cover_image, category, created_by, \
     contact_email, phone, instagram_url, linkedin_url, deactivated, activation_requested_at, \
     created_at, updated_at";

/// Society owned by a creating user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Society {
    pub id: Uuid,
    pub name: String,
    pub description: String,

    /// Logo URL; `None` or the default asset renders a category placeholder
    pub logo: Option<String>,

    pub cover_image: Option<String>,

    /// Category/type, e.g. "Technology" or "Drama"
    pub category: String,

    /// Owning user
    pub created_by: Uuid,

    pub contact_email: Option<String>,
    pub phone: Option<String>,
    pub instagram_url: Option<String>,
    pub linkedin_url: Option<String>,

    /// Deactivated societies stay visible but refuse new joins and RSVPs
    pub deactivated: bool,

    /// Set when the creator asks for a deactivated society to be reactivated
    pub activation_requested_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a society
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateSociety {
    pub name: String,
    pub description: String,
    pub logo: Option<String>,
    pub cover_image: Option<String>,
    pub category: String,
    pub created_by: Uuid,
    pub contact_email: Option<String>,
    pub phone: Option<String>,
    pub instagram_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub deactivated: bool,
}

/// Society with the counts the listing cards need
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SocietyWithCounts {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub society: Society,
    pub member_count: i64,
    pub event_count: i64,
}

impl Society {
    /// Returns true when `user_id` created this society
    pub fn is_admin(&self, user_id: Uuid) -> bool {
        self.created_by == user_id
    }

    /// Creates a society
    ///
    /// # Errors
    ///
    /// Fails with a foreign key violation if `created_by` does not exist.
    pub async fn create<'e, E>(executor: E, data: CreateSociety) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Society>(&format!(
            "INSERT INTO societies (name, description, logo, cover_image, category, created_by,
                                    contact_email, phone, instagram_url, linkedin_url, deactivated)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {SOCIETY_COLUMNS}"
        ))
        .bind(data.name)
        .bind(data.description)
        .bind(data.logo)
        .bind(data.cover_image)
        .bind(data.category)
        .bind(data.created_by)
        .bind(data.contact_email)
        .bind(data.phone)
        .bind(data.instagram_url)
        .bind(data.linkedin_url)
        .bind(data.deactivated)
        .fetch_one(executor)
        .await
    }

    /// Finds a society by ID
    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Society>(&format!(
            "SELECT {SOCIETY_COLUMNS} FROM societies WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    /// Lists every society with member and event counts, by name
    pub async fn list_with_counts<'e, E>(executor: E) -> Result<Vec<SocietyWithCounts>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, SocietyWithCounts>(
            r#"
            SELECT s.*,
                   (SELECT COUNT(*) FROM society_members m WHERE m.society_id = s.id) AS member_count,
                   (SELECT COUNT(*) FROM events e WHERE e.society_id = s.id) AS event_count
            FROM societies s
            ORDER BY s.name, s.id
            "#,
        )
        .fetch_all(executor)
        .await
    }

    /// Lists the societies a user created or belongs to, with counts
    pub async fn list_for_user<'e, E>(
        executor: E,
        user_id: Uuid,
    ) -> Result<Vec<SocietyWithCounts>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, SocietyWithCounts>(
            r#"
            SELECT s.*,
                   (SELECT COUNT(*) FROM society_members m WHERE m.society_id = s.id) AS member_count,
                   (SELECT COUNT(*) FROM events e WHERE e.society_id = s.id) AS event_count
            FROM societies s
            WHERE s.created_by = $1
               OR EXISTS (SELECT 1 FROM society_members m
                          WHERE m.society_id = s.id AND m.user_id = $1)
            ORDER BY s.name, s.id
            "#,
        )
        .bind(user_id)
        .fetch_all(executor)
        .await
    }

    /// Records an activation request for a deactivated society
    ///
    /// Returns the updated society, or `None` when the society does not exist
    /// or is not deactivated.
    pub async fn request_activation<'e, E>(
        executor: E,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Society>(&format!(
            "UPDATE societies
             SET activation_requested_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND deactivated = TRUE
             RETURNING {SOCIETY_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    /// Counts societies
    pub async fn count<'e, E>(executor: E) -> Result<i64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM societies")
            .fetch_one(executor)
            .await?;

        Ok(count)
    }

    /// Deletes every society (members and join requests cascade)
    ///
    /// Events reference societies with `ON DELETE RESTRICT` and must be
    /// deleted first.
    pub async fn delete_all<'e, E>(executor: E) -> Result<u64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM societies").execute(executor).await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_admin() {
        let creator = Uuid::new_v4();
        let society = Society {
            id: Uuid::new_v4(),
            name: "Drama Club".to_string(),
            description: String::new(),
            logo: None,
            cover_image: None,
            category: "Drama".to_string(),
            created_by: creator,
            contact_email: None,
            phone: None,
            instagram_url: None,
            linkedin_url: None,
            deactivated: false,
            activation_requested_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(society.is_admin(creator));
        assert!(!society.is_admin(Uuid::new_v4()));
    }

    #[test]
    fn test_create_society_default() {
        let data = CreateSociety::default();
        assert!(!data.deactivated);
        assert!(data.logo.is_none());
    }
}
