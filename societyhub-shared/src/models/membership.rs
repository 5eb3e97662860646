/// Society membership and join requests
///
/// Membership is a set keyed by `(society_id, user_id)`, so a user can never
/// appear twice in a society's member list. Joining goes through a pending
/// request that the society's creator approves or rejects.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE society_members (
///     society_id UUID NOT NULL REFERENCES societies(id) ON DELETE CASCADE,
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     joined_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     PRIMARY KEY (society_id, user_id)
/// );
///
/// CREATE TABLE join_requests (
///     society_id UUID NOT NULL REFERENCES societies(id) ON DELETE CASCADE,
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     name VARCHAR(100) NOT NULL,
///     email CITEXT NOT NULL,
///     reason TEXT NOT NULL DEFAULT '',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     PRIMARY KEY (society_id, user_id)
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use societyhub_shared::models::membership::{CreateJoinRequest, JoinRequest, SocietyMember};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, society_id: Uuid, user_id: Uuid) -> Result<(), sqlx::Error> {
/// JoinRequest::create(&pool, CreateJoinRequest {
///     society_id,
///     user_id,
///     name: "Emma".to_string(),
///     email: "emma@example.com".to_string(),
///     reason: "I love theatre".to_string(),
/// }).await?;
///
/// // Creator approves: the request becomes a membership atomically
/// JoinRequest::approve(&pool, society_id, user_id).await?;
/// assert!(SocietyMember::is_member(&pool, society_id, user_id).await?);
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use super::user::UserSummary;

/// A user's membership in a society
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SocietyMember {
    pub society_id: Uuid,
    pub user_id: Uuid,
    pub joined_at: DateTime<Utc>,
}

impl SocietyMember {
    /// Adds a member
    ///
    /// Returns false if the user was already a member.
    pub async fn add<'e, E>(executor: E, society_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query(
            r#"
            INSERT INTO society_members (society_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (society_id, user_id) DO NOTHING
            "#,
        )
        .bind(society_id)
        .bind(user_id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Removes exactly one member
    ///
    /// Returns false if the user was not a member.
    pub async fn remove<'e, E>(
        executor: E,
        society_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query(
            "DELETE FROM society_members WHERE society_id = $1 AND user_id = $2",
        )
        .bind(society_id)
        .bind(user_id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Checks whether a user belongs to a society
    pub async fn is_member<'e, E>(
        executor: E,
        society_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM society_members
                WHERE society_id = $1 AND user_id = $2
            )
            "#,
        )
        .bind(society_id)
        .bind(user_id)
        .fetch_one(executor)
        .await
    }

    /// Lists a society's members as public user summaries, in join order
    pub async fn list_users<'e, E>(
        executor: E,
        society_id: Uuid,
    ) -> Result<Vec<UserSummary>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, UserSummary>(
            r#"
            SELECT u.id, u.username, u.profile_pic
            FROM society_members m
            JOIN users u ON u.id = m.user_id
            WHERE m.society_id = $1
            ORDER BY m.joined_at, u.id
            "#,
        )
        .bind(society_id)
        .fetch_all(executor)
        .await
    }
}

/// A pending request to join a society
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct JoinRequest {
    pub society_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a join request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateJoinRequest {
    pub society_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub reason: String,
}

impl JoinRequest {
    /// Queues a join request
    ///
    /// Returns `None` if the user already has a pending request for this
    /// society.
    pub async fn create<'e, E>(
        executor: E,
        data: CreateJoinRequest,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, JoinRequest>(
            r#"
            INSERT INTO join_requests (society_id, user_id, name, email, reason)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (society_id, user_id) DO NOTHING
            RETURNING society_id, user_id, name, email::TEXT AS email, reason, created_at
            "#,
        )
        .bind(data.society_id)
        .bind(data.user_id)
        .bind(data.name)
        .bind(data.email)
        .bind(data.reason)
        .fetch_optional(executor)
        .await
    }

    /// Lists a society's pending requests, oldest first
    pub async fn list_for_society<'e, E>(
        executor: E,
        society_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, JoinRequest>(
            r#"
            SELECT society_id, user_id, name, email::TEXT AS email, reason, created_at
            FROM join_requests
            WHERE society_id = $1
            ORDER BY created_at, user_id
            "#,
        )
        .bind(society_id)
        .fetch_all(executor)
        .await
    }

    /// Checks whether a user has a pending request
    pub async fn is_pending<'e, E>(
        executor: E,
        society_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM join_requests
                WHERE society_id = $1 AND user_id = $2
            )
            "#,
        )
        .bind(society_id)
        .bind(user_id)
        .fetch_one(executor)
        .await
    }

    /// Withdraws or rejects a pending request
    ///
    /// Returns false if there was no such request.
    pub async fn delete<'e, E>(
        executor: E,
        society_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query(
            "DELETE FROM join_requests WHERE society_id = $1 AND user_id = $2",
        )
        .bind(society_id)
        .bind(user_id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Turns a pending request into a membership in one transaction
    ///
    /// Returns false (and changes nothing) if no request was pending.
    pub async fn approve(pool: &PgPool, society_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if !Self::delete(&mut *tx, society_id, user_id).await? {
            tx.rollback().await?;
            return Ok(false);
        }

        SocietyMember::add(&mut *tx, society_id, user_id).await?;
        tx.commit().await?;

        Ok(true)
    }
}

/// Leaves a society: drops the membership and any pending request together
///
/// Returns false if the user was neither a member nor pending.
pub async fn leave_society(pool: &PgPool, society_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let was_member = SocietyMember::remove(&mut *tx, society_id, user_id).await?;
    let was_pending = JoinRequest::delete(&mut *tx, society_id, user_id).await?;

    tx.commit().await?;

    Ok(was_member || was_pending)
}
