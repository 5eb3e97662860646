/// Database models for SocietyHub
///
/// # Models
///
/// - `user`: Accounts and hashed credentials
/// - `society`: Societies owned by a creating user
/// - `membership`: Society members and pending join requests
/// - `event`: Events owned by a society (many-to-one)
/// - `participant`: RSVP records attached to events
///
/// Query functions are generic over `sqlx::PgExecutor`, so they run equally
/// against a `&PgPool` or inside a transaction (`&mut *tx`), which is how the
/// seeder builds a dataset atomically.
///
/// # Example
///
/// ```no_run
/// use societyhub_shared::models::user::{CreateUser, User};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let user = User::create(&pool, CreateUser {
///     username: "john".to_string(),
///     email: "john@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
///     profile_pic: None,
/// }).await?;
///
/// let mut tx = pool.begin().await?;
/// let found = User::find_by_id(&mut *tx, user.id).await?;
/// tx.commit().await?;
/// # Ok(())
/// # }
/// ```

pub mod event;
pub mod membership;
pub mod participant;
pub mod society;
pub mod user;
