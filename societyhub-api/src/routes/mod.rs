/// API route handlers
///
/// - `health`: Health check endpoint
/// - `auth`: Registration and login
/// - `societies`: Society listing, detail and membership flow
/// - `events`: Event listing and RSVPs
/// - `users`: The caller's own societies

pub mod auth;
pub mod events;
pub mod health;
pub mod societies;
pub mod users;

use societyhub_shared::{auth::middleware::AuthContext, models::user::User};

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};

/// Loads the authenticated user
///
/// A valid token for an account that no longer exists is treated as
/// unauthenticated.
pub(crate) async fn current_user(state: &AppState, auth: &AuthContext) -> ApiResult<User> {
    User::find_by_id(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Account no longer exists".to_string()))
}

/// Loads the viewer on routes where authentication is optional
pub(crate) async fn viewer_user(state: &AppState, auth: Option<AuthContext>) -> ApiResult<Option<User>> {
    match auth {
        Some(auth) => Ok(User::find_by_id(&state.db, auth.user_id).await?),
        None => Ok(None),
    }
}
