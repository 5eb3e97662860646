/// Middleware for the API server
///
/// - `security`: response security headers
/// - `auth`: bearer-token layers wired to [`crate::app::AppState`]

pub mod auth;
pub mod security;
