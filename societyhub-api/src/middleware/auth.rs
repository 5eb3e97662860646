/// Bearer-token layers bound to the application state
///
/// Thin wrappers over the shared auth middleware that pull the JWT secret out
/// of [`AppState`] so they can be mounted with `from_fn_with_state`.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use societyhub_shared::auth::middleware::{self, AuthError};

use crate::app::AppState;

/// Rejects requests without a valid token
pub async fn require_auth_layer(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    middleware::require_auth(state.jwt_secret().to_string(), req, next).await
}

/// Attaches the caller's identity when a valid token is sent
pub async fn optional_auth_layer(State(state): State<AppState>, req: Request, next: Next) -> Response {
    middleware::optional_auth(state.jwt_secret().to_string(), req, next).await
}
