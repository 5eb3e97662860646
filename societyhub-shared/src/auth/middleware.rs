/// Authentication middleware for Axum
///
/// Reads `Authorization: Bearer <token>`, validates the JWT and stores an
/// [`AuthContext`] in the request extensions.
///
/// - [`require_auth`] rejects the request with 401 when the token is missing or invalid.
/// - [`optional_auth`] lets anonymous requests through and only attaches a
///   context when a valid token is present. Public pages use it to render
///   viewer-specific state (join button, RSVP status) for signed-in users.
///
/// # Example
///
/// ```no_run
/// use axum::{extract::Request, middleware::{self, Next}, routing::get, Router};
/// use societyhub_shared::auth::middleware::{require_auth, AuthContext};
///
/// async fn protected_handler(auth: AuthContext) -> String {
///     format!("Hello, user {}!", auth.user_id)
/// }
///
/// let secret = "your-jwt-secret".to_string();
/// let app: Router = Router::new()
///     .route("/protected", get(protected_handler))
///     .layer(middleware::from_fn(move |req: Request, next: Next| {
///         require_auth(secret.clone(), req, next)
///     }));
/// ```

use axum::{
    async_trait,
    extract::{FromRequestParts, Request},
    http::{header, request::Parts, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::jwt::{validate_token, JwtError};

/// Authenticated caller, added to request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    pub user_id: Uuid,
}

impl AuthContext {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

/// Error type for authentication middleware
#[derive(Debug)]
pub enum AuthError {
    /// Missing authorization header
    MissingCredentials,

    /// Authorization header is not a bearer token
    InvalidFormat(String),

    /// Token validation failed
    InvalidToken(String),
}

impl AuthError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AuthError::MissingCredentials => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Please log in first".to_string(),
            ),
            AuthError::InvalidFormat(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            AuthError::InvalidToken(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg.clone()),
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.parts().2)
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, error, message) = self.parts();
        let body = serde_json::json!({ "error": error, "message": message });
        (status, Json(body)).into_response()
    }
}

/// Validates the bearer token in `headers`
pub fn authenticate(headers: &HeaderMap, secret: &str) -> Result<AuthContext, AuthError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))?;

    let claims = validate_token(token, secret).map_err(|e| match e {
        JwtError::Expired => AuthError::InvalidToken("Token expired".to_string()),
        JwtError::InvalidIssuer { .. } => AuthError::InvalidToken("Invalid issuer".to_string()),
        _ => AuthError::InvalidToken("Invalid token".to_string()),
    })?;

    Ok(AuthContext::new(claims.sub))
}

/// Rejects requests without a valid bearer token
pub async fn require_auth(secret: String, mut req: Request, next: Next) -> Result<Response, AuthError> {
    let context = authenticate(req.headers(), &secret)?;
    req.extensions_mut().insert(context);

    Ok(next.run(req).await)
}

/// Attaches an [`AuthContext`] when a valid bearer token is present
///
/// Missing or invalid tokens are treated as anonymous; the request is never
/// rejected here.
pub async fn optional_auth(secret: String, mut req: Request, next: Next) -> Response {
    match authenticate(req.headers(), &secret) {
        Ok(context) => {
            req.extensions_mut().insert(context);
        }
        Err(AuthError::MissingCredentials) => {}
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring invalid credentials on public route");
        }
    }

    next.run(req).await
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .copied()
            .ok_or(AuthError::MissingCredentials)
    }
}
