/// Authentication endpoints
///
/// - `POST /api/auth/register` - Create an account and get a token
/// - `POST /api/auth/login` - Exchange credentials for a token
///
/// Both answer `{user, token}`; the password hash is never serialized.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, ValidationErrorDetail},
};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use societyhub_shared::{
    auth::{jwt, password},
    models::user::{CreateUser, User},
};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "Username must be 1-100 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Checked for strength separately
    pub password: String,

    #[validate(url(message = "Profile picture must be a URL"))]
    pub profile_pic: Option<String>,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

/// Response to register and login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

/// Register a new user
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Validation failed or weak password
/// - `409 Conflict`: Email already exists
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    req.validate()?;

    password::validate_password_strength(&req.password).map_err(|e| {
        ApiError::ValidationError(vec![ValidationErrorDetail {
            field: "password".to_string(),
            message: e,
        }])
    })?;

    let password_hash = password::hash_password_blocking(req.password).await?;

    let user = User::create(
        &state.db,
        CreateUser {
            username: req.username.trim().to_string(),
            email: req.email.trim().to_string(),
            password_hash,
            profile_pic: req.profile_pic,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, "User registered");

    let token = jwt::create_token(&jwt::Claims::new(user.id), state.jwt_secret())?;

    Ok((StatusCode::CREATED, Json(AuthResponse { user, token })))
}

/// Log in with email and password
///
/// # Errors
///
/// - `401 Unauthorized`: Unknown email or wrong password (same message for both)
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    req.validate()?;

    let invalid = || ApiError::Unauthorized("Invalid email or password".to_string());

    let user = User::find_by_email(&state.db, req.email.trim())
        .await?
        .ok_or_else(invalid)?;

    if !password::verify_password(&req.password, &user.password_hash)? {
        tracing::debug!(user_id = %user.id, "Rejected login with wrong password");
        return Err(invalid());
    }

    let token = jwt::create_token(&jwt::Claims::new(user.id), state.jwt_secret())?;

    Ok(Json(AuthResponse { user, token }))
}
