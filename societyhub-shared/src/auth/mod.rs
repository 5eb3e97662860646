/// Authentication utilities
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and strength checks
/// - [`jwt`]: HS256 session tokens carrying the user ID
/// - [`middleware`]: axum middleware that turns a bearer token into an [`middleware::AuthContext`]
///
/// # Example
///
/// ```no_run
/// use societyhub_shared::auth::jwt::{create_token, validate_token, Claims};
/// use societyhub_shared::auth::password::{hash_password, verify_password};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("1122")?;
/// assert!(verify_password("1122", &hash)?);
///
/// let token = create_token(&Claims::new(Uuid::new_v4()), "secret-key")?;
/// let claims = validate_token(&token, "secret-key")?;
/// # Ok(())
/// # }
/// ```

pub mod jwt;
pub mod middleware;
pub mod password;
