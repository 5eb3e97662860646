/// Configuration management for the API server
///
/// Loaded from environment variables (and a `.env` file in development).
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 5000)
/// - `JWT_SECRET`: Secret key for JWT signing, at least 32 characters (required)
/// - `CORS_ORIGINS`: Comma-separated allowed origins, `*` for any (default: `*`)
/// - `PRODUCTION`: Enables HSTS and other production headers (default: false)
/// - `RUN_MIGRATIONS`: Apply pending migrations at startup (default: true)
/// - `RUST_LOG`: Log filter (default: `societyhub_api=debug,tower_http=debug`)
///
/// # Example
///
/// ```no_run
/// use societyhub_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,

    /// Allowed CORS origins; `*` means permissive
    pub cors_origins: Vec<String>,

    /// Production mode (strict security headers)
    pub production: bool,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub run_migrations: bool,
}

/// JWT configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Secret key for JWT signing
    ///
    /// Must be kept secret and be at least 32 bytes.
    /// Generate with: `openssl rand -hex 32`
    pub secret: String,
}

fn parse_bool(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if required variables are missing or malformed.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_host = lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let api_port = lookup("API_PORT")
            .unwrap_or_else(|| "5000".to_string())
            .parse::<u16>()
            .map_err(|e| anyhow::anyhow!("API_PORT is not a valid port: {}", e))?;

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let production = lookup("PRODUCTION").map(|v| parse_bool(&v)).unwrap_or(false);

        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|| "10".to_string())
            .parse::<u32>()
            .map_err(|e| anyhow::anyhow!("DATABASE_MAX_CONNECTIONS is not a number: {}", e))?;

        let run_migrations = lookup("RUN_MIGRATIONS").map(|v| parse_bool(&v)).unwrap_or(true);

        let jwt_secret = lookup("JWT_SECRET")
            .ok_or_else(|| anyhow::anyhow!("JWT_SECRET environment variable is required"))?;

        if jwt_secret.len() < 32 {
            anyhow::bail!("JWT_SECRET must be at least 32 characters long");
        }

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
                cors_origins,
                production,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
                run_migrations,
            },
            jwt: JwtConfig { secret: jwt_secret },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// Pool settings for the shared database layer
    pub fn pool_config(&self) -> societyhub_shared::db::pool::DatabaseConfig {
        societyhub_shared::db::pool::DatabaseConfig {
            max_connections: self.database.max_connections,
            ..societyhub_shared::db::pool::DatabaseConfig::with_url(&self.database.url)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgresql://localhost/societyhub"),
            ("JWT_SECRET", SECRET),
        ]))
        .unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:5000");
        assert_eq!(config.api.cors_origins, vec!["*".to_string()]);
        assert!(!config.api.production);
        assert_eq!(config.database.max_connections, 10);
        assert!(config.database.run_migrations);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgresql://localhost/societyhub"),
            ("JWT_SECRET", SECRET),
            ("API_HOST", "127.0.0.1"),
            ("API_PORT", "8080"),
            ("CORS_ORIGINS", "http://localhost:5173, https://societyhub.example.com"),
            ("PRODUCTION", "true"),
            ("DATABASE_MAX_CONNECTIONS", "4"),
            ("RUN_MIGRATIONS", "false"),
        ]))
        .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.api.cors_origins.len(), 2);
        assert_eq!(config.api.cors_origins[1], "https://societyhub.example.com");
        assert!(config.api.production);
        assert!(!config.database.run_migrations);
        assert_eq!(config.pool_config().max_connections, 4);
    }

    #[test]
    fn test_missing_database_url() {
        let err = Config::from_lookup(lookup(&[("JWT_SECRET", SECRET)])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn test_short_jwt_secret_rejected() {
        let err = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgresql://localhost/societyhub"),
            ("JWT_SECRET", "too-short"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("at least 32"));
    }

    #[test]
    fn test_invalid_port() {
        let err = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgresql://localhost/societyhub"),
            ("JWT_SECRET", SECRET),
            ("API_PORT", "not-a-port"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("API_PORT"));
    }
}
