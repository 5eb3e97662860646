/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use societyhub_api::{app::{build_router, AppState}, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let app = build_router(AppState::new(pool, config));
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::{
    config::Config,
    middleware::{
        auth::{optional_auth_layer, require_auth_layer},
        security::SecurityHeadersLayer,
    },
    routes,
};
use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state, cloned into every handler
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete router
///
/// ```text
/// /
/// ├── GET  /health
/// └── /api/
///     ├── /auth/                 POST register, POST login
///     ├── /society               GET list, GET /:id            (optional auth)
///     │   └── /:id/...           join, leave, requests, activation (auth)
///     ├── /events                GET list, GET /:id, POST /:id/rsvp (optional auth)
///     └── /users/me/societies    GET                           (auth)
/// ```
///
/// Auth layers are attached with `route_layer`, so unknown paths still
/// answer 404 rather than 401.
pub fn build_router(state: AppState) -> Router {
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login));

    let society_public = Router::new()
        .route("/", get(routes::societies::list_societies))
        .route("/:id", get(routes::societies::get_society))
        .route_layer(from_fn_with_state(state.clone(), optional_auth_layer));

    let society_members = Router::new()
        .route("/:id/join", post(routes::societies::join_society))
        .route("/:id/leave", post(routes::societies::leave))
        .route(
            "/:id/requests/:user_id/approve",
            post(routes::societies::approve_request),
        )
        .route(
            "/:id/requests/:user_id/reject",
            post(routes::societies::reject_request),
        )
        .route(
            "/:id/activation-request",
            post(routes::societies::request_activation),
        )
        .route_layer(from_fn_with_state(state.clone(), require_auth_layer));

    let event_routes = Router::new()
        .route("/", get(routes::events::list_events))
        .route("/:id", get(routes::events::get_event))
        .route("/:id/rsvp", post(routes::events::rsvp))
        .route_layer(from_fn_with_state(state.clone(), optional_auth_layer));

    let user_routes = Router::new()
        .route("/me/societies", get(routes::users::my_societies))
        .route_layer(from_fn_with_state(state.clone(), require_auth_layer));

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/society", society_public.merge(society_members))
        .nest("/events", event_routes)
        .nest("/users", user_routes);

    let cors = if state.config.api.cors_origins.iter().any(|o| o == "*") {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}
