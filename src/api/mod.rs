//! HTTP layer - axum router, request context and JSON handlers.
//!
//! Handlers stay thin: extract the request, call one `core` operation, shape the
//! result. Shared state is passed explicitly through [`AppState`].

/// Error to HTTP response mapping
pub mod error;
/// Route handlers grouped by resource
pub mod routes;
/// Per-request authenticated context
pub mod session;

use crate::config::Settings;
use axum::{
    Router,
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use session::Session;

/// Shared data available to all handlers.
/// Holds the database connection and the loaded settings; cloned per request.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for all store operations
    pub database: Arc<DatabaseConnection>,
    /// Service settings
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Creates a new `AppState` from a connection and settings.
    #[must_use]
    pub fn new(database: Arc<DatabaseConnection>, settings: Settings) -> Self {
        Self {
            database,
            settings: Arc::new(settings),
        }
    }
}

/// Builds the full API router.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(routes::health::health))
        .route("/user/me", get(routes::user::me))
        .route("/honey/daily-reward", post(routes::honey::claim_daily_reward))
        .route("/honey/spend", post(routes::honey::spend))
        .route("/honey/transactions", get(routes::honey::transactions))
        .route("/auth/signup", post(routes::auth::signup))
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/logout", post(routes::auth::logout))
        .route("/auth/forgot-password", post(routes::auth::forgot_password))
        .route("/auth/reset-password", post(routes::auth::reset_password));

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
