//! `GET /api/health` - store connectivity check.

use crate::{api::AppState, core::account::count_users};
use axum::{Json, extract::State, http::StatusCode};
use sea_orm::ConnectionTrait;
use serde::Serialize;
use serde_json::{Value, json};

/// Store statistics included in a healthy response.
#[derive(Debug, Serialize)]
pub struct HealthStats {
    /// Registered users
    pub users: u64,
    /// Database backend in use
    pub database: String,
    /// `"Connected"` when the store answered
    pub status: &'static str,
}

/// Reports whether the store is reachable, with a user count.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match count_users(state.database.as_ref()).await {
        Ok(users) => {
            let stats = HealthStats {
                users,
                database: format!("{:?}", state.database.get_database_backend()),
                status: "Connected",
            };
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "message": "Database connected successfully!",
                    "stats": stats,
                })),
            )
        }
        Err(e) => {
            tracing::error!("Database connection error: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "message": "Database connection failed",
                })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{send, test_app};
    use crate::errors::Result;
    use crate::test_utils::create_test_user;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_health_reports_user_count() -> Result<()> {
        let (app, db) = test_app().await;
        create_test_user(&db, "a@zista.app").await?;

        let (status, body) = send(&app, "GET", "/api/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["stats"]["users"], 1);
        assert_eq!(body["stats"]["status"], "Connected");

        Ok(())
    }
}
