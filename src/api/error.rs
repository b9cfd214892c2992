//! Maps [`Error`] onto HTTP status codes and a `{"error": ...}` JSON body.

use crate::errors::Error;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

impl Error {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidAmount { .. }
            | Self::InsufficientBalance { .. }
            | Self::AlreadyClaimedToday { .. }
            | Self::UserExists { .. }
            | Self::Validation { .. }
            | Self::InvalidResetToken => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::BalanceNotFound { .. } | Self::UserNotFound { .. } => StatusCode::NOT_FOUND,
            Self::StoreUnavailable(_)
            | Self::Config { .. }
            | Self::Io(_)
            | Self::PasswordHash { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the client. Internal failures are not described in detail.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::InvalidAmount { reason, .. } => format!("Invalid amount: {reason}"),
            Self::InsufficientBalance { .. } => "Insufficient honey balance".to_string(),
            Self::AlreadyClaimedToday { .. } => "Daily reward already claimed today".to_string(),
            Self::BalanceNotFound { .. } => "User honey balance not found".to_string(),
            Self::UserNotFound { .. } => "User not found".to_string(),
            Self::UserExists { .. } => "User with this email already exists".to_string(),
            Self::StoreUnavailable(_) | Self::Config { .. } | Self::Io(_) | Self::PasswordHash { .. } => {
                "Something went wrong. Please try again.".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {self}");
        } else {
            tracing::debug!("Request rejected: {self}");
        }

        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation {
            message: format!("Invalid request body: {}", rejection.body_text()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            Error::InsufficientBalance {
                current: 1,
                required: 2
            }
            .status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::AlreadyClaimedToday {
                last_claim: Utc::now()
            }
            .status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(Error::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            Error::UserNotFound {
                email: "x".to_string()
            }
            .status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::StoreUnavailable(sea_orm::DbErr::Custom("down".to_string())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_errors_are_not_leaked() {
        let error = Error::StoreUnavailable(sea_orm::DbErr::Custom("secret dsn".to_string()));
        assert!(!error.public_message().contains("secret"));
    }
}
