//! Account endpoints - signup, credential check, logout and password reset.
//!
//! Session issuing belongs to the upstream identity provider; `login` only checks
//! credentials and returns the identity it should mint a session for.

use crate::{
    api::AppState,
    core::account,
    errors::{Error, Result},
};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

const RESET_REQUESTED_MESSAGE: &str =
    "If your email is registered, you will receive a password reset link";

/// Generic `{"message": ...}` body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable outcome
    pub message: String,
}

impl MessageResponse {
    fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

/// Public view of an account.
#[derive(Debug, Serialize)]
pub struct AccountSummary {
    /// User id
    pub id: i64,
    /// Account email
    pub email: String,
    /// Display name
    pub name: String,
}

impl From<crate::entities::user::Model> for AccountSummary {
    fn from(user: crate::entities::user::Model) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}

/// Body of a signup request.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Login email
    #[serde(default)]
    pub email: String,
    /// Plain-text password, at least 8 characters
    #[serde(default)]
    pub password: String,
}

/// Body of a successful signup response.
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    /// Confirmation text
    pub message: String,
    /// The created account
    pub user: AccountSummary,
}

/// `POST /api/auth/signup`
pub async fn signup(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SignupResponse>)> {
    let Json(request) = payload?;
    let created = account::sign_up(
        state.database.as_ref(),
        &request.name,
        &request.email,
        &request.password,
        state.settings.honey.welcome_bonus,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "Account created successfully".to_string(),
            user: created.user.into(),
        }),
    ))
}

/// Body of a credential check.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Login email
    #[serde(default)]
    pub email: String,
    /// Plain-text password
    #[serde(default)]
    pub password: String,
}

/// Body of a successful credential check.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// The authenticated account
    pub user: AccountSummary,
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>> {
    let Json(request) = payload?;
    let db = state.database.as_ref();
    let user = account::authenticate(db, &request.email, &request.password)
        .await?
        .ok_or(Error::Unauthorized)?;

    Ok(Json(LoginResponse { user: user.into() }))
}

/// `POST /api/auth/logout`
pub async fn logout() -> Json<MessageResponse> {
    MessageResponse::new("Logged out successfully")
}

/// Body of a password reset request.
#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    /// Email of the account to reset
    #[serde(default)]
    pub email: String,
}

/// `POST /api/auth/forgot-password`
///
/// Answers the same way whether or not the email is registered.
pub async fn forgot_password(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ForgotPasswordRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let Json(request) = payload?;
    if request.email.trim().is_empty() {
        return Err(Error::Validation {
            message: "Email is required".to_string(),
        });
    }

    let db = state.database.as_ref();
    let ttl = state.settings.honey.reset_token_ttl();
    account::request_password_reset(db, &request.email, ttl, Utc::now()).await?;

    Ok(MessageResponse::new(RESET_REQUESTED_MESSAGE))
}

/// Body of a reset token redemption.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    /// Token from the reset link
    #[serde(default)]
    pub token: String,
    /// New plain-text password
    #[serde(default)]
    pub password: String,
}

/// `POST /api/auth/reset-password`
pub async fn reset_password(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ResetPasswordRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let Json(request) = payload?;
    let db = state.database.as_ref();
    account::reset_password(db, &request.token, &request.password, Utc::now()).await?;

    Ok(MessageResponse::new("Password has been reset"))
}
