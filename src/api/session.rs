//! Request-scoped identity and balance.
//!
//! The upstream session layer authenticates the caller and forwards their email in
//! a trusted header (`auth.identity_header`). This extractor resolves that email to
//! a user and runs `ensure_balance` once, so every handler receives both.

use super::AppState;
use crate::{
    core::{account::find_user_by_email, balance::ensure_balance},
    entities::{honey_balance, user},
    errors::Error,
};
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

/// The authenticated caller and their Honey balance.
#[derive(Debug, Clone)]
pub struct Session {
    /// Authenticated user
    pub user: user::Model,
    /// The user's balance, created on first touch
    pub balance: honey_balance::Model,
}

#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let email = parts
            .headers
            .get(&state.settings.auth.identity_header)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .ok_or(Error::Unauthorized)?;

        let user = find_user_by_email(state.database.as_ref(), email)
            .await?
            .ok_or_else(|| Error::UserNotFound {
                email: email.to_string(),
            })?;
        let balance = ensure_balance(state.database.as_ref(), user.id).await?;

        Ok(Self { user, balance })
    }
}
