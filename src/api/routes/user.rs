//! `GET /api/user/me` - profile summary with Honey balance and streak.

use crate::{api::Session, core::reward::claimed_today};
use axum::Json;
use chrono::Utc;
use serde::Serialize;

const FALLBACK_NAME: &str = "Bee User";

/// Profile summary returned to the signed-in user.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    /// Display name, `"Bee User"` when unset
    pub name: String,
    /// Account email
    pub email: String,
    /// Avatar image reference
    pub avatar: Option<String>,
    /// Community rank label
    pub bee_rank: String,
    /// Current Honey
    pub honey_balance: i64,
    /// Number of daily rewards claimed
    pub streak: i32,
    /// Whether the daily reward is still available today (UTC)
    pub can_claim_daily_reward: bool,
}

/// Returns the caller's profile summary.
pub async fn me(session: Session) -> Json<MeResponse> {
    let Session { user, balance } = session;
    let name = if user.name.trim().is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        user.name
    };

    Json(MeResponse {
        name,
        email: user.email,
        avatar: user.image,
        bee_rank: user.bee_rank,
        honey_balance: balance.balance,
        streak: balance.streak_days,
        can_claim_daily_reward: !claimed_today(balance.last_daily_reward, Utc::now()),
    })
}
