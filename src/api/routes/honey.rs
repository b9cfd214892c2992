//! Honey endpoints - daily reward, spending and transaction history.

use crate::{
    api::{AppState, Session},
    core::{ledger, reward, transaction},
    entities::honey_transaction,
    errors::{Error, Result},
};
use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Body of a daily reward claim response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRewardResponse {
    /// Confirmation text
    pub message: String,
    /// Honey granted
    pub reward_amount: i64,
    /// Balance after the claim
    pub new_balance: i64,
    /// Streak after the claim
    pub streak: i32,
}

/// `POST /api/honey/daily-reward`
pub async fn claim_daily_reward(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<DailyRewardResponse>> {
    let db = state.database.as_ref();
    let claim = reward::claim_daily_reward(db, session.balance.id, Utc::now()).await?;

    Ok(Json(DailyRewardResponse {
        message: format!("Successfully claimed {} Honey!", claim.reward),
        reward_amount: claim.reward,
        new_balance: claim.balance.balance,
        streak: claim.streak,
    }))
}

/// Body of a spend request.
#[derive(Debug, Deserialize)]
pub struct SpendRequest {
    /// Honey to spend
    pub amount: Option<i64>,
    /// What the Honey is spent on
    pub purpose: Option<String>,
}

/// Body of a successful spend response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendResponse {
    /// Confirmation text
    pub message: String,
    /// Honey spent
    pub amount: i64,
    /// Balance after spending
    pub new_balance: i64,
    /// The recorded spend transaction
    pub transaction: honey_transaction::Model,
}

/// `POST /api/honey/spend`
pub async fn spend(
    State(state): State<AppState>,
    session: Session,
    payload: std::result::Result<Json<SpendRequest>, JsonRejection>,
) -> Result<Json<SpendResponse>> {
    let Json(request) = payload?;
    let amount = request.amount.ok_or(Error::InvalidAmount {
        amount: 0,
        reason: "amount is required",
    })?;
    let purpose = request.purpose.unwrap_or_default();

    let db = state.database.as_ref();
    let entry = ledger::debit(db, session.balance.id, amount, &purpose).await?;

    Ok(Json(SpendResponse {
        message: format!("Successfully spent {amount} Honey!"),
        amount,
        new_balance: entry.balance.balance,
        transaction: entry.transaction,
    }))
}

/// Query string of the history endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionsQuery {
    /// Page size, default 20, at most 100
    pub limit: Option<u64>,
}

/// Body of the history response.
#[derive(Debug, Serialize)]
pub struct TransactionsResponse {
    /// Transactions, newest first
    pub transactions: Vec<honey_transaction::Model>,
}

/// `GET /api/honey/transactions`
pub async fn transactions(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<TransactionsQuery>,
) -> Result<Json<TransactionsResponse>> {
    let limit = transaction::effective_limit(query.limit);
    let transactions =
        transaction::list_transactions(state.database.as_ref(), session.balance.id, limit)
            .await?;

    Ok(Json(TransactionsResponse { transactions }))
}
