//! Transaction log queries.
//!
//! Transactions are written only by `core::ledger`; this module reads them back.

use crate::{
    entities::{HoneyTransaction, honey_transaction},
    errors::Result,
};
use sea_orm::{QueryOrder, QuerySelect, prelude::*};

/// Number of transactions returned when the caller does not ask for a limit.
pub const DEFAULT_TRANSACTION_LIMIT: u64 = 20;

/// Largest page a caller may request.
pub const MAX_TRANSACTION_LIMIT: u64 = 100;

/// Returns the most recent `limit` transactions for a balance, newest first.
///
/// Rows sharing a timestamp are ordered by id so the newest insert still comes first.
pub async fn list_transactions<C>(
    db: &C,
    balance_id: i64,
    limit: u64,
) -> Result<Vec<honey_transaction::Model>>
where
    C: ConnectionTrait,
{
    HoneyTransaction::find()
        .filter(honey_transaction::Column::BalanceId.eq(balance_id))
        .order_by_desc(honey_transaction::Column::CreatedAt)
        .order_by_desc(honey_transaction::Column::Id)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Clamps a requested page size into `1..=MAX_TRANSACTION_LIMIT`, defaulting when absent.
#[must_use]
pub fn effective_limit(requested: Option<u64>) -> u64 {
    requested
        .unwrap_or(DEFAULT_TRANSACTION_LIMIT)
        .clamp(1, MAX_TRANSACTION_LIMIT)
}
