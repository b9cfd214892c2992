//! Ledger operations - The only code that changes a Honey balance.
//!
//! Every credit and debit updates the balance row and appends a transaction row in the
//! same database transaction, so `balance == total_earned - total_spent` holds after
//! every commit and a failed operation leaves both tables untouched.
//!
//! Balance arithmetic is done in SQL (`balance = balance + ?`) rather than by writing
//! back a value read earlier, and debits only match rows that can afford them
//! (`WHERE balance >= ?`). Two concurrent debits therefore cannot overdraw a balance.

use crate::{
    core::balance::get_balance_by_id,
    entities::{Direction, HoneyBalance, honey_balance, honey_transaction},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{Set, TransactionTrait, prelude::*, sea_query::Expr};
use tracing::{info, warn};

/// Source label recorded on debits.
pub const PURCHASE_SOURCE: &str = "purchase";

/// Outcome of a successful credit or debit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    /// Balance after the operation committed
    pub balance: honey_balance::Model,
    /// Transaction row recording the change
    pub transaction: honey_transaction::Model,
}

fn check_positive(amount: i64) -> Result<()> {
    if amount <= 0 {
        return Err(Error::InvalidAmount {
            amount,
            reason: "amount must be greater than zero",
        });
    }
    Ok(())
}

/// Credits `amount` Honey to a balance and records an `earn` transaction.
///
/// # Errors
/// * `InvalidAmount` if `amount <= 0`
/// * `BalanceNotFound` if `balance_id` does not exist
pub async fn credit(
    db: &DatabaseConnection,
    balance_id: i64,
    amount: i64,
    source: &str,
    description: &str,
) -> Result<LedgerEntry> {
    check_positive(amount)?;

    let txn = db.begin().await?;
    let entry = apply_credit(&txn, balance_id, amount, source, description, Utc::now()).await?;
    txn.commit().await?;

    info!(
        balance_id,
        amount,
        source,
        new_balance = entry.balance.balance,
        "Credited honey"
    );
    Ok(entry)
}

/// Spends `amount` Honey from a balance and records a `spend` transaction.
///
/// The sufficiency check and the decrement are one conditional `UPDATE`; if it
/// matches no row, nothing is written.
///
/// # Errors
/// * `InvalidAmount` if `amount <= 0` or `purpose` is blank
/// * `InsufficientBalance` if the balance is below `amount`
/// * `BalanceNotFound` if `balance_id` does not exist
pub async fn debit(
    db: &DatabaseConnection,
    balance_id: i64,
    amount: i64,
    purpose: &str,
) -> Result<LedgerEntry> {
    check_positive(amount)?;
    let purpose = purpose.trim();
    if purpose.is_empty() {
        return Err(Error::InvalidAmount {
            amount,
            reason: "purpose is required",
        });
    }

    let txn = db.begin().await?;

    let updated = HoneyBalance::update_many()
        .col_expr(
            honey_balance::Column::Balance,
            Expr::col(honey_balance::Column::Balance).sub(amount),
        )
        .col_expr(
            honey_balance::Column::TotalSpent,
            Expr::col(honey_balance::Column::TotalSpent).add(amount),
        )
        .filter(honey_balance::Column::Id.eq(balance_id))
        .filter(honey_balance::Column::Balance.gte(amount))
        .exec(&txn)
        .await?;

    if updated.rows_affected == 0 {
        let current = get_balance_by_id(&txn, balance_id).await?;
        warn!(
            balance_id,
            amount,
            current = current.balance,
            "Rejected debit: insufficient balance"
        );
        return Err(Error::InsufficientBalance {
            current: current.balance,
            required: amount,
        });
    }

    let description = format!("Spent on {purpose} ({amount} Honey)");
    let transaction = record_transaction(
        &txn,
        balance_id,
        amount,
        Direction::Spend,
        PURCHASE_SOURCE,
        &description,
        Utc::now(),
    )
    .await?;
    let balance = get_balance_by_id(&txn, balance_id).await?;

    txn.commit().await?;

    info!(
        balance_id,
        amount,
        purpose,
        new_balance = balance.balance,
        "Debited honey"
    );
    Ok(LedgerEntry {
        balance,
        transaction,
    })
}

/// Credit inside a caller-owned transaction.
///
/// Used by operations that must bundle a credit with other writes (daily reward,
/// signup bonus). The caller commits.
pub(crate) async fn apply_credit<C>(
    db: &C,
    balance_id: i64,
    amount: i64,
    source: &str,
    description: &str,
    at: DateTime<Utc>,
) -> Result<LedgerEntry>
where
    C: ConnectionTrait,
{
    check_positive(amount)?;

    let updated = HoneyBalance::update_many()
        .col_expr(
            honey_balance::Column::Balance,
            Expr::col(honey_balance::Column::Balance).add(amount),
        )
        .col_expr(
            honey_balance::Column::TotalEarned,
            Expr::col(honey_balance::Column::TotalEarned).add(amount),
        )
        .filter(honey_balance::Column::Id.eq(balance_id))
        .exec(db)
        .await?;

    if updated.rows_affected == 0 {
        return Err(Error::BalanceNotFound {
            reference: format!("balance {balance_id}"),
        });
    }

    let transaction = record_transaction(
        db,
        balance_id,
        amount,
        Direction::Earn,
        source,
        description,
        at,
    )
    .await?;
    let balance = get_balance_by_id(db, balance_id).await?;

    Ok(LedgerEntry {
        balance,
        transaction,
    })
}

async fn record_transaction<C>(
    db: &C,
    balance_id: i64,
    amount: i64,
    direction: Direction,
    source: &str,
    description: &str,
    at: DateTime<Utc>,
) -> Result<honey_transaction::Model>
where
    C: ConnectionTrait,
{
    let row = honey_transaction::ActiveModel {
        balance_id: Set(balance_id),
        amount: Set(amount),
        direction: Set(direction),
        source: Set(source.to_string()),
        description: Set(description.to_string()),
        created_at: Set(at),
        ..Default::default()
    };

    row.insert(db).await.map_err(Into::into)
}
