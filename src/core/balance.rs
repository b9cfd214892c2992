//! Balance store access - Lookup and lazy creation of per-user Honey balances.
//!
//! `ensure_balance` is the single place a balance row is created. It relies on the
//! unique index on `honey_balances.user_id` and an insert-or-ignore, so concurrent
//! first touches for the same user still produce exactly one row.

use crate::{
    entities::{HoneyBalance, User, honey_balance, user},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, Set, prelude::*, sea_query::OnConflict};
use tracing::info;

/// Finds the balance owned by `user_id`, if one exists.
pub async fn find_balance_for_user<C>(db: &C, user_id: i64) -> Result<Option<honey_balance::Model>>
where
    C: ConnectionTrait,
{
    HoneyBalance::find()
        .filter(honey_balance::Column::UserId.eq(user_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a balance by its primary key.
pub async fn get_balance_by_id<C>(db: &C, balance_id: i64) -> Result<honey_balance::Model>
where
    C: ConnectionTrait,
{
    HoneyBalance::find_by_id(balance_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::BalanceNotFound {
            reference: format!("balance {balance_id}"),
        })
}

/// Returns the user's balance, creating an all-zero one first if it is missing.
///
/// Safe to call repeatedly and concurrently: a losing insert is ignored and the
/// winning row is read back.
pub async fn ensure_balance<C>(db: &C, user_id: i64) -> Result<honey_balance::Model>
where
    C: ConnectionTrait,
{
    if let Some(existing) = find_balance_for_user(db, user_id).await? {
        return Ok(existing);
    }

    let fresh = honey_balance::ActiveModel {
        user_id: Set(user_id),
        balance: Set(0),
        total_earned: Set(0),
        total_spent: Set(0),
        streak_days: Set(0),
        last_daily_reward: Set(None),
        ..Default::default()
    };

    let inserted = HoneyBalance::insert(fresh)
        .on_conflict(
            OnConflict::column(honey_balance::Column::UserId)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    if inserted > 0 {
        info!(user_id, "Created honey balance");
    }

    find_balance_for_user(db, user_id)
        .await?
        .ok_or_else(|| Error::BalanceNotFound {
            reference: format!("user {user_id}"),
        })
}

/// Creates a balance for every user that does not have one yet.
///
/// Run at startup so accounts created before balances existed are usable.
/// Returns the number of balances created.
pub async fn backfill_missing_balances<C>(db: &C) -> Result<usize>
where
    C: ConnectionTrait,
{
    let orphans: Vec<user::Model> = User::find()
        .left_join(HoneyBalance)
        .filter(honey_balance::Column::Id.is_null())
        .all(db)
        .await?;

    info!("Found {} users without honey balances", orphans.len());

    for orphan in &orphans {
        ensure_balance(db, orphan.id).await?;
        info!(email = %orphan.email, "Backfilled honey balance");
    }

    Ok(orphans.len())
}

/// Counts balance rows owned by a user. Used to check the one-balance-per-user rule.
pub async fn count_balances_for_user<C>(db: &C, user_id: i64) -> Result<u64>
where
    C: ConnectionTrait,
{
    HoneyBalance::find()
        .filter(honey_balance::Column::UserId.eq(user_id))
        .count(db)
        .await
        .map_err(Into::into)
}
