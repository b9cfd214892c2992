//! Daily login reward.
//!
//! A balance may claim once per UTC calendar day. The reward is a 5 Honey base plus
//! 5 per streak day, with the streak bonus capped at 45 (50 Honey at most).
//!
//! The streak counts successful claims and is never reset when a day is skipped,
//! so it behaves as "total days claimed". That matches the behaviour the product has
//! always shipped; the tests pin it.

use crate::{
    core::{
        balance::get_balance_by_id,
        ledger::{LedgerEntry, apply_credit},
    },
    entities::{HoneyBalance, honey_balance, honey_transaction},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{TransactionTrait, prelude::*, sea_query::Expr};
use tracing::{info, warn};

/// Reward paid on every claim regardless of streak.
pub const BASE_REWARD: i64 = 5;
/// Extra Honey per streak day.
pub const STREAK_STEP: i64 = 5;
/// Ceiling on the streak bonus.
pub const MAX_STREAK_BONUS: i64 = 45;
/// Source label on daily reward transactions.
pub const DAILY_LOGIN_SOURCE: &str = "daily_login";

/// Outcome of a successful daily-reward claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimResult {
    /// Honey granted by this claim
    pub reward: i64,
    /// Balance after the claim
    pub balance: honey_balance::Model,
    /// Streak count after the claim
    pub streak: i32,
    /// Earn transaction recording the reward
    pub transaction: honey_transaction::Model,
}

/// Reward for a claim made while the balance has `streak_days` prior claims.
#[must_use]
pub fn reward_for_streak(streak_days: i32) -> i64 {
    let bonus = (i64::from(streak_days) * STREAK_STEP).min(MAX_STREAK_BONUS);
    BASE_REWARD + bonus.max(0)
}

/// Whether `last_claim` falls on the same UTC calendar day as `now`.
#[must_use]
pub fn claimed_today(last_claim: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    last_claim.is_some_and(|last| last.date_naive() == now.date_naive())
}

/// Claims the daily reward for a balance at time `now`.
///
/// In one store transaction: marks the claim (`last_daily_reward = now`,
/// `streak_days + 1`), credits the reward and records a `daily_login` transaction.
/// The claim marker is a compare-and-swap on the `streak_days` read beforehand, so of
/// several racing claims only one can succeed. It is the first statement of the
/// transaction, which lets `SQLite` queue writers instead of failing them as busy.
///
/// # Errors
/// * `AlreadyClaimedToday` if a claim was already made on `now`'s UTC day
/// * `BalanceNotFound` if `balance_id` does not exist
pub async fn claim_daily_reward(
    db: &DatabaseConnection,
    balance_id: i64,
    now: DateTime<Utc>,
) -> Result<ClaimResult> {
    let current = get_balance_by_id(db, balance_id).await?;
    if let Some(last_claim) = current
        .last_daily_reward
        .filter(|last| claimed_today(Some(*last), now))
    {
        warn!(balance_id, %last_claim, "Rejected daily reward: already claimed today");
        return Err(Error::AlreadyClaimedToday { last_claim });
    }

    let reward = reward_for_streak(current.streak_days);

    let txn = db.begin().await?;

    let marked = HoneyBalance::update_many()
        .col_expr(honey_balance::Column::LastDailyReward, Expr::value(now))
        .col_expr(
            honey_balance::Column::StreakDays,
            Expr::col(honey_balance::Column::StreakDays).add(1),
        )
        .filter(honey_balance::Column::Id.eq(balance_id))
        .filter(honey_balance::Column::StreakDays.eq(current.streak_days))
        .exec(&txn)
        .await?;

    if marked.rows_affected == 0 {
        // Another claim committed between our read and the marker update
        let winner = get_balance_by_id(&txn, balance_id).await?;
        let last_claim = winner.last_daily_reward.unwrap_or(now);
        warn!(balance_id, %last_claim, "Rejected daily reward: concurrent claim");
        return Err(Error::AlreadyClaimedToday { last_claim });
    }

    let description = format!("Daily login reward ({reward} Honey)");
    let LedgerEntry {
        balance,
        transaction,
    } = apply_credit(
        &txn,
        balance_id,
        reward,
        DAILY_LOGIN_SOURCE,
        &description,
        now,
    )
    .await?;

    txn.commit().await?;

    info!(
        balance_id,
        reward,
        streak = balance.streak_days,
        new_balance = balance.balance,
        "Claimed daily reward"
    );
    Ok(ClaimResult {
        reward,
        streak: balance.streak_days,
        balance,
        transaction,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::{balance::ensure_balance, transaction::list_transactions};
    use crate::entities::Direction;
    use crate::test_utils::*;
    use chrono::{Duration, TimeZone};
    use std::sync::Arc;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_reward_for_streak() {
        assert_eq!(reward_for_streak(0), 5);
        assert_eq!(reward_for_streak(1), 10);
        assert_eq!(reward_for_streak(2), 15);
        assert_eq!(reward_for_streak(8), 45);
        assert_eq!(reward_for_streak(9), 50);
        assert_eq!(reward_for_streak(10), 50);
        assert_eq!(reward_for_streak(365), 50);
    }

    #[test]
    fn test_claimed_today_uses_utc_calendar_day() {
        assert!(!claimed_today(None, at(5, 12)));
        assert!(claimed_today(Some(at(5, 0)), at(5, 23)));
        assert!(!claimed_today(Some(at(4, 23)), at(5, 0)));
        // Less than 24 hours apart but across midnight is a new day
        let late = at(4, 23) + Duration::minutes(59);
        assert!(!claimed_today(Some(late), at(5, 0)));
    }

    #[tokio::test]
    async fn test_first_claim() -> Result<()> {
        let (db, _user, balance) = setup_with_balance().await?;
        let now = at(1, 9);

        let claim = claim_daily_reward(&db, balance.id, now).await?;

        assert_eq!(claim.reward, 5);
        assert_eq!(claim.streak, 1);
        assert_eq!(claim.balance.balance, 5);
        assert_eq!(claim.balance.total_earned, 5);
        assert_eq!(claim.balance.last_daily_reward, Some(now));
        assert_eq!(claim.transaction.amount, 5);
        assert_eq!(claim.transaction.direction, Direction::Earn);
        assert_eq!(claim.transaction.source, DAILY_LOGIN_SOURCE);
        assert_eq!(claim.transaction.description, "Daily login reward (5 Honey)");
        assert_eq!(claim.transaction.created_at, now);

        Ok(())
    }

    #[tokio::test]
    async fn test_second_claim_same_day_rejected() -> Result<()> {
        let (db, _user, balance) = setup_with_balance().await?;

        let first = claim_daily_reward(&db, balance.id, at(1, 8)).await?;
        let result = claim_daily_reward(&db, balance.id, at(1, 22)).await;

        assert!(matches!(
            result.unwrap_err(),
            Error::AlreadyClaimedToday { last_claim } if last_claim == at(1, 8)
        ));

        let after = get_balance_by_id(&db, balance.id).await?;
        assert_eq!(after, first.balance);
        assert_eq!(after.streak_days, 1);
        assert_eq!(list_transactions(&db, balance.id, 20).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_streak_growth_over_three_days() -> Result<()> {
        let (db, _user, balance) = setup_with_balance().await?;

        let mut rewards = Vec::new();
        let mut streaks = Vec::new();
        for day in 1..=3 {
            let claim = claim_daily_reward(&db, balance.id, at(day, 10)).await?;
            rewards.push(claim.reward);
            streaks.push(claim.streak);
        }

        assert_eq!(rewards, vec![5, 10, 15]);
        assert_eq!(streaks, vec![1, 2, 3]);

        let after = get_balance_by_id(&db, balance.id).await?;
        assert_eq!(after.balance, 30);
        assert_eq!(after.total_earned, 30);

        Ok(())
    }

    #[tokio::test]
    async fn test_reward_caps_at_fifty() -> Result<()> {
        let (db, _user, balance) = setup_with_balance().await?;

        let mut rewards = Vec::new();
        for day in 1..=12 {
            rewards.push(claim_daily_reward(&db, balance.id, at(day, 7)).await?.reward);
        }

        assert_eq!(rewards[..10], [5, 10, 15, 20, 25, 30, 35, 40, 45, 50]);
        assert!(rewards[9..].iter().all(|reward| *reward == 50));

        Ok(())
    }

    #[tokio::test]
    async fn test_streak_not_reset_after_missed_days() -> Result<()> {
        let (db, _user, balance) = setup_with_balance().await?;

        claim_daily_reward(&db, balance.id, at(1, 10)).await?;
        claim_daily_reward(&db, balance.id, at(2, 10)).await?;

        // Skip a week; the streak keeps counting from where it was
        let claim = claim_daily_reward(&db, balance.id, at(10, 10)).await?;
        assert_eq!(claim.streak, 3);
        assert_eq!(claim.reward, 15);

        Ok(())
    }

    #[tokio::test]
    async fn test_claim_preserves_invariants_with_spending() -> Result<()> {
        let (db, _user, balance) = setup_with_funded_balance(100).await?;
        crate::core::ledger::debit(&db, balance.id, 40, "gift").await?;

        let claim = claim_daily_reward(&db, balance.id, at(3, 12)).await?;

        assert_eq!(claim.balance.balance, 65);
        assert_eq!(
            claim.balance.balance,
            claim.balance.total_earned - claim.balance.total_spent
        );

        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_claims_pay_once() -> Result<()> {
        let (_dir, db) = setup_pooled_test_db(8).await?;
        let user = create_test_user(&db, "bee@zista.app").await?;
        let balance_id = ensure_balance(db.as_ref(), user.id).await?.id;
        let now = at(1, 9);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let db = Arc::clone(&db);
                tokio::spawn(async move { claim_daily_reward(&db, balance_id, now).await })
            })
            .collect();

        let mut claimed = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(claim) => {
                    claimed += 1;
                    assert_eq!(claim.reward, 5);
                    assert_eq!(claim.streak, 1);
                }
                Err(err) => assert!(
                    matches!(err, Error::AlreadyClaimedToday { last_claim } if last_claim == now),
                    "unexpected claim error: {err}"
                ),
            }
        }
        assert_eq!(claimed, 1);

        let after = get_balance_by_id(db.as_ref(), balance_id).await?;
        assert_eq!(after.balance, 5);
        assert_eq!(after.streak_days, 1);
        assert_eq!(list_transactions(db.as_ref(), balance_id, 20).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_claim_unknown_balance() -> Result<()> {
        let db = setup_test_db().await?;

        let result = claim_daily_reward(&db, 404, at(1, 1)).await;
        assert!(matches!(result, Err(Error::BalanceNotFound { .. })));

        Ok(())
    }
}
