//! Honey balance entity - One Honey account per user.
//!
//! Invariants maintained by `core::ledger`: `balance == total_earned - total_spent`
//! and `balance >= 0`. Rows are never edited outside the ledger operations.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Honey balance database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "honey_balances")]
pub struct Model {
    /// Unique identifier for the balance
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning user; unique so a user can never hold two balances
    #[sea_orm(unique)]
    pub user_id: i64,
    /// Current spendable Honey
    pub balance: i64,
    /// Lifetime Honey earned
    pub total_earned: i64,
    /// Lifetime Honey spent
    pub total_spent: i64,
    /// Number of successful daily-reward claims
    pub streak_days: i32,
    /// When the daily reward was last claimed
    pub last_daily_reward: Option<DateTimeUtc>,
}

/// Defines relationships between Balance and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each balance belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    /// One balance has many transactions
    #[sea_orm(has_many = "super::honey_transaction::Entity")]
    Transactions,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::honey_transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
