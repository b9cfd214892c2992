//! Honey transaction entity - Immutable audit trail of balance changes.
//!
//! The amount is always a positive magnitude; `direction` says whether it was
//! earned or spent. Rows are inserted by the ledger and never updated or deleted.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Whether a transaction added Honey to or removed Honey from a balance
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Honey credited to the balance
    #[sea_orm(string_value = "earn")]
    Earn,
    /// Honey debited from the balance
    #[sea_orm(string_value = "spend")]
    Spend,
}

/// Honey transaction database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "honey_transactions")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the transaction
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Balance this transaction belongs to
    pub balance_id: i64,
    /// Positive magnitude of the change
    pub amount: i64,
    /// Earn or spend
    #[serde(rename = "type")]
    pub direction: Direction,
    /// Category label, e.g. `"welcome_bonus"`, `"daily_login"`, `"purchase"`
    pub source: String,
    /// Human-readable description
    pub description: String,
    /// When the transaction was recorded
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Transaction and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each transaction belongs to one balance
    #[sea_orm(
        belongs_to = "super::honey_balance::Entity",
        from = "Column::BalanceId",
        to = "super::honey_balance::Column::Id"
    )]
    HoneyBalance,
}

impl Related<super::honey_balance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HoneyBalance.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
