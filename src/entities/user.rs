//! User entity - The identity anchor for every honey balance.
//!
//! Users are created at signup. The email is unique and immutable as an identity;
//! profile fields (name, avatar, bee rank) may change. OAuth-only users carry no
//! password hash.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Login email, unique across all users
    #[sea_orm(unique)]
    pub email: String,
    /// Display name
    pub name: String,
    /// Optional avatar image reference
    pub image: Option<String>,
    /// Argon2 PHC hash, `None` for users who only sign in through OAuth
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// Community rank label shown on the profile
    pub bee_rank: String,
    /// Pending password reset token
    #[serde(skip_serializing)]
    pub reset_token: Option<String>,
    /// When the pending reset token stops being valid
    #[serde(skip_serializing)]
    pub reset_token_expiry: Option<DateTimeUtc>,
    /// When the account was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each user owns exactly one honey balance
    #[sea_orm(has_one = "super::honey_balance::Entity")]
    HoneyBalance,
}

impl Related<super::honey_balance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HoneyBalance.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
