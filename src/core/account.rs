//! Account operations - signup, credential checks and password reset.
//!
//! Signup creates the user, their Honey balance and the welcome bonus in a single
//! store transaction, so a new account never exists without its balance.

use crate::{
    core::{
        balance::ensure_balance,
        ledger::apply_credit,
        password::{hash_password, validate_password, verify_password},
    },
    entities::{User, honey_balance, honey_transaction, user},
    errors::{Error, Result},
};
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use sea_orm::{PaginatorTrait, Set, SqlErr, TransactionTrait, prelude::*};
use tracing::{info, warn};

/// Source label of the signup bonus transaction.
pub const WELCOME_BONUS_SOURCE: &str = "welcome_bonus";
/// Description of the signup bonus transaction.
pub const WELCOME_BONUS_DESCRIPTION: &str = "Welcome to Zista!";
/// Rank given to every new account.
pub const DEFAULT_BEE_RANK: &str = "Worker Bee";

/// Everything created by a successful signup.
#[derive(Debug, Clone)]
pub struct SignupResult {
    /// The new user
    pub user: user::Model,
    /// The user's balance after the welcome bonus
    pub balance: honey_balance::Model,
    /// The welcome bonus transaction, absent when the bonus is configured to zero
    pub welcome_transaction: Option<honey_transaction::Model>,
}

/// Finds a user by exact email.
pub async fn find_user_by_email<C>(db: &C, email: &str) -> Result<Option<user::Model>>
where
    C: ConnectionTrait,
{
    User::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Number of registered users.
pub async fn count_users(db: &DatabaseConnection) -> Result<u64> {
    User::find().count(db).await.map_err(Into::into)
}

/// Registers a credentials user and grants the welcome bonus.
///
/// # Errors
/// * `Validation` if a field is blank or the password is too short
/// * `UserExists` if the email is already registered
pub async fn sign_up(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
    password: &str,
    welcome_bonus: i64,
) -> Result<SignupResult> {
    let name = name.trim();
    let email = email.trim();
    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err(Error::Validation {
            message: "Missing required fields".to_string(),
        });
    }
    validate_password(password)?;

    if find_user_by_email(db, email).await?.is_some() {
        return Err(Error::UserExists {
            email: email.to_string(),
        });
    }

    let password_hash = hash_password(password)?;
    let now = Utc::now();

    let txn = db.begin().await?;

    let new_user = user::ActiveModel {
        email: Set(email.to_string()),
        name: Set(name.to_string()),
        image: Set(None),
        password_hash: Set(Some(password_hash)),
        bee_rank: Set(DEFAULT_BEE_RANK.to_string()),
        reset_token: Set(None),
        reset_token_expiry: Set(None),
        created_at: Set(now),
        ..Default::default()
    };
    let user = new_user.insert(&txn).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => Error::UserExists {
            email: email.to_string(),
        },
        _ => Error::from(e),
    })?;

    let mut balance = ensure_balance(&txn, user.id).await?;
    let mut welcome_transaction = None;
    if welcome_bonus > 0 {
        let entry = apply_credit(
            &txn,
            balance.id,
            welcome_bonus,
            WELCOME_BONUS_SOURCE,
            WELCOME_BONUS_DESCRIPTION,
            now,
        )
        .await?;
        balance = entry.balance;
        welcome_transaction = Some(entry.transaction);
    }

    txn.commit().await?;

    info!(user_id = user.id, email = %user.email, "Account created");
    Ok(SignupResult {
        user,
        balance,
        welcome_transaction,
    })
}

/// Checks an email/password pair. Returns the user when the password matches.
///
/// Users without a password hash (OAuth-only) never authenticate this way.
pub async fn authenticate(
    db: &DatabaseConnection,
    email: &str,
    password: &str,
) -> Result<Option<user::Model>> {
    let Some(user) = find_user_by_email(db, email.trim()).await? else {
        return Ok(None);
    };
    let Some(hash) = user.password_hash.as_deref() else {
        return Ok(None);
    };

    if verify_password(password, hash)? {
        Ok(Some(user))
    } else {
        warn!(email = %user.email, "Rejected credentials");
        Ok(None)
    }
}

fn generate_reset_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Issues a password reset token valid for `ttl`.
///
/// Returns `None` when no user has that email; callers must not reveal the
/// difference to the requester.
pub async fn request_password_reset(
    db: &DatabaseConnection,
    email: &str,
    ttl: Duration,
    now: DateTime<Utc>,
) -> Result<Option<String>> {
    let Some(user) = find_user_by_email(db, email.trim()).await? else {
        info!("Password reset requested for unknown email");
        return Ok(None);
    };

    let token = generate_reset_token();
    let email = user.email.clone();
    let mut active: user::ActiveModel = user.into();
    active.reset_token = Set(Some(token.clone()));
    active.reset_token_expiry = Set(Some(now + ttl));
    active.update(db).await?;

    // Delivery is out of band; the token is logged for the operator.
    info!(%email, reset_token = %token, "Password reset token issued");
    Ok(Some(token))
}

/// Redeems a reset token and sets a new password.
///
/// # Errors
/// * `InvalidResetToken` if the token is unknown or expired
/// * `Validation` if the new password is too short
pub async fn reset_password(
    db: &DatabaseConnection,
    token: &str,
    new_password: &str,
    now: DateTime<Utc>,
) -> Result<user::Model> {
    validate_password(new_password)?;

    let token = token.trim();
    if token.is_empty() {
        return Err(Error::InvalidResetToken);
    }

    let user = User::find()
        .filter(user::Column::ResetToken.eq(token))
        .one(db)
        .await?
        .filter(|found| found.reset_token_expiry.is_some_and(|expiry| expiry > now))
        .ok_or(Error::InvalidResetToken)?;

    let mut active: user::ActiveModel = user.into();
    active.password_hash = Set(Some(hash_password(new_password)?));
    active.reset_token = Set(None);
    active.reset_token_expiry = Set(None);
    let updated = active.update(db).await?;

    info!(email = %updated.email, "Password reset");
    Ok(updated)
}
