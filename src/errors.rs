//! Unified error type for the honey ledger and its HTTP surface.
//!
//! Every ledger rejection carries the specific reason it was refused so the API
//! layer can report it instead of a generic failure.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Amount was zero, negative, or paired with an empty purpose.
    #[error("Invalid amount {amount}: {reason}")]
    InvalidAmount {
        /// The rejected amount
        amount: i64,
        /// Why the amount was rejected
        reason: &'static str,
    },

    /// A debit would take the balance below zero.
    #[error("Insufficient honey balance: have {current}, need {required}")]
    InsufficientBalance {
        /// Balance at the time of the request
        current: i64,
        /// Amount the caller tried to spend
        required: i64,
    },

    /// The daily reward was already claimed on the current UTC day.
    #[error("Daily reward already claimed today (last claim at {last_claim})")]
    AlreadyClaimedToday {
        /// Timestamp of the previous successful claim
        last_claim: DateTime<Utc>,
    },

    /// No honey balance matched the lookup.
    #[error("Honey balance not found: {reference}")]
    BalanceNotFound {
        /// What was looked up, e.g. `"balance 3"` or `"user 7"`
        reference: String,
    },

    /// No user is registered under the given email.
    #[error("User not found: {email}")]
    UserNotFound {
        /// Email that was looked up
        email: String,
    },

    /// Signup attempted with an email that is already registered.
    #[error("User with email {email} already exists")]
    UserExists {
        /// Conflicting email
        email: String,
    },

    /// Request input failed validation.
    #[error("{message}")]
    Validation {
        /// Human-readable validation failure
        message: String,
    },

    /// Password reset token is unknown or expired.
    #[error("Invalid or expired reset token")]
    InvalidResetToken,

    /// Request carried no authenticated identity.
    #[error("Unauthorized")]
    Unauthorized,

    /// Underlying persistence failure.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] sea_orm::DbErr),

    /// Configuration could not be loaded.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },

    /// I/O failure (listener bind, config file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Password hashing failed.
    #[error("Password hashing error: {message}")]
    PasswordHash {
        /// Message from the hasher
        message: String,
    },
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
