//! Core business logic - framework-agnostic ledger and account operations.
//!
//! Nothing in here knows about HTTP; the API layer calls these functions with a
//! database handle and plain values.

/// Signup, credential checks and password reset
pub mod account;
/// Balance lookup, lazy creation and backfill
pub mod balance;
/// Credit and debit, the only balance mutations
pub mod ledger;
/// Argon2 password hashing
pub mod password;
/// Daily login reward
pub mod reward;
/// Transaction history queries
pub mod transaction;
