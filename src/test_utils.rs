//! Shared test utilities for the honey ledger.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{balance, ledger},
    entities::{honey_balance, user},
    errors::Result,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use std::sync::Arc;
use tempfile::TempDir;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a file-backed `SQLite` database served by up to `max_connections` pooled
/// connections, for tests where operations must really run side by side.
///
/// `sqlite::memory:` is limited to a single connection, which serializes everything.
/// Keep the returned directory alive while the connection is in use.
pub async fn setup_pooled_test_db(
    max_connections: u32,
) -> Result<(TempDir, Arc<DatabaseConnection>)> {
    let dir = tempfile::tempdir()?;
    let url = format!(
        "sqlite://{}?mode=rwc",
        dir.path().join("ledger.sqlite").display()
    );
    let mut options = ConnectOptions::new(url);
    options.max_connections(max_connections).sqlx_logging(false);

    let db = Database::connect(options).await?;
    crate::config::database::create_tables(&db).await?;
    Ok((dir, Arc::new(db)))
}

/// Inserts a user directly, without a balance or password.
///
/// # Defaults
/// * `name`: "Test Bee"
/// * `bee_rank`: "Worker Bee"
pub async fn create_test_user(db: &DatabaseConnection, email: &str) -> Result<user::Model> {
    let model = user::ActiveModel {
        email: Set(email.to_string()),
        name: Set("Test Bee".to_string()),
        image: Set(None),
        password_hash: Set(None),
        bee_rank: Set(crate::core::account::DEFAULT_BEE_RANK.to_string()),
        reset_token: Set(None),
        reset_token_expiry: Set(None),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    Ok(model.insert(db).await?)
}

/// Creates a user and their (empty) balance.
pub async fn create_user_with_balance(
    db: &DatabaseConnection,
    email: &str,
) -> Result<(user::Model, honey_balance::Model)> {
    let user = create_test_user(db, email).await?;
    let balance = balance::ensure_balance(db, user.id).await?;
    Ok((user, balance))
}

/// Sets up a database with one user holding an empty balance.
/// Returns (db, user, balance) for common ledger scenarios.
pub async fn setup_with_balance()
-> Result<(DatabaseConnection, user::Model, honey_balance::Model)> {
    let db = setup_test_db().await?;
    let (user, balance) = create_user_with_balance(&db, "bee@zista.app").await?;
    Ok((db, user, balance))
}

/// Like [`setup_with_balance`] but credits `amount` first.
pub async fn setup_with_funded_balance(
    amount: i64,
) -> Result<(DatabaseConnection, user::Model, honey_balance::Model)> {
    let (db, user, balance) = setup_with_balance().await?;
    let funded = ledger::credit(&db, balance.id, amount, "test", "Test funding").await?;
    Ok((db, user, funded.balance))
}
