//! Route handlers grouped by resource.

/// Signup, login, logout and password reset
pub mod auth;
/// Store connectivity check
pub mod health;
/// Daily reward, spending and history
pub mod honey;
/// Current user profile
pub mod user;
