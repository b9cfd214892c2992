//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod honey_balance;
pub mod honey_transaction;
pub mod user;

// Re-export specific types to avoid conflicts
pub use honey_balance::{
    Column as HoneyBalanceColumn, Entity as HoneyBalance, Model as HoneyBalanceModel,
};
pub use honey_transaction::{
    Column as HoneyTransactionColumn, Direction, Entity as HoneyTransaction,
    Model as HoneyTransactionModel,
};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
