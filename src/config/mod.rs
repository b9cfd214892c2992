/// Database configuration and connection management
pub mod database;

/// Service settings loaded from a TOML file
pub mod settings;

pub use settings::Settings;
