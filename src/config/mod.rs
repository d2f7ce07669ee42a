/// Database configuration and connection management
pub mod database;

/// Server settings loaded from config.toml
pub mod settings;
