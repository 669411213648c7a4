/// Database configuration and connection management
pub mod database;

/// Display settings and seed records from config.toml
pub mod settings;
