/// Application settings from the environment and `config.toml`
pub mod app;

/// Database configuration and connection management
pub mod database;

pub use app::{AppConfig, load_app_config};
