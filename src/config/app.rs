//! Application configuration.
//!
//! Values come from the environment (after `.env` is loaded) with an optional
//! `config.toml` supplying defaults underneath. The Discord token is not part of
//! this struct; `main` reads it right before starting the bot.

use crate::errors::{Error, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_TEXT_MODEL: &str = "anthropic/claude-3.5-haiku";
const DEFAULT_VISION_MODEL: &str = "anthropic/claude-3.5-sonnet";
const DEFAULT_DATABASE_URL: &str = "sqlite://data/aturuang.sqlite?mode=rwc";
const DEFAULT_WEB_PORT: u16 = 3000;
const DEFAULT_WEB_URL: &str = "http://localhost:3000";
/// Western Indonesia Time
const DEFAULT_UTC_OFFSET_HOURS: i32 = 7;

/// Optional settings read from `config.toml`. Every field may be omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// OpenRouter-compatible API base URL
    pub base_url: Option<String>,
    /// Model used for text extraction
    pub text_model: Option<String>,
    /// Model used for receipt photos
    pub vision_model: Option<String>,
    /// SeaORM connection string
    pub database_url: Option<String>,
    /// Dashboard listen port
    pub web_port: Option<u16>,
    /// Public dashboard URL shown to users
    pub web_url: Option<String>,
    /// Hours east of UTC used to decide what "today" is
    pub utc_offset_hours: Option<i32>,
}

/// Resolved application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// OpenRouter-compatible API base URL, without trailing slash
    pub base_url: String,
    /// Bearer key for the model provider
    pub api_key: String,
    /// Model used for text extraction
    pub text_model: String,
    /// Model used for receipt photos
    pub vision_model: String,
    /// SeaORM connection string
    pub database_url: String,
    /// Dashboard listen port
    pub web_port: u16,
    /// Public dashboard URL shown to users
    pub web_url: String,
    /// Hours east of UTC used to decide what "today" is
    pub utc_offset_hours: i32,
}

impl AppConfig {
    /// Builds the configuration from file defaults and an environment lookup.
    ///
    /// `env` returns `None` for unset variables. Environment values win over the
    /// file; built-in defaults fill whatever is left.
    pub fn from_sources<F>(file: FileConfig, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = env("OPENROUTER_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::Config {
                message: "OPENROUTER_API_KEY is required".to_string(),
            })?;

        let web_port = match env("WEB_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| Error::Config {
                message: format!("WEB_PORT must be a port number: {e}"),
            })?,
            None => file.web_port.unwrap_or(DEFAULT_WEB_PORT),
        };

        let utc_offset_hours = match env("UTC_OFFSET_HOURS") {
            Some(raw) => raw.trim().parse::<i32>().map_err(|e| Error::Config {
                message: format!("UTC_OFFSET_HOURS must be an integer: {e}"),
            })?,
            None => file.utc_offset_hours.unwrap_or(DEFAULT_UTC_OFFSET_HOURS),
        };
        if !(-12..=14).contains(&utc_offset_hours) {
            return Err(Error::Config {
                message: format!("UTC_OFFSET_HOURS out of range: {utc_offset_hours}"),
            });
        }

        let base_url = env("OPENROUTER_BASE_URL")
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            text_model: env("TEXT_MODEL")
                .or(file.text_model)
                .unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string()),
            vision_model: env("VISION_MODEL")
                .or(file.vision_model)
                .unwrap_or_else(|| DEFAULT_VISION_MODEL.to_string()),
            database_url: env("DATABASE_URL")
                .or(file.database_url)
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            web_port,
            web_url: env("WEB_URL")
                .or(file.web_url)
                .unwrap_or_else(|| DEFAULT_WEB_URL.to_string()),
            utc_offset_hours,
        })
    }

    /// The configured local offset. Falls back to UTC if the hours are unusable.
    #[must_use]
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_hours * 3600).unwrap_or_else(|| Utc.fix())
    }

    /// Local calendar date of `now` in the configured offset.
    #[must_use]
    pub fn local_date(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.offset()).date_naive()
    }

    /// Today's local calendar date.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.local_date(Utc::now())
    }
}

/// Parses a `config.toml` file.
pub fn load_file_config<P: AsRef<Path>>(path: P) -> Result<FileConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads the application configuration from `./config.toml` (if present) and the
/// process environment.
pub fn load_app_config() -> Result<AppConfig> {
    let path = Path::new("config.toml");
    let file = if path.exists() {
        tracing::debug!("Loading configuration defaults from {:?}", path);
        load_file_config(path)?
    } else {
        FileConfig::default()
    };
    AppConfig::from_sources(file, |key| std::env::var(key).ok())
}
