//! Unified error types for AturUang.
//!
//! `Error` covers configuration, storage, I/O, reply formatting and bot
//! framework failures.
//! Extraction outcomes have their own [`ExtractionError`], which separates
//! "could not reach the model" from "the model answered with nothing usable".

use thiserror::Error;

/// Crate-wide error type
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or invalid configuration value
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Amount was zero, negative or not finite
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: i64,
    },

    /// No account exists for the given id or alias
    #[error("Account not found: {id}")]
    AccountNotFound {
        /// The identifier that was looked up
        id: String,
    },

    /// Another account already uses this alias
    #[error("Alias '{alias}' is already taken")]
    AliasTaken {
        /// The requested alias
        alias: String,
    },

    /// Alias rejected before it reached storage
    #[error("Invalid alias: {reason}")]
    InvalidAlias {
        /// Why the alias was rejected
        reason: String,
    },

    /// Password rejected by the minimal length rule
    #[error("Invalid password: {reason}")]
    InvalidPassword {
        /// Why the password was rejected
        reason: String,
    },

    /// Storage failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// JSON (de)serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O failure (config file, listener socket)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Failure while building a reply string
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Serenity/Poise framework error
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Why an extraction produced no records.
///
/// Nothing here is retried; the user resending the message is the only recovery.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    /// The remote model call failed outright (network, auth, quota)
    #[error("model call failed: {0}")]
    Transport(String),

    /// The call succeeded but the model returned no content
    #[error("model returned an empty response")]
    EmptyResponse,

    /// Content came back but no valid expense JSON could be read from it
    #[error("malformed model output: {0}")]
    MalformedOutput(String),

    /// Valid JSON with zero expenses and no explicit error
    #[error("no expenses found in model output")]
    EmptyExtraction,
}

impl ExtractionError {
    /// Text shown to the end user.
    ///
    /// Transport and empty-response failures share the "try again" text; the
    /// other two share the "rephrase" text.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Transport(_) | Self::EmptyResponse => {
                "Waduh, lagi ada gangguan nyambung ke AI 😵\n\nCoba kirim ulang bentar lagi ya."
            }
            Self::MalformedOutput(_) | Self::EmptyExtraction => {
                "Hmm gue ga nangkep 🤔\n\nCoba gini: _makan soto 20k_"
            }
        }
    }
}

impl From<reqwest::Error> for ExtractionError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value.to_string())
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
