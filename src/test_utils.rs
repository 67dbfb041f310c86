//! Shared test utilities for `AturUang`.
//!
//! Helpers for setting up test databases and building records with sensible
//! defaults.

use crate::{
    core::{expense, extraction::NormalizedExpense, vocabulary::Category},
    entities,
    errors::Result,
};
use chrono::{NaiveDate, Utc};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Shorthand for a calendar date. Panics on an invalid date.
#[allow(clippy::unwrap_used)]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// A validated expense with no annotations.
pub fn normalized(amount: i64, item: &str, category: Category, date: NaiveDate) -> NormalizedExpense {
    NormalizedExpense {
        amount,
        item: item.to_string(),
        category,
        place: None,
        with_person: None,
        mood: None,
        story: None,
        date,
    }
}

/// Persists a plain expense dated 2024-02-08, created now.
///
/// # Defaults
/// * `item`: "test item"
/// * `raw_message`: "test item"
pub async fn create_test_expense(
    db: &DatabaseConnection,
    owner_id: &str,
    amount: i64,
    category: Category,
) -> Result<entities::expense::Model> {
    let parsed = normalized(amount, "test item", category, date(2024, 2, 8));
    expense::create_expense(db, owner_id, &parsed, "test item", Utc::now()).await
}

/// Configuration with every default and a dummy API key.
#[allow(clippy::unwrap_used)]
pub fn test_config() -> crate::config::AppConfig {
    crate::config::AppConfig::from_sources(crate::config::app::FileConfig::default(), |key| {
        (key == "OPENROUTER_API_KEY").then(|| "test-key".to_string())
    })
    .unwrap()
}
