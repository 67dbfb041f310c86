//! Turn pipeline: model call, normalization, persistence, today's total.
//!
//! Each inbound message or photo runs once through this pipeline. Nothing is
//! persisted unless the whole extraction succeeds.

use crate::{
    ai::{ExpenseExtractor, ReferenceDates},
    core::{expense, extraction},
    entities::expense::Model,
    errors::{Error, ExtractionError},
};
use chrono::{NaiveDate, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};
use thiserror::Error as ThisError;
use tracing::{info, instrument, warn};

/// Stored in place of the message text for receipt photos
pub const PHOTO_SENTINEL: &str = "[foto struk]";

/// Outcome of one logged turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedExpenses {
    /// Records as persisted, in extraction order
    pub records: Vec<Model>,
    /// Sum of the owner's records dated today, including the new ones
    pub today_total: i64,
    /// Merchant read from a receipt
    pub merchant: Option<String>,
    /// Grand total read from a receipt
    pub receipt_total: Option<i64>,
}

/// Why a turn could not be logged
#[derive(Debug, ThisError)]
pub enum IntakeError {
    /// The model call or its output failed
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// Persisting or re-aggregating failed
    #[error(transparent)]
    Storage(#[from] Error),
}

/// Raw message stored for a receipt photo
#[must_use]
pub fn receipt_raw_message(caption: Option<&str>) -> String {
    match caption.map(str::trim).filter(|c| !c.is_empty()) {
        Some(caption) => format!("{PHOTO_SENTINEL} {caption}"),
        None => PHOTO_SENTINEL.to_string(),
    }
}

/// Logs the expenses described in a chat message.
#[instrument(skip(db, extractor, text))]
pub async fn log_text(
    db: &DatabaseConnection,
    extractor: &dyn ExpenseExtractor,
    owner_id: &str,
    text: &str,
    today: NaiveDate,
) -> Result<LoggedExpenses, IntakeError> {
    let raw = extractor
        .extract_from_text(text, ReferenceDates::for_today(today))
        .await?;
    let parsed = extraction::normalize(&raw, today)?;

    let records = persist(db, owner_id, &parsed, text).await?;
    let today_total = expense::total_in_range(db, owner_id, today, today).await?;
    info!(owner_id, count = records.len(), "Logged expenses from text");

    Ok(LoggedExpenses {
        records,
        today_total,
        merchant: None,
        receipt_total: None,
    })
}

/// Logs the expenses on a receipt photo.
#[instrument(skip(db, extractor, image, caption))]
pub async fn log_receipt(
    db: &DatabaseConnection,
    extractor: &dyn ExpenseExtractor,
    owner_id: &str,
    image: &[u8],
    mime_type: &str,
    caption: Option<&str>,
    today: NaiveDate,
) -> Result<LoggedExpenses, IntakeError> {
    let raw = extractor
        .extract_from_image(image, mime_type, caption, ReferenceDates::for_today(today))
        .await?;
    let receipt = extraction::normalize_receipt(&raw, today)?;

    let raw_message = receipt_raw_message(caption);
    let records = persist(db, owner_id, &receipt.expenses, &raw_message).await?;
    let today_total = expense::total_in_range(db, owner_id, today, today).await?;
    info!(owner_id, count = records.len(), merchant = ?receipt.merchant, "Logged expenses from receipt");

    Ok(LoggedExpenses {
        records,
        today_total,
        merchant: receipt.merchant,
        receipt_total: receipt.total,
    })
}

/// Writes the whole batch in one transaction; a failing record leaves none behind.
async fn persist(
    db: &DatabaseConnection,
    owner_id: &str,
    parsed: &[extraction::NormalizedExpense],
    raw_message: &str,
) -> Result<Vec<Model>, Error> {
    let txn = db.begin().await?;

    let mut records = Vec::with_capacity(parsed.len());
    for item in parsed {
        match expense::create_expense(&txn, owner_id, item, raw_message, Utc::now()).await {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(owner_id, "Rolling back expense batch: {}", e);
                txn.rollback().await?;
                return Err(e);
            }
        }
    }

    txn.commit().await?;
    Ok(records)
}
