//! Language model gateway.
//!
//! Sends a user's message (or receipt photo) together with the fixed
//! extraction instructions to a remote chat-completions model and hands back
//! the raw reply text. Parsing that text is the normalizer's job
//! ([`crate::core::extraction`]).
//!
//! # Architecture
//!
//! - [`ExpenseExtractor`] trait: the seam the intake pipeline depends on
//! - [`OpenRouterBackend`]: OpenAI-compatible HTTP implementation
//! - `MockExtractor` (tests only): canned replies
//!
//! No call is retried. A failed call surfaces as
//! [`ExtractionError::Transport`], a successful call without content as
//! [`ExtractionError::EmptyResponse`].

pub mod openrouter;
pub mod prompts;

#[cfg(test)]
pub mod mock;

pub use openrouter::OpenRouterBackend;

use crate::errors::ExtractionError;
use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use serde::Serialize;

/// The two dates the model needs to resolve "tadi" and "kemarin" without a clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceDates {
    /// The user's local today
    pub today: NaiveDate,
    /// The day before `today`
    pub yesterday: NaiveDate,
}

impl ReferenceDates {
    /// Builds the pair from the user's local today.
    #[must_use]
    pub fn for_today(today: NaiveDate) -> Self {
        Self {
            today,
            yesterday: today.checked_sub_days(Days::new(1)).unwrap_or(today),
        }
    }
}

/// Prepaid credit on the model provider account
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CreditBalance {
    /// Credit granted in total
    pub total: f64,
    /// Credit spent so far
    pub used: f64,
    /// `total - used`
    pub remaining: f64,
}

/// Interface to the remote extraction model.
///
/// Implementations must be `Send + Sync` so one instance can be shared by the
/// bot and every concurrent user turn.
#[async_trait]
pub trait ExpenseExtractor: Send + Sync {
    /// Asks the text model to extract expenses from a chat message.
    async fn extract_from_text(
        &self,
        message: &str,
        dates: ReferenceDates,
    ) -> Result<String, ExtractionError>;

    /// Asks the vision model to extract expenses from a receipt photo.
    ///
    /// `mime_type` is the image's content type (e.g. `image/jpeg`).
    async fn extract_from_image(
        &self,
        image: &[u8],
        mime_type: &str,
        caption: Option<&str>,
        dates: ReferenceDates,
    ) -> Result<String, ExtractionError>;

    /// Remaining provider credit, or `None` when it cannot be determined.
    async fn credit_balance(&self) -> Option<CreditBalance>;
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_reference_dates_cross_month_boundary() {
        let dates = ReferenceDates::for_today(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(dates.yesterday, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }
}
