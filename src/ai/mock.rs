//! Scripted extractor for tests

use super::{CreditBalance, ExpenseExtractor, ReferenceDates};
use crate::errors::ExtractionError;
use async_trait::async_trait;
use std::{collections::VecDeque, sync::Mutex};

/// One recorded extractor call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    /// `extract_from_text(message, ..)`
    Text(String),
    /// `extract_from_image(.., mime_type, caption, ..)`
    Image {
        mime_type: String,
        caption: Option<String>,
    },
}

/// Replays queued replies in order and records every call
#[derive(Debug, Default)]
pub struct MockExtractor {
    replies: Mutex<VecDeque<Result<String, ExtractionError>>>,
    calls: Mutex<Vec<(MockCall, ReferenceDates)>>,
    credits: Option<CreditBalance>,
}

impl MockExtractor {
    /// Extractor that answers every call with the given replies, in order.
    pub fn with_replies<I>(replies: I) -> Self
    where
        I: IntoIterator<Item = Result<String, ExtractionError>>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Extractor that answers once with `reply`.
    pub fn replying(reply: &str) -> Self {
        Self::with_replies([Ok(reply.to_string())])
    }

    /// Extractor that fails once with `error`.
    pub fn failing(error: ExtractionError) -> Self {
        Self::with_replies([Err(error)])
    }

    /// Sets the balance reported by `credit_balance`.
    pub fn with_credits(mut self, credits: CreditBalance) -> Self {
        self.credits = Some(credits);
        self
    }

    /// Calls made so far.
    pub fn calls(&self) -> Vec<(MockCall, ReferenceDates)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn next_reply(&self, call: MockCall, dates: ReferenceDates) -> Result<String, ExtractionError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((call, dates));
        }
        self.replies
            .lock()
            .ok()
            .and_then(|mut r| r.pop_front())
            .unwrap_or(Err(ExtractionError::EmptyResponse))
    }
}

#[async_trait]
impl ExpenseExtractor for MockExtractor {
    async fn extract_from_text(
        &self,
        message: &str,
        dates: ReferenceDates,
    ) -> Result<String, ExtractionError> {
        self.next_reply(MockCall::Text(message.to_string()), dates)
    }

    async fn extract_from_image(
        &self,
        _image: &[u8],
        mime_type: &str,
        caption: Option<&str>,
        dates: ReferenceDates,
    ) -> Result<String, ExtractionError> {
        self.next_reply(
            MockCall::Image {
                mime_type: mime_type.to_string(),
                caption: caption.map(str::to_string),
            },
            dates,
        )
    }

    async fn credit_balance(&self) -> Option<CreditBalance> {
        self.credits
    }
}
