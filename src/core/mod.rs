//! Core business logic.
//!
//! Framework-agnostic: nothing here knows about Discord or HTTP. The bot and
//! the dashboard call into these modules and format the results themselves.

pub mod account;
pub mod expense;
pub mod extraction;
pub mod intake;
pub mod period;
pub mod report;
pub mod summary;
pub mod vocabulary;
