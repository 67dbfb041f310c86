//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Dashboard account commands
pub mod account;

/// Expense logging and undo commands
pub mod expense;

/// General utility commands
pub mod general;

/// Spending report commands
pub mod report;

// Export commands
pub use account::*;
pub use expense::*;
pub use general::*;
pub use report::*;
