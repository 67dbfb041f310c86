//! Discord event handlers
//!
//! Handlers for events that are not commands: free-text expense messages and
//! receipt photos.

/// Free-text and photo message logging
pub mod message;
