//! API request handlers.

/// Pipeline execution handler.
pub mod analyze;
/// Liveness handler.
pub mod health;
