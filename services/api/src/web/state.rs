//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use writing_assistant_core::WritingAssistant;

/// Upper bound for `GET /history?limit=`.
pub const MAX_HISTORY_LIMIT: u32 = 200;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
///
/// It holds no per-user data; every request is independent.
#[derive(Clone)]
pub struct AppState {
    pub assistant: WritingAssistant,
    pub default_history_limit: u32,
}

impl AppState {
    pub fn new(assistant: WritingAssistant, default_history_limit: u32) -> Self {
        Self {
            assistant,
            default_history_limit,
        }
    }

    /// Resolves the requested history size, falling back to the configured default.
    pub fn history_limit(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.default_history_limit)
            .min(MAX_HISTORY_LIMIT)
    }
}
