//! Application state shared across handlers.

use std::sync::Arc;

use crate::bank::QuestionBank;
use crate::session::SessionStore;

/// Origin the quiz frontend is served from.
pub const DEFAULT_ALLOWED_ORIGIN: &str = "https://uraniumcore.github.io";

/// CORS configuration for the API layer.
#[derive(Clone, Debug)]
pub struct CorsState {
    /// The single origin allowed to call the API from a browser.
    pub allowed_origin: String,
}

impl Default for CorsState {
    fn default() -> Self {
        Self {
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
        }
    }
}

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Test attempts keyed by test id.
    pub sessions: Arc<SessionStore>,
    /// Read-only question bank.
    pub bank: QuestionBank,
    /// CORS configuration.
    pub cors: CorsState,
}

impl AppState {
    /// Create new application state.
    pub fn new(sessions: Arc<SessionStore>, bank: QuestionBank) -> Self {
        Self {
            sessions,
            bank,
            cors: CorsState::default(),
        }
    }

    /// Override the CORS configuration.
    pub fn with_cors(mut self, cors: CorsState) -> Self {
        self.cors = cors;
        self
    }
}
