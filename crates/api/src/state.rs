//! Application state shared across handlers.

use chrono::Duration;
use database::Database;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection.
    pub db: Database,
    /// Lifetime assigned to newly created sessions.
    pub session_ttl: Duration,
}

impl AppState {
    /// Create new application state.
    pub fn new(db: Database, session_ttl: Duration) -> Self {
        Self { db, session_ttl }
    }
}
