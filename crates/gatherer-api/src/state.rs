//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use gatherer_core::config::AppConfig;
use gatherer_service::StorageCoordinator;

/// Application state passed to every handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Blob + record coordinator
    pub coordinator: Arc<StorageCoordinator>,
    /// Process start, for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    /// Creates the state, stamping the start time.
    pub fn new(config: Arc<AppConfig>, coordinator: Arc<StorageCoordinator>) -> Self {
        Self {
            config,
            coordinator,
            started_at: Instant::now(),
        }
    }
}
