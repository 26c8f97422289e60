use std::sync::Arc;

use crate::accounts::tokens::TokenService;
use crate::chat::agent::ChatAgent;
use crate::matching::queue::NotificationQueue;
use crate::store::JobBoardStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable persistence. Default: `PgStore`.
    pub store: Arc<dyn JobBoardStore>,
    pub tokens: TokenService,
    /// Producer side of the job-match fan-out queue.
    pub notifications: NotificationQueue,
    /// `None` when no LLM key is configured; `/chat/` then answers 503.
    pub chat_agent: Option<Arc<dyn ChatAgent>>,
}
