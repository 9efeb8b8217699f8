use std::sync::Arc;
use std::time::Duration;

use service::context::RequestContext;
use service::items::{ItemRepository, ItemService, MemoryItemStore};
use tokio_util::sync::CancellationToken;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub items: ItemService<dyn ItemRepository>,
    pub request_timeout: Duration,
    /// Cancelled when the server starts shutting down.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(repo: Arc<dyn ItemRepository>, request_timeout: Duration, shutdown: CancellationToken) -> Self {
        Self { items: ItemService::new(repo), request_timeout, shutdown }
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory(request_timeout: Duration, shutdown: CancellationToken) -> Self {
        Self::new(Arc::new(MemoryItemStore::new()), request_timeout, shutdown)
    }

    /// Per-request signal: the configured timeout plus server shutdown.
    pub fn request_context(&self) -> RequestContext {
        RequestContext::with_timeout(self.request_timeout).with_cancellation(self.shutdown.child_token())
    }
}
