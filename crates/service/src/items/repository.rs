use async_trait::async_trait;

use super::domain::{Item, NewItem};
use crate::context::RequestContext;
use crate::errors::StoreError;

/// Storage abstraction for items.
///
/// Implementations must check `ctx` before touching shared state and may only
/// report `NotFound`, `Canceled`, `DeadlineExceeded` or `Backend`.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn create(&self, ctx: &RequestContext, item: NewItem) -> Result<Item, StoreError>;
    async fn get(&self, ctx: &RequestContext, id: i64) -> Result<Item, StoreError>;
    async fn delete(&self, ctx: &RequestContext, id: i64) -> Result<(), StoreError>;
}

/// Scripted repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Echoes its input back, or fails every call with a forced error.
    /// Counts calls so tests can assert the store was never reached.
    #[derive(Default)]
    pub struct MockItemRepository {
        calls: AtomicUsize,
        forced_error: Mutex<Option<StoreError>>,
    }

    impl MockItemRepository {
        pub fn failing(err: StoreError) -> Self {
            Self { calls: AtomicUsize::new(0), forced_error: Mutex::new(Some(err)) }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn record(&self) -> Result<(), StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let forced = self.forced_error.lock().map_err(|e| StoreError::Backend(e.to_string()))?;
            match forced.as_ref() {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl ItemRepository for MockItemRepository {
        async fn create(&self, _ctx: &RequestContext, item: NewItem) -> Result<Item, StoreError> {
            self.record()?;
            Ok(Item { id: 1, name: item.name })
        }

        async fn get(&self, _ctx: &RequestContext, id: i64) -> Result<Item, StoreError> {
            self.record()?;
            Ok(Item { id, name: String::new() })
        }

        async fn delete(&self, _ctx: &RequestContext, _id: i64) -> Result<(), StoreError> {
            self.record()
        }
    }
}
