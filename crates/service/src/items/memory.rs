use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::domain::{Item, NewItem};
use super::repository::ItemRepository;
use crate::context::RequestContext;
use crate::errors::StoreError;

#[derive(Debug)]
struct Inner {
    items: HashMap<i64, Item>,
    next_id: i64,
}

/// In-memory item store.
///
/// The map and the id counter sit behind one `RwLock`, so id assignment and
/// insertion happen in the same critical section. Writers (`create`, `delete`)
/// take the write lock, `get` takes the read lock.
#[derive(Debug)]
pub struct MemoryItemStore {
    inner: RwLock<Inner>,
}

impl Default for MemoryItemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self { inner: RwLock::new(Inner { items: HashMap::new(), next_id: 1 }) }
    }

    /// The id the next successful `create` will assign.
    pub async fn next_id(&self) -> i64 {
        self.inner.read().await.next_id
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ItemRepository for MemoryItemStore {
    async fn create(&self, ctx: &RequestContext, item: NewItem) -> Result<Item, StoreError> {
        ctx.check()?;
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id += 1;
        let stored = Item { id, name: item.name };
        inner.items.insert(id, stored.clone());
        drop(inner);
        debug!(id, "item stored");
        Ok(stored)
    }

    async fn get(&self, ctx: &RequestContext, id: i64) -> Result<Item, StoreError> {
        ctx.check()?;
        let inner = self.inner.read().await;
        inner.items.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn delete(&self, ctx: &RequestContext, id: i64) -> Result<(), StoreError> {
        ctx.check()?;
        let mut inner = self.inner.write().await;
        match inner.items.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound),
        }
    }
}
