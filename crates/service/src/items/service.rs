use std::sync::Arc;

use tracing::{debug, error, instrument};

use super::domain::{Item, NewItem};
use super::repository::ItemRepository;
use crate::context::RequestContext;
use crate::errors::{ServiceError, StoreError};

/// Item business service independent of web framework.
///
/// Input validation happens here before the repository is touched, and every
/// repository failure is folded into [`ServiceError`] by [`normalize`].
pub struct ItemService<R: ItemRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: ItemRepository + ?Sized> Clone for ItemService<R> {
    fn clone(&self) -> Self {
        Self { repo: Arc::clone(&self.repo) }
    }
}

impl<R: ItemRepository + ?Sized> ItemService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Create an item with the given name.
    ///
    /// # Examples
    /// ```
    /// use service::items::{memory::MemoryItemStore, service::ItemService};
    /// use service::context::RequestContext;
    /// use service::errors::ServiceError;
    /// use std::sync::Arc;
    /// let svc = ItemService::new(Arc::new(MemoryItemStore::new()));
    /// let ctx = RequestContext::background();
    /// let item = tokio_test::block_on(svc.create_item(&ctx, "Alex")).unwrap();
    /// assert_eq!(item.id, 1);
    /// assert_eq!(tokio_test::block_on(svc.create_item(&ctx, "")), Err(ServiceError::EmptyName));
    /// ```
    #[instrument(skip(self, ctx, name), fields(name_len = name.len()))]
    pub async fn create_item(&self, ctx: &RequestContext, name: &str) -> Result<Item, ServiceError> {
        if name.is_empty() {
            return Err(ServiceError::EmptyName);
        }
        let item = self.repo.create(ctx, NewItem::new(name)).await.map_err(normalize)?;
        debug!(id = item.id, "item created");
        Ok(item)
    }

    #[instrument(skip(self, ctx))]
    pub async fn get_item(&self, ctx: &RequestContext, id: i64) -> Result<Item, ServiceError> {
        if id < 1 {
            return Err(ServiceError::InvalidValue);
        }
        self.repo.get(ctx, id).await.map_err(normalize)
    }

    #[instrument(skip(self, ctx))]
    pub async fn delete_item(&self, ctx: &RequestContext, id: i64) -> Result<(), ServiceError> {
        if id < 1 {
            return Err(ServiceError::InvalidValue);
        }
        self.repo.delete(ctx, id).await.map_err(normalize)?;
        debug!(id, "item deleted");
        Ok(())
    }
}

/// Map a repository failure onto the public error kinds.
/// Backend detail is logged here and dropped.
fn normalize(err: StoreError) -> ServiceError {
    match err {
        StoreError::Canceled => ServiceError::Canceled,
        StoreError::DeadlineExceeded => ServiceError::DeadlineExceeded,
        StoreError::NotFound => ServiceError::NotFound,
        StoreError::Backend(detail) => {
            error!(error = %detail, "item repository failure");
            ServiceError::Internal
        }
    }
}
