use std::sync::Arc;
use tracing::{debug, info, instrument};

use models::item::{self, ItemInput};

use crate::errors::ServiceError;
use crate::item::repository::ItemRepository;

/// Application service encapsulating item business rules.
/// Create, read and search pass straight through; update and delete
/// require the target to exist.
pub struct ItemService<R: ItemRepository> {
    repo: Arc<R>,
}

impl<R: ItemRepository> ItemService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<item::Model>, ServiceError> {
        let items = self.repo.find_all().await?;
        debug!(count = items.len(), "items_listed");
        Ok(items)
    }

    pub async fn get(&self, id: i64) -> Result<Option<item::Model>, ServiceError> { self.repo.find_by_id(id).await }

    /// Persist a new item. Field constraints are enforced by the store.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use models::item::ItemInput;
    /// use service::item::{repository::mock::MockItemRepository, ItemService};
    /// let svc = ItemService::new(Arc::new(MockItemRepository::default()));
    /// let created = tokio_test::block_on(svc.create(ItemInput::named("Apple"))).unwrap();
    /// assert_eq!(created.id, 1);
    /// assert_eq!(created.name, "Apple");
    /// ```
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: ItemInput) -> Result<item::Model, ServiceError> {
        let created = self.repo.insert(input).await?;
        info!(id = created.id, "item_created");
        Ok(created)
    }

    /// Replace all mutable fields of item `id`.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i64, input: ItemInput) -> Result<item::Model, ServiceError> {
        let Some(mut existing) = self.repo.find_by_id(id).await? else {
            return Err(ServiceError::item_not_found(id));
        };
        existing.apply(input);
        let updated = self.repo.save(existing).await?;
        info!(id = updated.id, "item_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        if self.repo.find_by_id(id).await?.is_none() {
            return Err(ServiceError::item_not_found(id));
        }
        // gone between the lookup and the delete
        if !self.repo.delete_by_id(id).await? {
            return Err(ServiceError::item_not_found(id));
        }
        info!(id, "item_deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn search_by_name(&self, fragment: &str) -> Result<Vec<item::Model>, ServiceError> {
        let found = self.repo.find_by_name_contains(fragment).await?;
        debug!(count = found.len(), "items_matched_name");
        Ok(found)
    }

    #[instrument(skip(self))]
    pub async fn search_by_max_price(&self, max: f64) -> Result<Vec<item::Model>, ServiceError> {
        let found = self.repo.find_by_price_less_than(max).await?;
        debug!(count = found.len(), "items_below_price");
        Ok(found)
    }
}
