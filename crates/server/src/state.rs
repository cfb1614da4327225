use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::item::{ItemService, SeaOrmItemRepository};

pub type Items = ItemService<SeaOrmItemRepository>;

/// Shared router state; cloning only bumps the `Arc`.
#[derive(Clone)]
pub struct ServerState {
    pub items: Arc<Items>,
}

impl ServerState {
    pub fn new(db: DatabaseConnection) -> Self {
        let repo = Arc::new(SeaOrmItemRepository::new(db));
        Self { items: Arc::new(ItemService::new(repo)) }
    }
}
