use async_trait::async_trait;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use models::item::{self, ItemInput};

use crate::errors::ServiceError;

/// Persistence abstraction over the `items` table.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Persist a new record; the store assigns its id.
    async fn insert(&self, input: ItemInput) -> Result<item::Model, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<item::Model>, ServiceError>;
    async fn find_all(&self) -> Result<Vec<item::Model>, ServiceError>;
    async fn find_by_name_contains(&self, fragment: &str) -> Result<Vec<item::Model>, ServiceError>;
    /// Records priced strictly below `threshold`; unpriced records never match.
    async fn find_by_price_less_than(&self, threshold: f64) -> Result<Vec<item::Model>, ServiceError>;
    /// Overwrite the mutable fields of an existing record.
    async fn save(&self, item: item::Model) -> Result<item::Model, ServiceError>;
    /// Returns true if a row was removed.
    async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError>;
}

/// `LIKE` pattern matching `fragment` literally anywhere in the value.
fn contains_pattern(fragment: &str) -> LikeExpr {
    let mut escaped = String::with_capacity(fragment.len() + 2);
    for c in fragment.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    LikeExpr::new(format!("%{escaped}%")).escape('\\')
}

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmItemRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmItemRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl ItemRepository for SeaOrmItemRepository {
    async fn insert(&self, input: ItemInput) -> Result<item::Model, ServiceError> {
        Ok(item::create(&self.db, input).await?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<item::Model>, ServiceError> {
        item::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn find_all(&self) -> Result<Vec<item::Model>, ServiceError> {
        item::Entity::find()
            .order_by_asc(item::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn find_by_name_contains(&self, fragment: &str) -> Result<Vec<item::Model>, ServiceError> {
        item::Entity::find()
            .filter(Expr::col(item::Column::Name).like(contains_pattern(fragment)))
            .order_by_asc(item::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn find_by_price_less_than(&self, threshold: f64) -> Result<Vec<item::Model>, ServiceError> {
        item::Entity::find()
            .filter(item::Column::Price.lt(threshold))
            .order_by_asc(item::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn save(&self, item: item::Model) -> Result<item::Model, ServiceError> {
        Ok(item::overwrite(&self.db, item).await?)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        let res = item::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(res.rows_affected > 0)
    }
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    struct Rows {
        last_id: i64,
        items: BTreeMap<i64, item::Model>, // key: id
    }

    #[derive(Default)]
    pub struct MockItemRepository {
        rows: Mutex<Rows>,
    }

    impl MockItemRepository {
        fn rows(&self) -> Result<MutexGuard<'_, Rows>, ServiceError> {
            self.rows.lock().map_err(|_| ServiceError::Db("mock repository poisoned".into()))
        }

        fn select(&self, pred: impl Fn(&item::Model) -> bool) -> Result<Vec<item::Model>, ServiceError> {
            Ok(self.rows()?.items.values().filter(|m| pred(m)).cloned().collect())
        }
    }

    #[async_trait]
    impl ItemRepository for MockItemRepository {
        async fn insert(&self, input: ItemInput) -> Result<item::Model, ServiceError> {
            item::validate_name(&input.name)?;
            let mut rows = self.rows()?;
            rows.last_id += 1;
            let model = item::Model {
                id: rows.last_id,
                name: input.name,
                description: input.description,
                price: input.price,
                quantity: input.quantity,
            };
            rows.items.insert(model.id, model.clone());
            Ok(model)
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<item::Model>, ServiceError> {
            Ok(self.rows()?.items.get(&id).cloned())
        }

        async fn find_all(&self) -> Result<Vec<item::Model>, ServiceError> {
            self.select(|_| true)
        }

        async fn find_by_name_contains(&self, fragment: &str) -> Result<Vec<item::Model>, ServiceError> {
            self.select(|m| m.name.contains(fragment))
        }

        async fn find_by_price_less_than(&self, threshold: f64) -> Result<Vec<item::Model>, ServiceError> {
            self.select(|m| m.price.is_some_and(|p| p < threshold))
        }

        async fn save(&self, item: item::Model) -> Result<item::Model, ServiceError> {
            item::validate_name(&item.name)?;
            let mut rows = self.rows()?;
            match rows.items.get_mut(&item.id) {
                Some(slot) => {
                    *slot = item.clone();
                    Ok(item)
                }
                None => Err(ServiceError::item_not_found(item.id)),
            }
        }

        async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError> {
            Ok(self.rows()?.items.remove(&id).is_some())
        }
    }
}
