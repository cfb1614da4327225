use sea_orm::{entity::prelude::*, ActiveValue::{NotSet, Unchanged}, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

pub const NAME_MAX_LEN: usize = 255;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Double", nullable)]
    pub price: Option<f64>,
    pub quantity: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Field values of an item without its identity.
///
/// Used both for creation and as the full replacement set on update.
/// A missing `name` deserializes to an empty string and fails validation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub quantity: Option<i32>,
}

impl ItemInput {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }
}

impl Model {
    /// Overwrite every mutable field; `id` is kept.
    pub fn apply(&mut self, input: ItemInput) {
        self.name = input.name;
        self.description = input.description;
        self.price = input.price;
        self.quantity = input.quantity;
    }
}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("name required".into()));
    }
    if name.chars().count() > NAME_MAX_LEN {
        return Err(errors::ModelError::Validation(format!("name longer than {NAME_MAX_LEN} characters")));
    }
    Ok(())
}

/// Insert a new row; the store assigns `id`.
pub async fn create(db: &DatabaseConnection, input: ItemInput) -> Result<Model, errors::ModelError> {
    validate_name(&input.name)?;
    let am = ActiveModel {
        id: NotSet,
        name: Set(input.name),
        description: Set(input.description),
        price: Set(input.price),
        quantity: Set(input.quantity),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Write all mutable fields of `item` to the row with the same `id`.
pub async fn overwrite(db: &DatabaseConnection, item: Model) -> Result<Model, errors::ModelError> {
    validate_name(&item.name)?;
    let id = item.id;
    let am = ActiveModel {
        id: Unchanged(id),
        name: Set(item.name),
        description: Set(item.description),
        price: Set(item.price),
        quantity: Set(item.quantity),
    };
    am.update(db).await.map_err(|e| match e {
        DbErr::RecordNotUpdated => errors::ModelError::NotFound(format!("item {id}")),
        other => errors::ModelError::Db(other.to_string()),
    })
}
