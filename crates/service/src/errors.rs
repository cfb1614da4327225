use models::errors::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

impl ServiceError {
    pub fn item_not_found(id: i64) -> Self { Self::NotFound(format!("item {} not found", id)) }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Model(ModelError::NotFound(_)))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Model(ModelError::Validation(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_model_errors() {
        assert!(ServiceError::from(ModelError::Validation("name required".into())).is_validation());
        assert!(ServiceError::from(ModelError::NotFound("item 1".into())).is_not_found());
        let db = ServiceError::from(ModelError::Db("down".into()));
        assert!(!db.is_validation() && !db.is_not_found());
    }

    #[test]
    fn not_found_message_names_the_item() {
        assert_eq!(ServiceError::item_not_found(7).to_string(), "not found: item 7 not found");
    }
}
