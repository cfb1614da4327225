

use sea_orm::DatabaseConnection;
use migration::MigratorTrait;

use crate::db::{connect_with_config, DatabaseConfig};

/// Fresh in-memory database with the schema applied.
pub(crate) async fn setup_test_db() -> anyhow::Result<DatabaseConnection> {
    let db = connect_with_config(&DatabaseConfig::in_memory()).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
