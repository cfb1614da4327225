use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// Connection-level settings handed to the sea-orm pool.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub acquire_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: configs::DEFAULT_DATABASE_URL.to_string(),
            max_connections: 10,
            min_connections: 2,
            connect_timeout: Duration::from_secs(30),
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(600)),
            max_lifetime: Some(Duration::from_secs(3600)),
            sqlx_logging: false,
        }
    }
}

impl From<&configs::DatabaseConfig> for DatabaseConfig {
    fn from(s: &configs::DatabaseConfig) -> Self {
        Self {
            url: s.url.clone(),
            max_connections: s.max_connections,
            min_connections: s.min_connections,
            connect_timeout: Duration::from_secs(s.connect_timeout_secs),
            acquire_timeout: Duration::from_secs(s.acquire_timeout_secs),
            idle_timeout: Some(Duration::from_secs(s.idle_timeout_secs)).filter(|d| !d.is_zero()),
            max_lifetime: Some(Duration::from_secs(s.max_lifetime_secs)).filter(|d| !d.is_zero()),
            sqlx_logging: s.sqlx_logging,
        }
    }
}

impl DatabaseConfig {
    /// Private SQLite in-memory database.
    ///
    /// The pool is pinned to one connection that never idles out, otherwise
    /// the database would vanish with the connection.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            idle_timeout: None,
            max_lifetime: None,
            ..Self::default()
        }
    }
}

pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opt = ConnectOptions::new(cfg.url.clone());
    opt.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(cfg.connect_timeout)
        .acquire_timeout(cfg.acquire_timeout)
        .sqlx_logging(cfg.sqlx_logging);
    if let Some(d) = cfg.idle_timeout {
        opt.idle_timeout(d);
    }
    if let Some(d) = cfg.max_lifetime {
        opt.max_lifetime(d);
    }
    let db = Database::connect(opt).await?;
    info!(
        backend = ?db.get_database_backend(),
        max_connections = cfg.max_connections,
        "database connected"
    );
    Ok(db)
}
