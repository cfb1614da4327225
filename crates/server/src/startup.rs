use std::future::Future;

use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::{routes, state::ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open the connection pool and bring the schema up to date.
pub async fn open_database(settings: &configs::DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    common::env::ensure_sqlite_dir(&settings.url).await?;
    let db = models::db::connect_with_config(&models::db::DatabaseConfig::from(settings)).await?;
    if settings.run_migrations {
        migration::Migrator::up(&db, None).await?;
        info!("database migrations applied");
    }
    Ok(db)
}

/// Resolves on Ctrl+C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "cannot listen for Ctrl+C; running until killed");
        std::future::pending::<()>().await;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
}

/// Public entry: build the app from `cfg` and run the HTTP server until Ctrl+C.
///
/// Logging and `.env` are the caller's concern.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    run_with_shutdown(cfg, shutdown_signal()).await
}

/// Run the HTTP server until `shutdown` resolves, then close the pool.
pub async fn run_with_shutdown<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let db = open_database(&cfg.database).await?;

    let app: Router = routes::build_router(ServerState::new(db.clone()), build_cors());

    // host may be a name, so let tokio resolve it
    let listener = tokio::net::TcpListener::bind((cfg.server.host.as_str(), cfg.server.port)).await?;
    let addr = listener.local_addr()?;
    info!(%addr, "starting item api server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("http server stopped; closing database pool");
    db.close().await?;
    Ok(())
}
