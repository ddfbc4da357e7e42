//! Process setup shared by every CLI command.
//!
//! Handles logging init and wiring of the database pool into services.

use sqlx::SqlitePool;
use tracing_subscriber::EnvFilter;

use crate::config::AgentConfig;
use crate::db;
use crate::error::Result;
use crate::service::{AgentRunner, SiteService};

const DEFAULT_LOG_DIRECTIVES: &str = "info,sqlx=warn,aegis_agent=debug";

/// Services built over one pool.
pub struct AppState {
    pub pool: SqlitePool,
    pub runner: AgentRunner,
    pub sites: SiteService,
}

/// Initialize logging with tracing_subscriber.
///
/// Output goes to stderr so `--json` stdout stays machine-readable.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVES));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .with_target(false)
        .with_ansi(true)
        .init();
}

/// Open the database and build the services.
///
/// Initializes:
/// - Database connection pool (migrations applied)
/// - Agent runner
/// - Site service
pub async fn setup(config: &AgentConfig) -> Result<AppState> {
    let pool = db::init_db(&config.database_url).await?;

    Ok(AppState {
        runner: AgentRunner::with_sqlite(pool.clone(), config),
        sites: SiteService::with_sqlite(pool.clone()),
        pool,
    })
}

/// Close the pool so WAL contents are checkpointed.
pub async fn shutdown(state: AppState) {
    tracing::debug!("Closing database pool");
    state.pool.close().await;
}
