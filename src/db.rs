use std::time::Duration;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::error::Result;

/// Configure SQLite pragmas for every new connection.
async fn configure_sqlite_pragmas(conn: &mut sqlx::SqliteConnection) -> std::result::Result<(), sqlx::Error> {
    use sqlx::Executor;

    // WAL mode: readers don't block the writer
    conn.execute("PRAGMA journal_mode = WAL").await?;

    conn.execute("PRAGMA synchronous = NORMAL").await?;

    // 5 second timeout for busy connections (prevents "database locked" errors)
    conn.execute("PRAGMA busy_timeout = 5000").await?;

    conn.execute("PRAGMA temp_store = MEMORY").await?;

    // Runs and recommendations cascade with their site
    conn.execute("PRAGMA foreign_keys = ON").await?;

    Ok(())
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Open the pool and apply embedded migrations.
pub async fn init_db(database_url: &str) -> Result<SqlitePool> {
    tracing::info!("Database URL: {}", database_url);

    // every in-memory connection is its own database
    let max_connections = if is_in_memory(database_url) { 1 } else { 5 };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(600))
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                configure_sqlite_pragmas(conn).await?;
                Ok(())
            })
        })
        .connect(database_url)
        .await?;

    sqlx::migrate!().run(&pool).await?;

    tracing::debug!("Database initialized with {} max connections", max_connections);
    Ok(pool)
}
