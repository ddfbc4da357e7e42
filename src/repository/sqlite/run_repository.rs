//! Agent run log.
//!
//! A run is inserted as `running` and moves exactly once to `succeeded` or
//! `failed`. Terminal rows are never updated again.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use super::{now_rfc3339, parse_datetime, parse_json};
use crate::domain::models::{Run, RunStatus};
use crate::error::{AppError, Result};
use crate::repository::RunRepository;

#[derive(Clone)]
pub struct SqliteRunRepository {
    pool: SqlitePool,
}

impl SqliteRunRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn finish(
        &self,
        run_id: &str,
        status: RunStatus,
        summary: &str,
        details: &serde_json::Value,
    ) -> Result<()> {
        let details = serde_json::to_string(details)?;

        let result = sqlx::query(
            r#"
            UPDATE agent_runs
            SET status = ?, finished_at = ?, summary = ?, details = ?
            WHERE id = ? AND status = 'running'
            "#,
        )
        .bind(status.as_str())
        .bind(now_rfc3339())
        .bind(summary)
        .bind(details)
        .bind(run_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::RunNotRunning(run_id.to_string()));
        }

        tracing::debug!("Run {} -> {}", run_id, status);
        Ok(())
    }
}

#[async_trait]
impl RunRepository for SqliteRunRepository {
    async fn create_running(&self, site_id: &str) -> Result<Run> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = now_rfc3339();

        sqlx::query(
            "INSERT INTO agent_runs (id, site_id, status, started_at) VALUES (?, ?, 'running', ?)",
        )
        .bind(&id)
        .bind(site_id)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Run {
            id,
            site_id: site_id.to_string(),
            status: RunStatus::Running,
            started_at: parse_datetime(&now),
            finished_at: None,
            summary: None,
            details: None,
        })
    }

    async fn recent_for_site(&self, site_id: &str, limit: i64) -> Result<Vec<Run>> {
        let rows = sqlx::query(
            r#"
            SELECT id, site_id, status, started_at, finished_at, summary, details
            FROM agent_runs
            WHERE site_id = ?
            ORDER BY started_at DESC, rowid DESC
            LIMIT ?
            "#,
        )
        .bind(site_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(row_to_run).collect())
    }

    async fn mark_succeeded(
        &self,
        run_id: &str,
        summary: &str,
        details: &serde_json::Value,
    ) -> Result<()> {
        self.finish(run_id, RunStatus::Succeeded, summary, details).await
    }

    async fn mark_failed(
        &self,
        run_id: &str,
        summary: &str,
        details: &serde_json::Value,
    ) -> Result<()> {
        self.finish(run_id, RunStatus::Failed, summary, details).await
    }
}

fn row_to_run(row: &sqlx::sqlite::SqliteRow) -> Run {
    let status = row.get::<&str, _>("status");
    Run {
        id: row.get("id"),
        site_id: row.get("site_id"),
        status: status.parse().unwrap_or_else(|e| {
            tracing::warn!("{}", e);
            RunStatus::Failed
        }),
        started_at: parse_datetime(row.get("started_at")),
        finished_at: row.get::<Option<&str>, _>("finished_at").map(parse_datetime),
        summary: row.get("summary"),
        details: parse_json(row.get("details")),
    }
}
