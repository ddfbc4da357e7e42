use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use super::{now_rfc3339, parse_datetime, parse_json};
use crate::domain::models::{AnalysisResult, ConnectMethod, Site, SiteIssues};
use crate::error::{AppError, Result};
use crate::repository::SiteRepository;

const SITE_COLUMNS: &str = r#"
    id, domain, connect_method, verified, verify_token,
    last_score_seo, last_score_index, last_audit_at, last_issues, created_at
"#;

#[derive(Clone)]
pub struct SqliteSiteRepository {
    pool: SqlitePool,
}

impl SqliteSiteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SiteRepository for SqliteSiteRepository {
    async fn create(
        &self,
        domain: &str,
        connect_method: ConnectMethod,
        verify_token: &str,
    ) -> Result<Site> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = now_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO sites (id, domain, connect_method, verified, verify_token, created_at)
            VALUES (?, ?, ?, 0, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(domain)
        .bind(connect_method.as_str())
        .bind(verify_token)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_site_insert(e, domain))?;

        tracing::info!("Created site {} for domain {}", id, domain);

        Ok(Site {
            id,
            domain: domain.to_string(),
            connect_method,
            verified: false,
            verify_token: Some(verify_token.to_string()),
            last_score_seo: None,
            last_score_index: None,
            last_audit_at: None,
            last_issues: None,
            created_at: parse_datetime(&now),
        })
    }

    async fn find_by_domain(&self, domain: &str) -> Result<Option<Site>> {
        let sql = format!("SELECT {SITE_COLUMNS} FROM sites WHERE domain = ?");
        let row = sqlx::query(&sql)
            .bind(domain)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(row_to_site))
    }

    async fn list_verified(&self) -> Result<Vec<Site>> {
        let sql = format!(
            "SELECT {SITE_COLUMNS} FROM sites WHERE verified = 1 ORDER BY created_at ASC, rowid ASC"
        );
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        Ok(rows.iter().map(row_to_site).collect())
    }

    async fn mark_verified(&self, domain: &str) -> Result<()> {
        let result = sqlx::query("UPDATE sites SET verified = 1 WHERE domain = ?")
            .bind(domain)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::SiteNotFound(domain.to_string()));
        }

        tracing::info!("Verified site {}", domain);
        Ok(())
    }

    async fn record_audit(&self, site_id: &str, result: &AnalysisResult) -> Result<()> {
        let issues = serde_json::to_string(&SiteIssues::from(result))?;

        sqlx::query(
            r#"
            UPDATE sites
            SET last_score_seo = ?, last_score_index = ?, last_audit_at = ?, last_issues = ?
            WHERE id = ?
            "#,
        )
        .bind(result.seo_score)
        .bind(result.index_score)
        .bind(now_rfc3339())
        .bind(issues)
        .bind(site_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

fn row_to_site(row: &sqlx::sqlite::SqliteRow) -> Site {
    let connect_method = row
        .get::<&str, _>("connect_method")
        .parse()
        .unwrap_or_default();

    Site {
        id: row.get("id"),
        domain: row.get("domain"),
        connect_method,
        verified: row.get::<i64, _>("verified") != 0,
        verify_token: row.get("verify_token"),
        last_score_seo: row.get("last_score_seo"),
        last_score_index: row.get("last_score_index"),
        last_audit_at: row.get::<Option<&str>, _>("last_audit_at").map(parse_datetime),
        last_issues: parse_json(row.get("last_issues")),
        created_at: parse_datetime(row.get("created_at")),
    }
}
