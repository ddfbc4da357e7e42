use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::{now_rfc3339, parse_datetime, parse_json};
use crate::domain::models::{Recommendation, StoredRecommendation};
use crate::error::Result;
use crate::repository::RecommendationRepository;

const SUGGESTED: &str = "suggested";

#[derive(Clone)]
pub struct SqliteRecommendationRepository {
    pool: SqlitePool,
}

impl SqliteRecommendationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecommendationRepository for SqliteRecommendationRepository {
    async fn replace_suggested(
        &self,
        site_id: &str,
        recommendations: &[Recommendation],
    ) -> Result<usize> {
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query("DELETE FROM recommendations WHERE site_id = ? AND status = ?")
            .bind(site_id)
            .bind(SUGGESTED)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if !recommendations.is_empty() {
            let now = now_rfc3339();
            let patches = recommendations
                .iter()
                .map(|r| serde_json::to_string(&r.stored_patch()))
                .collect::<std::result::Result<Vec<_>, _>>()?;

            let mut qb = sqlx::QueryBuilder::new(
                "INSERT INTO recommendations (id, site_id, title, rationale, patch, status, created_at) ",
            );
            qb.push_values(recommendations.iter().zip(patches), |mut b, (rec, patch)| {
                b.push_bind(Uuid::new_v4().to_string())
                    .push_bind(site_id)
                    .push_bind(&rec.title)
                    .push_bind(&rec.rationale)
                    .push_bind(patch)
                    .push_bind(SUGGESTED)
                    .push_bind(now.clone());
            });
            qb.build().execute(&mut *tx).await?;
        }

        tx.commit().await?;

        tracing::debug!(
            "Replaced {} suggested recommendations with {} for site {}",
            removed,
            recommendations.len(),
            site_id
        );
        Ok(recommendations.len())
    }

    async fn list_suggested(&self, site_id: &str) -> Result<Vec<StoredRecommendation>> {
        let rows = sqlx::query(
            r#"
            SELECT id, site_id, title, rationale, patch, status, created_at
            FROM recommendations
            WHERE site_id = ? AND status = ?
            ORDER BY created_at ASC, rowid ASC
            "#,
        )
        .bind(site_id)
        .bind(SUGGESTED)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| StoredRecommendation {
                id: row.get("id"),
                site_id: row.get("site_id"),
                title: row.get("title"),
                rationale: row.get("rationale"),
                patch: parse_json(row.get("patch")).unwrap_or(serde_json::Value::Null),
                status: row.get("status"),
                created_at: parse_datetime(row.get("created_at")),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::CategoryBreakdown;
    use crate::engine::{self, recommend};
    use crate::test_utils::{fixtures, SequenceRandom};

    fn low_scoring() -> CategoryBreakdown {
        // seed 0 puts content and ai optimization under threshold
        engine::analyze_categories(0, &SequenceRandom::zeros())
    }

    #[tokio::test]
    async fn test_replace_inserts_with_full_patch() {
        let pool = fixtures::setup_test_db().await;
        let site = fixtures::seed_site(&pool, "d", true).await;
        let repo = SqliteRecommendationRepository::new(pool);

        let recs = recommend::generate_recommendations(&low_scoring());
        let inserted = repo.replace_suggested(&site.id, &recs).await.unwrap();
        assert_eq!(inserted, 2);

        let stored = repo.list_suggested(&site.id).await.unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].title, recs[0].title);
        assert_eq!(stored[0].status, "suggested");
        assert_eq!(stored[0].patch["type"], recs[0].patch.kind.as_str());
        assert_eq!(stored[0].patch["priority"], "medium");
        assert_eq!(stored[0].patch["category"], "content");
        assert_eq!(stored[1].patch["category"], "aiOptimization");
        assert!(stored[1].patch["impact"].is_string());
    }

    #[tokio::test]
    async fn test_replace_discards_previous_suggestions_only() {
        let pool = fixtures::setup_test_db().await;
        let site = fixtures::seed_site(&pool, "d", true).await;
        let repo = SqliteRecommendationRepository::new(pool.clone());

        let recs = recommend::generate_recommendations(&low_scoring());
        repo.replace_suggested(&site.id, &recs).await.unwrap();

        // an applied recommendation survives later runs
        sqlx::query(
            "INSERT INTO recommendations (id, site_id, title, rationale, patch, status, created_at) VALUES ('kept', ?, 't', 'r', '{}', 'applied', '2024-01-01T00:00:00Z')",
        )
        .bind(&site.id)
        .execute(&pool)
        .await
        .unwrap();

        repo.replace_suggested(&site.id, &recs[..1]).await.unwrap();
        assert_eq!(repo.list_suggested(&site.id).await.unwrap().len(), 1);

        repo.replace_suggested(&site.id, &[]).await.unwrap();
        assert!(repo.list_suggested(&site.id).await.unwrap().is_empty());

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recommendations")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(total, 1);
    }
}
