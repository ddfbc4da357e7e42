//! Agent drivers: one site, or every verified site in sequence.
//!
//! Per run the write order is fixed:
//! 1. Run row inserted as `running`
//! 2. Recent run history read (the new run is entry 0)
//! 3. Engine scores the domain
//! 4. Site scores and issues updated
//! 5. `suggested` recommendations replaced
//! 6. Run marked `succeeded`
//!
//! Any failure after step 1 marks the run `failed` and is returned.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use sqlx::SqlitePool;
use tokio::time::sleep;

use crate::config::AgentConfig;
use crate::domain::models::{AnalysisResult, Run, RunDetails, Site};
use crate::engine::{self, RandomSource, ThreadRandom};
use crate::error::{AppError, Result};
use crate::repository::sqlite::{
    SqliteRecommendationRepository, SqliteRunRepository, SqliteSiteRepository,
};
use crate::repository::{RecommendationRepository, RunRepository, SiteRepository};

/// Result of one site within a batch.
#[derive(Debug)]
pub struct BatchOutcome {
    pub domain: String,
    pub result: Result<AnalysisResult>,
}

impl BatchOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

pub struct AgentRunner {
    sites: Arc<dyn SiteRepository>,
    runs: Arc<dyn RunRepository>,
    recommendations: Arc<dyn RecommendationRepository>,
    rng: Arc<dyn RandomSource>,

    history_depth: i64,
    crawl_delay: Duration,
    batch_delay: Duration,
}

impl AgentRunner {
    // ========================================================================
    // CONSTRUCTION
    // ========================================================================

    pub fn new(
        sites: Arc<dyn SiteRepository>,
        runs: Arc<dyn RunRepository>,
        recommendations: Arc<dyn RecommendationRepository>,
        rng: Arc<dyn RandomSource>,
        config: &AgentConfig,
    ) -> Self {
        Self {
            sites,
            runs,
            recommendations,
            rng,
            history_depth: config.history_depth,
            crawl_delay: config.crawl_delay,
            batch_delay: config.batch_delay,
        }
    }

    /// Runner over SQLite repositories with thread-local randomness.
    pub fn with_sqlite(pool: SqlitePool, config: &AgentConfig) -> Self {
        Self::new(
            Arc::new(SqliteSiteRepository::new(pool.clone())),
            Arc::new(SqliteRunRepository::new(pool.clone())),
            Arc::new(SqliteRecommendationRepository::new(pool)),
            Arc::new(ThreadRandom),
            config,
        )
    }

    // ========================================================================
    // SINGLE SITE
    // ========================================================================

    /// Analyze one registered site and persist the outcome.
    ///
    /// Unknown domains fail with [`AppError::SiteNotFound`] before any run
    /// is recorded. Verification is not checked here.
    pub async fn run_for_site(&self, domain: &str) -> Result<AnalysisResult> {
        tracing::info!("Starting agent run for {}", domain);

        let site = self
            .sites
            .find_by_domain(domain)
            .await?
            .ok_or_else(|| AppError::SiteNotFound(domain.to_string()))?;

        let run = self.runs.create_running(&site.id).await?;

        match self.execute(&site, &run).await {
            Ok(result) => {
                tracing::info!(
                    "Agent run completed for {}: SEO {}/100, Indexability {}/100, Overall {}/100, {} critical, {} warnings, {} recommendations, trend {} ({:+})",
                    domain,
                    result.seo_score,
                    result.index_score,
                    result.overall_score,
                    result.issues.critical.len(),
                    result.issues.warnings.len(),
                    result.recommendations.len(),
                    result.trends.seo_trend,
                    result.trends.improvement
                );
                Ok(result)
            }
            Err(err) => {
                self.record_failure(&run, &err).await;
                tracing::error!("Agent run failed for {}: {}", domain, err);
                Err(err)
            }
        }
    }

    async fn execute(&self, site: &Site, run: &Run) -> Result<AnalysisResult> {
        if !self.crawl_delay.is_zero() {
            tracing::debug!("Crawling {} ({:?})", site.domain, self.crawl_delay);
            sleep(self.crawl_delay).await;
        }

        let history: Vec<Option<i64>> = self
            .runs
            .recent_for_site(&site.id, self.history_depth)
            .await?
            .iter()
            .map(Run::seo_score)
            .collect();

        let result = engine::analyze(&site.domain, &history, self.rng.as_ref());

        self.sites.record_audit(&site.id, &result).await?;
        self.recommendations
            .replace_suggested(&site.id, &result.recommendations)
            .await?;

        let details = serde_json::to_value(RunDetails::from(&result))?;
        self.runs
            .mark_succeeded(&run.id, &result.headline(), &details)
            .await?;

        Ok(result)
    }

    /// Best effort: the original error is what the caller sees.
    async fn record_failure(&self, run: &Run, err: &AppError) {
        let details = json!({
            "error": err.to_string(),
            "stack": format!("{err:?}"),
        });
        let summary = format!("Failed: {err}");

        if let Err(e) = self.runs.mark_failed(&run.id, &summary, &details).await {
            tracing::error!("Could not mark run {} failed: {}", run.id, e);
        }
    }

    // ========================================================================
    // BATCH
    // ========================================================================

    /// Analyze every verified site in order. A failing site is logged and
    /// collected; the batch keeps going.
    pub async fn run_for_all_sites(&self) -> Result<Vec<BatchOutcome>> {
        let sites = self.sites.list_verified().await?;

        if sites.is_empty() {
            tracing::info!("No verified sites found");
            return Ok(Vec::new());
        }
        tracing::info!("Found {} verified sites", sites.len());

        let mut outcomes = Vec::with_capacity(sites.len());
        for (i, site) in sites.into_iter().enumerate() {
            if i > 0 && !self.batch_delay.is_zero() {
                sleep(self.batch_delay).await;
            }

            let result = self.run_for_site(&site.domain).await;
            if let Err(e) = &result {
                tracing::error!("Failed to process {}: {}", site.domain, e);
            }
            outcomes.push(BatchOutcome {
                domain: site.domain,
                result,
            });
        }

        let failed = outcomes.iter().filter(|o| !o.is_success()).count();
        tracing::info!(
            "Agent run completed for all sites ({} ok, {} failed)",
            outcomes.len() - failed,
            failed
        );
        Ok(outcomes)
    }
}
