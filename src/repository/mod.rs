//! Persistence ports used by the agent, with SQLite implementations in
//! [`sqlite`].

pub mod sqlite;

use async_trait::async_trait;

use crate::domain::models::*;
use crate::error::Result;

#[async_trait]
pub trait SiteRepository: Send + Sync {
    async fn create(
        &self,
        domain: &str,
        connect_method: ConnectMethod,
        verify_token: &str,
    ) -> Result<Site>;
    async fn find_by_domain(&self, domain: &str) -> Result<Option<Site>>;
    async fn list_verified(&self) -> Result<Vec<Site>>;
    async fn mark_verified(&self, domain: &str) -> Result<()>;
    /// Store the latest scores and issues payload on the site.
    async fn record_audit(&self, site_id: &str, result: &AnalysisResult) -> Result<()>;
}

#[async_trait]
pub trait RunRepository: Send + Sync {
    async fn create_running(&self, site_id: &str) -> Result<Run>;
    /// Most recent runs of a site, newest first.
    async fn recent_for_site(&self, site_id: &str, limit: i64) -> Result<Vec<Run>>;
    async fn mark_succeeded(
        &self,
        run_id: &str,
        summary: &str,
        details: &serde_json::Value,
    ) -> Result<()>;
    async fn mark_failed(
        &self,
        run_id: &str,
        summary: &str,
        details: &serde_json::Value,
    ) -> Result<()>;
}

#[async_trait]
pub trait RecommendationRepository: Send + Sync {
    /// Delete the site's `suggested` set and insert the new one.
    async fn replace_suggested(&self, site_id: &str, recommendations: &[Recommendation])
        -> Result<usize>;
    async fn list_suggested(&self, site_id: &str) -> Result<Vec<StoredRecommendation>>;
}
