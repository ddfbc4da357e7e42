use std::sync::Arc;

use serde::Serialize;
use sqlx::SqlitePool;

use crate::domain::models::{ConnectMethod, Run, Site};
use crate::error::{AppError, Result};
use crate::repository::sqlite::{SqliteRunRepository, SqliteSiteRepository};
use crate::repository::{RunRepository, SiteRepository};

/// Default page size for [`SiteService::runs`].
pub const DEFAULT_RUN_LIMIT: i64 = 20;

const VERIFY_FILE_PATH: &str = "/.well-known/aegis-verify.txt";

/// How the owner proves control of a domain.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationInstructions {
    pub dns_txt_record: String,
    pub file_path: String,
    pub file_content: String,
}

impl VerificationInstructions {
    fn for_token(token: &str) -> Self {
        Self {
            dns_txt_record: format!("aegis-verify={token}"),
            file_path: VERIFY_FILE_PATH.to_string(),
            file_content: token.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSite {
    pub site: Site,
    pub verification: VerificationInstructions,
}

/// Site with its most recent run, if any.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSummary {
    pub site: Site,
    pub last_run: Option<Run>,
}

/// Site onboarding and read-side queries.
pub struct SiteService {
    sites: Arc<dyn SiteRepository>,
    runs: Arc<dyn RunRepository>,
}

impl SiteService {
    pub fn new(sites: Arc<dyn SiteRepository>, runs: Arc<dyn RunRepository>) -> Self {
        Self { sites, runs }
    }

    pub fn with_sqlite(pool: SqlitePool) -> Self {
        Self::new(
            Arc::new(SqliteSiteRepository::new(pool.clone())),
            Arc::new(SqliteRunRepository::new(pool)),
        )
    }

    /// Register an unverified site with a fresh verification token.
    pub async fn add_site(&self, domain: &str, connect_method: ConnectMethod) -> Result<NewSite> {
        let domain = domain.trim();
        if domain.is_empty() {
            return Err(AppError::InvalidDomain(domain.to_string()));
        }

        let token = generate_verify_token();
        let site = self.sites.create(domain, connect_method, &token).await?;

        Ok(NewSite {
            site,
            verification: VerificationInstructions::for_token(&token),
        })
    }

    /// Mark the site verified. Token checking happens out of band.
    pub async fn verify_site(&self, domain: &str) -> Result<Site> {
        self.sites.mark_verified(domain).await?;
        self.require_site(domain).await
    }

    pub async fn summary(&self, domain: &str) -> Result<SiteSummary> {
        let site = self.require_site(domain).await?;
        let last_run = self.runs.recent_for_site(&site.id, 1).await?.into_iter().next();

        Ok(SiteSummary { site, last_run })
    }

    /// Recent runs for the site, newest first.
    pub async fn runs(&self, domain: &str, limit: i64) -> Result<Vec<Run>> {
        let site = self.require_site(domain).await?;
        self.runs.recent_for_site(&site.id, limit.max(1)).await
    }

    async fn require_site(&self, domain: &str) -> Result<Site> {
        self.sites
            .find_by_domain(domain)
            .await?
            .ok_or_else(|| AppError::SiteNotFound(domain.to_string()))
    }
}

/// 16 random bytes, hex encoded.
fn generate_verify_token() -> String {
    hex::encode(rand::random::<[u8; 16]>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::RunStatus;
    use crate::test_utils::fixtures;

    #[test]
    fn test_token_is_32_hex_chars() {
        let token = generate_verify_token();
        assert_eq!(token.len(), 32);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(token, generate_verify_token());
    }

    #[tokio::test]
    async fn test_add_site_returns_instructions() {
        let pool = fixtures::setup_test_db().await;
        let service = SiteService::with_sqlite(pool);

        let created = service
            .add_site("  example.com ", ConnectMethod::Github)
            .await
            .expect("add failed");

        assert_eq!(created.site.domain, "example.com");
        assert!(!created.site.verified);
        let token = created.site.verify_token.clone().unwrap();
        assert_eq!(created.verification.dns_txt_record, format!("aegis-verify={token}"));
        assert_eq!(created.verification.file_path, "/.well-known/aegis-verify.txt");
        assert_eq!(created.verification.file_content, token);
    }

    #[tokio::test]
    async fn test_add_site_rejects_blank_and_duplicate() {
        let pool = fixtures::setup_test_db().await;
        let service = SiteService::with_sqlite(pool);

        let err = service.add_site("   ", ConnectMethod::Manual).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidDomain(_)));

        service.add_site("example.com", ConnectMethod::Manual).await.unwrap();
        let err = service
            .add_site("example.com", ConnectMethod::Manual)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DomainConflict(_)));
    }

    #[tokio::test]
    async fn test_verify_then_summary() {
        let pool = fixtures::setup_test_db().await;
        let service = SiteService::with_sqlite(pool.clone());
        service.add_site("example.com", ConnectMethod::Manual).await.unwrap();

        let site = service.verify_site("example.com").await.unwrap();
        assert!(site.verified);

        let summary = service.summary("example.com").await.unwrap();
        assert!(summary.last_run.is_none());

        let run = SqliteRunRepository::new(pool)
            .create_running(&site.id)
            .await
            .unwrap();
        let summary = service.summary("example.com").await.unwrap();
        let last = summary.last_run.expect("run expected");
        assert_eq!(last.id, run.id);
        assert_eq!(last.status, RunStatus::Running);
    }

    #[tokio::test]
    async fn test_queries_on_unknown_domain() {
        let pool = fixtures::setup_test_db().await;
        let service = SiteService::with_sqlite(pool);

        assert!(service.verify_site("x.com").await.unwrap_err().is_not_found());
        assert!(service.summary("x.com").await.unwrap_err().is_not_found());
        assert!(service
            .runs("x.com", DEFAULT_RUN_LIMIT)
            .await
            .unwrap_err()
            .is_not_found());
    }
}
