//! Error types for the audit agent.
//!
//! This module provides structured error handling with:
//! - `AppError`: Domain-specific errors for agent operations
//! - `Result<T>`: Type alias for Results using AppError

use thiserror::Error;

// ============================================================================
// DOMAIN ERROR TYPE
// ============================================================================

/// Domain-specific errors for agent operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// No site record exists for the requested domain
    #[error("Site {0} not found")]
    SiteNotFound(String),

    /// A site with this domain is already registered
    #[error("Domain already exists: {0}")]
    DomainConflict(String),

    /// Run is missing or already in a terminal state
    #[error("Run {0} is not running")]
    RunNotRunning(String),

    /// Domain is empty or blank
    #[error("Invalid domain: {0:?}")]
    InvalidDomain(String),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Embedded migrations could not be applied
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// JSON payload could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True when the error was a site lookup miss.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::SiteNotFound(_))
    }

    /// Map a unique-constraint violation on `sites.domain` to a conflict.
    pub(crate) fn from_site_insert(err: sqlx::Error, domain: &str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Self::DomainConflict(domain.to_string())
            }
            _ => Self::Database(err),
        }
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_domain() {
        let err = AppError::SiteNotFound("example.com".into());
        assert_eq!(err.to_string(), "Site example.com not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_conflict_is_not_a_lookup_miss() {
        let err = AppError::DomainConflict("example.com".into());
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "Domain already exists: example.com");
    }

    #[test]
    fn test_non_unique_errors_stay_database_errors() {
        let err = AppError::from_site_insert(sqlx::Error::RowNotFound, "example.com");
        assert!(matches!(err, AppError::Database(_)));
    }
}
