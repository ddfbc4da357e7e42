use chrono::{DateTime, SecondsFormat, Utc};

mod recommendation_repository;
mod run_repository;
mod site_repository;

pub use recommendation_repository::SqliteRecommendationRepository;
pub use run_repository::SqliteRunRepository;
pub use site_repository::SqliteSiteRepository;

/// Timestamp in the stored format. Microseconds keep ordering stable for
/// runs started in quick succession.
pub(crate) fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

/// Decode a JSON text column, treating malformed content as absent.
pub(crate) fn parse_json(s: Option<&str>) -> Option<serde_json::Value> {
    s.and_then(|raw| match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Ignoring malformed JSON column: {}", e);
            None
        }
    })
}
