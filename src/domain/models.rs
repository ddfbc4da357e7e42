//! Domain entities for sites, runs and audit results.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ====== Enums ======

/// One of the five audit dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Technical,
    Content,
    Performance,
    Accessibility,
    AiOptimization,
}

impl Category {
    /// Payload order of the categories.
    pub const ALL: [Category; 5] = [
        Category::Technical,
        Category::Content,
        Category::Performance,
        Category::Accessibility,
        Category::AiOptimization,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Technical => "technical",
            Category::Content => "content",
            Category::Performance => "performance",
            Category::Accessibility => "accessibility",
            Category::AiOptimization => "aiOptimization",
        }
    }

    /// Display label used on recommendation cards.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Technical => "Technical SEO",
            Category::Content => "Content SEO",
            Category::Performance => "Performance",
            Category::Accessibility => "Accessibility",
            Category::AiOptimization => "AI Optimization",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Category::Technical => {
                "Technical SEO fundamentals like meta tags, sitemaps, robots.txt, and site structure"
            }
            Category::Content => {
                "Content quality, relevance, and optimization for search engines"
            }
            Category::Performance => "Site speed, loading times, and Core Web Vitals",
            Category::Accessibility => "Web accessibility compliance and user experience",
            Category::AiOptimization => {
                "Optimization for AI systems like ChatGPT and future search engines"
            }
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Stable,
    Declining,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Improving => "improving",
            TrendDirection::Stable => "stable",
            TrendDirection::Declining => "declining",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Running,
    Succeeded,
    Failed,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Running => "running",
            RunStatus::Succeeded => "succeeded",
            RunStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RunStatus::Succeeded | RunStatus::Failed)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RunStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running" => Ok(RunStatus::Running),
            "succeeded" => Ok(RunStatus::Succeeded),
            "failed" => Ok(RunStatus::Failed),
            other => Err(format!("unknown run status: {other}")),
        }
    }
}

/// How the customer's site is hosted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectMethod {
    #[default]
    Manual,
    Wordpress,
    Github,
}

impl ConnectMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectMethod::Manual => "manual",
            ConnectMethod::Wordpress => "wordpress",
            ConnectMethod::Github => "github",
        }
    }
}

impl FromStr for ConnectMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "manual" => Ok(ConnectMethod::Manual),
            "wordpress" => Ok(ConnectMethod::Wordpress),
            "github" => Ok(ConnectMethod::Github),
            other => Err(format!(
                "unknown connect method '{other}' (expected manual, wordpress or github)"
            )),
        }
    }
}

// ====== Persisted entities ======

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: String,
    pub domain: String,
    pub connect_method: ConnectMethod,
    pub verified: bool,
    pub verify_token: Option<String>,
    pub last_score_seo: Option<i64>,
    pub last_score_index: Option<i64>,
    pub last_audit_at: Option<DateTime<Utc>>,
    pub last_issues: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    pub id: String,
    pub site_id: String,
    pub status: RunStatus,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub summary: Option<String>,
    pub details: Option<serde_json::Value>,
}

impl Run {
    /// SEO score recorded in the run details, if the run got that far.
    pub fn seo_score(&self) -> Option<i64> {
        self.details
            .as_ref()
            .and_then(|d| d.get("seoScore"))
            .and_then(|v| v.as_i64())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRecommendation {
    pub id: String,
    pub site_id: String,
    pub title: String,
    pub rationale: String,
    pub patch: serde_json::Value,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

// ====== Audit results ======

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResult {
    pub score: i64,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Per-category results, keyed the way the dashboard reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub technical: CategoryResult,
    pub content: CategoryResult,
    pub performance: CategoryResult,
    pub accessibility: CategoryResult,
    pub ai_optimization: CategoryResult,
}

impl CategoryBreakdown {
    pub fn get(&self, category: Category) -> &CategoryResult {
        match category {
            Category::Technical => &self.technical,
            Category::Content => &self.content,
            Category::Performance => &self.performance,
            Category::Accessibility => &self.accessibility,
            Category::AiOptimization => &self.ai_optimization,
        }
    }

    pub fn score(&self, category: Category) -> i64 {
        self.get(category).score
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueSummary {
    pub summary: String,
    pub suggestions: Vec<String>,
    pub critical: Vec<String>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationPatch {
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub title: String,
    pub rationale: String,
    pub priority: Priority,
    pub category: Category,
    pub patch: RecommendationPatch,
    pub impact: String,
}

impl Recommendation {
    /// Patch payload as stored: instructions plus priority/impact metadata.
    pub fn stored_patch(&self) -> serde_json::Value {
        serde_json::json!({
            "type": self.patch.kind,
            "content": self.patch.content,
            "priority": self.priority,
            "category": self.category,
            "impact": self.impact,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trend {
    pub seo_trend: TrendDirection,
    pub index_trend: TrendDirection,
    pub last_week_score: i64,
    pub improvement: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub seo_score: i64,
    pub index_score: i64,
    pub overall_score: i64,
    pub analysis: CategoryBreakdown,
    pub issues: IssueSummary,
    pub recommendations: Vec<Recommendation>,
    pub trends: Trend,
}

impl AnalysisResult {
    /// One-line score summary stored on the run.
    pub fn headline(&self) -> String {
        format!(
            "SEO: {}/100, Indexability: {}/100, Overall: {}/100",
            self.seo_score, self.index_score, self.overall_score
        )
    }
}

/// `details` payload of a succeeded run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunDetails<'a> {
    pub seo_score: i64,
    pub index_score: i64,
    pub overall_score: i64,
    pub trends: &'a Trend,
    pub analysis: &'a CategoryBreakdown,
    pub issues: &'a IssueSummary,
    pub recommendations: usize,
    pub critical_issues: usize,
    pub warning_issues: usize,
}

impl<'a> From<&'a AnalysisResult> for RunDetails<'a> {
    fn from(result: &'a AnalysisResult) -> Self {
        Self {
            seo_score: result.seo_score,
            index_score: result.index_score,
            overall_score: result.overall_score,
            trends: &result.trends,
            analysis: &result.analysis,
            issues: &result.issues,
            recommendations: result.recommendations.len(),
            critical_issues: result.issues.critical.len(),
            warning_issues: result.issues.warnings.len(),
        }
    }
}

/// `last_issues` payload written to the site after an audit.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteIssues<'a> {
    pub summary: &'a str,
    pub suggestions: &'a [String],
    pub critical: &'a [String],
    pub warnings: &'a [String],
    pub trends: &'a Trend,
    pub overall_score: i64,
    pub detailed_analysis: &'a CategoryBreakdown,
}

impl<'a> From<&'a AnalysisResult> for SiteIssues<'a> {
    fn from(result: &'a AnalysisResult) -> Self {
        Self {
            summary: &result.issues.summary,
            suggestions: &result.issues.suggestions,
            critical: &result.issues.critical,
            warnings: &result.issues.warnings,
            trends: &result.trends,
            overall_score: result.overall_score,
            detailed_analysis: &result.analysis,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(score: i64) -> CategoryResult {
        CategoryResult {
            score,
            issues: vec![],
            recommendations: vec![],
        }
    }

    #[test]
    fn test_category_serializes_camel_case() {
        let json = serde_json::to_string(&Category::AiOptimization).unwrap();
        assert_eq!(json, "\"aiOptimization\"");
        assert_eq!(Category::AiOptimization.as_str(), "aiOptimization");
    }

    #[test]
    fn test_run_status_round_trip_and_terminality() {
        for status in [RunStatus::Running, RunStatus::Succeeded, RunStatus::Failed] {
            assert_eq!(status.as_str().parse::<RunStatus>().unwrap(), status);
        }
        assert!(!RunStatus::Running.is_terminal());
        assert!(RunStatus::Failed.is_terminal());
        assert!("paused".parse::<RunStatus>().is_err());
    }

    #[test]
    fn test_connect_method_parse_is_case_insensitive() {
        assert_eq!("WordPress".parse::<ConnectMethod>().unwrap(), ConnectMethod::Wordpress);
        assert!("ftp".parse::<ConnectMethod>().is_err());
    }

    #[test]
    fn test_run_seo_score_reads_details() {
        let mut run = Run {
            id: "r".into(),
            site_id: "s".into(),
            status: RunStatus::Succeeded,
            started_at: Utc::now(),
            finished_at: None,
            summary: None,
            details: Some(serde_json::json!({ "seoScore": 72 })),
        };
        assert_eq!(run.seo_score(), Some(72));

        run.details = Some(serde_json::json!({ "error": "boom" }));
        assert_eq!(run.seo_score(), None);

        run.details = None;
        assert_eq!(run.seo_score(), None);
    }

    #[test]
    fn test_result_payload_shape() {
        let result = AnalysisResult {
            seo_score: 69,
            index_score: 65,
            overall_score: 67,
            analysis: CategoryBreakdown {
                technical: category(65),
                content: category(80),
                performance: category(55),
                accessibility: category(90),
                ai_optimization: category(50),
            },
            issues: IssueSummary {
                summary: "ok".into(),
                suggestions: vec![],
                critical: vec![],
                warnings: vec![],
            },
            recommendations: vec![],
            trends: Trend {
                seo_trend: TrendDirection::Stable,
                index_trend: TrendDirection::Stable,
                last_week_score: 69,
                improvement: 0,
            },
        };

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["seoScore"], 69);
        assert_eq!(value["analysis"]["aiOptimization"]["score"], 50);
        assert_eq!(value["trends"]["lastWeekScore"], 69);
        assert_eq!(value["trends"]["seoTrend"], "stable");
        assert_eq!(result.headline(), "SEO: 69/100, Indexability: 65/100, Overall: 67/100");

        let details = serde_json::to_value(RunDetails::from(&result)).unwrap();
        assert_eq!(details["recommendations"], 0);
        assert_eq!(details["criticalIssues"], 0);
        assert_eq!(details["seoScore"], 69);
    }

    #[test]
    fn test_stored_patch_carries_metadata() {
        let rec = Recommendation {
            title: "Improve Accessibility".into(),
            rationale: "because".into(),
            priority: Priority::Low,
            category: Category::Accessibility,
            patch: RecommendationPatch {
                kind: "accessibility_improvements".into(),
                content: "Improve: x".into(),
            },
            impact: "Low".into(),
        };
        let patch = rec.stored_patch();
        assert_eq!(patch["type"], "accessibility_improvements");
        assert_eq!(patch["priority"], "low");
        assert_eq!(patch["category"], "accessibility");
        assert_eq!(patch["impact"], "Low");
    }
}
