//! Composite scores and issue classification.

use crate::domain::models::{Category, CategoryBreakdown, IssueSummary};

/// SEO weights in hundredths; they sum to 100.
const SEO_WEIGHTS: [(Category, i64); 5] = [
    (Category::Technical, 30),
    (Category::Content, 25),
    (Category::Performance, 20),
    (Category::Accessibility, 15),
    (Category::AiOptimization, 10),
];

/// Indexability weights in hundredths; they sum to 100.
const INDEX_WEIGHTS: [(Category, i64); 3] = [
    (Category::Technical, 40),
    (Category::Content, 30),
    (Category::AiOptimization, 30),
];

/// Substrings that mark a technical issue as critical. Case-sensitive.
pub const CRITICAL_KEYWORDS: [&str; 3] = ["404", "broken", "error"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositeScores {
    pub seo: i64,
    pub index: i64,
    pub overall: i64,
}

/// Round-half-up of `numerator / denominator` for non-negative inputs.
fn round_half_up(numerator: i64, denominator: i64) -> i64 {
    (2 * numerator + denominator).div_euclid(2 * denominator)
}

fn weighted(weights: &[(Category, i64)], score: impl Fn(Category) -> i64) -> i64 {
    let sum: i64 = weights.iter().map(|(c, w)| score(*c) * w).sum();
    round_half_up(sum, 100)
}

pub fn composite_scores(score: impl Fn(Category) -> i64) -> CompositeScores {
    let seo = weighted(&SEO_WEIGHTS, &score);
    let index = weighted(&INDEX_WEIGHTS, &score);
    CompositeScores {
        seo,
        index,
        overall: round_half_up(seo + index, 2),
    }
}

impl From<&CategoryBreakdown> for CompositeScores {
    fn from(analysis: &CategoryBreakdown) -> Self {
        composite_scores(|c| analysis.score(c))
    }
}

pub fn is_critical(issue: &str) -> bool {
    CRITICAL_KEYWORDS.iter().any(|k| issue.contains(k))
}

/// Split technical issues into critical/warnings; suggestions are the
/// technical issues followed by the content issues.
pub fn summarize_issues(technical: &[String], content: &[String]) -> IssueSummary {
    let (critical, warnings): (Vec<String>, Vec<String>) =
        technical.iter().cloned().partition(|issue| is_critical(issue));

    let suggestions = technical.iter().chain(content).cloned().collect();

    IssueSummary {
        summary: summary_sentence(critical.len(), warnings.len()),
        suggestions,
        critical,
        warnings,
    }
}

pub fn summary_sentence(critical: usize, warnings: usize) -> String {
    let total = critical + warnings;

    if critical > 0 {
        format!(
            "Your site has {critical} critical issues that need immediate attention. \
             These are preventing proper indexing and search visibility."
        )
    } else if total > 5 {
        format!(
            "Your site has {total} areas for improvement. While not critical, \
             addressing these will significantly boost your search rankings."
        )
    } else if total > 0 {
        format!(
            "Your site is mostly optimized! We found {total} minor improvements \
             that will help boost your search visibility."
        )
    } else {
        "Excellent! Your site is well-optimized for search engines and AI systems. \
         Keep up the great work!"
            .to_string()
    }
}
