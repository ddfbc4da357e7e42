//! Scoring and trend-analysis engine.
//!
//! Pipeline: seed → category scores → sampled issues → composite scores →
//! recommendations, with the trend computed against run history. Everything
//! here is synchronous; the only non-determinism is the [`RandomSource`]
//! used for issue sampling.

pub mod aggregate;
pub mod issues;
pub mod recommend;
pub mod scoring;
pub mod seed;
pub mod trend;

pub use aggregate::CompositeScores;
pub use issues::{RandomSource, ThreadRandom};
pub use seed::derive_seed;

use crate::domain::models::{AnalysisResult, Category, CategoryBreakdown, CategoryResult};

fn analyze_category(category: Category, seed: u32, rng: &dyn RandomSource) -> CategoryResult {
    CategoryResult {
        score: scoring::category_score(category, seed),
        issues: issues::sample_issues(category, seed, rng),
        recommendations: issues::advice(category).iter().map(|s| s.to_string()).collect(),
    }
}

/// Score every category for the seed.
pub fn analyze_categories(seed: u32, rng: &dyn RandomSource) -> CategoryBreakdown {
    CategoryBreakdown {
        technical: analyze_category(Category::Technical, seed, rng),
        content: analyze_category(Category::Content, seed, rng),
        performance: analyze_category(Category::Performance, seed, rng),
        accessibility: analyze_category(Category::Accessibility, seed, rng),
        ai_optimization: analyze_category(Category::AiOptimization, seed, rng),
    }
}

/// Run the full pipeline for a domain.
///
/// `history` is the SEO score of each recent run, newest first (see
/// [`trend::classify_trend`]).
pub fn analyze(domain: &str, history: &[Option<i64>], rng: &dyn RandomSource) -> AnalysisResult {
    let seed = derive_seed(domain);
    let analysis = analyze_categories(seed, rng);
    let scores = CompositeScores::from(&analysis);

    let recommendations = recommend::generate_recommendations(&analysis);
    let issues = aggregate::summarize_issues(&analysis.technical.issues, &analysis.content.issues);
    let trends = trend::classify_trend(history, scores.seo);

    tracing::debug!(
        domain,
        seed,
        seo = scores.seo,
        index = scores.index,
        "scored domain"
    );

    AnalysisResult {
        seo_score: scores.seo,
        index_score: scores.index,
        overall_score: scores.overall,
        analysis,
        issues,
        recommendations,
        trends,
    }
}
