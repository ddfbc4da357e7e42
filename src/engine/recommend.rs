//! Threshold rules that turn low category scores into recommendations.

use crate::domain::models::{
    Category, CategoryBreakdown, Priority, Recommendation, RecommendationPatch,
};

struct Rule {
    category: Category,
    threshold: i64,
    priority: Priority,
    title: &'static str,
    rationale: &'static str,
    patch_type: &'static str,
    patch_prefix: &'static str,
    issues_in_patch: usize,
    impact: &'static str,
}

/// Evaluation order is also emission order.
const RULES: [Rule; 5] = [
    Rule {
        category: Category::Technical,
        threshold: 70,
        priority: Priority::High,
        title: "Fix Critical Technical SEO Issues",
        rationale: "Your site has technical issues that prevent proper indexing. These should be fixed immediately to improve search visibility.",
        patch_type: "technical_fixes",
        patch_prefix: "Address: ",
        issues_in_patch: 3,
        impact: "High - Will significantly improve indexing and crawling",
    },
    Rule {
        category: Category::Content,
        threshold: 75,
        priority: Priority::Medium,
        title: "Optimize Content for Search Engines",
        rationale: "Your content needs optimization to rank better in search results and be understood by AI systems.",
        patch_type: "content_optimization",
        patch_prefix: "Focus on: ",
        issues_in_patch: 2,
        impact: "Medium - Will improve search rankings and AI comprehension",
    },
    Rule {
        category: Category::Performance,
        threshold: 60,
        priority: Priority::High,
        title: "Improve Site Performance",
        rationale: "Slow loading times hurt user experience and search rankings. Performance optimization is crucial for SEO success.",
        patch_type: "performance_optimization",
        patch_prefix: "Optimize: ",
        issues_in_patch: 2,
        impact: "High - Will improve user experience and search rankings",
    },
    Rule {
        category: Category::AiOptimization,
        threshold: 65,
        priority: Priority::Medium,
        title: "Optimize for AI and ChatGPT",
        rationale: "Your site needs better structure for AI systems to understand and recommend your content. This is crucial for future search visibility.",
        patch_type: "ai_optimization",
        patch_prefix: "Add: ",
        issues_in_patch: 2,
        impact: "Medium - Will improve AI comprehension and future search visibility",
    },
    Rule {
        category: Category::Accessibility,
        threshold: 70,
        priority: Priority::Low,
        title: "Improve Accessibility",
        rationale: "Better accessibility helps all users and can improve search rankings. It's also important for AI systems to understand your content.",
        patch_type: "accessibility_improvements",
        patch_prefix: "Improve: ",
        issues_in_patch: 2,
        impact: "Low - Will improve user experience and compliance",
    },
];

/// Score below which a category gets a recommendation.
pub fn threshold(category: Category) -> i64 {
    RULES
        .iter()
        .find(|r| r.category == category)
        .map(|r| r.threshold)
        .unwrap_or(0)
}

impl Rule {
    fn build(&self, issues: &[String]) -> Recommendation {
        let cited = &issues[..self.issues_in_patch.min(issues.len())];

        Recommendation {
            title: self.title.to_string(),
            rationale: self.rationale.to_string(),
            priority: self.priority,
            category: self.category,
            patch: RecommendationPatch {
                kind: self.patch_type.to_string(),
                content: format!("{}{}", self.patch_prefix, cited.join(", ")),
            },
            impact: self.impact.to_string(),
        }
    }
}

pub fn generate_recommendations(analysis: &CategoryBreakdown) -> Vec<Recommendation> {
    RULES
        .iter()
        .filter_map(|rule| {
            let result = analysis.get(rule.category);
            (result.score < rule.threshold).then(|| rule.build(&result.issues))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::CategoryResult;

    fn result(score: i64, issues: &[&str]) -> CategoryResult {
        CategoryResult {
            score,
            issues: issues.iter().map(|s| s.to_string()).collect(),
            recommendations: vec![],
        }
    }

    fn breakdown(t: i64, c: i64, p: i64, a: i64, ai: i64) -> CategoryBreakdown {
        CategoryBreakdown {
            technical: result(t, &["t1", "t2", "t3", "t4"]),
            content: result(c, &["c1", "c2", "c3"]),
            performance: result(p, &["p1", "p2"]),
            accessibility: result(a, &["a1"]),
            ai_optimization: result(ai, &["ai1", "ai2", "ai3"]),
        }
    }

    #[test]
    fn test_reference_scenario_emits_three_in_order() {
        let recs = generate_recommendations(&breakdown(65, 80, 55, 90, 50));

        let categories: Vec<Category> = recs.iter().map(|r| r.category).collect();
        assert_eq!(
            categories,
            vec![Category::Technical, Category::Performance, Category::AiOptimization]
        );
        let priorities: Vec<Priority> = recs.iter().map(|r| r.priority).collect();
        assert_eq!(priorities, vec![Priority::High, Priority::High, Priority::Medium]);
    }

    #[test]
    fn test_patch_content_cites_leading_issues() {
        let recs = generate_recommendations(&breakdown(0, 0, 0, 0, 0));
        assert_eq!(recs.len(), 5);

        assert_eq!(recs[0].patch.content, "Address: t1, t2, t3");
        assert_eq!(recs[0].patch.kind, "technical_fixes");
        assert_eq!(recs[1].patch.content, "Focus on: c1, c2");
        assert_eq!(recs[2].patch.content, "Optimize: p1, p2");
        assert_eq!(recs[3].patch.content, "Add: ai1, ai2");
        // fewer issues than requested
        assert_eq!(recs[4].patch.content, "Improve: a1");
        assert_eq!(recs[4].category, Category::Accessibility);
    }

    #[test]
    fn test_threshold_is_strict() {
        let at_threshold = breakdown(70, 75, 60, 70, 65);
        assert!(generate_recommendations(&at_threshold).is_empty());

        let just_below = breakdown(69, 74, 59, 69, 64);
        assert_eq!(generate_recommendations(&just_below).len(), 5);
    }

    #[test]
    fn test_each_category_independent() {
        for category in Category::ALL {
            let mut analysis = breakdown(100, 100, 100, 100, 100);
            let limit = threshold(category);
            match category {
                Category::Technical => analysis.technical.score = limit - 1,
                Category::Content => analysis.content.score = limit - 1,
                Category::Performance => analysis.performance.score = limit - 1,
                Category::Accessibility => analysis.accessibility.score = limit - 1,
                Category::AiOptimization => analysis.ai_optimization.score = limit - 1,
            }
            let recs = generate_recommendations(&analysis);
            assert_eq!(recs.len(), 1, "{category}");
            assert_eq!(recs[0].category, category);
        }
    }
}
