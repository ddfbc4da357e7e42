//! Seed → category score mapping.

use crate::domain::models::Category;

/// Fixed arithmetic profile of a category score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreProfile {
    pub base: i64,
    pub range: i64,
    pub min: i64,
    pub max: i64,
}

impl ScoreProfile {
    pub const fn for_category(category: Category) -> Self {
        match category {
            Category::Technical => Self { base: 70, range: 30, min: 40, max: 95 },
            Category::Content => Self { base: 65, range: 25, min: 45, max: 90 },
            Category::Performance => Self { base: 60, range: 25, min: 35, max: 85 },
            Category::Accessibility => Self { base: 70, range: 25, min: 50, max: 95 },
            Category::AiOptimization => Self { base: 55, range: 35, min: 30, max: 90 },
        }
    }

    /// `clamp(base + seed mod range, min, max)`
    pub fn score(&self, seed: u32) -> i64 {
        (self.base + i64::from(seed) % self.range).clamp(self.min, self.max)
    }
}

pub fn category_score(category: Category, seed: u32) -> i64 {
    ScoreProfile::for_category(category).score(seed)
}
