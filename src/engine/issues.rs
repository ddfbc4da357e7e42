//! Issue catalogs and the randomized issue sampler.
//!
//! Issue counts are a pure function of the seed; which issues are picked,
//! and in what order, comes from a [`RandomSource`].

use rand::Rng;

use crate::domain::models::Category;

/// Source of uniform random indices for issue sampling.
pub trait RandomSource: Send + Sync {
    /// Returns an index in `0..upper`. Callers never pass `upper == 0`.
    fn draw(&self, upper: usize) -> usize;
}

/// Thread-local entropy, never seeded.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn draw(&self, upper: usize) -> usize {
        rand::thread_rng().gen_range(0..upper)
    }
}

const TECHNICAL_ISSUES: [&str; 15] = [
    "Missing meta description on homepage",
    "No sitemap.xml found",
    "Missing robots.txt file",
    "Duplicate title tags detected",
    "Missing canonical URLs",
    "404 errors found on important pages",
    "Mixed content (HTTP/HTTPS) issues",
    "Missing hreflang tags for internationalization",
    "Broken internal links detected",
    "Missing favicon",
    "No structured data markup",
    "Missing Open Graph tags",
    "Incorrect meta viewport tag",
    "Missing language declaration",
    "No breadcrumb navigation",
];

const CONTENT_ISSUES: [&str; 15] = [
    "Homepage title is too short (under 30 characters)",
    "Missing alt text on images",
    "Low content-to-code ratio",
    "Duplicate content detected",
    "Missing internal linking strategy",
    "Poor keyword density",
    "Missing FAQ section",
    "No blog or news section",
    "Missing contact information",
    "Insufficient content depth",
    "Missing schema markup for business info",
    "No customer testimonials",
    "Missing privacy policy",
    "No terms of service",
    "Missing about page",
];

const PERFORMANCE_ISSUES: [&str; 15] = [
    "Large unoptimized images",
    "Missing image compression",
    "No CDN implementation",
    "Heavy JavaScript libraries",
    "Missing browser caching headers",
    "Unminified CSS and JavaScript",
    "Large page size (>2MB)",
    "Slow server response time",
    "Missing lazy loading for images",
    "Too many HTTP requests",
    "Render-blocking resources",
    "Missing compression (gzip/brotli)",
    "Inefficient database queries",
    "No caching strategy",
    "Missing service worker",
];

const ACCESSIBILITY_ISSUES: [&str; 15] = [
    "Missing alt text on images",
    "Poor color contrast ratios",
    "Missing heading hierarchy (h1, h2, h3)",
    "No skip navigation links",
    "Missing form labels",
    "Non-descriptive link text",
    "Missing focus indicators",
    "No keyboard navigation support",
    "Missing ARIA labels",
    "Inaccessible PDF documents",
    "Missing language attributes",
    "No screen reader support",
    "Missing error message descriptions",
    "Inaccessible video content",
    "Missing table headers",
];

const AI_OPTIMIZATION_ISSUES: [&str; 15] = [
    "Missing structured data for AI understanding",
    "No semantic HTML structure",
    "Missing FAQ schema markup",
    "Insufficient context for AI comprehension",
    "Missing business information schema",
    "No product/service descriptions",
    "Missing contact information markup",
    "Inadequate content categorization",
    "Missing entity recognition markers",
    "No AI-friendly content summaries",
    "Missing topic clustering",
    "Insufficient content depth for AI",
    "Missing conversational content",
    "No AI training data optimization",
    "Missing semantic relationships",
];

const TECHNICAL_ADVICE: [&str; 5] = [
    "Implement comprehensive meta tag strategy",
    "Create XML sitemap with proper priority settings",
    "Add robots.txt with crawl directives",
    "Fix broken links and redirect chains",
    "Implement proper canonical URL structure",
];

const CONTENT_ADVICE: [&str; 5] = [
    "Optimize title tags for target keywords",
    "Add descriptive alt text to all images",
    "Create comprehensive FAQ section",
    "Implement internal linking strategy",
    "Add customer testimonials and reviews",
];

const PERFORMANCE_ADVICE: [&str; 5] = [
    "Compress and optimize images",
    "Implement lazy loading for images",
    "Minify CSS and JavaScript files",
    "Enable browser caching",
    "Use CDN for static assets",
];

const ACCESSIBILITY_ADVICE: [&str; 5] = [
    "Improve color contrast ratios",
    "Add proper heading hierarchy",
    "Implement keyboard navigation",
    "Add ARIA labels and descriptions",
    "Test with screen readers",
];

const AI_OPTIMIZATION_ADVICE: [&str; 5] = [
    "Add comprehensive structured data",
    "Implement semantic HTML structure",
    "Create AI-friendly content summaries",
    "Add entity recognition markup",
    "Optimize for conversational AI queries",
];

/// Candidate issues for a category, in catalog order.
pub fn catalog(category: Category) -> &'static [&'static str] {
    match category {
        Category::Technical => &TECHNICAL_ISSUES,
        Category::Content => &CONTENT_ISSUES,
        Category::Performance => &PERFORMANCE_ISSUES,
        Category::Accessibility => &ACCESSIBILITY_ISSUES,
        Category::AiOptimization => &AI_OPTIMIZATION_ISSUES,
    }
}

/// Standing advice for a category, independent of the sampled issues.
pub fn advice(category: Category) -> &'static [&'static str] {
    match category {
        Category::Technical => &TECHNICAL_ADVICE,
        Category::Content => &CONTENT_ADVICE,
        Category::Performance => &PERFORMANCE_ADVICE,
        Category::Accessibility => &ACCESSIBILITY_ADVICE,
        Category::AiOptimization => &AI_OPTIMIZATION_ADVICE,
    }
}

/// `(divisor, offset)` for `count = seed / divisor + offset`.
const fn count_rule(category: Category) -> (u32, u32) {
    match category {
        Category::Technical => (20, 2),
        Category::Content => (25, 1),
        Category::Performance => (30, 2),
        Category::Accessibility => (35, 1),
        Category::AiOptimization => (40, 2),
    }
}

/// Number of issues requested for a category at this seed.
pub fn issue_count(category: Category, seed: u32) -> usize {
    let (divisor, offset) = count_rule(category);
    (seed / divisor + offset) as usize
}

/// Draw `issue_count` distinct issues from the category catalog.
pub fn sample_issues(category: Category, seed: u32, rng: &dyn RandomSource) -> Vec<String> {
    sample_without_replacement(catalog(category), issue_count(category, seed), rng)
}

/// Partial Fisher-Yates over the catalog indices. Asking for more entries
/// than the catalog holds returns the whole catalog, shuffled.
pub fn sample_without_replacement(
    items: &[&str],
    count: usize,
    rng: &dyn RandomSource,
) -> Vec<String> {
    let take = count.min(items.len());
    let mut order: Vec<usize> = (0..items.len()).collect();

    for i in 0..take {
        let j = i + rng.draw(items.len() - i);
        order.swap(i, j);
    }

    order[..take].iter().map(|&idx| items[idx].to_string()).collect()
}
