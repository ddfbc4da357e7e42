use crate::domain::models::{Trend, TrendDirection};

const SEO_TREND_BAND: i64 = 5;
const INDEX_TREND_BAND: i64 = 3;

fn direction(improvement: i64, band: i64) -> TrendDirection {
    if improvement > band {
        TrendDirection::Improving
    } else if improvement < -band {
        TrendDirection::Declining
    } else {
        TrendDirection::Stable
    }
}

/// Classify score movement against recent runs.
///
/// `history` holds the SEO score of each recent run, newest first; `None`
/// for runs that never recorded one. The reference is the second entry.
///
/// Both directions use the SEO improvement. The index trend does not look
/// at index scores.
pub fn classify_trend(history: &[Option<i64>], current_seo: i64) -> Trend {
    if history.len() < 2 {
        return Trend {
            seo_trend: TrendDirection::Stable,
            index_trend: TrendDirection::Stable,
            last_week_score: current_seo,
            improvement: 0,
        };
    }

    let last_week_score = history[1].unwrap_or(current_seo);
    let improvement = current_seo - last_week_score;

    Trend {
        seo_trend: direction(improvement, SEO_TREND_BAND),
        index_trend: direction(improvement, INDEX_TREND_BAND),
        last_week_score,
        improvement,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_history_is_stable() {
        for history in [vec![], vec![Some(10)]] {
            let trend = classify_trend(&history, 80);
            assert_eq!(trend.seo_trend, TrendDirection::Stable);
            assert_eq!(trend.index_trend, TrendDirection::Stable);
            assert_eq!(trend.last_week_score, 80);
            assert_eq!(trend.improvement, 0);
        }
    }

    #[test]
    fn test_reference_scenario_improving() {
        let trend = classify_trend(&[Some(69), Some(60)], 69);
        assert_eq!(trend.last_week_score, 60);
        assert_eq!(trend.improvement, 9);
        assert_eq!(trend.seo_trend, TrendDirection::Improving);
        assert_eq!(trend.index_trend, TrendDirection::Improving);
    }

    #[test]
    fn test_bands_differ_for_same_improvement() {
        let trend = classify_trend(&[None, Some(70), Some(10)], 74);
        assert_eq!(trend.improvement, 4);
        assert_eq!(trend.seo_trend, TrendDirection::Stable);
        assert_eq!(trend.index_trend, TrendDirection::Improving);

        let trend = classify_trend(&[None, Some(70)], 66);
        assert_eq!(trend.improvement, -4);
        assert_eq!(trend.seo_trend, TrendDirection::Stable);
        assert_eq!(trend.index_trend, TrendDirection::Declining);
    }

    #[test]
    fn test_band_edges_are_exclusive() {
        let trend = classify_trend(&[None, Some(70)], 75);
        assert_eq!(trend.seo_trend, TrendDirection::Stable);
        let trend = classify_trend(&[None, Some(70)], 64);
        assert_eq!(trend.seo_trend, TrendDirection::Declining);
        let trend = classify_trend(&[None, Some(70)], 67);
        assert_eq!(trend.index_trend, TrendDirection::Stable);
    }

    #[test]
    fn test_missing_reference_score_falls_back_to_current() {
        let trend = classify_trend(&[Some(50), None, Some(10)], 72);
        assert_eq!(trend.last_week_score, 72);
        assert_eq!(trend.improvement, 0);
        assert_eq!(trend.seo_trend, TrendDirection::Stable);
    }
}
