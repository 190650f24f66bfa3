//! Result ordering, quality tiers, threshold filtering, presentation forms.

use std::cmp::Ordering;

use crate::model::{MatchResult, MatchSummary, QualityTier};

/// Sort by score descending. Stable: equal scores keep query-row order.
pub fn sort_results(results: &mut [MatchResult]) {
    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
}

/// Tier counts over the full result set, never a filtered view.
pub fn compute_summary(
    results: &[MatchResult],
    skipped_reference_rows: usize,
    skipped_query_rows: usize,
) -> MatchSummary {
    let mut matched = 0;
    let mut high = 0;
    let mut medium = 0;
    let mut low = 0;

    for r in results {
        if r.matched_code.is_some() {
            matched += 1;
        }
        match QualityTier::from_score(r.score) {
            QualityTier::High => high += 1,
            QualityTier::Medium => medium += 1,
            QualityTier::Low => low += 1,
        }
    }

    MatchSummary {
        total: results.len(),
        matched,
        high,
        medium,
        low,
        skipped_reference_rows,
        skipped_query_rows,
    }
}

/// The displayed/exported subset. Filters on the numeric score, never on a
/// formatted string, and leaves tier counts untouched.
pub fn filter_by_threshold(results: &[MatchResult], threshold: f64) -> Vec<&MatchResult> {
    results.iter().filter(|r| r.score >= threshold).collect()
}

/// Percentage string to one decimal. Presentation only; the numeric score
/// stays on the result.
pub fn format_score(score: f64) -> String {
    format!("{score:.1}%")
}

/// Currency string to two decimals.
pub fn format_price(price: f64) -> String {
    format!("${price:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(query: &str, score: f64) -> MatchResult {
        MatchResult {
            query_code: query.into(),
            matched_code: (score > 0.0).then(|| format!("ref_{query}")),
            score,
            price: (score > 0.0).then_some(1.0),
            alternates: Vec::new(),
        }
    }

    #[test]
    fn sort_is_stable_on_ties() {
        let mut results = vec![
            result("a", 80.0),
            result("b", 95.0),
            result("c", 80.0),
            result("d", 10.0),
        ];
        sort_results(&mut results);
        let order: Vec<&str> = results.iter().map(|r| r.query_code.as_str()).collect();
        assert_eq!(order, vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn summary_counts_full_set() {
        let results = vec![
            result("a", 100.0),
            result("b", 90.0),
            result("c", 75.0),
            result("d", 0.0),
        ];
        let summary = compute_summary(&results, 2, 1);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.matched, 3);
        assert_eq!(summary.high, 2);
        assert_eq!(summary.medium, 1);
        assert_eq!(summary.low, 1);
        assert_eq!(summary.skipped_reference_rows, 2);
        assert_eq!(summary.skipped_query_rows, 1);
    }

    #[test]
    fn threshold_filters_display_not_tiers() {
        // A 75-score result is excluded at threshold 80 but still counts
        // in the medium tier.
        let results = vec![result("a", 85.0), result("b", 75.0)];
        let filtered = filter_by_threshold(&results, 80.0);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].query_code, "a");

        let summary = compute_summary(&results, 0, 0);
        assert_eq!(summary.medium, 2);
    }

    #[test]
    fn threshold_boundary_is_inclusive() {
        let results = vec![result("a", 70.0)];
        assert_eq!(filter_by_threshold(&results, 70.0).len(), 1);
    }

    #[test]
    fn presentation_forms() {
        assert_eq!(format_score(100.0), "100.0%");
        assert_eq!(format_score(85.25), "85.2%");
        assert_eq!(format_price(9.5), "$9.50");
        assert_eq!(format_price(0.0), "$0.00");
    }
}
