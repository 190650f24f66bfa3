//! Per-query search and best/top-N selection.

use std::cmp::Ordering;

use crate::config::MatchPolicy;
use crate::index::CandidateIndex;
use crate::model::{Alternate, MatchResult, QueryRow};

/// Match one query row against the candidate pool.
///
/// The best candidate is selected by strictly-greater score, so ties keep
/// the first-encountered candidate in reference-scan order. That tie-break
/// is deliberate policy, not an accident of iteration. A best score of 0
/// counts as no match. Stateless: nothing survives across queries.
pub fn match_query(
    policy: MatchPolicy,
    index: &CandidateIndex<'_>,
    query: &QueryRow,
    top_n: usize,
    prefilter: bool,
) -> MatchResult {
    let key = policy.normalize(&query.raw_code);
    let pool = index.pool(&key, prefilter.then_some(top_n));

    let mut best: Option<usize> = None;
    let mut best_score = 0.0_f64;
    let mut scored: Vec<(usize, f64)> = Vec::with_capacity(pool.len());

    for i in pool {
        let score = policy.score(&key, index.key(i));
        scored.push((i, score));
        if score > best_score {
            best_score = score;
            best = Some(i);
        }
    }

    // Alternates: runner-ups with a non-zero score, best first. Stable
    // sort keeps reference order among equal scores here too.
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    let alternates: Vec<Alternate> = scored
        .iter()
        .filter(|(i, score)| best != Some(*i) && *score > 0.0)
        .take(top_n)
        .map(|(i, score)| Alternate {
            code: index.rows()[*i].raw_code.clone(),
            score: *score,
        })
        .collect();

    match best {
        Some(i) => MatchResult {
            query_code: query.raw_code.clone(),
            matched_code: Some(index.rows()[i].raw_code.clone()),
            score: best_score,
            price: Some(index.rows()[i].price),
            alternates,
        },
        None => MatchResult {
            query_code: query.raw_code.clone(),
            matched_code: None,
            score: 0.0,
            price: None,
            alternates,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ReferenceRow;

    fn rows(entries: &[(&str, f64)]) -> Vec<ReferenceRow> {
        entries
            .iter()
            .map(|(code, price)| ReferenceRow {
                raw_code: (*code).into(),
                price: *price,
            })
            .collect()
    }

    fn query(code: &str) -> QueryRow {
        QueryRow {
            raw_code: code.into(),
        }
    }

    #[test]
    fn picks_best_match_with_price() {
        let rows = rows(&[("xyz999", 1.0), ("abc123", 9.5)]);
        let index = CandidateIndex::build(MatchPolicy::MultiVariant, &rows);
        let result = match_query(MatchPolicy::MultiVariant, &index, &query("ABC-123"), 1, false);
        assert_eq!(result.matched_code.as_deref(), Some("abc123"));
        assert_eq!(result.score, 100.0);
        assert_eq!(result.price, Some(9.5));
    }

    #[test]
    fn empty_reference_yields_null_result() {
        let rows: Vec<ReferenceRow> = Vec::new();
        let index = CandidateIndex::build(MatchPolicy::SingleToken, &rows);
        let result = match_query(MatchPolicy::SingleToken, &index, &query("abc"), 1, false);
        assert_eq!(result.matched_code, None);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.price, None);
        assert!(result.alternates.is_empty());
    }

    #[test]
    fn all_zero_scores_mean_no_match() {
        let rows = rows(&[("zzzzzz", 1.0)]);
        let index = CandidateIndex::build(MatchPolicy::SingleToken, &rows);
        let result = match_query(MatchPolicy::SingleToken, &index, &query("abc"), 1, false);
        assert_eq!(result.matched_code, None);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn tie_keeps_first_reference_row() {
        // Both normalize to "ab123" and score 100; first row wins.
        let rows = rows(&[("AB-123", 2.0), ("ab123", 3.0)]);
        let index = CandidateIndex::build(MatchPolicy::SingleToken, &rows);
        let result = match_query(MatchPolicy::SingleToken, &index, &query("AB123"), 2, false);
        assert_eq!(result.matched_code.as_deref(), Some("AB-123"));
        assert_eq!(result.price, Some(2.0));
        // The runner-up still surfaces as an alternate.
        assert_eq!(result.alternates.len(), 1);
        assert_eq!(result.alternates[0].code, "ab123");
        assert_eq!(result.alternates[0].score, 100.0);
    }

    #[test]
    fn alternates_sorted_and_capped() {
        let rows = rows(&[
            ("abc123", 1.0),
            ("abc124", 2.0),
            ("abc125", 3.0),
            ("abc12x", 4.0),
        ]);
        let index = CandidateIndex::build(MatchPolicy::MultiVariant, &rows);
        let result = match_query(MatchPolicy::MultiVariant, &index, &query("abc123"), 2, false);
        assert_eq!(result.matched_code.as_deref(), Some("abc123"));
        assert_eq!(result.alternates.len(), 2);
        assert!(result.alternates[0].score >= result.alternates[1].score);
        assert!(result.alternates.iter().all(|a| a.code != "abc123"));
    }

    #[test]
    fn prefilter_can_miss_true_best() {
        // "123abc" ties "abc124" on the cheap bigram ratio (4 shared bigrams
        // each against "abc123"), so a pool of 1 keeps the earlier row,
        // which the exact scorer rejects outright. Bounded recall is the
        // documented trade-off of the pre-filter.
        let rows = rows(&[("123abc", 1.0), ("abc124", 2.0)]);
        let index = CandidateIndex::build(MatchPolicy::SingleToken, &rows);
        let q = query("abc123");

        let brute = match_query(MatchPolicy::SingleToken, &index, &q, 1, false);
        assert_eq!(brute.matched_code.as_deref(), Some("abc124"));

        let filtered = match_query(MatchPolicy::SingleToken, &index, &q, 1, true);
        assert_eq!(filtered.matched_code, None);
        assert_eq!(filtered.score, 0.0);
    }
}
