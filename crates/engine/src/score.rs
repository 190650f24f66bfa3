//! Similarity scoring. Every score is in [0, 100]; normalized-equal codes
//! score exactly 100.

use crate::config::MatchPolicy;
use crate::normalize::NormalKey;

// ---------------------------------------------------------------------------
// Ratio primitives
// ---------------------------------------------------------------------------

/// Plain edit-distance ratio.
pub fn ratio(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b) * 100.0
}

/// Token-order-insensitive ratio: whitespace tokens compared sorted.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Substring ratio: best ratio of the shorter string against every
/// same-length character window of the longer.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let (short, long) = if a_chars.len() <= b_chars.len() {
        (a_chars, b_chars)
    } else {
        (b_chars, a_chars)
    };

    if short.is_empty() {
        return if long.is_empty() { 100.0 } else { 0.0 };
    }

    let needle: String = short.iter().collect();
    let mut best = 0.0_f64;
    for window in long.windows(short.len()) {
        let hay: String = window.iter().collect();
        let r = ratio(&needle, &hay);
        if r > best {
            best = r;
        }
        if best >= 100.0 {
            break;
        }
    }
    best
}

/// Cheap ranking metric for the candidate pre-filter. Never the final
/// authority on any reported score.
pub fn cheap_ratio(a: &str, b: &str) -> f64 {
    strsim::sorensen_dice(a, b) * 100.0
}

// ---------------------------------------------------------------------------
// Policy scoring
// ---------------------------------------------------------------------------

impl MatchPolicy {
    /// Exact score between two keys produced under this policy.
    pub fn score(&self, query: &NormalKey, candidate: &NormalKey) -> f64 {
        match (query, candidate) {
            (NormalKey::Variants(q), NormalKey::Variants(c)) => score_variants(q, c),
            (
                NormalKey::BaseSuffix { base: qb, suffix: qs },
                NormalKey::BaseSuffix { base: cb, suffix: cs },
            ) => score_base_suffix(qb, qs, cb, cs),
            (NormalKey::Token(q), NormalKey::Token(c)) => score_token(q, c),
            // Keys from different policies never meet within one job.
            _ => 0.0,
        }
    }
}

/// Composite score: max over every variant pair of plain, token-sort, and
/// partial ratios.
fn score_variants(query: &[String], candidate: &[String]) -> f64 {
    let mut best = 0.0_f64;
    for q in query {
        for c in candidate {
            best = best
                .max(ratio(q, c))
                .max(token_sort_ratio(q, c))
                .max(partial_ratio(q, c));
            if best >= 100.0 {
                return 100.0;
            }
        }
    }
    best
}

fn score_base_suffix(qb: &str, qs: &str, cb: &str, cs: &str) -> f64 {
    if qb == cb {
        if qs == cs {
            return 100.0;
        }
        if qs.is_empty() || cs.is_empty() {
            // An unqualified code reasonably matches a qualified one,
            // but not with certainty.
            return 90.0;
        }
        return 85.0 + 15.0 * ratio(qs, cs) / 100.0;
    }

    let base = ratio(qb, cb);
    if base < 60.0 {
        // Weak base matches are rejected outright.
        return 0.0;
    }
    // Non-exact matches never report full confidence.
    (base * 0.8).min(95.0)
}

fn score_token(q: &str, c: &str) -> f64 {
    if q == c {
        return 100.0;
    }

    let q_len = q.chars().count();
    let c_len = c.chars().count();
    let longer = q_len.max(c_len);
    let diff_pct = q_len.abs_diff(c_len) as f64 / longer as f64;
    if diff_pct > 0.30 {
        // Codes of very different length are assumed unrelated.
        return 0.0;
    }

    let r = ratio(q, c);
    if r < 60.0 {
        return 0.0;
    }
    (r * (0.5 + (1.0 - diff_pct) * 0.5)).min(95.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
