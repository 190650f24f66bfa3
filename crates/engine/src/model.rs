use serde::Serialize;

use crate::config::MatchPolicy;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A single reference row: a raw supplier code and its unit price.
///
/// Rows are an immutable snapshot for the duration of one job; the engine
/// never mutates them.
#[derive(Debug, Clone)]
pub struct ReferenceRow {
    pub raw_code: String,
    pub price: f64,
}

/// A single query row: one internal code to find a match for.
#[derive(Debug, Clone)]
pub struct QueryRow {
    pub raw_code: String,
}

/// Pre-loaded tables for one matching job.
pub struct MatchInput {
    pub reference: Vec<ReferenceRow>,
    pub queries: Vec<QueryRow>,
    /// Reference rows dropped during loading (blank code, unparseable price).
    pub skipped_reference_rows: usize,
    /// Query rows with blank codes. Still emit a null result each.
    pub skipped_query_rows: usize,
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// A runner-up candidate surfaced for transparency.
#[derive(Debug, Clone, Serialize)]
pub struct Alternate {
    pub code: String,
    pub score: f64,
}

/// One result per query row, whether or not a match was found.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub query_code: String,
    pub matched_code: Option<String>,
    pub score: f64,
    pub price: Option<f64>,
    pub alternates: Vec<Alternate>,
}

/// Fixed score-range display buckets, independent of the configurable
/// threshold: high ≥ 90, medium 70–89, low < 70.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    High,
    Medium,
    Low,
}

impl QualityTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Self::High
        } else if score >= 70.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl std::fmt::Display for QualityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

// ---------------------------------------------------------------------------
// Summary + Report
// ---------------------------------------------------------------------------

/// Counts over the full, unfiltered result set.
#[derive(Debug, Clone, Serialize)]
pub struct MatchSummary {
    pub total: usize,
    pub matched: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub skipped_reference_rows: usize,
    pub skipped_query_rows: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchMeta {
    pub config_name: String,
    pub policy: MatchPolicy,
    pub engine_version: String,
    pub run_at: String,
}

/// The immutable output of one job: results sorted by score descending.
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub meta: MatchMeta,
    pub summary: MatchSummary,
    pub results: Vec<MatchResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries() {
        assert_eq!(QualityTier::from_score(100.0), QualityTier::High);
        assert_eq!(QualityTier::from_score(90.0), QualityTier::High);
        assert_eq!(QualityTier::from_score(89.9), QualityTier::Medium);
        assert_eq!(QualityTier::from_score(70.0), QualityTier::Medium);
        assert_eq!(QualityTier::from_score(69.9), QualityTier::Low);
        assert_eq!(QualityTier::from_score(0.0), QualityTier::Low);
    }

    #[test]
    fn tier_display() {
        assert_eq!(QualityTier::High.to_string(), "high");
        assert_eq!(QualityTier::Medium.to_string(), "medium");
        assert_eq!(QualityTier::Low.to_string(), "low");
    }
}
