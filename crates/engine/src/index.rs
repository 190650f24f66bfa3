//! Candidate index: reference keys normalized once per job, with an
//! optional cheap pre-filter narrowing the pool before exact scoring.

use crate::config::MatchPolicy;
use crate::model::ReferenceRow;
use crate::normalize::NormalKey;
use crate::score::cheap_ratio;

pub struct CandidateIndex<'a> {
    rows: &'a [ReferenceRow],
    keys: Vec<NormalKey>,
}

impl<'a> CandidateIndex<'a> {
    /// Normalize every reference key exactly once for the job.
    pub fn build(policy: MatchPolicy, rows: &'a [ReferenceRow]) -> Self {
        let keys = rows.iter().map(|r| policy.normalize(&r.raw_code)).collect();
        Self { rows, keys }
    }

    pub fn rows(&self) -> &[ReferenceRow] {
        self.rows
    }

    pub fn key(&self, i: usize) -> &NormalKey {
        &self.keys[i]
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Candidate pool for one query key, as indices into `rows()`.
    ///
    /// `prefilter_k = None` returns the full reference set. `Some(k)`
    /// returns the top-k rows by cheap ratio; recall is bounded by k and a
    /// true best match outside the pool is missed. That is a documented
    /// approximation, not a bug. Either way the pool comes back in
    /// reference-scan order, so the first-match-wins tie-break is
    /// identical to the brute-force path.
    pub fn pool(&self, query: &NormalKey, prefilter_k: Option<usize>) -> Vec<usize> {
        let Some(k) = prefilter_k else {
            return (0..self.rows.len()).collect();
        };
        let k = k.max(1);

        let query_key = query.filter_key();
        let mut ranked: Vec<(usize, f64)> = self
            .keys
            .iter()
            .enumerate()
            .map(|(i, key)| (i, cheap_ratio(query_key, key.filter_key())))
            .collect();
        // Stable sort: equal cheap ratios keep reference order.
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked.truncate(k);

        let mut pool: Vec<usize> = ranked.into_iter().map(|(i, _)| i).collect();
        pool.sort_unstable();
        pool
    }
}
