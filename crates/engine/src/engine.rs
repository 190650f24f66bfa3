//! Engine driver: one job = one pair of in-memory tables, processed to
//! completion in a single synchronous call. No state is shared across jobs
//! and the input snapshot is never mutated.

use crate::aggregate::{compute_summary, sort_results};
use crate::config::MatchConfig;
use crate::error::MatchError;
use crate::index::CandidateIndex;
use crate::matcher::match_query;
use crate::model::{MatchInput, MatchMeta, MatchReport};

/// Run one matching job. Emits exactly one result per query row, in score
/// order; tier counts cover the full unfiltered set.
pub fn run(config: &MatchConfig, input: &MatchInput) -> Result<MatchReport, MatchError> {
    config.validate()?;

    let index = CandidateIndex::build(config.policy, &input.reference);

    let mut results = Vec::with_capacity(input.queries.len());
    for query in &input.queries {
        results.push(match_query(
            config.policy,
            &index,
            query,
            config.top_n,
            config.prefilter,
        ));
    }

    let summary = compute_summary(
        &results,
        input.skipped_reference_rows,
        input.skipped_query_rows,
    );
    sort_results(&mut results);

    Ok(MatchReport {
        meta: MatchMeta {
            config_name: config.name.clone(),
            policy: config.policy,
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        results,
    })
}
