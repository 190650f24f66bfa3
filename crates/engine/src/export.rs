//! CSV export with the fixed column order downstream sheets expect.

use crate::aggregate::{filter_by_threshold, format_price, format_score};
use crate::error::MatchError;
use crate::model::MatchResult;

/// Render the threshold-filtered result set as CSV.
///
/// Columns: System Code, Supplier Code, Match Score, Cost Price, and
/// optionally Top Matches (`code (score%)`, semicolon-joined). Scores and
/// prices are formatted only here, at the export boundary.
pub fn to_csv(
    results: &[MatchResult],
    threshold: f64,
    include_alternates: bool,
) -> Result<String, MatchError> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());

    let mut header = vec!["System Code", "Supplier Code", "Match Score", "Cost Price"];
    if include_alternates {
        header.push("Top Matches");
    }
    writer
        .write_record(&header)
        .map_err(|e| MatchError::Io(e.to_string()))?;

    for result in filter_by_threshold(results, threshold) {
        let mut record = vec![
            result.query_code.clone(),
            result.matched_code.clone().unwrap_or_default(),
            format_score(result.score),
            result.price.map(format_price).unwrap_or_default(),
        ];
        if include_alternates {
            let tops: Vec<String> = result
                .alternates
                .iter()
                .map(|a| format!("{} ({})", a.code, format_score(a.score)))
                .collect();
            record.push(tops.join("; "));
        }
        writer
            .write_record(&record)
            .map_err(|e| MatchError::Io(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| MatchError::Io(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| MatchError::Io(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Alternate;

    fn result(query: &str, matched: Option<&str>, score: f64, price: Option<f64>) -> MatchResult {
        MatchResult {
            query_code: query.into(),
            matched_code: matched.map(String::from),
            score,
            price,
            alternates: Vec::new(),
        }
    }

    #[test]
    fn fixed_column_order() {
        let results = vec![result("SYS-1", Some("SUP-1"), 92.5, Some(10.0))];
        let csv = to_csv(&results, 0.0, false).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "System Code,Supplier Code,Match Score,Cost Price"
        );
        assert_eq!(lines.next().unwrap(), "SYS-1,SUP-1,92.5%,$10.00");
    }

    #[test]
    fn threshold_filters_rows() {
        let results = vec![
            result("a", Some("ra"), 95.0, Some(1.0)),
            result("b", Some("rb"), 75.0, Some(2.0)),
        ];
        let csv = to_csv(&results, 80.0, false).unwrap();
        assert!(csv.contains("\na,"));
        assert!(!csv.contains("\nb,"));
    }

    #[test]
    fn unmatched_row_has_empty_fields() {
        let results = vec![result("orphan", None, 0.0, None)];
        let csv = to_csv(&results, 0.0, false).unwrap();
        assert!(csv.lines().nth(1).unwrap().starts_with("orphan,,0.0%,"));
    }

    #[test]
    fn alternates_column() {
        let mut r = result("SYS-1", Some("SUP-1"), 100.0, Some(3.0));
        r.alternates = vec![
            Alternate {
                code: "SUP-2".into(),
                score: 88.0,
            },
            Alternate {
                code: "SUP-3".into(),
                score: 71.5,
            },
        ];
        let csv = to_csv(&[r], 0.0, true).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "System Code,Supplier Code,Match Score,Cost Price,Top Matches"
        );
        assert_eq!(
            lines.next().unwrap(),
            "SYS-1,SUP-1,100.0%,$3.00,SUP-2 (88.0%); SUP-3 (71.5%)"
        );
    }
}
