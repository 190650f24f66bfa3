//! Code normalization. Deterministic and pure: the same raw value under one
//! policy always yields the same key, and re-normalizing a canonical form
//! returns it unchanged.

use crate::config::MatchPolicy;

/// A canonical comparison key derived from a raw code under one policy.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalKey {
    /// Multi-variant: every variant participates in scoring.
    Variants(Vec<String>),
    /// Base/suffix: alphanumeric base plus the remainder after the first `/`.
    BaseSuffix { base: String, suffix: String },
    /// Single token: one lowercased alphanumeric string.
    Token(String),
}

impl NormalKey {
    /// Flat form used by the cheap pre-filter ranking, never by the exact
    /// scorer.
    pub fn filter_key(&self) -> &str {
        match self {
            Self::Variants(v) => v.first().map(String::as_str).unwrap_or(""),
            Self::BaseSuffix { base, .. } => base,
            Self::Token(t) => t,
        }
    }
}

impl MatchPolicy {
    /// Normalize one raw code value. Missing values arrive here as the
    /// empty string.
    pub fn normalize(&self, raw: &str) -> NormalKey {
        match self {
            Self::MultiVariant => NormalKey::Variants(variants(raw)),
            Self::BaseSuffix => {
                let (base, suffix) = base_suffix(raw);
                NormalKey::BaseSuffix { base, suffix }
            }
            Self::SingleToken => NormalKey::Token(single_token(raw)),
        }
    }
}

/// The multi-variant set: lowercased original, punctuation stripped, that
/// with whitespace also stripped, and original with whitespace stripped.
/// Duplicates collapse, first occurrence wins.
fn variants(raw: &str) -> Vec<String> {
    let lower = raw.to_lowercase();
    let no_punct: String = lower
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    let no_punct_no_ws: String = no_punct.chars().filter(|c| !c.is_whitespace()).collect();
    let no_ws: String = lower.chars().filter(|c| !c.is_whitespace()).collect();

    let mut out: Vec<String> = Vec::with_capacity(4);
    for v in [lower, no_punct, no_punct_no_ws, no_ws] {
        if !out.contains(&v) {
            out.push(v);
        }
    }
    out
}

/// Split on the first `/`: base = alphanumeric-only prefix, suffix =
/// alphanumeric-only remainder (empty if no `/`). Both lowercased.
fn base_suffix(raw: &str) -> (String, String) {
    let lower = raw.to_lowercase();
    match lower.split_once('/') {
        Some((base, suffix)) => (alphanumeric(base), alphanumeric(suffix)),
        None => (alphanumeric(&lower), String::new()),
    }
}

/// Lowercase, alphanumerics only.
fn single_token(raw: &str) -> String {
    alphanumeric(&raw.to_lowercase())
}

fn alphanumeric(s: &str) -> String {
    s.chars().filter(|c| c.is_alphanumeric()).collect()
}
