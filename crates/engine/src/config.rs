use serde::{Deserialize, Serialize};

use crate::error::MatchError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct MatchConfig {
    pub name: String,
    pub policy: MatchPolicy,
    /// Minimum score for the displayed/exported subset. Tier counts are
    /// always computed over the full result set regardless.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Alternates retained per query, and the pre-filter pool size.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Rank reference keys by a cheap ratio and keep only the top `top_n`
    /// before exact scoring. Bounds recall by `top_n`; a true best match
    /// outside the pool is missed. Off = full scan.
    #[serde(default)]
    pub prefilter: bool,
    pub reference: ReferenceTableConfig,
    pub query: QueryTableConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Normalization/scoring policy. Exactly one per job, applied identically
/// to both tables. The rest of the engine depends only on the
/// `normalize` / `score` contract, not on which policy is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    MultiVariant,
    BaseSuffix,
    SingleToken,
}

impl std::fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MultiVariant => write!(f, "multi_variant"),
            Self::BaseSuffix => write!(f, "base_suffix"),
            Self::SingleToken => write!(f, "single_token"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceTableConfig {
    pub file: String,
    pub columns: ReferenceColumns,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceColumns {
    pub code: String,
    pub price: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueryTableConfig {
    pub file: String,
    pub columns: QueryColumns,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueryColumns {
    pub code: String,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub json: Option<String>,
    #[serde(default)]
    pub csv: Option<String>,
    /// Include the Top Matches column in the CSV export.
    #[serde(default)]
    pub include_alternates: bool,
}

fn default_threshold() -> f64 {
    70.0
}

fn default_top_n() -> usize {
    1
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl MatchConfig {
    pub fn from_toml(input: &str) -> Result<Self, MatchError> {
        let config: MatchConfig =
            toml::from_str(input).map_err(|e| MatchError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        if !(0.0..=100.0).contains(&self.threshold) {
            return Err(MatchError::ConfigValidation(format!(
                "threshold must be within [0, 100], got {}",
                self.threshold
            )));
        }
        if self.top_n < 1 {
            return Err(MatchError::ConfigValidation(
                "top_n must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
