//! `codematch-engine`: fuzzy item-code matching engine.
//!
//! Pure engine crate: receives pre-loaded tables, returns scored results.
//! No CLI dependencies; CSV parsing covers only "a table of named columns".

pub mod aggregate;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod index;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod score;
pub mod table;

pub use config::{MatchConfig, MatchPolicy};
pub use engine::run;
pub use error::MatchError;
pub use model::{MatchInput, MatchReport, MatchResult, QueryRow, ReferenceRow};
