//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the tabular data model (`FieldValue`, `Record`, `Dataset`)
//! - ordering semantics (`Direction`)
//! - fit outputs (`TrendModel`, `TrendFile`)
//! - per-run configuration (`AnalysisConfig`)

pub mod types;

pub use types::*;
