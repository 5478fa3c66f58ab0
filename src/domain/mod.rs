//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the entity descriptor (`EntityKind`) and period labels (`PeriodName`)
//! - ingested rows (`WeeklyRecord`) and transient pairs (`MatchedWeekPair`)
//! - outputs (`GrowthResult`, `GrowthReport`, `PipelineStats`)

pub mod types;

pub use types::*;
