//! `sales-growth` library crate.
//!
//! The binary (`salesgrowth`) is a thin wrapper around this library so that:
//!
//! - the engine is testable without spawning processes
//! - ingest/export adapters stay swappable around a pure core
//! - product and brand pipelines share one implementation

pub mod app;
pub mod cli;
pub mod domain;
pub mod engine;
pub mod error;
pub mod io;
pub mod logging;
pub mod math;
pub mod report;
