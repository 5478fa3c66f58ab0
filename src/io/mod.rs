//! Input/output adapters around the engine.
//!
//! - CSV ingest + coercion (`ingest`)
//! - dashboard JSON export (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
