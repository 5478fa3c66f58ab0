//! Calculation engine.
//!
//! Responsibilities:
//!
//! - partition ingested rows into current/previous periods (`split`)
//! - pair current and previous weeks by ordinal position per entity (`pairing`)
//! - compute rounded percentage growth for each pair (`growth`)
//!
//! Everything here is pure and synchronous: inputs are borrowed or consumed,
//! nothing is cached between runs.

pub mod growth;
pub mod pairing;
pub mod split;

pub use growth::*;
pub use pairing::*;
pub use split::*;
