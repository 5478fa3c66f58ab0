//! Numeric helpers shared by the growth calculator.

pub mod round;

pub use round::*;
