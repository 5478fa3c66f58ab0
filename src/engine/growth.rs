//! Growth calculator.
//!
//! `% growth = ((current - previous) / previous) * 100`, rounded to two
//! decimal places on the final value.
//!
//! Edge cases are ordinary outcomes, not errors:
//! - previous = 0 and current = 0 → `0.00`
//! - previous = 0 and current ≠ 0 → `None` (growth is undefined)

use crate::domain::MatchedWeekPair;
use crate::math::{GROWTH_DECIMALS, round_half_away};

/// Percentage growth from `previous` to `current`, rounded to two places.
pub fn percentage_growth(current: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 {
        return if current == 0.0 { Some(0.0) } else { None };
    }
    let raw = (current - previous) / previous * 100.0;
    if !raw.is_finite() {
        return None;
    }
    Some(round_half_away(raw, GROWTH_DECIMALS))
}

/// Gross-sales and unit-sales growth for one pair, computed independently.
pub fn growth(pair: &MatchedWeekPair<'_>) -> (Option<f64>, Option<f64>) {
    let gross = percentage_growth(pair.current.gross_sales, pair.previous.gross_sales);
    let units = percentage_growth(f64::from(pair.current.units_sold), f64::from(pair.previous.units_sold));
    (gross, units)
}
