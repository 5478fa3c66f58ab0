//! Decimal rounding for reported percentages.
//!
//! Values are scaled by `10^places`, rounded with `f64::round` (half away
//! from zero), and scaled back. Rounding is applied once, to the final
//! percentage.

/// Decimal places carried by every reported growth figure.
pub const GROWTH_DECIMALS: i32 = 2;

/// Round `value` to `places` decimal places, half away from zero.
///
/// Non-finite inputs are returned unchanged.
pub fn round_half_away(value: f64, places: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = 10f64.powi(places);
    let rounded = (value * scale).round() / scale;
    // Avoid emitting `-0.0` for tiny negative changes.
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// True when `value` has no more than `places` significant decimal digits.
pub fn has_at_most_decimals(value: f64, places: i32) -> bool {
    let scale = 10f64.powi(places);
    let scaled = value * scale;
    (scaled - scaled.round()).abs() <= 1e-9 * scaled.abs().max(1.0)
}
