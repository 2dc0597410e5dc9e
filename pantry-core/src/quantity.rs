//! Rounding and display of stock quantities.

use crate::error::{Error, Result};

/// Decimal places kept for stored quantities.
pub const DP_QUANTITY: i32 = 3;

/// Minus sign used in display output.
const MINUS: char = '\u{2212}';

/// Round half away from zero to `dp` decimal places.
///
/// The scaled value is nudged by a few ulps first so that inputs such as
/// 1.2345, which are stored just below the halfway point, still round up.
pub fn round_half_up(value: f64, dp: i32) -> f64 {
    let factor = 10f64.powi(dp);
    let scaled = value * factor;
    let nudge = scaled.signum() * f64::EPSILON * scaled.abs().max(1.0) * 4.0;
    (scaled + nudge).round() / factor
}

/// Round a quantity to 3 decimal places, dropping to 2 when the difference
/// is at most one unit in the third place.
pub fn round_quantity(value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(Error::NonFiniteQuantity(value));
    }
    let r0 = round_half_up(value, DP_QUANTITY);
    let r1 = round_half_up(value, DP_QUANTITY - 1);
    let unit = 10f64.powi(-DP_QUANTITY);
    Ok(if (r1 - r0).abs() <= unit + 1e-12 { r1 } else { r0 })
}

/// Format a rounded quantity with no trailing zeros.
///
/// Deltas carry an explicit plus sign. Negative values use a real minus sign.
pub fn format_quantity(value: f64, delta: bool) -> Result<String> {
    let rounded = round_quantity(value)?;
    let text = trim_decimals(rounded, DP_QUANTITY as usize);
    Ok(match text.strip_prefix('-') {
        Some(magnitude) => format!("{}{}", MINUS, magnitude),
        None if delta => format!("+{}", text),
        None => text,
    })
}

/// Format with at most `dp` decimals, stripping trailing zeros and a bare point.
///
/// Used for chart labels, where `2.500` reads as `2.5`.
pub fn trim_decimals(value: f64, dp: usize) -> String {
    let text = format!("{:.*}", dp, value);
    let text = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    };
    if text == "-0" {
        "0".to_string()
    } else {
        text
    }
}
