//! Shared numeric helpers.

/// Divide `numerator` by `denominator`, collapsing any non-finite
/// result to zero.
///
/// Every ratio in this crate (target achievement, inventory/sales
/// ratio, stock turnover, mean turnover) goes through this function so
/// NaN and infinity never reach downstream consumers. A zero
/// denominator reads as "no meaningful ratio".
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    let quotient = numerator / denominator;
    if quotient.is_finite() {
        quotient
    } else {
        0.0
    }
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
