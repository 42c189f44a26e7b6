#![forbid(unsafe_code)]

//! Saturating numeric helpers.

/// Clamp `value` into `[lo, hi]` as `min(max(value, lo), hi)`.
///
/// Unlike [`f64::clamp`] this never panics: when `lo > hi` the upper bound
/// wins, and a NaN `value` collapses to `lo` before the upper bound applies.
#[inline]
#[must_use]
pub fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}

/// Returns `true` when `a` and `b` differ by at most `epsilon`.
#[inline]
#[must_use]
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() <= epsilon
}
