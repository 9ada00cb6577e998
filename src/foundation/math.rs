/// Linear interpolation from `a` to `b`; `t` is not clamped.
pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Euclidean remainder for timestamps; always in `[0, period)` for `period > 0`.
pub(crate) fn wrap_period(v: f64, period: f64) -> f64 {
    let r = v.rem_euclid(period);
    // rem_euclid can round up to exactly `period` for tiny negative inputs.
    if r >= period { 0.0 } else { r }
}
