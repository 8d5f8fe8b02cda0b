/// Clamp into `[0, 1]`. NaN maps to `0`.
pub fn clamp01(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Linear interpolation between `a` and `b`; `t` is not clamped.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Position of `v` inside `[start, start + span]`, clamped to `[0, 1]`.
///
/// A non-positive or non-finite `span` degenerates to a step at `start`.
pub fn unit_span(v: f64, start: f64, span: f64) -> f64 {
    if !(span.is_finite() && span > 0.0) {
        return if v < start { 0.0 } else { 1.0 };
    }
    clamp01((v - start) / span)
}

/// Milliseconds as `f64`, exact for whole-millisecond durations.
pub fn millis_f64(d: std::time::Duration) -> f64 {
    d.as_nanos() as f64 / 1e6
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
