use super::*;

#[test]
fn clamp01_handles_nan_and_infinities() {
    assert_eq!(clamp01(f64::NAN), 0.0);
    assert_eq!(clamp01(f64::INFINITY), 1.0);
    assert_eq!(clamp01(f64::NEG_INFINITY), 0.0);
    assert_eq!(clamp01(0.25), 0.25);
}

#[test]
fn lerp_endpoints() {
    assert_eq!(lerp(1.15, 1.0, 0.0), 1.15);
    assert_eq!(lerp(1.15, 1.0, 1.0), 1.0);
}

#[test]
fn unit_span_degenerates_to_step() {
    assert_eq!(unit_span(4.0, 5.0, 0.0), 0.0);
    assert_eq!(unit_span(5.0, 5.0, 0.0), 1.0);
    assert_eq!(unit_span(9.0, 5.0, -3.0), 1.0);
    assert_eq!(unit_span(6.0, 5.0, 2.0), 0.5);
}

#[test]
fn millis_f64_is_exact_for_whole_millis() {
    use std::time::Duration;
    assert_eq!(millis_f64(Duration::from_millis(1200)), 1200.0);
    assert_eq!(millis_f64(Duration::from_micros(1500)), 1.5);
}
