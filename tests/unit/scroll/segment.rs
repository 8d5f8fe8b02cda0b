use super::*;

fn vp(h: f64) -> Viewport {
    Viewport::new(1280.0, h).unwrap()
}

#[test]
fn progress_is_linear_inside_and_clamped_outside() {
    let vh = 800.0;
    let seg = SegmentDef {
        start_vh: 2.0,
        length_vh: 1.0,
    }
    .resolve(SectionId(3), vp(vh))
    .unwrap();

    assert_eq!(seg.progress(2.5 * vh), 0.5);
    assert_eq!(seg.progress(1.9 * vh), 0.0);
    assert_eq!(seg.progress(3.1 * vh), 1.0);
    assert_eq!(seg.progress(seg.end_offset()), 1.0);
    assert_eq!(seg.progress(seg.start_offset), 0.0);
}

#[test]
fn progress_stays_in_unit_range_for_extreme_offsets() {
    let seg = Segment::new(SectionId(1), 1000.0, 500.0).unwrap();
    for offset in [
        -1e12,
        -1.0,
        0.0,
        999.999,
        1250.0,
        1500.0,
        1e12,
        f64::INFINITY,
        f64::NEG_INFINITY,
        f64::NAN,
    ] {
        let p = seg.progress(offset);
        assert!((0.0..=1.0).contains(&p), "offset={offset} p={p}");
    }
}

#[test]
fn progress_is_non_decreasing_within_window() {
    let seg = Segment::new(SectionId(1), 300.0, 700.0).unwrap();
    let mut prev = seg.progress(300.0);
    let mut offset = 300.0;
    while offset <= 1000.0 {
        let p = seg.progress(offset);
        assert!(p >= prev, "offset={offset}");
        assert!(p - prev < 0.01, "jump at offset={offset}");
        prev = p;
        offset += 5.0;
    }
}

#[test]
fn zero_or_negative_length_is_rejected() {
    assert!(Segment::new(SectionId(0), 0.0, 0.0).is_err());
    assert!(Segment::new(SectionId(0), 0.0, -10.0).is_err());
    assert!(
        SegmentDef {
            start_vh: 1.0,
            length_vh: 0.0
        }
        .validate()
        .is_err()
    );
}

#[test]
fn degenerate_segment_short_circuits_to_step() {
    let seg = Segment::degenerate(SectionId(2), 400.0);
    assert_eq!(seg.progress(399.0), 0.0);
    assert_eq!(seg.progress(400.0), 1.0);
    assert_eq!(seg.progress(10_000.0), 1.0);
}

#[test]
fn overlapping_segments_are_independent() {
    let a = Segment::new(SectionId(1), 0.0, 1000.0).unwrap();
    let b = Segment::new(SectionId(2), 500.0, 1000.0).unwrap();
    assert_eq!(a.progress(750.0), 0.75);
    assert_eq!(b.progress(750.0), 0.25);
}
