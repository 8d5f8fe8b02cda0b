use super::*;
use crate::{
    layers::section::entrance,
    reveal::sequencer::RevealState,
    scroll::tracker::TrackingMode,
    shutter::machine::ShutterPhase,
};

const VH: f64 = 800.0;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn snap_stage() -> Stage {
    let cfg = StageConfig {
        tracking: TrackingMode::Snap,
        ..StageConfig::default()
    };
    Stage::new(cfg, Viewport::new(1280.0, VH).unwrap()).unwrap()
}

#[test]
fn layout_matches_viewport_multiples() {
    let stage = snap_stage();
    assert_eq!(stage.section_count(), 5);
    assert_eq!(stage.total_height(), 5.0 * VH);
    assert_eq!(stage.max_scroll(), 4.0 * VH);
    let segs = stage.segments();
    assert!(segs[0].is_none());
    let s3 = segs[3].unwrap();
    assert_eq!(s3.start_offset, 2.0 * VH);
    assert_eq!(s3.length, VH);
    assert_eq!(stage.section_target(SectionId(0)), Some(0.0));
    assert_eq!(stage.section_target(SectionId(3)), Some(3.0 * VH));
    assert_eq!(stage.section_target(SectionId(9)), None);
    assert_eq!(
        stage.section_names().collect::<Vec<_>>(),
        ["hero", "collection", "craft", "lookbook", "visit"]
    );
}

#[test]
fn progress_per_section_at_offset() {
    let mut stage = snap_stage();
    stage.on_scroll(2.5 * VH);
    let f = stage.frame(ms(0)).unwrap();
    assert_eq!(f.progress, vec![1.0, 1.0, 1.0, 0.5, 0.0]);

    stage.on_scroll(1.9 * VH);
    let f = stage.frame(ms(16)).unwrap();
    assert_eq!(f.progress[3], 0.0);

    stage.on_scroll(3.1 * VH);
    let f = stage.frame(ms(32)).unwrap();
    assert_eq!(f.progress[3], 1.0);
}

#[test]
fn lower_layer_fades_as_next_enters() {
    let mut stage = snap_stage();
    stage.on_scroll(0.8 * VH);
    let f = stage.frame(ms(0)).unwrap();
    let cfg = &stage.config().layer;
    let expected = entrance(1.0, cfg).opacity * (1.0 - f.progress[1]);
    assert!((f.layers[0].opacity - expected).abs() < 1e-9);
    assert!(f.layers[1].z_index > f.layers[0].z_index);
}

#[test]
fn topmost_settled_layer_is_interactive() {
    let mut stage = snap_stage();
    stage.on_scroll(3.0 * VH);
    let f = stage.frame(ms(0)).unwrap();
    assert_eq!(f.interactive_section(), Some(SectionId(3)));
    assert_eq!(f.layers.iter().filter(|l| l.interactive).count(), 1);
}

#[test]
fn navigate_jumps_behind_closed_shutter() {
    let mut stage = snap_stage();
    assert!(stage.navigate(SectionId(3), ms(0)));
    assert!(stage.is_busy());
    assert!(!stage.navigate(SectionId(1), ms(5)));

    let mut jumps = Vec::new();
    let mut t = 0;
    while t <= 2000 {
        let f = stage.frame(ms(t)).unwrap();
        if let Some(target) = f.jump_to {
            assert!(f.shutter.is_covered());
            assert_eq!(f.shutter.phase, ShutterPhase::Closed);
            assert_eq!(f.progress[3], 1.0);
            jumps.push((t, target));
        }
        t += 16;
    }

    assert_eq!(jumps, vec![(512, 3.0 * VH)]);
    assert_eq!(stage.scroll_offset(), 3.0 * VH);
    assert!(!stage.is_busy());
}

#[test]
fn jump_resets_scrub_smoothing() {
    let mut stage = Stage::new(
        StageConfig::default(),
        Viewport::new(1280.0, VH).unwrap(),
    )
    .unwrap();
    stage.frame(ms(0));
    assert!(stage.navigate_to_offset(2.5 * VH, ms(0)));
    let mut t = 16;
    let f = loop {
        let f = stage.frame(ms(t)).unwrap();
        if f.jump_to.is_some() {
            break f;
        }
        t += 16;
    };
    assert_eq!(f.progress[3], 0.5);
}

#[test]
fn scrub_lags_behind_scroll() {
    let mut stage = Stage::new(
        StageConfig::default(),
        Viewport::new(1280.0, VH).unwrap(),
    )
    .unwrap();
    stage.frame(ms(0));
    stage.on_scroll(1.0 * VH);
    let f = stage.frame(ms(16)).unwrap();
    assert!(f.progress[1] > 0.0 && f.progress[1] < 1.0);

    let mut last = f.progress[1];
    for i in 2..200 {
        last = stage.frame(ms(16 * i)).unwrap().progress[1];
    }
    assert_eq!(last, 1.0);
}

#[test]
fn resize_is_debounced_and_leaves_shutter_alone() {
    let mut stage = snap_stage();
    assert!(stage.navigate(SectionId(2), ms(0)));
    stage.frame(ms(16));

    stage.on_resize(Viewport::new(1280.0, 1000.0).unwrap(), ms(100));
    let f = stage.frame(ms(200)).unwrap();
    assert_eq!(f.viewport.height, VH);
    assert_eq!(f.shutter.phase, ShutterPhase::Closing);

    let f = stage.frame(ms(250)).unwrap();
    assert_eq!(f.viewport.height, 1000.0);
    assert_eq!(f.shutter.phase, ShutterPhase::Closing);
    assert_eq!(stage.segments()[2].unwrap().start_offset, 1000.0);

    let f = stage.frame(ms(500)).unwrap();
    assert_eq!(f.jump_to, Some(2000.0));
    assert_eq!(f.progress[2], 1.0);
    assert_eq!(f.progress[3], 0.0);
}

#[test]
fn jump_target_follows_resize_applied_mid_cycle() {
    let mut stage = snap_stage();
    assert!(stage.navigate(SectionId(2), ms(0)));
    stage.on_resize(Viewport::new(1280.0, 1000.0).unwrap(), ms(100));

    let mut t = 0;
    let f = loop {
        let f = stage.frame(ms(t)).unwrap();
        if f.jump_to.is_some() {
            break f;
        }
        t += 16;
    };
    assert_eq!(f.jump_to, stage.section_target(SectionId(2)));
    assert_eq!(f.jump_to, Some(2000.0));
    assert_eq!(f.progress[2], 1.0);
    assert_eq!(f.interactive_section(), Some(SectionId(2)));
}

#[test]
fn offset_jump_scales_with_resize() {
    let mut stage = snap_stage();
    assert!(stage.navigate_to_offset(1.5 * VH, ms(0)));
    stage.on_resize(Viewport::new(1280.0, 1000.0).unwrap(), ms(100));

    let mut t = 0;
    let jump = loop {
        if let Some(target) = stage.frame(ms(t)).unwrap().jump_to {
            break target;
        }
        t += 16;
    };
    assert_eq!(jump, 1500.0);
}

#[test]
fn zero_height_viewport_degrades_to_steps() {
    let mut stage = snap_stage();
    stage.on_resize(
        Viewport {
            width: 1280.0,
            height: 0.0,
        },
        ms(0),
    );
    stage.on_scroll(10.0);
    let f = stage.frame(ms(1000)).unwrap();
    for p in &f.progress {
        assert!((0.0..=1.0).contains(p));
    }
    assert_eq!(f.progress[4], 1.0);
}

#[test]
fn reveals_follow_section_progress() {
    let mut stage = snap_stage();
    stage.on_scroll(1.0 * VH);
    let f = stage.frame(ms(0)).unwrap();
    assert_eq!(f.reveals[1].as_ref().unwrap().state, RevealState::Hidden);

    let f = stage.frame(ms(300)).unwrap();
    assert_eq!(f.reveals[0].as_ref().unwrap().state, RevealState::Revealed);
    assert_eq!(f.reveals[1].as_ref().unwrap().state, RevealState::Revealed);
    assert_eq!(f.reveals[2].as_ref().unwrap().state, RevealState::Hidden);

    stage.on_scroll(0.1 * VH);
    let f = stage.frame(ms(316)).unwrap();
    assert_eq!(f.reveals[1].as_ref().unwrap().state, RevealState::Hidden);
}

#[test]
fn teardown_stops_everything() {
    let mut stage = snap_stage();
    stage.on_scroll(2.0 * VH);
    assert!(stage.navigate(SectionId(4), ms(0)));
    stage.frame(ms(100));
    stage.on_resize(Viewport::new(640.0, 480.0).unwrap(), ms(100));

    stage.teardown();
    assert!(!stage.is_mounted());
    assert!(!stage.is_busy());
    assert!(stage.frame(ms(2000)).is_none());

    stage.on_scroll(0.0);
    assert_eq!(stage.scroll_offset(), 2.0 * VH);
    assert!(!stage.navigate(SectionId(1), ms(3000)));
    assert_eq!(stage.viewport().height, VH);
}

#[test]
fn invalid_viewport_is_rejected() {
    let err = Stage::new(
        StageConfig::default(),
        Viewport {
            width: 100.0,
            height: 0.0,
        },
    )
    .unwrap_err();
    assert!(err.to_string().contains("validation error:"));
}
