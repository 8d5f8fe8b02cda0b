//! scrollstage drives a landing page made of full-viewport sections stacked on top of
//! each other as the user scrolls.
//!
//! # Pipeline overview
//!
//! 1. **Track**: `scroll offset -> progress` per section, each over its own
//!    [`Segment`], optionally smoothed ([`TrackingMode::Scrub`]).
//! 2. **Map**: `(own progress, next progress) -> LayerState` with [`render`]: opacity,
//!    scale, rotation, curtain retraction, z-index and hit-testing.
//! 3. **Reveal**: section progress feeds a [`RevealSequencer`] whose two-threshold band
//!    keeps text from flickering while the user jitters around a boundary.
//! 4. **Navigate**: a [`Shutter`] closes two panels over the page, hands the target
//!    offset back exactly once while fully covered, then opens again.
//!
//! [`Stage`] wires all of it together and produces one [`StageFrame`] per display tick.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Pure mapping**: layer and easing functions hold no state and never fail.
//! - **Injected time**: everything time-based takes `now` explicitly or reads a
//!   [`FrameClock`], so tests run on exact frame times.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod foundation;
mod layers;
mod reveal;
mod scroll;
mod shutter;
mod stage;

pub use animation::ease::Ease;
pub use foundation::core::{Affine, Point, SectionId, Vec2, Viewport};
pub use foundation::error::{StageError, StageResult};
pub use foundation::math::{clamp01, lerp, unit_span};
pub use layers::section::{Entrance, LayerConfig, LayerState, entrance, render};
pub use reveal::hysteresis::Hysteresis;
pub use reveal::sequencer::{RevealFrame, RevealSequencer, RevealState, RevealTiming, UnitStyle};
pub use scroll::segment::{Segment, SegmentDef};
pub use scroll::tracker::{ProgressTracker, SETTLE_EPSILON, TrackingMode};
pub use shutter::clock::{FrameClock, ManualClock, MonotonicClock};
pub use shutter::machine::{
    Shutter, ShutterConfig, ShutterDriver, ShutterFrame, ShutterPhase, ShutterTick,
};
pub use stage::config::{RevealDef, SectionDef, StageConfig};
pub use stage::orchestrator::{Stage, StageFrame};
pub use stage::resize::ResizeDebounce;
