use crate::{
    foundation::{
        error::{StageError, StageResult},
        math::clamp01,
    },
    scroll::segment::Segment,
};

/// Gap below which scrubbed progress snaps onto its target.
pub const SETTLE_EPSILON: f64 = 1e-4;

/// How a tracker publishes progress.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TrackingMode {
    /// Publish raw progress every frame.
    Snap,
    /// Move a fraction of the remaining gap toward raw progress every frame.
    Scrub {
        /// Fraction of the gap closed per frame, in `(0, 1]`.
        coefficient: f64,
    },
}

impl Default for TrackingMode {
    fn default() -> Self {
        Self::Scrub { coefficient: 0.2 }
    }
}

impl TrackingMode {
    /// Validate mode parameters.
    pub fn validate(self) -> StageResult<()> {
        match self {
            Self::Snap => Ok(()),
            Self::Scrub { coefficient } => {
                if coefficient.is_finite() && coefficient > 0.0 && coefficient <= 1.0 {
                    Ok(())
                } else {
                    Err(StageError::validation(format!(
                        "scrub coefficient must be in (0, 1] (got {coefficient})"
                    )))
                }
            }
        }
    }
}

/// Per-segment progress state.
///
/// Each tracker reads the raw scroll offset only; it never looks at other trackers, so
/// segments may overlap freely.
#[derive(Clone, Debug)]
pub struct ProgressTracker {
    segment: Segment,
    mode: TrackingMode,
    smoothed: Option<f64>,
}

impl ProgressTracker {
    /// Create a tracker for `segment`.
    pub fn new(segment: Segment, mode: TrackingMode) -> StageResult<Self> {
        mode.validate()?;
        Ok(Self {
            segment,
            mode,
            smoothed: None,
        })
    }

    /// The segment currently tracked.
    pub fn segment(&self) -> Segment {
        self.segment
    }

    /// Swap segment bounds after a resize. Smoothed state carries over.
    pub fn set_segment(&mut self, segment: Segment) {
        self.segment = segment;
    }

    /// Raw progress for `offset`, ignoring smoothing.
    pub fn target(&self, offset: f64) -> f64 {
        self.segment.progress(offset)
    }

    /// Advance one frame and return the published progress.
    pub fn update(&mut self, offset: f64) -> f64 {
        let target = self.target(offset);
        let out = match self.mode {
            TrackingMode::Snap => target,
            TrackingMode::Scrub { coefficient } => {
                let prev = self.smoothed.unwrap_or(target);
                let next = prev + (target - prev) * coefficient;
                if (target - next).abs() < SETTLE_EPSILON {
                    target
                } else {
                    next
                }
            }
        };
        let out = clamp01(out);
        self.smoothed = Some(out);
        out
    }

    /// Last published value, if any frame has run.
    pub fn current(&self) -> Option<f64> {
        self.smoothed
    }

    /// `true` once the published value equals the raw target for `offset`.
    pub fn is_settled(&self, offset: f64) -> bool {
        self.smoothed == Some(self.target(offset))
    }

    /// Forget smoothing history; the next update publishes the raw target.
    pub fn reset(&mut self) {
        self.smoothed = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/tracker.rs"]
mod tests;
