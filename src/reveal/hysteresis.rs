use crate::foundation::error::{StageError, StageResult};

/// Two-threshold band that keeps reveal state from flickering on scroll jitter.
///
/// `upper` is strictly greater than `lower`; [`Hysteresis::new`] is the only way to
/// build one, so a collapsed band cannot exist.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Hysteresis {
    lower: f64,
    upper: f64,
}

impl Hysteresis {
    /// Build a validated band with `0 <= lower < upper <= 1`.
    pub fn new(lower: f64, upper: f64) -> StageResult<Self> {
        if !(0.0..=1.0).contains(&lower) || !(0.0..=1.0).contains(&upper) {
            return Err(StageError::validation(format!(
                "reveal thresholds must lie in [0, 1] (lower={lower}, upper={upper})"
            )));
        }
        if upper <= lower {
            return Err(StageError::validation(format!(
                "reveal upper threshold must be strictly greater than lower (lower={lower}, upper={upper})"
            )));
        }
        Ok(Self { lower, upper })
    }

    /// Hide threshold.
    pub fn lower(self) -> f64 {
        self.lower
    }

    /// Reveal threshold.
    pub fn upper(self) -> f64 {
        self.upper
    }

    /// `progress` is past the reveal threshold.
    pub fn should_rise(self, progress: f64) -> bool {
        progress > self.upper
    }

    /// `progress` has dropped below the hide threshold.
    pub fn should_fall(self, progress: f64) -> bool {
        progress < self.lower
    }
}
