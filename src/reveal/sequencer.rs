use std::time::Duration;

use crate::{
    animation::ease::Ease,
    foundation::{
        error::{StageError, StageResult},
        math::{millis_f64, unit_span},
    },
    reveal::hysteresis::Hysteresis,
};

/// Whether a section's text is shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealState {
    /// Units are at their hidden resting pose.
    Hidden,
    /// Units are (or are becoming) visible.
    Revealed,
}

/// Timing and motion of a staggered reveal.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RevealTiming {
    /// Wait between crossing the upper threshold and revealing.
    pub delay_ms: u64,
    /// Extra start delay for each subsequent unit.
    pub stagger_ms: u64,
    /// Animation length of a single unit.
    pub unit_duration_ms: u64,
    /// Hidden units sit this many pixels below their resting position.
    pub rise_px: f64,
    /// Per-unit curve.
    pub ease: Ease,
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self {
            delay_ms: 300,
            stagger_ms: 150,
            unit_duration_ms: 600,
            rise_px: 40.0,
            ease: Ease::OutCubic,
        }
    }
}

impl RevealTiming {
    /// Reject non-finite motion.
    pub fn validate(&self) -> StageResult<()> {
        if !self.rise_px.is_finite() {
            return Err(StageError::validation("reveal rise_px must be finite"));
        }
        Ok(())
    }

    fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    fn stagger(&self) -> Duration {
        Duration::from_millis(self.stagger_ms)
    }

    fn unit_duration(&self) -> Duration {
        Duration::from_millis(self.unit_duration_ms)
    }
}

/// Pose of one text unit.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct UnitStyle {
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Downward offset in pixels; `0` at rest.
    pub translate_y: f64,
}

/// Reveal output for one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RevealFrame {
    /// Current state.
    pub state: RevealState,
    /// One pose per unit, in reading order.
    pub units: Vec<UnitStyle>,
}

/// Per-section staggered text reveal with hysteresis.
#[derive(Clone, Debug)]
pub struct RevealSequencer {
    units: Vec<String>,
    band: Hysteresis,
    timing: RevealTiming,
    state: RevealState,
    pending: Option<Duration>,
    revealed_at: Option<Duration>,
    reveals: u64,
    torn_down: bool,
}

impl RevealSequencer {
    /// Build a sequencer over pre-split units.
    pub fn new(units: Vec<String>, band: Hysteresis, timing: RevealTiming) -> StageResult<Self> {
        timing.validate()?;
        Ok(Self {
            units,
            band,
            timing,
            state: RevealState::Hidden,
            pending: None,
            revealed_at: None,
            reveals: 0,
            torn_down: false,
        })
    }

    /// Build a sequencer with one unit per whitespace-separated word.
    pub fn from_text(text: &str, band: Hysteresis, timing: RevealTiming) -> StageResult<Self> {
        let units = text.split_whitespace().map(str::to_owned).collect();
        Self::new(units, band, timing)
    }

    /// Text units in reading order.
    pub fn units(&self) -> &[String] {
        &self.units
    }

    /// Threshold band.
    pub fn band(&self) -> Hysteresis {
        self.band
    }

    /// Current state.
    pub fn state(&self) -> RevealState {
        self.state
    }

    /// `true` while a reveal is scheduled but has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Number of hidden-to-revealed transitions so far.
    pub fn reveal_count(&self) -> u64 {
        self.reveals
    }

    /// Feed the section's progress at time `now`.
    pub fn update(&mut self, progress: f64, now: Duration) -> RevealState {
        if self.torn_down {
            return self.state;
        }

        if self.band.should_fall(progress) {
            if self.pending.take().is_some() {
                tracing::trace!(progress, "reveal: pending reveal cancelled");
            }
            if self.state == RevealState::Revealed {
                tracing::debug!(progress, "reveal: hidden");
                self.state = RevealState::Hidden;
                self.revealed_at = None;
            }
            return self.state;
        }

        if self.state == RevealState::Hidden
            && self.pending.is_none()
            && self.band.should_rise(progress)
        {
            let due = now.saturating_add(self.timing.delay());
            tracing::trace!(progress, ?due, "reveal: scheduled");
            self.pending = Some(due);
        }

        if let Some(due) = self.pending
            && now >= due
        {
            self.pending = None;
            self.state = RevealState::Revealed;
            self.revealed_at = Some(due);
            self.reveals += 1;
            tracing::debug!(?due, units = self.units.len(), "reveal: revealed");
        }

        self.state
    }

    /// Pose of unit `index` at `now`.
    pub fn unit_style(&self, index: usize, now: Duration) -> UnitStyle {
        let hidden = UnitStyle {
            opacity: 0.0,
            translate_y: self.timing.rise_px,
        };
        let (RevealState::Revealed, Some(revealed_at)) = (self.state, self.revealed_at) else {
            return hidden;
        };

        let offset = self
            .timing
            .stagger()
            .saturating_mul(u32::try_from(index).unwrap_or(u32::MAX));
        let start = revealed_at.saturating_add(offset);
        let t = unit_span(
            millis_f64(now),
            millis_f64(start),
            millis_f64(self.timing.unit_duration()),
        );
        let eased = self.timing.ease.apply(t);
        UnitStyle {
            opacity: eased,
            translate_y: self.timing.rise_px * (1.0 - eased),
        }
    }

    /// State plus every unit's pose at `now`.
    pub fn frame(&self, now: Duration) -> RevealFrame {
        RevealFrame {
            state: self.state,
            units: (0..self.units.len())
                .map(|i| self.unit_style(i, now))
                .collect(),
        }
    }

    /// `true` when nothing will change without new progress input.
    pub fn is_settled(&self, now: Duration) -> bool {
        if self.pending.is_some() {
            return false;
        }
        match (self.state, self.revealed_at) {
            (RevealState::Revealed, Some(at)) => {
                let last = self.units.len().saturating_sub(1);
                let offset = self
                    .timing
                    .stagger()
                    .saturating_mul(u32::try_from(last).unwrap_or(u32::MAX));
                now >= at
                    .saturating_add(offset)
                    .saturating_add(self.timing.unit_duration())
            }
            _ => true,
        }
    }

    /// Back to hidden with nothing scheduled.
    pub fn reset(&mut self) {
        self.state = RevealState::Hidden;
        self.pending = None;
        self.revealed_at = None;
    }

    /// Cancel any scheduled reveal and ignore all further input.
    pub fn teardown(&mut self) {
        self.pending = None;
        self.torn_down = true;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/sequencer.rs"]
mod tests;
