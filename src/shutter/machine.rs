//! Two-panel curtain used to hide discrete scroll jumps.
//!
//! The cycle is `Idle -> Closing -> Closed -> Opening -> Idle`. The only seam for the
//! host is the tick that enters `Closed`: it hands back the navigation payload once,
//! while both panels fully cover the viewport. The host applies its jump there; the
//! panels stay shut for the configured pause before opening again.

use std::time::Duration;

use crate::{
    animation::ease::Ease,
    foundation::{
        error::{StageError, StageResult},
        math::{millis_f64, unit_span},
    },
    shutter::clock::FrameClock,
};

/// Current phase of the shutter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShutterPhase {
    /// Retracted; accepts navigation.
    Idle,
    /// Panels moving in.
    Closing,
    /// Panels fully covering; holding for the pause.
    Closed,
    /// Panels moving out.
    Opening,
}

/// Shutter timings.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ShutterConfig {
    /// Time for both panels to fully cover the viewport.
    pub closing_ms: u64,
    /// Hold between fully closed and opening.
    pub pause_ms: u64,
    /// Time for both panels to fully retract.
    pub opening_ms: u64,
    /// Head start of the top panel over the bottom one.
    pub stagger_ms: u64,
    /// Panel curve.
    pub ease: Ease,
}

impl Default for ShutterConfig {
    fn default() -> Self {
        Self {
            closing_ms: 500,
            pause_ms: 100,
            opening_ms: 600,
            stagger_ms: 50,
            ease: Ease::InOutQuad,
        }
    }
}

impl ShutterConfig {
    /// Both moving phases must outlast the stagger.
    pub fn validate(&self) -> StageResult<()> {
        if self.stagger_ms >= self.closing_ms {
            return Err(StageError::validation(format!(
                "shutter.stagger_ms ({}) must be < closing_ms ({})",
                self.stagger_ms, self.closing_ms
            )));
        }
        if self.stagger_ms >= self.opening_ms {
            return Err(StageError::validation(format!(
                "shutter.stagger_ms ({}) must be < opening_ms ({})",
                self.stagger_ms, self.opening_ms
            )));
        }
        Ok(())
    }

    /// Shortest possible time from trigger back to `Idle`.
    pub fn min_cycle(&self) -> Duration {
        Duration::from_millis(self.closing_ms)
            .saturating_add(Duration::from_millis(self.pause_ms))
            .saturating_add(Duration::from_millis(self.opening_ms))
    }

    // Coverage of panel `k` (0 = top, 1 = bottom) `elapsed` into a moving phase.
    fn panel(&self, k: u64, elapsed: Duration, phase_ms: u64) -> f64 {
        let start = (k * self.stagger_ms) as f64;
        let span = phase_ms.saturating_sub(self.stagger_ms) as f64;
        self.ease.apply(unit_span(millis_f64(elapsed), start, span))
    }
}

/// Visual output of the shutter for one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ShutterFrame {
    /// Phase after this tick.
    pub phase: ShutterPhase,
    /// Top panel coverage, `0` retracted and `1` covering its half.
    pub top: f64,
    /// Bottom panel coverage.
    pub bottom: f64,
}

impl ShutterFrame {
    fn at_rest(phase: ShutterPhase, coverage: f64) -> Self {
        Self {
            phase,
            top: coverage,
            bottom: coverage,
        }
    }

    /// Whether the viewport is entirely hidden.
    pub fn is_covered(&self) -> bool {
        self.top >= 1.0 && self.bottom >= 1.0
    }
}

/// Result of advancing the shutter.
#[derive(Clone, Debug, PartialEq)]
pub struct ShutterTick<T> {
    /// Panel state to paint.
    pub frame: ShutterFrame,
    /// Navigation payload, present only on the tick that reached `Closed`.
    pub closed: Option<T>,
}

/// Single-instance shutter state machine.
///
/// `phase` is the one authoritative state; the shutter is busy whenever it is not
/// `Idle`, and requests arriving while busy are dropped.
#[derive(Debug)]
pub struct Shutter<T> {
    cfg: ShutterConfig,
    phase: ShutterPhase,
    entered_at: Duration,
    payload: Option<T>,
    cycles: u64,
    torn_down: bool,
}

impl<T> Shutter<T> {
    /// Create an idle shutter.
    pub fn new(cfg: ShutterConfig) -> StageResult<Self> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            phase: ShutterPhase::Idle,
            entered_at: Duration::ZERO,
            payload: None,
            cycles: 0,
            torn_down: false,
        })
    }

    /// Timings in use.
    pub fn config(&self) -> &ShutterConfig {
        &self.cfg
    }

    /// Current phase.
    pub fn phase(&self) -> ShutterPhase {
        self.phase
    }

    /// `true` while a cycle is in flight.
    pub fn is_busy(&self) -> bool {
        self.phase != ShutterPhase::Idle
    }

    /// Completed cycles.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Start a cycle carrying `payload`.
    ///
    /// Returns `false`, dropping the payload, when busy or torn down.
    pub fn navigate(&mut self, now: Duration, payload: T) -> bool {
        if self.torn_down {
            return false;
        }
        if self.is_busy() {
            tracing::debug!(phase = ?self.phase, "shutter: navigation dropped while busy");
            return false;
        }
        self.enter(ShutterPhase::Closing, now);
        self.payload = Some(payload);
        true
    }

    /// Advance to `now`.
    pub fn tick(&mut self, now: Duration) -> ShutterTick<T> {
        if self.torn_down {
            return ShutterTick {
                frame: ShutterFrame::at_rest(ShutterPhase::Idle, 0.0),
                closed: None,
            };
        }

        loop {
            let elapsed = now.saturating_sub(self.entered_at);
            match self.phase {
                ShutterPhase::Idle => {
                    return ShutterTick {
                        frame: ShutterFrame::at_rest(ShutterPhase::Idle, 0.0),
                        closed: None,
                    };
                }
                ShutterPhase::Closing => {
                    if elapsed >= Duration::from_millis(self.cfg.closing_ms) {
                        // Stop here even if the pause has also elapsed: the host must
                        // apply its jump before anything uncovers.
                        self.enter(ShutterPhase::Closed, now);
                        return ShutterTick {
                            frame: ShutterFrame::at_rest(ShutterPhase::Closed, 1.0),
                            closed: self.payload.take(),
                        };
                    }
                    return ShutterTick {
                        frame: ShutterFrame {
                            phase: ShutterPhase::Closing,
                            top: self.cfg.panel(0, elapsed, self.cfg.closing_ms),
                            bottom: self.cfg.panel(1, elapsed, self.cfg.closing_ms),
                        },
                        closed: None,
                    };
                }
                ShutterPhase::Closed => {
                    let pause = Duration::from_millis(self.cfg.pause_ms);
                    if elapsed < pause {
                        return ShutterTick {
                            frame: ShutterFrame::at_rest(ShutterPhase::Closed, 1.0),
                            closed: None,
                        };
                    }
                    let opened_at = self.entered_at.saturating_add(pause);
                    self.enter(ShutterPhase::Opening, opened_at);
                }
                ShutterPhase::Opening => {
                    if elapsed >= Duration::from_millis(self.cfg.opening_ms) {
                        self.cycles += 1;
                        self.enter(ShutterPhase::Idle, now);
                        continue;
                    }
                    return ShutterTick {
                        frame: ShutterFrame {
                            phase: ShutterPhase::Opening,
                            top: 1.0 - self.cfg.panel(0, elapsed, self.cfg.opening_ms),
                            bottom: 1.0 - self.cfg.panel(1, elapsed, self.cfg.opening_ms),
                        },
                        closed: None,
                    };
                }
            }
        }
    }

    /// Cancel everything. The payload is dropped and the shutter stays inert.
    pub fn teardown(&mut self) {
        if self.is_busy() {
            tracing::debug!(phase = ?self.phase, "shutter: torn down mid-cycle");
        }
        self.payload = None;
        self.phase = ShutterPhase::Idle;
        self.torn_down = true;
    }

    /// Whether [`Shutter::teardown`] has run.
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    fn enter(&mut self, phase: ShutterPhase, at: Duration) {
        tracing::debug!(from = ?self.phase, to = ?phase, at_ms = millis_f64(at), "shutter: phase");
        self.phase = phase;
        self.entered_at = at;
    }
}

/// A shutter bound to a clock.
#[derive(Debug)]
pub struct ShutterDriver<C, T> {
    clock: C,
    shutter: Shutter<T>,
}

impl<C: FrameClock, T> ShutterDriver<C, T> {
    /// Bind `shutter` to `clock`.
    pub fn new(clock: C, shutter: Shutter<T>) -> Self {
        Self { clock, shutter }
    }

    /// The underlying state machine.
    pub fn shutter(&self) -> &Shutter<T> {
        &self.shutter
    }

    /// The clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Request a cycle at the clock's current time.
    pub fn navigate(&mut self, payload: T) -> bool {
        let now = self.clock.now();
        self.shutter.navigate(now, payload)
    }

    /// Advance to the clock's current time.
    pub fn pump(&mut self) -> ShutterTick<T> {
        let now = self.clock.now();
        self.shutter.tick(now)
    }

    /// Advance and hand the payload to `on_closed` if this frame reached `Closed`.
    pub fn pump_with(&mut self, on_closed: impl FnOnce(T)) -> ShutterFrame {
        let tick = self.pump();
        if let Some(payload) = tick.closed {
            on_closed(payload);
        }
        tick.frame
    }

    /// See [`Shutter::teardown`].
    pub fn teardown(&mut self) {
        self.shutter.teardown();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shutter/machine.rs"]
mod tests;
