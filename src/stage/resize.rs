use std::time::Duration;

use crate::foundation::core::Viewport;

/// Trailing-edge debounce for viewport changes.
///
/// Every observation restarts the quiet period; only the latest size is applied.
#[derive(Clone, Debug)]
pub struct ResizeDebounce {
    window: Duration,
    pending: Option<(Viewport, Duration)>,
}

impl ResizeDebounce {
    /// Debounce with a quiet period of `window`.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Record a viewport size observed at `now`.
    pub fn observe(&mut self, viewport: Viewport, now: Duration) {
        self.pending = Some((viewport, now.saturating_add(self.window)));
    }

    /// Take the pending size once its quiet period has passed.
    pub fn poll(&mut self, now: Duration) -> Option<Viewport> {
        match self.pending {
            Some((vp, due)) if now >= due => {
                self.pending = None;
                Some(vp)
            }
            _ => None,
        }
    }

    /// `true` while a size is waiting.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop any waiting size.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
