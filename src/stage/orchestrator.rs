use std::time::Duration;

use crate::{
    foundation::{
        core::{SectionId, Viewport},
        error::StageResult,
    },
    layers::section::{LayerState, render},
    reveal::sequencer::{RevealFrame, RevealSequencer},
    scroll::{segment::Segment, tracker::ProgressTracker},
    shutter::machine::{Shutter, ShutterFrame},
    stage::{
        config::{SectionDef, StageConfig},
        resize::ResizeDebounce,
    },
};

/// Everything the host needs to paint one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StageFrame {
    /// Scroll offset the frame was computed from.
    pub scroll_offset: f64,
    /// Viewport the segments are currently laid out for.
    pub viewport: Viewport,
    /// Entrance progress per section.
    pub progress: Vec<f64>,
    /// Visual state per section.
    pub layers: Vec<LayerState>,
    /// Reveal output per section that has text.
    pub reveals: Vec<Option<RevealFrame>>,
    /// Shutter panels.
    pub shutter: ShutterFrame,
    /// Set on the frame the shutter fully closed: scroll here instantly.
    pub jump_to: Option<f64>,
}

// Navigation target kept in layout-independent units until the shutter closes.
#[derive(Clone, Copy, Debug)]
enum Jump {
    Section(SectionId),
    Vh(f64),
}

#[derive(Debug)]
struct SectionSlot {
    def: SectionDef,
    segment: Option<Segment>,
    tracker: Option<ProgressTracker>,
    reveal: Option<RevealSequencer>,
}

/// The landing page: sections, their trackers and reveals, and the shutter.
///
/// A stage is mounted from construction until [`Stage::teardown`]; afterwards it
/// ignores input and produces no frames.
#[derive(Debug)]
pub struct Stage {
    cfg: StageConfig,
    viewport: Viewport,
    slots: Vec<SectionSlot>,
    shutter: Shutter<Jump>,
    resize: ResizeDebounce,
    scroll_offset: f64,
    mounted: bool,
}

impl Stage {
    /// Validate `cfg` and lay the page out for `viewport`.
    #[tracing::instrument(skip(cfg), fields(sections = cfg.sections.len()))]
    pub fn new(cfg: StageConfig, viewport: Viewport) -> StageResult<Self> {
        cfg.validate()?;
        let viewport = Viewport::new(viewport.width, viewport.height)?;

        let mut slots = Vec::with_capacity(cfg.sections.len());
        for (i, def) in cfg.sections.iter().enumerate() {
            let id = SectionId(i);
            let segment = def
                .enter
                .as_ref()
                .map(|enter| enter.resolve(id, viewport))
                .transpose()?;
            let tracker = segment
                .map(|s| ProgressTracker::new(s, cfg.tracking))
                .transpose()?;
            let reveal = match &def.reveal {
                Some(r) => Some(RevealSequencer::from_text(&r.text, r.band()?, r.timing)?),
                None => None,
            };
            slots.push(SectionSlot {
                def: def.clone(),
                segment,
                tracker,
                reveal,
            });
        }

        let shutter = Shutter::new(cfg.shutter)?;
        let resize = ResizeDebounce::new(Duration::from_millis(cfg.resize_debounce_ms));
        Ok(Self {
            cfg,
            viewport,
            slots,
            shutter,
            resize,
            scroll_offset: 0.0,
            mounted: true,
        })
    }

    /// Configuration in use.
    pub fn config(&self) -> &StageConfig {
        &self.cfg
    }

    /// Viewport the segments are laid out for.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Number of sections.
    pub fn section_count(&self) -> usize {
        self.slots.len()
    }

    /// Resolved enter segment of each section.
    pub fn segments(&self) -> Vec<Option<Segment>> {
        self.slots.iter().map(|s| s.segment).collect()
    }

    /// Full scrollable height: one viewport per section.
    pub fn total_height(&self) -> f64 {
        self.viewport.vh(self.cfg.total_vh())
    }

    /// Largest meaningful scroll offset.
    pub fn max_scroll(&self) -> f64 {
        (self.total_height() - self.viewport.height).max(0.0)
    }

    /// Last observed scroll offset.
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Whether the stage still accepts input.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// `true` while a shutter cycle is running; hosts disable navigation triggers.
    pub fn is_busy(&self) -> bool {
        self.shutter.is_busy()
    }

    /// Scroll offset at which `section` has fully entered.
    pub fn section_target(&self, section: SectionId) -> Option<f64> {
        let slot = self.slots.get(section.0)?;
        Some(slot.segment.map_or(0.0, Segment::end_offset))
    }

    /// Section names in stacking order.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|s| s.def.name.as_str())
    }

    /// Record the page's scroll offset.
    pub fn on_scroll(&mut self, offset: f64) {
        if !self.mounted || offset.is_nan() {
            return;
        }
        self.scroll_offset = offset.max(0.0);
    }

    /// Record a viewport change; applied once resizing has been quiet long enough.
    pub fn on_resize(&mut self, viewport: Viewport, now: Duration) {
        if !self.mounted {
            return;
        }
        self.resize.observe(viewport, now);
    }

    /// Ask the shutter to carry the page to `section`.
    ///
    /// Returns `false` if the section does not exist, a cycle is already running, or the
    /// stage has been torn down.
    pub fn navigate(&mut self, section: SectionId, now: Duration) -> bool {
        if !self.mounted {
            return false;
        }
        if section.0 >= self.slots.len() {
            tracing::debug!(section = section.0, "stage: navigate to unknown section");
            return false;
        }
        self.shutter.navigate(now, Jump::Section(section))
    }

    /// Ask the shutter to carry the page to an arbitrary offset.
    ///
    /// The offset is kept relative to the viewport height, so a resize applied before
    /// the shutter closes moves the target with the layout.
    pub fn navigate_to_offset(&mut self, offset: f64, now: Duration) -> bool {
        if !self.mounted || !offset.is_finite() {
            return false;
        }
        let height = self.viewport.height;
        let units = if height > 0.0 {
            offset.clamp(0.0, self.max_scroll()) / height
        } else {
            0.0
        };
        self.shutter.navigate(now, Jump::Vh(units))
    }

    /// Compute the frame at `now`. `None` once torn down.
    pub fn frame(&mut self, now: Duration) -> Option<StageFrame> {
        if !self.mounted {
            return None;
        }

        if let Some(vp) = self.resize.poll(now) {
            self.apply_viewport(vp);
        }

        let tick = self.shutter.tick(now);
        let jump_to = tick.closed.map(|jump| self.resolve_jump(jump));
        if let Some(target) = jump_to {
            tracing::debug!(from = self.scroll_offset, to = target, "stage: jump behind shutter");
            self.scroll_offset = target;
            // The jump is hidden; smoothing across it would only delay settling.
            for tracker in self.slots.iter_mut().filter_map(|s| s.tracker.as_mut()) {
                tracker.reset();
            }
        }

        let offset = self.scroll_offset;
        let progress: Vec<f64> = self
            .slots
            .iter_mut()
            .map(|s| s.tracker.as_mut().map_or(1.0, |t| t.update(offset)))
            .collect();

        let layers = (0..progress.len())
            .map(|i| {
                let next = progress.get(i + 1).copied().unwrap_or(0.0);
                render(i, progress[i], next, &self.cfg.layer)
            })
            .collect();

        let reveals = self
            .slots
            .iter_mut()
            .zip(&progress)
            .map(|(slot, &p)| {
                slot.reveal.as_mut().map(|r| {
                    r.update(p, now);
                    r.frame(now)
                })
            })
            .collect();

        tracing::trace!(offset, ?progress, "stage: frame");
        Some(StageFrame {
            scroll_offset: offset,
            viewport: self.viewport,
            progress,
            layers,
            reveals,
            shutter: tick.frame,
            jump_to,
        })
    }

    /// Stop everything: pending resize, shutter cycle and scheduled reveals.
    pub fn teardown(&mut self) {
        if !self.mounted {
            return;
        }
        tracing::debug!("stage: teardown");
        self.mounted = false;
        self.resize.cancel();
        self.shutter.teardown();
        for reveal in self.slots.iter_mut().filter_map(|s| s.reveal.as_mut()) {
            reveal.teardown();
        }
    }

    fn resolve_jump(&self, jump: Jump) -> f64 {
        let target = match jump {
            Jump::Section(section) => self.section_target(section).unwrap_or(0.0),
            Jump::Vh(units) => self.viewport.vh(units),
        };
        target.clamp(0.0, self.max_scroll())
    }

    fn apply_viewport(&mut self, viewport: Viewport) {
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            "stage: viewport applied"
        );
        self.viewport = viewport;
        for (i, slot) in self.slots.iter_mut().enumerate() {
            let Some(enter) = slot.def.enter.as_ref() else {
                continue;
            };
            let id = SectionId(i);
            let segment = match enter.resolve(id, viewport) {
                Ok(seg) => seg,
                Err(e) => {
                    tracing::warn!(section = i, error = %e, "stage: degenerate segment");
                    Segment::degenerate(id, viewport.vh(enter.start_vh))
                }
            };
            slot.segment = Some(segment);
            if let Some(tracker) = slot.tracker.as_mut() {
                tracker.set_segment(segment);
            }
        }
    }
}

impl StageFrame {
    /// Index of the topmost interactive layer, if any.
    pub fn interactive_section(&self) -> Option<SectionId> {
        self.layers
            .iter()
            .enumerate()
            .filter(|(_, l)| l.interactive)
            .max_by_key(|(_, l)| l.z_index)
            .map(|(i, _)| SectionId(i))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/orchestrator.rs"]
mod tests;
