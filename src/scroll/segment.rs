use crate::foundation::{
    core::{SectionId, Viewport},
    error::{StageError, StageResult},
    math::unit_span,
};

/// One scroll-driven transition window, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Segment {
    /// Section this window drives.
    pub id: SectionId,
    /// Scroll offset where progress starts leaving `0`.
    pub start_offset: f64,
    /// Scroll distance over which progress goes from `0` to `1`.
    pub length: f64,
}

impl Segment {
    /// Create a validated segment. `length` must be finite and `> 0`.
    pub fn new(id: SectionId, start_offset: f64, length: f64) -> StageResult<Self> {
        if !start_offset.is_finite() {
            return Err(StageError::validation("Segment start_offset must be finite"));
        }
        if !(length.is_finite() && length > 0.0) {
            return Err(StageError::validation(format!(
                "Segment {} length must be finite and > 0 (got {length})",
                id.0
            )));
        }
        Ok(Self {
            id,
            start_offset,
            length,
        })
    }

    /// A zero-length segment. Progress becomes a step at `start_offset`.
    pub fn degenerate(id: SectionId, start_offset: f64) -> Self {
        Self {
            id,
            start_offset,
            length: 0.0,
        }
    }

    /// Offset where progress reaches `1`.
    pub fn end_offset(self) -> f64 {
        self.start_offset + self.length.max(0.0)
    }

    /// Clamped progress for a scroll offset.
    pub fn progress(self, offset: f64) -> f64 {
        if offset.is_nan() {
            return 0.0;
        }
        unit_span(offset, self.start_offset, self.length)
    }
}

/// Segment geometry in viewport-height units, resolved against the live viewport.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SegmentDef {
    /// Start offset in viewport heights.
    pub start_vh: f64,
    /// Length in viewport heights.
    #[serde(default = "default_length_vh")]
    pub length_vh: f64,
}

fn default_length_vh() -> f64 {
    1.0
}

impl SegmentDef {
    /// Check the definition independently of any viewport.
    pub fn validate(&self) -> StageResult<()> {
        if !(self.start_vh.is_finite() && self.start_vh >= 0.0) {
            return Err(StageError::validation("segment start_vh must be finite and >= 0"));
        }
        if !(self.length_vh.is_finite() && self.length_vh > 0.0) {
            return Err(StageError::validation("segment length_vh must be finite and > 0"));
        }
        Ok(())
    }

    /// Resolve to pixels.
    pub fn resolve(&self, id: SectionId, viewport: Viewport) -> StageResult<Segment> {
        self.validate()?;
        Segment::new(id, viewport.vh(self.start_vh), viewport.vh(self.length_vh))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/segment.rs"]
mod tests;
