use crate::foundation::error::{StageError, StageResult};

pub use kurbo::{Affine, Point, Vec2};

/// Visible viewport dimensions in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Viewport {
    /// Create a validated viewport with finite, positive dimensions.
    pub fn new(width: f64, height: f64) -> StageResult<Self> {
        if !(width.is_finite() && width > 0.0) {
            return Err(StageError::validation("Viewport width must be finite and > 0"));
        }
        if !(height.is_finite() && height > 0.0) {
            return Err(StageError::validation(
                "Viewport height must be finite and > 0",
            ));
        }
        Ok(Self { width, height })
    }

    /// Center point, used as the default transform anchor for full-screen layers.
    pub fn center(self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Convert a length in viewport-height units to pixels.
    pub fn vh(self, units: f64) -> f64 {
        units * self.height
    }
}

/// Stable index of a section on the page, in stacking order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct SectionId(pub usize);
