//! Pure per-section visual mapping.
//!
//! A section's look is a function of two progress values: its own entrance progress
//! and the entrance progress of the section stacked directly above it. Nothing here
//! holds state, so every layer can be checked in isolation with plain numbers.

use crate::{
    animation::ease::Ease,
    foundation::{
        core::{Affine, Vec2},
        error::{StageError, StageResult},
        math::{clamp01, lerp, unit_span},
    },
};

/// Tunables for the entrance, exit and stacking regimes.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayerConfig {
    /// Own progress at which entrance opacity reaches `1`.
    pub fade_in_span: f64,
    /// Own progress at which the curtain cover has fully retracted.
    pub curtain_span: f64,
    /// Curve for the curtain cover.
    pub curtain_ease: Ease,
    /// Own progress after which the content settles from its oversized start.
    pub settle_start: f64,
    /// Initial content scale before settling.
    pub enter_scale: f64,
    /// Initial content rotation before settling, in degrees.
    pub enter_rotation_deg: f64,
    /// Extra scale gained at `next == 1`.
    pub exit_scale_gain: f64,
    /// Extra rotation at `next == 1`, in degrees.
    pub exit_rotation_deg: f64,
    /// Upward push at `next == 1`, in viewport heights.
    pub exit_shift: f64,
    /// Own progress above which the layer paints at its stacked z-index.
    pub stack_threshold: f64,
    /// Base z-index for active layers; the section index is added on top.
    pub z_base: i32,
    /// Z-index for inactive layers; far below any active one.
    pub z_hidden: i32,
    /// Own progress above which the layer may take pointer input.
    pub interactive_enter: f64,
    /// Next-section progress at or above which the layer stops taking input.
    pub interactive_exit: f64,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            fade_in_span: 0.5,
            curtain_span: 0.5,
            curtain_ease: Ease::InOutQuad,
            settle_start: 0.5,
            enter_scale: 1.15,
            enter_rotation_deg: 2.0,
            exit_scale_gain: 0.08,
            exit_rotation_deg: -2.0,
            exit_shift: 0.05,
            stack_threshold: 0.3,
            z_base: 10,
            z_hidden: -1000,
            interactive_enter: 0.5,
            interactive_exit: 0.5,
        }
    }
}

impl LayerConfig {
    /// Reject spans and thresholds that would divide by zero or leave `[0, 1]`.
    pub fn validate(&self) -> StageResult<()> {
        for (name, v) in [
            ("fade_in_span", self.fade_in_span),
            ("curtain_span", self.curtain_span),
        ] {
            if !(v.is_finite() && v > 0.0 && v <= 1.0) {
                return Err(StageError::validation(format!(
                    "layer.{name} must be in (0, 1] (got {v})"
                )));
            }
        }
        for (name, v) in [
            ("settle_start", self.settle_start),
            ("stack_threshold", self.stack_threshold),
            ("interactive_enter", self.interactive_enter),
            ("interactive_exit", self.interactive_exit),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(StageError::validation(format!(
                    "layer.{name} must be in [0, 1] (got {v})"
                )));
            }
        }
        for (name, v) in [
            ("enter_rotation_deg", self.enter_rotation_deg),
            ("exit_scale_gain", self.exit_scale_gain),
            ("exit_rotation_deg", self.exit_rotation_deg),
            ("exit_shift", self.exit_shift),
        ] {
            if !v.is_finite() {
                return Err(StageError::validation(format!(
                    "layer.{name} must be finite (got {v})"
                )));
            }
        }
        if self.settle_start >= 1.0 {
            return Err(StageError::validation("layer.settle_start must be < 1"));
        }
        if !(self.enter_scale.is_finite() && self.enter_scale > 0.0) {
            return Err(StageError::validation("layer.enter_scale must be > 0"));
        }
        if self.z_hidden >= self.z_base {
            return Err(StageError::validation("layer.z_hidden must be below z_base"));
        }
        Ok(())
    }
}

/// Derived visual state of one section for one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct LayerState {
    /// Final opacity in `[0, 1]`.
    pub opacity: f64,
    /// Horizontal scale.
    pub scale_x: f64,
    /// Vertical scale.
    pub scale_y: f64,
    /// Rotation in degrees.
    pub rotation_deg: f64,
    /// Vertical offset in viewport heights (negative is up).
    pub translate_y: f64,
    /// How far the curtain cover has slid away, `0` covering, `1` gone.
    pub cover_retract: f64,
    /// Paint order.
    pub z_index: i32,
    /// Whether the layer takes pointer and scroll input.
    pub interactive: bool,
}

impl LayerState {
    /// Fully transparent, non-interactive state at `z_hidden`.
    pub fn hidden(cfg: &LayerConfig) -> Self {
        Self {
            opacity: 0.0,
            scale_x: cfg.enter_scale,
            scale_y: cfg.enter_scale,
            rotation_deg: cfg.enter_rotation_deg,
            translate_y: 0.0,
            cover_retract: 0.0,
            z_index: cfg.z_hidden,
            interactive: false,
        }
    }

    /// Layer transform for a viewport of `viewport_height` pixels, pivoting at `anchor`.
    ///
    /// Order: `T(translate) * T(anchor) * R(rot) * S(scale) * T(-anchor)`.
    pub fn to_affine(&self, anchor: Vec2, viewport_height: f64) -> Affine {
        let t_translate = Affine::translate(Vec2::new(0.0, self.translate_y * viewport_height));
        let t_anchor = Affine::translate(anchor);
        let t_unanchor = Affine::translate(-anchor);
        let t_rotate = Affine::rotate(self.rotation_deg.to_radians());
        let t_scale = Affine::scale_non_uniform(self.scale_x, self.scale_y);
        t_translate * t_anchor * t_rotate * t_scale * t_unanchor
    }
}

/// Entrance-only part of the mapping, before the exit regime is applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Entrance {
    /// Opacity ramp.
    pub opacity: f64,
    /// Curtain retraction.
    pub cover_retract: f64,
    /// Content scale.
    pub scale: f64,
    /// Content rotation in degrees.
    pub rotation_deg: f64,
}

/// Entrance regime for `own` progress.
pub fn entrance(own: f64, cfg: &LayerConfig) -> Entrance {
    let own = clamp01(own);
    let opacity = unit_span(own, 0.0, cfg.fade_in_span);
    let cover_retract = cfg.curtain_ease.apply(unit_span(own, 0.0, cfg.curtain_span));

    // Settling only starts once the curtain is out of the way.
    let settle = if own > cfg.settle_start {
        unit_span(own, cfg.settle_start, 1.0 - cfg.settle_start)
    } else {
        0.0
    };
    Entrance {
        opacity,
        cover_retract,
        scale: lerp(cfg.enter_scale, 1.0, settle),
        rotation_deg: lerp(cfg.enter_rotation_deg, 0.0, settle),
    }
}

/// Map `(own, next)` progress to the layer's visual state.
///
/// `index` is the section's position in the stack; it keeps later sections above
/// earlier ones while both are active. Pass `next = 0` for the topmost section.
pub fn render(index: usize, own: f64, next: f64, cfg: &LayerConfig) -> LayerState {
    let own = clamp01(own);
    let next = clamp01(next);
    let e = entrance(own, cfg);

    let exit_scale = 1.0 + cfg.exit_scale_gain * next;
    let scale = e.scale * exit_scale;

    let z_index = if own > cfg.stack_threshold {
        cfg.z_base.saturating_add(i32::try_from(index).unwrap_or(i32::MAX))
    } else {
        cfg.z_hidden
    };

    LayerState {
        opacity: clamp01(e.opacity * (1.0 - next)),
        scale_x: scale,
        scale_y: scale,
        rotation_deg: e.rotation_deg + cfg.exit_rotation_deg * next,
        translate_y: -cfg.exit_shift * next,
        cover_retract: e.cover_retract,
        z_index,
        interactive: own > cfg.interactive_enter && next < cfg.interactive_exit,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layers/section.rs"]
mod tests;
