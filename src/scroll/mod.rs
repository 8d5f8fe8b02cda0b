//! Scroll offset to per-segment progress.

/// Segment geometry and raw progress.
pub mod segment;
/// Per-segment progress state with optional smoothing.
pub mod tracker;
