//! Word-by-word text reveal driven by section progress.

/// Two-threshold band.
pub mod hysteresis;
/// Reveal state machine and per-unit poses.
pub mod sequencer;
