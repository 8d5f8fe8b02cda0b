//! Page-level wiring of sections, reveals and the shutter.

/// JSON-loadable configuration.
pub mod config;
/// Page orchestrator.
pub mod orchestrator;
/// Viewport change debouncing.
pub mod resize;
