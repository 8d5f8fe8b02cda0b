//! Time-driven curtain for discrete navigation.

/// Frame clocks.
pub mod clock;
/// Shutter state machine.
pub mod machine;
