//! Simulation harness: program loading and the sequential reference model.

/// Program image loading and CPU construction.
pub mod loader;

/// One-instruction-at-a-time golden model.
pub mod reference;
