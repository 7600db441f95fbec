//! Architectural state.
//!
//! The register file is the only architectural state held by the core;
//! memories live in [`crate::soc`].

/// General-Purpose Register file implementation.
pub mod gpr;
