//! Functional units used by the Execute and Memory stages.

/// Integer arithmetic logic unit.
pub mod alu;

/// Branch resolution unit.
pub mod bru;

/// Load/store helpers: data extension and store sizing.
pub mod lsu;
