//! CPU core: architectural state, the five-stage pipeline, and its
//! functional units.

/// Architectural state (register file).
pub mod arch;

/// Pipelined CPU model and cycle loop.
pub mod cpu;

/// Pipeline latches, control signals, hazard unit, and stages.
pub mod pipeline;

/// Functional units (ALU, branch resolution, load/store helpers).
pub mod units;

pub use cpu::{Cpu, StagePcs};
