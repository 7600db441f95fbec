//! Common types shared across the simulator.
//!
//! This module provides the memory access classification and the error
//! types used by every pipeline stage and by the simulation harness.

/// Memory access type definitions.
pub mod data;

/// Instruction faults and fatal simulator errors.
pub mod error;

pub use data::AccessType;
pub use error::{Fault, SimError};
