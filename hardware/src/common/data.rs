//! Memory Access Types.
//!
//! This module defines the classification of memory accesses used by the
//! instruction and data memory ports. The access type decides which fault
//! an out-of-range or misaligned access is reported as.

/// Type of memory access operation.
///
/// Used to distinguish between instruction fetches, data reads,
/// and data writes so the memory ports can report the right fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    /// Instruction fetch access through the instruction memory port.
    Fetch,

    /// Data read access (load) through the data memory port.
    Read,

    /// Data write access (store) through the data memory port.
    Write,
}
