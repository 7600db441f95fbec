//! RISC-V General-Purpose Register File.
//!
//! This module implements the General-Purpose Register (GPR) file, containing
//! 32 registers (x0-x31) with two read ports and one write port. Register x0
//! is hardwired to zero: writes to it are silently ignored.

use crate::isa::abi::{self, NUM_REGS};

/// General-Purpose Register file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gpr {
    regs: [u32; NUM_REGS],
}

impl Gpr {
    /// Creates a new register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self {
            regs: [0; NUM_REGS],
        }
    }

    /// Reads a general-purpose register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31)
    ///
    /// # Returns
    ///
    /// The value stored in the register. Register x0 always returns 0.
    pub fn read(&self, idx: usize) -> u32 {
        if idx == 0 {
            0
        } else {
            self.regs[idx]
        }
    }

    /// Reads both source operands in one cycle (the two read ports).
    pub fn read_pair(&self, rs1: usize, rs2: usize) -> (u32, u32) {
        (self.read(rs1), self.read(rs2))
    }

    /// Writes a value to a general-purpose register (the write port).
    ///
    /// Writes to register x0 are silently ignored.
    pub fn write(&mut self, idx: usize, val: u32) {
        if idx != 0 {
            self.regs[idx] = val;
        }
    }

    /// Snapshot of all 32 registers.
    pub fn snapshot(&self) -> [u32; NUM_REGS] {
        let mut out = self.regs;
        out[0] = 0;
        out
    }

    /// Dumps the contents of all registers to stdout, two per line.
    pub fn dump(&self) {
        for i in (0..NUM_REGS).step_by(2) {
            println!(
                "x{:<2} ({:>4}) = {:#010x}   x{:<2} ({:>4}) = {:#010x}",
                i,
                abi::name(i),
                self.read(i),
                i + 1,
                abi::name(i + 1),
                self.read(i + 1)
            );
        }
    }
}
