//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer ALU used in the Execute stage.
//! All arithmetic wraps modulo 2^32 (two's complement) and shift amounts
//! are masked to their low five bits.

use crate::core::pipeline::signals::AluOp;

/// Bit mask for the shift amount on a 32-bit datapath.
const SHAMT_MASK: u32 = 0x1f;

/// Arithmetic Logic Unit (ALU) for integer operations.
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation on operands `a` and `b`.
    ///
    /// For shifts, `b` supplies the shift amount; only its low five bits
    /// are used.
    pub fn execute(op: AluOp, a: u32, b: u32) -> u32 {
        let sh = b & SHAMT_MASK;
        match op {
            AluOp::Add => a.wrapping_add(b),
            AluOp::Sub => a.wrapping_sub(b),
            AluOp::Sll => a.wrapping_shl(sh),
            AluOp::Srl => a.wrapping_shr(sh),
            AluOp::Sra => ((a as i32) >> sh) as u32,
            AluOp::Or => a | b,
            AluOp::And => a & b,
            AluOp::Xor => a ^ b,
            AluOp::Slt => ((a as i32) < (b as i32)) as u32,
            AluOp::Sltu => (a < b) as u32,
        }
    }
}
