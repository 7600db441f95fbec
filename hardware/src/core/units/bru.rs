//! Branch Resolution Unit.
//!
//! Evaluates conditional-branch comparisons and computes redirect targets
//! for branches and jumps in the Execute stage.

use crate::core::pipeline::signals::BranchCond;

/// JALR clears bit 0 of its computed target.
const JALR_ALIGNMENT_MASK: u32 = !1;

/// Branch resolution unit.
pub struct Bru;

impl Bru {
    /// Evaluates a branch condition on the two (forwarded) source operands.
    pub fn taken(cond: BranchCond, rs1: u32, rs2: u32) -> bool {
        match cond {
            BranchCond::Never => false,
            BranchCond::Eq => rs1 == rs2,
            BranchCond::Ne => rs1 != rs2,
            BranchCond::Lt => (rs1 as i32) < (rs2 as i32),
            BranchCond::Ge => (rs1 as i32) >= (rs2 as i32),
            BranchCond::Ltu => rs1 < rs2,
            BranchCond::Geu => rs1 >= rs2,
        }
    }

    /// PC-relative target of a branch or JAL.
    pub fn relative_target(pc: u32, offset: i32) -> u32 {
        pc.wrapping_add(offset as u32)
    }

    /// Register-indirect target of a JALR.
    pub fn indirect_target(base: u32, offset: i32) -> u32 {
        base.wrapping_add(offset as u32) & JALR_ALIGNMENT_MASK
    }
}
