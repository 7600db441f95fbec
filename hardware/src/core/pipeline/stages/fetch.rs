//! Instruction Fetch (IF) Stage.
//!
//! Reads the instruction word at the fetch PC through the instruction
//! memory port. A fetch that faults still produces an entry so the fault
//! is raised only if the instruction turns out to be on the correct path.

use crate::core::pipeline::latches::{IfId, IfIdEntry};
use crate::isa::disasm;
use crate::soc::System;

/// Executes the Fetch stage for the instruction at `pc`.
pub fn fetch_stage(pc: u32, bus: &System, trace: bool) -> IfId {
    let (inst, fault) = match bus.fetch(pc) {
        Ok(inst) => (inst, None),
        Err(fault) => (0, Some(fault)),
    };

    if trace {
        match fault {
            Some(f) => tracing::trace!(target: "pipeline", "IF  pc={:#010x} # {}", pc, f),
            None => tracing::trace!(
                target: "pipeline",
                "IF  pc={:#010x} inst={:#010x} {}",
                pc,
                inst,
                disasm::disassemble(inst)
            ),
        }
    }

    IfId {
        entry: Some(IfIdEntry { pc, inst, fault }),
    }
}
