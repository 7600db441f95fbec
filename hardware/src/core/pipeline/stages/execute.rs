//! Execute (EX) Stage.
//!
//! This module implements the execution stage of the pipeline. It is responsible for:
//! - Selecting ALU operands from the forwarded register values, the PC,
//!   the immediate, or the shift amount.
//! - Performing the ALU operation (also used for effective addresses and
//!   branch/JAL targets).
//! - Resolving branches and jumps: a taken outcome and its redirect target
//!   are latched into EX/MEM, where the hazard unit picks them up to flush
//!   the younger instructions in the same cycle.

use crate::core::pipeline::latches::{ExMem, ExMemEntry, IdEx, IdExEntry};
use crate::core::pipeline::signals::{OpASrc, OpBSrc};
use crate::core::units::alu::Alu;
use crate::core::units::bru::Bru;

/// Executes the Execute stage.
///
/// # Arguments
///
/// * `id_ex` - The ID/EX latch to consume.
/// * `operands` - The rs1 and rs2 values after forwarding substitution.
/// * `trace` - Whether to emit trace events.
pub fn execute_stage(id_ex: &IdEx, operands: (u32, u32), trace: bool) -> ExMem {
    let Some(id) = id_ex.entry.as_ref() else {
        return ExMem::bubble();
    };

    let entry = execute(id, operands);

    if trace {
        if let Some(fault) = entry.fault {
            tracing::trace!(target: "pipeline", "EX  pc={:#010x} # {}", entry.pc, fault);
        } else if entry.ctrl.is_control_transfer() {
            tracing::trace!(
                target: "pipeline",
                "EX  pc={:#010x} taken={} target={:#010x}",
                entry.pc,
                entry.taken,
                entry.target
            );
        } else {
            tracing::trace!(target: "pipeline", "EX  pc={:#010x} alu={:#x}", entry.pc, entry.alu);
        }
    }

    ExMem { entry: Some(entry) }
}

/// Computes the EX/MEM entry for one instruction.
pub fn execute(id: &IdExEntry, (fwd_a, fwd_b): (u32, u32)) -> ExMemEntry {
    let mut out = ExMemEntry {
        pc: id.pc,
        inst: id.inst,
        rd: id.rd,
        alu: 0,
        store_data: 0,
        taken: false,
        target: 0,
        ctrl: id.ctrl,
        fault: id.fault,
    };
    if id.fault.is_some() {
        return out;
    }

    let op_a = match id.ctrl.a_src {
        OpASrc::Reg1 => fwd_a,
        OpASrc::Pc => id.pc,
        OpASrc::Zero => 0,
    };
    let op_b = match id.ctrl.b_src {
        OpBSrc::Reg2 => fwd_b,
        OpBSrc::Imm => id.imm as u32,
        OpBSrc::Shamt => id.shamt,
    };

    let alu = Alu::execute(id.ctrl.alu, op_a, op_b);
    out.store_data = fwd_b;

    if id.ctrl.jump {
        out.taken = true;
        out.target = match id.ctrl.a_src {
            OpASrc::Reg1 => Bru::indirect_target(fwd_a, id.imm),
            _ => Bru::relative_target(id.pc, id.imm),
        };
        out.alu = id.pc.wrapping_add(4);
    } else if id.ctrl.branch {
        out.taken = Bru::taken(id.ctrl.cond, fwd_a, fwd_b);
        out.target = alu;
        out.alu = alu;
    } else {
        out.alu = alu;
    }

    out
}
