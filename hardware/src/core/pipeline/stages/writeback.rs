//! Writeback (WB) Stage.
//!
//! The single point of register commit. Produces the register-file write
//! for the instruction in MEM/WB and raises its fault, if it carries one.

use crate::common::SimError;
use crate::core::pipeline::latches::{MemWb, WritebackBundle};

/// Executes the Writeback stage.
///
/// # Returns
///
/// The register-file write to commit at the end of the cycle (disabled for
/// bubbles and instructions that do not write a register), or
/// `SimError::Fault` if the instruction carries a fault.
pub fn wb_stage(mem_wb: &MemWb, trace: bool) -> Result<WritebackBundle, SimError> {
    let Some(wb) = mem_wb.entry.as_ref() else {
        return Ok(WritebackBundle::default());
    };

    if let Some(fault) = wb.fault {
        return Err(SimError::Fault { pc: wb.pc, fault });
    }

    let bundle = WritebackBundle {
        enable: wb.ctrl.reg_write,
        rd: wb.rd,
        data: wb.result(),
    };

    if trace {
        if bundle.enable {
            tracing::trace!(
                target: "pipeline",
                "WB  pc={:#010x} x{} <= {:#x}",
                wb.pc,
                bundle.rd,
                bundle.data
            );
        } else {
            tracing::trace!(target: "pipeline", "WB  pc={:#010x}", wb.pc);
        }
    }

    Ok(bundle)
}
