//! Memory Access (MEM) Stage.
//!
//! Issues at most one access to the data memory port per cycle. Loads
//! return data extended per the access width and signedness; stores write
//! the low bytes of the forwarded rs2 value. Everything else passes the ALU
//! result through. A load or store that faults performs no access.

use crate::common::Fault;
use crate::config::MisalignedPolicy;
use crate::core::pipeline::latches::{ExMem, MemAccess, MemWb, MemWbEntry};
use crate::core::units::lsu::Lsu;
use crate::soc::System;

/// Executes the Memory stage.
pub fn mem_stage(
    ex_mem: &ExMem,
    bus: &mut System,
    misaligned: MisalignedPolicy,
    trace: bool,
) -> MemWb {
    let Some(ex) = ex_mem.entry.as_ref() else {
        return MemWb::bubble();
    };

    let mut load_data = 0;
    let mut fault = ex.fault;

    if let Some(req) = ex.mem_access() {
        if misaligned == MisalignedPolicy::Fault && !req.width.is_aligned(req.addr) {
            fault = Some(Fault::misaligned(req.access, req.addr));
        } else {
            let req = MemAccess {
                data: Lsu::store_value(req.data, req.width),
                ..req
            };
            match bus.data_access(&req) {
                Ok(raw) if ex.ctrl.mem_read => {
                    load_data = Lsu::extend_load(raw, ex.ctrl.width, ex.ctrl.signed_load);
                }
                Ok(_) => {}
                Err(f) => fault = Some(f),
            }
        }

        if trace {
            if ex.ctrl.mem_read {
                tracing::trace!(
                    target: "pipeline",
                    "MEM pc={:#010x} LOAD addr={:#010x} size={:#05b} data={:#x}",
                    ex.pc,
                    req.addr,
                    req.size_encoding,
                    load_data
                );
            } else {
                tracing::trace!(
                    target: "pipeline",
                    "MEM pc={:#010x} STORE addr={:#010x} size={:#05b} data={:#x}",
                    ex.pc,
                    req.addr,
                    req.size_encoding,
                    req.data
                );
            }
        }
    } else if trace {
        tracing::trace!(target: "pipeline", "MEM pc={:#010x}", ex.pc);
    }

    MemWb {
        entry: Some(MemWbEntry {
            pc: ex.pc,
            inst: ex.inst,
            rd: ex.rd,
            alu: ex.alu,
            load_data,
            ctrl: ex.ctrl,
            fault,
        }),
    }
}
