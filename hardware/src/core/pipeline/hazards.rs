//! Data and Control Hazard Unit.
//!
//! This module implements the single authority that keeps pipelined
//! execution equivalent to sequential execution. It observes every latch
//! boundary at the start of a cycle and emits a small set of overrides
//! consumed by the CPU when it commits the cycle:
//!
//! - `stall_decode`: hold the fetch PC and IF/ID, inject a bubble into ID/EX.
//! - `flush_fetch` / `flush_decode`: squash the two instructions younger
//!   than a taken branch, jump, or halting instruction in Execute.
//! - `bypass`: the source of each Execute operand.
//!
//! Read-after-write hazards are resolved by forwarding from EX/MEM, MEM/WB,
//! or the writeback committed in the previous cycle. A load followed
//! immediately by a consumer cannot be forwarded in time and stalls one
//! cycle. With forwarding disabled every RAW hazard is resolved by stalling.

use crate::core::pipeline::latches::{ExMem, IdEx, IdExEntry, IfId, MemWb, WritebackBundle};
use crate::core::pipeline::signals::ControlSignals;
use crate::core::pipeline::stages::decode::control_signals;
use crate::isa::instruction::Decoded;

/// Where an Execute operand comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ForwardSource {
    /// Value read from the register file in Decode.
    #[default]
    RegFile,
    /// Result of the instruction one ahead (EX/MEM).
    ExMem,
    /// Result of the instruction two ahead (MEM/WB).
    MemWb,
    /// Register write committed at the end of the previous cycle.
    Writeback,
}

/// Operand source selection for the instruction in Execute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bypass {
    pub rs1: ForwardSource,
    pub rs2: ForwardSource,
}

impl Bypass {
    /// Operand sources that bypass the register file.
    pub fn forwarded(&self) -> impl Iterator<Item = ForwardSource> {
        [self.rs1, self.rs2]
            .into_iter()
            .filter(|s| *s != ForwardSource::RegFile)
    }
}

/// Control overrides produced for one cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HazardSignals {
    /// Hold IF/ID and the fetch PC; bubble into ID/EX.
    pub stall_decode: bool,
    /// Squash the instruction fetched this cycle.
    pub flush_fetch: bool,
    /// Squash the instruction decoded this cycle.
    pub flush_decode: bool,
    /// Stop fetching (a halting instruction left Execute).
    pub halt_fetch: bool,
    /// Fetch PC for the next cycle when flushing.
    pub redirect: Option<u32>,
    /// Operand sources for Execute.
    pub bypass: Bypass,
}

impl HazardSignals {
    /// Returns `true` if the younger instructions are being squashed.
    pub fn flushing(&self) -> bool {
        self.flush_fetch || self.flush_decode
    }
}

/// Centralised hazard detection and forwarding unit.
#[derive(Clone, Copy, Debug)]
pub struct HazardUnit {
    /// Resolve RAW hazards by forwarding (`true`) or only by stalling.
    pub forwarding: bool,
}

impl HazardUnit {
    pub fn new(forwarding: bool) -> Self {
        Self { forwarding }
    }

    /// Computes the data-hazard signals from the latches at the start of a cycle.
    ///
    /// # Arguments
    ///
    /// * `if_id` - Instruction about to be decoded.
    /// * `id_ex` - Instruction about to be executed.
    /// * `ex_mem` - Instruction about to access memory.
    /// * `mem_wb` - Instruction about to write back.
    /// * `wb_latch` - Register write committed at the end of the previous cycle.
    pub fn detect(
        &self,
        if_id: &IfId,
        id_ex: &IdEx,
        ex_mem: &ExMem,
        mem_wb: &MemWb,
        wb_latch: &WritebackBundle,
    ) -> HazardSignals {
        let mut signals = HazardSignals::default();

        if self.forwarding {
            signals.stall_decode = need_stall_load_use(id_ex, if_id);
            if let Some(id) = id_ex.entry.as_ref() {
                signals.bypass = select_bypass(id, ex_mem, mem_wb, wb_latch);
            }
        } else {
            signals.stall_decode = need_stall_no_forwarding(if_id, id_ex, ex_mem, mem_wb);
        }

        if signals.stall_decode {
            tracing::debug!(
                pc = ?if_id.entry.as_ref().map(|e| e.pc),
                "data hazard: stalling decode"
            );
        }
        if signals.bypass != Bypass::default() {
            tracing::debug!(
                pc = ?id_ex.entry.as_ref().map(|e| e.pc),
                rs1 = ?signals.bypass.rs1,
                rs2 = ?signals.bypass.rs2,
                "forwarding operands"
            );
        }

        signals
    }

    /// Folds the Execute outcome into the control overrides.
    ///
    /// A taken branch or jump flushes the two younger instructions and
    /// redirects fetch to its target; a halting instruction flushes them and
    /// stops fetch. Flush takes priority over a stall in the same cycle.
    pub fn resolve_control(&self, signals: &mut HazardSignals, next_ex_mem: &ExMem) {
        let Some(ex) = next_ex_mem.entry.as_ref() else {
            return;
        };
        if ex.fault.is_some() {
            return;
        }

        if ex.taken {
            signals.flush_fetch = true;
            signals.flush_decode = true;
            signals.redirect = Some(ex.target);
            tracing::debug!(pc = ex.pc, target = ex.target, "control hazard: flushing");
        } else if ex.ctrl.halt {
            signals.flush_fetch = true;
            signals.flush_decode = true;
            signals.halt_fetch = true;
            tracing::debug!(pc = ex.pc, "halt in execute: stopping fetch");
        }

        if signals.flushing() {
            signals.stall_decode = false;
        }
    }
}

/// Control signals of the (not yet decoded) instruction in IF/ID.
///
/// Returns `None` for a bubble, a faulted fetch, or an illegal encoding;
/// such an instruction reads no registers.
fn peek_decode(if_id: &IfId) -> Option<(Decoded, ControlSignals)> {
    let entry = if_id.entry.as_ref()?;
    if entry.fault.is_some() {
        return None;
    }
    let d = Decoded::new(entry.inst);
    let ctrl = control_signals(&d, entry.inst).ok()?;
    Some((d, ctrl))
}

fn reads(d: &Decoded, ctrl: &ControlSignals, reg: usize) -> bool {
    reg != 0 && ((ctrl.uses_rs1 && d.rs1 == reg) || (ctrl.uses_rs2 && d.rs2 == reg))
}

/// Checks if a pipeline stall is needed due to a load-use data hazard.
///
/// A load-use hazard occurs when the instruction in Decode reads a register
/// loaded by the instruction in Execute: the loaded value only exists after
/// the Memory stage, one cycle too late for Execute to consume it.
pub fn need_stall_load_use(id_ex: &IdEx, if_id: &IfId) -> bool {
    let Some(ex) = id_ex.entry.as_ref() else {
        return false;
    };
    if !ex.ctrl.mem_read || ex.fault.is_some() || ex.rd == 0 {
        return false;
    }
    peek_decode(if_id).is_some_and(|(d, ctrl)| reads(&d, &ctrl, ex.rd))
}

/// Checks if Decode must stall with forwarding disabled.
///
/// Stalls while any older in-flight instruction writes a register the
/// instruction in Decode reads. Once the producer leaves MEM/WB its value
/// is in the register file before Decode reads it.
pub fn need_stall_no_forwarding(
    if_id: &IfId,
    id_ex: &IdEx,
    ex_mem: &ExMem,
    mem_wb: &MemWb,
) -> bool {
    let Some((d, ctrl)) = peek_decode(if_id) else {
        return false;
    };
    let writers = [
        id_ex.entry.map(|e| (e.ctrl.reg_write, e.rd)),
        ex_mem.entry.map(|e| (e.ctrl.reg_write, e.rd)),
        mem_wb.entry.map(|e| (e.ctrl.reg_write, e.rd)),
    ];
    writers
        .into_iter()
        .flatten()
        .any(|(write, rd)| write && reads(&d, &ctrl, rd))
}

/// Selects the most recent producer of each source operand of `id`.
///
/// EX/MEM is never selected for a load: its data is not available yet,
/// which the load-use stall guarantees never matters.
pub fn select_bypass(
    id: &IdExEntry,
    ex_mem: &ExMem,
    mem_wb: &MemWb,
    wb_latch: &WritebackBundle,
) -> Bypass {
    let pick = |used: bool, reg: usize| -> ForwardSource {
        if !used || reg == 0 {
            return ForwardSource::RegFile;
        }
        if ex_mem
            .entry
            .is_some_and(|e| e.ctrl.reg_write && !e.ctrl.mem_read && e.rd == reg)
        {
            ForwardSource::ExMem
        } else if mem_wb.entry.is_some_and(|e| e.ctrl.reg_write && e.rd == reg) {
            ForwardSource::MemWb
        } else if wb_latch.writes(reg).is_some() {
            ForwardSource::Writeback
        } else {
            ForwardSource::RegFile
        }
    };

    Bypass {
        rs1: pick(id.ctrl.uses_rs1, id.rs1),
        rs2: pick(id.ctrl.uses_rs2, id.rs2),
    }
}

/// Resolves the operand values for Execute according to `bypass`.
///
/// Returns `(0, 0)` for a bubble.
pub fn forward_operands(
    id_ex: &IdEx,
    bypass: &Bypass,
    ex_mem: &ExMem,
    mem_wb: &MemWb,
    wb_latch: &WritebackBundle,
) -> (u32, u32) {
    let Some(id) = id_ex.entry.as_ref() else {
        return (0, 0);
    };

    let value = |src: ForwardSource, regfile: u32| -> u32 {
        match src {
            ForwardSource::RegFile => regfile,
            ForwardSource::ExMem => ex_mem.entry.map_or(regfile, |e| e.alu),
            ForwardSource::MemWb => mem_wb.entry.map_or(regfile, |e| e.result()),
            ForwardSource::Writeback => wb_latch.data,
        }
    };

    (value(bypass.rs1, id.rv1), value(bypass.rs2, id.rv2))
}
