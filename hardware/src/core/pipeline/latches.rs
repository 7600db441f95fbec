//! Pipeline latch structures for inter-stage communication.
//!
//! Each latch holds at most one instruction (single issue). An empty latch
//! is a bubble: it carries no control signals and therefore cannot write a
//! register or touch memory. Latches are written by exactly one stage at the
//! end of a cycle and consumed by the next stage during the following cycle.

use crate::common::{AccessType, Fault};
use crate::core::pipeline::signals::{ControlSignals, MemWidth};

/// Entry in the IF/ID pipeline latch (Fetch to Decode stage).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct IfIdEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction word read from instruction memory.
    pub inst: u32,
    /// Fault raised by the fetch, if any.
    pub fault: Option<Fault>,
}

/// Entry in the ID/EX pipeline latch (Decode to Execute stage).
///
/// Contains the decoded fields, the register values read from the register
/// file during Decode, and the control signals for downstream stages.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct IdExEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction word.
    pub inst: u32,
    /// Destination register index (rd).
    pub rd: usize,
    /// First source register index (rs1).
    pub rs1: usize,
    /// Second source register index (rs2).
    pub rs2: usize,
    pub funct3: u32,
    pub funct7: u32,
    /// Format-dependent extended immediate.
    pub imm: i32,
    /// Shift amount for immediate shifts.
    pub shamt: u32,
    /// Value read from rs1 in Decode.
    pub rv1: u32,
    /// Value read from rs2 in Decode.
    pub rv2: u32,
    /// Control signals for downstream pipeline stages.
    pub ctrl: ControlSignals,
    /// Fault raised by fetch or decode, if any.
    pub fault: Option<Fault>,
}

/// Entry in the EX/MEM pipeline latch (Execute to Memory stage).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct ExMemEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction word.
    pub inst: u32,
    /// Destination register index (rd).
    pub rd: usize,
    /// ALU result: the effective address for loads/stores, the link address
    /// for jumps, the computed value otherwise.
    pub alu: u32,
    /// Data to be stored (forwarded rs2).
    pub store_data: u32,
    /// Branch or jump resolved as taken.
    pub taken: bool,
    /// Redirect target when `taken`.
    pub target: u32,
    /// Control signals for downstream pipeline stages.
    pub ctrl: ControlSignals,
    /// Fault raised so far, if any.
    pub fault: Option<Fault>,
}

impl ExMemEntry {
    /// Builds the data-memory access descriptor for a load or store.
    ///
    /// Returns `None` for instructions that do not access memory and for
    /// faulted instructions.
    pub fn mem_access(&self) -> Option<MemAccess> {
        if self.fault.is_some() {
            return None;
        }
        let access = if self.ctrl.mem_write {
            AccessType::Write
        } else if self.ctrl.mem_read {
            AccessType::Read
        } else {
            return None;
        };
        Some(MemAccess {
            addr: self.alu,
            access,
            width: self.ctrl.width,
            size_encoding: self
                .ctrl
                .width
                .size_encoding(self.ctrl.mem_read && !self.ctrl.signed_load),
            data: self.store_data,
        })
    }
}

/// Descriptor of one data-memory access, valid for a single cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemAccess {
    pub addr: u32,
    /// `Read` for loads, `Write` for stores.
    pub access: AccessType,
    pub width: MemWidth,
    /// Encoded size driven onto the port (see [`MemWidth::size_encoding`]).
    pub size_encoding: u32,
    /// Data to store; ignored for loads.
    pub data: u32,
}

/// Entry in the MEM/WB pipeline latch (Memory to Writeback stage).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct MemWbEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction word.
    pub inst: u32,
    /// Destination register index (rd).
    pub rd: usize,
    /// ALU result (for non-load instructions).
    pub alu: u32,
    /// Data loaded from memory, already extended (for load instructions).
    pub load_data: u32,
    /// Control signals for the writeback stage.
    pub ctrl: ControlSignals,
    /// Fault raised so far, if any.
    pub fault: Option<Fault>,
}

impl MemWbEntry {
    /// The value this instruction writes back.
    pub fn result(&self) -> u32 {
        if self.ctrl.mem_read {
            self.load_data
        } else {
            self.alu
        }
    }
}

/// IF/ID pipeline latch (Fetch to Decode stage).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct IfId {
    pub entry: Option<IfIdEntry>,
}

/// ID/EX pipeline latch (Decode to Execute stage).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct IdEx {
    pub entry: Option<IdExEntry>,
}

/// EX/MEM pipeline latch (Execute to Memory stage).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct ExMem {
    pub entry: Option<ExMemEntry>,
}

/// MEM/WB pipeline latch (Memory to Writeback stage).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct MemWb {
    pub entry: Option<MemWbEntry>,
}

impl IfId {
    /// An empty latch.
    pub fn bubble() -> Self {
        Self { entry: None }
    }
}

impl IdEx {
    /// An empty latch.
    pub fn bubble() -> Self {
        Self { entry: None }
    }
}

impl ExMem {
    /// An empty latch.
    pub fn bubble() -> Self {
        Self { entry: None }
    }
}

impl MemWb {
    /// An empty latch.
    pub fn bubble() -> Self {
        Self { entry: None }
    }
}

/// Register-file write produced by Writeback.
///
/// Consumed once by the register file at the end of the cycle. The bundle
/// of the previous cycle is also kept as the oldest bypass source.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct WritebackBundle {
    /// Write enable.
    pub enable: bool,
    /// Destination register index.
    pub rd: usize,
    /// Data to write.
    pub data: u32,
}

impl WritebackBundle {
    /// Returns the value written to `reg`, if this bundle writes it.
    ///
    /// Writes to x0 never match, so x0 is never forwarded.
    pub fn writes(&self, reg: usize) -> Option<u32> {
        (self.enable && self.rd != 0 && self.rd == reg).then_some(self.data)
    }
}
