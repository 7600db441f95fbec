//! Fault and Error definitions.
//!
//! This module defines the two error layers of the simulator:
//! 1. **Faults:** Problems with a single instruction (illegal encoding, bad
//!    address). A fault travels down the pipeline attached to its
//!    instruction and is only raised when that instruction reaches
//!    Writeback, so instructions squashed on a wrong path never fault.
//! 2. **Simulator errors:** Fatal conditions returned from `Cpu::tick` and
//!    the loaders, such as a raised fault, a runaway program, or I/O failure.

use thiserror::Error;

use super::data::AccessType;

/// Instruction-level fault.
///
/// The associated value is the faulting address, or the instruction
/// encoding for `IllegalInstruction`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Fault {
    /// The instruction word does not decode to a supported RV32I instruction.
    #[error("illegal instruction {0:#010x}")]
    IllegalInstruction(u32),

    /// The fetch PC is not aligned to 4 bytes.
    #[error("instruction address misaligned: {0:#010x}")]
    InstructionAddressMisaligned(u32),

    /// The fetch PC lies outside instruction memory.
    #[error("instruction access fault: {0:#010x}")]
    InstructionAccessFault(u32),

    /// A load address is not naturally aligned and misaligned accesses are disabled.
    #[error("load address misaligned: {0:#010x}")]
    LoadAddressMisaligned(u32),

    /// A load touches bytes outside data memory.
    #[error("load access fault: {0:#010x}")]
    LoadAccessFault(u32),

    /// A store address is not naturally aligned and misaligned accesses are disabled.
    #[error("store address misaligned: {0:#010x}")]
    StoreAddressMisaligned(u32),

    /// A store touches bytes outside data memory.
    #[error("store access fault: {0:#010x}")]
    StoreAccessFault(u32),
}

impl Fault {
    /// Builds the access fault matching an access type.
    pub fn access(access: AccessType, addr: u32) -> Self {
        match access {
            AccessType::Fetch => Fault::InstructionAccessFault(addr),
            AccessType::Read => Fault::LoadAccessFault(addr),
            AccessType::Write => Fault::StoreAccessFault(addr),
        }
    }

    /// Builds the misaligned-address fault matching an access type.
    pub fn misaligned(access: AccessType, addr: u32) -> Self {
        match access {
            AccessType::Fetch => Fault::InstructionAddressMisaligned(addr),
            AccessType::Read => Fault::LoadAddressMisaligned(addr),
            AccessType::Write => Fault::StoreAddressMisaligned(addr),
        }
    }
}

/// Fatal simulator error.
#[derive(Debug, Error)]
pub enum SimError {
    /// An instruction carrying a fault reached Writeback.
    #[error("fault at pc {pc:#010x}: {fault}")]
    Fault {
        /// Address of the faulting instruction.
        pc: u32,
        /// The fault that was raised.
        fault: Fault,
    },

    /// The program did not halt within the configured number of cycles.
    #[error("cycle limit of {0} reached without halting")]
    CycleLimit(u64),

    /// The program image does not fit in instruction memory.
    #[error("program of {len} bytes does not fit in {capacity} bytes of memory")]
    ProgramTooLarge {
        /// Size of the program image in bytes.
        len: usize,
        /// Bytes available from the load address to the end of memory.
        capacity: usize,
    },

    /// A line of a hex program image is not a 32-bit hexadecimal word.
    #[error("invalid hex word on line {line}: {text:?}")]
    InvalidHex {
        /// One-based line number.
        line: usize,
        /// Offending line contents.
        text: String,
    },

    /// The configuration file could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// A file could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
