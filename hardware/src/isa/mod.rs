//! RV32I Instruction Set Architecture definitions.
//!
//! Opcode and function-code constants, ABI register names, instruction
//! field extraction, encoders for building programs, and a disassembler
//! used by pipeline tracing.

/// ABI register indices and names.
pub mod abi;

/// Instruction disassembler for trace output.
pub mod disasm;

/// Instruction encoders.
pub mod encode;

/// Instruction field extraction and immediate decoding.
pub mod instruction;

/// RV32I opcode and function-code constants.
pub mod rv32i;

pub use instruction::Decoded;
