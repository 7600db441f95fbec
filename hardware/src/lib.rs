//! RV32I Five-Stage Pipeline Simulator Library.
//!
//! This crate implements a cycle-accurate model of a classic in-order RISC-V
//! (RV32I) pipeline with a centralised hazard and forwarding unit.
//!
//! # Architecture
//!
//! * **Core**: 5-stage single-issue pipeline (Fetch, Decode, Execute, Memory, Writeback),
//!   double-buffered latches advanced in lockstep once per cycle.
//! * **Hazards**: bypassing from EX/MEM, MEM/WB and the previous writeback, a one-cycle
//!   load-use stall, and a two-instruction flush on taken branches and jumps.
//! * **Memory**: separate instruction and data memory ports, one access each per cycle.
//!
//! # Modules
//!
//! * `common`: Access types, instruction faults, and simulator errors.
//! * `config`: Configuration loading and parsing.
//! * `core`: CPU core implementation.
//! * `isa`: Instruction Set Architecture definitions.
//! * `sim`: Program loading and the sequential reference model.
//! * `soc`: Instruction and data memories.
//! * `stats`: Performance statistics collection.

/// Memory access types, instruction faults, and fatal simulator errors.
pub mod common;

/// Configuration system for memory and pipeline settings.
///
/// Loads and parses TOML configuration files; every field has a default.
pub mod config;

/// CPU core implementation including pipeline stages and execution units.
///
/// Implements the 5-stage in-order pipeline (Fetch, Decode, Execute, Memory, Writeback),
/// the hazard unit, and the register file.
pub mod core;

/// RV32I definitions: field extraction, encoders, and a disassembler.
pub mod isa;

/// Program loaders and the non-pipelined reference model.
pub mod sim;

/// Instruction and data memories behind the core's two ports.
pub mod soc;

/// Performance statistics collection and reporting.
///
/// Tracks cycle counts, retired instructions by class, stalls, flushes,
/// and forwarding activity.
pub mod stats;
