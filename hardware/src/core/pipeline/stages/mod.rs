//! Pipeline stage implementations.
//!
//! Contains the five stages of the instruction pipeline:
//! - Fetch: Retrieves instructions from instruction memory
//! - Decode: Decodes instructions and reads register values
//! - Execute: Performs ALU operations and branch resolution
//! - Memory: Handles load/store operations on data memory
//! - Writeback: Produces the register-file write and raises faults
//!
//! Every stage reads only its input latch (plus the state it owns a port
//! to) and returns its output latch; the CPU swaps all latches at the end
//! of the cycle.

/// Instruction decode stage implementation.
pub mod decode;

/// Instruction execute stage implementation.
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Memory access stage implementation.
pub mod memory;

/// Writeback stage implementation.
pub mod writeback;

pub use decode::decode_stage;
pub use execute::execute_stage;
pub use fetch::fetch_stage;
pub use memory::mem_stage;
pub use writeback::wb_stage;
