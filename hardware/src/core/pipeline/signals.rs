//! Pipeline control signals and operation types.
//!
//! This module defines the control signals that flow through the pipeline
//! alongside each instruction: the ALU operation, operand source selection,
//! memory access width and signedness, branch condition, and the register
//! write enable. A bubble carries the default (all-off) signals.

/// ALU operation types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluOp {
    /// Addition (also address generation and branch targets).
    #[default]
    Add,
    /// Subtraction.
    Sub,
    /// Shift left logical.
    Sll,
    /// Set less than (signed).
    Slt,
    /// Set less than (unsigned).
    Sltu,
    /// Bitwise XOR.
    Xor,
    /// Shift right logical.
    Srl,
    /// Shift right arithmetic.
    Sra,
    /// Bitwise OR.
    Or,
    /// Bitwise AND.
    And,
}

/// Memory access width for load and store operations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MemWidth {
    /// No memory operation.
    #[default]
    Nop,
    /// 8-bit byte access.
    Byte,
    /// 16-bit half-word access.
    Half,
    /// 32-bit word access.
    Word,
}

impl MemWidth {
    /// Number of bytes transferred by an access of this width.
    pub fn bytes(self) -> u32 {
        match self {
            MemWidth::Nop => 0,
            MemWidth::Byte => 1,
            MemWidth::Half => 2,
            MemWidth::Word => 4,
        }
    }

    /// Returns `true` if `addr` is naturally aligned for this width.
    pub fn is_aligned(self, addr: u32) -> bool {
        match self {
            MemWidth::Nop | MemWidth::Byte => true,
            MemWidth::Half => addr & 0x1 == 0,
            MemWidth::Word => addr & 0x3 == 0,
        }
    }

    /// Size encoding driven onto the data memory port.
    ///
    /// Bits 1:0 hold log2 of the access size in bytes; bit 2 is set for an
    /// unsigned (zero-extending) load. This matches the load/store funct3.
    pub fn size_encoding(self, unsigned: bool) -> u32 {
        let log2 = match self {
            MemWidth::Nop | MemWidth::Byte => 0,
            MemWidth::Half => 1,
            MemWidth::Word => 2,
        };
        if unsigned {
            log2 | 0b100
        } else {
            log2
        }
    }
}

/// Source for ALU operand A.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpASrc {
    /// Use the (forwarded) rs1 value.
    #[default]
    Reg1,
    /// Use the instruction's PC (AUIPC, JAL, branches).
    Pc,
    /// Use zero (LUI).
    Zero,
}

/// Source for ALU operand B.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpBSrc {
    /// Use the decoded immediate.
    #[default]
    Imm,
    /// Use the (forwarded) rs2 value.
    Reg2,
    /// Use the decoded shift amount (SLLI, SRLI, SRAI).
    Shamt,
}

/// Condition evaluated by the branch unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BranchCond {
    /// Not a conditional branch.
    #[default]
    Never,
    Eq,
    Ne,
    /// Signed less than.
    Lt,
    /// Signed greater or equal.
    Ge,
    /// Unsigned less than.
    Ltu,
    /// Unsigned greater or equal.
    Geu,
}

/// Control signals for pipeline stage execution.
///
/// Generated once in Decode and carried unchanged to Writeback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlSignals {
    /// Enable write to the destination register.
    pub reg_write: bool,
    /// Enable memory read (load).
    pub mem_read: bool,
    /// Enable memory write (store).
    pub mem_write: bool,
    /// Conditional branch; `cond` selects the comparison.
    pub branch: bool,
    /// Unconditional jump (JAL/JALR). The result is the link address.
    pub jump: bool,
    /// Condition for `branch`.
    pub cond: BranchCond,
    /// Width of a load/store.
    pub width: MemWidth,
    /// Load is sign-extended (vs zero-extended).
    pub signed_load: bool,
    /// ALU operation to perform.
    pub alu: AluOp,
    pub a_src: OpASrc,
    pub b_src: OpBSrc,
    /// Instruction reads rs1.
    pub uses_rs1: bool,
    /// Instruction reads rs2.
    pub uses_rs2: bool,
    /// ECALL/EBREAK: stop the simulation once this instruction retires.
    pub halt: bool,
}

impl ControlSignals {
    /// Returns `true` for instructions that redirect fetch when taken.
    pub fn is_control_transfer(&self) -> bool {
        self.branch || self.jump
    }
}
