//! Instruction field extraction.
//!
//! Splits a 32-bit instruction word into the fields the pipeline carries:
//! opcode, register indices, function codes, the format-dependent immediate,
//! and the shift amount. Fields that do not apply to an opcode are still
//! extracted from their fixed bit positions and must not be relied upon.

use super::rv32i::opcodes;

const OPCODE_MASK: u32 = 0x7f;
const REG_MASK: u32 = 0x1f;
const FUNCT3_MASK: u32 = 0x7;
const FUNCT7_MASK: u32 = 0x7f;

const RD_SHIFT: u32 = 7;
const FUNCT3_SHIFT: u32 = 12;
const RS1_SHIFT: u32 = 15;
const RS2_SHIFT: u32 = 20;
const FUNCT7_SHIFT: u32 = 25;

/// Extracts the opcode field (bits 6:0).
pub fn opcode(inst: u32) -> u32 {
    inst & OPCODE_MASK
}

/// Extracts the destination register index (bits 11:7).
pub fn rd(inst: u32) -> usize {
    ((inst >> RD_SHIFT) & REG_MASK) as usize
}

/// Extracts the first source register index (bits 19:15).
pub fn rs1(inst: u32) -> usize {
    ((inst >> RS1_SHIFT) & REG_MASK) as usize
}

/// Extracts the second source register index (bits 24:20).
pub fn rs2(inst: u32) -> usize {
    ((inst >> RS2_SHIFT) & REG_MASK) as usize
}

/// Extracts funct3 (bits 14:12).
pub fn funct3(inst: u32) -> u32 {
    (inst >> FUNCT3_SHIFT) & FUNCT3_MASK
}

/// Extracts funct7 (bits 31:25).
pub fn funct7(inst: u32) -> u32 {
    (inst >> FUNCT7_SHIFT) & FUNCT7_MASK
}

/// I-type immediate: inst[31:20], sign-extended.
pub fn imm_i(inst: u32) -> i32 {
    (inst as i32) >> 20
}

/// S-type immediate: inst[31:25] | inst[11:7], sign-extended.
pub fn imm_s(inst: u32) -> i32 {
    (((inst & 0xfe00_0000) as i32) >> 20) | ((inst >> 7) & 0x1f) as i32
}

/// B-type immediate: a signed multiple of two in [-4096, 4094].
pub fn imm_b(inst: u32) -> i32 {
    (((inst & 0x8000_0000) as i32) >> 19)
        | (((inst >> 7) & 0x1) << 11) as i32
        | (((inst >> 25) & 0x3f) << 5) as i32
        | (((inst >> 8) & 0xf) << 1) as i32
}

/// U-type immediate: inst[31:12] in the upper bits.
pub fn imm_u(inst: u32) -> i32 {
    (inst & 0xffff_f000) as i32
}

/// J-type immediate: a signed multiple of two in [-1 MiB, 1 MiB).
pub fn imm_j(inst: u32) -> i32 {
    (((inst & 0x8000_0000) as i32) >> 11)
        | (inst & 0x000f_f000) as i32
        | (((inst >> 20) & 0x1) << 11) as i32
        | (((inst >> 21) & 0x3ff) << 1) as i32
}

/// Fully extracted instruction fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Decoded {
    pub opcode: u32,
    pub rd: usize,
    pub rs1: usize,
    pub rs2: usize,
    pub funct3: u32,
    pub funct7: u32,
    /// Immediate chosen by the opcode's format; zero for R-type.
    pub imm: i32,
    /// Shift amount for immediate shifts (bits 24:20).
    pub shamt: u32,
}

impl Decoded {
    /// Splits an instruction word into its fields.
    pub fn new(inst: u32) -> Self {
        let op = opcode(inst);
        let imm = match op {
            opcodes::OP_LOAD
            | opcodes::OP_IMM
            | opcodes::OP_JALR
            | opcodes::OP_MISC_MEM
            | opcodes::OP_SYSTEM => imm_i(inst),
            opcodes::OP_STORE => imm_s(inst),
            opcodes::OP_BRANCH => imm_b(inst),
            opcodes::OP_LUI | opcodes::OP_AUIPC => imm_u(inst),
            opcodes::OP_JAL => imm_j(inst),
            _ => 0,
        };
        Self {
            opcode: op,
            rd: rd(inst),
            rs1: rs1(inst),
            rs2: rs2(inst),
            funct3: funct3(inst),
            funct7: funct7(inst),
            imm,
            shamt: rs2(inst) as u32,
        }
    }
}
