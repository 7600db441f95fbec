//! RV32I instruction encoders.
//!
//! Small assembler helpers that produce instruction words from register
//! indices and immediates. Used by the test suite and the demo programs;
//! immediates are truncated to their field widths without range checks.

use super::rv32i::{funct3, funct7, opcodes, EBREAK, ECALL, NOP};

fn reg(r: usize) -> u32 {
    (r as u32) & 0x1f
}

/// Encodes an R-type instruction.
pub fn r_type(opcode: u32, rd: usize, f3: u32, rs1: usize, rs2: usize, f7: u32) -> u32 {
    (f7 << 25) | (reg(rs2) << 20) | (reg(rs1) << 15) | (f3 << 12) | (reg(rd) << 7) | opcode
}

/// Encodes an I-type instruction.
pub fn i_type(opcode: u32, rd: usize, f3: u32, rs1: usize, imm: i32) -> u32 {
    (((imm as u32) & 0xfff) << 20) | (reg(rs1) << 15) | (f3 << 12) | (reg(rd) << 7) | opcode
}

/// Encodes an S-type instruction.
pub fn s_type(opcode: u32, f3: u32, rs1: usize, rs2: usize, imm: i32) -> u32 {
    let imm = imm as u32;
    (((imm >> 5) & 0x7f) << 25)
        | (reg(rs2) << 20)
        | (reg(rs1) << 15)
        | (f3 << 12)
        | ((imm & 0x1f) << 7)
        | opcode
}

/// Encodes a B-type instruction. `offset` is relative to the branch PC.
pub fn b_type(f3: u32, rs1: usize, rs2: usize, offset: i32) -> u32 {
    let imm = offset as u32;
    (((imm >> 12) & 0x1) << 31)
        | (((imm >> 5) & 0x3f) << 25)
        | (reg(rs2) << 20)
        | (reg(rs1) << 15)
        | (f3 << 12)
        | (((imm >> 1) & 0xf) << 8)
        | (((imm >> 11) & 0x1) << 7)
        | opcodes::OP_BRANCH
}

/// Encodes a U-type instruction. `imm20` is the value placed in bits 31:12.
pub fn u_type(opcode: u32, rd: usize, imm20: u32) -> u32 {
    ((imm20 & 0xf_ffff) << 12) | (reg(rd) << 7) | opcode
}

/// Encodes a J-type instruction. `offset` is relative to the jump PC.
pub fn j_type(rd: usize, offset: i32) -> u32 {
    let imm = offset as u32;
    (((imm >> 20) & 0x1) << 31)
        | (((imm >> 1) & 0x3ff) << 21)
        | (((imm >> 11) & 0x1) << 20)
        | (((imm >> 12) & 0xff) << 12)
        | (reg(rd) << 7)
        | opcodes::OP_JAL
}

pub fn add(rd: usize, rs1: usize, rs2: usize) -> u32 {
    r_type(opcodes::OP_REG, rd, funct3::ADD_SUB, rs1, rs2, funct7::DEFAULT)
}

pub fn sub(rd: usize, rs1: usize, rs2: usize) -> u32 {
    r_type(opcodes::OP_REG, rd, funct3::ADD_SUB, rs1, rs2, funct7::SUB)
}

pub fn sll(rd: usize, rs1: usize, rs2: usize) -> u32 {
    r_type(opcodes::OP_REG, rd, funct3::SLL, rs1, rs2, funct7::DEFAULT)
}

pub fn slt(rd: usize, rs1: usize, rs2: usize) -> u32 {
    r_type(opcodes::OP_REG, rd, funct3::SLT, rs1, rs2, funct7::DEFAULT)
}

pub fn sltu(rd: usize, rs1: usize, rs2: usize) -> u32 {
    r_type(opcodes::OP_REG, rd, funct3::SLTU, rs1, rs2, funct7::DEFAULT)
}

pub fn xor(rd: usize, rs1: usize, rs2: usize) -> u32 {
    r_type(opcodes::OP_REG, rd, funct3::XOR, rs1, rs2, funct7::DEFAULT)
}

pub fn srl(rd: usize, rs1: usize, rs2: usize) -> u32 {
    r_type(opcodes::OP_REG, rd, funct3::SRL_SRA, rs1, rs2, funct7::DEFAULT)
}

pub fn sra(rd: usize, rs1: usize, rs2: usize) -> u32 {
    r_type(opcodes::OP_REG, rd, funct3::SRL_SRA, rs1, rs2, funct7::SRA)
}

pub fn or(rd: usize, rs1: usize, rs2: usize) -> u32 {
    r_type(opcodes::OP_REG, rd, funct3::OR, rs1, rs2, funct7::DEFAULT)
}

pub fn and(rd: usize, rs1: usize, rs2: usize) -> u32 {
    r_type(opcodes::OP_REG, rd, funct3::AND, rs1, rs2, funct7::DEFAULT)
}

pub fn addi(rd: usize, rs1: usize, imm: i32) -> u32 {
    i_type(opcodes::OP_IMM, rd, funct3::ADD_SUB, rs1, imm)
}

pub fn slti(rd: usize, rs1: usize, imm: i32) -> u32 {
    i_type(opcodes::OP_IMM, rd, funct3::SLT, rs1, imm)
}

pub fn sltiu(rd: usize, rs1: usize, imm: i32) -> u32 {
    i_type(opcodes::OP_IMM, rd, funct3::SLTU, rs1, imm)
}

pub fn xori(rd: usize, rs1: usize, imm: i32) -> u32 {
    i_type(opcodes::OP_IMM, rd, funct3::XOR, rs1, imm)
}

pub fn ori(rd: usize, rs1: usize, imm: i32) -> u32 {
    i_type(opcodes::OP_IMM, rd, funct3::OR, rs1, imm)
}

pub fn andi(rd: usize, rs1: usize, imm: i32) -> u32 {
    i_type(opcodes::OP_IMM, rd, funct3::AND, rs1, imm)
}

pub fn slli(rd: usize, rs1: usize, shamt: u32) -> u32 {
    r_type(opcodes::OP_IMM, rd, funct3::SLL, rs1, (shamt & 0x1f) as usize, funct7::DEFAULT)
}

pub fn srli(rd: usize, rs1: usize, shamt: u32) -> u32 {
    r_type(opcodes::OP_IMM, rd, funct3::SRL_SRA, rs1, (shamt & 0x1f) as usize, funct7::DEFAULT)
}

pub fn srai(rd: usize, rs1: usize, shamt: u32) -> u32 {
    r_type(opcodes::OP_IMM, rd, funct3::SRL_SRA, rs1, (shamt & 0x1f) as usize, funct7::SRA)
}

pub fn lb(rd: usize, rs1: usize, imm: i32) -> u32 {
    i_type(opcodes::OP_LOAD, rd, funct3::LB, rs1, imm)
}

pub fn lh(rd: usize, rs1: usize, imm: i32) -> u32 {
    i_type(opcodes::OP_LOAD, rd, funct3::LH, rs1, imm)
}

pub fn lw(rd: usize, rs1: usize, imm: i32) -> u32 {
    i_type(opcodes::OP_LOAD, rd, funct3::LW, rs1, imm)
}

pub fn lbu(rd: usize, rs1: usize, imm: i32) -> u32 {
    i_type(opcodes::OP_LOAD, rd, funct3::LBU, rs1, imm)
}

pub fn lhu(rd: usize, rs1: usize, imm: i32) -> u32 {
    i_type(opcodes::OP_LOAD, rd, funct3::LHU, rs1, imm)
}

/// `sb rs2, imm(rs1)`
pub fn sb(rs2: usize, rs1: usize, imm: i32) -> u32 {
    s_type(opcodes::OP_STORE, funct3::SB, rs1, rs2, imm)
}

/// `sh rs2, imm(rs1)`
pub fn sh(rs2: usize, rs1: usize, imm: i32) -> u32 {
    s_type(opcodes::OP_STORE, funct3::SH, rs1, rs2, imm)
}

/// `sw rs2, imm(rs1)`
pub fn sw(rs2: usize, rs1: usize, imm: i32) -> u32 {
    s_type(opcodes::OP_STORE, funct3::SW, rs1, rs2, imm)
}

pub fn beq(rs1: usize, rs2: usize, offset: i32) -> u32 {
    b_type(funct3::BEQ, rs1, rs2, offset)
}

pub fn bne(rs1: usize, rs2: usize, offset: i32) -> u32 {
    b_type(funct3::BNE, rs1, rs2, offset)
}

pub fn blt(rs1: usize, rs2: usize, offset: i32) -> u32 {
    b_type(funct3::BLT, rs1, rs2, offset)
}

pub fn bge(rs1: usize, rs2: usize, offset: i32) -> u32 {
    b_type(funct3::BGE, rs1, rs2, offset)
}

pub fn bltu(rs1: usize, rs2: usize, offset: i32) -> u32 {
    b_type(funct3::BLTU, rs1, rs2, offset)
}

pub fn bgeu(rs1: usize, rs2: usize, offset: i32) -> u32 {
    b_type(funct3::BGEU, rs1, rs2, offset)
}

pub fn jal(rd: usize, offset: i32) -> u32 {
    j_type(rd, offset)
}

pub fn jalr(rd: usize, rs1: usize, imm: i32) -> u32 {
    i_type(opcodes::OP_JALR, rd, funct3::JALR, rs1, imm)
}

pub fn lui(rd: usize, imm20: u32) -> u32 {
    u_type(opcodes::OP_LUI, rd, imm20)
}

pub fn auipc(rd: usize, imm20: u32) -> u32 {
    u_type(opcodes::OP_AUIPC, rd, imm20)
}

pub fn fence() -> u32 {
    i_type(opcodes::OP_MISC_MEM, 0, funct3::FENCE, 0, 0x0ff)
}

pub fn nop() -> u32 {
    NOP
}

pub fn ecall() -> u32 {
    ECALL
}

pub fn ebreak() -> u32 {
    EBREAK
}

/// Loads an arbitrary 32-bit constant with `lui` + `addi`.
///
/// Always emits two instructions so program layout does not depend on the value.
pub fn li(rd: usize, value: u32) -> [u32; 2] {
    let lo = ((value & 0xfff) as i32) << 20 >> 20;
    let hi = value.wrapping_sub(lo as u32) >> 12;
    [lui(rd, hi), addi(rd, rd, lo)]
}
