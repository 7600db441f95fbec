//! Instruction Decode (ID) Stage.
//!
//! Splits the fetched word into its fields, generates the control signals,
//! and reads both source operands from the register file. The register file
//! is read before this cycle's writeback commits; the hazard unit covers the
//! gap with its oldest bypass source.

use crate::common::Fault;
use crate::core::arch::gpr::Gpr;
use crate::core::pipeline::latches::{IdEx, IdExEntry, IfId};
use crate::core::pipeline::signals::{
    AluOp, BranchCond, ControlSignals, MemWidth, OpASrc, OpBSrc,
};
use crate::isa::instruction::Decoded;
use crate::isa::rv32i::{funct3, funct7, opcodes, EBREAK, ECALL};

/// Executes the Decode stage.
///
/// A bubble in IF/ID produces a bubble in ID/EX. An instruction that
/// already carries a fetch fault, or fails to decode, is passed on with
/// all control signals off and the fault attached.
pub fn decode_stage(if_id: &IfId, regs: &Gpr, trace: bool) -> IdEx {
    let Some(if_entry) = if_id.entry else {
        return IdEx::bubble();
    };

    let d = Decoded::new(if_entry.inst);
    let (ctrl, fault) = match if_entry.fault {
        Some(f) => (ControlSignals::default(), Some(f)),
        None => match control_signals(&d, if_entry.inst) {
            Ok(c) => (c, None),
            Err(f) => (ControlSignals::default(), Some(f)),
        },
    };

    let (rv1, rv2) = regs.read_pair(d.rs1, d.rs2);

    if trace {
        tracing::trace!(
            target: "pipeline",
            "ID  pc={:#010x} rd=x{} rs1=x{}({:#x}) rs2=x{}({:#x}) imm={}",
            if_entry.pc,
            d.rd,
            d.rs1,
            rv1,
            d.rs2,
            rv2,
            d.imm
        );
    }

    IdEx {
        entry: Some(IdExEntry {
            pc: if_entry.pc,
            inst: if_entry.inst,
            rd: d.rd,
            rs1: d.rs1,
            rs2: d.rs2,
            funct3: d.funct3,
            funct7: d.funct7,
            imm: d.imm,
            shamt: d.shamt,
            rv1,
            rv2,
            ctrl,
            fault,
        }),
    }
}

/// Generates the control signals for a decoded instruction.
///
/// # Returns
///
/// The control signals, or `Fault::IllegalInstruction` for encodings
/// outside RV32I.
pub fn control_signals(d: &Decoded, inst: u32) -> Result<ControlSignals, Fault> {
    let illegal = || Fault::IllegalInstruction(inst);
    let mut c = ControlSignals {
        a_src: OpASrc::Reg1,
        b_src: OpBSrc::Imm,
        alu: AluOp::Add,
        ..Default::default()
    };

    match d.opcode {
        opcodes::OP_LUI => {
            c.reg_write = true;
            c.a_src = OpASrc::Zero;
        }
        opcodes::OP_AUIPC => {
            c.reg_write = true;
            c.a_src = OpASrc::Pc;
        }
        opcodes::OP_JAL => {
            c.reg_write = true;
            c.jump = true;
            c.a_src = OpASrc::Pc;
        }
        opcodes::OP_JALR => {
            if d.funct3 != funct3::JALR {
                return Err(illegal());
            }
            c.reg_write = true;
            c.jump = true;
            c.uses_rs1 = true;
        }
        opcodes::OP_BRANCH => {
            c.branch = true;
            c.a_src = OpASrc::Pc;
            c.uses_rs1 = true;
            c.uses_rs2 = true;
            c.cond = match d.funct3 {
                funct3::BEQ => BranchCond::Eq,
                funct3::BNE => BranchCond::Ne,
                funct3::BLT => BranchCond::Lt,
                funct3::BGE => BranchCond::Ge,
                funct3::BLTU => BranchCond::Ltu,
                funct3::BGEU => BranchCond::Geu,
                _ => return Err(illegal()),
            };
        }
        opcodes::OP_LOAD => {
            c.reg_write = true;
            c.mem_read = true;
            c.uses_rs1 = true;
            let (w, s) = match d.funct3 {
                funct3::LB => (MemWidth::Byte, true),
                funct3::LH => (MemWidth::Half, true),
                funct3::LW => (MemWidth::Word, true),
                funct3::LBU => (MemWidth::Byte, false),
                funct3::LHU => (MemWidth::Half, false),
                _ => return Err(illegal()),
            };
            c.width = w;
            c.signed_load = s;
        }
        opcodes::OP_STORE => {
            c.mem_write = true;
            c.uses_rs1 = true;
            c.uses_rs2 = true;
            c.width = match d.funct3 {
                funct3::SB => MemWidth::Byte,
                funct3::SH => MemWidth::Half,
                funct3::SW => MemWidth::Word,
                _ => return Err(illegal()),
            };
        }
        opcodes::OP_IMM => {
            c.reg_write = true;
            c.uses_rs1 = true;
            c.alu = match (d.funct3, d.funct7) {
                (funct3::ADD_SUB, _) => AluOp::Add,
                (funct3::SLT, _) => AluOp::Slt,
                (funct3::SLTU, _) => AluOp::Sltu,
                (funct3::XOR, _) => AluOp::Xor,
                (funct3::OR, _) => AluOp::Or,
                (funct3::AND, _) => AluOp::And,
                (funct3::SLL, funct7::DEFAULT) => AluOp::Sll,
                (funct3::SRL_SRA, funct7::DEFAULT) => AluOp::Srl,
                (funct3::SRL_SRA, funct7::SRA) => AluOp::Sra,
                _ => return Err(illegal()),
            };
            if matches!(c.alu, AluOp::Sll | AluOp::Srl | AluOp::Sra) {
                c.b_src = OpBSrc::Shamt;
            }
        }
        opcodes::OP_REG => {
            c.reg_write = true;
            c.uses_rs1 = true;
            c.uses_rs2 = true;
            c.b_src = OpBSrc::Reg2;
            c.alu = match (d.funct3, d.funct7) {
                (funct3::ADD_SUB, funct7::DEFAULT) => AluOp::Add,
                (funct3::ADD_SUB, funct7::SUB) => AluOp::Sub,
                (funct3::SLL, funct7::DEFAULT) => AluOp::Sll,
                (funct3::SLT, funct7::DEFAULT) => AluOp::Slt,
                (funct3::SLTU, funct7::DEFAULT) => AluOp::Sltu,
                (funct3::XOR, funct7::DEFAULT) => AluOp::Xor,
                (funct3::SRL_SRA, funct7::DEFAULT) => AluOp::Srl,
                (funct3::SRL_SRA, funct7::SRA) => AluOp::Sra,
                (funct3::OR, funct7::DEFAULT) => AluOp::Or,
                (funct3::AND, funct7::DEFAULT) => AluOp::And,
                _ => return Err(illegal()),
            };
        }
        // Memory ordering is trivially sequential on this core.
        opcodes::OP_MISC_MEM if d.funct3 == funct3::FENCE => {}
        opcodes::OP_SYSTEM if inst == ECALL || inst == EBREAK => {
            c.halt = true;
        }
        _ => return Err(illegal()),
    }

    Ok(c)
}
