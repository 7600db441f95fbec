//! RV32I disassembler.
//!
//! Renders an instruction word as assembly text for trace output and test
//! diagnostics. Unknown encodings render as `.word 0x...`.

use super::abi;
use super::instruction::Decoded;
use super::rv32i::{funct3, funct7, opcodes, EBREAK, ECALL, NOP};

/// Disassembles a single instruction word.
pub fn disassemble(inst: u32) -> String {
    if inst == NOP {
        return "nop".to_string();
    }
    if inst == ECALL {
        return "ecall".to_string();
    }
    if inst == EBREAK {
        return "ebreak".to_string();
    }

    let d = Decoded::new(inst);
    let rd = abi::name(d.rd);
    let rs1 = abi::name(d.rs1);
    let rs2 = abi::name(d.rs2);

    let mnemonic = match d.opcode {
        opcodes::OP_LUI => return format!("lui {}, {:#x}", rd, (d.imm as u32) >> 12),
        opcodes::OP_AUIPC => return format!("auipc {}, {:#x}", rd, (d.imm as u32) >> 12),
        opcodes::OP_JAL => return format!("jal {}, {}", rd, d.imm),
        opcodes::OP_JALR => return format!("jalr {}, {}({})", rd, d.imm, rs1),
        opcodes::OP_BRANCH => {
            let m = match d.funct3 {
                funct3::BEQ => "beq",
                funct3::BNE => "bne",
                funct3::BLT => "blt",
                funct3::BGE => "bge",
                funct3::BLTU => "bltu",
                funct3::BGEU => "bgeu",
                _ => return word(inst),
            };
            return format!("{} {}, {}, {}", m, rs1, rs2, d.imm);
        }
        opcodes::OP_LOAD => {
            let m = match d.funct3 {
                funct3::LB => "lb",
                funct3::LH => "lh",
                funct3::LW => "lw",
                funct3::LBU => "lbu",
                funct3::LHU => "lhu",
                _ => return word(inst),
            };
            return format!("{} {}, {}({})", m, rd, d.imm, rs1);
        }
        opcodes::OP_STORE => {
            let m = match d.funct3 {
                funct3::SB => "sb",
                funct3::SH => "sh",
                funct3::SW => "sw",
                _ => return word(inst),
            };
            return format!("{} {}, {}({})", m, rs2, d.imm, rs1);
        }
        opcodes::OP_IMM => {
            let m = match (d.funct3, d.funct7) {
                (funct3::ADD_SUB, _) => "addi",
                (funct3::SLT, _) => "slti",
                (funct3::SLTU, _) => "sltiu",
                (funct3::XOR, _) => "xori",
                (funct3::OR, _) => "ori",
                (funct3::AND, _) => "andi",
                (funct3::SLL, funct7::DEFAULT) => "slli",
                (funct3::SRL_SRA, funct7::DEFAULT) => "srli",
                (funct3::SRL_SRA, funct7::SRA) => "srai",
                _ => return word(inst),
            };
            if matches!(d.funct3, funct3::SLL | funct3::SRL_SRA) {
                return format!("{} {}, {}, {}", m, rd, rs1, d.shamt);
            }
            return format!("{} {}, {}, {}", m, rd, rs1, d.imm);
        }
        opcodes::OP_REG => match (d.funct3, d.funct7) {
            (funct3::ADD_SUB, funct7::DEFAULT) => "add",
            (funct3::ADD_SUB, funct7::SUB) => "sub",
            (funct3::SLL, funct7::DEFAULT) => "sll",
            (funct3::SLT, funct7::DEFAULT) => "slt",
            (funct3::SLTU, funct7::DEFAULT) => "sltu",
            (funct3::XOR, funct7::DEFAULT) => "xor",
            (funct3::SRL_SRA, funct7::DEFAULT) => "srl",
            (funct3::SRL_SRA, funct7::SRA) => "sra",
            (funct3::OR, funct7::DEFAULT) => "or",
            (funct3::AND, funct7::DEFAULT) => "and",
            _ => return word(inst),
        },
        opcodes::OP_MISC_MEM => return "fence".to_string(),
        _ => return word(inst),
    };

    format!("{} {}, {}, {}", mnemonic, rd, rs1, rs2)
}

fn word(inst: u32) -> String {
    format!(".word {:#010x}", inst)
}
