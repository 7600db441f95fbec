//! Sequential Reference Model.
//!
//! Executes one instruction completely before starting the next, with no
//! pipeline, no latches, and no hazards. It shares the decoder and the
//! functional units with the pipelined core, so any difference between the
//! two is a pipelining error.

use crate::common::{AccessType, Fault, SimError};
use crate::config::{Config, MisalignedPolicy};
use crate::core::arch::gpr::Gpr;
use crate::core::pipeline::signals::{OpASrc, OpBSrc};
use crate::core::pipeline::stages::decode::control_signals;
use crate::core::units::alu::Alu;
use crate::core::units::bru::Bru;
use crate::core::units::lsu::Lsu;
use crate::isa::instruction::Decoded;
use crate::soc::{MemoryPort, System};

/// Non-pipelined RV32I interpreter.
pub struct ReferenceCpu {
    pub regs: Gpr,
    pub pc: u32,
    pub bus: System,
    pub halted: bool,
    pub retired: u64,
    misaligned: MisalignedPolicy,
}

impl ReferenceCpu {
    pub fn new(system: System, config: &Config) -> Self {
        Self {
            regs: Gpr::new(),
            pc: config.general.start_pc,
            bus: system,
            halted: false,
            retired: 0,
            misaligned: config.pipeline.misaligned,
        }
    }

    /// Executes one instruction.
    pub fn step(&mut self) -> Result<(), SimError> {
        if self.halted {
            return Ok(());
        }
        let pc = self.pc;
        let fault = |fault: Fault| SimError::Fault { pc, fault };

        let inst = self.bus.fetch(pc).map_err(fault)?;
        let d = Decoded::new(inst);
        let ctrl = control_signals(&d, inst).map_err(fault)?;
        let (rs1, rs2) = self.regs.read_pair(d.rs1, d.rs2);

        let op_a = match ctrl.a_src {
            OpASrc::Reg1 => rs1,
            OpASrc::Pc => pc,
            OpASrc::Zero => 0,
        };
        let op_b = match ctrl.b_src {
            OpBSrc::Reg2 => rs2,
            OpBSrc::Imm => d.imm as u32,
            OpBSrc::Shamt => d.shamt,
        };
        let alu = Alu::execute(ctrl.alu, op_a, op_b);

        let mut next_pc = pc.wrapping_add(4);
        let mut result = alu;

        if ctrl.jump {
            next_pc = match ctrl.a_src {
                OpASrc::Reg1 => Bru::indirect_target(rs1, d.imm),
                _ => Bru::relative_target(pc, d.imm),
            };
            result = pc.wrapping_add(4);
        } else if ctrl.branch && Bru::taken(ctrl.cond, rs1, rs2) {
            next_pc = alu;
        }

        if ctrl.mem_read || ctrl.mem_write {
            let access = if ctrl.mem_write {
                AccessType::Write
            } else {
                AccessType::Read
            };
            if self.misaligned == MisalignedPolicy::Fault && !ctrl.width.is_aligned(alu) {
                return Err(fault(Fault::misaligned(access, alu)));
            }
            if ctrl.mem_write {
                self.bus
                    .dmem
                    .write(alu, ctrl.width, Lsu::store_value(rs2, ctrl.width), access)
                    .map_err(fault)?;
            } else {
                let raw = self.bus.dmem.read(alu, ctrl.width, access).map_err(fault)?;
                result = Lsu::extend_load(raw, ctrl.width, ctrl.signed_load);
            }
        }

        if ctrl.reg_write {
            self.regs.write(d.rd, result);
        }
        if ctrl.halt {
            self.halted = true;
        }
        self.retired += 1;
        self.pc = next_pc;
        Ok(())
    }

    /// Runs until a halting instruction executes or `max_steps` elapse.
    pub fn run(&mut self, max_steps: u64) -> Result<(), SimError> {
        while !self.halted {
            if self.retired >= max_steps {
                return Err(SimError::CycleLimit(max_steps));
            }
            self.step()?;
        }
        Ok(())
    }
}
