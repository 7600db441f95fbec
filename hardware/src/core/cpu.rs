//! Pipelined CPU.
//!
//! `Cpu` owns the register file, the memory ports, the four pipeline
//! latches, and the hazard unit. Each call to [`Cpu::tick`] advances the
//! whole pipeline by one clock cycle in lockstep: every stage reads the
//! latches as they were at the start of the cycle and produces its next
//! latch; the new latches, the register write, and the fetch PC are all
//! committed together at the end of the cycle.

use crate::common::SimError;
use crate::config::{Config, MisalignedPolicy};
use crate::core::arch::gpr::Gpr;
use crate::core::pipeline::hazards::{self, HazardUnit};
use crate::core::pipeline::latches::{ExMem, IdEx, IfId, MemWb, WritebackBundle};
use crate::core::pipeline::stages;
use crate::core::pipeline::traits::PipelineLatch;
use crate::isa::abi;
use crate::soc::System;
use crate::stats::SimStats;

/// Program counters of the instructions occupying each stage.
///
/// `None` marks a bubble (or, for `fetch`, a stopped fetch unit).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StagePcs {
    pub fetch: Option<u32>,
    pub decode: Option<u32>,
    pub execute: Option<u32>,
    pub memory: Option<u32>,
    pub writeback: Option<u32>,
}

impl StagePcs {
    /// The occupied stages, youngest first.
    pub fn occupied(&self) -> impl Iterator<Item = u32> {
        [
            self.fetch,
            self.decode,
            self.execute,
            self.memory,
            self.writeback,
        ]
        .into_iter()
        .flatten()
    }
}

/// Five-stage in-order RV32I pipeline.
pub struct Cpu {
    pub regs: Gpr,
    /// Fetch PC.
    pub pc: u32,
    pub trace: bool,
    pub bus: System,

    pub if_id: IfId,
    pub id_ex: IdEx,
    pub ex_mem: ExMem,
    pub mem_wb: MemWb,
    /// Register write committed at the end of the previous cycle.
    pub wb_latch: WritebackBundle,

    pub stats: SimStats,

    /// A halting instruction has retired.
    pub halted: bool,
    /// A halting instruction has left Execute; nothing more is fetched.
    pub fetch_halted: bool,

    hazard_unit: HazardUnit,
    misaligned: MisalignedPolicy,
    max_cycles: u64,
}

impl Cpu {
    pub fn new(system: System, config: &Config) -> Self {
        Self {
            regs: Gpr::new(),
            pc: config.general.start_pc,
            trace: config.general.trace_instructions || cfg!(feature = "always-trace"),
            bus: system,
            if_id: IfId::default(),
            id_ex: IdEx::default(),
            ex_mem: ExMem::default(),
            mem_wb: MemWb::default(),
            wb_latch: WritebackBundle::default(),
            stats: SimStats::default(),
            halted: false,
            fetch_halted: false,
            hazard_unit: HazardUnit::new(config.pipeline.forwarding),
            misaligned: config.pipeline.misaligned,
            max_cycles: config.general.max_cycles,
        }
    }

    /// Returns `true` once a halting instruction (ECALL/EBREAK) has retired.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Advances the pipeline by one clock cycle.
    ///
    /// # Returns
    ///
    /// `SimError::Fault` if the instruction reaching Writeback carries a
    /// fault. The cycle is then abandoned before any memory access, register
    /// write, or latch update takes effect.
    pub fn tick(&mut self) -> Result<(), SimError> {
        if self.halted {
            return Ok(());
        }

        let mut signals = self.hazard_unit.detect(
            &self.if_id,
            &self.id_ex,
            &self.ex_mem,
            &self.mem_wb,
            &self.wb_latch,
        );

        let wb = stages::wb_stage(&self.mem_wb, self.trace)?;

        let next_mem_wb =
            stages::mem_stage(&self.ex_mem, &mut self.bus, self.misaligned, self.trace);

        let operands = hazards::forward_operands(
            &self.id_ex,
            &signals.bypass,
            &self.ex_mem,
            &self.mem_wb,
            &self.wb_latch,
        );
        let next_ex_mem = stages::execute_stage(&self.id_ex, operands, self.trace);

        let mut next_id_ex = stages::decode_stage(&self.if_id, &self.regs, self.trace);

        let mut next_if_id = if self.fetch_halted {
            IfId::bubble()
        } else {
            stages::fetch_stage(self.pc, &self.bus, self.trace)
        };

        self.hazard_unit.resolve_control(&mut signals, &next_ex_mem);

        // Commit.
        self.stats.cycles += 1;

        if wb.enable {
            self.regs.write(wb.rd, wb.data);
        }
        self.wb_latch = wb;
        if let Some(retired) = self.mem_wb.entry.as_ref() {
            self.stats.record_retire(&retired.ctrl);
            if retired.ctrl.halt {
                self.halted = true;
                tracing::info!(
                    pc = retired.pc,
                    cycles = self.stats.cycles,
                    "halted on {}",
                    crate::isa::disasm::disassemble(retired.inst)
                );
            }
        }

        for source in signals.bypass.forwarded() {
            self.stats.record_forward(source);
        }
        if next_ex_mem.entry.is_some_and(|e| e.ctrl.branch && e.taken) {
            self.stats.branches_taken += 1;
        }

        if signals.flushing() {
            if signals.flush_decode && !next_id_ex.is_empty() {
                self.stats.flushed += 1;
            }
            if signals.flush_fetch && !next_if_id.is_empty() {
                self.stats.flushed += 1;
            }
            if signals.flush_decode {
                next_id_ex.flush();
            }
            if signals.flush_fetch {
                next_if_id.flush();
            }
            if signals.halt_fetch {
                self.fetch_halted = true;
                if let Some(pc) = next_ex_mem.entry.map(|e| e.pc) {
                    self.pc = pc.wrapping_add(4);
                }
            } else if let Some(target) = signals.redirect {
                self.pc = target;
            }
            self.if_id = next_if_id;
            self.id_ex = next_id_ex;
        } else if signals.stall_decode {
            self.stats.stalls_data += 1;
            self.id_ex = IdEx::bubble();
        } else {
            self.if_id = next_if_id;
            self.id_ex = next_id_ex;
            if !self.fetch_halted {
                self.pc = self.pc.wrapping_add(4);
            }
        }
        self.ex_mem = next_ex_mem;
        self.mem_wb = next_mem_wb;

        if self.trace {
            tracing::trace!(target: "pipeline", "{}", self.pipeline_diagram());
        }

        Ok(())
    }

    /// Runs until a halting instruction retires.
    ///
    /// # Returns
    ///
    /// `SimError::CycleLimit` if the configured cycle limit is reached first,
    /// or the first fault raised at Writeback.
    pub fn run(&mut self) -> Result<(), SimError> {
        while !self.halted {
            if self.stats.cycles >= self.max_cycles {
                return Err(SimError::CycleLimit(self.max_cycles));
            }
            self.tick()?;
        }
        Ok(())
    }

    /// Runs at most `n` cycles, stopping early on halt.
    pub fn run_cycles(&mut self, n: u64) -> Result<(), SimError> {
        for _ in 0..n {
            if self.halted {
                break;
            }
            self.tick()?;
        }
        Ok(())
    }

    /// Program counters of the instructions currently in each stage.
    pub fn stage_pcs(&self) -> StagePcs {
        StagePcs {
            fetch: (!self.fetch_halted && !self.halted).then_some(self.pc),
            decode: self.if_id.pc(),
            execute: self.id_ex.pc(),
            memory: self.ex_mem.pc(),
            writeback: self.mem_wb.pc(),
        }
    }

    /// Renders the stage occupancy as a single line.
    pub fn pipeline_diagram(&self) -> String {
        let slot = |pc: Option<u32>| match pc {
            Some(pc) => format!("{:08x}", pc),
            None => "--------".to_string(),
        };
        let pcs = self.stage_pcs();
        format!(
            "[{:>6}] IF {} | ID {} | EX {} | MEM {} | WB {}",
            self.stats.cycles,
            slot(pcs.fetch),
            slot(pcs.decode),
            slot(pcs.execute),
            slot(pcs.memory),
            slot(pcs.writeback)
        )
    }

    /// Prints the fetch PC and the register file.
    pub fn dump_state(&self) {
        println!("PC = {:#010x}", self.pc);
        self.regs.dump();
    }

    /// Returns the value of the register with ABI name `name`, if it exists.
    pub fn reg_by_name(&self, name: &str) -> Option<u32> {
        abi::index(name).map(|i| self.regs.read(i))
    }
}
