//! Simulation statistics collection and reporting.
//!
//! Tracks cycle and retirement counts, the instruction mix, and how often
//! the hazard unit stalled, flushed, or forwarded.

use std::time::Instant;

use serde::Serialize;

use crate::core::pipeline::hazards::ForwardSource;
use crate::core::pipeline::signals::ControlSignals;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug, Serialize)]
pub struct SimStats {
    #[serde(skip)]
    start_time: Instant,
    pub cycles: u64,
    pub instructions_retired: u64,

    pub inst_alu: u64,
    pub inst_load: u64,
    pub inst_store: u64,
    pub inst_branch: u64,
    pub inst_jump: u64,
    pub inst_system: u64,

    pub branches_taken: u64,

    /// Cycles Decode was held by a data hazard.
    pub stalls_data: u64,
    /// Instructions squashed by a redirect or halt.
    pub flushed: u64,

    pub forwards_ex_mem: u64,
    pub forwards_mem_wb: u64,
    pub forwards_writeback: u64,
}

impl Default for SimStats {
    /// Returns the default value.
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            inst_alu: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            inst_jump: 0,
            inst_system: 0,
            branches_taken: 0,
            stalls_data: 0,
            flushed: 0,
            forwards_ex_mem: 0,
            forwards_mem_wb: 0,
            forwards_writeback: 0,
        }
    }
}

impl SimStats {
    /// Counts one retired instruction in its class.
    pub fn record_retire(&mut self, ctrl: &ControlSignals) {
        self.instructions_retired += 1;
        if ctrl.mem_read {
            self.inst_load += 1;
        } else if ctrl.mem_write {
            self.inst_store += 1;
        } else if ctrl.branch {
            self.inst_branch += 1;
        } else if ctrl.jump {
            self.inst_jump += 1;
        } else if ctrl.halt {
            self.inst_system += 1;
        } else {
            self.inst_alu += 1;
        }
    }

    /// Counts one operand delivered by a bypass path.
    pub fn record_forward(&mut self, source: ForwardSource) {
        match source {
            ForwardSource::ExMem => self.forwards_ex_mem += 1,
            ForwardSource::MemWb => self.forwards_mem_wb += 1,
            ForwardSource::Writeback => self.forwards_writeback += 1,
            ForwardSource::RegFile => {}
        }
    }

    /// Cycles per retired instruction (0 before anything retires).
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }

    /// Renders the counters as a JSON document.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Prints a formatted summary of all simulation statistics.
    pub fn print(&self) {
        let seconds = self.start_time.elapsed().as_secs_f64();

        let cyc = self.cycles.max(1);
        let instr = self.instructions_retired.max(1);
        let ipc = self.instructions_retired as f64 / cyc as f64;
        let khz = if seconds > 0.0 {
            (self.cycles as f64 / seconds) / 1000.0
        } else {
            0.0
        };

        println!("\n==========================================================");
        println!("RV32I PIPELINE SIMULATION STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {:.4} s", seconds);
        println!("sim_cycles               {}", self.cycles);
        println!("sim_freq                 {:.2} kHz", khz);
        println!("sim_insts                {}", self.instructions_retired);
        println!("sim_ipc                  {:.4}", ipc);
        println!("sim_cpi                  {:.4}", self.cpi());
        println!("----------------------------------------------------------");
        println!("HAZARDS");
        println!(
            "  stalls.data            {} ({:.2}%)",
            self.stalls_data,
            (self.stalls_data as f64 / cyc as f64) * 100.0
        );
        println!("  flushed                {}", self.flushed);
        println!("  branches.taken         {}", self.branches_taken);
        println!("  forward.ex_mem         {}", self.forwards_ex_mem);
        println!("  forward.mem_wb         {}", self.forwards_mem_wb);
        println!("  forward.writeback      {}", self.forwards_writeback);
        println!("----------------------------------------------------------");
        println!("INSTRUCTION MIX");
        let total_inst = instr as f64;
        let mix = [
            ("op.alu", self.inst_alu),
            ("op.load", self.inst_load),
            ("op.store", self.inst_store),
            ("op.branch", self.inst_branch),
            ("op.jump", self.inst_jump),
            ("op.system", self.inst_system),
        ];
        for (name, count) in mix {
            println!(
                "  {:<22} {} ({:.2}%)",
                name,
                count,
                (count as f64 / total_inst) * 100.0
            );
        }
        println!("==========================================================");
    }
}
