//! Shared helpers for building and running test programs.

#![allow(dead_code)]

use rv_pipeline::common::SimError;
use rv_pipeline::config::Config;
use rv_pipeline::core::Cpu;
use rv_pipeline::sim::loader;
use rv_pipeline::sim::reference::ReferenceCpu;

/// Configuration used by most tests: defaults with a small cycle limit.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.general.max_cycles = 10_000;
    config
}

/// Boots a pipelined CPU with `prog` loaded at the start PC.
pub fn boot(prog: &[u32], config: &Config) -> Cpu {
    loader::boot(config, &loader::words_to_image(prog)).expect("program fits in memory")
}

/// Runs `prog` to completion on the pipeline and returns the CPU and the run result.
pub fn run_with(prog: &[u32], config: &Config) -> (Cpu, Result<(), SimError>) {
    let mut cpu = boot(prog, config);
    let result = cpu.run();
    (cpu, result)
}

/// Runs `prog` with the test configuration, which must halt cleanly.
pub fn run(prog: &[u32]) -> Cpu {
    let (cpu, result) = run_with(prog, &test_config());
    if let Err(e) = result {
        panic!("program did not halt cleanly: {e}");
    }
    cpu
}

/// Runs `prog` on the sequential reference model.
pub fn run_reference(prog: &[u32], config: &Config) -> (ReferenceCpu, Result<(), SimError>) {
    let image = loader::words_to_image(prog);
    let system = loader::build_system(config, &image).expect("program fits in memory");
    let mut model = ReferenceCpu::new(system, config);
    let result = model.run(config.general.max_cycles);
    (model, result)
}
