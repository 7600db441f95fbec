//! RV32I Pipeline Simulator CLI.
//!
//! Loads a configuration and a program image, runs the pipeline until the
//! program halts on ECALL/EBREAK, and reports statistics.
//!
//! # Usage
//!
//! ```text
//! rvpipe --config hardware/configs/default.toml --file prog.hex --format hex
//! ```

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rv_pipeline::common::SimError;
use rv_pipeline::config::Config;
use rv_pipeline::core::Cpu;
use rv_pipeline::sim::loader::{self, ProgramFormat};

/// Command-line arguments for the pipeline simulator.
#[derive(Parser, Debug)]
#[command(author, version, about = "RV32I Five-Stage Pipeline Simulator")]
struct Args {
    /// TOML configuration file; built-in defaults when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Program image to run.
    #[arg(short, long)]
    file: PathBuf,

    #[arg(long, value_enum, default_value_t = ProgramFormat::Bin)]
    format: ProgramFormat,

    /// Print statistics as JSON instead of text.
    #[arg(long)]
    stats_json: bool,

    /// Print the register file after the run.
    #[arg(long)]
    dump_regs: bool,
}

fn main() {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    };
    let config = config.unwrap_or_else(|e| fatal(&e));

    let default_filter = if config.general.trace_instructions {
        "info,pipeline=trace"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut cpu = loader::read_program(&args.file, args.format)
        .and_then(|image| loader::boot(&config, &image))
        .unwrap_or_else(|e| fatal(&e));

    let result = cpu.run();

    report(&cpu, &args);

    if let Err(e) = result {
        if !args.dump_regs {
            cpu.dump_state();
        }
        fatal(&e);
    }
}

fn fatal(e: &SimError) -> ! {
    eprintln!("\n[!] FATAL: {}", e);
    process::exit(1);
}

fn report(cpu: &Cpu, args: &Args) {
    if args.stats_json {
        match cpu.stats.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("[!] could not serialise statistics: {}", e),
        }
    } else {
        cpu.stats.print();
    }
    if args.dump_regs {
        cpu.dump_state();
    }
}
