//! Simulator configuration.
//!
//! Configuration is loaded from a TOML document. Every field has a default,
//! so an empty document (or `Config::default()`) describes a 1 MiB machine
//! starting at address zero with forwarding enabled.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::common::SimError;

const DEFAULT_START_PC: u32 = 0x0;
const DEFAULT_MEM_BASE: u32 = 0x0;
const DEFAULT_MEM_SIZE: u32 = 0x10_0000;
const DEFAULT_MAX_CYCLES: u64 = 1_000_000;

/// Top-level simulator configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub memory: MemoryConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Parses a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, SimError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml(&text)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    #[serde(default)]
    pub trace_instructions: bool,
    #[serde(default = "default_start_pc")]
    pub start_pc: u32,
    #[serde(default = "default_max_cycles")]
    pub max_cycles: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            start_pc: DEFAULT_START_PC,
            max_cycles: DEFAULT_MAX_CYCLES,
        }
    }
}

/// Geometry shared by the instruction and data memories.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MemoryConfig {
    #[serde(default = "default_mem_base")]
    pub base: u32,
    #[serde(default = "default_mem_size")]
    pub size: u32,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            base: DEFAULT_MEM_BASE,
            size: DEFAULT_MEM_SIZE,
        }
    }
}

/// Policy for data accesses that are not naturally aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MisalignedPolicy {
    /// Perform the access byte by byte.
    #[default]
    Permit,
    /// Attach a misaligned-address fault to the instruction.
    Fault,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    /// Resolve RAW hazards through the bypass network. When off, every
    /// RAW hazard stalls Decode until the producer has committed.
    #[serde(default = "default_forwarding")]
    pub forwarding: bool,
    #[serde(default)]
    pub misaligned: MisalignedPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            forwarding: true,
            misaligned: MisalignedPolicy::Permit,
        }
    }
}

fn default_start_pc() -> u32 {
    DEFAULT_START_PC
}

fn default_max_cycles() -> u64 {
    DEFAULT_MAX_CYCLES
}

fn default_mem_base() -> u32 {
    DEFAULT_MEM_BASE
}

fn default_mem_size() -> u32 {
    DEFAULT_MEM_SIZE
}

fn default_forwarding() -> bool {
    true
}
