//! Program Loader.
//!
//! Reads program images from disk, either as a flat little-endian binary
//! or as text with one 32-bit hexadecimal word per line, and builds a CPU
//! with the image loaded at the configured start PC.

use std::fs;
use std::path::Path;

use crate::common::SimError;
use crate::config::Config;
use crate::core::Cpu;
use crate::soc::System;

/// On-disk format of a program image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ProgramFormat {
    /// Flat little-endian binary.
    #[default]
    Bin,
    /// One hexadecimal instruction word per line.
    Hex,
}

/// Loads a binary file from disk.
pub fn load_binary(path: impl AsRef<Path>) -> Result<Vec<u8>, SimError> {
    Ok(fs::read(path)?)
}

/// Parses a hex program image.
///
/// Each non-blank line holds one 32-bit word, with or without a `0x`
/// prefix. Text after `#` or `//` is ignored.
pub fn parse_hex(text: &str) -> Result<Vec<u8>, SimError> {
    let mut words = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let line = raw
            .split('#')
            .next()
            .and_then(|l| l.split("//").next())
            .unwrap_or_default()
            .trim();
        if line.is_empty() {
            continue;
        }
        let digits = line
            .strip_prefix("0x")
            .or_else(|| line.strip_prefix("0X"))
            .unwrap_or(line)
            .replace('_', "");
        let word = u32::from_str_radix(&digits, 16).map_err(|_| SimError::InvalidHex {
            line: i + 1,
            text: raw.to_string(),
        })?;
        words.push(word);
    }
    Ok(words_to_image(&words))
}

/// Reads a program image in the given format.
pub fn read_program(path: impl AsRef<Path>, format: ProgramFormat) -> Result<Vec<u8>, SimError> {
    match format {
        ProgramFormat::Bin => load_binary(path),
        ProgramFormat::Hex => parse_hex(&fs::read_to_string(path)?),
    }
}

/// Serialises instruction words as a little-endian image.
pub fn words_to_image(words: &[u32]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_le_bytes()).collect()
}

/// Builds the memory system with `image` loaded at the start PC.
pub fn build_system(config: &Config, image: &[u8]) -> Result<System, SimError> {
    let mut system = System::new(config);
    system.load_binary_at(image, config.general.start_pc)?;
    Ok(system)
}

/// Builds a CPU ready to run `image`.
pub fn boot(config: &Config, image: &[u8]) -> Result<Cpu, SimError> {
    let system = build_system(config, image)?;
    Ok(Cpu::new(system, config))
}
