//! Memory system.
//!
//! The core sees two external memories through separate ports: an
//! instruction memory (read-only from the pipeline's point of view, one read
//! per cycle) and a data memory (one read or write per cycle). Both are
//! loaded with the program image at reset so data embedded in the image is
//! visible to loads.

/// Flat memory arrays.
pub mod memory;

/// Memory port interface.
pub mod traits;

pub use memory::Memory;
pub use traits::MemoryPort;

use crate::common::{AccessType, Fault, SimError};
use crate::config::Config;
use crate::core::pipeline::latches::MemAccess;
use crate::core::pipeline::signals::MemWidth;

/// The instruction and data memories attached to the core.
#[derive(Clone, Debug)]
pub struct System {
    /// Memory behind the instruction port.
    pub imem: Memory,
    /// Memory behind the data port.
    pub dmem: Memory,
}

impl System {
    /// Builds both memories from the memory configuration.
    pub fn new(config: &Config) -> Self {
        let base = config.memory.base;
        let size = config.memory.size;
        Self {
            imem: Memory::new("imem", base, size),
            dmem: Memory::new("dmem", base, size),
        }
    }

    /// Copies a program image into both memories at `addr`.
    pub fn load_binary_at(&mut self, image: &[u8], addr: u32) -> Result<(), SimError> {
        let (base, size) = self.imem.address_range();
        if !self.imem.write_bytes(addr, image) || !self.dmem.write_bytes(addr, image) {
            let capacity = (base as u64 + size as u64).saturating_sub(addr as u64) as usize;
            return Err(SimError::ProgramTooLarge {
                len: image.len(),
                capacity,
            });
        }
        tracing::info!(
            bytes = image.len(),
            "loaded program image at {:#010x}",
            addr
        );
        Ok(())
    }

    /// Instruction memory port: reads the word at `pc`.
    pub fn fetch(&self, pc: u32) -> Result<u32, Fault> {
        if pc & 0x3 != 0 {
            return Err(Fault::InstructionAddressMisaligned(pc));
        }
        self.imem.read(pc, MemWidth::Word, AccessType::Fetch)
    }

    /// Data memory port: performs one access.
    ///
    /// Returns the raw (unextended) read data for loads and zero for stores.
    pub fn data_access(&mut self, req: &MemAccess) -> Result<u32, Fault> {
        match req.access {
            AccessType::Write => {
                self.dmem.write(req.addr, req.width, req.data, AccessType::Write)?;
                Ok(0)
            }
            access => self.dmem.read(req.addr, req.width, access),
        }
    }
}
