//! Memory arrays.
//!
//! A flat, zero-initialised byte array mapped at a base address. The
//! simulator instantiates two of them: one behind the instruction port and
//! one behind the data port.

use super::traits::MemoryPort;

/// Flat byte-addressed memory.
#[derive(Clone, Debug)]
pub struct Memory {
    name: &'static str,
    base: u32,
    data: Vec<u8>,
}

impl Memory {
    /// Creates a zero-filled memory of `size` bytes mapped at `base`.
    pub fn new(name: &'static str, base: u32, size: u32) -> Self {
        Self {
            name,
            base,
            data: vec![0; size as usize],
        }
    }

    /// Size in bytes.
    pub fn size(&self) -> u32 {
        self.data.len() as u32
    }

    /// Lowest mapped address.
    pub fn base(&self) -> u32 {
        self.base
    }

    /// Raw contents, starting at the base address.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl MemoryPort for Memory {
    fn name(&self) -> &str {
        self.name
    }

    fn address_range(&self) -> (u32, u32) {
        (self.base, self.size())
    }

    fn read_u8(&self, offset: u32) -> u8 {
        self.data[offset as usize]
    }

    fn write_u8(&mut self, offset: u32, val: u8) {
        self.data[offset as usize] = val;
    }
}
