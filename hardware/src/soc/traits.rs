//! Memory Port Trait.
//!
//! This module defines the interface shared by the instruction and data
//! memories. A port only has to provide byte access within its address
//! range; sized, little-endian accesses and range checking are provided on
//! top of that, so accesses of any alignment are composed byte by byte.

use crate::common::{AccessType, Fault};
use crate::core::pipeline::signals::MemWidth;

/// Synchronous, address-indexed memory port.
pub trait MemoryPort {
    /// Returns the user-friendly name of the memory.
    ///
    /// Used for logging.
    fn name(&self) -> &str;

    /// Returns the address range (base address, size in bytes) of the memory.
    fn address_range(&self) -> (u32, u32);

    /// Reads the byte at `offset` from the base address.
    fn read_u8(&self, offset: u32) -> u8;

    /// Writes the byte at `offset` from the base address.
    fn write_u8(&mut self, offset: u32, val: u8);

    /// Returns `true` if all `len` bytes starting at `addr` are backed.
    fn contains(&self, addr: u32, len: u32) -> bool {
        let (base, size) = self.address_range();
        let start = addr as u64;
        let end = start + len as u64;
        start >= base as u64 && end <= base as u64 + size as u64
    }

    /// Performs a sized little-endian read.
    ///
    /// The returned value holds the accessed bytes in its low bits and is
    /// not extended.
    fn read(&self, addr: u32, width: MemWidth, access: AccessType) -> Result<u32, Fault> {
        let len = width.bytes();
        if !self.contains(addr, len) {
            return Err(Fault::access(access, addr));
        }
        let offset = addr - self.address_range().0;
        let mut val = 0u32;
        for i in 0..len {
            val |= (self.read_u8(offset + i) as u32) << (8 * i);
        }
        Ok(val)
    }

    /// Performs a sized little-endian write of the low bytes of `val`.
    fn write(
        &mut self,
        addr: u32,
        width: MemWidth,
        val: u32,
        access: AccessType,
    ) -> Result<(), Fault> {
        let len = width.bytes();
        if !self.contains(addr, len) {
            return Err(Fault::access(access, addr));
        }
        let offset = addr - self.address_range().0;
        for i in 0..len {
            self.write_u8(offset + i, (val >> (8 * i)) as u8);
        }
        Ok(())
    }

    /// Writes a slice of bytes starting at `addr`.
    ///
    /// Returns `false` (and writes nothing) if the slice does not fit.
    fn write_bytes(&mut self, addr: u32, data: &[u8]) -> bool {
        let Ok(len) = u32::try_from(data.len()) else {
            return false;
        };
        if !self.contains(addr, len) {
            return false;
        }
        let offset = addr - self.address_range().0;
        for (i, byte) in data.iter().enumerate() {
            self.write_u8(offset + i as u32, *byte);
        }
        true
    }
}
