//! Load/Store Unit (LSU) Helpers.
//!
//! Sizes store data and sign- or zero-extends load data according to the
//! access width, for both the pipelined Memory stage and the sequential
//! reference model.

use crate::core::pipeline::signals::MemWidth;

/// Load/Store Unit helpers.
pub struct Lsu;

impl Lsu {
    /// Extends raw data returned by the data memory port.
    ///
    /// `raw` holds the accessed bytes in its low bits; the upper bits are
    /// ignored.
    pub fn extend_load(raw: u32, width: MemWidth, signed: bool) -> u32 {
        match (width, signed) {
            (MemWidth::Byte, true) => raw as u8 as i8 as i32 as u32,
            (MemWidth::Byte, false) => raw as u8 as u32,
            (MemWidth::Half, true) => raw as u16 as i16 as i32 as u32,
            (MemWidth::Half, false) => raw as u16 as u32,
            (MemWidth::Word, _) => raw,
            (MemWidth::Nop, _) => 0,
        }
    }

    /// Truncates a register value to the bytes written by a store.
    pub fn store_value(data: u32, width: MemWidth) -> u32 {
        match width {
            MemWidth::Byte => data & 0xff,
            MemWidth::Half => data & 0xffff,
            MemWidth::Word => data,
            MemWidth::Nop => 0,
        }
    }
}
