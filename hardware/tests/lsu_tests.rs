//! Tests for load/store sizing, the memory ports, and the Memory stage.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rv_pipeline::common::{AccessType, Fault};
use rv_pipeline::config::{Config, MisalignedPolicy};
use rv_pipeline::core::pipeline::latches::{ExMem, ExMemEntry};
use rv_pipeline::core::pipeline::signals::{ControlSignals, MemWidth};
use rv_pipeline::core::pipeline::stages::mem_stage;
use rv_pipeline::core::pipeline::traits::PipelineLatch;
use rv_pipeline::core::units::lsu::Lsu;
use rv_pipeline::soc::{Memory, MemoryPort, System};

/// Tests sign and zero extension of loaded data.
#[rstest]
#[case(0x80, MemWidth::Byte, true, 0xffff_ff80)]
#[case(0x80, MemWidth::Byte, false, 0x80)]
#[case(0x7f, MemWidth::Byte, true, 0x7f)]
#[case(0x8000, MemWidth::Half, true, 0xffff_8000)]
#[case(0x8000, MemWidth::Half, false, 0x8000)]
#[case(0xdead_beef, MemWidth::Word, true, 0xdead_beef)]
#[case(0xdead_beef, MemWidth::Word, false, 0xdead_beef)]
fn test_extend_load(
    #[case] raw: u32,
    #[case] width: MemWidth,
    #[case] signed: bool,
    #[case] expected: u32,
) {
    assert_eq!(Lsu::extend_load(raw, width, signed), expected);
}

/// Tests stores keep only the bytes they write.
#[test]
fn test_store_value_truncates() {
    assert_eq!(Lsu::store_value(0x1234_5678, MemWidth::Byte), 0x78);
    assert_eq!(Lsu::store_value(0x1234_5678, MemWidth::Half), 0x5678);
    assert_eq!(Lsu::store_value(0x1234_5678, MemWidth::Word), 0x1234_5678);
}

/// Tests the size encoding driven onto the data port matches the load/store funct3.
#[rstest]
#[case(MemWidth::Byte, false, 0b000)]
#[case(MemWidth::Half, false, 0b001)]
#[case(MemWidth::Word, false, 0b010)]
#[case(MemWidth::Byte, true, 0b100)]
#[case(MemWidth::Half, true, 0b101)]
fn test_size_encoding(#[case] width: MemWidth, #[case] unsigned: bool, #[case] expected: u32) {
    assert_eq!(width.size_encoding(unsigned), expected);
}

/// Tests natural alignment checks per width.
#[test]
fn test_alignment() {
    assert!(MemWidth::Byte.is_aligned(3));
    assert!(MemWidth::Half.is_aligned(2));
    assert!(!MemWidth::Half.is_aligned(3));
    assert!(MemWidth::Word.is_aligned(8));
    assert!(!MemWidth::Word.is_aligned(6));
}

/// Tests memory is little-endian and composes misaligned accesses byte by byte.
#[test]
fn test_memory_little_endian_and_misaligned() {
    let mut mem = Memory::new("dmem", 0x1000, 0x100);
    mem.write(0x1001, MemWidth::Word, 0x1122_3344, AccessType::Write)
        .unwrap();

    assert_eq!(&mem.as_bytes()[0..6], &[0x00u8, 0x44, 0x33, 0x22, 0x11, 0x00]);
    assert_eq!(
        mem.read(0x1001, MemWidth::Word, AccessType::Read),
        Ok(0x1122_3344)
    );
    assert_eq!(mem.read(0x1002, MemWidth::Half, AccessType::Read), Ok(0x2233));
}

/// Tests accesses outside the mapped range fault with the access kind.
#[test]
fn test_memory_out_of_range() {
    let mut mem = Memory::new("dmem", 0x1000, 0x100);
    assert_eq!(
        mem.read(0xfff, MemWidth::Byte, AccessType::Read),
        Err(Fault::LoadAccessFault(0xfff))
    );
    assert_eq!(
        mem.read(0x10fe, MemWidth::Word, AccessType::Read),
        Err(Fault::LoadAccessFault(0x10fe))
    );
    assert_eq!(
        mem.write(0x1100, MemWidth::Byte, 0, AccessType::Write),
        Err(Fault::StoreAccessFault(0x1100))
    );
    assert!(mem.contains(0x10fc, 4));
    assert!(!mem.contains(0xffff_fffe, 4));
}

/// Tests program images land in both memories and oversize images are rejected.
#[test]
fn test_system_load_binary() {
    let mut config = Config::default();
    config.memory.size = 0x20;
    let mut system = System::new(&config);

    system.load_binary_at(&[1, 2, 3, 4], 0x10).unwrap();
    assert_eq!(&system.imem.as_bytes()[0x10..0x14], &[1u8, 2, 3, 4]);
    assert_eq!(&system.dmem.as_bytes()[0x10..0x14], &[1u8, 2, 3, 4]);
    assert_eq!(system.fetch(0x10), Ok(0x0403_0201));

    assert!(system.load_binary_at(&[0; 0x14], 0x10).is_err());
}

/// Tests a fetch from an unaligned PC faults.
#[test]
fn test_fetch_misaligned() {
    let system = System::new(&Config::default());
    assert_eq!(
        system.fetch(0x2),
        Err(Fault::InstructionAddressMisaligned(0x2))
    );
}

fn store_entry(addr: u32, data: u32, width: MemWidth) -> ExMem {
    ExMem {
        entry: Some(ExMemEntry {
            pc: 0x40,
            alu: addr,
            store_data: data,
            ctrl: ControlSignals {
                mem_write: true,
                width,
                ..Default::default()
            },
            ..Default::default()
        }),
    }
}

fn load_entry(addr: u32, width: MemWidth, signed: bool) -> ExMem {
    ExMem {
        entry: Some(ExMemEntry {
            pc: 0x44,
            rd: 5,
            alu: addr,
            ctrl: ControlSignals {
                reg_write: true,
                mem_read: true,
                width,
                signed_load: signed,
                ..Default::default()
            },
            ..Default::default()
        }),
    }
}

/// Tests the Memory stage stores only the low bytes and extends loads.
#[test]
fn test_mem_stage_store_then_load() {
    let mut system = System::new(&Config::default());

    let out = mem_stage(
        &store_entry(0x100, 0xaabb_ccf0, MemWidth::Byte),
        &mut system,
        MisalignedPolicy::Permit,
        false,
    );
    assert_eq!(out.entry.unwrap().fault, None);
    assert_eq!(&system.dmem.as_bytes()[0x100..0x104], &[0xf0u8, 0, 0, 0]);

    let out = mem_stage(
        &load_entry(0x100, MemWidth::Byte, true),
        &mut system,
        MisalignedPolicy::Permit,
        false,
    );
    let wb = out.entry.unwrap();
    assert_eq!(wb.load_data, 0xffff_fff0);
    assert_eq!(wb.result(), 0xffff_fff0);
}

/// Tests the fault policy marks misaligned accesses and performs no access.
#[test]
fn test_mem_stage_misaligned_fault_policy() {
    let mut system = System::new(&Config::default());

    let out = mem_stage(
        &store_entry(0x102, 0xffff_ffff, MemWidth::Word),
        &mut system,
        MisalignedPolicy::Fault,
        false,
    );
    assert!(out.has_fault());
    assert_eq!(
        out.entry.unwrap().fault,
        Some(Fault::StoreAddressMisaligned(0x102))
    );
    assert!(system.dmem.as_bytes()[0x100..0x108].iter().all(|b| *b == 0));

    let out = mem_stage(
        &load_entry(0x101, MemWidth::Half, false),
        &mut system,
        MisalignedPolicy::Fault,
        false,
    );
    assert_eq!(
        out.entry.unwrap().fault,
        Some(Fault::LoadAddressMisaligned(0x101))
    );
}

/// Tests a bubble passes through the Memory stage as a bubble.
#[test]
fn test_mem_stage_bubble() {
    let mut system = System::new(&Config::default());
    let out = mem_stage(
        &ExMem::bubble(),
        &mut system,
        MisalignedPolicy::Permit,
        false,
    );
    assert!(out.entry.is_none());
}
