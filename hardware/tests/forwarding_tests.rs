//! Tests for the hazard unit: bypass selection, stalls, and flush control.

use pretty_assertions::assert_eq;
use rv_pipeline::core::pipeline::hazards::{
    self, Bypass, ForwardSource, HazardSignals, HazardUnit,
};
use rv_pipeline::core::pipeline::latches::*;
use rv_pipeline::core::pipeline::signals::*;
use rv_pipeline::isa::encode;

/// Creates an ID/EX entry for an instruction reading `rs1` and `rs2`.
fn create_id_ex_entry(rs1: usize, rs2: usize, rv1: u32, rv2: u32) -> IdEx {
    IdEx {
        entry: Some(IdExEntry {
            pc: 0x20,
            rd: 9,
            rs1,
            rs2,
            rv1,
            rv2,
            ctrl: ControlSignals {
                reg_write: true,
                uses_rs1: true,
                uses_rs2: true,
                b_src: OpBSrc::Reg2,
                ..Default::default()
            },
            ..Default::default()
        }),
    }
}

/// Creates an EX/MEM entry writing `alu` to `rd`.
fn create_ex_mem_entry(rd: usize, alu: u32, mem_read: bool) -> ExMem {
    ExMem {
        entry: Some(ExMemEntry {
            pc: 0x1c,
            rd,
            alu,
            ctrl: ControlSignals {
                reg_write: true,
                mem_read,
                ..Default::default()
            },
            ..Default::default()
        }),
    }
}

/// Creates a MEM/WB entry writing `alu` (or `load_data` for a load) to `rd`.
fn create_mem_wb_entry(rd: usize, alu: u32, load_data: u32, mem_read: bool) -> MemWb {
    MemWb {
        entry: Some(MemWbEntry {
            pc: 0x18,
            rd,
            alu,
            load_data,
            ctrl: ControlSignals {
                reg_write: true,
                mem_read,
                ..Default::default()
            },
            ..Default::default()
        }),
    }
}

fn if_id_of(inst: u32) -> IfId {
    IfId {
        entry: Some(IfIdEntry {
            pc: 0x24,
            inst,
            fault: None,
        }),
    }
}

fn writeback(rd: usize, data: u32) -> WritebackBundle {
    WritebackBundle {
        enable: true,
        rd,
        data,
    }
}

fn operands(id_ex: &IdEx, ex_mem: &ExMem, mem_wb: &MemWb, wb: &WritebackBundle) -> (u32, u32) {
    let unit = HazardUnit::new(true);
    let signals = unit.detect(&IfId::bubble(), id_ex, ex_mem, mem_wb, wb);
    hazards::forward_operands(id_ex, &signals.bypass, ex_mem, mem_wb, wb)
}

/// Tests that without producers in flight the register-file values are used.
#[test]
fn test_no_forwarding_needed() {
    let id_ex = create_id_ex_entry(1, 2, 100, 200);
    let ops = operands(
        &id_ex,
        &ExMem::bubble(),
        &MemWb::bubble(),
        &WritebackBundle::default(),
    );
    assert_eq!(ops, (100, 200));
}

/// Tests forwarding from EX/MEM (producer one instruction ahead).
#[test]
fn test_forward_from_ex_mem() {
    let id_ex = create_id_ex_entry(1, 2, 100, 200);
    let ex_mem = create_ex_mem_entry(1, 0xdead, false);
    let ops = operands(&id_ex, &ex_mem, &MemWb::bubble(), &WritebackBundle::default());
    assert_eq!(ops, (0xdead, 200));
}

/// Tests forwarding a loaded value from MEM/WB (producer two instructions ahead).
#[test]
fn test_forward_load_from_mem_wb() {
    let id_ex = create_id_ex_entry(1, 2, 100, 200);
    let mem_wb = create_mem_wb_entry(2, 0x1111, 0x2222, true);
    let ops = operands(&id_ex, &ExMem::bubble(), &mem_wb, &WritebackBundle::default());
    assert_eq!(ops, (100, 0x2222));
}

/// Tests forwarding from the previous cycle's writeback (producer three instructions ahead).
#[test]
fn test_forward_from_writeback() {
    let id_ex = create_id_ex_entry(1, 2, 100, 200);
    let ops = operands(
        &id_ex,
        &ExMem::bubble(),
        &MemWb::bubble(),
        &writeback(1, 0x3333),
    );
    assert_eq!(ops, (0x3333, 200));
}

/// Tests the most recent producer wins when several write the same register.
#[test]
fn test_forward_priority() {
    let id_ex = create_id_ex_entry(5, 5, 0, 0);
    let ex_mem = create_ex_mem_entry(5, 1, false);
    let mem_wb = create_mem_wb_entry(5, 2, 0, false);
    let wb = writeback(5, 3);

    assert_eq!(operands(&id_ex, &ex_mem, &mem_wb, &wb), (1, 1));
    assert_eq!(operands(&id_ex, &ExMem::bubble(), &mem_wb, &wb), (2, 2));
    assert_eq!(operands(&id_ex, &ExMem::bubble(), &MemWb::bubble(), &wb), (3, 3));
}

/// Tests a load in EX/MEM is never a bypass source; an older producer is used instead.
#[test]
fn test_no_forward_from_load_in_ex_mem() {
    let id_ex = create_id_ex_entry(4, 0, 7, 0);
    let ex_mem = create_ex_mem_entry(4, 0x100, true);
    let mem_wb = create_mem_wb_entry(4, 0x55, 0, false);

    let id = id_ex.entry.unwrap();
    let bypass = hazards::select_bypass(&id, &ex_mem, &mem_wb, &WritebackBundle::default());
    assert_eq!(bypass.rs1, ForwardSource::MemWb);
}

/// Tests register x0 is never forwarded, whatever the producers claim.
#[test]
fn test_no_forward_x0() {
    let id_ex = create_id_ex_entry(0, 0, 0, 0);
    let ex_mem = create_ex_mem_entry(0, 0xbad, false);
    let mem_wb = create_mem_wb_entry(0, 0xbad, 0xbad, true);
    let ops = operands(&id_ex, &ex_mem, &mem_wb, &writeback(0, 0xbad));
    assert_eq!(ops, (0, 0));
}

/// Tests operands an instruction does not read are never marked as forwarded.
#[test]
fn test_unused_operand_not_forwarded() {
    let mut id_ex = create_id_ex_entry(1, 2, 0, 0);
    if let Some(e) = id_ex.entry.as_mut() {
        e.ctrl.uses_rs2 = false;
    }
    let ex_mem = create_ex_mem_entry(2, 0x99, false);
    let id = id_ex.entry.unwrap();
    let bypass =
        hazards::select_bypass(&id, &ex_mem, &MemWb::bubble(), &WritebackBundle::default());
    assert_eq!(bypass, Bypass::default());
}

/// Tests a load followed by a dependent instruction stalls decode.
#[test]
fn test_load_use_stall() {
    let load = IdEx {
        entry: Some(IdExEntry {
            rd: 3,
            ctrl: ControlSignals {
                reg_write: true,
                mem_read: true,
                width: MemWidth::Word,
                ..Default::default()
            },
            ..Default::default()
        }),
    };

    assert!(hazards::need_stall_load_use(&load, &if_id_of(encode::add(4, 3, 3))));
    assert!(hazards::need_stall_load_use(&load, &if_id_of(encode::sw(3, 1, 0))));
    assert!(!hazards::need_stall_load_use(&load, &if_id_of(encode::add(4, 1, 2))));
    // lui has no source registers even though its bits overlap rs1.
    assert!(!hazards::need_stall_load_use(&load, &if_id_of(encode::lui(4, 3 << 3))));
    assert!(!hazards::need_stall_load_use(&load, &IfId::bubble()));
}

/// Tests a load into x0 never causes a stall.
#[test]
fn test_load_into_x0_does_not_stall() {
    let load = IdEx {
        entry: Some(IdExEntry {
            rd: 0,
            ctrl: ControlSignals {
                reg_write: true,
                mem_read: true,
                ..Default::default()
            },
            ..Default::default()
        }),
    };
    assert!(!hazards::need_stall_load_use(&load, &if_id_of(encode::add(4, 0, 0))));
}

/// Tests that with forwarding disabled any in-flight producer stalls decode.
#[test]
fn test_stall_without_forwarding() {
    let consumer = if_id_of(encode::add(4, 1, 2));
    let producer = create_id_ex_entry(0, 0, 0, 0); // writes x9
    let unrelated = create_ex_mem_entry(7, 0, false);

    assert!(!hazards::need_stall_no_forwarding(
        &consumer,
        &producer,
        &unrelated,
        &MemWb::bubble()
    ));
    assert!(hazards::need_stall_no_forwarding(
        &consumer,
        &IdEx::bubble(),
        &create_ex_mem_entry(2, 0, false),
        &MemWb::bubble()
    ));
    assert!(hazards::need_stall_no_forwarding(
        &consumer,
        &IdEx::bubble(),
        &ExMem::bubble(),
        &create_mem_wb_entry(1, 0, 0, false)
    ));

    let unit = HazardUnit::new(false);
    let signals = unit.detect(
        &if_id_of(encode::add(4, 9, 0)),
        &producer,
        &ExMem::bubble(),
        &MemWb::bubble(),
        &WritebackBundle::default(),
    );
    assert!(signals.stall_decode);
    assert_eq!(signals.bypass, Bypass::default());
}

/// Tests a taken branch in Execute flushes both younger instructions and redirects.
#[test]
fn test_taken_branch_flushes() {
    let unit = HazardUnit::new(true);
    let branch = ExMem {
        entry: Some(ExMemEntry {
            pc: 0x10,
            taken: true,
            target: 0x40,
            ctrl: ControlSignals {
                branch: true,
                ..Default::default()
            },
            ..Default::default()
        }),
    };

    let mut signals = HazardSignals {
        stall_decode: true,
        ..Default::default()
    };
    unit.resolve_control(&mut signals, &branch);

    assert!(signals.flush_fetch && signals.flush_decode);
    assert_eq!(signals.redirect, Some(0x40));
    assert!(!signals.stall_decode, "flush takes priority over stall");
    assert!(!signals.halt_fetch);
}

/// Tests a not-taken branch leaves the pipeline alone.
#[test]
fn test_not_taken_branch_no_flush() {
    let unit = HazardUnit::new(true);
    let branch = ExMem {
        entry: Some(ExMemEntry {
            pc: 0x10,
            taken: false,
            target: 0x40,
            ctrl: ControlSignals {
                branch: true,
                ..Default::default()
            },
            ..Default::default()
        }),
    };
    let mut signals = HazardSignals::default();
    unit.resolve_control(&mut signals, &branch);
    assert_eq!(signals, HazardSignals::default());
}

/// Tests a halting instruction in Execute flushes the younger instructions and stops fetch.
#[test]
fn test_halt_stops_fetch() {
    let unit = HazardUnit::new(true);
    let ecall = ExMem {
        entry: Some(ExMemEntry {
            pc: 0x30,
            ctrl: ControlSignals {
                halt: true,
                ..Default::default()
            },
            ..Default::default()
        }),
    };
    let mut signals = HazardSignals::default();
    unit.resolve_control(&mut signals, &ecall);
    assert!(signals.flush_fetch && signals.flush_decode && signals.halt_fetch);
    assert_eq!(signals.redirect, None);
}
