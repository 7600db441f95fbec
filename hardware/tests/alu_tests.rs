//! Unit tests for the ALU and the branch resolution unit.

use rstest::rstest;
use rv_pipeline::core::pipeline::signals::{AluOp, BranchCond};
use rv_pipeline::core::units::alu::Alu;
use rv_pipeline::core::units::bru::Bru;

/// Tests every ALU operation on representative operands.
#[rstest]
#[case(AluOp::Add, 10, 20, 30)]
#[case(AluOp::Add, 0xffff_ffff, 1, 0)]
#[case(AluOp::Sub, 30, 10, 20)]
#[case(AluOp::Sub, 0, 1, 0xffff_ffff)]
#[case(AluOp::Sll, 1, 31, 0x8000_0000)]
#[case(AluOp::Srl, 0x8000_0000, 31, 1)]
#[case(AluOp::Sra, 0x8000_0000, 31, 0xffff_ffff)]
#[case(AluOp::Sra, 0x4000_0000, 30, 1)]
#[case(AluOp::Xor, 0b1100, 0b1010, 0b0110)]
#[case(AluOp::Or, 0b1100, 0b1010, 0b1110)]
#[case(AluOp::And, 0b1100, 0b1010, 0b1000)]
#[case(AluOp::Slt, (-1i32) as u32, 0, 1)]
#[case(AluOp::Slt, 0, (-1i32) as u32, 0)]
#[case(AluOp::Sltu, (-1i32) as u32, 0, 0)]
#[case(AluOp::Sltu, 0, (-1i32) as u32, 1)]
fn test_alu_ops(#[case] op: AluOp, #[case] a: u32, #[case] b: u32, #[case] expected: u32) {
    assert_eq!(Alu::execute(op, a, b), expected, "{op:?} {a:#x} {b:#x}");
}

/// Tests that shift amounts use only their low five bits.
#[test]
fn test_alu_shift_amount_masked() {
    assert_eq!(Alu::execute(AluOp::Sll, 1, 32), 1);
    assert_eq!(Alu::execute(AluOp::Sll, 1, 33), 2);
    assert_eq!(Alu::execute(AluOp::Srl, 0x80, 0xffff_ffe7), 1);
    assert_eq!(Alu::execute(AluOp::Sra, 0xffff_ff00, 0x28), 0xffff_ffff);
}

/// Tests signed overflow wraps instead of trapping.
#[test]
fn test_alu_overflow_wraps() {
    assert_eq!(Alu::execute(AluOp::Add, 0x7fff_ffff, 1), 0x8000_0000);
    assert_eq!(Alu::execute(AluOp::Sub, 0x8000_0000, 1), 0x7fff_ffff);
}

/// Tests branch condition evaluation, signed and unsigned.
#[rstest]
#[case(BranchCond::Eq, 5, 5, true)]
#[case(BranchCond::Eq, 5, 6, false)]
#[case(BranchCond::Ne, 5, 6, true)]
#[case(BranchCond::Lt, (-1i32) as u32, 1, true)]
#[case(BranchCond::Ltu, (-1i32) as u32, 1, false)]
#[case(BranchCond::Ge, 1, (-1i32) as u32, true)]
#[case(BranchCond::Geu, 1, (-1i32) as u32, false)]
#[case(BranchCond::Ge, 7, 7, true)]
#[case(BranchCond::Never, 0, 0, false)]
fn test_branch_conditions(
    #[case] cond: BranchCond,
    #[case] rs1: u32,
    #[case] rs2: u32,
    #[case] taken: bool,
) {
    assert_eq!(Bru::taken(cond, rs1, rs2), taken);
}

/// Tests redirect target computation, including JALR clearing bit 0.
#[test]
fn test_branch_targets() {
    assert_eq!(Bru::relative_target(0x100, -8), 0xf8);
    assert_eq!(Bru::relative_target(0x100, 0x20), 0x120);
    assert_eq!(Bru::indirect_target(0x201, 2), 0x202);
    assert_eq!(Bru::indirect_target(0x200, 1), 0x200);
}
