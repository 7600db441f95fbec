//! RISC-V integer register ABI names.

pub const REG_ZERO: usize = 0;
pub const REG_RA: usize = 1;
pub const REG_SP: usize = 2;
pub const REG_GP: usize = 3;
pub const REG_TP: usize = 4;
pub const REG_A0: usize = 10;
pub const REG_A1: usize = 11;
pub const REG_A7: usize = 17;

/// Number of architectural integer registers.
pub const NUM_REGS: usize = 32;

const NAMES: [&str; NUM_REGS] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1", "a2", "a3", "a4",
    "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11", "t3", "t4",
    "t5", "t6",
];

/// Returns the ABI name of an integer register (`"?"` when out of range).
pub fn name(idx: usize) -> &'static str {
    NAMES.get(idx).copied().unwrap_or("?")
}

/// Looks up a register by ABI name (`"a0"`) or numeric name (`"x10"`).
pub fn index(name: &str) -> Option<usize> {
    if let Some(n) = name.strip_prefix('x').and_then(|n| n.parse::<usize>().ok()) {
        return (n < NUM_REGS).then_some(n);
    }
    if name == "fp" {
        return Some(8);
    }
    NAMES.iter().position(|&n| n == name)
}
