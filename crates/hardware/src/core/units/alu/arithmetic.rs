//! ALU arithmetic operations.
//!
//! Addition and subtraction wrap modulo 2^32; RV32I has no overflow traps.

use crate::core::pipeline::signals::AluOp;

/// Executes an integer arithmetic operation.
///
/// Returns `0` for non-arithmetic opcodes.
pub fn execute(op: AluOp, a: u32, b: u32) -> u32 {
    match op {
        AluOp::Add => a.wrapping_add(b),
        AluOp::Sub => a.wrapping_sub(b),
        _ => 0,
    }
}
