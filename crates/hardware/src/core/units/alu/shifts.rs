//! ALU shift operations.
//!
//! Shift amounts are taken from the low 5 bits of operand B.

use crate::core::pipeline::signals::AluOp;
use crate::isa::instruction::SHAMT_MASK;

/// Executes a shift operation.
///
/// Returns `0` for non-shift opcodes.
pub fn execute(op: AluOp, a: u32, b: u32) -> u32 {
    let shamt = b & SHAMT_MASK;
    match op {
        AluOp::Sll => a << shamt,
        AluOp::Srl => a >> shamt,
        AluOp::Sra => ((a as i32) >> shamt) as u32,
        _ => 0,
    }
}
