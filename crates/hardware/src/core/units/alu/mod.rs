//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the RV32I integer ALU used in the Execute stage.
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub
//! - [`logic`]:      Or, And, Xor, Slt, Sltu
//! - [`shifts`]:     Sll, Srl, Sra

/// Integer arithmetic operations (add, subtract).
pub mod arithmetic;

/// Bitwise logical and comparison operations (or, and, xor, slt).
pub mod logic;

/// Shift operations (sll, srl, sra).
pub mod shifts;

use crate::core::pipeline::signals::AluOp;

/// Arithmetic Logic Unit (ALU) for integer operations.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// # Arguments
    ///
    /// * `op` - The ALU operation to perform
    /// * `a`  - First operand
    /// * `b`  - Second operand (also used as shift amount)
    ///
    /// # Examples
    ///
    /// ```
    /// use rvpipe_core::core::units::alu::Alu;
    /// use rvpipe_core::core::pipeline::signals::AluOp;
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 0xFFFF_FFFF, 1), 0);
    /// assert_eq!(Alu::execute(AluOp::Sll, 0x1, 4), 0x10);
    /// assert_eq!(Alu::execute(AluOp::Slt, -5_i32 as u32, 10), 1);
    /// assert_eq!(Alu::execute(AluOp::Sra, 0x8000_0000, 31), 0xFFFF_FFFF);
    /// ```
    pub fn execute(op: AluOp, a: u32, b: u32) -> u32 {
        match op {
            AluOp::Add | AluOp::Sub => arithmetic::execute(op, a, b),
            AluOp::Or | AluOp::And | AluOp::Xor | AluOp::Slt | AluOp::Sltu => {
                logic::execute(op, a, b)
            }
            AluOp::Sll | AluOp::Srl | AluOp::Sra => shifts::execute(op, a, b),
        }
    }
}
