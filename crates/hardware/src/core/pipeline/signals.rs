//! Pipeline control signals and operation types.
//!
//! This module defines the signals that control instruction execution. It performs:
//! 1. **Operation Classification:** Categorizes ALU operations and branch conditions.
//! 2. **Operand Selection:** Defines sources for ALU inputs (registers, PC, or immediates).
//! 3. **Memory Control:** Specifies access widths and sign-extension requirements.
//! 4. **Control Flow:** Distinguishes sequential, branch, and jump instructions.

use std::fmt;

/// ALU operation types for RV32I integer instructions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluOp {
    /// Integer addition (also address generation and `lui`/`auipc`).
    #[default]
    Add,

    /// Integer subtraction.
    Sub,

    /// Shift left logical.
    Sll,

    /// Set less than (signed).
    Slt,

    /// Set less than unsigned.
    Sltu,

    /// Bitwise XOR.
    Xor,

    /// Shift right logical.
    Srl,

    /// Shift right arithmetic.
    Sra,

    /// Bitwise OR.
    Or,

    /// Bitwise AND.
    And,
}

/// Memory access width for load and store operations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MemWidth {
    /// 8-bit byte access.
    Byte,

    /// 16-bit half-word access.
    Half,

    /// 32-bit word access.
    #[default]
    Word,
}

impl MemWidth {
    /// Size of the access in bytes.
    pub const fn bytes(self) -> u32 {
        match self {
            Self::Byte => 1,
            Self::Half => 2,
            Self::Word => 4,
        }
    }

    /// Mask of the low address bits that must be clear for a naturally aligned access.
    pub const fn align_mask(self) -> u32 {
        self.bytes() - 1
    }
}

impl fmt::Display for MemWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Byte => f.write_str("byte"),
            Self::Half => f.write_str("half-word"),
            Self::Word => f.write_str("word"),
        }
    }
}

/// Source for ALU operand A.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpASrc {
    /// Use `rs1` register value.
    #[default]
    Reg1,

    /// Use program counter value.
    Pc,

    /// Use zero.
    Zero,
}

/// Source for ALU operand B.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpBSrc {
    /// Use sign-extended immediate value.
    #[default]
    Imm,

    /// Use `rs2` register value.
    Reg2,

    /// Use the instruction size (link value for jumps).
    InstSize,
}

/// Comparison performed by a conditional branch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BranchCond {
    /// Taken when `rs1 == rs2`.
    #[default]
    Eq,

    /// Taken when `rs1 != rs2`.
    Ne,

    /// Taken when `rs1 < rs2` (signed).
    Lt,

    /// Taken when `rs1 >= rs2` (signed).
    Ge,

    /// Taken when `rs1 < rs2` (unsigned).
    Ltu,

    /// Taken when `rs1 >= rs2` (unsigned).
    Geu,
}

/// How an instruction affects the next PC.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControlFlow {
    /// Sequential execution.
    #[default]
    None,

    /// Conditional branch to `pc + imm`.
    Branch(BranchCond),

    /// Unconditional jump to `pc + imm`.
    Jal,

    /// Unconditional jump to `(rs1 + imm) & !1`.
    Jalr,
}

/// Control signals for pipeline stage execution.
///
/// Contains all signals generated during instruction decode that control execution
/// and memory access in the Execute and Write-Back stages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlSignals {
    /// Enable write to the destination register.
    pub reg_write: bool,
    /// Enable memory read operation (load).
    pub mem_read: bool,
    /// Enable memory write operation (store).
    pub mem_write: bool,
    /// Width of memory access.
    pub width: MemWidth,
    /// Load should be sign-extended.
    pub signed_load: bool,
    /// ALU operation to perform.
    pub alu: AluOp,
    /// Source selection for ALU operand A.
    pub a_src: OpASrc,
    /// Source selection for ALU operand B.
    pub b_src: OpBSrc,
    /// Next-PC behaviour.
    pub control: ControlFlow,
    /// Instruction is `ecall` or `ebreak`.
    pub halt: bool,
    /// Encoding is not part of the executed instruction set.
    pub illegal: bool,
}
