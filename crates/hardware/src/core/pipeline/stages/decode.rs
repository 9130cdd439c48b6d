//! Instruction Decode.
//!
//! Decode and Execute share one pipeline stage. This module performs the decode
//! half: it converts the decoded instruction fields into the control signals that
//! steer operand selection, the ALU, the branch unit, and the load/store path.
//! Encodings outside RV32I, and the CSR instructions, become no-ops flagged as
//! illegal.

use crate::core::pipeline::signals::{
    AluOp, BranchCond, ControlFlow, ControlSignals, MemWidth, OpASrc, OpBSrc,
};
use crate::isa::instruction::Decoded;
use crate::isa::privileged::opcodes as sys_ops;
use crate::isa::rv32i::{funct3, funct7, opcodes};

/// Control signals for an encoding the core does not execute.
const ILLEGAL: ControlSignals = ControlSignals {
    reg_write: false,
    mem_read: false,
    mem_write: false,
    width: MemWidth::Word,
    signed_load: false,
    alu: AluOp::Add,
    a_src: OpASrc::Reg1,
    b_src: OpBSrc::Imm,
    control: ControlFlow::None,
    halt: false,
    illegal: true,
};

/// Generates control signals for a decoded instruction.
///
/// # Examples
///
/// ```
/// use rvpipe_core::core::pipeline::stages::decode_control;
/// use rvpipe_core::isa::decode::decode;
///
/// let ctrl = decode_control(&decode(0x00A00513)); // addi a0, zero, 10
/// assert!(ctrl.reg_write);
/// assert!(!ctrl.illegal);
///
/// let csr = decode_control(&decode(0x30029073)); // csrrw zero, mstatus, t0
/// assert!(csr.illegal);
/// ```
pub fn decode_control(d: &Decoded) -> ControlSignals {
    let mut c = ControlSignals::default();

    match d.opcode {
        opcodes::OP_LUI => {
            c.reg_write = true;
            c.a_src = OpASrc::Zero;
        }
        opcodes::OP_AUIPC => {
            c.reg_write = true;
            c.a_src = OpASrc::Pc;
        }
        opcodes::OP_JAL => {
            c.reg_write = true;
            c.a_src = OpASrc::Pc;
            c.b_src = OpBSrc::InstSize;
            c.control = ControlFlow::Jal;
        }
        opcodes::OP_JALR if d.funct3 == funct3::JALR => {
            c.reg_write = true;
            c.a_src = OpASrc::Pc;
            c.b_src = OpBSrc::InstSize;
            c.control = ControlFlow::Jalr;
        }
        opcodes::OP_BRANCH => {
            let cond = match d.funct3 {
                funct3::BEQ => BranchCond::Eq,
                funct3::BNE => BranchCond::Ne,
                funct3::BLT => BranchCond::Lt,
                funct3::BGE => BranchCond::Ge,
                funct3::BLTU => BranchCond::Ltu,
                funct3::BGEU => BranchCond::Geu,
                _ => return ILLEGAL,
            };
            c.control = ControlFlow::Branch(cond);
        }
        opcodes::OP_LOAD => {
            let (width, signed) = match d.funct3 {
                funct3::LB => (MemWidth::Byte, true),
                funct3::LH => (MemWidth::Half, true),
                funct3::LW => (MemWidth::Word, true),
                funct3::LBU => (MemWidth::Byte, false),
                funct3::LHU => (MemWidth::Half, false),
                _ => return ILLEGAL,
            };
            c.reg_write = true;
            c.mem_read = true;
            c.width = width;
            c.signed_load = signed;
        }
        opcodes::OP_STORE => {
            c.width = match d.funct3 {
                funct3::SB => MemWidth::Byte,
                funct3::SH => MemWidth::Half,
                funct3::SW => MemWidth::Word,
                _ => return ILLEGAL,
            };
            c.mem_write = true;
        }
        opcodes::OP_IMM => {
            c.reg_write = true;
            c.alu = match (d.funct3, d.funct7) {
                (funct3::ADD_SUB, _) => AluOp::Add,
                (funct3::SLT, _) => AluOp::Slt,
                (funct3::SLTU, _) => AluOp::Sltu,
                (funct3::XOR, _) => AluOp::Xor,
                (funct3::OR, _) => AluOp::Or,
                (funct3::AND, _) => AluOp::And,
                (funct3::SLL, funct7::DEFAULT) => AluOp::Sll,
                (funct3::SRL_SRA, funct7::DEFAULT) => AluOp::Srl,
                (funct3::SRL_SRA, funct7::SRA) => AluOp::Sra,
                _ => return ILLEGAL,
            };
        }
        opcodes::OP_REG => {
            c.reg_write = true;
            c.b_src = OpBSrc::Reg2;
            c.alu = match (d.funct3, d.funct7) {
                (funct3::ADD_SUB, funct7::DEFAULT) => AluOp::Add,
                (funct3::ADD_SUB, funct7::SUB) => AluOp::Sub,
                (funct3::SLL, funct7::DEFAULT) => AluOp::Sll,
                (funct3::SLT, funct7::DEFAULT) => AluOp::Slt,
                (funct3::SLTU, funct7::DEFAULT) => AluOp::Sltu,
                (funct3::XOR, funct7::DEFAULT) => AluOp::Xor,
                (funct3::SRL_SRA, funct7::DEFAULT) => AluOp::Srl,
                (funct3::SRL_SRA, funct7::SRA) => AluOp::Sra,
                (funct3::OR, funct7::DEFAULT) => AluOp::Or,
                (funct3::AND, funct7::DEFAULT) => AluOp::And,
                _ => return ILLEGAL,
            };
        }
        opcodes::OP_MISC_MEM if d.funct3 == funct3::FENCE => {}
        opcodes::OP_SYSTEM if d.raw == sys_ops::ECALL || d.raw == sys_ops::EBREAK => {
            c.halt = true;
        }
        _ => return ILLEGAL,
    }

    c
}
