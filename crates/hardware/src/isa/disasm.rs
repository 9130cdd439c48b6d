//! Instruction Disassembler for RV32I.
//!
//! Converts a 32-bit instruction encoding into a human-readable string for
//! debug logging of retired instructions and the CLI `disasm` command.
//! Control-transfer targets are printed as absolute addresses, which is why
//! the instruction's PC is an input.
//!
//! # Usage
//!
//! ```
//! use rvpipe_core::isa::disasm::disassemble;
//! assert_eq!(disassemble(0x00A00513, 0), "addi a0, zero, 10");
//! assert_eq!(disassemble(0x0000006F, 0x40), "jal zero, 0x00000040");
//! assert_eq!(disassemble(0xFFFFFFFF, 0), ".word 0xffffffff");
//! ```
//!
//! [`write_listing`] renders a whole image as CSV with a `pc,word,asm` header.
//! Mnemonics contain commas, so the `asm` field is quoted.

use std::io::{self, Write};

use crate::common::constants::INSTRUCTION_SIZE;
use crate::isa::abi::reg_name;
use crate::isa::decode::{b_type_imm, i_type_imm, j_type_imm, s_type_imm};
use crate::isa::instruction::{InstructionBits, SHAMT_MASK};
use crate::isa::privileged::opcodes as sys_op;
use crate::isa::rv32i::{funct3 as f3, funct7 as f7, opcodes as op};

/// Header row of a disassembly listing.
pub const LISTING_HEADER: &str = "pc,word,asm";

/// Formats one listing row for the word at `pc`.
///
/// # Examples
///
/// ```
/// use rvpipe_core::isa::disasm::listing_row;
/// assert_eq!(listing_row(0x4, 0x00A00513), r#"0x00000004,0x00a00513,"addi a0, zero, 10""#);
/// assert_eq!(listing_row(0x8, 0x00100073), "0x00000008,0x00100073,ebreak");
/// ```
pub fn listing_row(pc: u32, word: u32) -> String {
    format!("{pc:#010x},{word:#010x},{}", csv_field(&disassemble(word, pc)))
}

/// Writes the header and one row per word, starting at `start_addr`.
///
/// # Errors
///
/// Propagates write failures from `out`.
pub fn write_listing<W: Write>(out: &mut W, words: &[u32], start_addr: u32) -> io::Result<()> {
    writeln!(out, "{LISTING_HEADER}")?;
    let mut pc = start_addr;
    for &word in words {
        writeln!(out, "{}", listing_row(pc, word))?;
        pc = pc.wrapping_add(INSTRUCTION_SIZE);
    }
    out.flush()
}

/// Quotes a CSV field when it holds a delimiter, quote, or line break.
fn csv_field(text: &str) -> String {
    if text.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

/// Disassembles a 32-bit RV32I instruction located at `pc`.
///
/// Returns a mnemonic like `"add a0, a1, a2"`, or `".word 0x..."` for
/// encodings outside RV32I.
pub fn disassemble(inst: u32, pc: u32) -> String {
    let rd = reg_name(inst.rd());
    let rs1 = reg_name(inst.rs1());
    let rs2 = reg_name(inst.rs2());
    let funct3 = inst.funct3();
    let funct7 = inst.funct7();
    let imm_i = i_type_imm(inst);

    let text = match inst.opcode() {
        op::OP_LUI => Some(format!("lui {rd}, {:#x}", inst >> 12)),
        op::OP_AUIPC => Some(format!("auipc {rd}, {:#x}", inst >> 12)),
        op::OP_JAL => {
            let target = pc.wrapping_add(j_type_imm(inst) as u32);
            Some(format!("jal {rd}, {target:#010x}"))
        }
        op::OP_JALR if funct3 == f3::JALR => Some(format!("jalr {rd}, {imm_i}({rs1})")),
        op::OP_BRANCH => {
            let mnemonic = match funct3 {
                f3::BEQ => Some("beq"),
                f3::BNE => Some("bne"),
                f3::BLT => Some("blt"),
                f3::BGE => Some("bge"),
                f3::BLTU => Some("bltu"),
                f3::BGEU => Some("bgeu"),
                _ => None,
            };
            let target = pc.wrapping_add(b_type_imm(inst) as u32);
            mnemonic.map(|m| format!("{m} {rs1}, {rs2}, {target:#010x}"))
        }
        op::OP_LOAD => {
            let mnemonic = match funct3 {
                f3::LB => Some("lb"),
                f3::LH => Some("lh"),
                f3::LW => Some("lw"),
                f3::LBU => Some("lbu"),
                f3::LHU => Some("lhu"),
                _ => None,
            };
            mnemonic.map(|m| format!("{m} {rd}, {imm_i}({rs1})"))
        }
        op::OP_STORE => {
            let mnemonic = match funct3 {
                f3::SB => Some("sb"),
                f3::SH => Some("sh"),
                f3::SW => Some("sw"),
                _ => None,
            };
            let imm_s = s_type_imm(inst);
            mnemonic.map(|m| format!("{m} {rs2}, {imm_s}({rs1})"))
        }
        op::OP_IMM => disasm_op_imm(inst, rd, rs1, funct3, funct7, imm_i),
        op::OP_REG => disasm_op_reg(rd, rs1, rs2, funct3, funct7),
        op::OP_MISC_MEM if funct3 == f3::FENCE => {
            let pred = (inst >> 24) & 0xF;
            let succ = (inst >> 20) & 0xF;
            if pred == 0 && succ == 0 {
                Some("fence".to_string())
            } else {
                Some(format!("fence {}, {}", fence_set(pred), fence_set(succ)))
            }
        }
        op::OP_SYSTEM => disasm_system(inst, rd, rs1, funct3),
        _ => None,
    };

    text.unwrap_or_else(|| format!(".word {inst:#010x}"))
}

fn disasm_op_imm(
    inst: u32,
    rd: &str,
    rs1: &str,
    funct3: u32,
    funct7: u32,
    imm: i32,
) -> Option<String> {
    let shamt = (inst >> 20) & SHAMT_MASK;
    let text = match funct3 {
        f3::ADD_SUB => format!("addi {rd}, {rs1}, {imm}"),
        f3::SLT => format!("slti {rd}, {rs1}, {imm}"),
        f3::SLTU => format!("sltiu {rd}, {rs1}, {imm}"),
        f3::XOR => format!("xori {rd}, {rs1}, {imm}"),
        f3::OR => format!("ori {rd}, {rs1}, {imm}"),
        f3::AND => format!("andi {rd}, {rs1}, {imm}"),
        f3::SLL if funct7 == f7::DEFAULT => format!("slli {rd}, {rs1}, {shamt}"),
        f3::SRL_SRA if funct7 == f7::DEFAULT => format!("srli {rd}, {rs1}, {shamt}"),
        f3::SRL_SRA if funct7 == f7::SRA => format!("srai {rd}, {rs1}, {shamt}"),
        _ => return None,
    };
    Some(text)
}

fn disasm_op_reg(rd: &str, rs1: &str, rs2: &str, funct3: u32, funct7: u32) -> Option<String> {
    let mnemonic = match (funct7, funct3) {
        (f7::DEFAULT, f3::ADD_SUB) => "add",
        (f7::SUB, f3::ADD_SUB) => "sub",
        (f7::DEFAULT, f3::SLL) => "sll",
        (f7::DEFAULT, f3::SLT) => "slt",
        (f7::DEFAULT, f3::SLTU) => "sltu",
        (f7::DEFAULT, f3::XOR) => "xor",
        (f7::DEFAULT, f3::SRL_SRA) => "srl",
        (f7::SRA, f3::SRL_SRA) => "sra",
        (f7::DEFAULT, f3::OR) => "or",
        (f7::DEFAULT, f3::AND) => "and",
        _ => return None,
    };
    Some(format!("{mnemonic} {rd}, {rs1}, {rs2}"))
}

fn disasm_system(inst: u32, rd: &str, rs1: &str, funct3: u32) -> Option<String> {
    let csr = inst.csr();
    let zimm = inst.rs1();
    let text = match (inst, funct3) {
        (sys_op::ECALL, _) => "ecall".to_string(),
        (sys_op::EBREAK, _) => "ebreak".to_string(),
        (_, sys_op::CSRRW) => format!("csrrw {rd}, {csr:#x}, {rs1}"),
        (_, sys_op::CSRRS) => format!("csrrs {rd}, {csr:#x}, {rs1}"),
        (_, sys_op::CSRRC) => format!("csrrc {rd}, {csr:#x}, {rs1}"),
        (_, sys_op::CSRRWI) => format!("csrrwi {rd}, {csr:#x}, {zimm}"),
        (_, sys_op::CSRRSI) => format!("csrrsi {rd}, {csr:#x}, {zimm}"),
        (_, sys_op::CSRRCI) => format!("csrrci {rd}, {csr:#x}, {zimm}"),
        _ => return None,
    };
    Some(text)
}

/// Renders a FENCE predecessor/successor set as `iorw` letters.
fn fence_set(bits: u32) -> String {
    [(8, 'i'), (4, 'o'), (2, 'r'), (1, 'w')]
        .iter()
        .filter(|(bit, _)| bits & bit != 0)
        .map(|(_, c)| *c)
        .collect()
}
