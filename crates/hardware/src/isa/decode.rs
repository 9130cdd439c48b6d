//! RV32I Instruction Decoder.
//!
//! Decodes 32-bit instruction encodings into the `Decoded` format: opcode,
//! register indices, function codes, and the sign-extended immediate for
//! every instruction format (R, I, S, B, U, J).

use crate::isa::instruction::{Decoded, InstructionBits};
use crate::isa::rv32i::opcodes;

/// Total width of a RISC-V instruction in bits.
const INSTRUCTION_WIDTH: u32 = 32;

/// Bit mask for extracting the U-Type immediate field (bits 12-31).
const U_IMM_MASK: u32 = 0xFFFF_F000;

/// Decodes a RISC-V instruction into its component fields.
///
/// # Arguments
///
/// * `inst` - The 32-bit instruction encoding to decode
///
/// # Examples
///
/// ```
/// use rvpipe_core::isa::decode::decode;
///
/// // sw a1, -4(sp)
/// let d = decode(0xfeb12e23);
/// assert_eq!((d.rs1, d.rs2, d.imm), (2, 11, -4));
/// ```
pub fn decode(inst: u32) -> Decoded {
    let opcode = inst.opcode();

    let imm = match opcode {
        opcodes::OP_IMM | opcodes::OP_LOAD | opcodes::OP_JALR | opcodes::OP_SYSTEM => {
            i_type_imm(inst)
        }
        opcodes::OP_STORE => s_type_imm(inst),
        opcodes::OP_BRANCH => b_type_imm(inst),
        opcodes::OP_LUI | opcodes::OP_AUIPC => u_type_imm(inst),
        opcodes::OP_JAL => j_type_imm(inst),
        _ => 0,
    };

    Decoded {
        raw: inst,
        opcode,
        rd: inst.rd(),
        rs1: inst.rs1(),
        rs2: inst.rs2(),
        funct3: inst.funct3(),
        funct7: inst.funct7(),
        imm,
    }
}

/// I-Type: `imm[11:0] | rs1 | funct3 | rd | opcode`.
pub fn i_type_imm(inst: u32) -> i32 {
    (inst as i32) >> 20
}

/// S-Type: `imm[11:5] | rs2 | rs1 | funct3 | imm[4:0] | opcode`.
pub fn s_type_imm(inst: u32) -> i32 {
    let low = (inst >> 7) & 0x1F;
    let high = (inst >> 25) & 0x7F;
    sign_extend((high << 5) | low, 12)
}

/// B-Type: `imm[12] | imm[10:5] | rs2 | rs1 | funct3 | imm[4:1] | imm[11] | opcode`.
pub fn b_type_imm(inst: u32) -> i32 {
    let bit_11 = (inst >> 7) & 1;
    let bits_4_1 = (inst >> 8) & 0xF;
    let bits_10_5 = (inst >> 25) & 0x3F;
    let bit_12 = (inst >> 31) & 1;
    let combined = (bit_12 << 12) | (bit_11 << 11) | (bits_10_5 << 5) | (bits_4_1 << 1);
    sign_extend(combined, 13)
}

/// U-Type: `imm[31:12] | rd | opcode`, already shifted into place.
pub fn u_type_imm(inst: u32) -> i32 {
    (inst & U_IMM_MASK) as i32
}

/// J-Type: `imm[20] | imm[10:1] | imm[11] | imm[19:12] | rd | opcode`.
pub fn j_type_imm(inst: u32) -> i32 {
    let bits_19_12 = (inst >> 12) & 0xFF;
    let bit_11 = (inst >> 20) & 1;
    let bits_10_1 = (inst >> 21) & 0x3FF;
    let bit_20 = (inst >> 31) & 1;
    let combined = (bit_20 << 20) | (bits_19_12 << 12) | (bit_11 << 11) | (bits_10_1 << 1);
    sign_extend(combined, 21)
}

/// Sign extends the low `bits` of `val` to 32 bits.
fn sign_extend(val: u32, bits: u32) -> i32 {
    let shift = INSTRUCTION_WIDTH - bits;
    ((val as i32) << shift) >> shift
}
