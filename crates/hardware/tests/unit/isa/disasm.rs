//! Disassembler Format Tests.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rvpipe_core::isa::disasm::{LISTING_HEADER, disassemble, listing_row, write_listing};

use crate::common::builder::instruction::{InstructionBuilder as I, ebreak, ecall};

#[rstest]
#[case::addi(I::new().addi(10, 0, 10).build(), "addi a0, zero, 10")]
#[case::addi_negative(I::new().addi(10, 10, -1093).build(), "addi a0, a0, -1093")]
#[case::srai(I::new().srai(5, 6, 3).build(), "srai t0, t1, 3")]
#[case::sub(I::new().sub(12, 11, 10).build(), "sub a2, a1, a0")]
#[case::lw(I::new().lw(10, 2, 4).build(), "lw a0, 4(sp)")]
#[case::lbu(I::new().lbu(11, 8, -1).build(), "lbu a1, -1(s0)")]
#[case::sw(I::new().sw(10, 0, 0x100).build(), "sw a0, 256(zero)")]
#[case::sh(I::new().sh(1, 2, -2).build(), "sh ra, -2(sp)")]
#[case::lui(I::new().lui(10, 0xAAAAC).build(), "lui a0, 0xaaaac")]
#[case::jalr(I::new().jalr(0, 1, 0).build(), "jalr zero, 0(ra)")]
#[case::ecall(ecall(), "ecall")]
#[case::ebreak(ebreak(), "ebreak")]
#[case::fence(0x0FF0_000F, "fence iorw, iorw")]
#[case::csrrs(0x3000_2573, "csrrs a0, 0x300, zero")]
#[case::unknown(0x0000_0000, ".word 0x00000000")]
fn formats_instructions(#[case] inst: u32, #[case] text: &str) {
    assert_eq!(disassemble(inst, 0), text);
}

#[test]
fn control_transfers_print_absolute_targets() {
    let bne = I::new().bne(10, 0, -8).build();
    assert_eq!(disassemble(bne, 0x10), "bne a0, zero, 0x00000008");

    let jal = I::new().jal(1, 0x20).build();
    assert_eq!(disassemble(jal, 0x100), "jal ra, 0x00000120");
}

#[test]
fn auipc_prints_the_raw_upper_immediate() {
    let auipc = I::new().auipc(5, 0x1).build();
    assert_eq!(disassemble(auipc, 0x40), "auipc t0, 0x1");
}

#[test]
fn shifts_with_nonzero_funct7_are_not_slli() {
    // slli t0, t1, 3 with funct7 = 0b0000001: illegal to the core, so no mnemonic.
    let inst = I::new().slli(5, 6, 3).build() | (1 << 25);
    assert_eq!(disassemble(inst, 0), format!(".word {inst:#010x}"));
}

#[test]
fn listing_quotes_the_asm_column() {
    let row = listing_row(0x10, I::new().lw(10, 2, 4).build());
    assert_eq!(row, "0x00000010,0x00412503,\"lw a0, 4(sp)\"");
    assert_eq!(listing_row(0x14, ebreak()), "0x00000014,0x00100073,ebreak");
}

#[test]
fn listing_has_header_and_three_columns_per_row() {
    let words = [I::new().addi(10, 0, 10).build(), ecall(), 0];
    let mut out = Vec::new();
    write_listing(&mut out, &words, 0x100).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], LISTING_HEADER);
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[1], "0x00000100,0x00a00513,\"addi a0, zero, 10\"");
    assert_eq!(lines[2], "0x00000104,0x00000073,ecall");
    assert_eq!(lines[3], "0x00000108,0x00000000,.word 0x00000000");
    for line in &lines[1..] {
        // Two delimiters outside the quoted field.
        let (head, _) = line.split_once('"').unwrap_or((*line, ""));
        assert_eq!(head.matches(',').count(), 2, "{line}");
    }
}
