//! Decode Tests.
//!
//! Immediates round-trip through the instruction builder for every format,
//! and each instruction class produces the expected control signals.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use rvpipe_core::core::pipeline::signals::{AluOp, BranchCond, ControlFlow, MemWidth, OpASrc, OpBSrc};
use rvpipe_core::core::pipeline::stages::decode_control;
use rvpipe_core::isa::decode::decode;

use crate::common::builder::instruction::{InstructionBuilder as I, ebreak, ecall};

#[test]
fn extracts_register_fields() {
    let d = decode(I::new().sub(31, 17, 3).build());
    assert_eq!((d.rd, d.rs1, d.rs2), (31, 17, 3));
}

proptest! {
    #[test]
    fn i_type_immediate(imm in -2048i32..2048) {
        prop_assert_eq!(decode(I::new().addi(1, 2, imm).build()).imm, imm);
    }

    #[test]
    fn s_type_immediate(imm in -2048i32..2048) {
        prop_assert_eq!(decode(I::new().sw(1, 2, imm).build()).imm, imm);
    }

    #[test]
    fn b_type_immediate(half in -2048i32..2048) {
        let offset = half * 2;
        prop_assert_eq!(decode(I::new().beq(1, 2, offset).build()).imm, offset);
    }

    #[test]
    fn j_type_immediate(half in -(1i32 << 19)..(1i32 << 19)) {
        let offset = half * 2;
        prop_assert_eq!(decode(I::new().jal(1, offset).build()).imm, offset);
    }

    #[test]
    fn u_type_immediate(imm20 in 0u32..(1 << 20)) {
        prop_assert_eq!(decode(I::new().lui(1, imm20).build()).imm as u32, imm20 << 12);
    }
}

#[test]
fn alu_instructions_write_a_register() {
    let ctrl = decode_control(&decode(I::new().srai(5, 6, 3).build()));
    assert_eq!(ctrl.alu, AluOp::Sra);
    assert_eq!(ctrl.b_src, OpBSrc::Imm);
    assert!(ctrl.reg_write);
    assert!(!ctrl.mem_read && !ctrl.mem_write);

    let ctrl = decode_control(&decode(I::new().sltu(5, 6, 7).build()));
    assert_eq!(ctrl.alu, AluOp::Sltu);
    assert_eq!(ctrl.b_src, OpBSrc::Reg2);
}

#[rstest]
#[case::lb(I::new().lb(1, 2, 0), MemWidth::Byte, true)]
#[case::lbu(I::new().lbu(1, 2, 0), MemWidth::Byte, false)]
#[case::lh(I::new().lh(1, 2, 0), MemWidth::Half, true)]
#[case::lhu(I::new().lhu(1, 2, 0), MemWidth::Half, false)]
#[case::lw(I::new().lw(1, 2, 0), MemWidth::Word, true)]
fn loads(#[case] inst: I, #[case] width: MemWidth, #[case] signed: bool) {
    let ctrl = decode_control(&decode(inst.build()));
    assert!(ctrl.mem_read && ctrl.reg_write);
    assert_eq!(ctrl.width, width);
    if width != MemWidth::Word {
        assert_eq!(ctrl.signed_load, signed);
    }
}

#[test]
fn stores_do_not_write_registers() {
    let ctrl = decode_control(&decode(I::new().sh(1, 2, 0).build()));
    assert!(ctrl.mem_write);
    assert!(!ctrl.reg_write);
    assert_eq!(ctrl.width, MemWidth::Half);
}

#[test]
fn control_flow_classes() {
    let bgeu = decode_control(&decode(I::new().bgeu(1, 2, 8).build()));
    assert_eq!(bgeu.control, ControlFlow::Branch(BranchCond::Geu));
    assert!(!bgeu.reg_write);

    let jal = decode_control(&decode(I::new().jal(1, 8).build()));
    assert_eq!(jal.control, ControlFlow::Jal);
    assert_eq!((jal.a_src, jal.b_src), (OpASrc::Pc, OpBSrc::InstSize));

    let jalr = decode_control(&decode(I::new().jalr(1, 2, 0).build()));
    assert_eq!(jalr.control, ControlFlow::Jalr);
}

#[test]
fn system_instructions() {
    assert!(decode_control(&decode(ecall())).halt);
    assert!(decode_control(&decode(ebreak())).halt);

    let fence = decode_control(&decode(0x0FF0_000F));
    assert!(!fence.illegal && !fence.reg_write && !fence.halt);
}

#[rstest]
#[case::all_zero(0x0000_0000)]
#[case::all_ones(0xFFFF_FFFF)]
#[case::mul(0x02B5_0533)]
#[case::csrrw(0x3002_9073)]
#[case::bad_branch_funct3(0x0000_2063)]
fn unimplemented_encodings_are_illegal_no_ops(#[case] inst: u32) {
    let ctrl = decode_control(&decode(inst));
    assert!(ctrl.illegal);
    assert!(!ctrl.reg_write && !ctrl.mem_read && !ctrl.mem_write && !ctrl.halt);
    assert_eq!(ctrl.control, ControlFlow::None);
}
