//! Functional Unit Tests.
//!
//! Table-driven checks of the ALU, the branch comparator, and the load/store
//! lane selection, plus properties of the lane merge.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use rvpipe_core::core::pipeline::signals::{AluOp, BranchCond, ControlFlow, MemWidth};
use rvpipe_core::core::units::alu::Alu;
use rvpipe_core::core::units::bru::Bru;
use rvpipe_core::core::units::lsu::Lsu;
use rvpipe_core::core::units::lsu::lanes::{extract_load, store_lanes};

const NEG1: u32 = u32::MAX;
const I32_MIN: u32 = 0x8000_0000;
const I32_MAX: u32 = 0x7FFF_FFFF;

#[rstest]
#[case::add_wraps(AluOp::Add, NEG1, 1, 0)]
#[case::add_overflow(AluOp::Add, I32_MAX, 1, I32_MIN)]
#[case::sub_underflow(AluOp::Sub, 0, 1, NEG1)]
#[case::sll_uses_low_five_bits(AluOp::Sll, 1, 33, 2)]
#[case::slt_signed(AluOp::Slt, NEG1, 0, 1)]
#[case::sltu_unsigned(AluOp::Sltu, NEG1, 0, 0)]
#[case::xor(AluOp::Xor, 0xF0F0, 0xFF00, 0x0FF0)]
#[case::srl_logical(AluOp::Srl, I32_MIN, 31, 1)]
#[case::sra_arithmetic(AluOp::Sra, I32_MIN, 31, NEG1)]
#[case::or(AluOp::Or, 0xF0, 0x0F, 0xFF)]
#[case::and(AluOp::And, 0xF0, 0x3C, 0x30)]
fn alu_operations(#[case] op: AluOp, #[case] a: u32, #[case] b: u32, #[case] expected: u32) {
    assert_eq!(Alu::execute(op, a, b), expected);
}

#[rstest]
#[case(BranchCond::Eq, 3, 3, true)]
#[case(BranchCond::Ne, 3, 3, false)]
#[case(BranchCond::Lt, NEG1, 0, true)]
#[case(BranchCond::Ltu, NEG1, 0, false)]
#[case(BranchCond::Ge, I32_MIN, I32_MAX, false)]
#[case(BranchCond::Geu, I32_MIN, I32_MAX, true)]
fn branch_comparisons(#[case] cond: BranchCond, #[case] a: u32, #[case] b: u32, #[case] taken: bool) {
    assert_eq!(Bru::taken(cond, a, b), taken);
}

#[test]
fn jal_target_is_pc_relative() {
    assert_eq!(Bru::resolve(ControlFlow::Jal, 0x100, -0x20, 0, 0), Some(0xE0));
    assert_eq!(Bru::resolve(ControlFlow::None, 0x100, 8, 0, 0), None);
}

#[rstest]
#[case::byte0(MemWidth::Byte, 0x200, 0b0001)]
#[case::byte3(MemWidth::Byte, 0x203, 0b1000)]
#[case::half0(MemWidth::Half, 0x200, 0b0011)]
#[case::half2(MemWidth::Half, 0x202, 0b1100)]
#[case::word(MemWidth::Word, 0x200, 0b1111)]
fn store_write_enables(#[case] width: MemWidth, #[case] addr: u32, #[case] mask: u8) {
    assert_eq!(Lsu::store(width, addr, 0).mask, mask);
}

proptest! {
    #[test]
    fn stored_byte_lands_in_its_lane(addr in any::<u32>(), data in any::<u32>()) {
        let lanes = store_lanes(MemWidth::Byte, addr, data);
        let lane = addr & 3;
        prop_assert_eq!(lanes.mask.count_ones(), 1);
        prop_assert_eq!(lanes.mask, 1 << lane);
        prop_assert_eq!((lanes.data >> (8 * lane)) & 0xFF, data & 0xFF);
    }

    #[test]
    fn load_reads_back_what_store_placed(addr in any::<u32>(), data in any::<u32>(), old in any::<u32>()) {
        for width in [MemWidth::Byte, MemWidth::Half, MemWidth::Word] {
            let addr = addr & !width.align_mask();
            let lanes = store_lanes(width, addr, data);
            let mut word = old;
            for k in 0..4 {
                if lanes.mask & (1 << k) != 0 {
                    let byte = 0xFF << (8 * k);
                    word = (word & !byte) | (lanes.data & byte);
                }
            }
            let value_mask = match width {
                MemWidth::Byte => 0xFF,
                MemWidth::Half => 0xFFFF,
                MemWidth::Word => NEG1,
            };
            prop_assert_eq!(extract_load(width, false, addr & 3, word), data & value_mask);
        }
    }
}
