//! Control Flow Tests.
//!
//! Branches and jumps resolve in Execute. A taken redirect squashes the
//! instruction fetched in the same cycle, so each costs exactly one bubble.
//! `ecall`/`ebreak` stop the front end and halt the core when they retire.

use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::builder::instruction::{InstructionBuilder as I, ebreak, ecall};
use crate::common::harness::TestContext;

#[test]
fn jal_skips_instructions_with_one_bubble() {
    let mut ctx = TestContext::new().load_program(&[
        I::new().addi(10, 0, 1).build(),  // 0x00
        I::new().jal(1, 12).build(),      // 0x04 -> 0x10
        I::new().addi(11, 0, 1).build(),  // 0x08 (squashed)
        I::new().addi(11, 0, 2).build(),  // 0x0c (skipped)
        I::new().addi(12, 0, 3).build(),  // 0x10
        ebreak(),                          // 0x14
    ]);
    let summary = ctx.reset().run_to_halt(30);

    assert!(summary.halted);
    assert_eq!(ctx.get_reg(1), 8);
    assert_eq!(ctx.get_reg(11), 0);
    assert_eq!(ctx.get_reg(12), 3);
    assert_eq!(summary.stats.redirects, 1);
    assert_eq!(summary.stats.instructions_retired, 4);

    let fetch: Vec<u32> = ctx
        .trace()
        .iter()
        .filter(|r| !r.reset)
        .map(|r| r.fetch_addr)
        .collect();
    assert_eq!(&fetch[..5], &[0x0, 0x4, 0x8, 0x10, 0x14]);
}

#[test]
fn jalr_links_and_clears_low_bits() {
    let mut ctx = TestContext::new().load_program(&[
        I::new().addi(5, 0, 0x11).build(), // 0x00
        I::new().jalr(1, 5, 0).build(),    // 0x04 -> 0x10
        I::new().addi(10, 0, 1).build(),   // 0x08
        I::new().addi(10, 0, 2).build(),   // 0x0c
        I::new().addi(11, 0, 7).build(),   // 0x10
        ebreak(),                          // 0x14
    ]);
    let _ = ctx.reset().run_to_halt(30);

    assert_eq!(ctx.get_reg(1), 8);
    assert_eq!(ctx.get_reg(10), 0);
    assert_eq!(ctx.get_reg(11), 7);
}

#[rstest]
#[case::beq_taken(I::new().beq(10, 11, 8), 5, 5, true)]
#[case::beq_not_taken(I::new().beq(10, 11, 8), 5, 6, false)]
#[case::bne_taken(I::new().bne(10, 11, 8), 5, 6, true)]
#[case::bne_not_taken(I::new().bne(10, 11, 8), 5, 5, false)]
#[case::blt_signed(I::new().blt(10, 11, 8), -1, 1, true)]
#[case::bltu_unsigned(I::new().bltu(10, 11, 8), -1, 1, false)]
#[case::bge_signed(I::new().bge(10, 11, 8), 1, -1, true)]
#[case::bge_equal(I::new().bge(10, 11, 8), 3, 3, true)]
#[case::bgeu_unsigned(I::new().bgeu(10, 11, 8), 1, -1, false)]
fn conditional_branches(
    #[case] branch: I,
    #[case] a: i32,
    #[case] b: i32,
    #[case] taken: bool,
) {
    let mut ctx = TestContext::new().load_program(&[
        I::new().addi(10, 0, a).build(),
        I::new().addi(11, 0, b).build(),
        branch.build(),                  // 0x08 -> 0x10 when taken
        I::new().addi(12, 0, 1).build(), // 0x0c
        ebreak(),                        // 0x10
    ]);
    let summary = ctx.reset().run_to_halt(30);

    assert!(summary.halted);
    assert_eq!(ctx.get_reg(12), u32::from(!taken));
    assert_eq!(summary.stats.redirects, u64::from(taken));
}

#[test]
fn backward_branch_loop_counts_down() {
    let mut ctx = TestContext::new().load_program(&[
        I::new().addi(10, 0, 3).build(),   // 0x00
        I::new().addi(11, 11, 1).build(),  // 0x04
        I::new().addi(10, 10, -1).build(), // 0x08
        I::new().bne(10, 0, -8).build(),   // 0x0c -> 0x04
        ebreak(),                          // 0x10
    ]);
    let summary = ctx.reset().run_to_halt(50);

    assert_eq!(ctx.get_reg(10), 0);
    assert_eq!(ctx.get_reg(11), 3);
    assert_eq!(summary.stats.redirects, 2);
}

#[test]
fn auipc_adds_pc() {
    let mut ctx = TestContext::new().load_program(&[
        I::new().addi(0, 0, 0).build(),
        I::new().auipc(10, 0x1).build(),
        I::new().lui(11, 0xFFFFF).build(),
        ebreak(),
    ]);
    let _ = ctx.reset().run_to_halt(20);
    assert_eq!(ctx.get_reg(10), 0x1004);
    assert_eq!(ctx.get_reg(11), 0xFFFF_F000);
}

#[test]
fn ecall_halts_and_freezes_the_core() {
    let mut ctx = TestContext::new().load_program(&[
        I::new().addi(10, 0, 1).build(),
        ecall(),
        I::new().addi(10, 0, 2).build(),
    ]);
    let summary = ctx.reset().run_to_halt(20);

    assert!(summary.halted);
    assert_eq!(summary.cycles, 2 + 4);
    assert_eq!(summary.stats.instructions_retired, 2);
    assert_eq!(ctx.get_reg(10), 1);

    let pc = ctx.core().pc;
    let _ = ctx.step(10);
    assert_eq!(ctx.core().pc, pc);
    assert_eq!(ctx.get_reg(10), 1);
    assert_eq!(ctx.core().stats.instructions_retired, 2);
}

#[test]
fn unimplemented_encodings_retire_as_no_ops() {
    // csrrs a0, mstatus, zero
    let csrrs = 0x3000_2573;
    let mut ctx = TestContext::new().load_program(&[
        I::new().addi(10, 0, 4).build(),
        csrrs,
        I::new().addi(11, 10, 1).build(),
        ebreak(),
    ]);
    let summary = ctx.reset().run_to_halt(20);

    assert!(summary.halted);
    assert_eq!(ctx.get_reg(10), 4);
    assert_eq!(ctx.get_reg(11), 5);
    assert_eq!(summary.stats.illegal, 1);
}
