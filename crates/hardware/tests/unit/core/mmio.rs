//! Memory-Mapped Peripheral Tests.
//!
//! The 16-byte window at the MMIO base holds GPIO out, GPIO in, UART TX and
//! UART RX. Accesses there never reach the data-memory lanes.

use pretty_assertions::assert_eq;
use rvpipe_core::soc::devices::uart::RX_VALID;

use crate::common::builder::instruction::{InstructionBuilder as I, ebreak, li};
use crate::common::harness::{MMIO_BASE, TestContext};

/// `t0` holds the MMIO base in every program below.
const T0: u32 = 5;

fn with_mmio_base(body: &[u32]) -> Vec<u32> {
    let mut program = li(T0, MMIO_BASE);
    program.extend_from_slice(body);
    program
}

#[test]
fn gpio_output_is_written_and_read_back() {
    let program = with_mmio_base(&[
        I::new().addi(10, 0, 0x5).build(),
        I::new().sw(10, T0, 0).build(),
        I::new().lw(11, T0, 0).build(),
        ebreak(),
    ]);
    let mut ctx = TestContext::new().load_program(&program);
    let summary = ctx.reset().run_to_halt(30);

    assert_eq!(summary.pins_out.gpio_out, 0x5);
    assert_eq!(ctx.get_reg(11), 0x5);
    assert_eq!(summary.stats.mmio_accesses, 2);
    // The lanes saw no write-enable for the peripheral store.
    assert_eq!(ctx.peek_data(MMIO_BASE), 0);
}

#[test]
fn gpio_output_keeps_only_four_pins() {
    let program = with_mmio_base(&[
        I::new().addi(10, 0, 0xFF).build(),
        I::new().sb(10, T0, 0).build(),
        ebreak(),
    ]);
    let mut ctx = TestContext::new().load_program(&program);
    let summary = ctx.reset().run_to_halt(30);
    assert_eq!(summary.pins_out.gpio_out, 0xF);
}

#[test]
fn gpio_input_pins_are_sampled() {
    let program = with_mmio_base(&[
        I::new().lw(10, T0, 4).build(),
        I::new().sw(10, T0, 4).build(),
        I::new().lw(11, T0, 4).build(),
        ebreak(),
    ]);
    let mut ctx = TestContext::new().load_program(&program);
    ctx.bench.set_gpio_in(0xC);
    let summary = ctx.reset().run_to_halt(30);

    assert_eq!(ctx.get_reg(10), 0xC);
    // Stores to the input register are ignored.
    assert_eq!(ctx.get_reg(11), 0xC);
    assert_eq!(summary.pins_out.gpio_out, 0);
}

#[test]
fn uart_transmits_polled_bytes() {
    let program = with_mmio_base(&[
        I::new().addi(10, 0, i32::from(b'H')).build(), // 0x08
        I::new().sw(10, T0, 8).build(),                // 0x0c
        I::new().lw(11, T0, 8).build(),                // 0x10: poll busy
        I::new().andi(11, 11, 1).build(),              // 0x14
        I::new().bne(11, 0, -8).build(),               // 0x18 -> 0x10
        I::new().addi(10, 0, i32::from(b'i')).build(), // 0x1c
        I::new().sw(10, T0, 8).build(),                // 0x20
        I::new().lw(11, T0, 8).build(),                // 0x24
        I::new().andi(11, 11, 1).build(),              // 0x28
        I::new().bne(11, 0, -8).build(),               // 0x2c -> 0x24
        ebreak(),                                      // 0x30
    ]);
    let mut ctx = TestContext::new().load_program(&program);
    let summary = ctx.reset().run_to_halt(500);
    assert!(summary.halted);

    // Let the monitor finish the last stop bit.
    let _ = ctx.step(10);
    assert_eq!(ctx.bench.serial_output(), b"Hi");
    assert!(ctx.core().pins_out().uart_tx);
}

#[test]
fn uart_receives_a_byte() {
    let program = with_mmio_base(&[
        I::new().lw(10, T0, 12).build(),                  // 0x08: poll
        I::new().andi(11, 10, RX_VALID as i32).build(),   // 0x0c
        I::new().beq(11, 0, -8).build(),                  // 0x10 -> 0x08
        I::new().andi(10, 10, 0xFF).build(),              // 0x14
        I::new().lw(12, T0, 12).build(),                  // 0x18: drained
        ebreak(),                                         // 0x1c
    ]);
    let mut ctx = TestContext::new().load_program(&program);
    let _ = ctx.reset();
    ctx.bench.send_serial(b"A");
    let summary = ctx.run_to_halt(500);

    assert!(summary.halted);
    assert_eq!(ctx.get_reg(10), u32::from(b'A'));
    assert_eq!(ctx.get_reg(12) & RX_VALID, 0);
    assert_eq!(ctx.core().bus.uart.overruns(), 0);
}
