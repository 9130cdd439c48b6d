//! GPIO and UART Device Tests.

use pretty_assertions::assert_eq;
use rvpipe_core::soc::devices::gpio::{REG_IN, REG_OUT};
use rvpipe_core::soc::devices::uart::{REG_RX, REG_TX, RX_VALID, TX_BUSY};
use rvpipe_core::soc::devices::{Device, Gpio, SerialReceiver, SerialTransmitter, Uart};
use rvpipe_core::soc::pins::Pins;

const DIVISOR: u32 = 4;

/// Line levels for one 8N1 frame, each held for `DIVISOR` samples.
fn frame_levels(byte: u8, stop: bool) -> Vec<bool> {
    let mut bits = vec![false];
    bits.extend((0..8).map(|i| byte >> i & 1 != 0));
    bits.push(stop);
    bits.into_iter()
        .flat_map(|b| std::iter::repeat_n(b, DIVISOR as usize))
        .collect()
}

fn pins_rx(level: bool) -> Pins {
    Pins {
        uart_rx: level,
        ..Pins::default()
    }
}

#[test]
fn gpio_output_mirror_and_input_sampling() {
    let mut gpio = Gpio::new();
    gpio.write_u32(REG_OUT, 0x16, 0b0001);
    assert_eq!(gpio.output(), 0x6);
    assert_eq!(gpio.read_u32(REG_OUT), 0x6);

    gpio.tick(&Pins {
        gpio_in: 0xF3,
        ..Pins::default()
    });
    assert_eq!(gpio.read_u32(REG_IN), 0x3);

    gpio.write_u32(REG_IN, 0xF, 0b1111);
    assert_eq!(gpio.input(), 0x3);
    assert_eq!(gpio.name(), "GPIO");
}

#[test]
fn gpio_ignores_stores_that_miss_lane_zero() {
    let mut gpio = Gpio::new();
    gpio.write_u32(REG_OUT, 0x0F0F_0F0F, 0b0010);
    assert_eq!(gpio.output(), 0);
}

#[test]
fn gpio_reset_drives_outputs_low() {
    let mut gpio = Gpio::new();
    gpio.write_u32(REG_OUT, 0x5, 0b1111);
    gpio.reset();
    assert_eq!(gpio.output(), 0);
}

#[test]
fn transmitter_and_receiver_agree() {
    let mut tx = SerialTransmitter::new(DIVISOR);
    let mut rx = SerialReceiver::new(DIVISOR);
    assert!(tx.start(0xC3));
    assert!(!tx.start(0x00));

    let mut received = Vec::new();
    for _ in 0..(12 * DIVISOR) {
        received.extend(rx.sample(tx.line()));
        tx.tick();
    }
    assert_eq!(received, vec![0xC3]);
    assert!(!tx.busy());
    assert!(!rx.busy());
}

#[test]
fn receiver_counts_framing_errors() {
    let mut rx = SerialReceiver::new(DIVISOR);
    let mut received = Vec::new();
    for level in frame_levels(0x55, false) {
        received.extend(rx.sample(level));
    }
    assert!(received.is_empty());
    assert_eq!(rx.framing_errors(), 1);
}

#[test]
fn receiver_ignores_start_glitches() {
    let mut rx = SerialReceiver::new(DIVISOR);
    assert_eq!(rx.sample(false), None);
    for _ in 0..(12 * DIVISOR) {
        assert_eq!(rx.sample(true), None);
    }
    assert!(!rx.busy());
    assert_eq!(rx.framing_errors(), 0);
}

#[test]
fn uart_reports_busy_while_transmitting() {
    let mut uart = Uart::new(DIVISOR);
    assert_eq!(uart.read_u32(REG_TX) & TX_BUSY, 0);

    uart.write_u32(REG_TX, u32::from(b'x'), 0b0001);
    assert!(uart.tx_busy());
    assert!(!uart.tx_line());
    assert_eq!(uart.read_u32(REG_TX) & TX_BUSY, TX_BUSY);

    for _ in 0..(10 * DIVISOR) {
        uart.tick(&Pins::default());
    }
    assert!(!uart.tx_busy());
    assert!(uart.tx_line());
}

#[test]
fn uart_receive_register_is_read_once() {
    let mut uart = Uart::new(DIVISOR);
    for level in frame_levels(b'Q', true) {
        uart.tick(&pins_rx(level));
    }
    uart.tick(&pins_rx(true));
    assert_eq!(uart.rx_pending(), Some(b'Q'));

    assert_eq!(uart.read_u32(REG_RX), RX_VALID | u32::from(b'Q'));
    assert_eq!(uart.read_u32(REG_RX), 0);
}

#[test]
fn uart_overrun_keeps_newest_byte() {
    let mut uart = Uart::new(DIVISOR);
    for byte in [b'1', b'2'] {
        for level in frame_levels(byte, true) {
            uart.tick(&pins_rx(level));
        }
        uart.tick(&pins_rx(true));
    }
    assert_eq!(uart.overruns(), 1);
    assert_eq!(uart.rx_pending(), Some(b'2'));
}

#[test]
fn uart_reset_drops_pending_state() {
    let mut uart = Uart::new(DIVISOR);
    uart.write_u32(REG_TX, 0x41, 0b0001);
    for level in frame_levels(b'Z', true) {
        uart.tick(&pins_rx(level));
    }
    uart.tick(&pins_rx(true));
    uart.reset();
    assert!(!uart.tx_busy());
    assert_eq!(uart.rx_pending(), None);
    assert_eq!(uart.name(), "UART");
}
