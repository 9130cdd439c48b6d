//! Universal Asynchronous Receiver-Transmitter (UART).
//!
//! A bit-level 8N1 UART with a fixed divisor (clock cycles per bit). Exposes two
//! registers to the core:
//! - `REG_TX`: writing starts transmission of the low byte (dropped while busy);
//!   reading returns the busy flag in bit 0.
//! - `REG_RX`: reading returns the last received byte in bits 7:0 with bit 8
//!   set when it is valid, and clears the valid flag.
//!
//! [`SerialTransmitter`] and [`SerialReceiver`] are the line-level halves and are
//! reused by the testbench to drive and monitor the pins.

use crate::soc::devices::Device;
use crate::soc::pins::Pins;

/// Transmit register offset.
pub const REG_TX: u32 = 0x0;
/// Receive register offset.
pub const REG_RX: u32 = 0x4;

/// Bit 0 of `REG_TX`: transmitter busy.
pub const TX_BUSY: u32 = 0x1;
/// Bit 8 of `REG_RX`: received byte valid.
pub const RX_VALID: u32 = 0x100;

/// Bits per frame: start, 8 data, stop.
const FRAME_BITS: u8 = 10;

/// Shifts bytes out as 8N1 frames, LSB first, one bit every `divisor` edges.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SerialTransmitter {
    divisor: u32,
    frame: u16,
    bits_left: u8,
    count: u32,
}

impl SerialTransmitter {
    /// Creates an idle transmitter.
    pub fn new(divisor: u32) -> Self {
        Self {
            divisor: divisor.max(1),
            frame: 0,
            bits_left: 0,
            count: 0,
        }
    }

    /// Whether a frame is being shifted out.
    pub fn busy(&self) -> bool {
        self.bits_left > 0
    }

    /// Current line level (high when idle).
    pub fn line(&self) -> bool {
        !self.busy() || self.frame & 1 != 0
    }

    /// Starts a frame for `byte`.
    ///
    /// Returns `false` (and drops the byte) if a frame is already in progress.
    pub fn start(&mut self, byte: u8) -> bool {
        if self.busy() {
            return false;
        }
        self.frame = (u16::from(byte) << 1) | (1 << 9);
        self.bits_left = FRAME_BITS;
        self.count = 0;
        true
    }

    /// Advances one clock edge.
    pub fn tick(&mut self) {
        if !self.busy() {
            return;
        }
        self.count += 1;
        if self.count == self.divisor {
            self.count = 0;
            self.frame >>= 1;
            self.bits_left -= 1;
        }
    }

    /// Abandons any frame in progress.
    pub fn reset(&mut self) {
        self.bits_left = 0;
        self.count = 0;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct RxFrame {
    elapsed: u32,
    bit: u32,
    shift: u8,
}

/// Recovers 8N1 frames from a sampled line.
///
/// A frame starts at the first low sample. Bit `k` (0 = start, 1..=8 = data,
/// 9 = stop) is sampled `divisor / 2 + k * divisor` edges later, the middle of
/// the bit cell. A start bit that is high again at its midpoint is treated as a
/// glitch; a low stop bit is a framing error and the byte is discarded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SerialReceiver {
    divisor: u32,
    frame: Option<RxFrame>,
    framing_errors: u64,
}

impl SerialReceiver {
    /// Creates an idle receiver.
    pub fn new(divisor: u32) -> Self {
        Self {
            divisor: divisor.max(1),
            frame: None,
            framing_errors: 0,
        }
    }

    /// Number of frames discarded because the stop bit was low.
    pub fn framing_errors(&self) -> u64 {
        self.framing_errors
    }

    /// Whether a frame is being received.
    pub fn busy(&self) -> bool {
        self.frame.is_some()
    }

    /// Samples the line for one clock edge; returns a byte when a frame completes.
    pub fn sample(&mut self, line: bool) -> Option<u8> {
        let mut frame = match self.frame.take() {
            Some(frame) => RxFrame {
                elapsed: frame.elapsed + 1,
                ..frame
            },
            None if !line => RxFrame::default(),
            None => return None,
        };

        if frame.elapsed != self.divisor / 2 + frame.bit * self.divisor {
            self.frame = Some(frame);
            return None;
        }

        match frame.bit {
            0 if line => return None,
            0 => {}
            1..=8 => frame.shift |= u8::from(line) << (frame.bit - 1),
            _ => {
                if line {
                    return Some(frame.shift);
                }
                self.framing_errors += 1;
                tracing::warn!(byte = frame.shift, "UART framing error, byte dropped");
                return None;
            }
        }

        frame.bit += 1;
        self.frame = Some(frame);
        None
    }

    /// Abandons any frame in progress.
    pub fn reset(&mut self) {
        self.frame = None;
    }
}

/// UART device.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Uart {
    tx: SerialTransmitter,
    rx: SerialReceiver,
    rx_data: Option<u8>,
    overruns: u64,
}

impl Uart {
    /// Creates an idle UART with the given clock cycles per bit.
    pub fn new(divisor: u32) -> Self {
        Self {
            tx: SerialTransmitter::new(divisor),
            rx: SerialReceiver::new(divisor),
            rx_data: None,
            overruns: 0,
        }
    }

    /// Level of the transmit pin.
    pub fn tx_line(&self) -> bool {
        self.tx.line()
    }

    /// Whether a transmission is in progress.
    pub fn tx_busy(&self) -> bool {
        self.tx.busy()
    }

    /// Received byte waiting to be read, if any.
    pub fn rx_pending(&self) -> Option<u8> {
        self.rx_data
    }

    /// Bytes lost because a new frame arrived before the previous one was read.
    pub fn overruns(&self) -> u64 {
        self.overruns
    }

    /// Frames discarded for a low stop bit.
    pub fn framing_errors(&self) -> u64 {
        self.rx.framing_errors()
    }
}

impl Device for Uart {
    fn name(&self) -> &str {
        "UART"
    }

    fn read_u32(&mut self, offset: u32) -> u32 {
        match offset {
            REG_TX => u32::from(self.tx.busy()) * TX_BUSY,
            REG_RX => match self.rx_data.take() {
                Some(byte) => RX_VALID | u32::from(byte),
                None => 0,
            },
            _ => 0,
        }
    }

    fn write_u32(&mut self, offset: u32, val: u32, mask: u8) {
        if offset != REG_TX || mask & 1 == 0 {
            return;
        }
        let byte = val as u8;
        if self.tx.start(byte) {
            tracing::debug!(byte, "UART transmit started");
        } else {
            tracing::debug!(byte, "UART transmitter busy, byte dropped");
        }
    }

    fn tick(&mut self, pins: &Pins) {
        self.tx.tick();
        if let Some(byte) = self.rx.sample(pins.uart_rx) {
            if self.rx_data.replace(byte).is_some() {
                self.overruns += 1;
                tracing::warn!(byte, "UART receive overrun");
            }
            tracing::debug!(byte, "UART byte received");
        }
    }

    fn reset(&mut self) {
        self.tx.reset();
        self.rx.reset();
        self.rx_data = None;
    }
}
