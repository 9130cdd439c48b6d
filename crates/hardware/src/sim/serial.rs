//! Serial Line Helpers.
//!
//! Harness-side counterparts of the core's UART: [`SerialDriver`] turns queued
//! bytes into an 8N1 bit stream for the core's receive pin, and [`SerialMonitor`]
//! decodes the core's transmit pin back into bytes. Both use the same line-level
//! transmitter and receiver as the UART itself.

use std::collections::VecDeque;

use crate::soc::devices::uart::{SerialReceiver, SerialTransmitter};

/// Drives bytes onto a serial line.
#[derive(Clone, Debug)]
pub struct SerialDriver {
    tx: SerialTransmitter,
    queue: VecDeque<u8>,
}

impl SerialDriver {
    /// Creates an idle driver with the given clock cycles per bit.
    pub fn new(divisor: u32) -> Self {
        Self {
            tx: SerialTransmitter::new(divisor),
            queue: VecDeque::new(),
        }
    }

    /// Queues bytes for transmission.
    pub fn send(&mut self, bytes: &[u8]) {
        self.queue.extend(bytes);
        self.start_next();
    }

    /// Line level to drive this cycle.
    pub fn line(&self) -> bool {
        self.tx.line()
    }

    /// Whether bytes remain to be sent or a frame is in progress.
    pub fn busy(&self) -> bool {
        self.tx.busy() || !self.queue.is_empty()
    }

    /// Advances one clock edge.
    pub fn tick(&mut self) {
        self.tx.tick();
        self.start_next();
    }

    fn start_next(&mut self) {
        if self.tx.busy() {
            return;
        }
        if let Some(byte) = self.queue.pop_front() {
            let _ = self.tx.start(byte);
        }
    }
}

/// Decodes bytes from a sampled serial line.
#[derive(Clone, Debug)]
pub struct SerialMonitor {
    rx: SerialReceiver,
    received: Vec<u8>,
}

impl SerialMonitor {
    /// Creates a monitor with the given clock cycles per bit.
    pub fn new(divisor: u32) -> Self {
        Self {
            rx: SerialReceiver::new(divisor),
            received: Vec::new(),
        }
    }

    /// Samples the line for one clock edge.
    pub fn sample(&mut self, line: bool) {
        if let Some(byte) = self.rx.sample(line) {
            tracing::debug!(byte, "serial monitor received byte");
            self.received.push(byte);
        }
    }

    /// Bytes decoded so far.
    pub fn received(&self) -> &[u8] {
        &self.received
    }

    /// Frames discarded for a low stop bit.
    pub fn framing_errors(&self) -> u64 {
        self.rx.framing_errors()
    }
}
