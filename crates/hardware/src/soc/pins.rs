//! Core Boundary Pins.
//!
//! The externally visible signals of the core besides the clock: the inputs
//! sampled at every edge and the registered outputs driven after it.

/// Input pins sampled at each clock edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pins {
    /// Synchronous reset, highest priority.
    pub reset: bool,
    /// Serial receive line (idle high).
    pub uart_rx: bool,
    /// General-purpose inputs (low 4 bits used).
    pub gpio_in: u8,
}

impl Default for Pins {
    fn default() -> Self {
        Self {
            reset: false,
            uart_rx: true,
            gpio_in: 0,
        }
    }
}

/// Output pins driven by the core's registers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PinsOut {
    /// General-purpose outputs (low 4 bits used).
    pub gpio_out: u8,
    /// Serial transmit line (idle high).
    pub uart_tx: bool,
}

impl Default for PinsOut {
    fn default() -> Self {
        Self {
            gpio_out: 0,
            uart_tx: true,
        }
    }
}
