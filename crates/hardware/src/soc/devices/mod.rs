//! Memory-Mapped IO Devices.
//!
//! The peripherals reachable through the MMIO window: general-purpose I/O and a
//! bit-level serial port.

/// 4-bit general-purpose input/output.
pub mod gpio;

/// 8N1 serial port with a fixed divisor.
pub mod uart;

pub use gpio::Gpio;
pub use uart::{SerialReceiver, SerialTransmitter, Uart};

pub use crate::soc::traits::Device;
