//! Device trait for memory-mapped I/O.
//!
//! This module defines the `Device` trait implemented by the peripherals behind the
//! MMIO window. It provides:
//! 1. **Identification:** `name` for logging.
//! 2. **Access:** Word read/write at device-relative register offsets, with a byte-lane
//!    write-enable mask so sub-word stores only touch the bytes they cover.
//! 3. **Lifecycle:** `tick` once per clock edge with the boundary pins, and `reset`.

use std::fmt;

use crate::soc::pins::Pins;

/// Trait for memory-mapped I/O devices attached to the data bus.
pub trait Device: fmt::Debug {
    /// Returns a short name for this device (e.g., `"GPIO"`, `"UART"`).
    fn name(&self) -> &str;

    /// Reads the register at the given device-relative offset.
    ///
    /// Called only for loads; reads may have side effects (e.g., consuming a
    /// received byte).
    fn read_u32(&mut self, offset: u32) -> u32;

    /// Writes the register at the given offset.
    ///
    /// # Arguments
    ///
    /// * `offset` - Device-relative register offset.
    /// * `val` - Lane-aligned store data.
    /// * `mask` - 4-bit byte-lane write-enable.
    fn write_u32(&mut self, offset: u32, val: u32, mask: u8);

    /// Advances device state by one clock edge, sampling the input pins.
    fn tick(&mut self, _pins: &Pins) {}

    /// Returns the device to its reset state.
    fn reset(&mut self);
}
