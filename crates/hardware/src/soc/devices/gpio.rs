//! General-Purpose I/O.
//!
//! A 4-bit output register, readable back as a mirror, and 4 input pins
//! sampled at every clock edge. Stores to the input register are ignored.

use crate::common::constants::GPIO_MASK;
use crate::soc::devices::Device;
use crate::soc::pins::Pins;

/// Output register offset.
pub const REG_OUT: u32 = 0x0;
/// Input register offset.
pub const REG_IN: u32 = 0x4;

/// GPIO device.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gpio {
    out: u8,
    input: u8,
}

impl Gpio {
    /// Creates a GPIO block with outputs low.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current level of the output pins.
    pub fn output(&self) -> u8 {
        self.out
    }

    /// Input pin levels sampled on the last edge.
    pub fn input(&self) -> u8 {
        self.input
    }
}

impl Device for Gpio {
    fn name(&self) -> &str {
        "GPIO"
    }

    fn read_u32(&mut self, offset: u32) -> u32 {
        match offset {
            REG_OUT => u32::from(self.out),
            REG_IN => u32::from(self.input),
            _ => 0,
        }
    }

    fn write_u32(&mut self, offset: u32, val: u32, mask: u8) {
        if offset == REG_OUT && mask & 1 != 0 {
            self.out = val as u8 & GPIO_MASK;
            tracing::debug!(gpio_out = self.out, "GPIO output updated");
        }
    }

    fn tick(&mut self, pins: &Pins) {
        self.input = pins.gpio_in & GPIO_MASK;
    }

    fn reset(&mut self) {
        self.out = 0;
    }
}
