//! Integer Register File.
//!
//! Holds the 32 RV32I general-purpose registers. Register `x0` is hardwired to
//! zero: reads return 0 and writes are discarded.

use super::constants::REG_COUNT;
use crate::isa::abi::reg_name;

/// The 32 x 32-bit general-purpose register file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    regs: [u32; REG_COUNT],
}

impl RegisterFile {
    /// Creates a register file with every register cleared.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a general-purpose register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Register `x0` always returns 0.
    #[inline]
    pub fn read(&self, idx: usize) -> u32 {
        if idx == 0 {
            0
        } else {
            self.regs[idx & (REG_COUNT - 1)]
        }
    }

    /// Writes a general-purpose register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Writes to `x0` are ignored.
    /// * `val` - The value to write.
    #[inline]
    pub fn write(&mut self, idx: usize, val: u32) {
        if idx != 0 {
            self.regs[idx & (REG_COUNT - 1)] = val;
        }
    }

    /// Clears every register to zero.
    pub fn clear(&mut self) {
        self.regs = [0; REG_COUNT];
    }

    /// Logs the register contents at `debug` level.
    pub fn dump(&self) {
        for (i, chunk) in self.regs.chunks(4).enumerate() {
            let line: Vec<String> = chunk
                .iter()
                .enumerate()
                .map(|(j, v)| format!("{:>4}={v:#010x}", reg_name(i * 4 + j)))
                .collect();
            tracing::debug!("{}", line.join(" "));
        }
    }
}
