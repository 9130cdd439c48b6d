//! System-wide constants.
//!
//! Geometry of the byte-lane memories, the reset vector, and the layout of the
//! memory-mapped I/O window.

/// Program counter value after reset.
pub const RESET_PC: u32 = 0;

/// Size of every instruction in bytes (RV32I has no compressed forms here).
pub const INSTRUCTION_SIZE: u32 = 4;

/// Mask that forces an address down to word alignment.
pub const WORD_ALIGN_MASK: u32 = !3;

/// Number of byte lanes making up one 32-bit word.
pub const LANE_COUNT: usize = 4;

/// Mask selecting the lane (byte position) from a byte address.
pub const LANE_SELECT_MASK: u32 = 0b11;

/// Write-enable mask asserting every lane.
pub const ALL_LANES: u8 = 0b1111;

/// Default number of byte cells per lane (16 KiB per lane, 64 KiB total).
pub const DEFAULT_LANE_DEPTH: usize = 16384;

/// Number of general-purpose registers.
pub const REG_COUNT: usize = 32;

/// Width of the MMIO window in bytes (four word-sized registers).
pub const MMIO_WINDOW_BYTES: u32 = 16;

/// Number of GPIO pins in each direction.
pub const GPIO_WIDTH: u32 = 4;

/// Mask selecting the implemented GPIO pins.
pub const GPIO_MASK: u8 = (1 << GPIO_WIDTH) - 1;
