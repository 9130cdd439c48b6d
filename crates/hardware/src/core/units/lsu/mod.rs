//! Load/Store Unit (LSU).
//!
//! This module holds the byte-lane logic shared by the store path in Execute and
//! the load path in Write-Back. It includes:
//! - [`lanes`]: write-enable masks, lane-aligned store data, and load extraction.
//! - [`unaligned`]: natural-alignment checks and the misaligned-access policy.

/// Lane selection for stores and byte/half-word extraction for loads.
pub mod lanes;

/// Alignment checking and misaligned-access policy.
pub mod unaligned;

use crate::core::pipeline::signals::MemWidth;

pub use self::lanes::StoreLanes;

/// Load/Store Unit (LSU) for byte-lane memory operations.
#[derive(Debug)]
pub struct Lsu;

impl Lsu {
    /// Computes the write-enable mask and lane-aligned data for a store.
    ///
    /// Delegates to [`lanes::store_lanes`].
    pub fn store(width: MemWidth, addr: u32, data: u32) -> StoreLanes {
        lanes::store_lanes(width, addr, data)
    }

    /// Selects and extends the loaded value from a merged lane word.
    ///
    /// Delegates to [`lanes::extract_load`].
    pub fn load(width: MemWidth, signed: bool, offset: u32, word: u32) -> u32 {
        lanes::extract_load(width, signed, offset, word)
    }
}
