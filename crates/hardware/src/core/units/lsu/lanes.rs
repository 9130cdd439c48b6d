//! Byte-lane selection.
//!
//! The data memory is four byte lanes; lane `k` holds byte `k` of every
//! little-endian word. A store asserts write-enable on the lanes its bytes land
//! in and drives its data replicated across the word, so every enabled lane sees
//! the right byte. A load reads all four lanes and Write-Back selects the bytes
//! with the same low address bits.

use crate::common::constants::{ALL_LANES, LANE_SELECT_MASK};
use crate::core::pipeline::signals::MemWidth;

/// Write-enable mask and data driven onto the lanes for one store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StoreLanes {
    /// 4-bit write-enable mask, bit `k` enables lane `k`.
    pub mask: u8,
    /// Word driven on the lane data inputs.
    pub data: u32,
}

/// Computes the lane write-enable mask and lane-aligned data for a store.
///
/// `addr` must already satisfy the alignment policy; only its low two bits
/// are used.
///
/// # Examples
///
/// ```
/// use rvpipe_core::core::units::lsu::lanes::store_lanes;
/// use rvpipe_core::core::pipeline::signals::MemWidth;
///
/// let sb = store_lanes(MemWidth::Byte, 0x103, 0xAB);
/// assert_eq!(sb.mask, 0b1000);
/// assert_eq!(sb.data >> 24, 0xAB);
///
/// let sh = store_lanes(MemWidth::Half, 0x102, 0x1234);
/// assert_eq!(sh.mask, 0b1100);
/// assert_eq!(sh.data >> 16, 0x1234);
/// ```
pub fn store_lanes(width: MemWidth, addr: u32, data: u32) -> StoreLanes {
    let offset = addr & LANE_SELECT_MASK;
    match width {
        MemWidth::Byte => StoreLanes {
            mask: 1 << offset,
            data: (data & 0xFF).wrapping_mul(0x0101_0101),
        },
        MemWidth::Half => {
            let half = data & 0xFFFF;
            StoreLanes {
                mask: 0b0011 << (offset & 0b10),
                data: half | (half << 16),
            }
        }
        MemWidth::Word => StoreLanes {
            mask: ALL_LANES,
            data,
        },
    }
}

/// Selects and extends a load result from the merged lane word.
///
/// # Arguments
///
/// * `width` - Access width.
/// * `signed` - Sign-extend (`lb`/`lh`) rather than zero-extend (`lbu`/`lhu`).
/// * `offset` - Low two bits of the load address.
/// * `word` - The four lane outputs merged into a little-endian word.
pub fn extract_load(width: MemWidth, signed: bool, offset: u32, word: u32) -> u32 {
    let offset = offset & LANE_SELECT_MASK;
    match width {
        MemWidth::Byte => {
            let byte = (word >> (8 * offset)) as u8;
            if signed {
                byte as i8 as i32 as u32
            } else {
                u32::from(byte)
            }
        }
        MemWidth::Half => {
            let half = (word >> (8 * (offset & 0b10))) as u16;
            if signed {
                half as i16 as i32 as u32
            } else {
                u32::from(half)
            }
        }
        MemWidth::Word => word,
    }
}
