//! Byte-Lane Word Memory.
//!
//! This module composes four [`ByteLane`] banks into one 32-bit word memory. It provides:
//! 1. **Lanes:** Lane `k` holds byte `k` of every little-endian word.
//! 2. **Clocked access:** One edge writes any subset of lanes (4-bit write-enable)
//!    and latches the word address in all four.
//! 3. **Backdoor access:** Image loading and direct word peek/poke for harnesses.
//!
//! The same structure backs both the data memory and the instruction memory.

/// A single byte-lane bank.
pub mod lane;

pub use self::lane::ByteLane;
use crate::common::constants::LANE_COUNT;

/// Four byte lanes forming a word-addressed memory with per-byte write-enables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaneMemory {
    lanes: [ByteLane; LANE_COUNT],
}

impl LaneMemory {
    /// Creates a zero-filled memory of `depth` words.
    ///
    /// `depth` must be a non-zero power of two.
    pub fn new(depth: usize) -> Self {
        Self {
            lanes: std::array::from_fn(|_| ByteLane::new(depth)),
        }
    }

    /// Number of words (cells per lane).
    pub fn depth(&self) -> usize {
        self.lanes[0].depth()
    }

    /// Capacity in bytes.
    pub fn capacity_bytes(&self) -> usize {
        self.depth() * LANE_COUNT
    }

    /// Word index selected by a byte address, masked to the depth.
    pub fn word_index(&self, addr: u32) -> usize {
        (addr >> 2) as usize & (self.depth() - 1)
    }

    /// Applies one clock edge to all four lanes.
    ///
    /// # Arguments
    ///
    /// * `addr` - Byte address; bits `[1:0]` are ignored.
    /// * `mask` - Bit `k` enables a write of byte `k` of `data` into lane `k`.
    /// * `data` - Lane-aligned write data.
    pub fn clock(&mut self, addr: u32, mask: u8, data: u32) {
        let idx = self.word_index(addr);
        for (k, lane) in self.lanes.iter_mut().enumerate() {
            lane.clock(idx, mask & (1 << k) != 0, (data >> (8 * k)) as u8);
        }
    }

    /// The four lane outputs merged into a little-endian word.
    pub fn q(&self) -> u32 {
        self.lanes
            .iter()
            .enumerate()
            .fold(0, |word, (k, lane)| word | u32::from(lane.q()) << (8 * k))
    }

    /// Reads the word containing `addr` without clocking.
    pub fn peek_word(&self, addr: u32) -> u32 {
        let idx = self.word_index(addr);
        self.lanes
            .iter()
            .enumerate()
            .fold(0, |word, (k, lane)| word | u32::from(lane.peek(idx)) << (8 * k))
    }

    /// Writes the word containing `addr` without clocking.
    pub fn poke_word(&mut self, addr: u32, value: u32) {
        let idx = self.word_index(addr);
        for (k, lane) in self.lanes.iter_mut().enumerate() {
            lane.poke(idx, (value >> (8 * k)) as u8);
        }
    }

    /// Read access to one lane.
    pub fn lane(&self, k: usize) -> &ByteLane {
        &self.lanes[k % LANE_COUNT]
    }

    /// Loads a per-lane byte image into lane `k`.
    pub fn load_lane(&mut self, k: usize, image: &[u8]) {
        self.lanes[k % LANE_COUNT].load(image);
    }

    /// Loads a word image starting at word 0, splitting each word across the lanes.
    pub fn load_words(&mut self, words: &[u32]) {
        for (k, lane) in self.lanes.iter_mut().enumerate() {
            let bytes: Vec<u8> = words.iter().map(|w| (w >> (8 * k)) as u8).collect();
            lane.load(&bytes);
        }
    }
}
