//! Byte-Lane Memory Bank.
//!
//! One byte-wide, word-indexed synchronous RAM: on the clock edge the addressed
//! cell is written when write-enable is asserted, and the address is always
//! latched into a register. The read output is the cell at the latched address,
//! so a read issued in one cycle is visible in the next.

/// A synchronous byte-wide RAM with a registered read address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ByteLane {
    cells: Vec<u8>,
    addr_reg: usize,
}

impl ByteLane {
    /// Creates a zero-filled lane.
    ///
    /// `depth` must be a non-zero power of two; addresses are masked to it.
    pub fn new(depth: usize) -> Self {
        debug_assert!(depth.is_power_of_two());
        Self {
            cells: vec![0; depth],
            addr_reg: 0,
        }
    }

    /// Number of cells in the lane.
    pub fn depth(&self) -> usize {
        self.cells.len()
    }

    /// Applies one clock edge: write (if enabled), then latch the address.
    ///
    /// # Arguments
    ///
    /// * `addr` - Word-line index, masked to the lane depth.
    /// * `we` - Write-enable.
    /// * `data` - Byte written when `we` is set.
    pub fn clock(&mut self, addr: usize, we: bool, data: u8) {
        let idx = addr & (self.cells.len() - 1);
        if we {
            self.cells[idx] = data;
        }
        self.addr_reg = idx;
    }

    /// Read output: the cell at the address latched on the last edge.
    #[inline]
    pub fn q(&self) -> u8 {
        self.cells[self.addr_reg]
    }

    /// Reads a cell directly, bypassing the address register.
    pub fn peek(&self, addr: usize) -> u8 {
        self.cells[addr & (self.cells.len() - 1)]
    }

    /// Writes a cell directly, bypassing the clock.
    pub fn poke(&mut self, addr: usize, data: u8) {
        let idx = addr & (self.cells.len() - 1);
        self.cells[idx] = data;
    }

    /// Copies an initial image into the lane starting at cell 0.
    ///
    /// Bytes beyond the lane depth are ignored; callers check capacity first.
    pub fn load(&mut self, image: &[u8]) {
        let n = image.len().min(self.cells.len());
        self.cells[..n].copy_from_slice(&image[..n]);
    }
}
