//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the entry types carried through the 3-stage pipeline:
//! Fetch → Execute → Write-Back.
//!
//! 1. **Instruction Flow:** The PC travels with each entry; the instruction word itself
//!    is the instruction memory's registered output while the entry sits in Execute.
//! 2. **Deferred Loads:** Load entries carry the byte-select information Write-Back
//!    needs to merge the lane outputs one cycle after the address was issued.
//! 3. **Halt and Fault Propagation:** `ecall`/`ebreak` and misaligned-access faults
//!    travel to Write-Back, where they take architectural effect.

use crate::common::error::AccessFault;
use crate::core::pipeline::signals::MemWidth;
use crate::core::pipeline::traits::PipelineLatch;

/// Entry in the IF/EX pipeline latch (Fetch to Execute stage).
///
/// The raw encoding is not stored: instruction memory has one cycle of
/// address-to-data latency, so the word fetched for `pc` is the memory's output
/// in the cycle this entry is in Execute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IfExEntry {
    /// Program counter of the fetched instruction.
    pub pc: u32,
    /// `false` for a bubble (reset, squashed fetch, or halted front end).
    pub valid: bool,
}

/// Where the data for a load comes from in Write-Back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadSource {
    /// Merged output of the four data-memory byte lanes.
    Memory,
    /// Registered value of a memory-mapped peripheral register.
    Mmio,
}

/// Load parameters carried from Execute to Write-Back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadOp {
    /// Access width.
    pub width: MemWidth,
    /// Sign-extend the selected byte or half-word.
    pub signed: bool,
    /// Low two bits of the effective address (byte offset within the word).
    pub offset: u32,
    /// Data source selected by the address decoder.
    pub source: LoadSource,
}

/// Entry in the EX/WB pipeline latch (Execute to Write-Back stage).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExWbEntry {
    /// `false` for a bubble.
    pub valid: bool,
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// Destination register index; 0 when the instruction writes no register.
    pub rd: usize,
    /// ALU or link result (unused for loads).
    pub result: u32,
    /// Pending load, if the instruction reads memory or a peripheral.
    pub load: Option<LoadOp>,
    /// Instruction is `ecall`/`ebreak`.
    pub halt: bool,
    /// Misaligned access detected in Execute.
    pub fault: Option<AccessFault>,
}

impl PipelineLatch for IfExEntry {
    fn flush(&mut self) {
        *self = Self::default();
    }

    fn is_empty(&self) -> bool {
        !self.valid
    }
}

impl PipelineLatch for ExWbEntry {
    fn flush(&mut self) {
        *self = Self::default();
    }

    fn is_empty(&self) -> bool {
        !self.valid
    }
}
