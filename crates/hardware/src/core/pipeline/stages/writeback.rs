//! Writeback (WB) Stage.
//!
//! This module implements the final stage of the pipeline. It merges load data
//! from the byte lanes (or the registered peripheral read), selects and extends
//! sub-word values with the same low address bits the store path uses, and
//! commits the destination register. It never stalls.

use crate::common::error::AccessFault;
use crate::core::pipeline::hazards::RegWrite;
use crate::core::pipeline::latches::{ExWbEntry, LoadSource};
use crate::core::units::lsu::Lsu;
use crate::isa::disasm::disassemble;

/// Result of the writeback stage for one cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WbOutput {
    /// Register write committed at the edge (also forwarded to Execute).
    pub reg_write: Option<RegWrite>,
    /// An instruction retired this cycle.
    pub retired: bool,
    /// The retiring instruction was `ecall`/`ebreak` or faulted.
    pub halt: bool,
    /// Access fault carried by the retiring instruction.
    pub fault: Option<AccessFault>,
}

/// Executes the writeback stage.
///
/// # Arguments
///
/// * `entry` - EX/WB latch contents.
/// * `mem_word` - Data-memory lane outputs merged into a word.
/// * `mmio_word` - Peripheral register value read on the last edge.
pub fn wb_stage(entry: &ExWbEntry, mem_word: u32, mmio_word: u32) -> WbOutput {
    if !entry.valid {
        return WbOutput::default();
    }

    let value = match entry.load {
        Some(load) => {
            let word = match load.source {
                LoadSource::Memory => mem_word,
                LoadSource::Mmio => mmio_word,
            };
            Lsu::load(load.width, load.signed, load.offset, word)
        }
        None => entry.result,
    };

    tracing::debug!(
        pc = entry.pc,
        inst = entry.inst,
        "WB {}",
        disassemble(entry.inst, entry.pc)
    );

    WbOutput {
        reg_write: (entry.rd != 0).then_some(RegWrite {
            rd: entry.rd,
            value,
        }),
        retired: true,
        halt: entry.halt,
        fault: entry.fault,
    }
}
