//! Data Hazard Forwarding.
//!
//! In the 3-stage pipeline the only in-flight producer an Execute instruction can
//! depend on is the instruction in Write-Back. Its result (including load data,
//! which Write-Back merges combinationally from the lane outputs) is bypassed to
//! Execute in the same cycle, so the pipeline never stalls on a data hazard.

use crate::common::reg::RegisterFile;

/// Register write performed by Write-Back this cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegWrite {
    /// Destination register (never 0).
    pub rd: usize,
    /// Value written.
    pub value: u32,
}

/// Reads a source register, forwarding the value Write-Back commits this cycle.
///
/// # Arguments
///
/// * `regs` - Register file as of the start of the cycle.
/// * `wb` - The register write Write-Back performs this cycle, if any.
/// * `src` - Source register index.
///
/// # Returns
///
/// The most recent value of `src`.
pub fn forward_rs(regs: &RegisterFile, wb: Option<RegWrite>, src: usize) -> u32 {
    match wb {
        Some(write) if src != 0 && write.rd == src => {
            tracing::trace!(reg = src, value = write.value, "forward from WB");
            write.value
        }
        _ => regs.read(src),
    }
}
