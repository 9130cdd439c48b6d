//! Simulation statistics collection and reporting.
//!
//! This module tracks the per-run counters of the pipelined core. It provides:
//! 1. **Cycle and CPI:** Total cycles, reset cycles, retired instructions, and derived CPI.
//! 2. **Instruction mix:** Loads, stores, peripheral accesses, and illegal encodings.
//! 3. **Pipeline behaviour:** Bubbles in Write-Back and taken redirects.
//! 4. **Faults:** Misaligned accesses suppressed under the faulting policy.

use std::fmt;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimStats {
    /// Total clock edges, including those with reset asserted.
    pub cycles: u64,
    /// Clock edges with reset asserted.
    pub reset_cycles: u64,
    /// Number of instructions retired by Write-Back.
    pub instructions_retired: u64,
    /// Cycles out of reset in which Write-Back held no instruction.
    pub bubbles: u64,

    /// Count of load instructions executed.
    pub inst_load: u64,
    /// Count of store instructions executed.
    pub inst_store: u64,
    /// Loads and stores routed to a memory-mapped peripheral.
    pub mmio_accesses: u64,
    /// Taken branches and jumps (each costs one fetch bubble).
    pub redirects: u64,
    /// Encodings retired as no-ops because they are not implemented.
    pub illegal: u64,
    /// Misaligned accesses suppressed by the faulting policy.
    pub faults: u64,
}

impl SimStats {
    /// Cycles spent out of reset.
    pub fn active_cycles(&self) -> u64 {
        self.cycles - self.reset_cycles
    }

    /// Average cycles per retired instruction, measured out of reset.
    ///
    /// Returns `None` before the first instruction retires.
    pub fn cpi(&self) -> Option<f64> {
        if self.instructions_retired == 0 {
            None
        } else {
            Some(self.active_cycles() as f64 / self.instructions_retired as f64)
        }
    }
}

impl fmt::Display for SimStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "==========================================================")?;
        writeln!(f, "PIPELINE SIMULATION STATISTICS")?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "sim_cycles               {}", self.cycles)?;
        writeln!(f, "sim_reset_cycles         {}", self.reset_cycles)?;
        writeln!(f, "sim_insts                {}", self.instructions_retired)?;
        match self.cpi() {
            Some(cpi) => writeln!(f, "sim_cpi                  {cpi:.4}")?,
            None => writeln!(f, "sim_cpi                  n/a")?,
        }
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "PIPELINE")?;
        writeln!(f, "  wb.bubbles             {}", self.bubbles)?;
        writeln!(f, "  ex.redirects           {}", self.redirects)?;
        writeln!(f, "INSTRUCTION MIX")?;
        writeln!(f, "  op.load                {}", self.inst_load)?;
        writeln!(f, "  op.store               {}", self.inst_store)?;
        writeln!(f, "  op.mmio                {}", self.mmio_accesses)?;
        writeln!(f, "  op.illegal             {}", self.illegal)?;
        write!(f, "  mem.faults             {}", self.faults)
    }
}
