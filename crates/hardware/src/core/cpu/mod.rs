//! Core Definition and Initialization.
//!
//! This module defines the central `Core` structure, which holds the entire state of
//! the processor and its memories. It coordinates the following:
//! 1. **State Management:** Registers, program counter, and the halt/fault flags.
//! 2. **Pipeline Control:** The IF/EX and EX/WB latches of the three-stage pipeline.
//! 3. **Memory Integration:** Instruction memory and the data-bus interconnect.
//! 4. **Observability:** A per-cycle [`Probe`] of the internal buses and run statistics.

/// Clock-edge stepping of the pipeline.
pub mod execution;

use crate::common::RegisterFile;
use crate::common::error::AccessFault;
use crate::config::{Config, MisalignedPolicy};
use crate::core::pipeline::latches::{ExWbEntry, IfExEntry};
use crate::soc::interconnect::Interconnect;
use crate::soc::memory::LaneMemory;
use crate::soc::pins::PinsOut;
use crate::stats::SimStats;

/// Internal bus values observed during one cycle, before the edge commits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Probe {
    /// Address presented to instruction memory.
    pub fetch_addr: u32,
    /// Instruction memory output (the word entering Execute).
    pub fetch_inst: u32,
    /// Data-memory write-enable mask driven by Execute.
    pub data_we: u8,
    /// Data-bus address driven by Execute.
    pub data_addr: u32,
    /// Read data seen by Write-Back (lane word, or the peripheral value for an MMIO load).
    pub data_rdata: u32,
}

/// Main core structure containing all processor state and components.
///
/// The core is stepped one clock edge at a time with [`Core::step`]; every state
/// element is updated atomically from a snapshot of the previous cycle.
#[derive(Debug)]
pub struct Core {
    /// General-purpose registers.
    pub regs: RegisterFile,
    /// Program counter presented to instruction memory this cycle.
    pub pc: u32,
    /// IF/EX latch.
    pub if_ex: IfExEntry,
    /// EX/WB latch.
    pub ex_wb: ExWbEntry,
    /// Instruction memory (read-only for the core).
    pub imem: LaneMemory,
    /// Data memory and memory-mapped peripherals.
    pub bus: Interconnect,
    /// Performance statistics.
    pub stats: SimStats,
    policy: MisalignedPolicy,
    halting: bool,
    halted: bool,
    fault: Option<AccessFault>,
    probe: Probe,
}

impl Core {
    /// Creates a core with zero-filled memories sized and mapped per `config`.
    ///
    /// Load images into [`Core::imem`] and `bus.dmem` afterwards (see
    /// [`crate::sim::loader`]). The core starts in the reset state.
    pub fn new(config: &Config) -> Self {
        let depth = config.memory.lane_depth;
        Self::with_memories(LaneMemory::new(depth), LaneMemory::new(depth), config)
    }

    /// Creates a core around preloaded memories.
    pub fn with_memories(imem: LaneMemory, dmem: LaneMemory, config: &Config) -> Self {
        Self {
            regs: RegisterFile::new(),
            pc: crate::common::constants::RESET_PC,
            if_ex: IfExEntry::default(),
            ex_wb: ExWbEntry::default(),
            imem,
            bus: Interconnect::new(dmem, config.mmio.base, config.mmio.uart_divisor),
            stats: SimStats::default(),
            policy: config.memory.misaligned,
            halting: false,
            halted: false,
            fault: None,
            probe: Probe::default(),
        }
    }

    /// Whether an `ecall`/`ebreak` (or faulting access) has retired.
    pub fn halted(&self) -> bool {
        self.halted
    }

    /// First access fault recorded since reset.
    pub fn fault(&self) -> Option<AccessFault> {
        self.fault
    }

    /// Misaligned-access policy in force.
    pub fn policy(&self) -> MisalignedPolicy {
        self.policy
    }

    /// Internal bus values of the most recent cycle.
    pub fn probe(&self) -> Probe {
        self.probe
    }

    /// Current level of the output pins.
    pub fn pins_out(&self) -> PinsOut {
        self.bus.pins_out()
    }

    /// Logs the PC, latches, and registers at `debug` level.
    pub fn dump_state(&self) {
        tracing::debug!(
            pc = self.pc,
            if_ex = ?self.if_ex,
            ex_wb_valid = self.ex_wb.valid,
            halted = self.halted,
            "core state"
        );
        self.regs.dump();
    }
}
