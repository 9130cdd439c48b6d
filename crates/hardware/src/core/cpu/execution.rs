//! Main Execution Cycle.
//!
//! This module implements one clock edge of the core. It performs the following:
//! 1. **Reset:** An asserted reset pin overrides everything else for the cycle.
//! 2. **Stage Evaluation:** Write-Back, Execute, and Fetch are computed from the
//!    state at the start of the cycle; Write-Back first so its result can be forwarded.
//! 3. **Atomic Commit:** Register write, memory and peripheral edges, PC, and latches
//!    are all updated together, so no stage observes another's next-state value.
//! 4. **Accounting:** Probe capture and statistics.

use super::{Core, Probe};
use crate::common::constants::RESET_PC;
use crate::core::pipeline::latches::LoadSource;
use crate::core::pipeline::stages::{execute_stage, fetch_stage, wb_stage};
use crate::core::pipeline::traits::PipelineLatch;
use crate::soc::pins::{Pins, PinsOut};

impl Core {
    /// Advances the core by one clock edge.
    ///
    /// # Arguments
    ///
    /// * `pins` - Input pin levels sampled at this edge.
    ///
    /// # Returns
    ///
    /// The output pin levels after the edge.
    pub fn step(&mut self, pins: &Pins) -> PinsOut {
        self.stats.cycles += 1;
        if pins.reset {
            self.reset_cycle();
            return self.bus.pins_out();
        }

        let mem_word = self.bus.mem_q();
        let mmio_word = self.bus.mmio_q();
        let inst = self.imem.q();

        let wb = wb_stage(&self.ex_wb, mem_word, mmio_word);
        let ex = execute_stage(
            &self.if_ex,
            inst,
            &self.regs,
            wb.reg_write,
            self.bus.decoder(),
            self.policy,
        );
        let fetch = fetch_stage(self.pc, ex.redirect, self.halting || ex.halt);

        self.probe = Probe {
            fetch_addr: self.pc,
            fetch_inst: inst,
            data_we: ex.bus.mask,
            data_addr: ex.bus.addr,
            data_rdata: match self.ex_wb.load {
                Some(load) if self.ex_wb.valid && load.source == LoadSource::Mmio => mmio_word,
                _ => mem_word,
            },
        };

        if self.if_ex.valid {
            let ctrl = ex.ctrl;
            self.stats.inst_load += u64::from(ctrl.mem_read);
            self.stats.inst_store += u64::from(ctrl.mem_write);
            self.stats.mmio_accesses += u64::from(ex.bus.route.target.is_mmio());
            self.stats.redirects += u64::from(ex.redirect.is_some());
            self.stats.illegal += u64::from(ctrl.illegal);
        }
        if wb.retired {
            self.stats.instructions_retired += 1;
        } else {
            self.stats.bubbles += 1;
        }

        // Edge.
        let retiring_pc = self.ex_wb.pc;
        if let Some(write) = wb.reg_write {
            self.regs.write(write.rd, write.value);
        }
        self.bus.clock(&ex.bus, pins);
        self.imem.clock(self.pc, 0, 0);
        self.pc = fetch.next_pc;
        self.if_ex = fetch.entry;
        self.ex_wb = ex.next;
        self.halting |= ex.halt;
        if let Some(fault) = wb.fault {
            self.stats.faults += 1;
            self.fault = self.fault.or(Some(fault));
        }
        if wb.halt && !self.halted {
            self.halted = true;
            tracing::info!(pc = retiring_pc, cycle = self.stats.cycles, "core halted");
        }

        self.bus.pins_out()
    }

    /// Reset has priority over every other input: the PC returns to the reset
    /// vector, both latches become bubbles, registers and peripherals clear, and
    /// the halt state is released. Memory contents are kept.
    fn reset_cycle(&mut self) {
        self.stats.reset_cycles += 1;
        self.probe = Probe {
            fetch_addr: RESET_PC,
            fetch_inst: self.imem.q(),
            data_rdata: self.bus.mem_q(),
            ..Probe::default()
        };

        self.pc = RESET_PC;
        self.if_ex.flush();
        self.ex_wb.flush();
        self.regs.clear();
        self.bus.reset();
        self.imem.clock(RESET_PC, 0, 0);
        self.halting = false;
        self.halted = false;
        self.fault = None;
    }
}
