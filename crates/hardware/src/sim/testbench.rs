//! Testbench: clock, reset, pins, and observers around the core.
//!
//! This avoids each caller re-implementing the run loop. The testbench owns the
//! core and its boundary pins and, per clock edge:
//! 1. Drives the serial receive pin from an optional [`SerialDriver`].
//! 2. Steps the core.
//! 3. Samples a [`TraceRecord`] and delivers it to every [`TraceSink`].
//! 4. Decodes the serial transmit pin with a [`SerialMonitor`].
//!
//! [`Testbench::run`] holds reset for the configured number of cycles, releases it,
//! and runs until the cycle budget is spent or the core halts.

use std::fmt;

use crate::common::error::{AccessFault, SimError};
use crate::config::{Config, GeneralConfig};
use crate::core::Core;
use crate::sim::loader;
use crate::sim::serial::{SerialDriver, SerialMonitor};
use crate::sim::trace::{TraceRecord, TraceSink};
use crate::soc::pins::{Pins, PinsOut};
use crate::stats::SimStats;

/// Outcome of a testbench run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    /// Clock edges simulated, reset included.
    pub cycles: u64,
    /// The core halted before the budget ran out.
    pub halted: bool,
    /// First access fault, if any.
    pub fault: Option<AccessFault>,
    /// Output pins after the last edge.
    pub pins_out: PinsOut,
    /// Bytes decoded from the serial transmit pin.
    pub uart_output: Vec<u8>,
    /// Core statistics.
    pub stats: SimStats,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.stats)?;
        writeln!(f, "----------------------------------------------------------")?;
        let status = if self.halted { "halted" } else { "budget exhausted" };
        writeln!(f, "run.status               {status}")?;
        if let Some(fault) = &self.fault {
            writeln!(f, "run.fault                {fault}")?;
        }
        writeln!(f, "pins.gpio_out            {:#x}", self.pins_out.gpio_out)?;
        write!(
            f,
            "uart.output              {:?}",
            String::from_utf8_lossy(&self.uart_output)
        )
    }
}

/// Cycle-driven harness around a [`Core`].
#[derive(Debug)]
pub struct Testbench {
    core: Core,
    general: GeneralConfig,
    pins: Pins,
    cycle: u64,
    sinks: Vec<Box<dyn TraceSink>>,
    serial_in: SerialDriver,
    serial_out: SerialMonitor,
}

impl Testbench {
    /// Wraps an existing core.
    ///
    /// Run length, reset pulse, initial pins, and UART timing come from `config`.
    pub fn new(core: Core, config: &Config) -> Self {
        let divisor = config.mmio.uart_divisor;
        Self {
            core,
            general: config.general.clone(),
            pins: Pins {
                gpio_in: config.pins.gpio_in,
                ..Pins::default()
            },
            cycle: 0,
            sinks: Vec::new(),
            serial_in: SerialDriver::new(divisor),
            serial_out: SerialMonitor::new(divisor),
        }
    }

    /// Builds the core from the configured memory images and wraps it.
    ///
    /// # Errors
    ///
    /// Returns [`SimError`] if any memory image cannot be loaded.
    pub fn from_config(config: &Config) -> Result<Self, SimError> {
        let core = loader::build_core(config)?;
        Ok(Self::new(core, config))
    }

    /// Registers a trace observer.
    pub fn add_sink(&mut self, sink: Box<dyn TraceSink>) {
        self.sinks.push(sink);
    }

    /// The core under test.
    pub fn core(&self) -> &Core {
        &self.core
    }

    /// Mutable access to the core (e.g., to poke memories between runs).
    pub fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    /// Current input pin levels.
    pub fn pins(&self) -> &Pins {
        &self.pins
    }

    /// Drives the general-purpose input pins.
    pub fn set_gpio_in(&mut self, value: u8) {
        self.pins.gpio_in = value;
    }

    /// Queues bytes to be shifted into the core's serial receive pin.
    pub fn send_serial(&mut self, bytes: &[u8]) {
        self.serial_in.send(bytes);
    }

    /// Bytes decoded from the core's serial transmit pin so far.
    pub fn serial_output(&self) -> &[u8] {
        self.serial_out.received()
    }

    /// Clock edges simulated so far.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Applies one clock edge with the given reset level.
    pub fn tick(&mut self, reset: bool) -> TraceRecord {
        self.pins.reset = reset;
        self.pins.uart_rx = self.serial_in.line();

        let out = self.core.step(&self.pins);

        let record = TraceRecord::from_probe(self.cycle, reset, &self.core.probe());
        for sink in &mut self.sinks {
            sink.record(&record);
        }

        self.serial_in.tick();
        self.serial_out.sample(out.uart_tx);
        self.cycle += 1;
        record
    }

    /// Holds reset asserted for `cycles` edges.
    pub fn reset(&mut self, cycles: u32) {
        for _ in 0..cycles {
            let _ = self.tick(true);
        }
    }

    /// Runs up to `cycles` edges with reset released.
    ///
    /// Returns early once the core halts if `stop_on_halt` is set.
    pub fn run_cycles(&mut self, cycles: u64) {
        for _ in 0..cycles {
            let _ = self.tick(false);
            if self.general.stop_on_halt && self.core.halted() {
                break;
            }
        }
    }

    /// Performs a complete run: reset pulse, then the cycle budget.
    pub fn run(&mut self) -> RunSummary {
        tracing::info!(
            reset_cycles = self.general.reset_cycles,
            cycles = self.general.cycles,
            "testbench run"
        );
        self.reset(self.general.reset_cycles);
        self.run_cycles(self.general.cycles);
        self.summary()
    }

    /// Snapshot of the current run state.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            cycles: self.cycle,
            halted: self.core.halted(),
            fault: self.core.fault(),
            pins_out: self.core.pins_out(),
            uart_output: self.serial_out.received().to_vec(),
            stats: self.core.stats.clone(),
        }
    }
}
