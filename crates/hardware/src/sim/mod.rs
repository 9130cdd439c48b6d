//! Simulation harness.
//!
//! Provides memory image loading, the cycle-driven testbench that drives clock,
//! reset, and pins around the core, per-cycle trace records, and serial line
//! helpers for the UART pins.

/// Hex memory image loading and core construction.
pub mod loader;

/// Serial line driver and monitor.
pub mod serial;

/// Clock/reset testbench.
pub mod testbench;

/// Per-cycle trace records and observers.
pub mod trace;

pub use testbench::{RunSummary, Testbench};
pub use trace::{LogSink, TraceRecord, TraceRecorder, TraceSink};
