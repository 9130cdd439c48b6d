//! Per-Cycle Trace Records.
//!
//! The testbench samples the core's buses once per clock edge into a
//! [`TraceRecord`] and hands it to every registered [`TraceSink`]. Sinks are
//! pure observers: they never feed anything back into the core.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::core::Probe;

/// One clock edge as seen from outside the core.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TraceRecord {
    /// Zero-based cycle index (reset cycles included).
    pub cycle: u64,
    /// Clock level when sampled; records are taken at the rising edge.
    pub clk: bool,
    /// Reset pin level.
    pub reset: bool,
    /// Address presented to instruction memory.
    pub fetch_addr: u32,
    /// Instruction memory output.
    pub fetch_inst: u32,
    /// Data write-enable mask.
    pub data_we: u8,
    /// Data-bus address.
    pub data_addr: u32,
    /// Data read value.
    pub data_rdata: u32,
}

impl TraceRecord {
    /// Builds a record from the core's probe for the given cycle.
    pub fn from_probe(cycle: u64, reset: bool, probe: &Probe) -> Self {
        Self {
            cycle,
            clk: true,
            reset,
            fetch_addr: probe.fetch_addr,
            fetch_inst: probe.fetch_inst,
            data_we: probe.data_we,
            data_addr: probe.data_addr,
            data_rdata: probe.data_rdata,
        }
    }
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>6} clk={} rst={} pc={:#010x} inst={:#010x} we={:04b} addr={:#010x} rdata={:#010x}",
            self.cycle,
            u8::from(self.clk),
            u8::from(self.reset),
            self.fetch_addr,
            self.fetch_inst,
            self.data_we,
            self.data_addr,
            self.data_rdata
        )
    }
}

/// Observer of per-cycle trace records.
pub trait TraceSink: fmt::Debug {
    /// Receives the record for one clock edge.
    fn record(&mut self, record: &TraceRecord);
}

/// Collects records in memory.
///
/// Clones share the same buffer, so a test can keep one handle while the
/// testbench owns another.
#[derive(Clone, Debug, Default)]
pub struct TraceRecorder {
    records: Rc<RefCell<Vec<TraceRecord>>>,
}

impl TraceRecorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies out every record captured so far.
    pub fn records(&self) -> Vec<TraceRecord> {
        self.records.borrow().clone()
    }

    /// Number of records captured.
    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    /// Whether nothing has been captured yet.
    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

impl TraceSink for TraceRecorder {
    fn record(&mut self, record: &TraceRecord) {
        self.records.borrow_mut().push(*record);
    }
}

/// Emits every record as a `trace!` event.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl TraceSink for LogSink {
    fn record(&mut self, record: &TraceRecord) {
        tracing::trace!(target: "rvpipe::trace", "{record}");
    }
}
