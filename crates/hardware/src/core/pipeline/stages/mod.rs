//! Pipeline stage implementations.
//!
//! This module contains the individual stages of the 3-stage pipeline. Each stage is
//! a pure function of the state at the start of the cycle; the core commits all of
//! their outputs together on the clock edge. It includes:
//! 1. **Fetch:** Presents the PC to instruction memory and computes the next PC.
//! 2. **Decode:** Turns a raw instruction into control signals (part of Execute).
//! 3. **Execute:** Reads operands, computes results, addresses, lane masks, and redirects.
//! 4. **Writeback:** Merges load data and commits the destination register.

/// Control signal generation (the decode half of Execute).
pub mod decode;

/// Instruction execute stage implementation.
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Writeback stage implementation.
pub mod writeback;

/// Control generation entry point.
pub use decode::decode_control;
/// Execute stage entry point (EX stage).
pub use execute::{ExOutput, execute_stage};
/// Fetch stage entry point (IF stage).
pub use fetch::{FetchOutput, fetch_stage};
/// Writeback stage entry point (WB stage).
pub use writeback::{WbOutput, wb_stage};
