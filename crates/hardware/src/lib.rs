//! Cycle-stepped RV32I pipeline core with byte-lane memory and MMIO peripherals.
//!
//! This crate models a small 3-stage processor and the harness around it:
//! 1. **Core:** Fetch, combined Decode/Execute, and Write-Back stages with a single
//!    `step()` that commits every register, latch, and memory update atomically.
//! 2. **Memory:** A 32-bit data memory built from four byte-lane banks with
//!    independent write-enables and synchronous (registered-address) reads.
//! 3. **ISA:** RV32I decoding, control-signal generation, and a disassembler.
//! 4. **SoC:** Address decoding of the data bus into memory, GPIO, and a bit-level UART.
//! 5. **Simulation:** Hex image loading, configuration, a clock/reset testbench,
//!    per-cycle trace records, and statistics.

/// Common types and constants (errors, access types, register file).
pub mod common;
/// Simulator configuration (defaults, image sources, memory map, pins).
pub mod config;
/// CPU core (pipeline stages, latches, execution units).
pub mod core;
/// Instruction set (RV32I encodings, decode, disassembly).
pub mod isa;
/// Image loading, testbench, trace observers, and serial line helpers.
pub mod sim;
/// Data bus, byte-lane memories, and memory-mapped devices.
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// The processor core; advance it with [`Core::step`].
pub use crate::core::Core;
/// Clock/reset driver around a [`Core`].
pub use crate::sim::Testbench;
