//! Core processor implementation.
//!
//! This module contains the pipelined core: the three-stage pipeline, its
//! functional units, and the `Core` state container that steps them one clock
//! edge at a time.

/// Core state and clock-edge execution.
pub mod cpu;

/// Instruction pipeline implementation (stages, latches, hazards, signals).
pub mod pipeline;

/// Execution units (ALU, branch resolution, load/store lanes).
pub mod units;

pub use self::cpu::{Core, Probe};
