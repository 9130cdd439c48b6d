//! Execution units and functional components.
//!
//! This module contains the functional units used by the Execute and
//! Write-Back stages: the integer ALU, the branch resolution unit, and the
//! load/store unit's byte-lane logic.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Branch Resolution Unit (condition evaluation and redirect targets).
pub mod bru;

/// Load/Store Unit for byte-lane memory access.
pub mod lsu;
