//! Common utilities and types used throughout the simulator.
//!
//! This module provides the building blocks shared across the core, the SoC, and
//! the testbench. It includes:
//! 1. **Constants:** Reset vector, lane geometry, MMIO window size.
//! 2. **Memory Access:** Classification of data accesses (read/write).
//! 3. **Error Handling:** Startup errors and architectural access faults.
//! 4. **Register Management:** The 32-entry integer register file.

/// Common constants used throughout the simulator.
pub mod constants;

/// Memory access type definitions.
pub mod data;

/// Error types and access fault definitions.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use data::AccessType;
pub use error::{AccessFault, SimError};
pub use reg::RegisterFile;
