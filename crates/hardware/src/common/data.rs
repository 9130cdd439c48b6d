//! Memory Access Types.
//!
//! Classifies data-bus accesses issued by the Execute stage. Used for:
//! 1. **Fault Reporting:** Distinguishing misaligned loads from misaligned stores.
//! 2. **Statistics Tracking:** Counting loads and stores separately.

use std::fmt;

/// Type of data memory access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    /// Data read access issued by a load instruction.
    Read,

    /// Data write access issued by a store instruction.
    Write,
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => f.write_str("load"),
            Self::Write => f.write_str("store"),
        }
    }
}
