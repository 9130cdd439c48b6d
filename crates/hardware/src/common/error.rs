//! Error and fault definitions.
//!
//! This module defines the two failure channels of the simulator:
//! 1. **Startup Errors:** `SimError` covers everything that prevents a run from
//!    starting (missing or malformed memory images, bad configuration). These are fatal.
//! 2. **Access Faults:** `AccessFault` records a misaligned data access detected by the
//!    Execute stage when the core runs under the faulting alignment policy.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::data::AccessType;
use crate::core::pipeline::signals::MemWidth;

/// Fatal errors raised while configuring or loading the simulator.
#[derive(Debug, Error)]
pub enum SimError {
    /// A memory image could not be read from disk.
    #[error("could not read memory image '{}': {source}", path.display())]
    Image {
        /// Path of the image file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A token in a hex image is not a hexadecimal number.
    #[error("{}:{line}: invalid hex token '{token}'", path.display())]
    HexSyntax {
        /// Path of the image file.
        path: PathBuf,
        /// One-based line number.
        line: usize,
        /// Offending token.
        token: String,
    },

    /// A value in a hex image is wider than the memory cell it targets.
    #[error("{}:{line}: value {value:#x} does not fit in {bits} bits", path.display())]
    ValueTooWide {
        /// Path of the image file.
        path: PathBuf,
        /// One-based line number.
        line: usize,
        /// Parsed value.
        value: u64,
        /// Cell width in bits.
        bits: u32,
    },

    /// A hex image addresses more entries than the memory holds.
    #[error("{}: image needs {entries} entries but memory holds {capacity}", path.display())]
    ImageOverflow {
        /// Path of the image file.
        path: PathBuf,
        /// Entries required by the image.
        entries: usize,
        /// Entries available in the memory.
        capacity: usize,
    },

    /// The configuration file could not be read.
    #[error("could not read config '{}': {source}", path.display())]
    ConfigIo {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The configuration is not valid JSON for [`Config`](crate::Config).
    #[error("malformed config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// An output file (e.g., a disassembly listing) could not be written.
    #[error("could not write '{}': {source}", path.display())]
    Output {
        /// Path of the output file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The configuration parsed but holds an unusable value.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// A misaligned data access detected by the Execute stage.
///
/// Raised only under [`MisalignedPolicy::Fault`](crate::config::MisalignedPolicy::Fault).
/// The access itself is suppressed and the core halts once the faulting
/// instruction reaches Write-Back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessFault {
    /// Address of the faulting instruction.
    pub pc: u32,
    /// Effective address of the access.
    pub addr: u32,
    /// Access width requested by the instruction.
    pub width: MemWidth,
    /// Whether the access was a load or a store.
    pub access: AccessType,
}

impl fmt::Display for AccessFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "misaligned {} {} at {:#010x} (pc={:#010x})",
            self.width, self.access, self.addr, self.pc
        )
    }
}

impl std::error::Error for AccessFault {}
