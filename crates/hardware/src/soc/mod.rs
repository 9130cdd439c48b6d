//! System-on-Chip (SoC) Components.
//!
//! This module organizes everything around the core's pipeline: the byte-lane
//! memories, the data-bus interconnect with its address decoder, the
//! memory-mapped peripherals, and the boundary pins.

/// Memory-mapped I/O device implementations.
pub mod devices;

/// Data-bus interconnect and address decoding.
pub mod interconnect;

/// Byte-lane memory banks.
pub mod memory;

/// Core boundary pins.
pub mod pins;

/// Device trait definitions for MMIO access.
pub mod traits;

pub use interconnect::{AddressDecoder, BusRequest, Interconnect, Route, Target};
pub use memory::LaneMemory;
pub use pins::{Pins, PinsOut};
