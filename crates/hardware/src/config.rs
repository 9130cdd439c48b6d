//! Configuration system for the simulator.
//!
//! This module defines the configuration structures used to parameterize a run. It provides:
//! 1. **Defaults:** Baseline run length, reset pulse, memory geometry, and memory map.
//! 2. **Structures:** Hierarchical config for general, memory, MMIO, and pin settings.
//! 3. **Enums:** Image source formats and the misaligned-access policy.
//!
//! Configuration is supplied as JSON (see [`Config::from_json`]); every field has a default,
//! so an empty object `{}` is a valid configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::common::constants::{DEFAULT_LANE_DEPTH, LANE_COUNT, MMIO_WINDOW_BYTES};
use crate::common::error::SimError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Cycle budget after reset is released.
    pub const CYCLES: u64 = 1000;

    /// Number of cycles the reset pin is held asserted before the run.
    pub const RESET_CYCLES: u32 = 2;

    /// Base address of the MMIO window (GPIO + UART registers).
    pub const MMIO_BASE: u32 = 0x1000_0000;

    /// Clock cycles per UART bit.
    pub const UART_DIVISOR: u32 = 16;

    /// Directory holding the default memory images.
    pub const IMAGE_DIR: &str = "mem";
}

/// Policy applied to half-word and word accesses that are not naturally aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MisalignedPolicy {
    /// Suppress the access, record an [`AccessFault`](crate::common::AccessFault), and halt.
    #[default]
    Fault,
    /// Clear the low address bits down to the natural alignment and perform the access.
    Truncate,
}

/// Where a memory's initial contents come from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    /// Four per-lane byte images; entry `i` of lane `k` is byte `k` of word `i`.
    Lanes([PathBuf; LANE_COUNT]),
    /// One image of 32-bit words, split across the lanes little-endian.
    Words(PathBuf),
}

impl ImageSource {
    /// Returns the default per-lane image paths `mem/<prefix>_lane{0..3}.hex`.
    pub fn default_lanes(prefix: &str) -> Self {
        Self::Lanes(default_lane_paths(prefix))
    }
}

/// Returns `mem/<prefix>_lane{0..3}.hex`.
fn default_lane_paths(prefix: &str) -> [PathBuf; LANE_COUNT] {
    std::array::from_fn(|lane| {
        Path::new(defaults::IMAGE_DIR).join(format!("{prefix}_lane{lane}.hex"))
    })
}

/// Root configuration.
///
/// # Examples
///
/// ```
/// use rvpipe_core::config::{Config, ImageSource, MisalignedPolicy};
///
/// let json = r#"{
///     "general": { "cycles": 64, "reset_cycles": 3 },
///     "memory": {
///         "imem": { "words": "prog.hex" },
///         "misaligned": "truncate"
///     },
///     "mmio": { "uart_divisor": 4 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.general.cycles, 64);
/// assert_eq!(config.memory.imem, ImageSource::Words("prog.hex".into()));
/// assert_eq!(config.memory.misaligned, MisalignedPolicy::Truncate);
/// assert_eq!(config.memory.lane_depth, 16384);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Run length and reset settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Memory geometry, images, and alignment policy
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Memory-mapped peripheral settings
    #[serde(default)]
    pub mmio: MmioConfig,
    /// Initial state of the external input pins
    #[serde(default)]
    pub pins: PinsConfig,
}

impl Config {
    /// Parses and validates a configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ConfigParse`] for malformed JSON and
    /// [`SimError::InvalidConfig`] for values rejected by [`Config::validate`].
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ConfigIo`] if the file cannot be read, otherwise the
    /// errors of [`Config::from_json`].
    pub fn from_file(path: &Path) -> Result<Self, SimError> {
        let text = fs::read_to_string(path).map_err(|source| SimError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Checks values serde cannot: memory geometry, MMIO placement, UART timing.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] describing the first rejected value.
    pub fn validate(&self) -> Result<(), SimError> {
        let depth = self.memory.lane_depth;
        if depth == 0 || !depth.is_power_of_two() {
            return Err(SimError::InvalidConfig(format!(
                "memory.lane_depth must be a non-zero power of two, got {depth}"
            )));
        }
        if depth > (1 << 30) {
            return Err(SimError::InvalidConfig(format!(
                "memory.lane_depth {depth} exceeds the 32-bit address space"
            )));
        }
        if self.mmio.base % MMIO_WINDOW_BYTES != 0 {
            return Err(SimError::InvalidConfig(format!(
                "mmio.base {:#x} must be {MMIO_WINDOW_BYTES}-byte aligned",
                self.mmio.base
            )));
        }
        if self.mmio.uart_divisor == 0 {
            return Err(SimError::InvalidConfig(
                "mmio.uart_divisor must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Run length and reset settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Cycle budget once reset is released
    #[serde(default = "GeneralConfig::default_cycles")]
    pub cycles: u64,

    /// Number of cycles the reset pin is held asserted first
    #[serde(default = "GeneralConfig::default_reset_cycles")]
    pub reset_cycles: u32,

    /// End the run early once an `ecall`/`ebreak` (or a fault) retires
    #[serde(default = "GeneralConfig::default_stop_on_halt")]
    pub stop_on_halt: bool,
}

impl GeneralConfig {
    fn default_cycles() -> u64 {
        defaults::CYCLES
    }

    fn default_reset_cycles() -> u32 {
        defaults::RESET_CYCLES
    }

    fn default_stop_on_halt() -> bool {
        true
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            cycles: defaults::CYCLES,
            reset_cycles: defaults::RESET_CYCLES,
            stop_on_halt: true,
        }
    }
}

/// Memory geometry, initial images, and alignment policy.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Byte cells per lane; both memories hold `4 * lane_depth` bytes
    #[serde(default = "MemoryConfig::default_lane_depth")]
    pub lane_depth: usize,

    /// Instruction memory image
    #[serde(default = "MemoryConfig::default_imem")]
    pub imem: ImageSource,

    /// Data memory per-lane images
    #[serde(default = "MemoryConfig::default_dmem")]
    pub dmem: [PathBuf; LANE_COUNT],

    /// Handling of misaligned half-word and word accesses
    #[serde(default)]
    pub misaligned: MisalignedPolicy,
}

impl MemoryConfig {
    fn default_lane_depth() -> usize {
        DEFAULT_LANE_DEPTH
    }

    fn default_imem() -> ImageSource {
        ImageSource::default_lanes("imem")
    }

    fn default_dmem() -> [PathBuf; LANE_COUNT] {
        default_lane_paths("dmem")
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            lane_depth: DEFAULT_LANE_DEPTH,
            imem: Self::default_imem(),
            dmem: Self::default_dmem(),
            misaligned: MisalignedPolicy::default(),
        }
    }
}

/// Memory-mapped peripheral settings.
#[derive(Debug, Clone, Deserialize)]
pub struct MmioConfig {
    /// Base address of the 16-byte GPIO/UART register window
    #[serde(default = "MmioConfig::default_base")]
    pub base: u32,

    /// Clock cycles per UART bit
    #[serde(default = "MmioConfig::default_uart_divisor")]
    pub uart_divisor: u32,
}

impl MmioConfig {
    fn default_base() -> u32 {
        defaults::MMIO_BASE
    }

    fn default_uart_divisor() -> u32 {
        defaults::UART_DIVISOR
    }
}

impl Default for MmioConfig {
    fn default() -> Self {
        Self {
            base: defaults::MMIO_BASE,
            uart_divisor: defaults::UART_DIVISOR,
        }
    }
}

/// Initial levels driven onto the core's input pins.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PinsConfig {
    /// General-purpose input pins (low 4 bits used)
    #[serde(default)]
    pub gpio_in: u8,
}
