//! Memory Image Loader and Core Construction.
//!
//! This module reads the hexadecimal text images that initialize the memories. It performs:
//! 1. **Parsing:** One value per whitespace-separated token, optional `0x` prefix,
//!    `//` and `#` comments, and `@<hex>` directives that move the load pointer to an
//!    entry index.
//! 2. **Lane images:** Four 8-bit images, one per byte lane, forming one word memory.
//! 3. **Word images:** One 32-bit image split across the lanes little-endian.
//! 4. **Core construction:** Builds a [`Core`] from a [`Config`] with both memories loaded.
//!
//! Every failure is a fatal [`SimError`]: the core cannot run without initialized memory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::common::constants::LANE_COUNT;
use crate::common::error::SimError;
use crate::config::{Config, ImageSource};
use crate::core::Core;
use crate::soc::memory::LaneMemory;

/// Parses a hex image into a dense vector of entries.
///
/// Entries skipped by an `@` directive are zero.
///
/// # Arguments
///
/// * `text` - Image contents.
/// * `path` - Image path, for error messages.
/// * `bits` - Width of each entry (8 for lane images, 32 for word images).
/// * `capacity` - Number of entries the target memory holds.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use rvpipe_core::sim::loader::parse_hex;
///
/// let image = "// header\n13 0x05\n@4 ff  # tail\n";
/// let entries = parse_hex(image, Path::new("lane0.hex"), 8, 16).unwrap();
/// assert_eq!(entries, vec![0x13, 0x05, 0, 0, 0xff]);
/// ```
pub fn parse_hex(
    text: &str,
    path: &Path,
    bits: u32,
    capacity: usize,
) -> Result<Vec<u64>, SimError> {
    let mut entries = Vec::new();
    let mut index = 0usize;

    for (lineno, raw) in text.lines().enumerate() {
        let line = lineno + 1;
        let code = strip_comment(raw);

        for token in code.split_whitespace() {
            let syntax = || SimError::HexSyntax {
                path: path.to_path_buf(),
                line,
                token: token.to_string(),
            };

            if let Some(addr) = token.strip_prefix('@') {
                index = parse_number(addr)
                    .and_then(|n| usize::try_from(n).ok())
                    .ok_or_else(syntax)?;
                continue;
            }

            let value = parse_number(token).ok_or_else(syntax)?;
            if bits < 64 && value >> bits != 0 {
                return Err(SimError::ValueTooWide {
                    path: path.to_path_buf(),
                    line,
                    value,
                    bits,
                });
            }
            if index >= capacity {
                return Err(SimError::ImageOverflow {
                    path: path.to_path_buf(),
                    entries: index.saturating_add(1),
                    capacity,
                });
            }
            if entries.len() <= index {
                entries.resize(index + 1, 0);
            }
            entries[index] = value;
            index += 1;
        }
    }

    Ok(entries)
}

fn strip_comment(line: &str) -> &str {
    let end = [line.find("//"), line.find('#')]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(line.len());
    &line[..end]
}

fn parse_number(token: &str) -> Option<u64> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    u64::from_str_radix(digits, 16).ok()
}

fn read_image(path: &Path) -> Result<String, SimError> {
    fs::read_to_string(path).map_err(|source| SimError::Image {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads one per-lane byte image.
///
/// # Errors
///
/// Returns [`SimError`] if the file is missing, malformed, holds values wider
/// than 8 bits, or addresses more than `depth` entries.
pub fn read_lane_image(path: &Path, depth: usize) -> Result<Vec<u8>, SimError> {
    let text = read_image(path)?;
    let entries = parse_hex(&text, path, 8, depth)?;
    Ok(entries.into_iter().map(|v| v as u8).collect())
}

/// Reads a 32-bit word image.
///
/// # Errors
///
/// Returns [`SimError`] if the file is missing, malformed, holds values wider
/// than 32 bits, or addresses more than `depth` entries.
pub fn read_word_image(path: &Path, depth: usize) -> Result<Vec<u32>, SimError> {
    let text = read_image(path)?;
    let entries = parse_hex(&text, path, 32, depth)?;
    Ok(entries.into_iter().map(|v| v as u32).collect())
}

/// Loads four per-lane images into a memory.
///
/// # Errors
///
/// Propagates the first [`read_lane_image`] failure.
pub fn load_lanes(mem: &mut LaneMemory, paths: &[PathBuf; LANE_COUNT]) -> Result<(), SimError> {
    let depth = mem.depth();
    for (lane, path) in paths.iter().enumerate() {
        let image = read_lane_image(path, depth)?;
        tracing::info!(lane, path = %path.display(), bytes = image.len(), "loaded lane image");
        mem.load_lane(lane, &image);
    }
    Ok(())
}

/// Loads a memory from either image format.
///
/// # Errors
///
/// Propagates image read and parse failures.
pub fn load_image_source(mem: &mut LaneMemory, source: &ImageSource) -> Result<(), SimError> {
    match source {
        ImageSource::Lanes(paths) => load_lanes(mem, paths),
        ImageSource::Words(path) => {
            let words = read_word_image(path, mem.depth())?;
            tracing::info!(path = %path.display(), words = words.len(), "loaded word image");
            mem.load_words(&words);
            Ok(())
        }
    }
}

/// Builds a core with instruction and data memories loaded from the configured images.
///
/// # Errors
///
/// Returns [`SimError::InvalidConfig`] if `config` fails [`Config::validate`], or
/// [`SimError`] if any image cannot be loaded.
pub fn build_core(config: &Config) -> Result<Core, SimError> {
    config.validate()?;
    let depth = config.memory.lane_depth;

    let mut imem = LaneMemory::new(depth);
    load_image_source(&mut imem, &config.memory.imem)?;

    let mut dmem = LaneMemory::new(depth);
    load_lanes(&mut dmem, &config.memory.dmem)?;

    Ok(Core::with_memories(imem, dmem, config))
}
