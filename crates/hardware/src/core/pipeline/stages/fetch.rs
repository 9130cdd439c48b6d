//! Instruction Fetch (IF) Stage.
//!
//! Presents the current PC to the instruction memory, whose registered output
//! delivers the word one cycle later while the entry is in Execute. There is no
//! branch prediction: Fetch runs sequentially until Execute redirects it, and the
//! word fetched in the redirect cycle is squashed, costing one bubble.

use crate::common::constants::INSTRUCTION_SIZE;
use crate::core::pipeline::latches::IfExEntry;

/// Result of the fetch stage for one cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchOutput {
    /// PC presented on the next cycle.
    pub next_pc: u32,
    /// Entry latched into IF/EX at the edge.
    pub entry: IfExEntry,
}

/// Executes the instruction fetch stage.
///
/// # Arguments
///
/// * `pc` - Address presented to instruction memory this cycle.
/// * `redirect` - Taken branch/jump target resolved by Execute this cycle.
/// * `halting` - The front end is stopped (a halt has been requested).
///
/// # Examples
///
/// ```
/// use rvpipe_core::core::pipeline::stages::fetch_stage;
///
/// let seq = fetch_stage(0x10, None, false);
/// assert_eq!(seq.next_pc, 0x14);
/// assert!(seq.entry.valid);
///
/// let taken = fetch_stage(0x10, Some(0x40), false);
/// assert_eq!(taken.next_pc, 0x40);
/// assert!(!taken.entry.valid);
/// ```
pub fn fetch_stage(pc: u32, redirect: Option<u32>, halting: bool) -> FetchOutput {
    if halting {
        return FetchOutput {
            next_pc: pc,
            entry: IfExEntry { pc, valid: false },
        };
    }
    match redirect {
        Some(target) => {
            tracing::trace!(pc, target, "IF squash on redirect");
            FetchOutput {
                next_pc: target,
                entry: IfExEntry { pc, valid: false },
            }
        }
        None => FetchOutput {
            next_pc: pc.wrapping_add(INSTRUCTION_SIZE),
            entry: IfExEntry { pc, valid: true },
        },
    }
}
