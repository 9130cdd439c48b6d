//! Branch resolution unit (BRU).
//!
//! The core has no branch predictor: every fetch is sequential and Execute
//! resolves conditional branches and jumps, redirecting Fetch when taken.

use crate::common::constants::WORD_ALIGN_MASK;
use crate::core::pipeline::signals::{BranchCond, ControlFlow};

/// Bit mask clearing bit 0 of a `jalr` target.
const JALR_ALIGNMENT_MASK: u32 = !1;

/// Branch resolution unit.
#[derive(Debug)]
pub struct Bru;

impl Bru {
    /// Evaluates a conditional branch comparison.
    ///
    /// # Examples
    ///
    /// ```
    /// use rvpipe_core::core::units::bru::Bru;
    /// use rvpipe_core::core::pipeline::signals::BranchCond;
    ///
    /// assert!(Bru::taken(BranchCond::Lt, -1_i32 as u32, 0));
    /// assert!(!Bru::taken(BranchCond::Ltu, -1_i32 as u32, 0));
    /// ```
    pub fn taken(cond: BranchCond, a: u32, b: u32) -> bool {
        match cond {
            BranchCond::Eq => a == b,
            BranchCond::Ne => a != b,
            BranchCond::Lt => (a as i32) < (b as i32),
            BranchCond::Ge => (a as i32) >= (b as i32),
            BranchCond::Ltu => a < b,
            BranchCond::Geu => a >= b,
        }
    }

    /// Resolves the redirect target of a control-flow instruction.
    ///
    /// # Arguments
    ///
    /// * `control` - Control-flow class of the instruction.
    /// * `pc` - Address of the instruction.
    /// * `imm` - Sign-extended immediate.
    /// * `rs1` - Forwarded `rs1` value.
    /// * `rs2` - Forwarded `rs2` value.
    ///
    /// # Returns
    ///
    /// `Some(target)` when the PC must be redirected, with the target masked to
    /// word alignment; `None` for sequential execution.
    pub fn resolve(control: ControlFlow, pc: u32, imm: i32, rs1: u32, rs2: u32) -> Option<u32> {
        let target = match control {
            ControlFlow::None => return None,
            ControlFlow::Branch(cond) if !Self::taken(cond, rs1, rs2) => return None,
            ControlFlow::Branch(_) | ControlFlow::Jal => pc.wrapping_add(imm as u32),
            ControlFlow::Jalr => rs1.wrapping_add(imm as u32) & JALR_ALIGNMENT_MASK,
        };
        Some(target & WORD_ALIGN_MASK)
    }
}
