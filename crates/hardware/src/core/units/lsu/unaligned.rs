//! Misaligned access handling.
//!
//! Half-word accesses must be 2-byte aligned and word accesses 4-byte aligned.
//! What happens otherwise is selected by [`MisalignedPolicy`].

use crate::common::data::AccessType;
use crate::common::error::AccessFault;
use crate::config::MisalignedPolicy;
use crate::core::pipeline::signals::MemWidth;

/// Checks whether an access of `width` at `addr` is naturally aligned.
pub fn is_aligned(addr: u32, width: MemWidth) -> bool {
    addr & width.align_mask() == 0
}

/// Applies the misaligned-access policy to an effective address.
///
/// # Arguments
///
/// * `policy` - Configured policy.
/// * `pc` - Address of the accessing instruction (for fault reporting).
/// * `addr` - Effective address.
/// * `width` - Access width.
/// * `access` - Load or store.
///
/// # Returns
///
/// The address to use for the access, or the fault to record when the access
/// must be suppressed.
///
/// # Examples
///
/// ```
/// use rvpipe_core::common::AccessType;
/// use rvpipe_core::config::MisalignedPolicy;
/// use rvpipe_core::core::pipeline::signals::MemWidth;
/// use rvpipe_core::core::units::lsu::unaligned::check_alignment;
///
/// let truncated = check_alignment(MisalignedPolicy::Truncate, 0, 0x103, MemWidth::Word, AccessType::Read);
/// assert_eq!(truncated, Ok(0x100));
///
/// let fault = check_alignment(MisalignedPolicy::Fault, 0, 0x101, MemWidth::Half, AccessType::Write);
/// assert!(fault.is_err());
/// ```
pub fn check_alignment(
    policy: MisalignedPolicy,
    pc: u32,
    addr: u32,
    width: MemWidth,
    access: AccessType,
) -> Result<u32, AccessFault> {
    if is_aligned(addr, width) {
        return Ok(addr);
    }
    match policy {
        MisalignedPolicy::Truncate => Ok(addr & !width.align_mask()),
        MisalignedPolicy::Fault => Err(AccessFault {
            pc,
            addr,
            width,
            access,
        }),
    }
}
