//! Instruction pipeline implementation.
//!
//! This module contains the implementation of the three-stage instruction pipeline
//! (Fetch, Decode/Execute, Write-Back). It includes the following components:
//! 1. **Hazards:** Forwarding of the Write-Back result into Execute.
//! 2. **Latches:** Inter-stage buffers (IF/EX, EX/WB).
//! 3. **Signals:** Control signals generated during instruction decoding.
//! 4. **Stages:** Pure per-cycle implementations of each stage.
//! 5. **Traits:** Common interface for pipeline latches.

/// Pipeline hazard forwarding logic.
pub mod hazards;

/// Inter-stage pipeline latches (IF/EX, EX/WB).
pub mod latches;

/// Control signals generated during instruction decode.
pub mod signals;

/// Pipeline stage implementations (fetch, decode, execute, writeback).
pub mod stages;

/// Traits for pipeline latches.
pub mod traits;
