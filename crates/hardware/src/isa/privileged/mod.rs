//! System instruction definitions.
//!
//! The core implements no privilege modes or CSRs; this module only carries the
//! encodings needed to recognise `ECALL`, `EBREAK`, and the CSR forms.

/// System instruction encodings and CSR function codes.
pub mod opcodes;
