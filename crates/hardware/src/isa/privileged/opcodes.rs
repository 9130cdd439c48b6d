//! System Instruction Encodings.
//!
//! `ECALL` and `EBREAK` halt the core. CSR instructions decode but are not
//! implemented.

/// Environment Call (ECALL).
pub const ECALL: u32 = 0x0000_0073;

/// Environment Break (EBREAK).
pub const EBREAK: u32 = 0x0010_0073;

/// funct3 of ECALL / EBREAK.
pub const PRIV: u32 = 0b000;

/// Atomic Read/Write CSR (CSRRW).
pub const CSRRW: u32 = 0b001;
/// Atomic Read and Set Bits in CSR (CSRRS).
pub const CSRRS: u32 = 0b010;
/// Atomic Read and Clear Bits in CSR (CSRRC).
pub const CSRRC: u32 = 0b011;
/// Atomic Read/Write CSR Immediate (CSRRWI).
pub const CSRRWI: u32 = 0b101;
/// Atomic Read and Set Bits in CSR Immediate (CSRRSI).
pub const CSRRSI: u32 = 0b110;
/// Atomic Read and Clear Bits in CSR Immediate (CSRRCI).
pub const CSRRCI: u32 = 0b111;
