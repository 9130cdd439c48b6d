//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains opcodes, function codes, field extraction, decoding, and disassembly
//! for the RV32I base integer instruction set executed by the core.

/// Application Binary Interface (ABI) register names.
pub mod abi;

/// Immediate decoding for all RV32I instruction formats.
pub mod decode;

/// Instruction disassembler for debug tracing and the CLI.
pub mod disasm;

/// Instruction field extraction utilities.
pub mod instruction;

/// System instruction encodings (ECALL, EBREAK, CSR forms).
pub mod privileged;

/// Base integer instruction set (32-bit RISC-V core instructions).
pub mod rv32i;
