//! Execute (EX) Stage.
//!
//! This module implements the combined decode/execute stage. It performs the following:
//! 1. **Operand Resolution:** Reads the register file, forwarding the Write-Back result.
//! 2. **Arithmetic Execution:** Runs the ALU for arithmetic, logic, shifts, and link values.
//! 3. **Branch Resolution:** Evaluates branches and jumps and redirects Fetch when taken.
//! 4. **Memory Request:** Computes the effective address, applies the alignment policy,
//!    decodes the target, and drives the lane write-enable mask and store data.
//! 5. **System Handling:** `ecall`/`ebreak` request a halt.

use crate::common::constants::INSTRUCTION_SIZE;
use crate::common::data::AccessType;
use crate::common::reg::RegisterFile;
use crate::config::MisalignedPolicy;
use crate::core::pipeline::hazards::{self, RegWrite};
use crate::core::pipeline::latches::{ExWbEntry, IfExEntry, LoadOp, LoadSource};
use crate::core::pipeline::signals::{ControlSignals, OpASrc, OpBSrc};
use crate::core::pipeline::stages::decode::decode_control;
use crate::core::units::alu::Alu;
use crate::core::units::bru::Bru;
use crate::core::units::lsu::{Lsu, unaligned};
use crate::isa::decode::decode;
use crate::soc::interconnect::{AddressDecoder, BusRequest};

/// Result of the execute stage for one cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExOutput {
    /// Entry latched into EX/WB at the edge.
    pub next: ExWbEntry,
    /// Data-bus request applied at the edge.
    pub bus: BusRequest,
    /// Taken branch/jump target.
    pub redirect: Option<u32>,
    /// Stop fetching: the instruction is `ecall`/`ebreak` or faulted.
    pub halt: bool,
    /// Control signals of the executed instruction (default for a bubble).
    pub ctrl: ControlSignals,
}

/// Executes the instruction execute stage.
///
/// # Arguments
///
/// * `entry` - IF/EX latch contents.
/// * `inst` - Instruction memory output (the word fetched for `entry.pc`).
/// * `regs` - Register file as of the start of the cycle.
/// * `wb` - Register write performed by Write-Back this cycle, for forwarding.
/// * `decoder` - Data-bus address decoder.
/// * `policy` - Misaligned-access policy.
pub fn execute_stage(
    entry: &IfExEntry,
    inst: u32,
    regs: &RegisterFile,
    wb: Option<RegWrite>,
    decoder: &AddressDecoder,
    policy: MisalignedPolicy,
) -> ExOutput {
    if !entry.valid {
        return ExOutput::default();
    }

    let pc = entry.pc;
    let d = decode(inst);
    let ctrl = decode_control(&d);

    if ctrl.illegal {
        tracing::warn!(pc, inst, "unimplemented instruction retired as no-op");
    }

    let rv1 = hazards::forward_rs(regs, wb, d.rs1);
    let rv2 = hazards::forward_rs(regs, wb, d.rs2);

    let op_a = match ctrl.a_src {
        OpASrc::Reg1 => rv1,
        OpASrc::Pc => pc,
        OpASrc::Zero => 0,
    };
    let op_b = match ctrl.b_src {
        OpBSrc::Reg2 => rv2,
        OpBSrc::Imm => d.imm as u32,
        OpBSrc::InstSize => INSTRUCTION_SIZE,
    };
    let alu = Alu::execute(ctrl.alu, op_a, op_b);

    let redirect = Bru::resolve(ctrl.control, pc, d.imm, rv1, rv2);
    if let Some(target) = redirect {
        tracing::debug!(pc, target, "EX redirect");
    }

    let mut out = ExOutput {
        next: ExWbEntry {
            valid: true,
            pc,
            inst,
            rd: if ctrl.reg_write { d.rd } else { 0 },
            result: alu,
            load: None,
            halt: ctrl.halt,
            fault: None,
        },
        bus: BusRequest::idle(),
        redirect,
        halt: ctrl.halt,
        ctrl,
    };

    if !(ctrl.mem_read || ctrl.mem_write) {
        return out;
    }

    let access = if ctrl.mem_write {
        AccessType::Write
    } else {
        AccessType::Read
    };
    match unaligned::check_alignment(policy, pc, alu, ctrl.width, access) {
        Ok(addr) => {
            let route = decoder.decode(addr);
            if ctrl.mem_write {
                let lanes = Lsu::store(ctrl.width, addr, rv2);
                out.bus = BusRequest {
                    addr,
                    route,
                    mask: lanes.mask,
                    wdata: lanes.data,
                    read: false,
                };
            } else {
                out.bus = BusRequest {
                    addr,
                    route,
                    mask: 0,
                    wdata: 0,
                    read: true,
                };
                out.next.load = Some(LoadOp {
                    width: ctrl.width,
                    signed: ctrl.signed_load,
                    offset: route.offset,
                    source: if route.target.is_mmio() {
                        LoadSource::Mmio
                    } else {
                        LoadSource::Memory
                    },
                });
            }
        }
        Err(fault) => {
            tracing::warn!(%fault, "access suppressed");
            out.bus = BusRequest {
                addr: alu,
                route: decoder.decode(alu),
                ..BusRequest::idle()
            };
            out.next.rd = 0;
            out.next.fault = Some(fault);
            out.next.halt = true;
            out.halt = true;
        }
    }

    out
}
