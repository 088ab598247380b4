//! # Branch Instructions
//!
//! This module implements conditional branch operations:
//! - BCC / BCS: Branch on Carry Clear / Set
//! - BNE / BEQ: Branch on Zero Clear / Set
//! - BPL / BMI: Branch on Negative Clear / Set
//! - BVC / BVS: Branch on Overflow Clear / Set
//!
//! The relative operand is a single literal byte. A taken branch merges it
//! into PC with a bitwise OR (not the signed displacement of a stock 6502).
//! Page crossing compares PC before and after the merge.
//!
//! Cycle timing:
//! - 2 cycles if branch not taken
//! - 3 cycles if branch taken to same page
//! - 4 cycles if branch taken to different page
//!
//! No flags are affected.

use crate::addressing::{page_crossed, Operand};
use crate::bus::Bus;
use crate::cpu::{Cpu, StatusFlags};

/// Shared body of all branch instructions.
///
/// Returns the cycles charged on top of the base cost of 2.
fn branch_if(cpu: &mut Cpu, operand: Operand, flag: StatusFlags, expected: bool) -> u8 {
    if cpu.status.contains(flag) != expected {
        return 0;
    }

    let offset = match operand {
        Operand::Immediate(offset) => offset as u16,
        _ => return 0,
    };

    let origin = cpu.pc;
    cpu.pc |= offset;

    if page_crossed(origin, cpu.pc) {
        2
    } else {
        1
    }
}

/// Executes the BCC (Branch if Carry Clear) instruction.
pub(crate) fn bcc(cpu: &mut Cpu, _bus: &mut Bus, operand: Operand) -> u8 {
    branch_if(cpu, operand, StatusFlags::CARRY, false)
}

/// Executes the BCS (Branch if Carry Set) instruction.
pub(crate) fn bcs(cpu: &mut Cpu, _bus: &mut Bus, operand: Operand) -> u8 {
    branch_if(cpu, operand, StatusFlags::CARRY, true)
}

/// Executes the BNE (Branch if Not Equal) instruction.
pub(crate) fn bne(cpu: &mut Cpu, _bus: &mut Bus, operand: Operand) -> u8 {
    branch_if(cpu, operand, StatusFlags::ZERO, false)
}

/// Executes the BEQ (Branch if Equal) instruction.
pub(crate) fn beq(cpu: &mut Cpu, _bus: &mut Bus, operand: Operand) -> u8 {
    branch_if(cpu, operand, StatusFlags::ZERO, true)
}

/// Executes the BPL (Branch if Plus) instruction.
pub(crate) fn bpl(cpu: &mut Cpu, _bus: &mut Bus, operand: Operand) -> u8 {
    branch_if(cpu, operand, StatusFlags::NEGATIVE, false)
}

/// Executes the BMI (Branch if Minus) instruction.
pub(crate) fn bmi(cpu: &mut Cpu, _bus: &mut Bus, operand: Operand) -> u8 {
    branch_if(cpu, operand, StatusFlags::NEGATIVE, true)
}

/// Executes the BVC (Branch if Overflow Clear) instruction.
pub(crate) fn bvc(cpu: &mut Cpu, _bus: &mut Bus, operand: Operand) -> u8 {
    branch_if(cpu, operand, StatusFlags::OVERFLOW, false)
}

/// Executes the BVS (Branch if Overflow Set) instruction.
pub(crate) fn bvs(cpu: &mut Cpu, _bus: &mut Bus, operand: Operand) -> u8 {
    branch_if(cpu, operand, StatusFlags::OVERFLOW, true)
}
