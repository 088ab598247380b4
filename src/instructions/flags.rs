//! # Status Flag Instructions
//!
//! CLC, SEC, CLI, SEI, CLD, SED and CLV each set or clear a single flag and
//! touch nothing else.

use crate::addressing::Operand;
use crate::bus::Bus;
use crate::cpu::{Cpu, StatusFlags};

/// Executes the CLC (Clear Carry Flag) instruction.
pub(crate) fn clc(cpu: &mut Cpu, _bus: &mut Bus, _operand: Operand) -> u8 {
    cpu.status.remove(StatusFlags::CARRY);
    0
}

/// Executes the SEC (Set Carry Flag) instruction.
pub(crate) fn sec(cpu: &mut Cpu, _bus: &mut Bus, _operand: Operand) -> u8 {
    cpu.status.insert(StatusFlags::CARRY);
    0
}

/// Executes the CLI (Clear Interrupt Disable) instruction.
pub(crate) fn cli(cpu: &mut Cpu, _bus: &mut Bus, _operand: Operand) -> u8 {
    cpu.status.remove(StatusFlags::INTERRUPT_DISABLE);
    0
}

/// Executes the SEI (Set Interrupt Disable) instruction.
pub(crate) fn sei(cpu: &mut Cpu, _bus: &mut Bus, _operand: Operand) -> u8 {
    cpu.status.insert(StatusFlags::INTERRUPT_DISABLE);
    0
}

/// Executes the CLD (Clear Decimal Mode) instruction.
pub(crate) fn cld(cpu: &mut Cpu, _bus: &mut Bus, _operand: Operand) -> u8 {
    cpu.status.remove(StatusFlags::DECIMAL);
    0
}

/// Executes the SED (Set Decimal Mode) instruction.
///
/// The flag is stored only; arithmetic stays binary.
pub(crate) fn sed(cpu: &mut Cpu, _bus: &mut Bus, _operand: Operand) -> u8 {
    cpu.status.insert(StatusFlags::DECIMAL);
    0
}

/// Executes the CLV (Clear Overflow Flag) instruction.
pub(crate) fn clv(cpu: &mut Cpu, _bus: &mut Bus, _operand: Operand) -> u8 {
    cpu.status.remove(StatusFlags::OVERFLOW);
    0
}
