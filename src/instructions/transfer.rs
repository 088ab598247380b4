//! # Register Transfer Instructions
//!
//! This module implements register-to-register transfers:
//! - TAX, TAY: Accumulator to index register
//! - TXA, TYA: Index register to accumulator
//! - TSX: Stack pointer to X
//! - TXS: X to stack pointer
//!
//! Every transfer except TXS sets Z and N from the transferred value.

use crate::addressing::Operand;
use crate::bus::Bus;
use crate::cpu::Cpu;

/// Executes the TAX (Transfer Accumulator to X) instruction.
pub(crate) fn tax(cpu: &mut Cpu, _bus: &mut Bus, _operand: Operand) -> u8 {
    cpu.x = cpu.a;
    cpu.set_zn(cpu.x);
    0
}

/// Executes the TAY (Transfer Accumulator to Y) instruction.
pub(crate) fn tay(cpu: &mut Cpu, _bus: &mut Bus, _operand: Operand) -> u8 {
    cpu.y = cpu.a;
    cpu.set_zn(cpu.y);
    0
}

/// Executes the TXA (Transfer X to Accumulator) instruction.
pub(crate) fn txa(cpu: &mut Cpu, _bus: &mut Bus, _operand: Operand) -> u8 {
    cpu.a = cpu.x;
    cpu.set_zn(cpu.a);
    0
}

/// Executes the TYA (Transfer Y to Accumulator) instruction.
pub(crate) fn tya(cpu: &mut Cpu, _bus: &mut Bus, _operand: Operand) -> u8 {
    cpu.a = cpu.y;
    cpu.set_zn(cpu.a);
    0
}

/// Executes the TSX (Transfer Stack Pointer to X) instruction.
pub(crate) fn tsx(cpu: &mut Cpu, _bus: &mut Bus, _operand: Operand) -> u8 {
    cpu.x = cpu.sp;
    cpu.set_zn(cpu.x);
    0
}

/// Executes the TXS (Transfer X to Stack Pointer) instruction.
///
/// No flags are affected.
pub(crate) fn txs(cpu: &mut Cpu, _bus: &mut Bus, _operand: Operand) -> u8 {
    cpu.sp = cpu.x;
    0
}
