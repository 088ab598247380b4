//! # Load and Store Instructions
//!
//! This module implements load and store operations:
//! - LDA: Load Accumulator
//! - LDX: Load X Register
//! - LDY: Load Y Register
//! - STA: Store Accumulator
//! - STX: Store X Register
//! - STY: Store Y Register

use super::page_penalty;
use crate::addressing::Operand;
use crate::bus::Bus;
use crate::cpu::Cpu;

/// Executes the LDA (Load Accumulator) instruction.
///
/// Loads a byte of memory (or the immediate literal) into the accumulator,
/// setting the zero and negative flags as appropriate.
///
/// # Flag Behavior
///
/// - Zero (Z): Set if A = 0
/// - Negative (N): Set if bit 7 of A is set
/// - Other flags: Not affected
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU
/// * `bus` - Bus the operand is read through
/// * `operand` - Immediate literal or effective address
pub(crate) fn lda(cpu: &mut Cpu, bus: &mut Bus, operand: Operand) -> u8 {
    let value = cpu.load_operand(bus, operand);
    cpu.a = value;
    cpu.set_zn(value);
    page_penalty(operand)
}

/// Executes the LDX (Load X Register) instruction.
///
/// Same flag behaviour as LDA, applied to X.
pub(crate) fn ldx(cpu: &mut Cpu, bus: &mut Bus, operand: Operand) -> u8 {
    let value = cpu.load_operand(bus, operand);
    cpu.x = value;
    cpu.set_zn(value);
    page_penalty(operand)
}

/// Executes the LDY (Load Y Register) instruction.
///
/// Same flag behaviour as LDA, applied to Y.
pub(crate) fn ldy(cpu: &mut Cpu, bus: &mut Bus, operand: Operand) -> u8 {
    let value = cpu.load_operand(bus, operand);
    cpu.y = value;
    cpu.set_zn(value);
    page_penalty(operand)
}

/// Executes the STA (Store Accumulator) instruction.
///
/// Writes A to the effective address. No flags are affected, and indexed
/// stores always pay their full base cost (no page-crossing penalty).
pub(crate) fn sta(cpu: &mut Cpu, bus: &mut Bus, operand: Operand) -> u8 {
    store(bus, operand, cpu.a)
}

/// Executes the STX (Store X Register) instruction.
pub(crate) fn stx(cpu: &mut Cpu, bus: &mut Bus, operand: Operand) -> u8 {
    store(bus, operand, cpu.x)
}

/// Executes the STY (Store Y Register) instruction.
pub(crate) fn sty(cpu: &mut Cpu, bus: &mut Bus, operand: Operand) -> u8 {
    store(bus, operand, cpu.y)
}

fn store(bus: &mut Bus, operand: Operand, value: u8) -> u8 {
    if let Some(address) = operand.address() {
        bus.write_byte(address, value);
    }
    0
}
