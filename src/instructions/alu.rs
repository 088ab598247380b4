//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic and logical operations:
//! - ADC: Add with Carry
//! - SBC: Subtract with Carry
//! - AND, ORA, EOR: Bitwise logic on the accumulator
//! - CMP, CPX, CPY: Register comparisons
//! - BIT: Bit test
//!
//! Arithmetic is always binary. The decimal flag is stored but does not
//! change ADC or SBC.

use super::page_penalty;
use crate::addressing::Operand;
use crate::bus::Bus;
use crate::cpu::{Cpu, StatusFlags};

/// Adds `value` plus carry to the accumulator and updates N, V, Z, C.
fn add_with_carry(cpu: &mut Cpu, value: u8) {
    let a = cpu.a;
    let carry_in = cpu.flag_c() as u16;

    let result16 = a as u16 + value as u16 + carry_in;
    let result = result16 as u8;

    // Carry flag: Set if result > 255
    cpu.set_flag(StatusFlags::CARRY, result16 > 0xFF);

    // Overflow: both operands share a sign the result does not
    let overflow = ((a ^ result) & (value ^ result) & 0x80) != 0;
    cpu.set_flag(StatusFlags::OVERFLOW, overflow);

    cpu.a = result;
    cpu.set_zn(result);
}

/// Executes the ADC (Add with Carry) instruction.
///
/// Adds the operand plus the carry flag to the accumulator. Updates all
/// relevant flags.
///
/// # Flag Behavior
///
/// - Carry (C): Set if the unsigned result exceeds 0xFF
/// - Overflow (V): Set on signed overflow
/// - Zero (Z) / Negative (N): From the result
pub(crate) fn adc(cpu: &mut Cpu, bus: &mut Bus, operand: Operand) -> u8 {
    let value = cpu.load_operand(bus, operand);
    add_with_carry(cpu, value);
    page_penalty(operand)
}

/// Executes the SBC (Subtract with Carry) instruction.
///
/// Computes `A - M - (1 - C)` as an addition of the one's complement of the
/// operand, so carry is set when no borrow occurred.
pub(crate) fn sbc(cpu: &mut Cpu, bus: &mut Bus, operand: Operand) -> u8 {
    let value = cpu.load_operand(bus, operand);
    add_with_carry(cpu, !value);
    page_penalty(operand)
}

/// Executes the AND (Logical AND) instruction.
pub(crate) fn and(cpu: &mut Cpu, bus: &mut Bus, operand: Operand) -> u8 {
    let result = cpu.a & cpu.load_operand(bus, operand);
    cpu.a = result;
    cpu.set_zn(result);
    page_penalty(operand)
}

/// Executes the ORA (Logical Inclusive OR) instruction.
pub(crate) fn ora(cpu: &mut Cpu, bus: &mut Bus, operand: Operand) -> u8 {
    let result = cpu.a | cpu.load_operand(bus, operand);
    cpu.a = result;
    cpu.set_zn(result);
    page_penalty(operand)
}

/// Executes the EOR (Exclusive OR) instruction.
pub(crate) fn eor(cpu: &mut Cpu, bus: &mut Bus, operand: Operand) -> u8 {
    let result = cpu.a ^ cpu.load_operand(bus, operand);
    cpu.a = result;
    cpu.set_zn(result);
    page_penalty(operand)
}

/// Sets C if `register >= value`, and Z/N from `register - value`.
fn compare(cpu: &mut Cpu, register: u8, value: u8) {
    let result = register.wrapping_sub(value);
    cpu.set_flag(StatusFlags::CARRY, register >= value);
    cpu.set_zn(result);
}

/// Executes the CMP (Compare Accumulator) instruction.
///
/// # Flag Behavior
///
/// - Carry (C): Set if A >= M
/// - Zero (Z): Set if A == M
/// - Negative (N): Bit 7 of A - M
pub(crate) fn cmp(cpu: &mut Cpu, bus: &mut Bus, operand: Operand) -> u8 {
    let value = cpu.load_operand(bus, operand);
    let register = cpu.a;
    compare(cpu, register, value);
    page_penalty(operand)
}

/// Executes the CPX (Compare X Register) instruction.
pub(crate) fn cpx(cpu: &mut Cpu, bus: &mut Bus, operand: Operand) -> u8 {
    let value = cpu.load_operand(bus, operand);
    let register = cpu.x;
    compare(cpu, register, value);
    0
}

/// Executes the CPY (Compare Y Register) instruction.
pub(crate) fn cpy(cpu: &mut Cpu, bus: &mut Bus, operand: Operand) -> u8 {
    let value = cpu.load_operand(bus, operand);
    let register = cpu.y;
    compare(cpu, register, value);
    0
}

/// Executes the BIT (Bit Test) instruction.
///
/// Z is set from `A & M`; N and V are copied from bits 7 and 6 of the memory
/// operand. A is not modified.
pub(crate) fn bit(cpu: &mut Cpu, bus: &mut Bus, operand: Operand) -> u8 {
    let value = cpu.load_operand(bus, operand);
    cpu.set_flag(StatusFlags::ZERO, cpu.a & value == 0);
    cpu.set_flag(StatusFlags::NEGATIVE, value & 0x80 != 0);
    cpu.set_flag(StatusFlags::OVERFLOW, value & 0x40 != 0);
    0
}
