//! # Shift and Rotate Instructions
//!
//! This module implements bit shift and rotate operations:
//! - ASL: Arithmetic Shift Left
//! - LSR: Logical Shift Right
//! - ROL: Rotate Left
//! - ROR: Rotate Right
//!
//! Each instruction operates either on the accumulator (implied operand) or
//! on a memory byte (read-modify-write through the bus). The bit shifted out
//! lands in the carry flag; Z and N follow the result. LSR always clears N
//! since it shifts a zero into bit 7.

use crate::addressing::Operand;
use crate::bus::Bus;
use crate::cpu::{Cpu, StatusFlags};

/// Applies `shift` to the accumulator or to the byte at the effective address.
///
/// `shift` receives the input byte and the incoming carry and returns the
/// result plus the outgoing carry.
fn shift_with(
    cpu: &mut Cpu,
    bus: &mut Bus,
    operand: Operand,
    shift: fn(u8, bool) -> (u8, bool),
) -> u8 {
    let carry_in = cpu.flag_c();

    let result = match operand {
        Operand::Address { address, .. } => {
            let (result, carry_out) = shift(bus.read_byte(address), carry_in);
            bus.write_byte(address, result);
            cpu.set_flag(StatusFlags::CARRY, carry_out);
            result
        }
        _ => {
            let (result, carry_out) = shift(cpu.a, carry_in);
            cpu.a = result;
            cpu.set_flag(StatusFlags::CARRY, carry_out);
            result
        }
    };

    cpu.set_zn(result);
    0
}

/// Executes the ASL (Arithmetic Shift Left) instruction.
///
/// Bit 7 goes to carry, bit 0 becomes 0.
pub(crate) fn asl(cpu: &mut Cpu, bus: &mut Bus, operand: Operand) -> u8 {
    shift_with(cpu, bus, operand, |value, _| (value << 1, value & 0x80 != 0))
}

/// Executes the LSR (Logical Shift Right) instruction.
///
/// Bit 0 goes to carry, bit 7 becomes 0.
pub(crate) fn lsr(cpu: &mut Cpu, bus: &mut Bus, operand: Operand) -> u8 {
    shift_with(cpu, bus, operand, |value, _| (value >> 1, value & 0x01 != 0))
}

/// Executes the ROL (Rotate Left) instruction.
///
/// Bit 7 goes to carry, the old carry enters bit 0.
pub(crate) fn rol(cpu: &mut Cpu, bus: &mut Bus, operand: Operand) -> u8 {
    shift_with(cpu, bus, operand, |value, carry| {
        ((value << 1) | carry as u8, value & 0x80 != 0)
    })
}

/// Executes the ROR (Rotate Right) instruction.
///
/// Bit 0 goes to carry, the old carry enters bit 7.
pub(crate) fn ror(cpu: &mut Cpu, bus: &mut Bus, operand: Operand) -> u8 {
    shift_with(cpu, bus, operand, |value, carry| {
        ((value >> 1) | ((carry as u8) << 7), value & 0x01 != 0)
    })
}
