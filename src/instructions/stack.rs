//! # Stack Instructions
//!
//! - PHA / PHP: Push A / status
//! - PLA / PLP: Pull A / status
//!
//! Pushes decrement SP and then write at `0x0100 | SP`. Pulls read at
//! `0x0100 | SP` and then decrement SP as well, so a push followed by a pull
//! leaves SP two below where it started.

use crate::addressing::Operand;
use crate::bus::Bus;
use crate::cpu::{Cpu, StatusFlags};

fn push(cpu: &mut Cpu, bus: &mut Bus, value: u8) {
    cpu.sp = cpu.sp.wrapping_sub(1);
    bus.write_byte(cpu.stack_address(), value);
}

fn pull(cpu: &mut Cpu, bus: &mut Bus) -> u8 {
    let value = bus.read_byte(cpu.stack_address());
    cpu.sp = cpu.sp.wrapping_sub(1);
    value
}

/// Executes the PHA (Push Accumulator) instruction.
pub(crate) fn pha(cpu: &mut Cpu, bus: &mut Bus, _operand: Operand) -> u8 {
    let value = cpu.a;
    push(cpu, bus, value);
    0
}

/// Executes the PHP (Push Processor Status) instruction.
pub(crate) fn php(cpu: &mut Cpu, bus: &mut Bus, _operand: Operand) -> u8 {
    let value = cpu.status.bits();
    push(cpu, bus, value);
    0
}

/// Executes the PLA (Pull Accumulator) instruction.
///
/// Sets Z and N from the pulled value.
pub(crate) fn pla(cpu: &mut Cpu, bus: &mut Bus, _operand: Operand) -> u8 {
    let value = pull(cpu, bus);
    cpu.a = value;
    cpu.set_zn(value);
    0
}

/// Executes the PLP (Pull Processor Status) instruction.
pub(crate) fn plp(cpu: &mut Cpu, bus: &mut Bus, _operand: Operand) -> u8 {
    let value = pull(cpu, bus);
    cpu.status = StatusFlags::from_bits_retain(value);
    0
}
