//! # Increment and Decrement Instructions
//!
//! - INC / DEC: Read-modify-write on a memory byte
//! - INX / INY / DEX / DEY: Register forms
//!
//! All wrap modulo 256 and set Z and N from the result.

use crate::addressing::Operand;
use crate::bus::Bus;
use crate::cpu::Cpu;

fn modify_memory(cpu: &mut Cpu, bus: &mut Bus, operand: Operand, delta: fn(u8) -> u8) -> u8 {
    if let Some(address) = operand.address() {
        let result = delta(bus.read_byte(address));
        bus.write_byte(address, result);
        cpu.set_zn(result);
    }
    0
}

/// Executes the INC (Increment Memory) instruction.
pub(crate) fn inc(cpu: &mut Cpu, bus: &mut Bus, operand: Operand) -> u8 {
    modify_memory(cpu, bus, operand, |value| value.wrapping_add(1))
}

/// Executes the DEC (Decrement Memory) instruction.
pub(crate) fn dec(cpu: &mut Cpu, bus: &mut Bus, operand: Operand) -> u8 {
    modify_memory(cpu, bus, operand, |value| value.wrapping_sub(1))
}

/// Executes the INX (Increment X) instruction.
pub(crate) fn inx(cpu: &mut Cpu, _bus: &mut Bus, _operand: Operand) -> u8 {
    cpu.x = cpu.x.wrapping_add(1);
    cpu.set_zn(cpu.x);
    0
}

/// Executes the INY (Increment Y) instruction.
pub(crate) fn iny(cpu: &mut Cpu, _bus: &mut Bus, _operand: Operand) -> u8 {
    cpu.y = cpu.y.wrapping_add(1);
    cpu.set_zn(cpu.y);
    0
}

/// Executes the DEX (Decrement X) instruction.
pub(crate) fn dex(cpu: &mut Cpu, _bus: &mut Bus, _operand: Operand) -> u8 {
    cpu.x = cpu.x.wrapping_sub(1);
    cpu.set_zn(cpu.x);
    0
}

/// Executes the DEY (Decrement Y) instruction.
pub(crate) fn dey(cpu: &mut Cpu, _bus: &mut Bus, _operand: Operand) -> u8 {
    cpu.y = cpu.y.wrapping_sub(1);
    cpu.set_zn(cpu.y);
    0
}
