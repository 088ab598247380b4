//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - JMP: Jump (absolute and indirect)
//! - JSR: Jump to Subroutine
//! - RTS: Return from Subroutine
//! - NOP: No Operation
//!
//! Return addresses are stored as a single little-endian short in the stack
//! page. JSR moves SP down by two before writing, RTS reads at SP and moves
//! it back up by two, so a call/return pair leaves SP where it started.

use crate::addressing::Operand;
use crate::bus::Bus;
use crate::cpu::Cpu;

/// Executes the JMP instruction.
///
/// PC is set to the effective address. For indirect jumps the resolver has
/// already followed the pointer.
pub(crate) fn jmp(cpu: &mut Cpu, _bus: &mut Bus, operand: Operand) -> u8 {
    if let Some(target) = operand.address() {
        cpu.pc = target;
    }
    0
}

/// Executes the JSR (Jump to Subroutine) instruction.
///
/// Saves the address of the instruction following the JSR (PC after the
/// operand bytes) at `0x0100 | SP` and jumps to the target.
///
/// # Stack Behavior
///
/// - SP -= 2
/// - Return address written as a short at `0x0100 | SP`
/// - PC = target
pub(crate) fn jsr(cpu: &mut Cpu, bus: &mut Bus, operand: Operand) -> u8 {
    let Some(target) = operand.address() else {
        return 0;
    };

    cpu.sp = cpu.sp.wrapping_sub(2);
    bus.write_short_le(cpu.stack_address(), cpu.pc);
    cpu.pc = target;
    0
}

/// Executes the RTS (Return from Subroutine) instruction.
///
/// # Stack Behavior
///
/// - PC = short at `0x0100 | SP`
/// - SP += 2
pub(crate) fn rts(cpu: &mut Cpu, bus: &mut Bus, _operand: Operand) -> u8 {
    cpu.pc = bus.read_short_le(cpu.stack_address());
    cpu.sp = cpu.sp.wrapping_add(2);
    0
}

/// Executes the NOP (No Operation) instruction.
pub(crate) fn nop(_cpu: &mut Cpu, _bus: &mut Bus, _operand: Operand) -> u8 {
    0
}
