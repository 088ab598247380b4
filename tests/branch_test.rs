//! Tests for the conditional branch instructions.
//!
//! Branch targets are formed by OR-ing the offset byte into the address of
//! the next instruction.
//!
//! Tests cover:
//! - Not-taken branches
//! - Taken branches, target and cycle cost
//! - Every flag/condition pairing

use sbc6502::{Bus, Cpu, RamDevice, StatusFlags};

/// Helper function to create a CPU and a bus with 64KB of RAM, reset vector at 0x8000
fn setup_cpu() -> (Cpu, Bus) {
    let mut bus = Bus::new();
    bus.register_auto(0x0000, Box::new(RamDevice::new(0x10000)));
    bus.write_short_le(0xFFFC, 0x8000);
    let mut cpu = Cpu::new();
    cpu.reset(&mut bus);
    (cpu, bus)
}

fn load(bus: &mut Bus, address: u16, bytes: &[u8]) {
    for (i, &byte) in bytes.iter().enumerate() {
        bus.write_byte(address.wrapping_add(i as u16), byte);
    }
}

// ========== Cost Tests ==========

#[test]
fn test_branch_not_taken() {
    let (mut cpu, mut bus) = setup_cpu();
    load(&mut bus, 0x8000, &[0xD0, 0x10]); // BNE
    cpu.set_flag(StatusFlags::ZERO, true);

    cpu.clock(&mut bus).unwrap();

    assert_eq!(cpu.pc(), 0x8002);
    assert_eq!(cpu.current_cycles(), 2);
}

#[test]
fn test_branch_operand_is_one_byte() {
    let (mut cpu, mut bus) = setup_cpu();
    load(&mut bus, 0x8000, &[0xD0, 0x10, 0xE8]); // BNE ; INX
    cpu.set_flag(StatusFlags::ZERO, true);

    cpu.clock(&mut bus).unwrap();
    assert_eq!(bus.read_byte(cpu.pc()), 0xE8);

    while cpu.pending_cycles() > 0 {
        cpu.clock(&mut bus).unwrap();
    }
    cpu.clock(&mut bus).unwrap();

    assert_eq!(cpu.x(), 1);
    assert_eq!(cpu.pc(), 0x8003);
}

#[test]
fn test_branch_taken_ors_offset() {
    let (mut cpu, mut bus) = setup_cpu();
    load(&mut bus, 0x8000, &[0xD0, 0x10]); // BNE

    cpu.clock(&mut bus).unwrap();

    assert_eq!(cpu.pc(), 0x8012);
    assert_eq!(cpu.current_cycles(), 4);
}

#[test]
fn test_branch_taken_offset_already_set() {
    let (mut cpu, mut bus) = setup_cpu();
    load(&mut bus, 0x8000, &[0xD0, 0x02]); // BNE

    cpu.clock(&mut bus).unwrap();

    assert_eq!(cpu.pc(), 0x8002);
    assert_eq!(cpu.current_cycles(), 3);
}

#[test]
fn test_branch_high_offset_is_not_subtracted() {
    let (mut cpu, mut bus) = setup_cpu();
    load(&mut bus, 0x8000, &[0xF0, 0xFE]); // BEQ
    cpu.set_flag(StatusFlags::ZERO, true);

    cpu.clock(&mut bus).unwrap();

    assert_eq!(cpu.pc(), 0x80FE);
}

// ========== Condition Tests ==========

/// Runs one branch with the given flag state and reports whether it was taken.
fn taken(opcode: u8, flag: StatusFlags, set: bool) -> bool {
    let (mut cpu, mut bus) = setup_cpu();
    load(&mut bus, 0x8000, &[opcode, 0x10]);
    cpu.set_flag(flag, set);

    cpu.clock(&mut bus).unwrap();

    cpu.pc() == 0x8012
}

#[test]
fn test_carry_branches() {
    assert!(taken(0x90, StatusFlags::CARRY, false)); // BCC
    assert!(!taken(0x90, StatusFlags::CARRY, true));
    assert!(taken(0xB0, StatusFlags::CARRY, true)); // BCS
    assert!(!taken(0xB0, StatusFlags::CARRY, false));
}

#[test]
fn test_zero_branches() {
    assert!(taken(0xD0, StatusFlags::ZERO, false)); // BNE
    assert!(!taken(0xD0, StatusFlags::ZERO, true));
    assert!(taken(0xF0, StatusFlags::ZERO, true)); // BEQ
    assert!(!taken(0xF0, StatusFlags::ZERO, false));
}

#[test]
fn test_negative_branches() {
    assert!(taken(0x10, StatusFlags::NEGATIVE, false)); // BPL
    assert!(!taken(0x10, StatusFlags::NEGATIVE, true));
    assert!(taken(0x30, StatusFlags::NEGATIVE, true)); // BMI
    assert!(!taken(0x30, StatusFlags::NEGATIVE, false));
}

#[test]
fn test_overflow_branches() {
    assert!(taken(0x50, StatusFlags::OVERFLOW, false)); // BVC
    assert!(!taken(0x50, StatusFlags::OVERFLOW, true));
    assert!(taken(0x70, StatusFlags::OVERFLOW, true)); // BVS
    assert!(!taken(0x70, StatusFlags::OVERFLOW, false));
}

#[test]
fn test_branch_leaves_flags() {
    let (mut cpu, mut bus) = setup_cpu();
    load(&mut bus, 0x8000, &[0xB0, 0x10]); // BCS
    cpu.set_flag(StatusFlags::CARRY, true);
    let before = cpu.status();

    cpu.clock(&mut bus).unwrap();

    assert_eq!(cpu.status(), before);
}
