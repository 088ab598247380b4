//! Tests for the increment and decrement instructions (INC, DEC, INX, INY, DEX, DEY).
//!
//! Tests cover:
//! - Wrapping at 0x00 and 0xFF
//! - Z/N flag updates on registers and memory
//! - Read-modify-write cycle counts (no indexed penalty)

use sbc6502::{Bus, Cpu, RamDevice};

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

// ========== Memory Tests ==========

#[test]
fn test_inc_zero_page() {
    let (mut cpu, mut bus) = setup_cpu();
    load(&mut bus, 0x8000, &[0xE6, 0x10]); // INC $10
    bus.write_byte(0x0010, 0x7F);

    cpu.clock(&mut bus).unwrap();

    assert_eq!(bus.read_byte(0x0010), 0x80);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_z());
    assert_eq!(cpu.current_cycles(), 5);
}

#[test]
fn test_inc_absolute_wraps_to_zero() {
    let (mut cpu, mut bus) = setup_cpu();
    load(&mut bus, 0x8000, &[0xEE, 0x00, 0x02]); // INC $0200
    bus.write_byte(0x0200, 0xFF);

    cpu.clock(&mut bus).unwrap();

    assert_eq!(bus.read_byte(0x0200), 0x00);
    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.current_cycles(), 6);
}

#[test]
fn test_inc_absolute_x_fixed_cost() {
    let (mut cpu, mut bus) = setup_cpu();
    load(&mut bus, 0x8000, &[0xFE, 0x00, 0x02]); // INC $0200,X
    cpu.set_x(0x01);

    cpu.clock(&mut bus).unwrap();

    assert_eq!(bus.read_byte(0x0201), 0x01);
    assert_eq!(cpu.current_cycles(), 7);
}

#[test]
fn test_dec_zero_page_x() {
    let (mut cpu, mut bus) = setup_cpu();
    load(&mut bus, 0x8000, &[0xD6, 0x10]); // DEC $10,X
    bus.write_byte(0x0012, 0x01);
    cpu.set_x(0x02);

    cpu.clock(&mut bus).unwrap();

    assert_eq!(bus.read_byte(0x0012), 0x00);
    assert!(cpu.flag_z());
    assert_eq!(cpu.current_cycles(), 6);
}

#[test]
fn test_dec_wraps_to_ff() {
    let (mut cpu, mut bus) = setup_cpu();
    load(&mut bus, 0x8000, &[0xCE, 0x00, 0x02]); // DEC $0200

    cpu.clock(&mut bus).unwrap();

    assert_eq!(bus.read_byte(0x0200), 0xFF);
    assert!(cpu.flag_n());
}

#[test]
fn test_inc_leaves_accumulator_alone() {
    let (mut cpu, mut bus) = setup_cpu();
    load(&mut bus, 0x8000, &[0xE6, 0x10]); // INC $10
    cpu.set_a(0x33);

    cpu.clock(&mut bus).unwrap();

    assert_eq!(cpu.a(), 0x33);
    assert_eq!(bus.read_byte(0x0010), 0x01);
}

// ========== Register Tests ==========

#[test]
fn test_inx_wraps() {
    let (mut cpu, mut bus) = setup_cpu();
    load(&mut bus, 0x8000, &[0xE8]); // INX
    cpu.set_x(0xFF);

    cpu.clock(&mut bus).unwrap();

    assert_eq!(cpu.x(), 0x00);
    assert!(cpu.flag_z());
    assert_eq!(cpu.pc(), 0x8001);
    assert_eq!(cpu.current_cycles(), 2);
}

#[test]
fn test_iny_sets_negative() {
    let (mut cpu, mut bus) = setup_cpu();
    load(&mut bus, 0x8000, &[0xC8]); // INY
    cpu.set_y(0x7F);

    cpu.clock(&mut bus).unwrap();

    assert_eq!(cpu.y(), 0x80);
    assert!(cpu.flag_n());
}

#[test]
fn test_dex_to_zero() {
    let (mut cpu, mut bus) = setup_cpu();
    load(&mut bus, 0x8000, &[0xCA]); // DEX
    cpu.set_x(0x01);

    cpu.clock(&mut bus).unwrap();

    assert_eq!(cpu.x(), 0x00);
    assert!(cpu.flag_z());
}

#[test]
fn test_dey_wraps() {
    let (mut cpu, mut bus) = setup_cpu();
    load(&mut bus, 0x8000, &[0x88]); // DEY

    cpu.clock(&mut bus).unwrap();

    assert_eq!(cpu.y(), 0xFF);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_z());
}
