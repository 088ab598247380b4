//! Tests for the load and store instructions (LDA, LDX, LDY, STA, STX, STY).
//!
//! Tests cover:
//! - All addressing modes
//! - Flag updates (Z, N) on loads, no flag changes on stores
//! - Cycle counts including page crossing penalties on indexed reads
//! - Floating reads from unmapped addresses and dropped writes to ROM

use sbc6502::{Bus, Cpu, RamDevice, RomDevice};

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

// ========== LDA Tests ==========

#[test]
fn test_lda_immediate_basic() {
    let (mut cpu, mut bus) = setup_cpu();
    load(&mut bus, 0x8000, &[0xA9, 0x42]); // LDA #$42

    cpu.clock(&mut bus).unwrap();

    assert_eq!(cpu.a(), 0x42);
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.pc(), 0x8002);
    assert_eq!(cpu.current_cycles(), 2);
}

#[test]
fn test_lda_immediate_zero_sets_z() {
    let (mut cpu, mut bus) = setup_cpu();
    load(&mut bus, 0x8000, &[0xA9, 0x00]); // LDA #$00
    cpu.set_a(0xFF);

    cpu.clock(&mut bus).unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
}

#[test]
fn test_lda_immediate_0x80_sets_n() {
    let (mut cpu, mut bus) = setup_cpu();
    load(&mut bus, 0x8000, &[0xA9, 0x80]); // LDA #$80

    cpu.clock(&mut bus).unwrap();

    assert_eq!(cpu.a(), 0x80);
    assert!(!cpu.flag_z());
    assert!(cpu.flag_n());
}

#[test]
fn test_lda_zero_page() {
    let (mut cpu, mut bus) = setup_cpu();
    load(&mut bus, 0x8000, &[0xA5, 0x10]); // LDA $10
    bus.write_byte(0x0010, 0x37);

    cpu.clock(&mut bus).unwrap();

    assert_eq!(cpu.a(), 0x37);
    assert_eq!(cpu.current_cycles(), 3);
}

#[test]
fn test_lda_zero_page_x_wraps() {
    let (mut cpu, mut bus) = setup_cpu();
    load(&mut bus, 0x8000, &[0xB5, 0xF0]); // LDA $F0,X
    bus.write_byte(0x0010, 0x99);
    bus.write_byte(0x0110, 0x11);
    cpu.set_x(0x20);

    cpu.clock(&mut bus).unwrap();

    assert_eq!(cpu.a(), 0x99);
    assert_eq!(cpu.current_cycles(), 4);
}

#[test]
fn test_lda_absolute() {
    let (mut cpu, mut bus) = setup_cpu();
    load(&mut bus, 0x8000, &[0xAD, 0x00, 0x30]); // LDA $3000
    bus.write_byte(0x3000, 0xC3);

    cpu.clock(&mut bus).unwrap();

    assert_eq!(cpu.a(), 0xC3);
    assert!(cpu.flag_n());
    assert_eq!(cpu.pc(), 0x8003);
    assert_eq!(cpu.current_cycles(), 4);
}

#[test]
fn test_lda_absolute_x_without_crossing() {
    let (mut cpu, mut bus) = setup_cpu();
    load(&mut bus, 0x8000, &[0xBD, 0x00, 0x30]); // LDA $3000,X
    bus.write_byte(0x3000, 0x01);
    cpu.set_x(0x00);

    cpu.clock(&mut bus).unwrap();

    assert_eq!(cpu.a(), 0x01);
    assert_eq!(cpu.current_cycles(), 4);
}

#[test]
fn test_lda_absolute_x_page_crossing_penalty() {
    let (mut cpu, mut bus) = setup_cpu();
    load(&mut bus, 0x8000, &[0xBD, 0x00, 0x30]); // LDA $3000,X
    bus.write_byte(0x3001, 0x02);
    cpu.set_x(0x01);

    cpu.clock(&mut bus).unwrap();

    assert_eq!(cpu.a(), 0x02);
    assert_eq!(cpu.current_cycles(), 5);
}

#[test]
fn test_lda_absolute_y_index_0xff_no_penalty() {
    let (mut cpu, mut bus) = setup_cpu();
    load(&mut bus, 0x8000, &[0xB9, 0x00, 0x30]); // LDA $3000,Y
    bus.write_byte(0x30FF, 0x7F);
    cpu.set_y(0xFF);

    cpu.clock(&mut bus).unwrap();

    assert_eq!(cpu.a(), 0x7F);
    assert_eq!(cpu.current_cycles(), 4);
}

#[test]
fn test_lda_indirect_x() {
    let (mut cpu, mut bus) = setup_cpu();
    load(&mut bus, 0x8000, &[0xA1, 0x40]); // LDA ($40,X)
    bus.write_short_le(0x0044, 0x2000);
    bus.write_byte(0x2000, 0x66);
    cpu.set_x(0x04);

    cpu.clock(&mut bus).unwrap();

    assert_eq!(cpu.a(), 0x66);
    assert_eq!(cpu.current_cycles(), 6);
}

#[test]
fn test_lda_indirect_y() {
    let (mut cpu, mut bus) = setup_cpu();
    load(&mut bus, 0x8000, &[0xB1, 0x40]); // LDA ($40),Y
    bus.write_short_le(0x0040, 0x2000);
    bus.write_byte(0x2000, 0x55);

    cpu.clock(&mut bus).unwrap();

    assert_eq!(cpu.a(), 0x55);
    assert_eq!(cpu.current_cycles(), 5);
}

#[test]
fn test_lda_indirect_y_page_crossing_penalty() {
    let (mut cpu, mut bus) = setup_cpu();
    load(&mut bus, 0x8000, &[0xB1, 0x40]); // LDA ($40),Y
    bus.write_short_le(0x0040, 0x2000);
    bus.write_byte(0x2010, 0x44);
    cpu.set_y(0x10);

    cpu.clock(&mut bus).unwrap();

    assert_eq!(cpu.a(), 0x44);
    assert_eq!(cpu.current_cycles(), 6);
}

#[test]
fn test_lda_unmapped_address_floats_high() {
    let mut image = vec![0xEA; 0x1000];
    image[..3].copy_from_slice(&[0xAD, 0x00, 0x50]); // LDA $5000
    image[0xFFC] = 0x00;
    image[0xFFD] = 0xF0;

    let mut bus = Bus::new();
    bus.register_auto(0x0000, Box::new(RamDevice::new(0x1000)));
    bus.register_auto(0xF000, Box::new(RomDevice::new(image)));

    let mut cpu = Cpu::new();
    cpu.reset(&mut bus);
    cpu.clock(&mut bus).unwrap();

    assert_eq!(cpu.a(), 0xFF);
    assert!(cpu.flag_n());
}

// ========== LDX / LDY Tests ==========

#[test]
fn test_ldx_immediate() {
    let (mut cpu, mut bus) = setup_cpu();
    load(&mut bus, 0x8000, &[0xA2, 0x00]); // LDX #$00

    cpu.clock(&mut bus).unwrap();

    assert_eq!(cpu.x(), 0x00);
    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.a(), 0x00);
}

#[test]
fn test_ldx_zero_page_y_wraps() {
    let (mut cpu, mut bus) = setup_cpu();
    load(&mut bus, 0x8000, &[0xB6, 0xF0]); // LDX $F0,Y
    bus.write_byte(0x0010, 0x81);
    cpu.set_y(0x20);

    cpu.clock(&mut bus).unwrap();

    assert_eq!(cpu.x(), 0x81);
    assert!(cpu.flag_n());
    assert_eq!(cpu.current_cycles(), 4);
}

#[test]
fn test_ldy_absolute_x() {
    let (mut cpu, mut bus) = setup_cpu();
    load(&mut bus, 0x8000, &[0xBC, 0x00, 0x30]); // LDY $3000,X
    bus.write_byte(0x3002, 0x12);
    cpu.set_x(0x02);

    cpu.clock(&mut bus).unwrap();

    assert_eq!(cpu.y(), 0x12);
    assert_eq!(cpu.current_cycles(), 5);
}

// ========== Store Tests ==========

#[test]
fn test_sta_absolute() {
    let (mut cpu, mut bus) = setup_cpu();
    load(&mut bus, 0x8000, &[0x8D, 0x00, 0x02]); // STA $0200
    cpu.set_a(0x42);

    cpu.clock(&mut bus).unwrap();

    assert_eq!(bus.read_byte(0x0200), 0x42);
    assert_eq!(cpu.pc(), 0x8003);
    assert_eq!(cpu.current_cycles(), 4);
}

#[test]
fn test_sta_zero_page() {
    let (mut cpu, mut bus) = setup_cpu();
    load(&mut bus, 0x8000, &[0x85, 0x20]); // STA $20
    cpu.set_a(0x17);

    cpu.clock(&mut bus).unwrap();

    assert_eq!(bus.read_byte(0x0020), 0x17);
    assert_eq!(cpu.current_cycles(), 3);
}

#[test]
fn test_sta_absolute_x_has_no_penalty() {
    let (mut cpu, mut bus) = setup_cpu();
    load(&mut bus, 0x8000, &[0x9D, 0x00, 0x30]); // STA $3000,X
    cpu.set_a(0x01);
    cpu.set_x(0x05);

    cpu.clock(&mut bus).unwrap();

    assert_eq!(bus.read_byte(0x3005), 0x01);
    assert_eq!(cpu.current_cycles(), 5);
}

#[test]
fn test_sta_indirect_y() {
    let (mut cpu, mut bus) = setup_cpu();
    load(&mut bus, 0x8000, &[0x91, 0x40]); // STA ($40),Y
    bus.write_short_le(0x0040, 0x2000);
    cpu.set_a(0xAB);
    cpu.set_y(0x03);

    cpu.clock(&mut bus).unwrap();

    assert_eq!(bus.read_byte(0x2003), 0xAB);
    assert_eq!(cpu.current_cycles(), 6);
}

#[test]
fn test_store_does_not_touch_flags() {
    let (mut cpu, mut bus) = setup_cpu();
    load(&mut bus, 0x8000, &[0x8D, 0x00, 0x02]); // STA $0200
    cpu.set_a(0x00);
    let before = cpu.status();

    cpu.clock(&mut bus).unwrap();

    assert_eq!(cpu.status(), before);
}

#[test]
fn test_stx_zero_page_y() {
    let (mut cpu, mut bus) = setup_cpu();
    load(&mut bus, 0x8000, &[0x96, 0x10]); // STX $10,Y
    cpu.set_x(0x77);
    cpu.set_y(0x01);

    cpu.clock(&mut bus).unwrap();

    assert_eq!(bus.read_byte(0x0011), 0x77);
    assert_eq!(cpu.current_cycles(), 4);
}

#[test]
fn test_sty_zero_page_x() {
    let (mut cpu, mut bus) = setup_cpu();
    load(&mut bus, 0x8000, &[0x94, 0x10]); // STY $10,X
    cpu.set_y(0x66);
    cpu.set_x(0x02);

    cpu.clock(&mut bus).unwrap();

    assert_eq!(bus.read_byte(0x0012), 0x66);
}

#[test]
fn test_sta_to_rom_is_dropped() {
    let mut image = vec![0xEA; 0x1000];
    image[..3].copy_from_slice(&[0x8D, 0x10, 0xF0]); // STA $F010
    image[0xFFC] = 0x00;
    image[0xFFD] = 0xF0;

    let mut bus = Bus::new();
    bus.register_auto(0xF000, Box::new(RomDevice::new(image)));

    let mut cpu = Cpu::new();
    cpu.reset(&mut bus);
    cpu.set_a(0x00);
    cpu.clock(&mut bus).unwrap();

    assert_eq!(bus.read_byte(0xF010), 0xEA);
}
