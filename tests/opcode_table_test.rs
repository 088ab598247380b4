//! Opcode table validation tests
//!
//! Verifies that the opcode table covers the documented instruction set
//! (without BRK and RTI) and that its metadata is consistent.

use sbc6502::{AddressingMode, Cpu, OPCODE_TABLE};

#[test]
fn test_opcode_table_population() {
    assert_eq!(OPCODE_TABLE.len(), 256);

    let supported = OPCODE_TABLE.iter().filter(|entry| entry.is_some()).count();
    assert_eq!(supported, 149, "documented opcodes minus BRK and RTI");
}

#[test]
fn test_interrupt_opcodes_absent() {
    assert!(OPCODE_TABLE[0x00].is_none(), "BRK");
    assert!(OPCODE_TABLE[0x40].is_none(), "RTI");
}

#[test]
fn test_size_validation() {
    for (opcode, instruction) in OPCODE_TABLE.iter().enumerate() {
        if let Some(instruction) = instruction {
            let size = instruction.size_bytes();
            assert!(
                (1..=3).contains(&size),
                "Opcode 0x{:02X} has invalid size: {}",
                opcode,
                size
            );
        }
    }
}

#[test]
fn test_cycle_counts_nonzero() {
    for (opcode, instruction) in OPCODE_TABLE.iter().enumerate() {
        if let Some(instruction) = instruction {
            assert!(
                (2..=7).contains(&instruction.cycles),
                "Opcode 0x{:02X} ({}) has cycle count {}",
                opcode,
                instruction.mnemonic,
                instruction.cycles
            );
        }
    }
}

#[test]
fn test_decode_matches_table() {
    for opcode in 0..=255u8 {
        let decoded = Cpu::decode(opcode).ok().map(|i| i.mnemonic);
        let listed = OPCODE_TABLE[opcode as usize].map(|i| i.mnemonic);
        assert_eq!(decoded, listed, "Opcode 0x{:02X}", opcode);
    }
}

#[test]
fn test_mnemonic_counts() {
    let count = |mnemonic: &str| {
        OPCODE_TABLE
            .iter()
            .flatten()
            .filter(|instruction| instruction.mnemonic == mnemonic)
            .count()
    };

    assert_eq!(count("LDA"), 8);
    assert_eq!(count("STA"), 7);
    assert_eq!(count("LDX"), 5);
    assert_eq!(count("ADC"), 8);
    assert_eq!(count("ASL"), 5);
    assert_eq!(count("JMP"), 2);
    assert_eq!(count("BIT"), 2);
    assert_eq!(count("BRK"), 0);
}

#[test]
fn test_known_entries() {
    let check = |opcode: usize, mnemonic: &str, mode: AddressingMode, cycles: u8| {
        let instruction = OPCODE_TABLE[opcode].expect("opcode present");
        assert_eq!(instruction.mnemonic, mnemonic);
        assert_eq!(instruction.mode, mode);
        assert_eq!(instruction.cycles, cycles);
    };

    check(0xA9, "LDA", AddressingMode::Immediate, 2);
    check(0xB1, "LDA", AddressingMode::IndirectY, 5);
    check(0x9D, "STA", AddressingMode::AbsoluteX, 5);
    check(0x6C, "JMP", AddressingMode::Indirect, 5);
    check(0x20, "JSR", AddressingMode::Absolute, 6);
    check(0x60, "RTS", AddressingMode::Implicit, 6);
    check(0x0A, "ASL", AddressingMode::Accumulator, 2);
    check(0xFE, "INC", AddressingMode::AbsoluteX, 7);
    check(0xD0, "BNE", AddressingMode::Relative, 2);
    check(0x48, "PHA", AddressingMode::Implicit, 3);
    check(0x68, "PLA", AddressingMode::Implicit, 4);
}

#[test]
fn test_relative_and_immediate_sizes() {
    for instruction in OPCODE_TABLE.iter().flatten() {
        match instruction.mode {
            AddressingMode::Relative | AddressingMode::Immediate => {
                assert_eq!(instruction.size_bytes(), 2)
            }
            AddressingMode::Absolute | AddressingMode::AbsoluteX | AddressingMode::Indirect => {
                assert_eq!(instruction.size_bytes(), 3)
            }
            AddressingMode::Implicit | AddressingMode::Accumulator => {
                assert_eq!(instruction.size_bytes(), 1)
            }
            _ => {}
        }
    }
}
