//! # Opcode Table
//!
//! This module contains the 256-entry opcode table that serves as the single
//! source of truth for instruction dispatch.
//!
//! Each supported opcode maps to exactly one [`Instruction`]: its mnemonic,
//! the [`AddressingMode`] used to resolve its operand, its base cycle cost
//! and the function implementing it. Entries for illegal opcodes (and for
//! BRK/RTI, since interrupts other than reset are not modelled) are `None`.
//!
//! The table covers the 149 documented NMOS opcodes other than BRK and RTI.

use crate::addressing::{AddressingMode, Operand};
use crate::bus::Bus;
use crate::cpu::Cpu;
use crate::instructions::{
    alu, branches, control, flags, inc_dec, load_store, shifts, stack, transfer,
};

use AddressingMode::*;

/// Instruction body.
///
/// Receives the resolved operand, performs all of the instruction's effects
/// and returns the cycles it costs on top of [`Instruction::cycles`].
pub type Operation = fn(&mut Cpu, &mut Bus, Operand) -> u8;

/// Descriptor for a single supported opcode.
///
/// # Examples
///
/// ```
/// use sbc6502::{AddressingMode, OPCODE_TABLE};
///
/// // Look up LDA immediate (opcode 0xA9)
/// let lda_imm = OPCODE_TABLE[0xA9].as_ref().unwrap();
/// assert_eq!(lda_imm.mnemonic, "LDA");
/// assert_eq!(lda_imm.mode, AddressingMode::Immediate);
/// assert_eq!(lda_imm.cycles, 2);
/// assert_eq!(lda_imm.size_bytes(), 2);
///
/// // Illegal opcodes have no descriptor
/// assert!(OPCODE_TABLE[0x02].is_none());
/// ```
#[derive(Clone, Copy)]
pub struct Instruction {
    /// Three-letter instruction name (e.g., "LDA", "STA").
    pub mnemonic: &'static str,

    /// Addressing mode used to resolve the operand.
    pub mode: AddressingMode,

    /// Base cycle cost (before page-crossing and branch penalties).
    pub cycles: u8,

    /// Function implementing the instruction.
    pub operation: Operation,
}

impl Instruction {
    /// Runs the operation and returns the total cost of the instruction.
    pub fn execute(&self, cpu: &mut Cpu, bus: &mut Bus, operand: Operand) -> u8 {
        self.cycles + (self.operation)(cpu, bus, operand)
    }

    /// Total instruction size in bytes (opcode + operands).
    pub fn size_bytes(&self) -> u16 {
        1 + self.mode.operand_bytes()
    }
}

impl std::fmt::Debug for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Instruction")
            .field("mnemonic", &self.mnemonic)
            .field("mode", &self.mode)
            .field("cycles", &self.cycles)
            .finish_non_exhaustive()
    }
}

/// Opcode table indexed by opcode byte value.
///
/// # Examples
///
/// ```
/// use sbc6502::OPCODE_TABLE;
///
/// let supported = OPCODE_TABLE.iter().filter(|entry| entry.is_some()).count();
/// assert_eq!(supported, 149);
///
/// let jsr = OPCODE_TABLE[0x20].as_ref().unwrap();
/// println!("{} - {} cycles, {} bytes", jsr.mnemonic, jsr.cycles, jsr.size_bytes());
/// // Output: JSR - 6 cycles, 3 bytes
/// ```
pub static OPCODE_TABLE: [Option<Instruction>; 256] = build_table();

const fn op(
    mnemonic: &'static str,
    mode: AddressingMode,
    cycles: u8,
    operation: Operation,
) -> Option<Instruction> {
    Some(Instruction {
        mnemonic,
        mode,
        cycles,
        operation,
    })
}

const fn build_table() -> [Option<Instruction>; 256] {
    let mut t: [Option<Instruction>; 256] = [None; 256];

    // ========== Load / Store ==========
    t[0xA9] = op("LDA", Immediate, 2, load_store::lda);
    t[0xA5] = op("LDA", ZeroPage, 3, load_store::lda);
    t[0xB5] = op("LDA", ZeroPageX, 4, load_store::lda);
    t[0xAD] = op("LDA", Absolute, 4, load_store::lda);
    t[0xBD] = op("LDA", AbsoluteX, 4, load_store::lda);
    t[0xB9] = op("LDA", AbsoluteY, 4, load_store::lda);
    t[0xA1] = op("LDA", IndirectX, 6, load_store::lda);
    t[0xB1] = op("LDA", IndirectY, 5, load_store::lda);

    t[0xA2] = op("LDX", Immediate, 2, load_store::ldx);
    t[0xA6] = op("LDX", ZeroPage, 3, load_store::ldx);
    t[0xB6] = op("LDX", ZeroPageY, 4, load_store::ldx);
    t[0xAE] = op("LDX", Absolute, 4, load_store::ldx);
    t[0xBE] = op("LDX", AbsoluteY, 4, load_store::ldx);

    t[0xA0] = op("LDY", Immediate, 2, load_store::ldy);
    t[0xA4] = op("LDY", ZeroPage, 3, load_store::ldy);
    t[0xB4] = op("LDY", ZeroPageX, 4, load_store::ldy);
    t[0xAC] = op("LDY", Absolute, 4, load_store::ldy);
    t[0xBC] = op("LDY", AbsoluteX, 4, load_store::ldy);

    t[0x85] = op("STA", ZeroPage, 3, load_store::sta);
    t[0x95] = op("STA", ZeroPageX, 4, load_store::sta);
    t[0x8D] = op("STA", Absolute, 4, load_store::sta);
    t[0x9D] = op("STA", AbsoluteX, 5, load_store::sta);
    t[0x99] = op("STA", AbsoluteY, 5, load_store::sta);
    t[0x81] = op("STA", IndirectX, 6, load_store::sta);
    t[0x91] = op("STA", IndirectY, 6, load_store::sta);

    t[0x86] = op("STX", ZeroPage, 3, load_store::stx);
    t[0x96] = op("STX", ZeroPageY, 4, load_store::stx);
    t[0x8E] = op("STX", Absolute, 4, load_store::stx);

    t[0x84] = op("STY", ZeroPage, 3, load_store::sty);
    t[0x94] = op("STY", ZeroPageX, 4, load_store::sty);
    t[0x8C] = op("STY", Absolute, 4, load_store::sty);

    // ========== Arithmetic / Logic ==========
    t[0x69] = op("ADC", Immediate, 2, alu::adc);
    t[0x65] = op("ADC", ZeroPage, 3, alu::adc);
    t[0x75] = op("ADC", ZeroPageX, 4, alu::adc);
    t[0x6D] = op("ADC", Absolute, 4, alu::adc);
    t[0x7D] = op("ADC", AbsoluteX, 4, alu::adc);
    t[0x79] = op("ADC", AbsoluteY, 4, alu::adc);
    t[0x61] = op("ADC", IndirectX, 6, alu::adc);
    t[0x71] = op("ADC", IndirectY, 5, alu::adc);

    t[0xE9] = op("SBC", Immediate, 2, alu::sbc);
    t[0xE5] = op("SBC", ZeroPage, 3, alu::sbc);
    t[0xF5] = op("SBC", ZeroPageX, 4, alu::sbc);
    t[0xED] = op("SBC", Absolute, 4, alu::sbc);
    t[0xFD] = op("SBC", AbsoluteX, 4, alu::sbc);
    t[0xF9] = op("SBC", AbsoluteY, 4, alu::sbc);
    t[0xE1] = op("SBC", IndirectX, 6, alu::sbc);
    t[0xF1] = op("SBC", IndirectY, 5, alu::sbc);

    t[0x29] = op("AND", Immediate, 2, alu::and);
    t[0x25] = op("AND", ZeroPage, 3, alu::and);
    t[0x35] = op("AND", ZeroPageX, 4, alu::and);
    t[0x2D] = op("AND", Absolute, 4, alu::and);
    t[0x3D] = op("AND", AbsoluteX, 4, alu::and);
    t[0x39] = op("AND", AbsoluteY, 4, alu::and);
    t[0x21] = op("AND", IndirectX, 6, alu::and);
    t[0x31] = op("AND", IndirectY, 5, alu::and);

    t[0x09] = op("ORA", Immediate, 2, alu::ora);
    t[0x05] = op("ORA", ZeroPage, 3, alu::ora);
    t[0x15] = op("ORA", ZeroPageX, 4, alu::ora);
    t[0x0D] = op("ORA", Absolute, 4, alu::ora);
    t[0x1D] = op("ORA", AbsoluteX, 4, alu::ora);
    t[0x19] = op("ORA", AbsoluteY, 4, alu::ora);
    t[0x01] = op("ORA", IndirectX, 6, alu::ora);
    t[0x11] = op("ORA", IndirectY, 5, alu::ora);

    t[0x49] = op("EOR", Immediate, 2, alu::eor);
    t[0x45] = op("EOR", ZeroPage, 3, alu::eor);
    t[0x55] = op("EOR", ZeroPageX, 4, alu::eor);
    t[0x4D] = op("EOR", Absolute, 4, alu::eor);
    t[0x5D] = op("EOR", AbsoluteX, 4, alu::eor);
    t[0x59] = op("EOR", AbsoluteY, 4, alu::eor);
    t[0x41] = op("EOR", IndirectX, 6, alu::eor);
    t[0x51] = op("EOR", IndirectY, 5, alu::eor);

    t[0xC9] = op("CMP", Immediate, 2, alu::cmp);
    t[0xC5] = op("CMP", ZeroPage, 3, alu::cmp);
    t[0xD5] = op("CMP", ZeroPageX, 4, alu::cmp);
    t[0xCD] = op("CMP", Absolute, 4, alu::cmp);
    t[0xDD] = op("CMP", AbsoluteX, 4, alu::cmp);
    t[0xD9] = op("CMP", AbsoluteY, 4, alu::cmp);
    t[0xC1] = op("CMP", IndirectX, 6, alu::cmp);
    t[0xD1] = op("CMP", IndirectY, 5, alu::cmp);

    t[0xE0] = op("CPX", Immediate, 2, alu::cpx);
    t[0xE4] = op("CPX", ZeroPage, 3, alu::cpx);
    t[0xEC] = op("CPX", Absolute, 4, alu::cpx);

    t[0xC0] = op("CPY", Immediate, 2, alu::cpy);
    t[0xC4] = op("CPY", ZeroPage, 3, alu::cpy);
    t[0xCC] = op("CPY", Absolute, 4, alu::cpy);

    t[0x24] = op("BIT", ZeroPage, 3, alu::bit);
    t[0x2C] = op("BIT", Absolute, 4, alu::bit);

    // ========== Increment / Decrement ==========
    t[0xE6] = op("INC", ZeroPage, 5, inc_dec::inc);
    t[0xF6] = op("INC", ZeroPageX, 6, inc_dec::inc);
    t[0xEE] = op("INC", Absolute, 6, inc_dec::inc);
    t[0xFE] = op("INC", AbsoluteX, 7, inc_dec::inc);

    t[0xC6] = op("DEC", ZeroPage, 5, inc_dec::dec);
    t[0xD6] = op("DEC", ZeroPageX, 6, inc_dec::dec);
    t[0xCE] = op("DEC", Absolute, 6, inc_dec::dec);
    t[0xDE] = op("DEC", AbsoluteX, 7, inc_dec::dec);

    t[0xE8] = op("INX", Implicit, 2, inc_dec::inx);
    t[0xC8] = op("INY", Implicit, 2, inc_dec::iny);
    t[0xCA] = op("DEX", Implicit, 2, inc_dec::dex);
    t[0x88] = op("DEY", Implicit, 2, inc_dec::dey);

    // ========== Shifts / Rotates ==========
    t[0x0A] = op("ASL", Accumulator, 2, shifts::asl);
    t[0x06] = op("ASL", ZeroPage, 5, shifts::asl);
    t[0x16] = op("ASL", ZeroPageX, 6, shifts::asl);
    t[0x0E] = op("ASL", Absolute, 6, shifts::asl);
    t[0x1E] = op("ASL", AbsoluteX, 7, shifts::asl);

    t[0x4A] = op("LSR", Accumulator, 2, shifts::lsr);
    t[0x46] = op("LSR", ZeroPage, 5, shifts::lsr);
    t[0x56] = op("LSR", ZeroPageX, 6, shifts::lsr);
    t[0x4E] = op("LSR", Absolute, 6, shifts::lsr);
    t[0x5E] = op("LSR", AbsoluteX, 7, shifts::lsr);

    t[0x2A] = op("ROL", Accumulator, 2, shifts::rol);
    t[0x26] = op("ROL", ZeroPage, 5, shifts::rol);
    t[0x36] = op("ROL", ZeroPageX, 6, shifts::rol);
    t[0x2E] = op("ROL", Absolute, 6, shifts::rol);
    t[0x3E] = op("ROL", AbsoluteX, 7, shifts::rol);

    t[0x6A] = op("ROR", Accumulator, 2, shifts::ror);
    t[0x66] = op("ROR", ZeroPage, 5, shifts::ror);
    t[0x76] = op("ROR", ZeroPageX, 6, shifts::ror);
    t[0x6E] = op("ROR", Absolute, 6, shifts::ror);
    t[0x7E] = op("ROR", AbsoluteX, 7, shifts::ror);

    // ========== Branches ==========
    t[0x90] = op("BCC", Relative, 2, branches::bcc);
    t[0xB0] = op("BCS", Relative, 2, branches::bcs);
    t[0xD0] = op("BNE", Relative, 2, branches::bne);
    t[0xF0] = op("BEQ", Relative, 2, branches::beq);
    t[0x10] = op("BPL", Relative, 2, branches::bpl);
    t[0x30] = op("BMI", Relative, 2, branches::bmi);
    t[0x50] = op("BVC", Relative, 2, branches::bvc);
    t[0x70] = op("BVS", Relative, 2, branches::bvs);

    // ========== Control Flow ==========
    t[0x4C] = op("JMP", Absolute, 3, control::jmp);
    t[0x6C] = op("JMP", Indirect, 5, control::jmp);
    t[0x20] = op("JSR", Absolute, 6, control::jsr);
    t[0x60] = op("RTS", Implicit, 6, control::rts);
    t[0xEA] = op("NOP", Implicit, 2, control::nop);

    // ========== Stack ==========
    t[0x48] = op("PHA", Implicit, 3, stack::pha);
    t[0x08] = op("PHP", Implicit, 3, stack::php);
    t[0x68] = op("PLA", Implicit, 4, stack::pla);
    t[0x28] = op("PLP", Implicit, 4, stack::plp);

    // ========== Status Flags ==========
    t[0x18] = op("CLC", Implicit, 2, flags::clc);
    t[0x38] = op("SEC", Implicit, 2, flags::sec);
    t[0x58] = op("CLI", Implicit, 2, flags::cli);
    t[0x78] = op("SEI", Implicit, 2, flags::sei);
    t[0xD8] = op("CLD", Implicit, 2, flags::cld);
    t[0xF8] = op("SED", Implicit, 2, flags::sed);
    t[0xB8] = op("CLV", Implicit, 2, flags::clv);

    // ========== Transfers ==========
    t[0xAA] = op("TAX", Implicit, 2, transfer::tax);
    t[0xA8] = op("TAY", Implicit, 2, transfer::tay);
    t[0x8A] = op("TXA", Implicit, 2, transfer::txa);
    t[0x98] = op("TYA", Implicit, 2, transfer::tya);
    t[0xBA] = op("TSX", Implicit, 2, transfer::tsx);
    t[0x9A] = op("TXS", Implicit, 2, transfer::txs);

    t
}
