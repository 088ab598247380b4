//! # Addressing Modes
//!
//! This module defines the 13 addressing modes supported by the 6502 processor
//! and the resolvers that turn operand bytes into an [`Operand`].
//!
//! Resolvers read their operand bytes through the bus starting at PC and leave
//! PC pointing at the next instruction. Every read they perform (including the
//! extra pointer reads of the indirect modes) is a logged bus transaction.

use crate::bus::Bus;
use crate::cpu::Cpu;

/// Modulus used for page-crossing detection.
///
/// Two addresses are on different pages when their remainders modulo this
/// value differ. Note this is not the same as comparing high bytes: any
/// index from 1 to 254 counts as a crossing.
pub const PAGE_MODULUS: u16 = 255;

/// Returns true if `from` and `to` fall on different pages.
pub fn page_crossed(from: u16, to: u16) -> bool {
    from % PAGE_MODULUS != to % PAGE_MODULUS
}

/// Resolved operand handed to an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// No operand bytes (implicit and accumulator instructions).
    Implied,

    /// Literal byte: an immediate value or a branch offset. Never
    /// dereferenced.
    Immediate(u8),

    /// Effective address of a memory operand.
    Address {
        /// Effective address
        address: u16,
        /// Whether indexing moved the address onto another page
        page_crossed: bool,
    },
}

impl Operand {
    /// The effective address, if this operand names one.
    pub fn address(self) -> Option<u16> {
        match self {
            Operand::Address { address, .. } => Some(address),
            _ => None,
        }
    }

    /// Whether indexing crossed a page.
    pub fn page_crossed(self) -> bool {
        matches!(
            self,
            Operand::Address {
                page_crossed: true,
                ..
            }
        )
    }
}

/// 6502 addressing mode enumeration.
///
/// The addressing mode determines how the CPU interprets the operand bytes
/// that follow an opcode and how it calculates the effective memory address
/// for the operation.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implicit, Accumulator
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative, IndirectX, IndirectY
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// No operand, operation implied by instruction.
    ///
    /// Examples: CLC, RTS, NOP
    Implicit,

    /// Operates directly on the accumulator register.
    ///
    /// Examples: LSR A, ROL A, ASL A
    Accumulator,

    /// 8-bit constant operand in instruction.
    ///
    /// Example: LDA #$10 (load immediate value 0x10 into accumulator)
    Immediate,

    /// 8-bit address in zero page (0x00-0xFF).
    ///
    /// Example: LDA $80 (load from address 0x0080)
    ZeroPage,

    /// Zero page address indexed by X register.
    ///
    /// Example: LDA $80,X (load from address 0x0080 + X, wraps within zero page)
    ZeroPageX,

    /// Zero page address indexed by Y register.
    ///
    /// Example: LDX $80,Y (load from address 0x0080 + Y, wraps within zero page)
    ZeroPageY,

    /// 8-bit offset for branch instructions.
    ///
    /// Example: BEQ label
    Relative,

    /// Full 16-bit address.
    ///
    /// Example: JMP $1234 (jump to address 0x1234)
    Absolute,

    /// 16-bit address indexed by X register.
    ///
    /// Example: LDA $1234,X (load from address 0x1234 + X)
    /// May incur +1 cycle penalty if page boundary is crossed.
    AbsoluteX,

    /// 16-bit address indexed by Y register.
    ///
    /// Example: LDA $1234,Y (load from address 0x1234 + Y)
    /// May incur +1 cycle penalty if page boundary is crossed.
    AbsoluteY,

    /// Indirect jump through 16-bit pointer.
    ///
    /// Example: JMP ($FFFC) (jump to address stored at 0xFFFC/0xFFFD)
    /// Only used by JMP instruction.
    Indirect,

    /// Indexed indirect: (ZP + X) then dereference.
    ///
    /// Example: LDA ($40,X) (add X to 0x40, read 16-bit address from that ZP location, load from result)
    IndirectX,

    /// Indirect indexed: ZP dereference then + Y.
    ///
    /// Example: LDA ($40),Y (read 16-bit address from ZP 0x40, add Y, load from result)
    /// May incur +1 cycle penalty if page boundary is crossed.
    IndirectY,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    pub fn operand_bytes(self) -> u16 {
        match self {
            AddressingMode::Implicit | AddressingMode::Accumulator => 0,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
            _ => 1,
        }
    }

    /// Reads the operand for this mode starting at PC and advances PC past it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sbc6502::{AddressingMode, Bus, Cpu, RamDevice};
    ///
    /// let mut bus = Bus::new();
    /// bus.register_auto(0x0000, Box::new(RamDevice::new(0x1000)));
    /// bus.write_short_le(0x0200, 0x01FF); // LDA $01FF,X operand
    ///
    /// let mut cpu = Cpu::new();
    /// cpu.set_pc(0x0200);
    /// cpu.set_x(0x01);
    ///
    /// let operand = AddressingMode::AbsoluteX.resolve(&mut cpu, &mut bus);
    /// assert_eq!(operand.address(), Some(0x0200));
    /// assert_eq!(cpu.pc(), 0x0202);
    /// ```
    pub fn resolve(self, cpu: &mut Cpu, bus: &mut Bus) -> Operand {
        match self {
            AddressingMode::Implicit | AddressingMode::Accumulator => Operand::Implied,

            AddressingMode::Immediate | AddressingMode::Relative => {
                Operand::Immediate(cpu.fetch_byte(bus))
            }

            AddressingMode::ZeroPage => direct(cpu.fetch_byte(bus) as u16),

            AddressingMode::ZeroPageX => {
                let zp = cpu.fetch_byte(bus).wrapping_add(cpu.x());
                direct(zp as u16)
            }

            AddressingMode::ZeroPageY => {
                let zp = cpu.fetch_byte(bus).wrapping_add(cpu.y());
                direct(zp as u16)
            }

            AddressingMode::Absolute => direct(cpu.fetch_short(bus)),

            AddressingMode::AbsoluteX => {
                let base = cpu.fetch_short(bus);
                indexed(base, cpu.x())
            }

            AddressingMode::AbsoluteY => {
                let base = cpu.fetch_short(bus);
                indexed(base, cpu.y())
            }

            AddressingMode::Indirect => {
                let pointer = cpu.fetch_short(bus);
                direct(bus.read_short_le(pointer))
            }

            AddressingMode::IndirectX => {
                let pointer = cpu.fetch_byte(bus).wrapping_add(cpu.x());
                direct(bus.read_short_le(pointer as u16))
            }

            AddressingMode::IndirectY => {
                let pointer = cpu.fetch_byte(bus);
                let base = bus.read_short_le(pointer as u16);
                indexed(base, cpu.y())
            }
        }
    }
}

fn direct(address: u16) -> Operand {
    Operand::Address {
        address,
        page_crossed: false,
    }
}

fn indexed(base: u16, index: u8) -> Operand {
    let address = base.wrapping_add(index as u16);
    Operand::Address {
        address,
        page_crossed: page_crossed(base, address),
    }
}
