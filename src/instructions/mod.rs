//! # 6502 Instruction Implementations
//!
//! This module contains the implementations of all supported 6502 instructions, organized
//! by category. Each instruction is a standalone function with the [`Operation`] signature:
//! it receives the CPU, the bus and the already resolved [`Operand`], performs all of its
//! register, flag and bus mutation immediately, and returns the number of cycles it costs
//! on top of the opcode's base cost (page-crossing penalties, taken branches).
//!
//! ## Categories
//!
//! - **alu**: Arithmetic and logic operations (ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY, BIT)
//! - **branches**: Conditional branch instructions (BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS)
//! - **shifts**: Shift and rotate operations (ASL, LSR, ROL, ROR)
//! - **load_store**: Load and store instructions (LDA, LDX, LDY, STA, STX, STY)
//! - **inc_dec**: Increment and decrement operations (INC, DEC, INX, INY, DEX, DEY)
//! - **control**: Control flow instructions (JMP, JSR, RTS, NOP)
//! - **stack**: Stack operations (PHA, PHP, PLA, PLP)
//! - **flags**: Status flag manipulation (CLC, SEC, CLI, SEI, CLD, SED, CLV)
//! - **transfer**: Register transfer operations (TAX, TAY, TXA, TYA, TSX, TXS)
//!
//! [`Operation`]: crate::opcodes::Operation

use crate::addressing::Operand;

pub mod alu;
pub mod branches;
pub mod control;
pub mod flags;
pub mod inc_dec;
pub mod load_store;
pub mod shifts;
pub mod stack;
pub mod transfer;

/// Extra cycle charged by indexed reads whose effective address crossed a page.
pub(crate) fn page_penalty(operand: Operand) -> u8 {
    operand.page_crossed() as u8
}
