//! # CPU State and Execution
//!
//! This module contains the [`Cpu`] struct representing the 6502 processor state and
//! the tick-driven fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: Accumulator (A), index registers (X, Y)
//! - **Program counter** (PC): 16-bit address of next instruction
//! - **Stack pointer** (SP): 8-bit offset into stack page (0x0100-0x01FF)
//! - **Status flags**: packed [`StatusFlags`] (NV-BDIZC)
//! - **Cycle counters**: pending delay for the current instruction and a
//!   running total
//!
//! ## Execution Model
//!
//! The CPU does not own memory. Each [`clock`](Cpu::clock) takes the [`Bus`]
//! explicitly:
//! - **Busy** (pending cycles > 0): the tick only decrements the pending count
//! - **Fetch** (pending cycles == 0): the bus log is reset, then the next
//!   instruction is fetched, decoded and executed in full. Its cycle cost
//!   becomes the pending delay.
//!
//! An instruction's effects are visible on the bus immediately; the pending
//! delay is bookkeeping only.

use bitflags::bitflags;
use tracing::{debug, trace};

use crate::addressing::Operand;
use crate::bus::Bus;
use crate::opcodes::{Instruction, OPCODE_TABLE};
use crate::ExecutionError;

/// Address of the two-byte little-endian reset vector.
pub const RESET_VECTOR: u16 = 0xFFFC;

/// Base address of the hardware stack page.
pub const STACK_PAGE: u16 = 0x0100;

/// Stack pointer value after reset.
pub const STACK_TOP: u8 = 0xFF;

bitflags! {
    /// Processor status register.
    ///
    /// Bit layout (NV-BDIZC):
    /// - Bit 7: N (Negative)
    /// - Bit 6: V (Overflow)
    /// - Bit 5: (unused)
    /// - Bit 4: B (Break)
    /// - Bit 3: D (Decimal)
    /// - Bit 2: I (Interrupt Disable)
    /// - Bit 1: Z (Zero)
    /// - Bit 0: C (Carry)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StatusFlags: u8 {
        const CARRY = 1 << 0;
        const ZERO = 1 << 1;
        const INTERRUPT_DISABLE = 1 << 2;
        const DECIMAL = 1 << 3;
        const BREAK = 1 << 4;
        const UNUSED = 1 << 5;
        const OVERFLOW = 1 << 6;
        const NEGATIVE = 1 << 7;
    }
}

/// 6502 CPU state and execution context.
///
/// # Examples
///
/// ```
/// use sbc6502::{Bus, Cpu, RomDevice};
///
/// // 4KB ROM at the top of memory: LDA #$42, reset vector -> 0xF000
/// let mut image = vec![0xEA; 0x1000];
/// image[0x000] = 0xA9;
/// image[0x001] = 0x42;
/// image[0xFFC] = 0x00;
/// image[0xFFD] = 0xF0;
///
/// let mut bus = Bus::new();
/// bus.register_auto(0xF000, Box::new(RomDevice::new(image)));
///
/// let mut cpu = Cpu::new();
/// cpu.reset(&mut bus);
/// assert_eq!(cpu.pc(), 0xF000);
/// assert_eq!(cpu.sp(), 0xFF);
///
/// // First tick executes the whole instruction
/// cpu.clock(&mut bus).unwrap();
/// assert_eq!(cpu.a(), 0x42);
/// assert_eq!(cpu.pending_cycles(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Cpu {
    /// Accumulator register
    pub(crate) a: u8,

    /// X index register
    pub(crate) x: u8,

    /// Y index register
    pub(crate) y: u8,

    /// Program counter (address of next instruction)
    pub(crate) pc: u16,

    /// Stack pointer (0x0100 | sp gives full stack address)
    pub(crate) sp: u8,

    /// Status register
    pub(crate) status: StatusFlags,

    /// Ticks left before the next fetch
    pending_cycles: u8,

    /// Opcode of the instruction most recently fetched
    current_opcode: u8,

    /// Total cost of the instruction most recently executed
    current_cycles: u8,

    /// Operand resolved for the instruction most recently executed
    last_operand: Operand,

    /// Total CPU cycles charged since construction
    cycles: u64,

    /// Surface unknown opcodes as errors instead of no-op ticks
    strict_opcodes: bool,
}

impl Cpu {
    /// Creates a CPU with all registers and flags cleared.
    ///
    /// Call [`reset`](Cpu::reset) against a bus before clocking to load PC
    /// from the reset vector.
    pub fn new() -> Self {
        Self {
            a: 0x00,
            x: 0x00,
            y: 0x00,
            pc: 0x0000,
            sp: STACK_TOP,
            status: StatusFlags::empty(),
            pending_cycles: 0,
            current_opcode: 0,
            current_cycles: 0,
            last_operand: Operand::Implied,
            cycles: 0,
            strict_opcodes: false,
        }
    }

    /// Enables or disables strict opcode decoding.
    ///
    /// When enabled, [`clock`](Cpu::clock) reports an unknown opcode as
    /// [`ExecutionError::UnimplementedOpcode`] instead of treating it as a
    /// no-op tick.
    pub fn with_strict_opcodes(mut self, strict: bool) -> Self {
        self.strict_opcodes = strict;
        self
    }

    /// Returns true if unknown opcodes are reported as errors.
    pub fn strict_opcodes(&self) -> bool {
        self.strict_opcodes
    }

    /// Resets the processor against `bus`.
    ///
    /// - Pending cycles and the opcode/operand latches are zeroed
    /// - PC is loaded from the reset vector at 0xFFFC/0xFFFD (little-endian)
    /// - SP is set to 0xFF
    ///
    /// A, X, Y, the status register and the running cycle total are left
    /// alone.
    pub fn reset(&mut self, bus: &mut Bus) {
        self.pending_cycles = 0;
        self.current_opcode = 0;
        self.current_cycles = 0;
        self.last_operand = Operand::Implied;
        self.pc = bus.read_short_le(RESET_VECTOR);
        self.sp = STACK_TOP;
    }

    /// Looks up the instruction descriptor for `opcode`.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError::UnimplementedOpcode`] when the opcode has no
    /// descriptor (illegal opcodes, BRK and RTI).
    ///
    /// # Examples
    ///
    /// ```
    /// use sbc6502::{Cpu, ExecutionError};
    ///
    /// assert_eq!(Cpu::decode(0xA9).map(|i| i.mnemonic), Ok("LDA"));
    /// assert_eq!(
    ///     Cpu::decode(0x02).map(|i| i.mnemonic),
    ///     Err(ExecutionError::UnimplementedOpcode(0x02))
    /// );
    /// ```
    pub fn decode(opcode: u8) -> Result<&'static Instruction, ExecutionError> {
        OPCODE_TABLE[opcode as usize]
            .as_ref()
            .ok_or(ExecutionError::UnimplementedOpcode(opcode))
    }

    /// Advances the processor by one tick.
    ///
    /// While an instruction's pending cycles remain, the tick only decrements
    /// them. Otherwise the bus log is reset and the next instruction is
    /// fetched, resolved and executed atomically; its cycle cost becomes the
    /// new pending count.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError::UnimplementedOpcode`] for an unknown opcode
    /// when strict decoding is enabled. PC has already moved past the opcode
    /// byte.
    pub fn clock(&mut self, bus: &mut Bus) -> Result<(), ExecutionError> {
        if self.pending_cycles > 0 {
            self.pending_cycles -= 1;
            return Ok(());
        }

        bus.reset();

        let opcode_address = self.pc;
        let opcode = self.fetch_byte(bus);
        self.current_opcode = opcode;

        let instruction = match Self::decode(opcode) {
            Ok(instruction) => instruction,
            Err(error) => {
                debug!(
                    opcode = format_args!("0x{opcode:02X}"),
                    pc = format_args!("0x{opcode_address:04X}"),
                    "unknown opcode"
                );
                self.current_cycles = 0;
                self.last_operand = Operand::Implied;
                return if self.strict_opcodes { Err(error) } else { Ok(()) };
            }
        };

        let operand = instruction.mode.resolve(self, bus);
        self.last_operand = operand;

        trace!(
            pc = format_args!("0x{opcode_address:04X}"),
            mnemonic = instruction.mnemonic,
            ?operand,
            "execute"
        );

        let cost = instruction.execute(self, bus, operand);
        self.current_cycles = cost;
        self.pending_cycles = cost;
        self.cycles += cost as u64;

        Ok(())
    }

    // ========== Instruction Stream ==========

    /// Reads the byte at PC and advances PC.
    pub(crate) fn fetch_byte(&mut self, bus: &mut Bus) -> u8 {
        let value = bus.read_byte(self.pc);
        self.pc = self.pc.wrapping_add(1);
        value
    }

    /// Reads the little-endian short at PC and advances PC by two.
    pub(crate) fn fetch_short(&mut self, bus: &mut Bus) -> u16 {
        let value = bus.read_short_le(self.pc);
        self.pc = self.pc.wrapping_add(2);
        value
    }

    // ========== Operation Helpers ==========

    /// Value an operation works on: the literal for immediate operands, the
    /// byte at the effective address for memory operands, A otherwise.
    pub(crate) fn load_operand(&self, bus: &mut Bus, operand: Operand) -> u8 {
        match operand {
            Operand::Immediate(value) => value,
            Operand::Address { address, .. } => bus.read_byte(address),
            Operand::Implied => self.a,
        }
    }

    /// Sets Z if `value` is zero and N from bit 7 of `value`.
    pub(crate) fn set_zn(&mut self, value: u8) {
        self.status.set(StatusFlags::ZERO, value == 0);
        self.status.set(StatusFlags::NEGATIVE, value & 0x80 != 0);
    }

    /// Address of the current top-of-stack slot.
    pub(crate) fn stack_address(&self) -> u16 {
        STACK_PAGE | self.sp as u16
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the stack pointer value.
    ///
    /// Note: The full stack address is 0x0100 | SP. The stack grows downward from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Returns the status register.
    pub fn status(&self) -> StatusFlags {
        self.status
    }

    /// Returns the status register as a packed byte.
    pub fn status_bits(&self) -> u8 {
        self.status.bits()
    }

    /// Returns the total number of cycles charged since construction.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    // ========== Diagnostics ==========

    /// Ticks left before the next fetch.
    pub fn pending_cycles(&self) -> u8 {
        self.pending_cycles
    }

    /// Opcode most recently fetched.
    pub fn current_opcode(&self) -> u8 {
        self.current_opcode
    }

    /// Total cost of the instruction most recently executed.
    pub fn current_cycles(&self) -> u8 {
        self.current_cycles
    }

    /// Operand resolved for the instruction most recently executed.
    pub fn last_operand(&self) -> Operand {
        self.last_operand
    }

    // ========== Register Setters ==========

    /// Sets the accumulator register.
    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    /// Sets the X index register.
    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    /// Sets the Y index register.
    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    /// Sets the program counter.
    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// Sets the stack pointer.
    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    /// Replaces the status register.
    pub fn set_status(&mut self, status: StatusFlags) {
        self.status = status;
    }

    // ========== Status Flag Getters ==========

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.status.contains(StatusFlags::NEGATIVE)
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_v(&self) -> bool {
        self.status.contains(StatusFlags::OVERFLOW)
    }

    /// Returns true if the Break flag is set.
    pub fn flag_b(&self) -> bool {
        self.status.contains(StatusFlags::BREAK)
    }

    /// Returns true if the Decimal mode flag is set.
    pub fn flag_d(&self) -> bool {
        self.status.contains(StatusFlags::DECIMAL)
    }

    /// Returns true if the Interrupt Disable flag is set.
    pub fn flag_i(&self) -> bool {
        self.status.contains(StatusFlags::INTERRUPT_DISABLE)
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.status.contains(StatusFlags::ZERO)
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.status.contains(StatusFlags::CARRY)
    }

    /// Sets or clears a single flag.
    pub fn set_flag(&mut self, flag: StatusFlags, value: bool) {
        self.status.set(flag, value);
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}
