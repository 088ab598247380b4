//! # 6502 Single-Board Computer Core
//!
//! A tick-driven NMOS 6502 processor wired to a memory-mapped bus with RAM, ROM and
//! peripheral devices.
//!
//! This crate provides the instruction execution engine (opcode dispatch, addressing-mode
//! resolution, flag computation, cycle accounting), the [`Bus`] that arbitrates every read
//! and write between the processor and the attached devices, and a [`Machine`] that
//! assembles the two from a [`MachineConfig`].
//!
//! ## Quick Start
//!
//! ```rust
//! use sbc6502::{Machine, MachineConfig};
//!
//! let mut machine = Machine::new(MachineConfig::default()).unwrap();
//!
//! // ROM at 0xF000: LDA #$80, reset vector pointing at it
//! let mut image = vec![0xEA; 0x1000];
//! image[0] = 0xA9;
//! image[1] = 0x80;
//! image[0xFFC] = 0x00;
//! image[0xFFD] = 0xF0;
//!
//! machine.load_rom(&image).unwrap();
//! machine.reset();
//! assert_eq!(machine.cpu().pc(), 0xF000);
//!
//! machine.tick().unwrap();
//! assert_eq!(machine.cpu().a(), 0x80);
//! assert!(machine.cpu().flag_n());
//! assert!(!machine.cpu().flag_z());
//! ```
//!
//! ## Architecture
//!
//! - **Bus-centric**: the CPU never owns memory; every access goes through the [`Bus`],
//!   which records it in a transaction log
//! - **Atomic instructions**: an instruction completes on its fetch tick; its cycle cost is
//!   then spent as idle ticks
//! - **Device clock phase**: after each tick the bus latches its most recent transaction and
//!   every [`Device`] observes it, which is how chip-select logic is modelled
//! - **Table-driven design**: all opcode dispatch in a single static table
//!
//! ## Modules
//!
//! - `cpu` - CPU state and the fetch/busy tick loop
//! - `bus` - Address map, transaction log and device clocking
//! - `devices` - Device trait, RAM, ROM and the parallel I/O port
//! - `opcodes` - Opcode table
//! - `addressing` - Addressing modes and operand resolution
//! - `machine` - Board assembly and diagnostics
//! - `config` - Machine configuration
//!
//! ## Logging
//!
//! The crate emits `tracing` events (address-map conflicts at `warn`, device registration
//! and unknown opcodes at `debug`, every executed instruction at `trace`). It never installs
//! a subscriber.

use thiserror::Error;

pub mod addressing;
pub mod bus;
pub mod config;
pub mod cpu;
pub mod devices;
pub mod machine;
pub mod opcodes;

// Internal instruction implementations (not part of public API)
mod instructions;

// Re-export public API
pub use addressing::{AddressingMode, Operand};
pub use bus::{Bus, BusError, BusLatch, BusTransaction, DeviceId, TransactionKind};
pub use config::{ConfigError, MachineConfig};
pub use cpu::{Cpu, StatusFlags};
pub use devices::{ClockHook, ClockHooks, Device, DeviceError, IoPort, Pins, RamDevice, RomDevice};
pub use machine::{Diagnostics, Machine, MachineError};
pub use opcodes::{Instruction, Operation, OPCODE_TABLE};

/// Errors that can occur during CPU execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// The opcode has no instruction descriptor.
    ///
    /// Contains the opcode byte value for debugging purposes.
    #[error("Opcode 0x{0:02X} is not implemented")]
    UnimplementedOpcode(u8),
}
