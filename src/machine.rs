//! # Machine
//!
//! The assembling layer: a [`Bus`] populated from a [`MachineConfig`] plus
//! the [`Cpu`] that drives it.
//!
//! ## Memory Map (defaults)
//!
//! | Range           | Device  |
//! |-----------------|---------|
//! | 0x0000 - 0xEFFF | RAM     |
//! | 0xF000 - 0xFFFF | ROM     |
//! | `io_ports`      | I/O port (optional, takes priority over RAM) |
//!
//! ## Tick Order
//!
//! Each [`tick`](Machine::tick) clocks the processor once, then latches the
//! most recent bus transaction, then runs every device's clock phase in
//! registration order. The machine has no host loop of its own; the caller
//! decides how many ticks to run and may stop between any two.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::bus::{Bus, BusError, DeviceId};
use crate::config::{ConfigError, MachineConfig};
use crate::cpu::Cpu;
use crate::devices::{IoPort, RamDevice, RomDevice};
use crate::opcodes::OPCODE_TABLE;
use crate::ExecutionError;

/// Error returned by machine construction and execution.
#[derive(Debug, Error)]
pub enum MachineError {
    /// The configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A device could not be mapped.
    #[error(transparent)]
    Bus(#[from] BusError),

    /// The ROM image is larger than the ROM window.
    #[error("ROM image of {size} bytes does not fit the {capacity}-byte ROM window")]
    RomTooLarge {
        /// Image size in bytes
        size: usize,
        /// ROM window size in bytes
        capacity: usize,
    },

    /// The processor stopped on an instruction it cannot execute.
    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

/// Read-only snapshot of the processor for external renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    /// Opcode most recently fetched
    pub opcode: u8,
    /// Mnemonic of that opcode, if it is supported
    pub mnemonic: Option<&'static str>,
    /// Ticks left before the next fetch
    pub pending_cycles: u8,
    /// Total cost of the current instruction
    pub instruction_cycles: u8,
    /// Effective address resolved for the current instruction
    pub last_address: Option<u16>,
    /// Program counter
    pub pc: u16,
    /// Cycles charged since power-on
    pub cycles: u64,
    /// Ticks run since power-on
    pub ticks: u64,
}

/// A complete single-board computer.
///
/// # Examples
///
/// ```rust
/// use sbc6502::{Machine, MachineConfig};
///
/// let mut machine = Machine::new(MachineConfig::default()).unwrap();
///
/// // LDA #$2A ; STA $0200 ; reset vector -> 0xF000
/// let mut image = vec![0xEA; 0x1000];
/// image[..5].copy_from_slice(&[0xA9, 0x2A, 0x8D, 0x00, 0x02]);
/// image[0xFFC] = 0x00;
/// image[0xFFD] = 0xF0;
///
/// machine.load_rom(&image).unwrap();
/// machine.reset();
///
/// // LDA takes one fetch tick plus two busy ticks, STA then fetches
/// machine.run(4).unwrap();
/// assert_eq!(machine.bus_mut().read_byte(0x0200), 0x2A);
/// ```
#[derive(Debug)]
pub struct Machine {
    cpu: Cpu,
    bus: Bus,
    ram: DeviceId,
    rom: DeviceId,
    io_port: Option<DeviceId>,
    rom_size: usize,
    ticks: u64,
}

impl Machine {
    /// Builds a machine from `config`.
    ///
    /// The I/O port (if configured) is registered first so that its
    /// addresses take priority over RAM, then RAM at 0x0000, then ROM at
    /// `rom_base`. ROM starts zero-filled; provision it with
    /// [`load_rom`](Machine::load_rom) and then call
    /// [`reset`](Machine::reset).
    ///
    /// # Errors
    ///
    /// - [`MachineError::Config`] if `config` fails validation
    /// - [`MachineError::Bus`] if an I/O port address cannot be mapped
    pub fn new(config: MachineConfig) -> Result<Self, MachineError> {
        config.validate()?;

        let mut bus = Bus::new();

        let io_port = match config.io_base() {
            Some(base) => {
                let mut addresses = config.io_ports.clone();
                addresses.sort_unstable();
                addresses.dedup();

                let ports = config.io_span().unwrap_or(addresses.len());
                let mut port = IoPort::new(ports);
                port.select_on(base, &addresses);

                let id = bus.attach_at(base, Box::new(port));
                for &address in &addresses {
                    bus.register_at_offset(address, id)?;
                }
                Some(id)
            }
            None => None,
        };

        let ram = bus.register_auto(0x0000, Box::new(RamDevice::new(config.ram_size)));
        let rom = bus.register_auto(config.rom_base, Box::new(RomDevice::blank(config.rom_size)));

        debug!(
            ram_size = config.ram_size,
            rom_base = format_args!("0x{:04X}", config.rom_base),
            rom_size = config.rom_size,
            io_ports = config.io_ports.len(),
            strict_opcodes = config.strict_opcodes,
            "machine assembled"
        );

        Ok(Self {
            cpu: Cpu::new().with_strict_opcodes(config.strict_opcodes),
            bus,
            ram,
            rom,
            io_port,
            rom_size: config.rom_size,
            ticks: 0,
        })
    }

    /// Replaces the ROM contents with `image`.
    ///
    /// Meant to be called before the first [`reset`](Machine::reset). An
    /// image shorter than the window leaves the tail of the window floating.
    ///
    /// # Errors
    ///
    /// Returns [`MachineError::RomTooLarge`] if `image` does not fit the ROM
    /// window; the ROM is left unchanged.
    pub fn load_rom(&mut self, image: &[u8]) -> Result<(), MachineError> {
        if image.len() > self.rom_size {
            return Err(MachineError::RomTooLarge {
                size: image.len(),
                capacity: self.rom_size,
            });
        }

        if let Some(rom) = self.bus.device_as_mut::<RomDevice>(self.rom) {
            rom.load_image(image);
        }
        debug!(bytes = image.len(), "ROM image loaded");
        Ok(())
    }

    /// Resets the processor: PC is loaded from the reset vector and SP from
    /// the top of the stack page.
    pub fn reset(&mut self) {
        self.cpu.reset(&mut self.bus);
        debug!(pc = format_args!("0x{:04X}", self.cpu.pc()), "machine reset");
    }

    /// Advances the machine by one tick.
    ///
    /// The processor is clocked first, then the bus latches its most recent
    /// transaction and every device runs its clock phase. The bus and
    /// devices are clocked even when the processor reports an error.
    ///
    /// # Errors
    ///
    /// Returns the processor's [`ExecutionError`], if any.
    pub fn tick(&mut self) -> Result<(), ExecutionError> {
        let result = self.cpu.clock(&mut self.bus);
        self.bus.clock();
        self.bus.clock_devices();
        self.ticks += 1;
        result
    }

    /// Runs `ticks` ticks, stopping at the first error.
    ///
    /// # Errors
    ///
    /// Returns [`MachineError::Execution`] from the failing tick.
    pub fn run(&mut self, ticks: u64) -> Result<(), MachineError> {
        for _ in 0..ticks {
            self.tick()?;
        }
        Ok(())
    }

    /// Snapshot of the processor state.
    pub fn diagnostics(&self) -> Diagnostics {
        let opcode = self.cpu.current_opcode();
        Diagnostics {
            opcode,
            mnemonic: OPCODE_TABLE[opcode as usize]
                .as_ref()
                .map(|instruction| instruction.mnemonic),
            pending_cycles: self.cpu.pending_cycles(),
            instruction_cycles: self.cpu.current_cycles(),
            last_address: self.cpu.last_operand().address(),
            pc: self.cpu.pc(),
            cycles: self.cpu.cycles(),
            ticks: self.ticks,
        }
    }

    /// Number of ticks run since construction.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    // ========== Accessors ==========

    /// The processor.
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// The processor, mutably.
    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    /// The bus.
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// The bus, mutably.
    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }

    /// The RAM device.
    pub fn ram(&self) -> Option<&RamDevice> {
        self.bus.device_as::<RamDevice>(self.ram)
    }

    /// The RAM device, mutably. Used to preload programs and data.
    pub fn ram_mut(&mut self) -> Option<&mut RamDevice> {
        self.bus.device_as_mut::<RamDevice>(self.ram)
    }

    /// The ROM device.
    pub fn rom(&self) -> Option<&RomDevice> {
        self.bus.device_as::<RomDevice>(self.rom)
    }

    /// The I/O port, if one is configured.
    pub fn io_port(&self) -> Option<&IoPort> {
        self.bus.device_as::<IoPort>(self.io_port?)
    }
}
