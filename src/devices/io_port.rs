//! Parallel I/O port device.
//!
//! A bank of up to eight byte-wide output ports. The CPU reads and writes the
//! port registers through the bus like ordinary memory. Independently, during
//! the clock phase the port watches the latched bus transaction: when its
//! chip-select line is high and the latched cycle is a write, it drives the
//! selected port's output lines with the latched data and counts a strobe.
//!
//! The port has no idea where it is mapped. Chip-select and register-select
//! are driven by a hook the owner installs (see [`IoPort::select_on`]).

use std::any::Any;

use super::{local_index, ClockHook, ClockHooks, Device, Pins, OPEN_BUS};
use crate::bus::{BusLatch, TransactionKind};

/// Pin number of the active-high chip-select line.
pub const CHIP_SELECT: u8 = 0;

/// First register-select line. Lines `RS0..RS2` follow.
pub const REGISTER_SELECT: u8 = 1;

/// Number of register-select lines.
pub const REGISTER_SELECT_WIDTH: u8 = 3;

/// Maximum number of ports addressable by the register-select lines.
pub const MAX_PORTS: usize = 1 << REGISTER_SELECT_WIDTH;

/// Parallel output port controller.
///
/// # Examples
///
/// ```rust
/// use sbc6502::{Bus, IoPort};
///
/// let mut bus = Bus::new();
///
/// // Two ports visible at 0x6000 and 0x6002; 0x6001 stays unmapped.
/// let mut port = IoPort::new(3);
/// port.select_on(0x6000, &[0x6000, 0x6002]);
/// let id = bus.attach_at(0x6000, Box::new(port));
/// bus.register_at_offset(0x6000, id).unwrap();
/// bus.register_at_offset(0x6002, id).unwrap();
///
/// bus.reset();
/// bus.write_byte(0x6002, 0x99);
/// bus.clock();
/// bus.clock_devices();
///
/// let port = bus.device_as::<IoPort>(id).unwrap();
/// assert_eq!(port.output(2), 0x99);
/// assert_eq!(port.strobes(2), 1);
/// ```
#[derive(Debug)]
pub struct IoPort {
    registers: Vec<u8>,
    outputs: Vec<u8>,
    strobes: Vec<u64>,
    offset: u16,
    pins: Pins,
    hooks: ClockHooks,
}

impl IoPort {
    /// Creates a controller with `ports` ports, clamped to `1..=8`.
    pub fn new(ports: usize) -> Self {
        let ports = ports.clamp(1, MAX_PORTS);
        Self {
            registers: vec![0; ports],
            outputs: vec![0; ports],
            strobes: vec![0; ports],
            offset: 0,
            pins: Pins::new(),
            hooks: ClockHooks::new(),
        }
    }

    /// Number of ports.
    pub fn ports(&self) -> usize {
        self.registers.len()
    }

    /// Installs the hook run before the clock body.
    pub fn set_on_before_clock(&mut self, hook: ClockHook) {
        self.hooks.set_before(hook);
    }

    /// Installs the hook run after the clock body.
    pub fn set_on_after_clock(&mut self, hook: ClockHook) {
        self.hooks.set_after(hook);
    }

    /// Installs the standard address decoder.
    ///
    /// Chip-select goes high when the latched address is one of `addresses`;
    /// the register-select lines carry the latched address minus `base`.
    pub fn select_on(&mut self, base: u16, addresses: &[u16]) {
        let addresses = addresses.to_vec();
        self.set_on_before_clock(Box::new(move |pins: &mut Pins, latch: &BusLatch| {
            let selected = addresses.contains(&latch.address);
            pins.set(CHIP_SELECT, selected);
            let register = latch.address.wrapping_sub(base) as u8;
            pins.set_group(REGISTER_SELECT, REGISTER_SELECT_WIDTH, register);
        }));
    }

    /// Current level of the output lines of `port`. Unknown ports read 0.
    pub fn output(&self, port: usize) -> u8 {
        self.outputs.get(port).copied().unwrap_or(0)
    }

    /// Number of write strobes seen on `port`.
    pub fn strobes(&self, port: usize) -> u64 {
        self.strobes.get(port).copied().unwrap_or(0)
    }

    /// Port register contents as written through the bus.
    pub fn registers(&self) -> &[u8] {
        &self.registers
    }

    /// Signal lines as left by the last clock phase.
    pub fn pins(&self) -> &Pins {
        &self.pins
    }
}

impl Device for IoPort {
    fn name(&self) -> &str {
        "IO Port"
    }

    fn size(&self) -> usize {
        self.registers.len()
    }

    fn offset(&self) -> u16 {
        self.offset
    }

    fn set_offset(&mut self, offset: u16) {
        self.offset = offset;
    }

    fn read_byte(&self, address: u16) -> u8 {
        local_index(self.offset, address, self.registers.len())
            .map_or(OPEN_BUS, |index| self.registers[index])
    }

    fn write_byte(&mut self, address: u16, value: u8) {
        if let Some(index) = local_index(self.offset, address, self.registers.len()) {
            self.registers[index] = value;
        }
    }

    fn clock(&mut self, latch: &BusLatch) {
        self.hooks.run_before(&mut self.pins, latch);

        if self.pins.get(CHIP_SELECT) && latch.kind == Some(TransactionKind::Write) {
            let port = self.pins.group(REGISTER_SELECT, REGISTER_SELECT_WIDTH) as usize;
            if port < self.outputs.len() {
                self.outputs[port] = latch.data as u8;
                self.strobes[port] += 1;
            }
        }

        self.hooks.run_after(&mut self.pins, latch);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
