//! Memory-mapped device support for the 6502 bus.
//!
//! Every addressable unit attached to the [`Bus`](crate::Bus) (RAM, ROM, I/O
//! controllers) implements the [`Device`] trait. The bus only decides *which*
//! device owns an address; the device itself translates the global address to
//! a local index using its base offset.
//!
//! # Architecture
//!
//! - **Device trait**: uniform byte/short access plus a per-tick `clock` hook
//! - **Pins**: device-local signal lines (chip-select, register-select)
//! - **ClockHooks**: owner-injected logic that drives those pins from the
//!   latched bus state, run around the device's own clock body
//! - **Device implementations**: RAM, ROM, parallel I/O port
//!
//! # Example
//!
//! ```rust
//! use sbc6502::{Bus, RamDevice, RomDevice};
//!
//! let mut bus = Bus::new();
//!
//! // 4KB RAM at 0x0000-0x0FFF
//! bus.register_auto(0x0000, Box::new(RamDevice::new(0x1000)));
//!
//! // 4KB ROM at 0xF000-0xFFFF
//! bus.register_auto(0xF000, Box::new(RomDevice::new(vec![0xEA; 0x1000])));
//!
//! bus.write_byte(0x0200, 0x42);
//! assert_eq!(bus.read_byte(0x0200), 0x42);
//! assert_eq!(bus.read_byte(0xF000), 0xEA);
//! ```

use std::any::Any;
use std::collections::BTreeMap;

use thiserror::Error;

use crate::bus::BusLatch;

pub mod io_port;
pub mod ram;
pub mod rom;

pub use io_port::IoPort;
pub use ram::RamDevice;
pub use rom::RomDevice;

/// Value read from a device location that holds no backing byte.
pub(crate) const OPEN_BUS: u8 = 0xFF;

/// Abstract interface for memory-mapped hardware devices.
///
/// Addresses passed to the access methods are *global* bus addresses. Each
/// implementation subtracts its own [`offset`](Device::offset) before
/// touching its storage. Accesses that fall outside the device's storage must
/// not panic: reads return `0xFF` and writes are dropped. Range validation is
/// the bus's job, not the device's.
///
/// # Examples
///
/// ```rust
/// use std::any::Any;
/// use sbc6502::Device;
///
/// struct Latch {
///     offset: u16,
///     value: u8,
/// }
///
/// impl Device for Latch {
///     fn name(&self) -> &str {
///         "latch"
///     }
///
///     fn size(&self) -> usize {
///         1
///     }
///
///     fn offset(&self) -> u16 {
///         self.offset
///     }
///
///     fn set_offset(&mut self, offset: u16) {
///         self.offset = offset;
///     }
///
///     fn read_byte(&self, _address: u16) -> u8 {
///         self.value
///     }
///
///     fn write_byte(&mut self, _address: u16, value: u8) {
///         self.value = value;
///     }
///
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
///
///     fn as_any_mut(&mut self) -> &mut dyn Any {
///         self
///     }
/// }
///
/// let mut latch = Latch { offset: 0x6000, value: 0 };
/// latch.write_byte(0x6000, 0x5A);
/// assert_eq!(latch.read_byte(0x6000), 0x5A);
/// ```
pub trait Device {
    /// Human readable device name, used in log output.
    fn name(&self) -> &str;

    /// Number of bytes of addressable storage.
    fn size(&self) -> usize;

    /// Base address of the device on the bus.
    fn offset(&self) -> u16;

    /// Sets the base address. Called by the bus on range registration.
    fn set_offset(&mut self, offset: u16);

    /// Reads the byte at a global bus address.
    fn read_byte(&self, address: u16) -> u8;

    /// Writes a byte at a global bus address.
    fn write_byte(&mut self, address: u16, value: u8);

    /// Reads a little-endian short: low byte at `address`, high byte at
    /// `address + 1`.
    fn read_short_le(&self, address: u16) -> u16 {
        let lo = self.read_byte(address) as u16;
        let hi = self.read_byte(address.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Writes a little-endian short: low byte at `address`, high byte at
    /// `address + 1`.
    fn write_short_le(&mut self, address: u16, value: u16) {
        self.write_byte(address, (value & 0xFF) as u8);
        self.write_byte(address.wrapping_add(1), (value >> 8) as u8);
    }

    /// Per-tick clock phase.
    ///
    /// Called once per system tick after the bus has latched its most recent
    /// transaction. The default does nothing. Implementations must be total
    /// over any latch value and must not perform external I/O.
    fn clock(&mut self, _latch: &BusLatch) {}

    /// Upcast for typed access to a concrete device owned by the bus.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for typed access to a concrete device owned by the bus.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Translates a global address to a local storage index.
///
/// Returns `None` when the address lies below the device offset or past the
/// end of its storage.
pub(crate) fn local_index(offset: u16, address: u16, len: usize) -> Option<usize> {
    let index = address.checked_sub(offset)? as usize;
    (index < len).then_some(index)
}

/// Device-local signal lines.
///
/// Pins are numbered by the device that owns them. Unset pins read low.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pins {
    lines: BTreeMap<u8, bool>,
}

impl Pins {
    /// Creates a pin set with every line low.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the level of a single line.
    pub fn get(&self, pin: u8) -> bool {
        self.lines.get(&pin).copied().unwrap_or(false)
    }

    /// Drives a single line.
    pub fn set(&mut self, pin: u8, level: bool) {
        self.lines.insert(pin, level);
    }

    /// Drives `width` consecutive lines starting at `first` from the low bits
    /// of `value`.
    pub fn set_group(&mut self, first: u8, width: u8, value: u8) {
        for bit in 0..width {
            self.set(first + bit, (value >> bit) & 1 != 0);
        }
    }

    /// Reads `width` consecutive lines starting at `first` as an integer.
    pub fn group(&self, first: u8, width: u8) -> u8 {
        (0..width).fold(0, |acc, bit| acc | ((self.get(first + bit) as u8) << bit))
    }

    /// Drives every line low.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

/// Hook run during a device's clock phase.
pub type ClockHook = Box<dyn FnMut(&mut Pins, &BusLatch)>;

/// Optional before/after clock strategies for a device.
///
/// Owners install hooks to derive protocol signals, for example a
/// chip-select line from the latched bus address, without the device having
/// to know how it is routed. Both hooks default to no-ops.
#[derive(Default)]
pub struct ClockHooks {
    before: Option<ClockHook>,
    after: Option<ClockHook>,
}

impl ClockHooks {
    /// Creates an empty hook set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the hook run before the device's clock body.
    pub fn set_before(&mut self, hook: ClockHook) {
        self.before = Some(hook);
    }

    /// Installs the hook run after the device's clock body.
    pub fn set_after(&mut self, hook: ClockHook) {
        self.after = Some(hook);
    }

    /// Runs the before hook, if any.
    pub fn run_before(&mut self, pins: &mut Pins, latch: &BusLatch) {
        if let Some(hook) = self.before.as_mut() {
            hook(pins, latch);
        }
    }

    /// Runs the after hook, if any.
    pub fn run_after(&mut self, pins: &mut Pins, latch: &BusLatch) {
        if let Some(hook) = self.after.as_mut() {
            hook(pins, latch);
        }
    }

    /// Returns true if neither hook is installed.
    pub fn is_empty(&self) -> bool {
        self.before.is_none() && self.after.is_none()
    }
}

impl std::fmt::Debug for ClockHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClockHooks")
            .field("before", &self.before.is_some())
            .field("after", &self.after.is_some())
            .finish()
    }
}

/// Error returned by device provisioning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    /// Zero-byte allocations are rejected.
    #[error("cannot allocate less than 1 byte of memory")]
    InvalidAllocation,

    /// The request exceeds the bytes left after the allocation pointer.
    #[error("cannot allocate {requested} bytes: only {remaining} remain")]
    AllocationOverflow {
        /// Number of bytes requested
        requested: usize,
        /// Number of bytes still available
        remaining: usize,
    },
}
