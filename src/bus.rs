//! # Shared Address/Data Bus
//!
//! The [`Bus`] is the single authority for every read and write in the
//! 16-bit address space. It owns the attached devices, maps addresses to
//! them, and records each access in a transaction log.
//!
//! ## Transaction Log and Latch
//!
//! Reads and writes do not become visible to devices immediately. Each access
//! appends a [`BusTransaction`]; [`Bus::clock`] later pops the most recent one
//! into the shadow [`BusLatch`], which devices observe during their own clock
//! phase via [`Bus::clock_devices`]. This models a shared parallel bus where
//! every chip sees the same asserted address and data lines.
//!
//! ## Hardware Behavior
//!
//! - Unmapped reads float high: `0xFF` (byte) or `0xFFFF` (short)
//! - Unmapped writes are dropped
//! - At most one device owns an address; the first registration wins

use thiserror::Error;
use tracing::{debug, warn};

use crate::devices::Device;

/// Size of the 16-bit address space.
pub const ADDRESS_SPACE: usize = 0x1_0000;

/// Value driven by an unconnected data bus.
pub const FLOATING_BYTE: u8 = 0xFF;

/// Value driven by an unconnected data bus on a short access.
pub const FLOATING_SHORT: u16 = 0xFFFF;

/// Handle to a device owned by a [`Bus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceId(usize);

impl DeviceId {
    /// Position of the device in registration (clock) order.
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "device#{}", self.0)
    }
}

/// Direction of a bus access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    /// Data driven by a device toward the processor
    Read,
    /// Data driven by the processor toward a device
    Write,
}

/// Immutable record of one bus access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusTransaction {
    /// Read or write
    pub kind: TransactionKind,
    /// Address asserted on the bus
    pub address: u16,
    /// Data transferred (a short access carries both bytes)
    pub data: u16,
    /// Position within the current fetch cycle, starting at 0
    pub sequence: u64,
}

/// Shadow copy of the most recently latched transaction.
///
/// `kind` is `None` until a transaction has been latched since the last
/// [`Bus::reset`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BusLatch {
    /// Last latched address
    pub address: u16,
    /// Last latched data
    pub data: u16,
    /// Direction of the last latched transaction
    pub kind: Option<TransactionKind>,
}

/// Error returned when address-map registration fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BusError {
    /// The address already belongs to another registration.
    #[error("address 0x{address:04X} is already mapped to {owner}")]
    AddressConflict {
        /// Contested address
        address: u16,
        /// Device that keeps the address
        owner: DeviceId,
    },

    /// The handle does not name a device on this bus.
    #[error("{0} is not attached to this bus")]
    UnknownDevice(DeviceId),
}

/// Memory-mapped bus routing accesses to registered devices.
///
/// # Examples
///
/// ```rust
/// use sbc6502::{Bus, RamDevice, TransactionKind};
///
/// let mut bus = Bus::new();
/// bus.register_auto(0x0000, Box::new(RamDevice::new(0x0400)));
///
/// bus.reset();
/// bus.write_byte(0x0010, 0x42);
/// assert_eq!(bus.read_byte(0x0010), 0x42);
///
/// // Unmapped address floats high
/// assert_eq!(bus.read_byte(0x8000), 0xFF);
///
/// // Three accesses logged; clock() latches the most recent one
/// assert_eq!(bus.transactions().len(), 3);
/// assert!(bus.clock());
/// assert_eq!(bus.latch().address, 0x8000);
/// assert_eq!(bus.latch().kind, Some(TransactionKind::Read));
/// ```
pub struct Bus {
    /// Devices in registration order
    devices: Vec<Box<dyn Device>>,
    /// Owner of each address, if any
    address_map: Vec<Option<DeviceId>>,
    transactions: Vec<BusTransaction>,
    sequence: u64,
    latch: BusLatch,
}

impl Bus {
    /// Creates an empty bus with nothing mapped.
    pub fn new() -> Self {
        Self {
            devices: Vec::new(),
            address_map: vec![None; ADDRESS_SPACE],
            transactions: Vec::new(),
            sequence: 0,
            latch: BusLatch::default(),
        }
    }

    // ========== Registration ==========

    /// Adds a device to the clock order without mapping any address.
    pub fn attach(&mut self, device: Box<dyn Device>) -> DeviceId {
        let id = DeviceId(self.devices.len());
        debug!(%id, name = device.name(), size = device.size(), "attached device");
        self.devices.push(device);
        id
    }

    /// Sets the device offset, then attaches it without mapping any address.
    ///
    /// Used for devices whose ports are mapped one address at a time with
    /// [`register_at_offset`](Bus::register_at_offset).
    pub fn attach_at(&mut self, offset: u16, mut device: Box<dyn Device>) -> DeviceId {
        device.set_offset(offset);
        self.attach(device)
    }

    /// Attaches a device at `base` and maps every address it covers.
    ///
    /// Addresses are claimed one at a time through the same conflict check as
    /// [`register_at_offset`](Bus::register_at_offset): already-owned
    /// addresses are warned about and skipped, and the rest of the range is
    /// still mapped. Addresses past `0xFFFF` are dropped with a warning.
    pub fn register_auto(&mut self, base: u16, device: Box<dyn Device>) -> DeviceId {
        let size = device.size();
        let id = self.attach_at(base, device);

        let end = (base as usize + size).min(ADDRESS_SPACE);
        if base as usize + size > ADDRESS_SPACE {
            warn!(
                %id,
                base = format_args!("0x{base:04X}"),
                size,
                "device range runs past the address space; truncating"
            );
        }

        let mut skipped = 0usize;
        for address in base as usize..end {
            if self.map(address as u16, id).is_err() {
                skipped += 1;
            }
        }
        if skipped > 0 {
            debug!(%id, skipped, "device registered with conflicting addresses skipped");
        }

        id
    }

    /// Maps a single address to an attached device.
    ///
    /// The device's other addresses are not claimed, which allows a device to
    /// appear at several disjoint ports.
    ///
    /// # Errors
    ///
    /// - [`BusError::UnknownDevice`] if `id` is not attached to this bus
    /// - [`BusError::AddressConflict`] if `offset` already has an owner; the
    ///   existing mapping is left untouched
    pub fn register_at_offset(&mut self, offset: u16, id: DeviceId) -> Result<(), BusError> {
        if id.0 >= self.devices.len() {
            return Err(BusError::UnknownDevice(id));
        }
        self.map(offset, id)
    }

    fn map(&mut self, address: u16, id: DeviceId) -> Result<(), BusError> {
        let slot = &mut self.address_map[address as usize];
        if let Some(owner) = *slot {
            warn!(
                address = format_args!("0x{address:04X}"),
                %owner,
                rejected = %id,
                "address already mapped; keeping existing device"
            );
            return Err(BusError::AddressConflict { address, owner });
        }
        *slot = Some(id);
        Ok(())
    }

    // ========== Access ==========

    /// Reads a byte, or `0xFF` if nothing is mapped at `address`.
    pub fn read_byte(&mut self, address: u16) -> u8 {
        let value = match self.owner_of(address) {
            Some(id) => self.devices[id.0].read_byte(address),
            None => FLOATING_BYTE,
        };
        self.record(TransactionKind::Read, address, value as u16);
        value
    }

    /// Reads a little-endian short, or `0xFFFF` if nothing is mapped at
    /// `address`. The device owning `address` supplies both bytes.
    pub fn read_short_le(&mut self, address: u16) -> u16 {
        let value = match self.owner_of(address) {
            Some(id) => self.devices[id.0].read_short_le(address),
            None => FLOATING_SHORT,
        };
        self.record(TransactionKind::Read, address, value);
        value
    }

    /// Writes a byte. Dropped if nothing is mapped at `address`.
    pub fn write_byte(&mut self, address: u16, value: u8) {
        if let Some(id) = self.owner_of(address) {
            self.devices[id.0].write_byte(address, value);
        }
        self.record(TransactionKind::Write, address, value as u16);
    }

    /// Writes a little-endian short. Dropped if nothing is mapped at
    /// `address`.
    pub fn write_short_le(&mut self, address: u16, value: u16) {
        if let Some(id) = self.owner_of(address) {
            self.devices[id.0].write_short_le(address, value);
        }
        self.record(TransactionKind::Write, address, value);
    }

    fn record(&mut self, kind: TransactionKind, address: u16, data: u16) {
        self.transactions.push(BusTransaction {
            kind,
            address,
            data,
            sequence: self.sequence,
        });
        self.sequence += 1;
    }

    // ========== Clocking ==========

    /// Clears the transaction log and zeroes the latch.
    ///
    /// Called by the processor at the start of every fetch so that each
    /// instruction's bus trace starts empty.
    pub fn reset(&mut self) {
        self.transactions.clear();
        self.sequence = 0;
        self.latch = BusLatch::default();
    }

    /// Pops the most recent transaction into the latch.
    ///
    /// Returns `false`, leaving the latch unchanged, when the log is empty.
    pub fn clock(&mut self) -> bool {
        match self.transactions.pop() {
            Some(transaction) => {
                self.latch = BusLatch {
                    address: transaction.address,
                    data: transaction.data,
                    kind: Some(transaction.kind),
                };
                true
            }
            None => false,
        }
    }

    /// Runs every device's clock phase once, in registration order.
    pub fn clock_devices(&mut self) {
        let latch = self.latch;
        for device in &mut self.devices {
            device.clock(&latch);
        }
    }

    // ========== Inspection ==========

    /// Transactions recorded since the last reset, oldest first.
    pub fn transactions(&self) -> &[BusTransaction] {
        &self.transactions
    }

    /// The shadow latch devices observe.
    pub fn latch(&self) -> BusLatch {
        self.latch
    }

    /// The device mapped at `address`, if any.
    pub fn owner_of(&self, address: u16) -> Option<DeviceId> {
        self.address_map[address as usize]
    }

    /// Number of attached devices.
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// Borrows an attached device.
    pub fn device(&self, id: DeviceId) -> Option<&dyn Device> {
        self.devices.get(id.0).map(|device| device.as_ref())
    }

    /// Mutably borrows an attached device.
    ///
    /// Direct access bypasses the transaction log; it is meant for
    /// provisioning and inspection outside the tick loop.
    pub fn device_mut(&mut self, id: DeviceId) -> Option<&mut dyn Device> {
        match self.devices.get_mut(id.0) {
            Some(device) => Some(device.as_mut()),
            None => None,
        }
    }

    /// Borrows an attached device as its concrete type.
    pub fn device_as<T: 'static>(&self, id: DeviceId) -> Option<&T> {
        self.device(id)?.as_any().downcast_ref::<T>()
    }

    /// Mutably borrows an attached device as its concrete type.
    pub fn device_as_mut<T: 'static>(&mut self, id: DeviceId) -> Option<&mut T> {
        self.device_mut(id)?.as_any_mut().downcast_mut::<T>()
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Bus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.devices.iter().map(|d| d.name()).collect();
        f.debug_struct("Bus")
            .field("devices", &names)
            .field("transactions", &self.transactions.len())
            .field("latch", &self.latch)
            .finish()
    }
}
