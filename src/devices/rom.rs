//! ROM device implementation.
//!
//! Provides read-only storage via the Device trait.

use std::any::Any;

use super::{local_index, Device, OPEN_BUS};

/// Read-only memory device.
///
/// Bus writes are silently ignored. The contents are provisioned in bulk with
/// [`load_image`](RomDevice::load_image) before the machine starts clocking.
///
/// # Examples
///
/// ```rust
/// use sbc6502::{Device, RomDevice};
///
/// let mut rom = RomDevice::new(vec![0xEA, 0xEA, 0xEA]); // Three NOPs
///
/// assert_eq!(rom.read_byte(0), 0xEA);
///
/// // Writes are ignored
/// rom.write_byte(0, 0xFF);
/// assert_eq!(rom.read_byte(0), 0xEA);
/// ```
#[derive(Debug, Clone)]
pub struct RomDevice {
    data: Vec<u8>,
    offset: u16,
}

impl RomDevice {
    /// Creates a ROM device holding `data`.
    pub fn new(data: Vec<u8>) -> Self {
        Self { data, offset: 0 }
    }

    /// Creates a zero-filled ROM of `size` bytes, to be provisioned later.
    pub fn blank(size: usize) -> Self {
        Self::new(vec![0; size])
    }

    /// Replaces the whole backing store with `image`.
    ///
    /// The device size follows the image. Addresses the bus still routes here
    /// but the image does not cover read as `0xFF`.
    pub fn load_image(&mut self, image: &[u8]) {
        self.data = image.to_vec();
    }

    /// Backing storage, indexed locally.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }
}

impl Device for RomDevice {
    fn name(&self) -> &str {
        "ROM"
    }

    fn size(&self) -> usize {
        self.data.len()
    }

    fn offset(&self) -> u16 {
        self.offset
    }

    fn set_offset(&mut self, offset: u16) {
        self.offset = offset;
    }

    fn read_byte(&self, address: u16) -> u8 {
        local_index(self.offset, address, self.data.len())
            .map_or(OPEN_BUS, |index| self.data[index])
    }

    fn write_byte(&mut self, _address: u16, _value: u8) {
        // read-only
    }

    fn write_short_le(&mut self, _address: u16, _value: u16) {
        // read-only
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
