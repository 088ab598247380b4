//! RAM device implementation.
//!
//! Provides readable and writable storage via the Device trait, plus bulk
//! provisioning through a bump allocator.

use std::any::Any;
use std::ops::Range;

use super::{local_index, Device, DeviceError, OPEN_BUS};

/// Readable and writable memory.
///
/// # Examples
///
/// ```rust
/// use sbc6502::{Device, RamDevice};
///
/// let mut ram = RamDevice::new(1024); // 1KB RAM
///
/// ram.write_byte(0x42, 0xAA);
/// assert_eq!(ram.read_byte(0x42), 0xAA);
///
/// ram.write_short_le(0x10, 0xBEEF);
/// assert_eq!(ram.read_byte(0x10), 0xEF);
/// assert_eq!(ram.read_byte(0x11), 0xBE);
/// ```
#[derive(Debug, Clone)]
pub struct RamDevice {
    data: Vec<u8>,
    offset: u16,
    /// Next unallocated byte
    pointer: usize,
}

impl RamDevice {
    /// Creates a RAM device of `size` bytes, all zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size],
            offset: 0,
            pointer: 0,
        }
    }

    /// Reserves `count` bytes from the allocation pointer and zeroes them.
    ///
    /// Returns the local range that was reserved.
    ///
    /// # Errors
    ///
    /// - [`DeviceError::InvalidAllocation`] if `count` is zero
    /// - [`DeviceError::AllocationOverflow`] if fewer than `count` bytes remain
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sbc6502::{DeviceError, RamDevice};
    ///
    /// let mut ram = RamDevice::new(256);
    /// assert_eq!(ram.allocate(200).unwrap(), 0..200);
    /// assert_eq!(
    ///     ram.allocate(100),
    ///     Err(DeviceError::AllocationOverflow { requested: 100, remaining: 56 })
    /// );
    /// ```
    pub fn allocate(&mut self, count: usize) -> Result<Range<usize>, DeviceError> {
        if count == 0 {
            return Err(DeviceError::InvalidAllocation);
        }

        let remaining = self.remaining();
        if count > remaining {
            return Err(DeviceError::AllocationOverflow {
                requested: count,
                remaining,
            });
        }

        let range = self.pointer..self.pointer + count;
        self.data[range.clone()].fill(0);
        self.pointer = range.end;
        Ok(range)
    }

    /// Bytes left after the allocation pointer.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pointer
    }

    /// Copies `bytes` into RAM starting at local offset `start`.
    ///
    /// Bytes that would fall past the end of the device are dropped.
    pub fn load_bytes(&mut self, start: usize, bytes: &[u8]) {
        let Some(window) = self.data.get_mut(start..) else {
            return;
        };
        let len = window.len().min(bytes.len());
        window[..len].copy_from_slice(&bytes[..len]);
    }

    /// Backing storage, indexed locally.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }
}

impl Device for RamDevice {
    fn name(&self) -> &str {
        "RAM"
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

    fn write_byte(&mut self, address: u16, value: u8) {
        if let Some(index) = local_index(self.offset, address, self.data.len()) {
            self.data[index] = value;
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
