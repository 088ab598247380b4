//! Machine configuration.
//!
//! A [`MachineConfig`] describes the memory map of a [`Machine`](crate::Machine):
//! how much RAM sits at the bottom of the address space, where the ROM window
//! lives, and which addresses the parallel I/O port answers on. Every field has
//! a default, so a partial JSON document is enough:
//!
//! ```rust
//! use sbc6502::MachineConfig;
//!
//! let config = MachineConfig::from_json(r#"{ "io_ports": [24576, 24577] }"#).unwrap();
//! assert_eq!(config.ram_size, 0xF000);
//! assert_eq!(config.io_ports, vec![0x6000, 0x6001]);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bus::ADDRESS_SPACE;
use crate::devices::io_port::MAX_PORTS;

/// Error returned when a configuration cannot be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON for a [`MachineConfig`].
    #[error("invalid machine config: {0}")]
    Json(#[from] serde_json::Error),

    /// A field holds a value the machine cannot be built with.
    #[error("{field} = 0x{value:X} is out of range: {reason}")]
    OutOfRange {
        /// Offending field
        field: &'static str,
        /// Offending value
        value: usize,
        /// What the value must satisfy
        reason: &'static str,
    },
}

/// Memory map of a machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Bytes of RAM mapped from 0x0000.
    pub ram_size: usize,

    /// First address of the ROM window.
    pub rom_base: u16,

    /// Size of the ROM window in bytes.
    pub rom_size: usize,

    /// Addresses the parallel I/O port answers on. Empty for no port.
    ///
    /// The lowest address is the port base; each address selects the port
    /// register at its distance from the base.
    pub io_ports: Vec<u16>,

    /// Report unknown opcodes as errors instead of no-op ticks.
    pub strict_opcodes: bool,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            ram_size: 0xF000,
            rom_base: 0xF000,
            rom_size: 0x1000,
            io_ports: Vec::new(),
            strict_opcodes: false,
        }
    }
}

impl MachineConfig {
    /// Parses a configuration from JSON and validates it.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Json`] if the document does not parse
    /// - [`ConfigError::OutOfRange`] if the parsed config fails
    ///   [`validate`](MachineConfig::validate)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks that every region fits the 16-bit address space and that RAM
    /// stops at or below the ROM window.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OutOfRange`] when:
    /// - `ram_size` is zero or larger than the address space
    /// - RAM reaches into the ROM window (`ram_size > rom_base`)
    /// - `rom_size` is zero or the ROM window runs past 0xFFFF
    /// - `io_ports` spans more than 8 consecutive addresses
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ram_size == 0 || self.ram_size > ADDRESS_SPACE {
            return Err(ConfigError::OutOfRange {
                field: "ram_size",
                value: self.ram_size,
                reason: "must be between 1 and 0x10000 bytes",
            });
        }

        if self.ram_size > self.rom_base as usize {
            return Err(ConfigError::OutOfRange {
                field: "ram_size",
                value: self.ram_size,
                reason: "RAM must end at or below rom_base",
            });
        }

        if self.rom_size == 0 {
            return Err(ConfigError::OutOfRange {
                field: "rom_size",
                value: self.rom_size,
                reason: "must be at least 1 byte",
            });
        }

        if self.rom_base as usize + self.rom_size > ADDRESS_SPACE {
            return Err(ConfigError::OutOfRange {
                field: "rom_size",
                value: self.rom_size,
                reason: "ROM window runs past 0xFFFF",
            });
        }

        if let Some(span) = self.io_span() {
            if span > MAX_PORTS {
                return Err(ConfigError::OutOfRange {
                    field: "io_ports",
                    value: span,
                    reason: "ports must fit within 8 consecutive addresses",
                });
            }
        }

        Ok(())
    }

    /// Lowest I/O port address, if any.
    pub(crate) fn io_base(&self) -> Option<u16> {
        self.io_ports.iter().copied().min()
    }

    /// Number of addresses between the lowest and highest I/O port,
    /// inclusive.
    pub(crate) fn io_span(&self) -> Option<usize> {
        let low = self.io_base()?;
        let high = self.io_ports.iter().copied().max()?;
        Some((high - low) as usize + 1)
    }
}
