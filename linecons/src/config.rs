//! Console configuration
//!
//! Read once at initialization from JSON, for example:
//!
//! ```json
//! { "capacity": 128, "keys": { "erase": 8, "kill": 21, "eof": 4, "procdump": 16 } }
//! ```
//!
//! Every field is optional; missing fields take the classic values.

use serde::Deserialize;

use crate::error::ConfigError;
use crate::keys::{CTRL_D, CTRL_H, CTRL_P, CTRL_U, DEL};
use crate::line_buffer::INPUT_BUF_SIZE;

/// Bytes with special meaning on input
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct KeyBindings {
    /// Erase one character
    pub erase: u8,
    /// Kill the current line
    pub kill: u8,
    /// End-of-input marker, stored in the buffer
    pub eof: u8,
    /// Print the process list
    pub procdump: u8,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            erase: CTRL_H,
            kill: CTRL_U,
            eof: CTRL_D,
            procdump: CTRL_P,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ConsoleConfig {
    /// Input buffer capacity in bytes
    pub capacity: usize,
    pub keys: KeyBindings,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            capacity: INPUT_BUF_SIZE,
            keys: KeyBindings::default(),
        }
    }
}

impl ConsoleConfig {
    /// Creates a new `ConsoleConfig` by reading JSON from a reader.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - There are I/O errors reading from the provided reader
    /// - The JSON input is invalid or malformed
    /// - The parsed configuration fails [`ConsoleConfig::validate`]
    pub fn from_reader(mut reader: impl embedded_io::Read) -> Result<Self, ConfigError> {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 256];
        loop {
            match embedded_io::Read::read(&mut reader, &mut chunk) {
                Ok(0) => break,
                Ok(n) => buffer.extend_from_slice(&chunk[..n]),
                Err(e) => return Err(ConfigError::Read(format!("{e:?}"))),
            }
        }
        Self::from_json_slice(&buffer)
    }

    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Same as [`ConsoleConfig::from_reader`], minus the I/O part.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Self::from_json_slice(json.as_bytes())
    }

    fn from_json_slice(json: &[u8]) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_slice(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration can drive a console.
    ///
    /// The capacity must be a power of two so that `cursor % capacity`
    /// stays continuous when the cursors wrap around `usize::MAX`.
    ///
    /// # Errors
    ///
    /// - `ConfigError::Capacity` if the capacity is zero or not a power of two
    /// - `ConfigError::Key` if a key is null, a line terminator, carriage
    ///   return, or shares its byte with another binding
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.capacity.is_power_of_two() {
            return Err(ConfigError::Capacity(self.capacity));
        }

        let keys = [
            ("erase", self.keys.erase),
            ("kill", self.keys.kill),
            ("eof", self.keys.eof),
            ("procdump", self.keys.procdump),
        ];
        for (i, &(name, byte)) in keys.iter().enumerate() {
            if matches!(byte, 0 | b'\n' | b'\r') {
                return Err(ConfigError::Key { name, byte });
            }
            // DEL is hardwired to erase; only the erase binding may reuse it.
            if byte == DEL && name != "erase" {
                return Err(ConfigError::Key { name, byte });
            }
            if keys[..i].iter().any(|&(_, other)| other == byte) {
                return Err(ConfigError::Key { name, byte });
            }
        }
        Ok(())
    }
}
