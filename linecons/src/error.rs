//! Error types for the console

use std::fmt;

/// Error returned by console reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleError {
    /// The calling task was marked for termination while waiting for input
    Killed,
}

impl ConsoleError {
    /// POSIX-style value a syscall layer hands back to user space
    #[must_use]
    pub fn errno(&self) -> isize {
        match self {
            Self::Killed => -1,
        }
    }
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Killed => write!(f, "caller was killed while waiting for console input"),
        }
    }
}

impl std::error::Error for ConsoleError {}

/// A copy to or from the caller's address space failed
///
/// Bytes moved before the failing one stay moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyFault {
    pub addr: u64,
}

impl fmt::Display for CopyFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bad address {:#x}", self.addr)
    }
}

impl std::error::Error for CopyFault {}

/// Error type for console configuration
#[derive(Debug)]
pub enum ConfigError {
    /// The configuration source could not be read
    Read(String),
    /// The configuration is not valid JSON for `ConsoleConfig`
    Parse(String),
    /// Capacity must be a non-zero power of two
    Capacity(usize),
    /// A key binding is unusable (null, line terminator, or bound twice)
    Key { name: &'static str, byte: u8 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(msg) => write!(f, "Failed to read console config: {msg}"),
            Self::Parse(msg) => write!(f, "Failed to parse console config JSON: {msg}"),
            Self::Capacity(n) => {
                write!(f, "Input buffer capacity must be a non-zero power of two, got {n}")
            }
            Self::Key { name, byte } => {
                write!(f, "Key binding '{name}' cannot use byte {byte:#04x}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
