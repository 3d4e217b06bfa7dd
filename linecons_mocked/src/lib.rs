//! In-memory collaborators for the console.
//!
//! - `RecordingUart` keeps every transmitted byte.
//! - `MockProcess` is a caller with a user and a kernel address space and
//!   a kill flag. Addresses outside a space, or at or past an injected
//!   fault address, fail to copy.
//! - `CountingDump` counts process-list dumps.

pub mod dump;
pub mod process;
pub mod uart;

pub use dump::CountingDump;
pub use process::MockProcess;
pub use uart::RecordingUart;

use linecons::{Console, ConsoleConfig, ConfigError};
use std::sync::Arc;

pub type MockConsole = Console<Arc<RecordingUart>, Arc<CountingDump>>;

/// Console wired to fresh mocks, plus handles to inspect them
///
/// # Errors
///
/// Returns the validation error if `config` is unusable.
pub fn console_with(
    config: &ConsoleConfig,
) -> Result<(MockConsole, Arc<RecordingUart>, Arc<CountingDump>), ConfigError> {
    let uart = Arc::new(RecordingUart::new());
    let dump = Arc::new(CountingDump::new());
    let console = Console::init(config, Arc::clone(&uart), Arc::clone(&dump))?;
    Ok((console, uart, dump))
}

/// Console with the classic configuration wired to fresh mocks
#[must_use]
pub fn console() -> (MockConsole, Arc<RecordingUart>, Arc<CountingDump>) {
    let uart = Arc::new(RecordingUart::new());
    let dump = Arc::new(CountingDump::new());
    let console = Console::with_defaults(Arc::clone(&uart), Arc::clone(&dump));
    (console, uart, dump)
}
