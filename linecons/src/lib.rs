//! Line discipline for a UART console.
//!
//! Bytes arrive one at a time from the receive interrupt and are edited
//! in place (erase, kill line) with echo. Readers block until a whole line,
//! an end-of-input marker, or a full buffer has been committed.
//!
//! ```text
//! uart rx irq ──► Console::interrupt ──► LineBuffer ──► Console::read ──► caller
//!                        │
//!                        └──echo──► Uart::putc_sync ◄── Console::write / Printer
//! ```

pub mod config;
pub mod console;
pub mod error;
pub mod hal;
pub mod input;
pub mod keys;
pub mod line_buffer;
pub mod output;
pub mod reader;
pub mod wait_channel;

pub use config::{ConsoleConfig, KeyBindings};
pub use console::Console;
pub use error::{ConfigError, ConsoleError, CopyFault};
pub use hal::{AddrSpace, Caller, CharDevice, ProcDump, Uart};
pub use line_buffer::{Cursors, LineBuffer, INPUT_BUF_SIZE};
pub use output::Printer;
pub use wait_channel::WaitChannel;
