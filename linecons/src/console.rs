//! The console device: line buffer, wait channel and collaborators
//!
//! One `Console` is created at driver initialization and lives as long as
//! the kernel. Share it by reference (`Arc<Console<..>>` across threads);
//! the receive interrupt calls [`Console::interrupt`], tasks call
//! [`Console::read`] and [`Console::write`].
//!
//! # Thread Safety
//!
//! All cursors and storage sit behind one `parking_lot::Mutex`.
//! - `interrupt` takes the lock for one byte and never sleeps. It must run
//!   in a context that is never suspended while holding it (the receive
//!   interrupt, or a dedicated handler thread).
//! - `read` is the only path that releases the lock across a suspension,
//!   through [`WaitChannel::sleep`].
//! - One reader at a time is assumed; concurrent readers would interleave
//!   bytes of the same line.

use parking_lot::{Mutex, MutexGuard};
use std::fmt;

use crate::config::{ConsoleConfig, KeyBindings};
use crate::error::{ConfigError, ConsoleError};
use crate::hal::{AddrSpace, Caller, CharDevice, ProcDump, Uart};
use crate::line_buffer::{Cursors, LineBuffer};
use crate::wait_channel::WaitChannel;

pub struct Console<U, D> {
    pub(crate) cons: Mutex<LineBuffer>,
    /// Readers sleep here until a commit
    pub(crate) readable: WaitChannel,
    pub(crate) keys: KeyBindings,
    pub(crate) uart: U,
    pub(crate) procdump: D,
}

impl<U: Uart, D: ProcDump> Console<U, D> {
    /// Bring up the console.
    ///
    /// # Errors
    ///
    /// Returns the validation error if `config` is unusable.
    pub fn init(config: &ConsoleConfig, uart: U, procdump: D) -> Result<Self, ConfigError> {
        config.validate()?;
        uart.init();
        log::info!(
            "console: init, {} byte input buffer, keys {:?}",
            config.capacity,
            config.keys
        );
        Ok(Self {
            cons: Mutex::new(LineBuffer::new(config.capacity)),
            readable: WaitChannel::new(),
            keys: config.keys,
            uart,
            procdump,
        })
    }

    /// Console with the classic configuration
    pub fn with_defaults(uart: U, procdump: D) -> Self {
        uart.init();
        Self::from_parts(LineBuffer::default(), KeyBindings::default(), uart, procdump)
    }

    /// Console over an existing buffer, skipping validation and `Uart::init`
    pub fn from_parts(buffer: LineBuffer, keys: KeyBindings, uart: U, procdump: D) -> Self {
        Self {
            cons: Mutex::new(buffer),
            readable: WaitChannel::new(),
            keys,
            uart,
            procdump,
        }
    }

    pub fn uart(&self) -> &U {
        &self.uart
    }

    pub fn keys(&self) -> &KeyBindings {
        &self.keys
    }

    #[must_use]
    pub fn cursors(&self) -> Cursors {
        self.cons.lock().cursors()
    }

    /// Readers currently suspended waiting for input
    #[must_use]
    pub fn sleeping_readers(&self) -> usize {
        self.readable.sleepers()
    }

    /// Wake blocked readers without committing anything.
    ///
    /// The scheduler calls this after marking a task killed, so that a
    /// reader sleeping on the console notices and returns.
    pub fn wakeup_readers(&self) -> usize {
        let _cons = self.lock();
        self.readable.wakeup()
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, LineBuffer> {
        self.cons.lock()
    }
}

impl<U: Uart, D: ProcDump> CharDevice for Console<U, D> {
    fn read(
        &self,
        caller: &dyn Caller,
        space: AddrSpace,
        dst: u64,
        n: usize,
    ) -> Result<usize, ConsoleError> {
        Console::read(self, caller, space, dst, n)
    }

    fn write(
        &self,
        caller: &dyn Caller,
        space: AddrSpace,
        src: u64,
        n: usize,
    ) -> Result<usize, ConsoleError> {
        Ok(Console::write(self, caller, space, src, n))
    }
}

impl<U, D> fmt::Debug for Console<U, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cons = self.cons.lock();
        let c = cons.cursors();
        write!(
            f,
            "Console(r={}, w={}, e={}, capacity={}, sleepers={})",
            c.read,
            c.commit,
            c.edit,
            cons.capacity(),
            self.readable.sleepers()
        )
    }
}
