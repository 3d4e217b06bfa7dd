//! Interfaces the console consumes from the rest of the kernel
//!
//! The console never touches hardware, the scheduler or page tables
//! directly. These traits are the seams; `linecons_mocked` has in-memory
//! implementations for tests and the simulator.

use std::sync::Arc;

use crate::error::{ConsoleError, CopyFault};

/// Serial transmitter
pub trait Uart: Send + Sync {
    /// Bring up the device. Called once by `Console::init`.
    fn init(&self) {}

    /// Transmit one byte, spinning until the device accepts it.
    ///
    /// Safe to call from the receive interrupt; used for echo and
    /// kernel printing.
    fn putc_sync(&self, c: u8);

    /// Transmit one byte through the interrupt-driven output path.
    ///
    /// Used by user `write()`s. Defaults to the synchronous path.
    fn putc(&self, c: u8) {
        self.putc_sync(c);
    }
}

impl<T: Uart + ?Sized> Uart for Arc<T> {
    fn init(&self) {
        (**self).init();
    }

    fn putc_sync(&self, c: u8) {
        (**self).putc_sync(c);
    }

    fn putc(&self, c: u8) {
        (**self).putc(c);
    }
}

/// Process-list diagnostic dump
pub trait ProcDump: Send + Sync {
    fn dump(&self);
}

impl<T: ProcDump + ?Sized> ProcDump for Arc<T> {
    fn dump(&self) {
        (**self).dump();
    }
}

/// No diagnostics attached
impl ProcDump for () {
    fn dump(&self) {}
}

/// Which address space a read/write address refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddrSpace {
    User,
    Kernel,
}

/// The task on whose behalf a read or write runs
pub trait Caller {
    /// The task has been marked for termination
    fn killed(&self) -> bool;

    /// Copy `src` to `dst` in either the caller's user space or the kernel.
    ///
    /// # Errors
    ///
    /// `CopyFault` if any destination byte is not writable.
    fn either_copyout(&self, space: AddrSpace, dst: u64, src: &[u8]) -> Result<(), CopyFault>;

    /// Copy from `src` in either the caller's user space or the kernel.
    ///
    /// # Errors
    ///
    /// `CopyFault` if any source byte is not readable.
    fn either_copyin(&self, dst: &mut [u8], space: AddrSpace, src: u64) -> Result<(), CopyFault>;
}

/// Device switch entry for a character device
///
/// The dispatch layer looks devices up by major number and calls these;
/// the table itself lives outside this crate.
pub trait CharDevice {
    /// Read up to `n` bytes into `dst`.
    ///
    /// # Errors
    ///
    /// `ConsoleError::Killed` if the caller was killed while waiting.
    fn read(
        &self,
        caller: &dyn Caller,
        space: AddrSpace,
        dst: u64,
        n: usize,
    ) -> Result<usize, ConsoleError>;

    /// Write up to `n` bytes from `src`.
    ///
    /// # Errors
    ///
    /// Implementations may fail; the console never does.
    fn write(
        &self,
        caller: &dyn Caller,
        space: AddrSpace,
        src: u64,
        n: usize,
    ) -> Result<usize, ConsoleError>;
}
