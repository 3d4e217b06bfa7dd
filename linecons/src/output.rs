//! Console output: echo, kernel printing and user writes
//!
//! Everything goes out one byte at a time, synchronously. There is no
//! output buffering or flow control.

use std::convert::Infallible;
use std::fmt;

use crate::console::Console;
use crate::hal::{AddrSpace, Caller, ProcDump, Uart};
use crate::keys::BS;

impl<U: Uart, D: ProcDump> Console<U, D> {
    /// Send one byte to the UART.
    ///
    /// Used to echo input and by [`Printer`], but not by `write()`.
    pub fn put_char(&self, c: u8) {
        self.uart.putc_sync(c);
    }

    /// Visually erase the last echoed character: overwrite it with a space.
    pub fn put_backspace(&self) {
        self.uart.putc_sync(BS);
        self.uart.putc_sync(b' ');
        self.uart.putc_sync(BS);
    }

    /// User `write()`s to the console go here.
    ///
    /// Copies up to `n` bytes from `src` and transmits each. Stops at the
    /// first byte that cannot be copied and returns how many went out.
    pub fn write(&self, caller: &dyn Caller, space: AddrSpace, src: u64, n: usize) -> usize {
        for i in 0..n {
            let mut c = [0u8; 1];
            if let Err(fault) = caller.either_copyin(&mut c, space, src.wrapping_add(i as u64)) {
                log::debug!("console.write: stopping after {i} of {n} bytes: {fault}");
                return i;
            }
            self.uart.putc(c[0]);
        }
        n
    }

    /// Formatter that prints straight to the UART
    pub fn printer(&self) -> Printer<'_, U, D> {
        Printer { console: self }
    }
}

/// Kernel print sink
///
/// ```ignore
/// use std::fmt::Write;
/// writeln!(console.printer(), "hart {id} starting")?;
/// ```
pub struct Printer<'a, U, D> {
    console: &'a Console<U, D>,
}

impl<U: Uart, D: ProcDump> fmt::Write for Printer<'_, U, D> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.bytes() {
            self.console.put_char(c);
        }
        Ok(())
    }
}

impl<U, D> embedded_io::ErrorType for Printer<'_, U, D> {
    type Error = Infallible;
}

impl<U: Uart, D: ProcDump> embedded_io::Write for Printer<'_, U, D> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        for &c in buf {
            self.console.put_char(c);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
