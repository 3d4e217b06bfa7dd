//! Blocking line reads
//!
//! A read copies (up to) one whole input line. It waits until the input
//! interrupt has committed something, so callers see complete lines, an
//! end-of-input marker, or the contents of a buffer that filled up.

use crate::console::Console;
use crate::error::ConsoleError;
use crate::hal::{AddrSpace, Caller, ProcDump, Uart};

impl<U: Uart, D: ProcDump> Console<U, D> {
    /// User `read()`s from the console go here.
    ///
    /// Copies at most `n` bytes to `dst` in `space`, stopping after the
    /// first line terminator. Returns the number of bytes copied.
    ///
    /// End-of-input: if the marker is the first byte seen by this call it
    /// is consumed and the call returns 0. If bytes were already copied,
    /// the marker is left in the buffer so the next call returns 0.
    ///
    /// A byte that cannot be copied to `dst` ends the read early; it is
    /// consumed and the bytes copied before it are returned.
    ///
    /// # Errors
    ///
    /// `ConsoleError::Killed` if the caller is killed while waiting for
    /// input. Nothing has been copied in that case.
    pub fn read(
        &self,
        caller: &dyn Caller,
        space: AddrSpace,
        dst: u64,
        n: usize,
    ) -> Result<usize, ConsoleError> {
        let target = n;
        let mut n = n;
        let mut dst = dst;

        let mut cons = self.lock();
        while n > 0 {
            // wait until the interrupt handler has committed some input
            while cons.is_empty() {
                if caller.killed() {
                    drop(cons);
                    log::debug!("console.read: caller killed while waiting");
                    return Err(ConsoleError::Killed);
                }
                self.readable.sleep(&mut cons);
            }

            let c = cons.pop();

            if c == self.keys.eof {
                if n < target {
                    // Save the marker for next time, so the caller
                    // gets a 0-byte result.
                    cons.unpop();
                }
                break;
            }

            if let Err(fault) = caller.either_copyout(space, dst, &[c]) {
                log::debug!("console.read: stopping after {} bytes: {fault}", target - n);
                break;
            }

            dst = dst.wrapping_add(1);
            n -= 1;

            if c == b'\n' {
                // a whole line has arrived
                break;
            }
        }
        log::trace!("console.read: {} bytes, {:?}", target - n, cons.cursors());
        drop(cons);

        Ok(target - n)
    }
}
