//! Console input interrupt handler
//!
//! Called once per received byte. Does erase/kill processing with echo,
//! appends to the line buffer, and commits (waking readers) when a whole
//! line, an end-of-input marker, or a full buffer has arrived.

use crate::console::Console;
use crate::hal::{ProcDump, Uart};
use crate::keys::Input;

impl<U: Uart, D: ProcDump> Console<U, D> {
    /// Handle one input byte from the UART receive interrupt.
    ///
    /// Never sleeps. Input that arrives while the buffer is saturated is
    /// dropped.
    pub fn interrupt(&self, c: u8) {
        let mut cons = self.lock();

        match self.keys.classify(c) {
            Input::ProcDump => self.procdump.dump(),
            Input::KillLine => {
                while cons.last_edited().is_some_and(|prev| prev != b'\n') {
                    cons.unpush();
                    self.put_backspace();
                }
            }
            Input::Erase => {
                if cons.unpush() {
                    self.put_backspace();
                }
            }
            Input::Char(0) => {}
            Input::Char(c) if cons.is_saturated() => {
                log::debug!("console.intr: input buffer full, dropping {c:#04x}");
            }
            Input::Char(c) => {
                let c = if c == b'\r' { b'\n' } else { c };

                // echo back to the user
                self.put_char(c);

                cons.push(c);
                log::trace!("console.intr: {c:#04x}, {:?}", cons.cursors());

                if c == b'\n' || c == self.keys.eof || cons.is_saturated() {
                    cons.commit();
                    let woken = self.readable.wakeup();
                    log::debug!(
                        "console.intr: commit, {} bytes readable, woke {woken} readers",
                        cons.readable()
                    );
                }
            }
        }
    }
}
