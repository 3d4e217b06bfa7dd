//! Special input characters
//!
//! * `newline` -- end of line
//! * `control-h` -- backspace
//! * `control-u` -- kill line
//! * `control-d` -- end of file
//! * `control-p` -- print process list

use crate::config::KeyBindings;

/// Control-x
#[must_use]
pub const fn ctrl(x: u8) -> u8 {
    x - b'@'
}

pub const CTRL_H: u8 = ctrl(b'H');
pub const CTRL_U: u8 = ctrl(b'U');
pub const CTRL_D: u8 = ctrl(b'D');
pub const CTRL_P: u8 = ctrl(b'P');

/// Delete key, always erases one character
pub const DEL: u8 = 0x7f;

/// Backspace as transmitted to the terminal
pub const BS: u8 = 0x08;

/// What an incoming byte asks the line discipline to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Input {
    ProcDump,
    KillLine,
    Erase,
    Char(u8),
}

impl KeyBindings {
    pub(crate) fn classify(&self, c: u8) -> Input {
        if c == self.procdump {
            Input::ProcDump
        } else if c == self.kill {
            Input::KillLine
        } else if c == self.erase || c == DEL {
            Input::Erase
        } else {
            Input::Char(c)
        }
    }
}
