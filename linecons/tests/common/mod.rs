#![allow(dead_code)]

use linecons::{AddrSpace, ConsoleError};
use linecons_mocked::{MockConsole, MockProcess};

pub const USER_MEM: usize = 512;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn process() -> MockProcess {
    MockProcess::new(USER_MEM, USER_MEM)
}

/// Deliver `bytes` to the console as receive interrupts
pub fn feed(console: &MockConsole, bytes: &[u8]) {
    for &c in bytes {
        console.interrupt(c);
    }
}

/// Read into user address 0 and return what was copied
pub fn read_user(
    console: &MockConsole,
    proc: &MockProcess,
    n: usize,
) -> Result<Vec<u8>, ConsoleError> {
    let got = console.read(proc, AddrSpace::User, 0, n)?;
    Ok(proc.peek(AddrSpace::User, 0, got))
}
