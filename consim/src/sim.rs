//! Simulated hardware and tasks around the console

use linecons::{AddrSpace, Console, ConsoleError, ProcDump, Uart};
use linecons_mocked::MockProcess;
use std::io::{BufReader, Read, Write};
use std::sync::Arc;
use std::thread;
use tracing::{debug, info};

/// Size of the reader's user buffer
pub const LINE_MAX: usize = 256;

pub type SimConsole = Console<StdoutUart, SimDump>;

/// Transmitter that writes to stdout
#[derive(Debug)]
pub struct StdoutUart;

impl Uart for StdoutUart {
    fn init(&self) {
        debug!("uart: stdout transmitter ready");
    }

    fn putc_sync(&self, c: u8) {
        let mut out = std::io::stdout().lock();
        // A closed stdout loses echo, like an unplugged terminal.
        let _ = out.write_all(&[c]).and_then(|()| out.flush());
    }
}

/// Process list of the simulator: just the reader task
#[derive(Debug)]
pub struct SimDump {
    reader: Arc<MockProcess>,
}

impl SimDump {
    #[must_use]
    pub fn new(reader: Arc<MockProcess>) -> Self {
        Self { reader }
    }
}

impl ProcDump for SimDump {
    fn dump(&self) {
        use linecons::Caller as _;
        let state = if self.reader.killed() { "killed" } else { "run" };
        info!("procdump:\n1 {state} reader");
    }
}

/// Start the receive "interrupt": a thread feeding every input byte to
/// the console, then an end-of-input marker once the source runs dry.
///
/// # Errors
///
/// If the thread cannot be spawned.
pub fn spawn_rx(
    console: Arc<SimConsole>,
    input: Box<dyn Read + Send>,
) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("uart-rx".to_string())
        .spawn(move || {
            let eof = console.keys().eof;
            let mut ended = false;
            for byte in BufReader::new(input).bytes() {
                match byte {
                    Ok(c) => {
                        console.interrupt(c);
                        ended = c == eof;
                    }
                    Err(e) => {
                        debug!("uart-rx: input error: {e}");
                        break;
                    }
                }
            }
            if !ended {
                console.interrupt(eof);
            }
            debug!("uart-rx: input exhausted");
        })
}

/// Read lines until end-of-input. Returns how many lines were read.
///
/// # Errors
///
/// `ConsoleError::Killed` if the task is killed while waiting.
pub fn read_lines(console: &SimConsole, task: &MockProcess) -> Result<usize, ConsoleError> {
    let mut lines = 0;
    loop {
        let n = console.read(task, AddrSpace::User, 0, LINE_MAX)?;
        if n == 0 {
            info!("reader: end of input");
            return Ok(lines);
        }
        let line = task.peek(AddrSpace::User, 0, n);
        info!(bytes = n, line = ?String::from_utf8_lossy(&line), "reader: read");
        if line.last() == Some(&b'\n') {
            lines += 1;
        }
    }
}
