//! Console simulator
//!
//! Wires one console to stdout (transmit) and to stdin or a script file
//! (receive interrupts), and runs a blocking reader that logs every line.
//!
//! ```text
//! consim [--config FILE] [--script FILE]
//! ```
//!
//! Pipe raw bytes in to exercise the line discipline, e.g.
//! `printf 'hi\x08ey\rbye\x04' | consim`. Ctrl-C kills the reader.

mod sim;

use linecons::{Console, ConsoleConfig};
use linecons_mocked::MockProcess;
use std::fmt::Write as _;
use std::fs::File;
use std::io::Read;
use std::sync::Arc;
use tracing::{info, warn};

use sim::{read_lines, spawn_rx, SimDump, StdoutUart, LINE_MAX};

#[derive(Debug, Default)]
struct Args {
    config: Option<String>,
    script: Option<String>,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
        let mut parsed = Self::default();
        while let Some(arg) = args.next() {
            let slot = match arg.as_str() {
                "--config" => &mut parsed.config,
                "--script" => &mut parsed.script,
                other => return Err(format!("unknown argument: {other}")),
            };
            *slot = Some(args.next().ok_or_else(|| format!("{arg} needs a file name"))?);
        }
        Ok(parsed)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse(std::env::args().skip(1))?;

    let config = match &args.config {
        Some(path) => ConsoleConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => ConsoleConfig::default(),
    };

    let task = Arc::new(MockProcess::new(LINE_MAX, 0));
    let console = Arc::new(Console::init(
        &config,
        StdoutUart,
        SimDump::new(Arc::clone(&task)),
    )?);
    writeln!(
        console.printer(),
        "consim: {} byte input buffer, byte {:#04x} ends input",
        config.capacity, config.keys.eof
    )?;

    let input: Box<dyn Read + Send> = match &args.script {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(std::io::stdin()),
    };
    // Never joined: on Ctrl-C it may be blocked on stdin.
    let _rx = spawn_rx(Arc::clone(&console), input)?;

    let mut reader = {
        let console = Arc::clone(&console);
        let task = Arc::clone(&task);
        tokio::task::spawn_blocking(move || read_lines(&console, &task))
    };

    let finished = tokio::select! {
        res = &mut reader => Some(res?),
        _ = tokio::signal::ctrl_c() => None,
    };
    let result = match finished {
        Some(result) => result,
        None => {
            warn!("interrupted, killing reader");
            task.kill();
            console.wakeup_readers();
            reader.await?
        }
    };

    match result {
        Ok(lines) => info!(lines, "session ended"),
        Err(e) => warn!("reader stopped: {e}"),
    }
    Ok(())
}
