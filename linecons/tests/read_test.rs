mod common;

use common::{feed, init_logging, process, read_user};
use linecons::keys::{ctrl, CTRL_D, CTRL_H, CTRL_U};
use linecons::{
    AddrSpace, CharDevice, Console, ConsoleConfig, ConsoleError, KeyBindings, LineBuffer,
};
use linecons_mocked::{CountingDump, RecordingUart};
use std::sync::Arc;

#[test]
fn reads_one_line() {
    init_logging();
    let (console, uart, _) = linecons_mocked::console();
    let proc = process();

    feed(&console, b"hi\n");

    assert_eq!(uart.output(), b"hi\n");
    assert_eq!(read_user(&console, &proc, 10).unwrap(), b"hi\n");
}

#[test]
fn erase_before_newline() {
    let (console, _, _) = linecons_mocked::console();
    let proc = process();

    feed(&console, &[b'h', b'i', CTRL_H, b'e', b'y', b'\n']);

    assert_eq!(read_user(&console, &proc, 10).unwrap(), b"hey\n");
}

#[test]
fn kill_before_newline() {
    let (console, _, _) = linecons_mocked::console();
    let proc = process();

    feed(&console, &[b'a', b'b', b'c', CTRL_U, b'd', b'e', b'\n']);

    assert_eq!(read_user(&console, &proc, 10).unwrap(), b"de\n");
}

#[test]
fn lone_end_of_input_reads_zero() {
    let (console, _, _) = linecons_mocked::console();
    let proc = process();

    console.interrupt(CTRL_D);

    assert_eq!(read_user(&console, &proc, 10).unwrap(), b"");
    assert!(console.cursors().read == console.cursors().commit);
}

#[test]
fn end_of_input_after_bytes_is_delivered_next_call() {
    let (console, _, _) = linecons_mocked::console();
    let proc = process();

    feed(&console, &[b'a', b'b', CTRL_D]);

    assert_eq!(read_user(&console, &proc, 10).unwrap(), b"ab");
    assert_eq!(console.cursors().read, 2);
    assert_eq!(read_user(&console, &proc, 10).unwrap(), b"");
    assert_eq!(console.cursors().read, 3);

    // input after end-of-input reads normally
    feed(&console, b"c\n");
    assert_eq!(read_user(&console, &proc, 10).unwrap(), b"c\n");
}

#[test]
fn end_of_input_not_reached_when_count_runs_out() {
    let (console, _, _) = linecons_mocked::console();
    let proc = process();

    feed(&console, &[b'a', b'b', CTRL_D]);

    assert_eq!(read_user(&console, &proc, 2).unwrap(), b"ab");
    assert_eq!(read_user(&console, &proc, 10).unwrap(), b"");
}

#[test]
fn read_stops_at_count_then_resumes_line() {
    let (console, _, _) = linecons_mocked::console();
    let proc = process();

    feed(&console, b"hello\nworld\n");

    assert_eq!(read_user(&console, &proc, 3).unwrap(), b"hel");
    assert_eq!(read_user(&console, &proc, 10).unwrap(), b"lo\n");
    assert_eq!(read_user(&console, &proc, 10).unwrap(), b"world\n");
}

#[test]
fn zero_count_returns_immediately() {
    let (console, _, _) = linecons_mocked::console();
    let proc = process();

    // would block forever if it waited for input
    assert_eq!(console.read(&proc, AddrSpace::User, 0, 0), Ok(0));
}

#[test]
fn reads_into_kernel_space() {
    let (console, _, _) = linecons_mocked::console();
    let proc = process();

    feed(&console, b"k\n");

    assert_eq!(console.read(&proc, AddrSpace::Kernel, 16, 10), Ok(2));
    assert_eq!(proc.peek(AddrSpace::Kernel, 16, 2), b"k\n");
    assert_eq!(proc.peek(AddrSpace::User, 16, 2), [0, 0]);
}

#[test]
fn copy_fault_returns_partial_count() {
    let (console, _, _) = linecons_mocked::console();
    let proc = process();

    feed(&console, b"abcd\n");
    proc.fault_from(2);

    assert_eq!(console.read(&proc, AddrSpace::User, 0, 10), Ok(2));
    assert_eq!(proc.peek(AddrSpace::User, 0, 2), b"ab");

    // the byte that failed to copy is gone
    proc.clear_fault();
    assert_eq!(read_user(&console, &proc, 10).unwrap(), b"d\n");
}

#[test]
fn copy_fault_on_first_byte_reads_zero() {
    let (console, _, _) = linecons_mocked::console();
    let proc = process();

    feed(&console, b"xy\n");
    proc.fault_from(0);

    assert_eq!(console.read(&proc, AddrSpace::User, 0, 10), Ok(0));
}

#[test]
fn cursors_wrap_around() {
    let uart = Arc::new(RecordingUart::new());
    let console = Console::from_parts(
        LineBuffer::with_origin(8, usize::MAX - 3),
        KeyBindings::default(),
        Arc::clone(&uart),
        Arc::new(CountingDump::new()),
    );
    let proc = process();

    for line in [&b"abcdef\n"[..], b"ghi\n", b"jklmnop\n"] {
        for &c in line {
            console.interrupt(c);
        }
        let got = console.read(&proc, AddrSpace::User, 0, 16).unwrap();
        assert_eq!(proc.peek(AddrSpace::User, 0, got), line);
    }
    let c = console.cursors();
    assert_eq!(c.read, c.commit);
    assert!(c.read < 100);
}

#[test]
fn rebound_end_of_input_key() {
    let config = ConsoleConfig {
        keys: KeyBindings {
            eof: ctrl(b'Z'),
            ..KeyBindings::default()
        },
        ..ConsoleConfig::default()
    };
    let (console, _, _) = linecons_mocked::console_with(&config).unwrap();
    let proc = process();

    feed(&console, &[b'a', CTRL_D, ctrl(b'Z')]);

    assert_eq!(read_user(&console, &proc, 10).unwrap(), [b'a', CTRL_D]);
    assert_eq!(read_user(&console, &proc, 10).unwrap(), b"");
}

#[test]
fn device_switch_dispatch() {
    let (console, uart, _) = linecons_mocked::console();
    let proc = process();
    let dev: &dyn CharDevice = &console;

    feed(&console, b"dev\n");
    assert_eq!(dev.read(&proc, AddrSpace::User, 0, 10), Ok(4));

    uart.take_output();
    proc.poke(AddrSpace::User, 32, b"out");
    assert_eq!(dev.write(&proc, AddrSpace::User, 32, 3), Ok(3));
    assert_eq!(uart.output(), b"out");
}

#[test]
fn init_validates_and_brings_up_uart() {
    let (_, uart, _) = linecons_mocked::console_with(&ConsoleConfig::default()).unwrap();
    assert_eq!(uart.inits(), 1);

    let bad = ConsoleConfig {
        capacity: 100,
        ..ConsoleConfig::default()
    };
    assert!(linecons_mocked::console_with(&bad).is_err());
}

#[test]
fn killed_error_maps_to_minus_one() {
    assert_eq!(ConsoleError::Killed.errno(), -1);
}
