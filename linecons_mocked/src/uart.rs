use linecons::Uart;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// UART that records what it transmits
///
/// Bytes from `putc_sync` (echo, kernel printing) and `putc` (user writes)
/// land in the same stream, in order.
#[derive(Debug, Default)]
pub struct RecordingUart {
    out: Mutex<Vec<u8>>,
    async_bytes: AtomicUsize,
    inits: AtomicUsize,
}

impl RecordingUart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything transmitted so far
    #[must_use]
    pub fn output(&self) -> Vec<u8> {
        self.out.lock().clone()
    }

    /// Return and forget everything transmitted so far
    pub fn take_output(&self) -> Vec<u8> {
        std::mem::take(&mut *self.out.lock())
    }

    /// Bytes that went through the interrupt-driven path
    #[must_use]
    pub fn async_bytes(&self) -> usize {
        self.async_bytes.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn inits(&self) -> usize {
        self.inits.load(Ordering::Relaxed)
    }
}

impl Uart for RecordingUart {
    fn init(&self) {
        self.inits.fetch_add(1, Ordering::Relaxed);
    }

    fn putc_sync(&self, c: u8) {
        self.out.lock().push(c);
    }

    fn putc(&self, c: u8) {
        self.async_bytes.fetch_add(1, Ordering::Relaxed);
        self.out.lock().push(c);
    }
}
