use linecons::ProcDump;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Process-list dump that only counts invocations
#[derive(Debug, Default)]
pub struct CountingDump {
    count: AtomicUsize,
}

impl CountingDump {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }
}

impl ProcDump for CountingDump {
    fn dump(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }
}
