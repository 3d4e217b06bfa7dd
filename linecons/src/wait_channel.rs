//! Sleep/wakeup rendezvous between the input interrupt and blocked readers
//!
//! # Sleeping without losing a wakeup
//!
//! 10. Reader: lock the console
//! 20. Reader: check "is there anything to read?"
//! 30. Reader: nothing there, call `sleep`
//! 40. Channel: release the lock and suspend, as one step
//!
//! 50. Interrupt: lock the console, commit a line
//! 60. Interrupt: call `wakeup`
//!
//! 70. Reader: wake, re-acquire the lock, go back to 20
//!
//! Because 20-40 run with the lock held and 40 releases it atomically, the
//! commit at 50 cannot slip in between the check and the suspend.
//!
//! A wakeup is only a hint. The reader re-checks its condition (and whether
//! its task was killed) every time it returns from `sleep`.

use parking_lot::{Condvar, MutexGuard};
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct WaitChannel {
    cond: Condvar,
    sleepers: AtomicUsize,
}

impl WaitChannel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Release the lock held by `guard`, suspend until `wakeup`, re-acquire.
    ///
    /// Precondition: the caller checked its wait condition under this lock.
    pub fn sleep<T>(&self, guard: &mut MutexGuard<'_, T>) {
        self.sleepers.fetch_add(1, Ordering::SeqCst);
        self.cond.wait(guard);
        self.sleepers.fetch_sub(1, Ordering::SeqCst);
    }

    /// Wake every sleeper. Returns how many were woken.
    pub fn wakeup(&self) -> usize {
        self.cond.notify_all()
    }

    /// Number of tasks currently suspended in `sleep`
    #[must_use]
    pub fn sleepers(&self) -> usize {
        self.sleepers.load(Ordering::SeqCst)
    }
}
