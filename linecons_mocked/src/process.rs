use linecons::{AddrSpace, Caller, CopyFault};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

const NO_FAULT: u64 = u64::MAX;

/// A calling task with flat user and kernel memory
///
/// Both spaces start zeroed. Copies touching an address at or past the
/// space's end, or at or past `fault_from`, fail; bytes before the
/// failing one are still moved.
#[derive(Debug)]
pub struct MockProcess {
    user: Mutex<Vec<u8>>,
    kernel: Mutex<Vec<u8>>,
    killed: AtomicBool,
    fault_from: AtomicU64,
}

impl MockProcess {
    #[must_use]
    pub fn new(user_size: usize, kernel_size: usize) -> Self {
        Self {
            user: Mutex::new(vec![0; user_size]),
            kernel: Mutex::new(vec![0; kernel_size]),
            killed: AtomicBool::new(false),
            fault_from: AtomicU64::new(NO_FAULT),
        }
    }

    /// Mark the task for termination
    pub fn kill(&self) {
        self.killed.store(true, Ordering::SeqCst);
    }

    /// Make every address at or past `addr` fail to copy, in both spaces
    pub fn fault_from(&self, addr: u64) {
        self.fault_from.store(addr, Ordering::SeqCst);
    }

    /// Store `data` at `addr`, for a later `write()` to copy in
    ///
    /// # Panics
    ///
    /// If `data` does not fit.
    pub fn poke(&self, space: AddrSpace, addr: u64, data: &[u8]) {
        let mut mem = self.space(space).lock();
        let start = usize::try_from(addr).unwrap_or(usize::MAX);
        mem[start..start + data.len()].copy_from_slice(data);
    }

    /// Bytes at `addr`, for checking what a `read()` copied out
    ///
    /// # Panics
    ///
    /// If the range is outside the space.
    #[must_use]
    pub fn peek(&self, space: AddrSpace, addr: u64, len: usize) -> Vec<u8> {
        let mem = self.space(space).lock();
        let start = usize::try_from(addr).unwrap_or(usize::MAX);
        mem[start..start + len].to_vec()
    }

    /// Undo `fault_from`
    pub fn clear_fault(&self) {
        self.fault_from.store(NO_FAULT, Ordering::SeqCst);
    }

    fn space(&self, space: AddrSpace) -> &Mutex<Vec<u8>> {
        match space {
            AddrSpace::User => &self.user,
            AddrSpace::Kernel => &self.kernel,
        }
    }

    fn check(&self, mem_len: usize, addr: u64) -> Result<usize, CopyFault> {
        let fault = CopyFault { addr };
        if addr >= self.fault_from.load(Ordering::SeqCst) {
            return Err(fault);
        }
        match usize::try_from(addr) {
            Ok(i) if i < mem_len => Ok(i),
            _ => Err(fault),
        }
    }
}

impl Caller for MockProcess {
    fn killed(&self) -> bool {
        self.killed.load(Ordering::SeqCst)
    }

    fn either_copyout(&self, space: AddrSpace, dst: u64, src: &[u8]) -> Result<(), CopyFault> {
        let mut mem = self.space(space).lock();
        for (offset, &c) in (0u64..).zip(src) {
            let i = self.check(mem.len(), dst.wrapping_add(offset))?;
            mem[i] = c;
        }
        Ok(())
    }

    fn either_copyin(&self, dst: &mut [u8], space: AddrSpace, src: u64) -> Result<(), CopyFault> {
        let mem = self.space(space).lock();
        for (offset, slot) in (0u64..).zip(dst.iter_mut()) {
            let i = self.check(mem.len(), src.wrapping_add(offset))?;
            *slot = mem[i];
        }
        Ok(())
    }
}
