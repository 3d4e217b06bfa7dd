//! Circular input buffer with read, commit and edit cursors
//!
//! The cursors only ever grow (with wrapping arithmetic) and are reduced
//! modulo the capacity when indexing, so `read == commit` is an unambiguous
//! "nothing to read" test even after the counters wrap.
//!
//! ```text
//!            read            commit            edit
//!  ... ───────┼───────────────┼─────────────────┼─────── ...
//!             │ committed,    │ typed, still    │
//!             │ readable      │ editable        │
//! ```
//!
//! Invariants, kept by every mutation:
//! - `read <= commit <= edit`
//! - `edit - read <= capacity`

/// Capacity of the input buffer of the classic console
pub const INPUT_BUF_SIZE: usize = 128;

/// Snapshot of the three cursors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursors {
    pub read: usize,
    pub commit: usize,
    pub edit: usize,
}

/// Input line buffer
///
/// Has no locking of its own; the console keeps it behind its mutex.
#[derive(Debug)]
pub struct LineBuffer {
    buf: Box<[u8]>,
    r: usize,
    w: usize,
    e: usize,
}

impl LineBuffer {
    /// Create a buffer of `capacity` bytes
    ///
    /// `capacity` must be a non-zero power of two, see
    /// [`crate::ConsoleConfig::validate`].
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self::with_origin(capacity, 0)
    }

    /// Create a buffer whose cursors all start at `origin`
    #[must_use]
    pub fn with_origin(capacity: usize, origin: usize) -> Self {
        debug_assert!(capacity.is_power_of_two());
        Self {
            buf: vec![0; capacity].into_boxed_slice(),
            r: origin,
            w: origin,
            e: origin,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    #[must_use]
    pub fn cursors(&self) -> Cursors {
        Cursors {
            read: self.r,
            commit: self.w,
            edit: self.e,
        }
    }

    /// Number of committed, unread bytes
    #[must_use]
    pub fn readable(&self) -> usize {
        self.w.wrapping_sub(self.r)
    }

    /// Number of bytes typed since the last commit
    #[must_use]
    pub fn editing(&self) -> usize {
        self.e.wrapping_sub(self.w)
    }

    /// Nothing committed is left to read
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.r == self.w
    }

    /// No room for another byte until a reader catches up
    #[must_use]
    pub fn is_saturated(&self) -> bool {
        self.e.wrapping_sub(self.r) == self.capacity()
    }

    fn slot(&self, cursor: usize) -> usize {
        cursor % self.capacity()
    }

    /// Append at the edit cursor. Caller checks saturation first.
    pub(crate) fn push(&mut self, c: u8) {
        debug_assert!(!self.is_saturated());
        let i = self.slot(self.e);
        self.buf[i] = c;
        self.e = self.e.wrapping_add(1);
    }

    /// The byte just before the edit cursor, if it has not been committed
    pub(crate) fn last_edited(&self) -> Option<u8> {
        if self.e == self.w {
            None
        } else {
            Some(self.buf[self.slot(self.e.wrapping_sub(1))])
        }
    }

    /// Drop the last uncommitted byte. Returns false if there was none.
    pub(crate) fn unpush(&mut self) -> bool {
        if self.e == self.w {
            return false;
        }
        self.e = self.e.wrapping_sub(1);
        true
    }

    /// Make everything typed so far readable
    pub(crate) fn commit(&mut self) {
        self.w = self.e;
    }

    /// Take the next committed byte. Caller checks `is_empty` first.
    pub(crate) fn pop(&mut self) -> u8 {
        debug_assert!(!self.is_empty());
        let c = self.buf[self.slot(self.r)];
        self.r = self.r.wrapping_add(1);
        c
    }

    /// Give back the byte returned by the last `pop`
    pub(crate) fn unpop(&mut self) {
        self.r = self.r.wrapping_sub(1);
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new(INPUT_BUF_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_invariants(lb: &LineBuffer) {
        let c = lb.cursors();
        assert!(c.commit.wrapping_sub(c.read) <= c.edit.wrapping_sub(c.read));
        assert!(c.edit.wrapping_sub(c.read) <= lb.capacity());
    }

    #[test]
    fn test_new_buffer_is_empty() {
        let lb = LineBuffer::default();
        assert!(lb.is_empty());
        assert!(!lb.is_saturated());
        assert_eq!(lb.capacity(), INPUT_BUF_SIZE);
        assert_eq!(
            lb.cursors(),
            Cursors {
                read: 0,
                commit: 0,
                edit: 0
            }
        );
    }

    #[test]
    fn test_push_is_invisible_until_commit() {
        let mut lb = LineBuffer::new(8);
        lb.push(b'a');
        lb.push(b'b');
        assert!(lb.is_empty());
        assert_eq!(lb.editing(), 2);

        lb.commit();
        assert_eq!(lb.readable(), 2);
        assert_eq!(lb.editing(), 0);
        assert_eq!(lb.pop(), b'a');
        assert_eq!(lb.pop(), b'b');
        assert!(lb.is_empty());
        check_invariants(&lb);
    }

    #[test]
    fn test_unpush_stops_at_commit() {
        let mut lb = LineBuffer::new(8);
        lb.push(b'x');
        lb.commit();
        lb.push(b'y');
        assert_eq!(lb.last_edited(), Some(b'y'));
        assert!(lb.unpush());
        assert_eq!(lb.last_edited(), None);
        assert!(!lb.unpush());
        assert_eq!(lb.readable(), 1);
        check_invariants(&lb);
    }

    #[test]
    fn test_saturation_counts_unread_bytes() {
        let mut lb = LineBuffer::new(4);
        for c in b"abcd" {
            lb.push(*c);
        }
        assert!(lb.is_saturated());
        lb.commit();
        lb.pop();
        assert!(!lb.is_saturated());
        lb.push(b'e');
        assert!(lb.is_saturated());
        check_invariants(&lb);
    }

    #[test]
    fn test_unpop_restores_byte() {
        let mut lb = LineBuffer::new(4);
        lb.push(b'q');
        lb.commit();
        assert_eq!(lb.pop(), b'q');
        lb.unpop();
        assert_eq!(lb.readable(), 1);
        assert_eq!(lb.pop(), b'q');
    }

    #[test]
    fn test_cursors_wrap_around_usize() {
        let mut lb = LineBuffer::with_origin(4, usize::MAX - 1);
        for c in b"wxyz" {
            lb.push(*c);
            check_invariants(&lb);
        }
        assert!(lb.is_saturated());
        lb.commit();
        assert_eq!(lb.cursors().commit, 2);
        assert_eq!(lb.readable(), 4);

        let out: Vec<u8> = (0..4).map(|_| lb.pop()).collect();
        assert_eq!(out, b"wxyz");
        assert!(lb.is_empty());
        check_invariants(&lb);
    }
}
