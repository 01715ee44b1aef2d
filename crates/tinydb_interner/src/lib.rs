//! A fixed-capacity string interner.
//!
//! Strings live in a slot table addressed by a sum-of-bytes hash, with
//! collisions resolved by linear probing. Each distinct string occupies
//! exactly one slot for the lifetime of the interner, so the slot index is a
//! handle ([`Istr`]) that can be compared in constant time.

mod arena;

use std::fmt;
use std::num::NonZeroUsize;
use std::ops::Range;

use arena::InternerArena;

/// Slot count used by [`Interner::new`].
pub const DEFAULT_CAPACITY: usize = 128;

/// Handle to an interned string.
///
/// Two handles from the same interner are equal exactly when their contents
/// are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Istr(NonZeroUsize);

impl Istr {
    fn from_slot(slot: usize) -> Self {
        Self(NonZeroUsize::MIN.saturating_add(slot))
    }

    /// The slot this string occupies in its interner.
    #[inline]
    pub fn slot(self) -> usize {
        self.0.get() - 1
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InternError {
    #[error("string table is full (capacity {capacity})")]
    CapacityExceeded { capacity: usize },

    #[error("byte range {start}..{end} is not a valid slice of the input")]
    InvalidRange { start: usize, end: usize },
}

pub type InternResult<T> = Result<T, InternError>;

pub struct Interner {
    /// Arena index of the string stored in each slot.
    slots: Box<[Option<usize>]>,
    arena: InternerArena,
}

enum Probe {
    Found(usize),
    Vacant(usize),
    Full,
}

impl Interner {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity].into_boxed_slice(),
            arena: InternerArena::default(),
        }
    }

    /// Returns the handle for `s`, storing a copy of it if it hasn't been seen
    /// before.
    pub fn intern(&mut self, s: &str) -> InternResult<Istr> {
        match self.probe(s) {
            Probe::Found(slot) => Ok(Istr::from_slot(slot)),

            Probe::Vacant(slot) => {
                let entry = self.arena.push_str(s);
                self.slots[slot] = Some(entry);
                Ok(Istr::from_slot(slot))
            }

            Probe::Full => Err(InternError::CapacityExceeded {
                capacity: self.capacity(),
            }),
        }
    }

    /// Interns `source[range]`.
    ///
    /// This is how the lexer interns a token straight out of the line it is
    /// scanning; the content is copied, so `source` may be reused afterwards.
    pub fn intern_range(&mut self, source: &str, range: Range<usize>) -> InternResult<Istr> {
        let s = source
            .get(range.clone())
            .ok_or(InternError::InvalidRange {
                start: range.start,
                end: range.end,
            })?;

        self.intern(s)
    }

    /// Finds the handle for `s` without inserting it.
    pub fn lookup(&self, s: &str) -> Option<Istr> {
        match self.probe(s) {
            Probe::Found(slot) => Some(Istr::from_slot(slot)),
            Probe::Vacant(_) | Probe::Full => None,
        }
    }

    #[inline]
    pub fn get(&self, istr: Istr) -> Option<&str> {
        let entry = self.slots.get(istr.slot()).copied().flatten()?;
        self.arena.get(entry)
    }

    /// Slot where the probe sequence for `s` starts.
    pub fn home_slot(&self, s: &str) -> usize {
        match self.capacity() {
            0 => 0,
            capacity => hash_str(s) % capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity()
    }

    /// Iterates over occupied slots in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Istr, &str)> + '_ {
        self.slots.iter().enumerate().filter_map(|(slot, entry)| {
            let s = self.arena.get((*entry)?)?;
            Some((Istr::from_slot(slot), s))
        })
    }

    // Visits each slot at most once, starting from the home slot.
    fn probe(&self, s: &str) -> Probe {
        let capacity = self.capacity();
        let home = self.home_slot(s);

        for offset in 0..capacity {
            let slot = (home + offset) % capacity;

            match self.slots[slot] {
                None => return Probe::Vacant(slot),
                Some(entry) if self.arena.get(entry) == Some(s) => return Probe::Found(slot),
                Some(_) => {}
            }
        }

        Probe::Full
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Interner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(istr, s)| (istr.slot(), s)))
            .finish()
    }
}

/// Sum of the bytes of `s`.
///
/// Weak on purpose: permutations of the same bytes always collide.
pub fn hash_str(s: &str) -> usize {
    s.bytes()
        .fold(0usize, |hash, byte| hash.wrapping_add(byte as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_is_idempotent() {
        let mut interner = Interner::new();

        let hello = interner.intern("Hello").unwrap();
        assert_eq!(interner.len(), 1);
        assert_eq!(interner.intern("Hello").unwrap(), hello);
        assert_eq!(interner.len(), 1);

        let world = interner.intern("World").unwrap();
        assert_eq!(interner.len(), 2);
        assert_ne!(hello, world);

        assert_eq!(interner.get(hello), Some("Hello"));
        assert_eq!(interner.get(world), Some("World"));
    }

    #[test]
    fn colliding_strings_stay_distinct() {
        let mut interner = Interner::new();
        assert_eq!(interner.home_slot("ab"), interner.home_slot("ba"));

        let ab = interner.intern("ab").unwrap();
        let ba = interner.intern("ba").unwrap();

        assert_ne!(ab, ba);
        assert_eq!(ab.slot(), interner.home_slot("ab"));
        assert_eq!(ba.slot(), ab.slot() + 1);

        assert_eq!(interner.intern("ab").unwrap(), ab);
        assert_eq!(interner.intern("ba").unwrap(), ba);
        assert_eq!(interner.get(ab), Some("ab"));
        assert_eq!(interner.get(ba), Some("ba"));
    }

    #[test]
    fn probe_wraps_around() {
        let mut interner = Interner::with_capacity(4);

        // 'c' = 99 and 'g' = 103, both land in the last slot
        let c = interner.intern("c").unwrap();
        let g = interner.intern("g").unwrap();

        assert_eq!(c.slot(), 3);
        assert_eq!(g.slot(), 0);
        assert_eq!(interner.lookup("g"), Some(g));
    }

    #[test]
    fn capacity_boundary() {
        const CAPACITY: usize = 16;
        let mut interner = Interner::with_capacity(CAPACITY);

        let handles: Vec<_> = (0..CAPACITY)
            .map(|i| interner.intern(&format!("s{i}")).unwrap())
            .collect();

        assert!(interner.is_full());
        assert_eq!(
            interner.intern("one too many"),
            Err(InternError::CapacityExceeded { capacity: CAPACITY })
        );

        // existing strings still resolve once the table is full
        for (i, &handle) in handles.iter().enumerate() {
            assert_eq!(interner.intern(&format!("s{i}")), Ok(handle));
        }
        assert_eq!(interner.lookup("one too many"), None);
    }

    #[test]
    fn zero_capacity() {
        let mut interner = Interner::with_capacity(0);
        assert_eq!(
            interner.intern("x"),
            Err(InternError::CapacityExceeded { capacity: 0 })
        );
    }

    #[test]
    fn range_and_whole_string_agree() {
        let mut interner = Interner::new();
        let line = String::from("create table foo");

        let from_range = interner.intern_range(&line, 0..6).unwrap();
        drop(line);

        assert_eq!(interner.intern("create").unwrap(), from_range);
        assert_eq!(interner.get(from_range), Some("create"));
    }

    #[test]
    fn invalid_range() {
        let mut interner = Interner::new();
        assert_eq!(
            interner.intern_range("abc", 1..10),
            Err(InternError::InvalidRange { start: 1, end: 10 })
        );
        assert!(interner.is_empty());
    }

    #[test]
    fn lookup_does_not_insert() {
        let mut interner = Interner::new();
        assert_eq!(interner.lookup("table"), None);
        assert!(interner.is_empty());

        let table = interner.intern("table").unwrap();
        assert_eq!(interner.lookup("table"), Some(table));
    }
}
