//! Change-tracked value cell
//!
//! Earlier prototypes kept a hand-written `value`/`prev_value` pair per
//! sensor and a shared "screen needs update" flag, with all the
//! bookkeeping drift that invites. `Tracked` owns that pattern once:
//! store a value, learn whether it changed, and keep a dirty bit until
//! the consumer clears it.

/// A value plus its previous value and a "changed since last flush" bit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tracked<T> {
    current: T,
    previous: T,
    dirty: bool,
}

impl<T: Copy + PartialEq> Tracked<T> {
    /// New cell holding `initial` as both current and previous, clean
    pub const fn new(initial: T) -> Self {
        Self {
            current: initial,
            previous: initial,
            dirty: false,
        }
    }

    /// Store `value`.
    ///
    /// If `value` differs from the held value, the held value is latched
    /// as previous, the cell is marked dirty, and the call returns `true`.
    /// Storing an equal value changes nothing and returns `false`; in
    /// particular it neither disturbs `previous` nor clears an already-set
    /// dirty bit.
    pub fn update(&mut self, value: T) -> bool {
        if value == self.current {
            return false;
        }
        self.previous = self.current;
        self.current = value;
        self.dirty = true;
        true
    }

    /// Current value
    pub fn get(&self) -> T {
        self.current
    }

    /// Value held before the most recent change
    pub fn previous(&self) -> T {
        self.previous
    }

    /// Whether the value changed since the last [`Self::clear_dirty`]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the cell clean
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}
