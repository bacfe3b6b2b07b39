use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use crate::model::SeatId;

/// Free seats, ordered so the smallest number is always handed out first.
///
/// `ceiling` is the highest seat number ever created. New capacity always
/// starts above it, even when lower numbers are sitting free.
#[derive(Debug, Clone, Default)]
pub struct SeatPool {
    free: BTreeSet<SeatId>,
    ceiling: SeatId,
}

impl SeatPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return the lowest free seat.
    pub fn take_min(&mut self) -> Option<SeatId> {
        self.free.pop_first()
    }

    /// Return a seat to the pool. The caller guarantees it was assigned.
    pub fn give(&mut self, seat: SeatId) {
        debug_assert!(seat >= 1 && seat <= self.ceiling, "seat {seat} was never created");
        let fresh = self.free.insert(seat);
        debug_assert!(fresh, "seat {seat} was already free");
    }

    /// Create `count` seats numbered `ceiling + 1 ..= ceiling + count`, all free.
    ///
    /// The caller checks that the new ceiling fits in `SeatId`.
    pub fn add_range(&mut self, count: u32) -> RangeInclusive<SeatId> {
        debug_assert!(count > 0);
        let first = self.ceiling + 1;
        let last = self.ceiling + count;
        self.free.extend(first..=last);
        self.ceiling = last;
        first..=last
    }

    pub fn ceiling(&self) -> SeatId {
        self.ceiling
    }

    pub fn len(&self) -> usize {
        self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }

    pub fn contains(&self, seat: SeatId) -> bool {
        self.free.contains(&seat)
    }

    pub fn iter(&self) -> impl Iterator<Item = SeatId> + '_ {
        self.free.iter().copied()
    }
}
