use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use crate::model::{Assignment, SeatId, UserId};

/// Ordered user → seat map. Every lookup, insert and delete is O(log n).
#[derive(Debug, Clone, Default)]
pub struct Directory {
    by_user: BTreeMap<UserId, SeatId>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `user` to `seat`, returning the seat it previously held.
    pub fn put(&mut self, user: UserId, seat: SeatId) -> Option<SeatId> {
        self.by_user.insert(user, seat)
    }

    pub fn get(&self, user: UserId) -> Option<SeatId> {
        self.by_user.get(&user).copied()
    }

    pub fn remove(&mut self, user: UserId) -> Option<SeatId> {
        self.by_user.remove(&user)
    }

    pub fn contains(&self, user: UserId) -> bool {
        self.by_user.contains_key(&user)
    }

    /// All reservations in user-id order.
    pub fn all(&self) -> Vec<Assignment> {
        self.by_user
            .iter()
            .map(|(&user, &seat)| Assignment::new(user, seat))
            .collect()
    }

    /// Reservations held by users in `users`, in user-id order.
    pub fn range(&self, users: RangeInclusive<UserId>) -> Vec<Assignment> {
        if users.is_empty() {
            return Vec::new();
        }
        self.by_user
            .range(users)
            .map(|(&user, &seat)| Assignment::new(user, seat))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.by_user.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.by_user.is_empty()
    }

    pub fn seats(&self) -> impl Iterator<Item = SeatId> + '_ {
        self.by_user.values().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_overwrites_existing_user() {
        let mut dir = Directory::new();
        assert_eq!(dir.put(7, 1), None);
        assert_eq!(dir.put(7, 4), Some(1));
        assert_eq!(dir.get(7), Some(4));
        assert_eq!(dir.len(), 1);
    }

    #[test]
    fn all_is_ordered_by_user() {
        let mut dir = Directory::new();
        dir.put(30, 1);
        dir.put(10, 2);
        dir.put(20, 3);
        let users: Vec<_> = dir.all().iter().map(|a| a.user).collect();
        assert_eq!(users, vec![10, 20, 30]);
    }

    #[test]
    fn range_is_inclusive_and_handles_inverted_bounds() {
        let mut dir = Directory::new();
        for (u, s) in [(1, 1), (2, 2), (3, 3), (5, 4)] {
            dir.put(u, s);
        }
        let hit: Vec<_> = dir.range(2..=5).iter().map(|a| a.user).collect();
        assert_eq!(hit, vec![2, 3, 5]);
        assert!(dir.range(5..=2).is_empty());
    }

    #[test]
    fn remove_missing_is_none() {
        let mut dir = Directory::new();
        dir.put(1, 1);
        assert_eq!(dir.remove(2), None);
        assert_eq!(dir.remove(1), Some(1));
        assert!(dir.is_empty());
    }
}
