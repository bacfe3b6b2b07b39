use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};
use std::ops::RangeInclusive;

use crate::model::{ArrivalOrder, Priority, UserId, Waiter};

/// Service-order key: highest priority first, then earliest arrival.
/// `user` is carried along so the key alone identifies the index entry.
type QueueKey = (Reverse<Priority>, ArrivalOrder, UserId);

fn queue_key(w: &Waiter) -> QueueKey {
    (Reverse(w.priority), w.arrival, w.user)
}

/// Priority queue of waiting users with O(log n) arbitrary removal and
/// priority update.
///
/// `queue` holds the service order; `by_user` is the index used for
/// presence checks, removal and range scans by user id. Both always hold
/// the same set of users.
#[derive(Debug, Clone, Default)]
pub struct Waitlist {
    queue: BTreeSet<QueueKey>,
    by_user: BTreeMap<UserId, Waiter>,
}

impl Waitlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a waiter. The caller guarantees `user` is not already waiting
    /// and that `arrival` is unique.
    pub fn insert(&mut self, user: UserId, priority: Priority, arrival: ArrivalOrder) {
        let waiter = Waiter { user, priority, arrival };
        let prev = self.by_user.insert(user, waiter);
        debug_assert!(prev.is_none(), "user {user} already waiting");
        self.queue.insert(queue_key(&waiter));
    }

    /// Remove and return the next waiter to serve.
    pub fn pop_highest(&mut self) -> Option<Waiter> {
        let (_, _, user) = self.queue.pop_first()?;
        self.by_user.remove(&user)
    }

    #[cfg(test)]
    pub fn peek_highest(&self) -> Option<&Waiter> {
        let (_, _, user) = self.queue.first()?;
        self.by_user.get(user)
    }

    /// Remove `user` wherever it sits in the queue. `None` if not waiting.
    pub fn remove(&mut self, user: UserId) -> Option<Waiter> {
        let waiter = self.by_user.remove(&user)?;
        self.queue.remove(&queue_key(&waiter));
        Some(waiter)
    }

    /// Re-rank `user` under a new priority. Arrival order is kept, so a user
    /// returning to its old priority returns to its old place.
    pub fn update_priority(&mut self, user: UserId, priority: Priority) -> bool {
        let Some(waiter) = self.by_user.get_mut(&user) else {
            return false;
        };
        self.queue.remove(&queue_key(waiter));
        waiter.priority = priority;
        self.queue.insert(queue_key(waiter));
        true
    }

    pub fn contains(&self, user: UserId) -> bool {
        self.by_user.contains_key(&user)
    }

    #[cfg(test)]
    pub fn get(&self, user: UserId) -> Option<&Waiter> {
        self.by_user.get(&user)
    }

    /// Waiting users whose id falls in `users`, ascending by id.
    pub fn users_in(&self, users: RangeInclusive<UserId>) -> Vec<UserId> {
        if users.is_empty() {
            return Vec::new();
        }
        self.by_user.range(users).map(|(&user, _)| user).collect()
    }

    /// Waiters in service order.
    pub fn iter(&self) -> impl Iterator<Item = &Waiter> + '_ {
        self.queue
            .iter()
            .filter_map(|(_, _, user)| self.by_user.get(user))
    }

    pub fn len(&self) -> usize {
        self.by_user.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_user.is_empty()
    }

    /// Both halves agree on membership and on each waiter's key.
    pub(super) fn is_consistent(&self) -> bool {
        self.queue.len() == self.by_user.len()
            && self
                .by_user
                .values()
                .all(|w| self.queue.contains(&queue_key(w)))
    }
}
