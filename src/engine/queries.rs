use std::collections::HashSet;

use crate::model::*;

use super::Engine;

impl Engine {
    pub fn available(&self) -> Availability {
        Availability {
            free_seats: self.pool.len(),
            waitlist: self.waitlist.len(),
        }
    }

    /// Current reservations, ascending by seat.
    pub fn reservations(&self) -> Vec<Assignment> {
        let mut all = self.directory.all();
        all.sort_unstable_by_key(|a| a.seat);
        all
    }

    pub fn seat_of(&self, user: UserId) -> Option<SeatId> {
        self.directory.get(user)
    }

    pub fn is_waiting(&self, user: UserId) -> bool {
        self.waitlist.contains(user)
    }

    /// Waiters in the order they will be served.
    pub fn waitlist(&self) -> Vec<Waiter> {
        self.waitlist.iter().copied().collect()
    }

    /// Highest seat number ever created.
    pub fn total_seats(&self) -> SeatId {
        self.pool.ceiling()
    }

    /// Verify the cross-structure invariants. Returns a description of the
    /// first violation found.
    pub fn check_invariants(&self) -> Result<(), String> {
        let mut assigned = HashSet::with_capacity(self.directory.len());
        for seat in self.directory.seats() {
            if seat == 0 || seat > self.pool.ceiling() {
                return Err(format!("assigned seat {seat} outside [1, {}]", self.pool.ceiling()));
            }
            if !assigned.insert(seat) {
                return Err(format!("seat {seat} assigned twice"));
            }
            if self.pool.contains(seat) {
                return Err(format!("seat {seat} both free and assigned"));
            }
        }
        if let Some(seat) = self.pool.iter().find(|&s| s == 0 || s > self.pool.ceiling()) {
            return Err(format!("free seat {seat} outside [1, {}]", self.pool.ceiling()));
        }
        let covered = assigned.len() + self.pool.len();
        if covered != self.pool.ceiling() as usize {
            return Err(format!(
                "{covered} seats accounted for, {} created",
                self.pool.ceiling()
            ));
        }

        if let Some(w) = self.waitlist.iter().find(|w| self.directory.contains(w.user)) {
            return Err(format!("user {} both waiting and seated", w.user));
        }
        if !self.waitlist.is_consistent() {
            return Err("waitlist queue and index disagree".into());
        }
        if let Some(w) = self.waitlist.iter().find(|w| w.arrival >= self.next_arrival) {
            return Err(format!("user {} has unissued arrival {}", w.user, w.arrival));
        }
        Ok(())
    }
}
