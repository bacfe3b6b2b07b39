use tracing::{debug, info};

use crate::limits::MAX_TOTAL_SEATS;
use crate::model::*;

use super::{Engine, EngineError};

impl Engine {
    /// Give `user` the lowest free seat, or put it on the waitlist when the
    /// pool is empty. A user that already holds a seat or is already waiting
    /// is rejected without any state change.
    pub fn reserve(&mut self, user: UserId, priority: Priority) -> Result<Reservation, EngineError> {
        if let Some(seat) = self.directory.get(user) {
            return Err(EngineError::AlreadyReserved { user, seat });
        }
        if self.waitlist.contains(user) {
            return Err(EngineError::AlreadyWaitlisted(user));
        }

        match self.pool.take_min() {
            Some(seat) => {
                self.seat_user(user, seat);
                Ok(Reservation::Assigned { user, seat })
            }
            None => {
                let arrival = self.stamp_arrival();
                self.waitlist.insert(user, priority, arrival);
                debug!(user, priority, arrival, "user waitlisted");
                Ok(Reservation::Waitlisted { user, priority })
            }
        }
    }

    /// Cancel `user`'s reservation of `seat`. The seat goes straight to the
    /// top waiter if there is one, otherwise back to the pool.
    pub fn cancel(&mut self, seat: SeatId, user: UserId) -> Result<Cancellation, EngineError> {
        if self.directory.get(user) != Some(seat) {
            return Err(EngineError::NoSuchReservation { seat, user });
        }

        self.directory.remove(user);
        let reassigned_to = match self.pass_to_next_waiter(seat) {
            Some(next) => Some(next.user),
            None => {
                self.pool.give(seat);
                None
            }
        };
        info!(user, seat, ?reassigned_to, "reservation cancelled");
        Ok(Cancellation { user, seat, reassigned_to })
    }

    /// Create `count` seats above the current ceiling, then drain the
    /// waitlist onto free seats one waiter at a time in service order.
    pub fn add_seats(&mut self, count: u32) -> Result<SeatsAdded, EngineError> {
        if count == 0 {
            return Err(EngineError::InvalidCount(count));
        }
        match self.pool.ceiling().checked_add(count) {
            Some(ceiling) if ceiling <= MAX_TOTAL_SEATS => {}
            _ => return Err(EngineError::LimitExceeded("too many seats")),
        }

        let seats = self.pool.add_range(count);
        let mut assignments = Vec::new();
        while !self.pool.is_empty() && !self.waitlist.is_empty() {
            let (Some(next), Some(seat)) = (self.waitlist.pop_highest(), self.pool.take_min()) else {
                break;
            };
            assignments.push(self.seat_user(next.user, seat));
        }
        info!(
            count,
            first = *seats.start(),
            last = *seats.end(),
            drained = assignments.len(),
            "seats added"
        );
        Ok(SeatsAdded { count, seats, assignments })
    }

    /// Drop `user` from the waitlist.
    pub fn exit_waitlist(&mut self, user: UserId) -> Result<Waiter, EngineError> {
        let waiter = self
            .waitlist
            .remove(user)
            .ok_or(EngineError::NotWaitlisted(user))?;
        debug!(user, "user left waitlist");
        Ok(waiter)
    }

    /// Change a waiting user's priority, keeping its arrival order.
    /// Seat holders have no tracked priority and are reported as not waiting.
    pub fn update_priority(&mut self, user: UserId, priority: Priority) -> Result<(), EngineError> {
        if !self.waitlist.update_priority(user, priority) {
            return Err(EngineError::NotWaitlisted(user));
        }
        debug!(user, priority, "waitlist priority updated");
        Ok(())
    }

    /// Release every user with id in `low..=high`.
    ///
    /// Holders give up their seats and waiters leave the waitlist. The freed
    /// seats, smallest first, then go to the remaining waiters in service
    /// order; whatever is left over returns to the pool.
    pub fn release_range(&mut self, low: UserId, high: UserId) -> Result<Release, EngineError> {
        let holders = self.directory.range(low..=high);
        let waiters = self.waitlist.users_in(low..=high);
        if holders.is_empty() && waiters.is_empty() {
            return Err(EngineError::NothingInRange { low, high });
        }

        let mut released = Vec::with_capacity(holders.len());
        for a in &holders {
            self.directory.remove(a.user);
            released.push(a.seat);
        }
        for &user in &waiters {
            self.waitlist.remove(user);
        }
        released.sort_unstable();

        let mut assignments = Vec::new();
        let mut returned_to_pool = Vec::new();
        for &seat in &released {
            match self.pass_to_next_waiter(seat) {
                Some(a) => assignments.push(a),
                None => {
                    self.pool.give(seat);
                    returned_to_pool.push(seat);
                }
            }
        }

        info!(
            low,
            high,
            released = released.len(),
            removed_waiters = waiters.len(),
            reassigned = assignments.len(),
            "range released"
        );
        Ok(Release {
            low,
            high,
            released,
            removed_waiters: waiters,
            assignments,
            returned_to_pool,
        })
    }
}
