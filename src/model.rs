use std::ops::RangeInclusive;

use serde::Serialize;

/// Externally supplied user identity.
pub type UserId = i64;

/// Waitlist priority. Higher is served first.
pub type Priority = i64;

/// Seat number. Seats are numbered contiguously from 1.
pub type SeatId = u32;

/// Logical timestamp stamped on a user when it joins the waitlist.
pub type ArrivalOrder = u64;

/// A user currently holding a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub user: UserId,
    pub seat: SeatId,
}

impl Assignment {
    pub fn new(user: UserId, seat: SeatId) -> Self {
        Self { user, seat }
    }
}

/// A user waiting for a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Waiter {
    pub user: UserId,
    pub priority: Priority,
    pub arrival: ArrivalOrder,
}

/// Outcome of a successful `reserve`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Reservation {
    /// A free seat was taken from the pool.
    Assigned { user: UserId, seat: SeatId },
    /// The pool was empty; the user joined the waitlist.
    Waitlisted { user: UserId, priority: Priority },
}

/// Outcome of a successful `cancel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cancellation {
    pub user: UserId,
    pub seat: SeatId,
    /// Waiter that took over the seat, if the waitlist was non-empty.
    pub reassigned_to: Option<UserId>,
}

/// Outcome of `add_seats`: the new seat numbers plus every waiter drained onto them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatsAdded {
    pub count: u32,
    pub seats: RangeInclusive<SeatId>,
    pub assignments: Vec<Assignment>,
}

/// Outcome of `release_range`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Release {
    pub low: UserId,
    pub high: UserId,
    /// Seats taken back from holders in the range, ascending.
    pub released: Vec<SeatId>,
    /// Waiters in the range that were dropped from the waitlist.
    pub removed_waiters: Vec<UserId>,
    /// Released seats handed straight to waiters outside the range.
    pub assignments: Vec<Assignment>,
    /// Released seats nobody was waiting for, now free.
    pub returned_to_pool: Vec<SeatId>,
}

/// Pool and waitlist sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Availability {
    pub free_seats: usize,
    pub waitlist: usize,
}
