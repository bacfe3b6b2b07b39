mod directory;
mod error;
mod mutations;
mod queries;
mod seat_pool;
mod waitlist;

pub use error::EngineError;

use directory::Directory;
use seat_pool::SeatPool;
use tracing::debug;
use waitlist::Waitlist;

use crate::limits::MAX_TOTAL_SEATS;
use crate::model::*;

/// Seat-allocation engine: free pool, user → seat directory and waitlist,
/// kept consistent across every operation.
///
/// All operations are synchronous and take `&mut self`. Each one checks its
/// preconditions before touching any structure, so an `Err` never leaves
/// partial state behind.
#[derive(Debug, Clone)]
pub struct Engine {
    pool: SeatPool,
    directory: Directory,
    waitlist: Waitlist,
    /// Next arrival stamp handed to a user joining the waitlist.
    next_arrival: ArrivalOrder,
}

impl Engine {
    /// Build an engine with seats `1..=seat_count`, all free.
    pub fn new(seat_count: u32) -> Result<Self, EngineError> {
        if seat_count == 0 {
            return Err(EngineError::InvalidCount(seat_count));
        }
        if seat_count > MAX_TOTAL_SEATS {
            return Err(EngineError::LimitExceeded("too many seats"));
        }
        let mut pool = SeatPool::new();
        pool.add_range(seat_count);
        debug!(seat_count, "engine initialized");
        Ok(Self {
            pool,
            directory: Directory::new(),
            waitlist: Waitlist::new(),
            next_arrival: 0,
        })
    }

    /// Stamp the next arrival order. Strictly increasing for the engine's lifetime.
    fn stamp_arrival(&mut self) -> ArrivalOrder {
        let arrival = self.next_arrival;
        self.next_arrival += 1;
        arrival
    }

    /// Seat a user that is neither holding nor waiting.
    fn seat_user(&mut self, user: UserId, seat: SeatId) -> Assignment {
        let prev = self.directory.put(user, seat);
        debug_assert!(prev.is_none(), "user {user} already held seat {prev:?}");
        debug!(user, seat, "seat assigned");
        Assignment::new(user, seat)
    }

    /// Hand `seat` to the top waiter, if any. The seat never touches the pool.
    fn pass_to_next_waiter(&mut self, seat: SeatId) -> Option<Assignment> {
        let next = self.waitlist.pop_highest()?;
        Some(self.seat_user(next.user, seat))
    }
}
