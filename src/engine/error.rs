use crate::model::{SeatId, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// `cancel` named a (seat, user) pair that is not a current reservation.
    NoSuchReservation { seat: SeatId, user: UserId },
    /// The user is not on the waitlist.
    NotWaitlisted(UserId),
    /// `release_range` found no holder or waiter in the range.
    NothingInRange { low: UserId, high: UserId },
    AlreadyReserved { user: UserId, seat: SeatId },
    AlreadyWaitlisted(UserId),
    InvalidCount(u32),
    LimitExceeded(&'static str),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::NoSuchReservation { seat, user } => {
                write!(f, "user {user} has no reservation for seat {seat}")
            }
            EngineError::NotWaitlisted(user) => write!(f, "user {user} is not in the waitlist"),
            EngineError::NothingInRange { low, high } => {
                write!(f, "no reservations found for users in [{low}, {high}]")
            }
            EngineError::AlreadyReserved { user, seat } => {
                write!(f, "user {user} already holds seat {seat}")
            }
            EngineError::AlreadyWaitlisted(user) => {
                write!(f, "user {user} is already in the waitlist")
            }
            EngineError::InvalidCount(n) => write!(f, "seat count must be positive, got {n}"),
            EngineError::LimitExceeded(msg) => write!(f, "limit exceeded: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}
