use std::fmt;

use serde::Serialize;

use crate::config::OutputFormat;
use crate::model::*;

/// The result descriptor for one command. Exactly one reply is produced per
/// command; multi-line text replies bundle a header and assignment lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reply {
    Initialized { seats: u32 },
    Available { free_seats: usize, waitlist: usize },
    Reserved { user: UserId, seat: SeatId },
    Waitlisted { user: UserId, priority: Priority },
    AlreadyReserved { user: UserId, seat: SeatId },
    AlreadyWaitlisted { user: UserId },
    Cancelled { user: UserId, seat: SeatId, reassigned_to: Option<UserId> },
    NoSuchReservation { user: UserId, seat: i64 },
    LeftWaitlist { user: UserId },
    NotWaitlisted { user: UserId },
    PriorityUpdated { user: UserId, priority: Priority },
    PriorityNotUpdated { user: UserId },
    SeatsAdded { count: u32, assignments: Vec<Assignment> },
    Reservations { reservations: Vec<Assignment> },
    Released { low: UserId, high: UserId, assignments: Vec<Assignment> },
    NothingInRange { low: UserId, high: UserId },
    Terminated,
    UnknownCommand { name: String },
    InvalidCommand { message: String },
    NotInitialized,
    Failed { message: String },
}

impl Reply {
    /// Short label for metrics: "ok", "declined" for operations the engine
    /// refused without changing state, "error" for adapter-level problems.
    pub fn status(&self) -> &'static str {
        match self {
            Reply::NoSuchReservation { .. }
            | Reply::NotWaitlisted { .. }
            | Reply::PriorityNotUpdated { .. }
            | Reply::NothingInRange { .. }
            | Reply::AlreadyReserved { .. }
            | Reply::AlreadyWaitlisted { .. } => "declined",
            Reply::UnknownCommand { .. }
            | Reply::InvalidCommand { .. }
            | Reply::NotInitialized
            | Reply::Failed { .. } => "error",
            _ => "ok",
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String, serde_json::Error> {
        match format {
            OutputFormat::Text => Ok(self.to_string()),
            OutputFormat::Json => serde_json::to_string(self),
        }
    }
}

impl From<Reservation> for Reply {
    fn from(r: Reservation) -> Self {
        match r {
            Reservation::Assigned { user, seat } => Reply::Reserved { user, seat },
            Reservation::Waitlisted { user, priority } => Reply::Waitlisted { user, priority },
        }
    }
}

impl From<Availability> for Reply {
    fn from(a: Availability) -> Self {
        Reply::Available {
            free_seats: a.free_seats,
            waitlist: a.waitlist,
        }
    }
}

fn write_assignments(f: &mut fmt::Formatter<'_>, assignments: &[Assignment]) -> fmt::Result {
    for a in assignments {
        write!(f, "\nUser {} reserved seat {}", a.user, a.seat)?;
    }
    Ok(())
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Initialized { seats } => write!(f, "Initialized with {seats} seats."),
            Reply::Available { free_seats, waitlist } => {
                write!(f, "Total Seats Available : {free_seats}, Waitlist : {waitlist}")
            }
            Reply::Reserved { user, seat } => write!(f, "User {user} reserved seat {seat}"),
            Reply::Waitlisted { user, .. } => write!(f, "User {user} is added to the waiting list"),
            Reply::AlreadyReserved { user, seat } => {
                write!(f, "User {user} already holds seat {seat}")
            }
            Reply::AlreadyWaitlisted { user } => {
                write!(f, "User {user} is already in the waiting list")
            }
            Reply::Cancelled { user, seat, reassigned_to } => {
                write!(f, "User {user} canceled their reservation.")?;
                if let Some(next) = reassigned_to {
                    write!(f, "\nUser {next} reserved seat {seat}")?;
                }
                Ok(())
            }
            Reply::NoSuchReservation { user, seat } => {
                write!(f, "User {user} has no reservation for seat {seat} to cancel.")
            }
            Reply::LeftWaitlist { user } => {
                write!(f, "User {user} is removed from the waiting list")
            }
            Reply::NotWaitlisted { user } => write!(f, "User {user} is not in waitlist"),
            Reply::PriorityUpdated { user, priority } => {
                write!(f, "User {user} priority has been updated to {priority}")
            }
            Reply::PriorityNotUpdated { user } => write!(f, "User {user} priority is not updated"),
            Reply::SeatsAdded { count, assignments } => {
                write!(f, "Additional {count} Seats are made available for reservation")?;
                write_assignments(f, assignments)
            }
            Reply::Reservations { reservations } => {
                if reservations.is_empty() {
                    return write!(f, "No reservations");
                }
                for (i, a) in reservations.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "Seat {}, User {}", a.seat, a.user)?;
                }
                Ok(())
            }
            Reply::Released { low, high, assignments } => {
                write!(f, "Reservations of the Users in the range [{low}, {high}] are released")?;
                write_assignments(f, assignments)
            }
            Reply::NothingInRange { low, high } => {
                write!(f, "No reservations found for the Users in the range [{low}, {high}].")
            }
            Reply::Terminated => write!(f, "Program Terminated!!"),
            Reply::UnknownCommand { name } => write!(f, "Unknown command: {name}"),
            Reply::InvalidCommand { message } => write!(f, "Invalid command {message}"),
            Reply::NotInitialized => write!(f, "System is not initialized"),
            Reply::Failed { message } => write!(f, "{message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_with_reassignment_is_two_lines() {
        let r = Reply::Cancelled { user: 1, seat: 1, reassigned_to: Some(3) };
        assert_eq!(
            r.to_string(),
            "User 1 canceled their reservation.\nUser 3 reserved seat 1"
        );
    }

    #[test]
    fn seats_added_lists_each_drained_user() {
        let r = Reply::SeatsAdded {
            count: 2,
            assignments: vec![Assignment::new(11, 2), Assignment::new(12, 3)],
        };
        assert_eq!(
            r.to_string(),
            "Additional 2 Seats are made available for reservation\n\
             User 11 reserved seat 2\n\
             User 12 reserved seat 3"
        );
    }

    #[test]
    fn reservations_one_line_per_seat() {
        let r = Reply::Reservations {
            reservations: vec![Assignment::new(40, 1), Assignment::new(10, 2)],
        };
        assert_eq!(r.to_string(), "Seat 1, User 40\nSeat 2, User 10");
        let empty = Reply::Reservations { reservations: vec![] };
        assert_eq!(empty.to_string(), "No reservations");
    }

    #[test]
    fn released_header_then_assignments() {
        let r = Reply::Released { low: 1, high: 2, assignments: vec![] };
        assert_eq!(r.to_string(), "Reservations of the Users in the range [1, 2] are released");
    }

    #[test]
    fn json_is_tagged_by_kind() {
        let r = Reply::Reserved { user: 4, seat: 2 };
        assert_eq!(
            r.render(OutputFormat::Json).unwrap(),
            r#"{"kind":"reserved","user":4,"seat":2}"#
        );
        assert_eq!(
            Reply::Terminated.render(OutputFormat::Json).unwrap(),
            r#"{"kind":"terminated"}"#
        );
    }

    #[test]
    fn status_labels() {
        assert_eq!(Reply::Terminated.status(), "ok");
        assert_eq!(Reply::NotWaitlisted { user: 1 }.status(), "declined");
        assert_eq!(Reply::NotInitialized.status(), "error");
    }
}
