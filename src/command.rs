use crate::limits::MAX_LINE_LEN;
use crate::model::*;

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Initialize { seats: u32 },
    Available,
    Reserve { user: UserId, priority: Priority },
    /// Seat as written; numbers no seat can carry simply match no reservation.
    Cancel { seat: i64, user: UserId },
    ExitWaitlist { user: UserId },
    UpdatePriority { user: UserId, priority: Priority },
    AddSeats { count: u32 },
    PrintReservations,
    ReleaseSeats { low: UserId, high: UserId },
    Quit,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Initialize { .. } => "Initialize",
            Command::Available => "Available",
            Command::Reserve { .. } => "Reserve",
            Command::Cancel { .. } => "Cancel",
            Command::ExitWaitlist { .. } => "ExitWaitlist",
            Command::UpdatePriority { .. } => "UpdatePriority",
            Command::AddSeats { .. } => "AddSeats",
            Command::PrintReservations => "PrintReservations",
            Command::ReleaseSeats { .. } => "ReleaseSeats",
            Command::Quit => "Quit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    UnknownCommand(String),
    WrongArity(&'static str, usize, usize),
    BadArgument { command: &'static str, arg: String },
    LineTooLong(usize),
}

impl CommandError {
    /// The command the error belongs to, when it got far enough to know.
    pub fn command(&self) -> Option<&str> {
        match self {
            CommandError::UnknownCommand(name) => Some(name.as_str()),
            CommandError::WrongArity(name, ..) => Some(*name),
            CommandError::BadArgument { command, .. } => Some(*command),
            CommandError::LineTooLong(_) => None,
        }
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::UnknownCommand(name) => write!(f, "unknown command: {name}"),
            CommandError::WrongArity(name, expected, got) => {
                write!(f, "{name}: expected {expected} arguments, got {got}")
            }
            CommandError::BadArgument { command, arg } => {
                write!(f, "{command}: invalid argument {arg:?}")
            }
            CommandError::LineTooLong(len) => {
                write!(f, "line of {len} bytes exceeds {MAX_LINE_LEN}")
            }
        }
    }
}

impl std::error::Error for CommandError {}

/// Parse one line such as `Reserve(3, 2)`.
///
/// Tokens are separated by any run of parentheses, commas and whitespace, so
/// `Reserve 3 2` and `Reserve(3,2)` parse the same. Returns `Ok(None)` for
/// blank lines and `#` comments.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    if line.len() > MAX_LINE_LEN {
        return Err(CommandError::LineTooLong(line.len()));
    }
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let mut tokens = trimmed
        .split(|c: char| matches!(c, '(' | ')' | ',') || c.is_whitespace())
        .filter(|t| !t.is_empty());
    let Some(name) = tokens.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = tokens.collect();

    let cmd = match name {
        "Initialize" => {
            let [seats] = arity::<1>("Initialize", &args)?;
            Command::Initialize { seats: positive("Initialize", seats)? }
        }
        "Available" => {
            arity::<0>("Available", &args)?;
            Command::Available
        }
        "Reserve" => {
            let [user, priority] = arity::<2>("Reserve", &args)?;
            Command::Reserve {
                user: int("Reserve", user)?,
                priority: int("Reserve", priority)?,
            }
        }
        "Cancel" => {
            let [seat, user] = arity::<2>("Cancel", &args)?;
            Command::Cancel {
                seat: int("Cancel", seat)?,
                user: int("Cancel", user)?,
            }
        }
        "ExitWaitlist" => {
            let [user] = arity::<1>("ExitWaitlist", &args)?;
            Command::ExitWaitlist { user: int("ExitWaitlist", user)? }
        }
        "UpdatePriority" => {
            let [user, priority] = arity::<2>("UpdatePriority", &args)?;
            Command::UpdatePriority {
                user: int("UpdatePriority", user)?,
                priority: int("UpdatePriority", priority)?,
            }
        }
        "AddSeats" => {
            let [count] = arity::<1>("AddSeats", &args)?;
            Command::AddSeats { count: positive("AddSeats", count)? }
        }
        "PrintReservations" => {
            arity::<0>("PrintReservations", &args)?;
            Command::PrintReservations
        }
        "ReleaseSeats" => {
            let [low, high] = arity::<2>("ReleaseSeats", &args)?;
            Command::ReleaseSeats {
                low: int("ReleaseSeats", low)?,
                high: int("ReleaseSeats", high)?,
            }
        }
        // Trailing tokens after Quit are ignored; processing stops anyway.
        "Quit" => Command::Quit,
        other => return Err(CommandError::UnknownCommand(other.to_string())),
    };
    Ok(Some(cmd))
}

fn arity<'a, const N: usize>(
    command: &'static str,
    args: &[&'a str],
) -> Result<[&'a str; N], CommandError> {
    <[&str; N]>::try_from(args).map_err(|_| CommandError::WrongArity(command, N, args.len()))
}

fn int<T: std::str::FromStr>(command: &'static str, arg: &str) -> Result<T, CommandError> {
    arg.parse().map_err(|_| CommandError::BadArgument {
        command,
        arg: arg.to_string(),
    })
}

fn positive(command: &'static str, arg: &str) -> Result<u32, CommandError> {
    match int::<u32>(command, arg)? {
        0 => Err(CommandError::BadArgument {
            command,
            arg: arg.to_string(),
        }),
        n => Ok(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        parse_command(line).unwrap().unwrap()
    }

    #[test]
    fn parse_reference_syntax() {
        assert_eq!(parse("Initialize(5)"), Command::Initialize { seats: 5 });
        assert_eq!(parse("Available()"), Command::Available);
        assert_eq!(parse("Reserve(1, 1)"), Command::Reserve { user: 1, priority: 1 });
        assert_eq!(parse("Cancel(3, 7)"), Command::Cancel { seat: 3, user: 7 });
        assert_eq!(parse("ExitWaitlist(4)"), Command::ExitWaitlist { user: 4 });
        assert_eq!(
            parse("UpdatePriority(4, 9)"),
            Command::UpdatePriority { user: 4, priority: 9 }
        );
        assert_eq!(parse("AddSeats(2)"), Command::AddSeats { count: 2 });
        assert_eq!(parse("PrintReservations()"), Command::PrintReservations);
        assert_eq!(parse("ReleaseSeats(2, 5)"), Command::ReleaseSeats { low: 2, high: 5 });
        assert_eq!(parse("Quit()"), Command::Quit);
    }

    #[test]
    fn parse_tolerates_loose_separators() {
        assert_eq!(parse("  Reserve 3 2  "), Command::Reserve { user: 3, priority: 2 });
        assert_eq!(parse("Reserve(3,2)"), Command::Reserve { user: 3, priority: 2 });
        assert_eq!(parse("Reserve( 3 ,\t-2 )"), Command::Reserve { user: 3, priority: -2 });
    }

    #[test]
    fn parse_negative_priority() {
        assert_eq!(parse("Reserve(3, -2)"), Command::Reserve { user: 3, priority: -2 });
    }

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        assert_eq!(parse_command("").unwrap(), None);
        assert_eq!(parse_command("   ").unwrap(), None);
        assert_eq!(parse_command("# setup").unwrap(), None);
        assert_eq!(parse_command("()").unwrap(), None);
    }

    #[test]
    fn unknown_command() {
        let err = parse_command("Book(1)").unwrap_err();
        assert_eq!(err, CommandError::UnknownCommand("Book".into()));
        assert_eq!(err.command(), Some("Book"));
    }

    #[test]
    fn wrong_arity() {
        let err = parse_command("Reserve(1)").unwrap_err();
        assert_eq!(err, CommandError::WrongArity("Reserve", 2, 1));
        assert!(matches!(
            parse_command("Available(1)"),
            Err(CommandError::WrongArity("Available", 0, 1))
        ));
    }

    #[test]
    fn non_numeric_argument() {
        let err = parse_command("Cancel(a, 1)").unwrap_err();
        assert_eq!(
            err,
            CommandError::BadArgument { command: "Cancel", arg: "a".into() }
        );
    }

    #[test]
    fn seat_counts_must_be_positive() {
        assert!(matches!(
            parse_command("Initialize(0)"),
            Err(CommandError::BadArgument { command: "Initialize", .. })
        ));
        assert!(matches!(
            parse_command("AddSeats(-1)"),
            Err(CommandError::BadArgument { command: "AddSeats", .. })
        ));
    }

    #[test]
    fn cancel_keeps_out_of_range_seats() {
        assert_eq!(parse("Cancel(-1, 1)"), Command::Cancel { seat: -1, user: 1 });
        assert_eq!(
            parse("Cancel(4294967296, 1)"),
            Command::Cancel { seat: 4_294_967_296, user: 1 }
        );
        assert!(matches!(
            parse_command("Cancel(1.5, 1)"),
            Err(CommandError::BadArgument { command: "Cancel", .. })
        ));
    }

    #[test]
    fn overlong_line_rejected() {
        let line = format!("Reserve({}, 1)", "1".repeat(MAX_LINE_LEN));
        assert!(matches!(parse_command(&line), Err(CommandError::LineTooLong(_))));
    }
}
