use std::io;
use std::time::Instant;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::command::{self, Command, CommandError};
use crate::config::OutputFormat;
use crate::engine::{Engine, EngineError};
use crate::model::{SeatId, UserId};
use crate::observability::{self, command_label};
use crate::reply::Reply;

/// What a finished `run` did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Replies written, one per command.
    pub replies: usize,
    /// Whether processing stopped at `Quit` rather than end of input.
    pub terminated: bool,
}

/// Drives one engine from a stream of command lines.
///
/// The engine does not exist until the first `Initialize`; a later
/// `Initialize` replaces it with a fresh one.
#[derive(Debug, Default)]
pub struct Session {
    engine: Option<Engine>,
    format: OutputFormat,
}

impl Session {
    pub fn new(format: OutputFormat) -> Self {
        Self { engine: None, format }
    }

    pub fn engine(&self) -> Option<&Engine> {
        self.engine.as_ref()
    }

    /// Read commands until `Quit` or end of input, writing one reply per
    /// command. Blank and comment lines produce nothing.
    ///
    /// The writer is flushed on every exit, including I/O errors, so replies
    /// written before a failure are not lost.
    pub async fn run<R, W>(&mut self, reader: R, writer: &mut W) -> io::Result<SessionSummary>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let result = self.process(reader, writer).await;
        let flushed = writer.flush().await;
        let summary = result?;
        flushed?;
        Ok(summary)
    }

    async fn process<R, W>(&mut self, mut reader: R, writer: &mut W) -> io::Result<SessionSummary>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut summary = SessionSummary::default();
        let mut line_no = 0usize;
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }
            line_no += 1;
            // Undecodable bytes become U+FFFD and fail to parse like any other bad argument.
            let line = String::from_utf8_lossy(&buf);
            let line = line.trim_end_matches(['\n', '\r']);
            let Some(reply) = self.handle_line(line) else {
                continue;
            };
            let rendered = reply.render(self.format).map_err(io::Error::other)?;
            writer.write_all(rendered.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            summary.replies += 1;

            if reply == Reply::Terminated {
                info!(line_no, "quit received, stopping");
                summary.terminated = true;
                break;
            }
        }
        Ok(summary)
    }

    /// Parse and execute one line. `None` for lines that carry no command.
    pub fn handle_line(&mut self, line: &str) -> Option<Reply> {
        let cmd = match command::parse_command(line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => return None,
            Err(e) => {
                warn!("rejected line {line:?}: {e}");
                metrics::counter!(observability::PARSE_FAILURES_TOTAL).increment(1);
                return Some(parse_error_reply(e));
            }
        };

        let label = command_label(&cmd);
        let start = Instant::now();
        let reply = self.execute(cmd);
        metrics::histogram!(observability::COMMAND_DURATION_SECONDS, "command" => label)
            .record(start.elapsed().as_secs_f64());
        metrics::counter!(observability::COMMANDS_TOTAL, "command" => label, "status" => reply.status())
            .increment(1);
        if let Some(engine) = &self.engine {
            observability::record_occupancy(engine.available(), engine.total_seats());
        }
        debug!(command = label, status = reply.status(), "command executed");
        Some(reply)
    }

    /// Run one command against the engine and describe the outcome.
    pub fn execute(&mut self, cmd: Command) -> Reply {
        match cmd {
            Command::Initialize { seats } => match Engine::new(seats) {
                Ok(engine) => {
                    if self.engine.is_some() {
                        info!(seats, "re-initializing, previous state discarded");
                    }
                    self.engine = Some(engine);
                    Reply::Initialized { seats }
                }
                Err(e) => failed(e),
            },
            Command::Quit => Reply::Terminated,
            cmd => match self.engine.as_mut() {
                Some(engine) => apply(engine, cmd),
                None => Reply::NotInitialized,
            },
        }
    }
}

fn apply(engine: &mut Engine, cmd: Command) -> Reply {
    match cmd {
        Command::Available => engine.available().into(),
        Command::Reserve { user, priority } => match engine.reserve(user, priority) {
            Ok(r) => r.into(),
            Err(EngineError::AlreadyReserved { user, seat }) => Reply::AlreadyReserved { user, seat },
            Err(EngineError::AlreadyWaitlisted(user)) => Reply::AlreadyWaitlisted { user },
            Err(e) => failed(e),
        },
        Command::Cancel { seat, user } => {
            let Ok(seat_id) = SeatId::try_from(seat) else {
                return Reply::NoSuchReservation { user, seat };
            };
            cancel(engine, seat_id, user)
        }
        Command::ExitWaitlist { user } => match engine.exit_waitlist(user) {
            Ok(_) => Reply::LeftWaitlist { user },
            Err(EngineError::NotWaitlisted(user)) => Reply::NotWaitlisted { user },
            Err(e) => failed(e),
        },
        Command::UpdatePriority { user, priority } => match engine.update_priority(user, priority) {
            Ok(()) => Reply::PriorityUpdated { user, priority },
            Err(EngineError::NotWaitlisted(user)) => Reply::PriorityNotUpdated { user },
            Err(e) => failed(e),
        },
        Command::AddSeats { count } => match engine.add_seats(count) {
            Ok(added) => Reply::SeatsAdded {
                count: added.count,
                assignments: added.assignments,
            },
            Err(e) => failed(e),
        },
        Command::PrintReservations => Reply::Reservations {
            reservations: engine.reservations(),
        },
        Command::ReleaseSeats { low, high } => match engine.release_range(low, high) {
            Ok(r) => Reply::Released {
                low: r.low,
                high: r.high,
                assignments: r.assignments,
            },
            Err(EngineError::NothingInRange { low, high }) => Reply::NothingInRange { low, high },
            Err(e) => failed(e),
        },
        Command::Initialize { .. } | Command::Quit => {
            unreachable!("handled before the engine is consulted")
        }
    }
}

fn cancel(engine: &mut Engine, seat: SeatId, user: UserId) -> Reply {
    match engine.cancel(seat, user) {
        Ok(c) => Reply::Cancelled {
            user: c.user,
            seat: c.seat,
            reassigned_to: c.reassigned_to,
        },
        Err(EngineError::NoSuchReservation { seat, user }) => Reply::NoSuchReservation {
            user,
            seat: seat.into(),
        },
        Err(e) => failed(e),
    }
}

fn failed(e: EngineError) -> Reply {
    warn!("command failed: {e}");
    Reply::Failed { message: e.to_string() }
}

fn parse_error_reply(e: CommandError) -> Reply {
    match e {
        CommandError::UnknownCommand(name) => Reply::UnknownCommand { name },
        other => Reply::InvalidCommand { message: other.to_string() },
    }
}
