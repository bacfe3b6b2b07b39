use std::net::SocketAddr;

use crate::command::Command;
use crate::model::Availability;

// ── RED metrics (command-driven) ────────────────────────────────

/// Counter: total commands executed. Labels: command, status.
pub const COMMANDS_TOTAL: &str = "seatq_commands_total";

/// Histogram: command latency in seconds. Labels: command.
pub const COMMAND_DURATION_SECONDS: &str = "seatq_command_duration_seconds";

/// Counter: lines that failed to parse.
pub const PARSE_FAILURES_TOTAL: &str = "seatq_parse_failures_total";

// ── USE metrics (engine utilization) ────────────────────────────

/// Gauge: seats currently free.
pub const SEATS_FREE: &str = "seatq_seats_free";

/// Gauge: users currently waiting.
pub const WAITLIST_LENGTH: &str = "seatq_waitlist_length";

/// Gauge: seats ever created.
pub const SEATS_TOTAL: &str = "seatq_seats_total";

/// Install Prometheus metrics exporter on the given port. No-op if port is None.
pub fn init(port: Option<u16>) {
    let Some(port) = port else { return };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .expect("failed to install Prometheus metrics exporter");
    tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
}

/// Map a Command variant to a short label for metrics.
pub fn command_label(cmd: &Command) -> &'static str {
    match cmd {
        Command::Initialize { .. } => "initialize",
        Command::Available => "available",
        Command::Reserve { .. } => "reserve",
        Command::Cancel { .. } => "cancel",
        Command::ExitWaitlist { .. } => "exit_waitlist",
        Command::UpdatePriority { .. } => "update_priority",
        Command::AddSeats { .. } => "add_seats",
        Command::PrintReservations => "print_reservations",
        Command::ReleaseSeats { .. } => "release_seats",
        Command::Quit => "quit",
    }
}

/// Publish engine occupancy gauges.
pub fn record_occupancy(available: Availability, total_seats: u32) {
    metrics::gauge!(SEATS_FREE).set(available.free_seats as f64);
    metrics::gauge!(WAITLIST_LENGTH).set(available.waitlist as f64);
    metrics::gauge!(SEATS_TOTAL).set(total_seats as f64);
}
