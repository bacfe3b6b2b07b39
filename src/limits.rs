/// Upper bound on seats ever created by one engine (Initialize + AddSeats).
pub const MAX_TOTAL_SEATS: u32 = 10_000_000;

/// Longest command line the session will parse.
pub const MAX_LINE_LEN: usize = 1024;
