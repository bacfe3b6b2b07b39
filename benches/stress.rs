use std::time::{Duration, Instant};

use seatq::engine::Engine;

const SEATS: u32 = 50_000;
const USERS: i64 = 100_000;

fn percentile(sorted: &[Duration], p: f64) -> Duration {
    if sorted.is_empty() {
        return Duration::ZERO;
    }
    let idx = ((sorted.len() as f64) * p / 100.0) as usize;
    sorted[idx.min(sorted.len() - 1)]
}

fn print_latency(label: &str, latencies: &mut [Duration]) {
    if latencies.is_empty() {
        return;
    }
    latencies.sort();
    let total: Duration = latencies.iter().sum();
    let avg = total / latencies.len() as u32;
    println!("  {label}:");
    println!(
        "    n={}, avg={:.2}us, p50={:.2}us, p95={:.2}us, p99={:.2}us, max={:.2}us",
        latencies.len(),
        avg.as_secs_f64() * 1e6,
        percentile(latencies, 50.0).as_secs_f64() * 1e6,
        percentile(latencies, 95.0).as_secs_f64() * 1e6,
        percentile(latencies, 99.0).as_secs_f64() * 1e6,
        latencies[latencies.len() - 1].as_secs_f64() * 1e6,
    );
}

fn timed<T>(latencies: &mut Vec<Duration>, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let out = f();
    latencies.push(start.elapsed());
    out
}

fn main() {
    println!("seatq stress: {SEATS} seats, {USERS} users");
    let mut engine = Engine::new(SEATS).expect("initialize");

    // Phase 1: fill every seat, overflow onto the waitlist.
    let mut reserve = Vec::with_capacity(USERS as usize);
    for user in 0..USERS {
        let priority = user % 7;
        timed(&mut reserve, || engine.reserve(user, priority)).expect("reserve");
    }
    print_latency("reserve", &mut reserve);

    // Phase 2: cancel every other holder; each seat passes to a waiter.
    let mut cancel = Vec::new();
    for user in (0..SEATS as i64).step_by(2) {
        let Some(seat) = engine.seat_of(user) else { continue };
        timed(&mut cancel, || engine.cancel(seat, user)).expect("cancel");
    }
    print_latency("cancel", &mut cancel);

    // Phase 3: shuffle priorities of the remaining waiters.
    let mut update = Vec::new();
    let waiting: Vec<i64> = engine.waitlist().iter().map(|w| w.user).collect();
    for (i, user) in waiting.iter().enumerate() {
        let _ = timed(&mut update, || engine.update_priority(*user, (i % 11) as i64));
    }
    print_latency("update_priority", &mut update);

    // Phase 4: grow capacity in chunks, draining the waitlist.
    let mut add = Vec::new();
    let drain_start = Instant::now();
    while engine.available().waitlist > 0 {
        timed(&mut add, || engine.add_seats(1_000)).expect("add_seats");
    }
    print_latency("add_seats(1000)", &mut add);
    println!("  waitlist drained in {:.2}ms", drain_start.elapsed().as_secs_f64() * 1e3);

    // Phase 5: bulk release in windows of 1000 user ids.
    let mut release = Vec::new();
    for low in (0..USERS).step_by(1_000) {
        let _ = timed(&mut release, || engine.release_range(low, low + 999));
    }
    print_latency("release_range(1000)", &mut release);

    let a = engine.available();
    println!(
        "  final: {} free of {} seats, {} waiting",
        a.free_seats,
        engine.total_seats(),
        a.waitlist
    );
    if let Err(msg) = engine.check_invariants() {
        panic!("invariant violated after stress run: {msg}");
    }
}
