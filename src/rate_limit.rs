use dashmap::DashMap;
use std::time::{Duration, Instant};

// Per-client request history, newest last
#[derive(Default)]
pub struct RateWindow {
    pub timestamps: Vec<Instant>,
}

// Sliding-window admission check: prune the client's history to
// [now - window, now], then decide against the pruned count. The window
// slides with every check, so a burst straddling a wall-clock boundary is
// still bounded. A denied attempt is not recorded.
pub fn check_rate_limit(
    limiter: &DashMap<String, RateWindow>,
    client_id: &str,
    max_requests: u32,
    window: Duration,
) -> bool {
    check_rate_limit_at(limiter, client_id, max_requests, window, Instant::now())
}

// A timestamp still counts while `now - t <= window`, matching the cache's
// inclusive boundary. The entry guard covers the whole prune-then-append
// sequence, so concurrent checks for one client cannot interleave.
fn check_rate_limit_at(
    limiter: &DashMap<String, RateWindow>,
    client_id: &str,
    max_requests: u32,
    window: Duration,
    now: Instant,
) -> bool {
    let mut entry = limiter.entry(client_id.to_string()).or_default();
    entry.timestamps.retain(|t| now.duration_since(*t) <= window);

    if entry.timestamps.len() >= max_requests as usize {
        return false;
    }
    entry.timestamps.push(now);
    true
}
