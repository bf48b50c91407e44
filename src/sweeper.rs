use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::interval;
use tracing::{debug, info};

use crate::cache::CacheEntry;
use crate::metrics::CACHE_SIZE;
use crate::rate_limit::RateWindow;

// Periodic cleanup task - runs only when --sweep-interval > 0. Lazy expiry
// keeps both maps correct on its own; sweeping reclaims memory under
// sustained unique-key or many-client load.
pub async fn cleanup_sweeper(
    cache: Arc<DashMap<String, CacheEntry>>,
    ttl: Duration,
    limiter: Arc<DashMap<String, RateWindow>>,
    idle_after: Duration,
    sweep_interval: Duration,
) {
    let mut interval = interval(sweep_interval);
    info!("cleanup sweeper started (interval: {:?})", sweep_interval);

    loop {
        interval.tick().await;

        let (expired, idle) = sweep(&cache, ttl, &limiter, idle_after, Instant::now());
        CACHE_SIZE.set(cache.len() as f64);
        if expired > 0 || idle > 0 {
            debug!(expired, idle, "sweep removed entries");
        }
    }
}

// One pass: drop expired cache entries, and limiter clients whose newest
// timestamp is older than idle_after.
pub fn sweep(
    cache: &DashMap<String, CacheEntry>,
    ttl: Duration,
    limiter: &DashMap<String, RateWindow>,
    idle_after: Duration,
    now: Instant,
) -> (usize, usize) {
    let cache_before = cache.len();
    cache.retain(|_, entry| now.duration_since(entry.created_at) <= ttl);

    let limiter_before = limiter.len();
    limiter.retain(|_, window| {
        window
            .timestamps
            .last()
            .is_some_and(|t| now.duration_since(*t) <= idle_after)
    });

    (
        cache_before - cache.len(),
        limiter_before - limiter.len(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_drops_expired_entries_and_keeps_fresh_ones() {
        let cache = DashMap::new();
        let limiter = DashMap::new();
        let ttl = Duration::from_secs(600);
        let base = Instant::now();

        cache.insert(
            "fresh".to_string(),
            CacheEntry {
                response: "a".to_string(),
                created_at: base + Duration::from_secs(700),
            },
        );
        cache.insert(
            "stale".to_string(),
            CacheEntry {
                response: "b".to_string(),
                created_at: base,
            },
        );

        let now = base + Duration::from_secs(701);
        let (expired, idle) = sweep(&cache, ttl, &limiter, Duration::from_secs(300), now);
        assert_eq!((expired, idle), (1, 0));
        assert!(cache.contains_key("fresh"));
        assert!(!cache.contains_key("stale"));
    }

    #[test]
    fn sweep_evicts_idle_clients_only() {
        let cache = DashMap::new();
        let limiter = DashMap::new();
        let idle_after = Duration::from_secs(300);
        let base = Instant::now();

        limiter.insert(
            "idle".to_string(),
            RateWindow {
                timestamps: vec![base],
            },
        );
        limiter.insert(
            "active".to_string(),
            RateWindow {
                timestamps: vec![base, base + Duration::from_secs(301)],
            },
        );
        // a client record with no surviving timestamps is also gone
        limiter.insert(
            "empty".to_string(),
            RateWindow { timestamps: vec![] },
        );

        let now = base + Duration::from_secs(301);
        let (expired, idle) = sweep(&cache, Duration::from_secs(600), &limiter, idle_after, now);
        assert_eq!((expired, idle), (0, 2));
        assert!(limiter.contains_key("active"));
        assert!(!limiter.contains_key("idle"));
        assert!(!limiter.contains_key("empty"));
    }
}
