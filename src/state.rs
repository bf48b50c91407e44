use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::cache::CacheEntry;
use crate::models::QueuedRequest;
use crate::rate_limit::RateWindow;

// App's shared state. Both maps are built once at startup and shared with
// the worker and the sweeper.
pub struct AppState {
    pub cache: Arc<DashMap<String, CacheEntry>>,
    pub ttl: Duration, // how long a cached response stays valid
    pub rate_limiter: Arc<DashMap<String, RateWindow>>,
    pub rate_limit: u32,       // max requests allowed per window
    pub rate_window: Duration, // duration of the sliding window
    pub model: String,         // default model when the request names none
    pub queue_tx: mpsc::Sender<QueuedRequest>,
}
