use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::cache::{self, CacheEntry};
use crate::metrics::{CACHE_HITS, CACHE_MISSES, CACHE_SIZE};
use crate::models::{GenerateResponse, QueuedRequest};
use crate::upstream;

// Background worker -> drains the queue one request at a time, so the
// upstream call never runs while a map guard is held.
pub async fn request_worker(
    mut rx: mpsc::Receiver<QueuedRequest>,
    client: reqwest::Client,
    api_url: String,
    api_token: String,
    cache: Arc<DashMap<String, CacheEntry>>,
    ttl: Duration,
) {
    info!("request worker started");

    while let Some(queued) = rx.recv().await {
        let cache_key = cache::make_cache_key(&queued.model, &queued.prompt);

        // check cache first
        if let Some(response) = cache::lookup(&cache, &cache_key, ttl) {
            CACHE_HITS.inc();
            debug!(model = %queued.model, "cache hit");
            let _ = queued.response_tx.send(Ok(GenerateResponse {
                model: queued.model,
                response,
                cached: true,
            }));
            continue;
        }
        CACHE_MISSES.inc();
        debug!(model = %queued.model, "cache miss, calling upstream");

        let result = upstream::chat_completion(
            &client,
            &api_url,
            &api_token,
            &queued.model,
            queued.system.as_deref(),
            &queued.prompt,
        )
        .await;

        let response = match result {
            Ok(text) => {
                // only successful bodies land in the cache
                cache::insert(&cache, cache_key, text.clone());
                CACHE_SIZE.set(cache.len() as f64);
                Ok(GenerateResponse {
                    model: queued.model,
                    response: text,
                    cached: false,
                })
            }
            Err(e) => {
                warn!(error = %e, "upstream call failed");
                Err(e)
            }
        };
        // receiver may have hung up; nothing to do about it
        let _ = queued.response_tx.send(response);
    }
}
