use dashmap::DashMap;
use sha2::{Digest, Sha256};
use std::time::{Duration, Instant};

// Cache entry with timestamp
#[derive(Clone)]
pub struct CacheEntry {
    pub response: String,
    pub created_at: Instant,
}

// Create a cache key (hash of model + trimmed prompt).
// Fields are length-prefixed so ("ab","c") and ("a","bc") cannot collide.
pub fn make_cache_key(model: &str, prompt: &str) -> String {
    let prompt = prompt.trim();
    let mut hasher = Sha256::new();
    hasher.update((model.len() as u64).to_le_bytes());
    hasher.update(model.as_bytes());
    hasher.update((prompt.len() as u64).to_le_bytes());
    hasher.update(prompt.as_bytes());
    format!("{:x}", hasher.finalize())
}

// An entry is live while `now - created_at <= ttl`, expired strictly after.
// A stale entry found here is removed instead of lingering until restart.
pub fn lookup(cache: &DashMap<String, CacheEntry>, key: &str, ttl: Duration) -> Option<String> {
    lookup_at(cache, key, ttl, Instant::now())
}

fn lookup_at(
    cache: &DashMap<String, CacheEntry>,
    key: &str,
    ttl: Duration,
    now: Instant,
) -> Option<String> {
    // the shard guard must drop before remove() or dashmap deadlocks
    {
        let entry = cache.get(key)?;
        if now.duration_since(entry.created_at) <= ttl {
            return Some(entry.response.clone());
        }
    }
    cache.remove(key);
    None
}

pub fn insert(cache: &DashMap<String, CacheEntry>, key: String, response: String) {
    cache.insert(
        key,
        CacheEntry {
            response,
            created_at: Instant::now(),
        },
    );
}
