use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use sha2::{Digest, Sha256};

/// Default request ceiling per window.
pub const DEFAULT_MAX_REQUESTS: u32 = 100;
/// Default window length.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

/// Derive a rate-limit key from a caller's network address: one-way hash,
/// truncated. Raw addresses are never stored or logged.
pub fn client_id(address: &str) -> String {
    let digest = hex::encode(Sha256::digest(address.as_bytes()));
    digest[..16].to_string()
}

#[derive(Debug, Clone, Copy)]
struct WindowEntry {
    count: u32,
    window_start: Instant,
}

/// Fixed-window request counter keyed by hashed client id.
///
/// The check-then-increment sequence holds the map lock for its whole
/// duration, so overlapping requests cannot jointly exceed the ceiling.
/// Windows reset by clock comparison on the next request; there is no timer
/// task, and nothing persists across restarts.
#[derive(Debug)]
pub struct FixedWindowLimiter {
    entries: Mutex<HashMap<String, WindowEntry>>,
    max_requests: u32,
    window: Duration,
}

impl Default for FixedWindowLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW)
    }
}

impl FixedWindowLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            max_requests,
            window,
        }
    }

    /// Record a request for `id` and return whether it is admitted.
    pub fn check_and_record(&self, id: &str) -> bool {
        self.check_and_record_at(id, Instant::now())
    }

    /// Clock-injected variant so tests drive window rollover deterministically.
    pub fn check_and_record_at(&self, id: &str, now: Instant) -> bool {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let entry = entries.entry(id.to_string()).or_insert(WindowEntry {
            count: 0,
            window_start: now,
        });

        if now.duration_since(entry.window_start) >= self.window {
            entry.count = 0;
            entry.window_start = now;
        }

        if entry.count >= self.max_requests {
            return false;
        }

        entry.count += 1;
        true
    }
}
