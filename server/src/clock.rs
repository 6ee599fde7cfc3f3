//! Strictly monotonic millisecond clock for minting ids and timestamps.
//!
//! Todo ids are the decimal string of their creation instant, so two creates
//! landing on the same wall-clock millisecond would collide on the primary
//! key. The clock never issues the same value twice: each call returns
//! `max(now, last + 1)`.

use std::time::{SystemTime, UNIX_EPOCH};

/// Issues strictly increasing Unix-millisecond values.
#[derive(Debug, Default)]
pub struct MonotonicClock {
    last_ms: i64,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next timestamp: the current wall clock, bumped past any value
    /// already issued.
    pub fn next_ms(&mut self) -> i64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);
        self.last_ms = now.max(self.last_ms + 1);
        self.last_ms
    }
}
