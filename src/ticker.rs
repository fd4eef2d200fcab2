use std::time::{Duration, Instant};

/// Default tick interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

/// How long the (cosmetic) account sync takes
pub const SYNC_DELAY: Duration = Duration::from_millis(1500);

/// Get tick duration
pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

/// Whether a sync started at `started` has finished by `now`
pub fn sync_due(started: Instant, now: Instant) -> bool {
    now.saturating_duration_since(started) >= SYNC_DELAY
}
