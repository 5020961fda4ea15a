// Monotonic millisecond clock anchored at process start
//
// Timestamps stored in the aircraft table (last_seen_ms) come from here,
// so staleness comparisons are immune to wall-clock adjustments.

use std::sync::OnceLock;
use std::time::Instant;

static START: OnceLock<Instant> = OnceLock::new();

/// Milliseconds since the first call in this process
pub fn monotonic_ms() -> u64 {
    START.get_or_init(Instant::now).elapsed().as_millis() as u64
}
