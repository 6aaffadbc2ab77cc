//! Time-derived identifiers and timestamps.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{SecondsFormat, Utc};

/// Last storyboard id handed out in this process (ms since epoch).
static LAST_ID_MILLIS: AtomicI64 = AtomicI64::new(0);

/// Returns a storyboard id: the current time in milliseconds, bumped past the
/// previous id when the clock has not advanced.
pub fn next_storyboard_id() -> String {
    next_millis(Utc::now().timestamp_millis()).to_string()
}

fn next_millis(now: i64) -> i64 {
    let mut last = LAST_ID_MILLIS.load(Ordering::Relaxed);
    loop {
        let candidate = now.max(last + 1);
        match LAST_ID_MILLIS.compare_exchange_weak(last, candidate, Ordering::AcqRel, Ordering::Relaxed) {
            Ok(_) => return candidate,
            Err(actual) => last = actual,
        }
    }
}

/// Scene id: owning storyboard id plus the scene number.
pub fn scene_id(storyboard_id: &str, number: u32) -> String {
    format!("{}-{}", storyboard_id, number)
}

/// Current UTC time as RFC 3339 with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`.
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
