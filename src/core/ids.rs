//! Record identifiers derived from the creation timestamp.

use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// Returns the current Unix time in milliseconds as a string.
///
/// Ids handed out by one process are strictly increasing: a call landing in
/// the same millisecond as the previous one gets the previous value plus one.
/// Nothing prevents collisions with ids from an earlier run or with seeded
/// records.
#[must_use]
pub fn next_id() -> String {
    let now = Utc::now().timestamp_millis();
    let mut last = LAST_ID.load(Ordering::Relaxed);
    loop {
        let candidate = now.max(last + 1);
        match LAST_ID.compare_exchange_weak(last, candidate, Ordering::Relaxed, Ordering::Relaxed)
        {
            Ok(_) => return candidate.to_string(),
            Err(actual) => last = actual,
        }
    }
}
