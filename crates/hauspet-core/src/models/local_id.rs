//! Locally synthesized identifiers for records created while offline.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

static LAST_ISSUED: AtomicI64 = AtomicI64::new(0);

/// Issues identifiers derived from the current Unix time in milliseconds.
///
/// Values are strictly increasing within a process: when two ids are requested
/// in the same millisecond the second is bumped forward by one.
pub struct LocalId;

impl LocalId {
    pub fn next() -> String {
        Self::next_after(Utc::now().timestamp_millis()).to_string()
    }

    fn next_after(now_ms: i64) -> i64 {
        let mut previous = LAST_ISSUED.load(Ordering::Relaxed);
        loop {
            let candidate = now_ms.max(previous.saturating_add(1));
            match LAST_ISSUED.compare_exchange_weak(
                previous,
                candidate,
                Ordering::SeqCst,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate,
                Err(actual) => previous = actual,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_ids_are_numeric_and_unique() {
        let first = LocalId::next();
        let second = LocalId::next();
        assert_ne!(first, second);
        assert!(first.parse::<i64>().is_ok());
        assert!(second.parse::<i64>().unwrap() > first.parse::<i64>().unwrap());
    }

    #[test]
    fn same_millisecond_is_bumped_forward() {
        let now = Utc::now().timestamp_millis() + 10_000_000;
        let first = LocalId::next_after(now);
        let second = LocalId::next_after(now);
        assert!(second > first);
        assert!(first >= now);
    }
}
