use std::{
    sync::{
        Arc, OnceLock,
        atomic::{AtomicU64, Ordering},
    },
    thread::{self, JoinHandle},
    time::{Duration, Instant, SystemTime, UNIX_EPOCH},
};

#[cfg(feature = "tracing")]
use tracing::debug;

use crate::TimeSource;

/// State shared between clones of a clock and its ticker thread.
#[derive(Debug)]
struct SharedTicker {
    elapsed: AtomicU64,
    handle: OnceLock<JoinHandle<()>>,
}

/// A clock that never goes backwards.
///
/// Captures the wall-clock offset once at construction, then advances from a
/// monotonic [`Instant`] updated by a background ticker thread roughly once
/// per millisecond. Reads are a single atomic load, and NTP steps after
/// construction have no effect. The ticker exits once every clone is
/// dropped.
#[derive(Clone, Debug)]
pub struct MonotonicClock {
    inner: Arc<SharedTicker>,
    epoch_offset: u64,
}

impl Default for MonotonicClock {
    /// A clock anchored to the UNIX epoch.
    fn default() -> Self {
        Self::with_epoch(Duration::ZERO)
    }
}

impl MonotonicClock {
    /// Builds a clock whose zero point is `epoch` after 1970-01-01 UTC.
    ///
    /// Identifiers embed UNIX time, so generators want the default epoch. A
    /// wall clock earlier than `epoch` starts the clock at zero.
    #[must_use]
    pub fn with_epoch(epoch: Duration) -> Self {
        let start = Instant::now();
        let epoch_offset = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .ok()
            .and_then(|now| now.checked_sub(epoch))
            .map_or(0, |offset| offset.as_millis() as u64);

        let inner = Arc::new(SharedTicker {
            elapsed: AtomicU64::new(0),
            handle: OnceLock::new(),
        });

        let weak = Arc::downgrade(&inner);
        let handle = thread::spawn(move || {
            let mut tick = 0;
            loop {
                let Some(ticker) = weak.upgrade() else {
                    break;
                };

                let target = start + Duration::from_millis(tick);
                let now = Instant::now();
                if now < target {
                    thread::sleep(target - now);
                }

                let now_ms = start.elapsed().as_millis() as u64;
                ticker.elapsed.store(now_ms, Ordering::Relaxed);
                tick = now_ms + 1;
            }
        });
        // A fresh `OnceLock` cannot already be set.
        let _ = inner.handle.set(handle);

        #[cfg(feature = "tracing")]
        debug!(epoch_offset, "monotonic clock started");

        Self {
            inner,
            epoch_offset,
        }
    }
}

impl TimeSource for MonotonicClock {
    fn current_millis(&self) -> u64 {
        self.epoch_offset + self.inner.elapsed.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SystemClock;

    #[test]
    fn tracks_the_wall_clock() {
        let clock = MonotonicClock::default();
        let wall = SystemClock.current_millis();
        let mono = clock.current_millis();
        assert!(mono.abs_diff(wall) < 1_000, "mono={mono} wall={wall}");
    }

    #[test]
    fn never_goes_backwards() {
        let clock = MonotonicClock::default();
        let mut last = clock.current_millis();
        for _ in 0..10_000 {
            let now = clock.current_millis();
            assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn advances_over_time() {
        let clock = MonotonicClock::default();
        let before = clock.current_millis();
        thread::sleep(Duration::from_millis(20));
        assert!(clock.current_millis() > before);
    }

    #[test]
    fn custom_epoch_shifts_readings() {
        let epoch = Duration::from_millis(1_735_689_600_000);
        let clock = MonotonicClock::with_epoch(epoch);
        let unix = MonotonicClock::default();
        let diff = unix.current_millis() - clock.current_millis();
        assert!(diff.abs_diff(1_735_689_600_000) < 1_000);
    }

    #[test]
    fn clones_share_the_ticker() {
        let clock = MonotonicClock::default();
        let clone = clock.clone();
        assert!(Arc::ptr_eq(&clock.inner, &clone.inner));
    }
}
