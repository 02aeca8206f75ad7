#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
use std::time::{SystemTime, UNIX_EPOCH};

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
use web_time::{SystemTime, UNIX_EPOCH};

use crate::TimeSource;

/// The host wall clock.
///
/// Follows NTP adjustments, so readings can move backwards; generators detect
/// that and hold their last timestamp. A host clock set before 1970 reads as
/// zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn current_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_millis() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_a_plausible_wall_clock() {
        // 2021-01-01T00:00:00Z
        let now = SystemClock.current_millis();
        assert!(now > 1_609_459_200_000);
        assert_eq!(SystemClock.current_secs(), SystemClock.current_millis() / 1000);
    }
}
