use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, TimeZone};
use core::cmp::Ordering;
use parking_lot::Mutex;

#[cfg(feature = "tracing")]
use tracing::{instrument, warn};

use crate::{
    CryptoRandSource, Error, FastRandom, RandSource, Result, SystemClock, ThreadRandom,
    TimeSource, Ulid,
};

/// A thread-safe ULID generator with shared monotonic state.
///
/// The last emitted ULID lives in an [`Arc<Mutex<_>>`]; clones of a generator
/// share it, so a clone handed to another thread continues the same
/// monotonic sequence. The clock is read while the lock is held, which makes
/// cross-thread call order equal output order.
///
/// Three payload modes are offered:
///
/// - [`generate_monotonic`]: strictly increasing across calls, the payload is
///   incremented within a millisecond
/// - [`generate_random`]: a fresh payload from `R`, no shared state
/// - [`generate_crypto`]: a fresh payload from the cryptographic tier `C`
///
/// # Example
/// ```
/// use chronid::UlidGenerator;
///
/// let generator = UlidGenerator::new();
/// let a = generator.generate_monotonic().unwrap();
/// let b = generator.generate_monotonic().unwrap();
/// assert!(a < b);
/// ```
///
/// [`generate_monotonic`]: Self::generate_monotonic
/// [`generate_random`]: Self::generate_random
/// [`generate_crypto`]: Self::generate_crypto
#[derive(Clone, Debug)]
pub struct UlidGenerator<T = SystemClock, R = FastRandom, C = ThreadRandom> {
    state: Arc<Mutex<Ulid>>,
    time: T,
    rng: R,
    crypto: C,
}

impl UlidGenerator {
    /// A generator over the system clock with the default random tiers.
    #[must_use]
    pub fn new() -> Self {
        Self::with_sources(SystemClock, FastRandom, ThreadRandom)
    }
}

impl Default for UlidGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, R, C> UlidGenerator<T, R, C>
where
    T: TimeSource,
    R: RandSource<u128>,
    C: RandSource<u128>,
{
    /// Builds a generator with fresh state from the given sources.
    pub fn with_sources(time: T, rng: R, crypto: C) -> Self {
        Self::from_components(Ulid::nil(), time, rng, crypto)
    }

    /// Restores a generator whose last emitted ULID was `last`.
    ///
    /// Subsequent monotonic output is strictly greater than `last` as long as
    /// the clock has not fallen more than the remaining payload space behind.
    pub fn from_components(last: Ulid, time: T, rng: R, crypto: C) -> Self {
        Self {
            state: Arc::new(Mutex::new(last)),
            time,
            rng,
            crypto,
        }
    }

    /// The most recently emitted monotonic ULID, or nil before the first.
    pub fn last(&self) -> Ulid {
        *self.state.lock()
    }

    /// Generates a ULID strictly greater than every previous monotonic ULID
    /// from this generator and its clones.
    ///
    /// When the clock has advanced past the last timestamp, a fresh payload is
    /// drawn. Otherwise the last payload is incremented by one, keeping the
    /// last timestamp even if the clock moved backwards.
    ///
    /// # Errors
    /// - [`Error::Overflow`] if the payload is already `2^80 - 1` for the
    ///   current tick. State is left untouched, so a call in a later
    ///   millisecond succeeds.
    /// - [`Error::InvalidArgument`] if the clock reads beyond 48 bits.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate_monotonic(&self) -> Result<Ulid> {
        let mut last = self.state.lock();
        self.step(&mut last)
    }

    /// Generates a ULID with the current timestamp and a fresh payload from
    /// `R`. Does not read or update monotonic state.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if the clock reads beyond 48 bits.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate_random(&self) -> Result<Ulid> {
        let now = checked_timestamp(self.time.current_millis())?;
        Ok(Ulid::from_parts(now, self.rng.rand()))
    }

    /// Generates a ULID with the current timestamp and a payload from the
    /// cryptographic tier.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if the clock reads beyond 48 bits.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate_crypto(&self) -> Result<Ulid>
    where
        C: CryptoRandSource<u128>,
    {
        let now = checked_timestamp(self.time.current_millis())?;
        Ok(Ulid::from_parts(now, self.crypto.rand()))
    }

    /// Generates a ULID for an explicit timestamp with a fresh payload.
    ///
    /// Zero and historical timestamps are allowed. Monotonic state is neither
    /// read nor updated.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if `timestamp_ms` exceeds `2^48 - 1`.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate_with_timestamp(&self, timestamp_ms: u64) -> Result<Ulid> {
        let ts = checked_timestamp(timestamp_ms)?;
        Ok(Ulid::from_parts(ts, self.rng.rand()))
    }

    /// Generates a ULID for a zoned instant, truncated to the millisecond.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] for instants before the UNIX epoch or past
    /// the 48-bit range.
    pub fn from_datetime<Tz: TimeZone>(&self, datetime: &DateTime<Tz>) -> Result<Ulid> {
        let millis = datetime.timestamp_millis();
        let millis = u64::try_from(millis).map_err(|_| {
            Error::invalid_argument(format!("instant {millis} ms is before the UNIX epoch"))
        })?;
        self.generate_with_timestamp(millis)
    }

    /// Generates a ULID for a UTC wall time, truncated to the millisecond.
    ///
    /// # Errors
    /// Same as [`Self::from_datetime`].
    pub fn from_naive_datetime(&self, datetime: &NaiveDateTime) -> Result<Ulid> {
        self.from_datetime(&datetime.and_utc())
    }

    /// Generates `n` monotonic ULIDs under one held lock.
    ///
    /// The clock is re-read for every element, so the batch may span several
    /// milliseconds, and each element is strictly greater than the previous
    /// one. `n <= 0` yields an empty vector.
    ///
    /// # Errors
    /// Any error from [`Self::generate_monotonic`] aborts the whole batch.
    /// Elements produced before the failure have already advanced the shared
    /// state. [`Error::InvalidArgument`] if `n` cannot be allocated.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate_batch(&self, n: i64) -> Result<Vec<Ulid>> {
        let Ok(count) = usize::try_from(n) else {
            return Ok(Vec::new());
        };
        let mut ids = Vec::new();
        ids.try_reserve_exact(count)
            .map_err(|_| Error::invalid_argument(format!("batch of {n} is too large")))?;

        let mut last = self.state.lock();
        for _ in 0..count {
            ids.push(self.step(&mut last)?);
        }
        Ok(ids)
    }

    /// One monotonic step against already-locked state.
    fn step(&self, last: &mut Ulid) -> Result<Ulid> {
        let now = checked_timestamp(self.time.current_millis())?;
        let last_ts = last.timestamp_ms();

        let next = match now.cmp(&last_ts) {
            Ordering::Greater => Ulid::from_parts(now, self.rng.rand()),
            Ordering::Equal => Self::increment(last)?,
            Ordering::Less => Self::cold_clock_behind(now, last)?,
        };
        *last = next;
        Ok(next)
    }

    fn increment(last: &Ulid) -> Result<Ulid> {
        last.checked_increment().ok_or_else(|| {
            let timestamp = last.timestamp_ms();
            #[cfg(feature = "tracing")]
            warn!(timestamp, "monotonic payload exhausted");
            Error::Overflow { timestamp }
        })
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(now: u64, last: &Ulid) -> Result<Ulid> {
        #[cfg(feature = "tracing")]
        warn!(
            now,
            last = last.timestamp_ms(),
            "clock moved backwards, holding last timestamp"
        );
        #[cfg(not(feature = "tracing"))]
        let _ = now;
        Self::increment(last)
    }
}

fn checked_timestamp(timestamp_ms: u64) -> Result<u64> {
    if timestamp_ms > Ulid::MAX_TIMESTAMP {
        return Err(Error::invalid_argument(format!(
            "timestamp {timestamp_ms} ms exceeds the 48-bit maximum {}",
            Ulid::MAX_TIMESTAMP
        )));
    }
    Ok(timestamp_ms)
}
