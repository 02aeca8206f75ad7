use std::sync::{Arc, LazyLock};

use chrono::{DateTime, NaiveDateTime, TimeZone};
use parking_lot::Mutex;

#[cfg(feature = "tracing")]
use tracing::{debug, instrument, warn};

use crate::{Error, FastRandom, ObjectId, RandSource, Result, SystemClock, ThreadRandom, TimeSource};

static PROCESS_DISCRIMINATOR: LazyLock<u64> = LazyLock::new(|| {
    let value: u64 = ThreadRandom.rand();
    value & ObjectId::MAX_MACHINE_PROCESS
});

/// The 40-bit machine/process value shared by every default
/// [`ObjectIdGenerator`] in this process.
///
/// Drawn once from the cryptographic tier on first use and stable for the
/// life of the process.
pub fn process_discriminator() -> u64 {
    *PROCESS_DISCRIMINATOR
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct CounterState {
    last_secs: u32,
    counter: u32,
}

/// A thread-safe ObjectId generator.
///
/// Holds a fixed machine/process value and a shared `{ last_secs, counter }`
/// state behind an [`Arc<Mutex<_>>`]. The random source is only consulted at
/// construction, to seed the counter. The counter advances by one on every
/// call and wraps modulo `2^24`; the timestamp never moves below the last one
/// emitted, so a wall clock stepping backwards is clamped.
///
/// # Example
/// ```
/// use chronid::ObjectIdGenerator;
///
/// let generator = ObjectIdGenerator::new();
/// let id = generator.generate().unwrap();
/// assert_eq!(id.machine_process(), chronid::process_discriminator());
/// ```
#[derive(Clone, Debug)]
pub struct ObjectIdGenerator<T = SystemClock> {
    machine_process: u64,
    state: Arc<Mutex<CounterState>>,
    time: T,
}

impl ObjectIdGenerator {
    /// A generator over the system clock using the process discriminator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_sources(SystemClock, &FastRandom)
    }
}

impl Default for ObjectIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TimeSource> ObjectIdGenerator<T> {
    /// Builds a generator using the process discriminator and a counter
    /// seeded from `rng`.
    pub fn with_sources<R: RandSource<u32>>(time: T, rng: &R) -> Self {
        Self::from_components(process_discriminator(), rng.rand(), time)
    }

    /// Builds a generator from explicit components. `machine_process` is
    /// truncated to 40 bits and `counter` to 24 bits.
    pub fn from_components(machine_process: u64, counter: u32, time: T) -> Self {
        Self {
            machine_process: machine_process & ObjectId::MAX_MACHINE_PROCESS,
            state: Arc::new(Mutex::new(CounterState {
                last_secs: 0,
                counter: counter & ObjectId::MAX_COUNTER,
            })),
            time,
        }
    }

    /// The fixed machine/process value embedded in every id.
    pub const fn machine_process(&self) -> u64 {
        self.machine_process
    }

    /// Generates an ObjectId for the current second.
    ///
    /// The timestamp is `max(now, last)`; the counter is taken and advanced
    /// modulo `2^24`.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if the clock reads beyond `u32::MAX`
    /// seconds.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate(&self) -> Result<ObjectId> {
        let mut state = self.state.lock();
        self.step(&mut state)
    }

    /// Generates an ObjectId for an explicit timestamp. The counter advances
    /// as usual but the last timestamp is not updated.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate_with_timestamp(&self, timestamp_secs: u32) -> ObjectId {
        let mut state = self.state.lock();
        let counter = Self::take_counter(&mut state);
        ObjectId::from_parts(timestamp_secs, self.machine_process, counter)
    }

    /// Generates an ObjectId for a zoned instant, truncated to the second.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] for instants outside `0..=u32::MAX` seconds.
    pub fn from_datetime<Tz: TimeZone>(&self, datetime: &DateTime<Tz>) -> Result<ObjectId> {
        let secs = datetime.timestamp();
        let secs = u32::try_from(secs).map_err(|_| {
            Error::invalid_argument(format!(
                "instant {secs} s is outside the 32-bit ObjectId range"
            ))
        })?;
        Ok(self.generate_with_timestamp(secs))
    }

    /// Generates an ObjectId for a UTC wall time, truncated to the second.
    ///
    /// # Errors
    /// Same as [`Self::from_datetime`].
    pub fn from_naive_datetime(&self, datetime: &NaiveDateTime) -> Result<ObjectId> {
        self.from_datetime(&datetime.and_utc())
    }

    /// Generates `n` ObjectIds under one held lock, re-reading the clock for
    /// every element. `n <= 0` yields an empty vector.
    ///
    /// # Errors
    /// Same as [`Self::generate`], or [`Error::InvalidArgument`] if `n`
    /// cannot be allocated.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate_batch(&self, n: i64) -> Result<Vec<ObjectId>> {
        let Ok(count) = usize::try_from(n) else {
            return Ok(Vec::new());
        };
        let mut ids = Vec::new();
        ids.try_reserve_exact(count)
            .map_err(|_| Error::invalid_argument(format!("batch of {n} is too large")))?;

        let mut state = self.state.lock();
        for _ in 0..count {
            ids.push(self.step(&mut state)?);
        }
        Ok(ids)
    }

    fn step(&self, state: &mut CounterState) -> Result<ObjectId> {
        let now = self.time.current_secs();
        let now = u32::try_from(now).map_err(|_| {
            Error::invalid_argument(format!("clock {now} s exceeds the 32-bit ObjectId range"))
        })?;

        if now < state.last_secs {
            #[cfg(feature = "tracing")]
            warn!(
                now,
                last = state.last_secs,
                "clock moved backwards, clamping to last second"
            );
        }
        let secs = now.max(state.last_secs);
        state.last_secs = secs;

        let counter = Self::take_counter(state);
        Ok(ObjectId::from_parts(secs, self.machine_process, counter))
    }

    /// Returns the current counter and advances it modulo `2^24`.
    fn take_counter(state: &mut CounterState) -> u32 {
        let counter = state.counter;
        state.counter = (counter + 1) & ObjectId::MAX_COUNTER;
        if state.counter == 0 {
            #[cfg(feature = "tracing")]
            debug!(last_secs = state.last_secs, "ObjectId counter wrapped");
        }
        counter
    }
}
