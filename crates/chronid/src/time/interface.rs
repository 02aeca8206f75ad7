/// A source of wall-clock time in milliseconds since the UNIX epoch.
///
/// Generators read the clock inside their critical section, so an
/// implementation must be cheap and must never block. Tests substitute fixed
/// or stepped clocks.
///
/// # Example
///
/// ```
/// use chronid::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1_609_459_200_123
///     }
/// }
///
/// assert_eq!(FixedTime.current_secs(), 1_609_459_200);
/// ```
pub trait TimeSource {
    /// Milliseconds since 1970-01-01 UTC.
    fn current_millis(&self) -> u64;

    /// Whole seconds since 1970-01-01 UTC.
    fn current_secs(&self) -> u64 {
        self.current_millis() / 1000
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for std::sync::Arc<T> {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }
}
