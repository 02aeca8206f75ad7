/// A source of random integers.
///
/// Generators draw payloads and counter seeds through this trait so tests can
/// substitute fixed values. Implementations are shared between threads and
/// take `&self`; the built-in sources keep their state thread-local.
///
/// # Example
/// ```
/// use chronid::RandSource;
///
/// struct FixedRand;
/// impl RandSource<u128> for FixedRand {
///     fn rand(&self) -> u128 {
///         1234
///     }
/// }
///
/// assert_eq!(FixedRand.rand(), 1234);
/// ```
pub trait RandSource<T> {
    /// Returns a random integer.
    fn rand(&self) -> T;
}

/// Marker for sources that are cryptographically strong.
///
/// [`UlidGenerator::generate_crypto`] only compiles against a source carrying
/// this marker. Implement it only for generators backed by a CSPRNG.
///
/// [`UlidGenerator::generate_crypto`]: crate::UlidGenerator::generate_crypto
pub trait CryptoRandSource<T>: RandSource<T> {}

impl<T, R: RandSource<T> + ?Sized> RandSource<T> for &R {
    fn rand(&self) -> T {
        (**self).rand()
    }
}
