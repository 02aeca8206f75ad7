use core::cmp::Ordering;
use core::fmt;
use core::hash::Hash;

use crate::Result;

/// The host-facing surface shared by every fixed-width identifier.
///
/// A storage engine or database extension only needs this trait to store,
/// print, parse, order and hash identifiers: the binary value is a fixed-size
/// big-endian byte array, so `compare` is a plain byte-wise comparison and
/// agrees with chronological order.
pub trait Id:
    Copy + Clone + fmt::Display + fmt::Debug + PartialOrd + Ord + PartialEq + Eq + Hash
{
    /// Width of the binary representation in bytes.
    const BYTES: usize;

    /// Length of the canonical text in characters.
    const TEXT_LEN: usize;

    /// Fixed-size byte buffer holding the binary representation.
    type Bytes: AsRef<[u8]> + Copy + fmt::Debug + Eq;

    /// Stack-allocated canonical text view.
    type Text: AsRef<str> + fmt::Display;

    /// Parses canonical text.
    ///
    /// # Errors
    /// Returns [`Error::InvalidFormat`] for a wrong length or a character
    /// outside the (normalized) alphabet.
    ///
    /// [`Error::InvalidFormat`]: crate::Error::InvalidFormat
    fn parse(s: &str) -> Result<Self>;

    /// Formats the canonical text. Total and deterministic.
    fn format(&self) -> Self::Text;

    /// Returns a copy of the raw big-endian bytes.
    fn to_bytes(&self) -> Self::Bytes;

    /// Builds an identifier from a buffer of exactly [`Self::BYTES`] bytes.
    ///
    /// # Errors
    /// Returns [`Error::WrongLength`] for any other buffer length.
    ///
    /// [`Error::WrongLength`]: crate::Error::WrongLength
    fn from_bytes(bytes: &[u8]) -> Result<Self>;

    /// Unsigned byte-wise comparison over the full buffer.
    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    /// Deterministic 64-bit hash of the binary value.
    fn hash64(&self) -> u64 {
        crate::fnv1a64(self.to_bytes().as_ref())
    }

    /// Null-in/null-out variant of [`Self::parse`].
    ///
    /// # Errors
    /// Same as [`Self::parse`] when a value is supplied.
    fn parse_nullable(s: Option<&str>) -> Result<Option<Self>> {
        s.map(Self::parse).transpose()
    }

    /// Null-in/null-out variant of [`Self::from_bytes`].
    ///
    /// # Errors
    /// Same as [`Self::from_bytes`] when a value is supplied.
    fn from_bytes_nullable(bytes: Option<&[u8]>) -> Result<Option<Self>> {
        bytes.map(Self::from_bytes).transpose()
    }
}

/// Checks that `bytes` is exactly `N` long and copies it into an array.
pub(crate) fn exact_bytes<const N: usize>(bytes: &[u8]) -> Result<[u8; N]> {
    <[u8; N]>::try_from(bytes).map_err(|_| crate::Error::WrongLength {
        expected: N,
        actual: bytes.len(),
    })
}

