/// A result type defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All error variants that `chronid` can emit.
///
/// Parse and cast failures are returned to the immediate caller. The only
/// variant raised by generation is [`Error::Overflow`] (and
/// [`Error::InvalidArgument`] for out-of-range timestamps), which aborts the
/// current request without touching generator state.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The canonical text could not be decoded.
    #[error("invalid format: {0}")]
    InvalidFormat(#[from] FormatError),

    /// A binary buffer was not exactly the width of the identifier.
    #[error("wrong length: expected {expected} bytes, got {actual}")]
    WrongLength {
        /// Required buffer length (16 for ULID, 12 for ObjectId).
        expected: usize,
        /// Length of the buffer that was supplied.
        actual: usize,
    },

    /// The monotonic payload is exhausted for the current tick.
    ///
    /// Returning an id here would either duplicate or reorder a previous one,
    /// so the request is aborted. Generation succeeds again once the clock
    /// moves past `timestamp`.
    #[error("monotonic payload exhausted at timestamp {timestamp}")]
    Overflow {
        /// The saturated timestamp tick.
        timestamp: u64,
    },

    /// An argument is outside the range the identifier can represent.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// Human readable description of the rejected value.
        reason: String,
    },
}

impl Error {
    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }
}

/// Reasons a canonical text representation is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum FormatError {
    /// The text is not exactly the canonical length.
    #[error("expected {expected} characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// A byte outside the accepted alphabet, after normalization.
    #[error("invalid character {:?} at index {index}", as_char(.byte))]
    InvalidChar { byte: u8, index: usize },

    /// The leading base32 symbol encodes more than 128 bits.
    #[error("leading symbol {symbol:?} overflows the 48-bit timestamp")]
    TimestampOverflow { symbol: char },
}

fn as_char(byte: &u8) -> char {
    char::from(*byte)
}
