use core::fmt;
use std::time::{Duration, SystemTime};

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use uuid::Uuid;

use crate::base32::{ULID_BYTES, ULID_CHARS, decode_ulid, encode_ulid};
use crate::id::interface::exact_bytes;
use crate::id::utils::impl_id_conversions;
use crate::{EncodedId, Id, Result};

/// A 128-bit lexicographically sortable identifier.
///
/// Stored as 16 big-endian bytes:
///
/// ```text
///  Byte:   0              5 6                      15
///          +----------------+-------------------------+
///  Field:  | timestamp (48) |       payload (80)      |
///          +----------------+-------------------------+
/// ```
///
/// The timestamp counts milliseconds since the UNIX epoch. Because both fields
/// are big-endian, byte-wise order equals chronological order, with ties
/// broken by payload magnitude.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Ulid {
    bytes: [u8; ULID_BYTES],
}

impl Ulid {
    /// Number of bits in the timestamp field.
    pub const TIMESTAMP_BITS: u32 = 48;
    /// Number of bits in the payload field.
    pub const PAYLOAD_BITS: u32 = 80;
    /// Largest representable timestamp, `2^48 - 1` ms.
    pub const MAX_TIMESTAMP: u64 = (1 << Self::TIMESTAMP_BITS) - 1;
    /// Largest representable payload, `2^80 - 1`.
    pub const MAX_PAYLOAD: u128 = (1 << Self::PAYLOAD_BITS) - 1;

    /// The all-zero identifier.
    #[must_use]
    pub const fn nil() -> Self {
        Self {
            bytes: [0; ULID_BYTES],
        }
    }

    /// Packs a timestamp and payload. Bits above each field's width are
    /// discarded.
    #[must_use]
    pub const fn from_parts(timestamp_ms: u64, payload: u128) -> Self {
        let ts = (timestamp_ms & Self::MAX_TIMESTAMP) as u128;
        let payload = payload & Self::MAX_PAYLOAD;
        Self::from_u128((ts << Self::PAYLOAD_BITS) | payload)
    }

    /// Wraps 16 raw big-endian bytes.
    #[must_use]
    pub const fn from_array(bytes: [u8; ULID_BYTES]) -> Self {
        Self { bytes }
    }

    /// Builds a ULID from its big-endian integer view.
    #[must_use]
    pub const fn from_u128(value: u128) -> Self {
        Self {
            bytes: value.to_be_bytes(),
        }
    }

    /// Returns the big-endian integer view.
    #[must_use]
    pub const fn to_u128(&self) -> u128 {
        u128::from_be_bytes(self.bytes)
    }

    /// Returns a reference to the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; ULID_BYTES] {
        &self.bytes
    }

    /// Returns a copy of the raw bytes.
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; ULID_BYTES] {
        self.bytes
    }

    /// Milliseconds since the UNIX epoch.
    #[must_use]
    pub const fn timestamp_ms(&self) -> u64 {
        (self.to_u128() >> Self::PAYLOAD_BITS) as u64
    }

    /// The 80-bit payload.
    #[must_use]
    pub const fn payload(&self) -> u128 {
        self.to_u128() & Self::MAX_PAYLOAD
    }

    /// Returns this ULID with the payload incremented by one, or `None` if the
    /// payload is already at [`Self::MAX_PAYLOAD`].
    #[must_use]
    pub const fn checked_increment(&self) -> Option<Self> {
        let payload = self.payload();
        if payload >= Self::MAX_PAYLOAD {
            return None;
        }
        Some(Self::from_parts(self.timestamp_ms(), payload + 1))
    }

    /// The embedded timestamp as a UTC date-time, exact to the millisecond.
    #[must_use]
    pub fn datetime_utc(&self) -> DateTime<Utc> {
        // 48 bits of milliseconds always fit `TimeDelta` and chrono's range.
        DateTime::UNIX_EPOCH + TimeDelta::milliseconds(self.timestamp_ms() as i64)
    }

    /// The embedded timestamp as UTC wall time without a zone.
    #[must_use]
    pub fn naive_datetime(&self) -> NaiveDateTime {
        self.datetime_utc().naive_utc()
    }

    /// The embedded timestamp as a [`SystemTime`].
    #[must_use]
    pub fn system_time(&self) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_millis(self.timestamp_ms())
    }

    /// Relabels the same 16 bytes as a UUID.
    #[must_use]
    pub const fn to_uuid(&self) -> Uuid {
        Uuid::from_bytes(self.bytes)
    }

    /// Relabels a UUID's 16 bytes as a ULID. Lossless.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self {
            bytes: *uuid.as_bytes(),
        }
    }
}

impl Id for Ulid {
    const BYTES: usize = ULID_BYTES;
    const TEXT_LEN: usize = ULID_CHARS;

    type Bytes = [u8; ULID_BYTES];
    type Text = EncodedId<ULID_CHARS>;

    fn parse(s: &str) -> Result<Self> {
        Ok(Self::from_array(decode_ulid(s)?))
    }

    fn format(&self) -> Self::Text {
        EncodedId::from_ascii(encode_ulid(&self.bytes))
    }

    fn to_bytes(&self) -> Self::Bytes {
        self.bytes
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        exact_bytes(bytes).map(Self::from_array)
    }
}

impl_id_conversions!(Ulid, ULID_BYTES);

impl fmt::Debug for Ulid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ulid")
            .field("id", &self.format())
            .field("timestamp_ms", &self.timestamp_ms())
            .field("payload", &format_args!("{:#022x}", self.payload()))
            .finish()
    }
}

impl From<Uuid> for Ulid {
    fn from(uuid: Uuid) -> Self {
        Self::from_uuid(uuid)
    }
}

impl From<Ulid> for Uuid {
    fn from(ulid: Ulid) -> Self {
        ulid.to_uuid()
    }
}

impl From<u128> for Ulid {
    fn from(value: u128) -> Self {
        Self::from_u128(value)
    }
}

impl From<Ulid> for u128 {
    fn from(ulid: Ulid) -> Self {
        ulid.to_u128()
    }
}
