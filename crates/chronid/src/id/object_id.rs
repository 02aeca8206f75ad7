use core::fmt;
use std::time::{Duration, SystemTime};

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};

use crate::hex::{OBJECT_ID_BYTES, OBJECT_ID_CHARS, decode_object_id, encode_object_id};
use crate::id::interface::exact_bytes;
use crate::id::utils::impl_id_conversions;
use crate::{EncodedId, Id, Result};

/// A 96-bit MongoDB-compatible identifier.
///
/// ```text
///  Byte:   0         3 4                8 9         11
///          +-----------+------------------+-----------+
///  Field:  | secs (32) | machine_proc (40)| count (24)|
///          +-----------+------------------+-----------+
/// ```
///
/// All fields are big-endian, so byte-wise order is chronological at second
/// precision.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct ObjectId {
    bytes: [u8; OBJECT_ID_BYTES],
}

impl ObjectId {
    /// Number of bits in the machine/process field.
    pub const MACHINE_PROCESS_BITS: u32 = 40;
    /// Number of bits in the counter field.
    pub const COUNTER_BITS: u32 = 24;
    /// Largest machine/process value, `2^40 - 1`.
    pub const MAX_MACHINE_PROCESS: u64 = (1 << Self::MACHINE_PROCESS_BITS) - 1;
    /// Largest counter value, `2^24 - 1`.
    pub const MAX_COUNTER: u32 = (1 << Self::COUNTER_BITS) - 1;

    /// Packs the three fields. Bits above each field's width are discarded.
    #[must_use]
    pub const fn from_parts(timestamp_secs: u32, machine_process: u64, counter: u32) -> Self {
        let ts = timestamp_secs.to_be_bytes();
        let mp = (machine_process & Self::MAX_MACHINE_PROCESS).to_be_bytes();
        let ct = (counter & Self::MAX_COUNTER).to_be_bytes();
        Self {
            bytes: [
                ts[0], ts[1], ts[2], ts[3], mp[3], mp[4], mp[5], mp[6], mp[7], ct[1], ct[2], ct[3],
            ],
        }
    }

    /// Wraps 12 raw big-endian bytes.
    #[must_use]
    pub const fn from_array(bytes: [u8; OBJECT_ID_BYTES]) -> Self {
        Self { bytes }
    }

    /// Returns a reference to the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; OBJECT_ID_BYTES] {
        &self.bytes
    }

    /// Returns a copy of the raw bytes.
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; OBJECT_ID_BYTES] {
        self.bytes
    }

    /// Seconds since the UNIX epoch.
    #[must_use]
    pub const fn timestamp_secs(&self) -> u32 {
        let b = &self.bytes;
        u32::from_be_bytes([b[0], b[1], b[2], b[3]])
    }

    /// The 40-bit machine/process discriminator.
    #[must_use]
    pub const fn machine_process(&self) -> u64 {
        let b = &self.bytes;
        u64::from_be_bytes([0, 0, 0, b[4], b[5], b[6], b[7], b[8]])
    }

    /// The 24-bit counter.
    #[must_use]
    pub const fn counter(&self) -> u32 {
        let b = &self.bytes;
        u32::from_be_bytes([0, b[9], b[10], b[11]])
    }

    /// The embedded timestamp as a UTC date-time, exact to the second.
    #[must_use]
    pub fn datetime_utc(&self) -> DateTime<Utc> {
        DateTime::UNIX_EPOCH + TimeDelta::seconds(i64::from(self.timestamp_secs()))
    }

    /// The embedded timestamp as UTC wall time without a zone.
    #[must_use]
    pub fn naive_datetime(&self) -> NaiveDateTime {
        self.datetime_utc().naive_utc()
    }

    /// The embedded timestamp as a [`SystemTime`].
    #[must_use]
    pub fn system_time(&self) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(u64::from(self.timestamp_secs()))
    }
}

impl Id for ObjectId {
    const BYTES: usize = OBJECT_ID_BYTES;
    const TEXT_LEN: usize = OBJECT_ID_CHARS;

    type Bytes = [u8; OBJECT_ID_BYTES];
    type Text = EncodedId<OBJECT_ID_CHARS>;

    fn parse(s: &str) -> Result<Self> {
        Ok(Self::from_array(decode_object_id(s)?))
    }

    fn format(&self) -> Self::Text {
        EncodedId::from_ascii(encode_object_id(&self.bytes))
    }

    fn to_bytes(&self) -> Self::Bytes {
        self.bytes
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        exact_bytes(bytes).map(Self::from_array)
    }
}

impl_id_conversions!(ObjectId, OBJECT_ID_BYTES);

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectId")
            .field("id", &self.format())
            .field("timestamp_secs", &self.timestamp_secs())
            .field("machine_process", &format_args!("{:#012x}", self.machine_process()))
            .field("counter", &self.counter())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::{Error, FormatError};

    const CANONICAL: &str = "507f1f77bcf86cd799439011";

    #[test]
    fn parses_reference_text() {
        let id = ObjectId::parse(CANONICAL).unwrap();
        assert_eq!(id.timestamp_secs(), 0x507f_1f77);
        assert_eq!(id.machine_process(), 0xbc_f86c_d799);
        assert_eq!(id.counter(), 0x43_9011);
        assert_eq!(id.to_string(), CANONICAL);
    }

    #[test]
    fn uppercase_input_formats_lowercase() {
        let id = ObjectId::parse("507F1F77BCF86CD799439011").unwrap();
        assert_eq!(id.format(), CANONICAL);
        assert_eq!(id, CANONICAL);
    }

    #[test]
    fn parse_rejects_bad_text() {
        assert_eq!(
            ObjectId::parse("507f1f77bcf86cd7994390111").unwrap_err(),
            Error::InvalidFormat(FormatError::InvalidLength {
                expected: 24,
                actual: 25
            })
        );
        assert!(matches!(
            ObjectId::parse("507f1f77bcf86cd79943901z"),
            Err(Error::InvalidFormat(FormatError::InvalidChar { byte: b'z', index: 23 }))
        ));
        assert!(ObjectId::parse("").is_err());
    }

    #[test]
    fn from_parts_packs_fields_big_endian() {
        let id = ObjectId::from_parts(0x0102_0304, 0x05_0607_0809, 0x0A_0B0C);
        assert_eq!(id.to_bytes(), [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
        assert_eq!(id.timestamp_secs(), 0x0102_0304);
        assert_eq!(id.machine_process(), 0x05_0607_0809);
        assert_eq!(id.counter(), 0x0A_0B0C);
    }

    #[test]
    fn from_parts_masks_out_of_range_fields() {
        let id = ObjectId::from_parts(u32::MAX, u64::MAX, u32::MAX);
        assert_eq!(id.machine_process(), ObjectId::MAX_MACHINE_PROCESS);
        assert_eq!(id.counter(), ObjectId::MAX_COUNTER);
        assert_eq!(id.format(), "ffffffffffffffffffffffff");
    }

    #[test]
    fn from_bytes_requires_exactly_twelve() {
        assert_eq!(
            ObjectId::from_bytes(&[0; 8]).unwrap_err(),
            Error::WrongLength {
                expected: 12,
                actual: 8
            }
        );
        assert_eq!(
            ObjectId::from_bytes(&[0; 17]).unwrap_err(),
            Error::WrongLength {
                expected: 12,
                actual: 17
            }
        );
        let id = ObjectId::parse(CANONICAL).unwrap();
        assert_eq!(ObjectId::from_bytes(id.as_ref()).unwrap(), id);
    }

    #[test]
    fn orders_by_timestamp_then_counter() {
        let a = ObjectId::from_parts(10, 7, 5);
        let b = ObjectId::from_parts(10, 7, 6);
        let c = ObjectId::from_parts(11, 0, 0);
        assert!(a < b && b < c);
        assert!(a.format().as_str() < c.format().as_str());
    }

    #[test]
    fn datetime_is_exact_to_the_second() {
        let id = ObjectId::from_parts(1_609_459_200, 1, 1);
        let expected = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(id.datetime_utc(), expected);
        assert_eq!(id.naive_datetime(), expected.naive_utc());
        assert_eq!(
            id.system_time(),
            SystemTime::UNIX_EPOCH + Duration::from_secs(1_609_459_200)
        );
    }

    #[test]
    fn hash64_distinguishes_counters() {
        let hashes: std::collections::HashSet<u64> = (0..100)
            .map(|c| ObjectId::from_parts(1, 1, c).hash64())
            .collect();
        assert_eq!(hashes.len(), 100);
    }
}
