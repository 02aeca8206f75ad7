use core::fmt;
use core::marker::PhantomData;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Id, ObjectId, Ulid};

/// Accepts any spelling `Id::parse` accepts, borrowed or owned.
struct TextVisitor<ID>(PhantomData<ID>);

impl<ID: Id> Visitor<'_> for TextVisitor<ID> {
    type Value = ID;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a {}-character identifier string", ID::TEXT_LEN)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<ID, E> {
        ID::parse(v).map_err(E::custom)
    }
}

macro_rules! impl_serde_text {
    ($name:ident) => {
        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                s.serialize_str(self.format().as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
                d.deserialize_str(TextVisitor(PhantomData))
            }
        }
    };
}

impl_serde_text!(Ulid);
impl_serde_text!(ObjectId);

/// Serializes an identifier as its raw big-endian bytes instead of text.
///
/// Use with `#[serde(with = "chronid::as_bytes")]` for compact binary
/// formats.
pub mod as_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::Id;

    /// Writes the raw bytes.
    ///
    /// # Errors
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<ID: Id, S: Serializer>(id: &ID, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_bytes(id.to_bytes().as_ref())
    }

    /// Reads exactly [`Id::BYTES`] bytes.
    ///
    /// # Errors
    /// Returns an error if the deserializer fails or the length is wrong.
    pub fn deserialize<'de, ID: Id, D: Deserializer<'de>>(d: D) -> Result<ID, D::Error> {
        let bytes = <Vec<u8>>::deserialize(d)?;
        ID::from_bytes(&bytes).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;

    const ULID_TEXT: &str = "01ARZ3NDEKTSV4RRFFQ69G5FAV";
    const OID_TEXT: &str = "507f1f77bcf86cd799439011";

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Record {
        id: Ulid,
        parent: ObjectId,
        #[serde(with = "crate::as_bytes")]
        raw: Ulid,
    }

    #[test]
    fn serializes_as_canonical_text() {
        let id = Ulid::parse(ULID_TEXT).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), format!("\"{ULID_TEXT}\""));

        let oid = ObjectId::parse(OID_TEXT).unwrap();
        assert_eq!(serde_json::to_string(&oid).unwrap(), format!("\"{OID_TEXT}\""));
    }

    #[test]
    fn deserializes_normalized_spellings() {
        let id: Ulid = serde_json::from_str("\"01arz3ndektsv4rrffq69g5fav\"").unwrap();
        assert_eq!(id.format(), ULID_TEXT);
        let oid: ObjectId = serde_json::from_str("\"507F1F77BCF86CD799439011\"").unwrap();
        assert_eq!(oid.format(), OID_TEXT);
    }

    #[test]
    fn rejects_invalid_text_with_format_message() {
        let err = serde_json::from_str::<Ulid>("\"01ARZ3NDEKTSV4RRFFQ69G5FAU\"").unwrap_err();
        assert!(err.to_string().contains("invalid character 'U' at index 25"));
        assert!(serde_json::from_str::<ObjectId>("42").is_err());
    }

    #[test]
    fn record_roundtrips_with_byte_field() {
        let record = Record {
            id: Ulid::parse(ULID_TEXT).unwrap(),
            parent: ObjectId::parse(OID_TEXT).unwrap(),
            raw: Ulid::from_parts(1, 2),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(ULID_TEXT));
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn byte_field_rejects_wrong_length() {
        let json = format!(r#"{{"id":"{ULID_TEXT}","parent":"{OID_TEXT}","raw":[1,2,3]}}"#);
        let err = serde_json::from_str::<Record>(&json).unwrap_err();
        assert!(err.to_string().contains("wrong length"));
    }
}
