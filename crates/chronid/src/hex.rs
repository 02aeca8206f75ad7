use crate::FormatError;

const ALPHABET: &[u8; 16] = b"0123456789abcdef";

/// Width of an ObjectId in bytes.
pub(crate) const OBJECT_ID_BYTES: usize = 12;
/// Length of an ObjectId in hex digits.
pub(crate) const OBJECT_ID_CHARS: usize = OBJECT_ID_BYTES * 2;

/// Encodes 12 bytes as 24 lowercase hex digits.
pub(crate) fn encode_object_id(input: &[u8; OBJECT_ID_BYTES]) -> [u8; OBJECT_ID_CHARS] {
    let mut out = [0_u8; OBJECT_ID_CHARS];
    for (pair, &b) in out.chunks_exact_mut(2).zip(input) {
        pair[0] = ALPHABET[usize::from(b >> 4)];
        pair[1] = ALPHABET[usize::from(b & 0x0F)];
    }
    out
}

/// Decodes exactly 24 hex digits, either case, into 12 bytes.
pub(crate) fn decode_object_id(encoded: &str) -> Result<[u8; OBJECT_ID_BYTES], FormatError> {
    let input = encoded.as_bytes();
    if input.len() != OBJECT_ID_CHARS {
        return Err(FormatError::InvalidLength {
            expected: OBJECT_ID_CHARS,
            actual: input.len(),
        });
    }

    let mut out = [0_u8; OBJECT_ID_BYTES];
    hex::decode_to_slice(input, &mut out).map_err(|err| match err {
        hex::FromHexError::InvalidHexCharacter { index, .. } => FormatError::InvalidChar {
            byte: input[index],
            index,
        },
        _ => FormatError::InvalidLength {
            expected: OBJECT_ID_CHARS,
            actual: input.len(),
        },
    })?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_lowercase() {
        let bytes = [
            0x50, 0x7f, 0x1f, 0x77, 0xbc, 0xf8, 0x6c, 0xd7, 0x99, 0x43, 0x90, 0x11,
        ];
        assert_eq!(&encode_object_id(&bytes), b"507f1f77bcf86cd799439011");
    }

    #[test]
    fn decodes_either_case() {
        let lower = decode_object_id("507f1f77bcf86cd799439011").unwrap();
        let upper = decode_object_id("507F1F77BCF86CD799439011").unwrap();
        assert_eq!(lower, upper);
        assert_eq!(&encode_object_id(&upper), b"507f1f77bcf86cd799439011");
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!(
            decode_object_id("507f1f77bcf86cd79943901").unwrap_err(),
            FormatError::InvalidLength {
                expected: 24,
                actual: 23
            }
        );
        assert_eq!(
            decode_object_id("").unwrap_err(),
            FormatError::InvalidLength {
                expected: 24,
                actual: 0
            }
        );
    }

    #[test]
    fn rejects_non_hex_characters() {
        assert_eq!(
            decode_object_id("507f1f77bcf86cd79943901g").unwrap_err(),
            FormatError::InvalidChar {
                byte: b'g',
                index: 23
            }
        );
        assert!(matches!(
            decode_object_id(" 07f1f77bcf86cd799439011"),
            Err(FormatError::InvalidChar { index: 0, .. })
        ));
    }
}
