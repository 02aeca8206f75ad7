use crate::FormatError;

const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";
const NO_VALUE: u8 = 255;
const BITS_PER_CHAR: usize = 5;

/// Width of a ULID in bytes.
pub(crate) const ULID_BYTES: usize = 16;
/// Length of a ULID in Crockford base32 symbols: `ceil(128 / 5)`.
pub(crate) const ULID_CHARS: usize = (ULID_BYTES * 8).div_ceil(BITS_PER_CHAR);

/// Highest value the leading symbol may take. 26 symbols carry 130 bits, so
/// the top two bits of the first symbol must be zero.
const MAX_LEADING_VALUE: u8 = 0b111;

/// Lookup table for Crockford base32 decoding.
///
/// Maps each input byte to its symbol value, or [`NO_VALUE`]. Lowercase is
/// folded to uppercase, `I`/`L` normalize to `1` and `O` to `0`. `U`,
/// whitespace, control characters and all non-ASCII bytes are rejected.
const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0_u8;
    while i < 32 {
        let c = ALPHABET[i as usize];
        lut[c as usize] = i;
        if c.is_ascii_uppercase() {
            lut[c.to_ascii_lowercase() as usize] = i;
        }
        i += 1;
    }
    lut[b'O' as usize] = 0;
    lut[b'o' as usize] = 0;
    lut[b'I' as usize] = 1;
    lut[b'i' as usize] = 1;
    lut[b'L' as usize] = 1;
    lut[b'l' as usize] = 1;
    lut
};

/// Encodes 16 big-endian bytes into 26 uppercase Crockford symbols.
///
/// The two padding bits required to fill 130 bits are placed at the top, so
/// the leading symbol is always `0..=7`.
pub(crate) fn encode_ulid(input: &[u8; ULID_BYTES]) -> [u8; ULID_CHARS] {
    let mut out = [0_u8; ULID_CHARS];
    let mut bits = ULID_CHARS * BITS_PER_CHAR - ULID_BYTES * 8;
    let mut acc = 0_u16;
    let mut o = 0;

    for &b in input {
        acc = (acc << 8) | u16::from(b);
        bits += 8;
        while bits >= BITS_PER_CHAR {
            bits -= BITS_PER_CHAR;
            out[o] = ALPHABET[usize::from((acc >> bits) & 0x1F)];
            o += 1;
        }
        // Only the low `bits` bits are still pending.
        acc &= (1 << bits) - 1;
    }

    out
}

/// Decodes exactly 26 Crockford symbols into 16 big-endian bytes.
///
/// Validation happens in this order: length, then each symbol against
/// [`LOOKUP`], then the leading-symbol range.
pub(crate) fn decode_ulid(encoded: &str) -> Result<[u8; ULID_BYTES], FormatError> {
    let input = encoded.as_bytes();
    if input.len() != ULID_CHARS {
        return Err(FormatError::InvalidLength {
            expected: ULID_CHARS,
            actual: input.len(),
        });
    }

    let mut values = [0_u8; ULID_CHARS];
    for (index, (&byte, value)) in input.iter().zip(values.iter_mut()).enumerate() {
        let v = LOOKUP[usize::from(byte)];
        if v == NO_VALUE {
            return Err(FormatError::InvalidChar { byte, index });
        }
        *value = v;
    }

    if values[0] > MAX_LEADING_VALUE {
        return Err(FormatError::TimestampOverflow {
            symbol: char::from(input[0]),
        });
    }

    let mut out = [0_u8; ULID_BYTES];
    // The leading symbol only contributes its low three bits.
    let mut acc = u16::from(values[0]);
    let mut bits = 3;
    let mut o = 0;
    for &v in &values[1..] {
        acc = (acc << BITS_PER_CHAR) | u16::from(v);
        bits += BITS_PER_CHAR;
        if bits >= 8 {
            bits -= 8;
            out[o] = (acc >> bits) as u8;
            o += 1;
            acc &= (1 << bits) - 1;
        }
    }
    debug_assert_eq!(o, ULID_BYTES);
    debug_assert_eq!(bits, 0);

    Ok(out)
}
