use core::fmt;
use core::ops::Deref;

/// A stack-allocated view over an identifier's canonical text.
///
/// Produced by [`Id::format`]. Holds exactly `N` ASCII bytes (26 for a
/// [`Ulid`], 24 for an [`ObjectId`]) and implements [`fmt::Display`],
/// [`AsRef<str>`] and [`Deref<Target = str>`] without allocating.
///
/// [`Id::format`]: crate::Id::format
/// [`Ulid`]: crate::Ulid
/// [`ObjectId`]: crate::ObjectId
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EncodedId<const N: usize> {
    buf: [u8; N],
}

impl<const N: usize> EncodedId<N> {
    /// Wraps an already encoded buffer. The caller guarantees ASCII content.
    pub(crate) const fn from_ascii(buf: [u8; N]) -> Self {
        Self { buf }
    }

    /// Returns a `&str` view of the encoding.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // SAFETY: `buf` is only ever filled from the base32 or hex alphabets,
        // both pure ASCII.
        unsafe { core::str::from_utf8_unchecked(&self.buf) }
    }

    /// Returns the encoded ASCII bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; N] {
        &self.buf
    }

    /// Consumes the view and returns the raw buffer.
    #[must_use]
    pub const fn into_inner(self) -> [u8; N] {
        self.buf
    }
}

impl<const N: usize> fmt::Display for EncodedId<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<const N: usize> fmt::Debug for EncodedId<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl<const N: usize> Deref for EncodedId<N> {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl<const N: usize> AsRef<str> for EncodedId<N> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<const N: usize> PartialEq<str> for EncodedId<N> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl<const N: usize> PartialEq<&str> for EncodedId<N> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl<const N: usize> PartialEq<String> for EncodedId<N> {
    fn eq(&self, other: &String) -> bool {
        self.as_str() == other.as_str()
    }
}

impl<const N: usize> From<EncodedId<N>> for String {
    fn from(encoded: EncodedId<N>) -> Self {
        encoded.as_str().to_owned()
    }
}
