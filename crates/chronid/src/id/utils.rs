/// Implements the conversions every identifier shares on top of its [`Id`]
/// impl: text parsing and formatting traits, byte-slice and array
/// conversions, and value comparison against text.
///
/// [`Id`]: crate::Id
macro_rules! impl_id_conversions {
    ($name:ident, $bytes:expr) => {
        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(<Self as $crate::Id>::format(self).as_str())
            }
        }

        impl core::str::FromStr for $name {
            type Err = $crate::Error;

            fn from_str(s: &str) -> $crate::Result<Self> {
                <Self as $crate::Id>::parse(s)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = $crate::Error;

            fn try_from(s: &str) -> $crate::Result<Self> {
                <Self as $crate::Id>::parse(s)
            }
        }

        impl TryFrom<&[u8]> for $name {
            type Error = $crate::Error;

            fn try_from(bytes: &[u8]) -> $crate::Result<Self> {
                <Self as $crate::Id>::from_bytes(bytes)
            }
        }

        impl From<[u8; $bytes]> for $name {
            fn from(bytes: [u8; $bytes]) -> Self {
                Self::from_array(bytes)
            }
        }

        impl From<$name> for [u8; $bytes] {
            fn from(id: $name) -> Self {
                id.to_bytes()
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                <$name as $crate::Id>::format(&id).into()
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                self.as_bytes()
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                <Self as $crate::Id>::parse(other).is_ok_and(|parsed| parsed == *self)
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                *self == **other
            }
        }

        impl PartialEq<$name> for str {
            fn eq(&self, other: &$name) -> bool {
                *other == *self
            }
        }

        impl PartialEq<$name> for &str {
            fn eq(&self, other: &$name) -> bool {
                *other == **self
            }
        }
    };
}

pub(crate) use impl_id_conversions;
