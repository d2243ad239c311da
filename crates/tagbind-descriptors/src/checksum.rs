//! Structural checksums used as content identity for descriptors.
//!
//! A [`Checksum`] is built by appending primitive values (and nested
//! checksums) to a [`ChecksumBuilder`] in a fixed order. Every append is
//! tagged with its kind and strings are length-prefixed, so `("ab", "c")`
//! and `("a", "bc")` never produce the same input stream.

use std::fmt;
use std::fmt::Write as _;

use sha2::Digest;
use sha2::Sha256;

const CHECKSUM_LEN: usize = 32;

const TAG_NONE: u8 = 0;
const TAG_STR: u8 = 1;
const TAG_BOOL: u8 = 2;
const TAG_INT: u8 = 3;
const TAG_CHECKSUM: u8 = 4;
const TAG_SEQ: u8 = 5;

/// Opaque 256-bit content hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Checksum([u8; CHECKSUM_LEN]);

impl Checksum {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; CHECKSUM_LEN]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; CHECKSUM_LEN] {
        &self.0
    }

    #[must_use]
    pub fn to_hex(&self) -> String {
        let mut out = String::with_capacity(CHECKSUM_LEN * 2);
        for byte in self.0 {
            let _ = write!(out, "{byte:02x}");
        }
        out
    }
}

impl fmt::Debug for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 8 bytes is plenty to tell checksums apart in test output
        write!(f, "Checksum(")?;
        for byte in &self.0[..8] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Append-only accumulator that finalizes into a [`Checksum`].
///
/// Builders are single-use: [`ChecksumBuilder::finalize`] consumes them.
#[derive(Clone, Default)]
pub struct ChecksumBuilder {
    hasher: Sha256,
}

impl ChecksumBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append<T: ChecksumValue + ?Sized>(&mut self, value: &T) -> &mut Self {
        value.append_to(self);
        self
    }

    pub fn append_null(&mut self) -> &mut Self {
        self.hasher.update([TAG_NONE]);
        self
    }

    pub fn append_str(&mut self, value: &str) -> &mut Self {
        self.hasher.update([TAG_STR]);
        self.hasher.update((value.len() as u64).to_le_bytes());
        self.hasher.update(value.as_bytes());
        self
    }

    pub fn append_bool(&mut self, value: bool) -> &mut Self {
        self.hasher.update([TAG_BOOL, u8::from(value)]);
        self
    }

    pub fn append_int(&mut self, value: i64) -> &mut Self {
        self.hasher.update([TAG_INT]);
        self.hasher.update(value.to_le_bytes());
        self
    }

    pub fn append_checksum(&mut self, value: Checksum) -> &mut Self {
        self.hasher.update([TAG_CHECKSUM]);
        self.hasher.update(value.0);
        self
    }

    /// Marks the start of a sequence of `len` items.
    pub fn append_len(&mut self, len: usize) -> &mut Self {
        self.hasher.update([TAG_SEQ]);
        self.hasher.update((len as u64).to_le_bytes());
        self
    }

    #[must_use]
    pub fn finalize(self) -> Checksum {
        let digest = self.hasher.finalize();
        let mut bytes = [0u8; CHECKSUM_LEN];
        bytes.copy_from_slice(&digest);
        Checksum(bytes)
    }
}

/// Values that know how to feed themselves into a [`ChecksumBuilder`].
pub trait ChecksumValue {
    fn append_to(&self, builder: &mut ChecksumBuilder);
}

impl ChecksumValue for str {
    fn append_to(&self, builder: &mut ChecksumBuilder) {
        builder.append_str(self);
    }
}

impl ChecksumValue for String {
    fn append_to(&self, builder: &mut ChecksumBuilder) {
        builder.append_str(self);
    }
}

impl ChecksumValue for bool {
    fn append_to(&self, builder: &mut ChecksumBuilder) {
        builder.append_bool(*self);
    }
}

impl ChecksumValue for i64 {
    fn append_to(&self, builder: &mut ChecksumBuilder) {
        builder.append_int(*self);
    }
}

impl ChecksumValue for i32 {
    fn append_to(&self, builder: &mut ChecksumBuilder) {
        builder.append_int(i64::from(*self));
    }
}

impl ChecksumValue for u32 {
    fn append_to(&self, builder: &mut ChecksumBuilder) {
        builder.append_int(i64::from(*self));
    }
}

impl ChecksumValue for Checksum {
    fn append_to(&self, builder: &mut ChecksumBuilder) {
        builder.append_checksum(*self);
    }
}

impl<T: ChecksumValue + ?Sized> ChecksumValue for &T {
    fn append_to(&self, builder: &mut ChecksumBuilder) {
        (**self).append_to(builder);
    }
}

impl<T: ChecksumValue> ChecksumValue for Option<T> {
    fn append_to(&self, builder: &mut ChecksumBuilder) {
        match self {
            Some(value) => value.append_to(builder),
            None => {
                builder.append_null();
            }
        }
    }
}

impl<T: ChecksumValue> ChecksumValue for [T] {
    fn append_to(&self, builder: &mut ChecksumBuilder) {
        builder.append_len(self.len());
        for item in self {
            item.append_to(builder);
        }
    }
}

impl<T: ChecksumValue> ChecksumValue for Vec<T> {
    fn append_to(&self, builder: &mut ChecksumBuilder) {
        self.as_slice().append_to(builder);
    }
}
