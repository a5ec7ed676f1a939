use core::fmt;

use crate::{
    constants::{PRG_KEY_SIZE, TAG_PRG_DERIVE, TAG_PRG_KEY},
    errors::RcPrfError,
    key::Key,
};

/// Check an output length of `len` bytes and return it as a child index.
///
/// Lengths must lie in `1..=65535`; the root of each length's tree is the
/// master key's child at that index.
pub(crate) fn check_output_len(len: usize) -> Result<u16, RcPrfError> {
    match u16::try_from(len) {
        Ok(index) if index != 0 => Ok(index),
        _ => Err(RcPrfError::InvalidOutputLength(len)),
    }
}

/// Keyed pseudo-random generator.
///
/// Output bytes are the keyed BLAKE3 extendable output of the derive tag, read
/// from an arbitrary offset. Child keys are the keyed BLAKE3 hash of the key tag
/// followed by the child index. A `Prg` owns the key it was built from.
pub struct Prg {
    key: Key<PRG_KEY_SIZE>,
}

impl Prg {
    #[must_use]
    pub const fn new(key: Key<PRG_KEY_SIZE>) -> Self {
        Self { key }
    }

    /// Fill `out` with the generator's output starting at byte `offset`.
    pub fn derive(&self, offset: u64, out: &mut [u8]) {
        let mut h = blake3::Hasher::new_keyed(self.key.as_bytes());
        h.update(TAG_PRG_DERIVE.as_bytes());
        let mut reader = h.finalize_xof();
        reader.set_position(offset);
        reader.fill(out);
    }

    /// Derive the child key number `index`.
    #[must_use]
    pub fn derive_key(&self, index: u16) -> Key<PRG_KEY_SIZE> {
        let mut h = blake3::Hasher::new_keyed(self.key.as_bytes());
        h.update(TAG_PRG_KEY.as_bytes());
        h.update(&index.to_le_bytes());
        Key::new(*h.finalize().as_bytes())
    }
}

impl From<Key<PRG_KEY_SIZE>> for Prg {
    fn from(key: Key<PRG_KEY_SIZE>) -> Self {
        Self::new(key)
    }
}

impl fmt::Debug for Prg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Prg").finish_non_exhaustive()
    }
}
