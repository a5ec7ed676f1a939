use core::fmt;

use rand_core::{CryptoRng, OsRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::RcPrfError;

/// Fixed-size secret key.
///
/// A `Key` is move-only: it is neither `Clone` nor `Copy`, so once it has been
/// handed to a [`crate::prg::Prg`] it cannot be used to seed a second one.
/// The bytes are wiped when the key is dropped.
pub struct Key<const K: usize> {
    bytes: [u8; K],
}

impl<const K: usize> Key<K> {
    /// Take ownership of `bytes` as key material.
    #[must_use]
    pub const fn new(bytes: [u8; K]) -> Self {
        Self { bytes }
    }

    /// Copy the key out of `src` and wipe `src`.
    ///
    /// # Errors
    ///
    /// Returns `RcPrfError::InvalidKeyLength` if `src` is not exactly `K` bytes
    /// long. `src` is left untouched in that case.
    pub fn from_slice(src: &mut [u8]) -> Result<Self, RcPrfError> {
        if src.len() != K {
            return Err(RcPrfError::InvalidKeyLength {
                expected: K,
                got: src.len(),
            });
        }
        let mut bytes = [0u8; K];
        bytes.copy_from_slice(src);
        src.zeroize();
        Ok(Self { bytes })
    }

    /// Draw a fresh key from `rng`.
    #[must_use]
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut bytes = [0u8; K];
        rng.fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Draw a fresh key from the operating system RNG.
    #[must_use]
    pub fn random() -> Self {
        Self::generate(&mut OsRng)
    }

    pub(crate) const fn as_bytes(&self) -> &[u8; K] {
        &self.bytes
    }
}

impl<const K: usize> Drop for Key<K> {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl<const K: usize> ZeroizeOnDrop for Key<K> {}

impl<const K: usize> fmt::Debug for Key<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key<{K}>(..)")
    }
}
