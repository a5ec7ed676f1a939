use core::fmt;

use crate::errors::RcPrfError;

/// Inclusive range of leaf indices `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RcPrfRange {
    min: u64,
    max: u64,
}

impl RcPrfRange {
    /// Build the range `[min, max]`.
    ///
    /// # Errors
    ///
    /// Returns `RcPrfError::InvalidRange` when `min > max`.
    pub const fn new(min: u64, max: u64) -> Result<Self, RcPrfError> {
        if min > max {
            return Err(RcPrfError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Caller guarantees `min <= max`.
    pub(crate) const fn new_unchecked(min: u64, max: u64) -> Self {
        debug_assert!(min <= max);
        Self { min, max }
    }

    /// The range holding the single leaf `leaf`.
    #[must_use]
    pub const fn single(leaf: u64) -> Self {
        Self {
            min: leaf,
            max: leaf,
        }
    }

    #[must_use]
    pub const fn min(&self) -> u64 {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> u64 {
        self.max
    }

    /// Number of leaves in the range, saturating at `u64::MAX` for the full `u64` domain.
    #[must_use]
    pub const fn width(&self) -> u64 {
        (self.max - self.min).saturating_add(1)
    }

    #[must_use]
    pub const fn contains_leaf(&self, leaf: u64) -> bool {
        self.min <= leaf && leaf <= self.max
    }

    #[must_use]
    pub const fn contains_range(&self, other: &Self) -> bool {
        self.min <= other.min && other.max <= self.max
    }

    /// Intersection of two ranges, `None` when they are disjoint.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        (min <= max).then_some(Self { min, max })
    }
}

impl fmt::Display for RcPrfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}
