use crate::{
    constants::MAX_EVAL_RANGE_WIDTH, constrained::ConstrainedRcPrf, errors::RcPrfError,
    range::RcPrfRange,
};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A PRF over a range of leaves of a tree of fixed height, producing `N`-byte values.
pub trait RangePrf<const N: usize> {
    /// Height of the underlying tree; constraining does not change it.
    fn tree_height(&self) -> u8;

    /// Leaves this PRF can be evaluated on.
    fn range(&self) -> RcPrfRange;

    /// Evaluate the PRF on `leaf`.
    ///
    /// # Errors
    ///
    /// Returns `RcPrfError::LeafOutOfRange` when `leaf` is outside [`Self::range`].
    fn eval(&self, leaf: u64) -> Result<[u8; N], RcPrfError>;

    /// Derive a key that can only evaluate the leaves of `[min, max]`.
    ///
    /// # Errors
    ///
    /// Fails when `min > max` or when `[min, max]` is not inside [`Self::range`].
    fn constrain(&self, min: u64, max: u64) -> Result<ConstrainedRcPrf<N>, RcPrfError>;

    /// Evaluate every leaf of `range`, in order.
    ///
    /// # Errors
    ///
    /// Fails when `range` is not inside [`Self::range`] or is wider than
    /// `MAX_EVAL_RANGE_WIDTH`.
    fn eval_range(&self, range: &RcPrfRange) -> Result<Vec<[u8; N]>, RcPrfError> {
        check_eval_range(&self.range(), range)?;
        (range.min()..=range.max())
            .map(|leaf| self.eval(leaf))
            .collect()
    }

    /// Parallel version of [`Self::eval_range`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::eval_range`].
    #[cfg(feature = "parallel")]
    fn par_eval_range(&self, range: &RcPrfRange) -> Result<Vec<[u8; N]>, RcPrfError>
    where
        Self: Sync,
    {
        let width = check_eval_range(&self.range(), range)?;
        (0..width)
            .into_par_iter()
            .map(|i| self.eval(range.min() + i as u64))
            .collect()
    }
}

/// Width of `requested` as a `usize` once it is known to be evaluable.
fn check_eval_range(available: &RcPrfRange, requested: &RcPrfRange) -> Result<usize, RcPrfError> {
    if !available.contains_range(requested) {
        return Err(RcPrfError::RangeNotContained {
            requested: *requested,
            available: *available,
        });
    }
    let width = requested.width();
    let too_wide = RcPrfError::RangeTooWide {
        width,
        max: MAX_EVAL_RANGE_WIDTH,
    };
    if width > MAX_EVAL_RANGE_WIDTH {
        return Err(too_wide);
    }
    usize::try_from(width).map_err(|_| too_wide)
}
