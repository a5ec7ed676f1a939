use core::fmt;

use zeroize::Zeroizing;

use crate::{
    constants::{MAX_TREE_HEIGHT, PRG_KEY_SIZE},
    decompose::{generate_constrained_subkeys, Subtree},
    errors::RcPrfError,
    key::Key,
    prg::{check_output_len, Prg},
    range::RcPrfRange,
    tree::{derive_leaf, leaf_count},
};

enum Payload<const N: usize> {
    /// Unevaluated subtree, seeded by the subtree root's key.
    Inner(Prg),
    /// Precomputed value of a single leaf.
    Leaf(Zeroizing<[u8; N]>),
}

/// One tree node kept by a constrained RC-PRF.
///
/// An element spans the `2^(subtree_height-1)` leaves below its node and can
/// evaluate exactly those.
pub struct ConstrainedElement<const N: usize> {
    tree_height: u8,
    subtree_height: u8,
    min_leaf: u64,
    max_leaf: u64,
    payload: Payload<N>,
}

const fn check_geometry(
    tree_height: u8,
    subtree_height: u8,
    min: u64,
    max: u64,
) -> Result<(), RcPrfError> {
    if tree_height == 0 || tree_height > MAX_TREE_HEIGHT {
        return Err(RcPrfError::InvalidTreeHeight {
            height: tree_height,
            max: MAX_TREE_HEIGHT,
        });
    }
    // A one-leaf tree hands out its only leaf, which is the whole tree.
    let too_high = if subtree_height == 1 {
        subtree_height > tree_height
    } else {
        subtree_height >= tree_height
    };
    if subtree_height == 0 || too_high {
        return Err(RcPrfError::InvalidSubtreeHeight {
            subtree_height,
            tree_height,
        });
    }
    if max < min {
        return Err(RcPrfError::InvalidRange { min, max });
    }
    let width = leaf_count(subtree_height);
    if max - min != width - 1 {
        return Err(RcPrfError::RangeWidthMismatch {
            min,
            max,
            expected: width,
        });
    }
    if !min.is_multiple_of(width) {
        return Err(RcPrfError::MisalignedSubtree { min, width });
    }
    let domain = leaf_count(tree_height);
    if max >= domain {
        return Err(RcPrfError::RangeOutOfDomain {
            max,
            leaf_count: domain,
        });
    }
    Ok(())
}

impl<const N: usize> ConstrainedElement<N> {
    /// Element for the subtree of height `subtree_height` spanning `[min, max]`,
    /// seeded by the subtree root's `key`.
    ///
    /// # Errors
    ///
    /// Fails unless `1 < subtree_height < tree_height` and `[min, max]` is the
    /// aligned, in-domain span of such a subtree, or if `N` is not a valid
    /// output length.
    pub fn inner(
        key: Key<PRG_KEY_SIZE>,
        tree_height: u8,
        subtree_height: u8,
        min: u64,
        max: u64,
    ) -> Result<Self, RcPrfError> {
        check_output_len(N)?;
        if subtree_height <= 1 {
            return Err(RcPrfError::InvalidSubtreeHeight {
                subtree_height,
                tree_height,
            });
        }
        check_geometry(tree_height, subtree_height, min, max)?;
        Ok(Self {
            tree_height,
            subtree_height,
            min_leaf: min,
            max_leaf: max,
            payload: Payload::Inner(Prg::new(key)),
        })
    }

    /// Element holding the precomputed `value` of `leaf`.
    ///
    /// # Errors
    ///
    /// Fails if `leaf` is outside the tree's domain or `N` is not a valid
    /// output length.
    pub fn leaf(value: [u8; N], tree_height: u8, leaf: u64) -> Result<Self, RcPrfError> {
        check_output_len(N)?;
        check_geometry(tree_height, 1, leaf, leaf)?;
        Ok(Self {
            tree_height,
            subtree_height: 1,
            min_leaf: leaf,
            max_leaf: leaf,
            payload: Payload::Leaf(Zeroizing::new(value)),
        })
    }

    #[must_use]
    pub const fn tree_height(&self) -> u8 {
        self.tree_height
    }

    #[must_use]
    pub const fn subtree_height(&self) -> u8 {
        self.subtree_height
    }

    #[must_use]
    pub const fn min_leaf(&self) -> u64 {
        self.min_leaf
    }

    #[must_use]
    pub const fn max_leaf(&self) -> u64 {
        self.max_leaf
    }

    #[must_use]
    pub const fn range(&self) -> RcPrfRange {
        RcPrfRange::new_unchecked(self.min_leaf, self.max_leaf)
    }

    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self.payload, Payload::Leaf(_))
    }

    /// Evaluate the PRF on `leaf`.
    ///
    /// # Errors
    ///
    /// Returns `RcPrfError::LeafOutOfRange` if the element does not span `leaf`.
    pub fn eval(&self, leaf: u64) -> Result<[u8; N], RcPrfError> {
        if leaf < self.min_leaf || leaf > self.max_leaf {
            return Err(RcPrfError::LeafOutOfRange {
                leaf,
                range: self.range(),
            });
        }
        match &self.payload {
            Payload::Inner(prg) => {
                let base_depth = self.tree_height - self.subtree_height;
                Ok(derive_leaf::<N>(self.tree_height, prg, base_depth, leaf))
            }
            Payload::Leaf(value) => Ok(**value),
        }
    }

    /// Append to `out` the elements covering `range`, which must lie inside this element.
    pub(crate) fn constrain_into(
        &self,
        range: &RcPrfRange,
        out: &mut Vec<Self>,
    ) -> Result<(), RcPrfError> {
        debug_assert!(self.range().contains_range(range));
        match &self.payload {
            Payload::Inner(prg) => {
                let subtree = Subtree {
                    height: self.subtree_height,
                    min: self.min_leaf,
                    max: self.max_leaf,
                };
                generate_constrained_subkeys(self.tree_height, prg, subtree, *range, out)
            }
            Payload::Leaf(value) => {
                out.push(Self::leaf(**value, self.tree_height, self.min_leaf)?);
                Ok(())
            }
        }
    }
}

impl<const N: usize> fmt::Debug for ConstrainedElement<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstrainedElement")
            .field("kind", &if self.is_leaf() { "leaf" } else { "inner" })
            .field("tree_height", &self.tree_height)
            .field("subtree_height", &self.subtree_height)
            .field("min_leaf", &self.min_leaf)
            .field("max_leaf", &self.max_leaf)
            .finish_non_exhaustive()
    }
}
