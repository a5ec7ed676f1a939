use core::fmt;

use tracing::debug;

use crate::{
    constants::{MAX_TREE_HEIGHT, PRG_KEY_SIZE},
    constrained::ConstrainedRcPrf,
    decompose::{generate_constrained_subkeys, Subtree},
    errors::RcPrfError,
    key::Key,
    prg::{check_output_len, Prg},
    range::RcPrfRange,
    traits::RangePrf,
    tree::{derive_leaf, leaf_count, Child},
};

/// Range-constrained PRF over the `2^(height-1)` leaves of a tree of height `height`.
///
/// The master key seeds the root node; every other node's key is derived from
/// its parent's. Constraining hands out only nodes whose whole subtree lies in
/// the requested range.
pub struct RcPrf<const N: usize> {
    tree_height: u8,
    root_prg: Prg,
}

impl<const N: usize> RcPrf<N> {
    /// Build an RC-PRF from a master `key`, which is consumed.
    ///
    /// # Errors
    ///
    /// Returns `RcPrfError::InvalidTreeHeight` unless `1 <= height <= 64`, and
    /// `RcPrfError::InvalidOutputLength` unless `1 <= N <= 65535`.
    pub fn new(key: Key<PRG_KEY_SIZE>, height: u8) -> Result<Self, RcPrfError> {
        if height == 0 || height > MAX_TREE_HEIGHT {
            return Err(RcPrfError::InvalidTreeHeight {
                height,
                max: MAX_TREE_HEIGHT,
            });
        }
        let output_len = check_output_len(N)?;
        // Each output length gets its own tree under the master key.
        let root_prg = Prg::new(Prg::new(key).derive_key(output_len));
        debug!(tree_height = height, output_len = N, "rc-prf created");
        Ok(Self {
            tree_height: height,
            root_prg,
        })
    }

    /// Number of leaves in the domain.
    #[must_use]
    pub const fn leaf_count(&self) -> u64 {
        leaf_count(self.tree_height)
    }
}

impl<const N: usize> RangePrf<N> for RcPrf<N> {
    fn tree_height(&self) -> u8 {
        self.tree_height
    }

    fn range(&self) -> RcPrfRange {
        RcPrfRange::new_unchecked(0, self.leaf_count() - 1)
    }

    fn eval(&self, leaf: u64) -> Result<[u8; N], RcPrfError> {
        if leaf >= self.leaf_count() {
            return Err(RcPrfError::LeafOutOfRange {
                leaf,
                range: self.range(),
            });
        }
        if self.tree_height == 1 {
            // The root is the only leaf: its value is the left slot of its own stream.
            let mut out = [0u8; N];
            self.root_prg.derive(Child::Left.leaf_offset::<N>(), &mut out);
            return Ok(out);
        }
        Ok(derive_leaf::<N>(self.tree_height, &self.root_prg, 0, leaf))
    }

    fn constrain(&self, min: u64, max: u64) -> Result<ConstrainedRcPrf<N>, RcPrfError> {
        let target = RcPrfRange::new(min, max)?;
        let domain = self.leaf_count();
        if max >= domain {
            return Err(RcPrfError::RangeOutOfDomain {
                max,
                leaf_count: domain,
            });
        }

        let whole = Subtree {
            height: self.tree_height,
            min: 0,
            max: domain - 1,
        };
        let mut elements = Vec::new();
        generate_constrained_subkeys(
            self.tree_height,
            &self.root_prg,
            whole,
            target,
            &mut elements,
        )?;
        debug!(
            tree_height = self.tree_height,
            min,
            max,
            elements = elements.len(),
            "rc-prf constrained"
        );
        ConstrainedRcPrf::new(elements)
    }
}

impl<const N: usize> fmt::Debug for RcPrf<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RcPrf")
            .field("tree_height", &self.tree_height)
            .field("output_len", &N)
            .finish_non_exhaustive()
    }
}
