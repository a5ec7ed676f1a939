use tracing::debug;

use crate::{
    element::ConstrainedElement, errors::RcPrfError, prg::check_output_len, range::RcPrfRange,
    traits::RangePrf,
};

/// RC-PRF key restricted to a contiguous range of leaves.
///
/// Holds a non-empty set of elements, sorted by their first leaf, whose spans
/// follow each other without gap or overlap.
#[derive(Debug)]
pub struct ConstrainedRcPrf<const N: usize> {
    tree_height: u8,
    elements: Vec<ConstrainedElement<N>>,
}

impl<const N: usize> ConstrainedRcPrf<N> {
    /// Assemble a constrained key from its elements, in any order.
    ///
    /// # Errors
    ///
    /// Fails if `N` is not a valid output length, or if `elements` is empty,
    /// mixes tree heights, or does not cover a contiguous range exactly once.
    pub fn new(mut elements: Vec<ConstrainedElement<N>>) -> Result<Self, RcPrfError> {
        check_output_len(N)?;
        let tree_height = elements
            .first()
            .ok_or(RcPrfError::EmptyElements)?
            .tree_height();
        if let Some(odd) = elements.iter().find(|e| e.tree_height() != tree_height) {
            return Err(RcPrfError::InconsistentTreeHeights {
                expected: tree_height,
                got: odd.tree_height(),
            });
        }

        elements.sort_unstable_by_key(ConstrainedElement::min_leaf);
        for pair in elements.windows(2) {
            if pair[0].max_leaf() + 1 != pair[1].min_leaf() {
                return Err(RcPrfError::NonConsecutiveElements {
                    previous_max: pair[0].max_leaf(),
                    next_min: pair[1].min_leaf(),
                });
            }
        }

        debug!(
            tree_height,
            elements = elements.len(),
            "constrained rc-prf assembled"
        );
        Ok(Self {
            tree_height,
            elements,
        })
    }

    #[must_use]
    pub fn elements(&self) -> &[ConstrainedElement<N>] {
        &self.elements
    }

    #[must_use]
    pub const fn element_count(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn min_leaf(&self) -> u64 {
        self.elements[0].min_leaf()
    }

    #[must_use]
    pub fn max_leaf(&self) -> u64 {
        self.elements[self.elements.len() - 1].max_leaf()
    }

    fn owner_of(&self, leaf: u64) -> &ConstrainedElement<N> {
        let idx = self.elements.partition_point(|e| e.max_leaf() < leaf);
        match self.elements.get(idx) {
            Some(e) if e.min_leaf() <= leaf => e,
            _ => unreachable!("no element owns leaf {leaf} inside {}", self.range()),
        }
    }
}

impl<const N: usize> RangePrf<N> for ConstrainedRcPrf<N> {
    fn tree_height(&self) -> u8 {
        self.tree_height
    }

    fn range(&self) -> RcPrfRange {
        RcPrfRange::new_unchecked(self.min_leaf(), self.max_leaf())
    }

    fn eval(&self, leaf: u64) -> Result<[u8; N], RcPrfError> {
        let range = self.range();
        if !range.contains_leaf(leaf) {
            return Err(RcPrfError::LeafOutOfRange { leaf, range });
        }
        self.owner_of(leaf).eval(leaf)
    }

    fn constrain(&self, min: u64, max: u64) -> Result<Self, RcPrfError> {
        let requested = RcPrfRange::new(min, max)?;
        let available = self.range();
        if !available.contains_range(&requested) {
            return Err(RcPrfError::RangeNotContained {
                requested,
                available,
            });
        }

        let mut out = Vec::new();
        for element in &self.elements {
            if let Some(part) = element.range().intersection(&requested) {
                element.constrain_into(&part, &mut out)?;
            }
        }
        debug!(
            tree_height = self.tree_height,
            min,
            max,
            elements = out.len(),
            "constrained rc-prf narrowed"
        );
        Self::new(out)
    }
}
