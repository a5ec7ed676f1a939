//! Range decomposition: covering a leaf range with the fewest tree nodes.
//!
//! Starting from a node, the procedure descends toward the requested range and
//! keeps, on each side of every split, the highest node whose leaves all lie in
//! the range. At most two nodes are kept per level, so a range of any width is
//! covered by `O(tree_height)` elements. A node whose subtree extends outside
//! the range is never emitted, only used to derive its children.

use tracing::trace;

use crate::{
    element::ConstrainedElement, errors::RcPrfError, prg::Prg, range::RcPrfRange, tree::Child,
};

/// A node given by its height and the leaves it spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subtree {
    pub height: u8,
    pub min: u64,
    pub max: u64,
}

impl Subtree {
    const fn mid(&self) -> u64 {
        self.min + (self.max - self.min) / 2
    }

    const fn left(&self) -> Self {
        Self {
            height: self.height - 1,
            min: self.min,
            max: self.mid(),
        }
    }

    const fn right(&self) -> Self {
        Self {
            height: self.height - 1,
            min: self.mid() + 1,
            max: self.max,
        }
    }
}

/// Leaf elements for every leaf of `target`, read from the parent's stream.
fn generate_leaves_from_parent<const N: usize>(
    tree_height: u8,
    parent_prg: &Prg,
    subtree: Subtree,
    target: RcPrfRange,
    out: &mut Vec<ConstrainedElement<N>>,
) -> Result<(), RcPrfError> {
    for leaf in target.min()..=target.max() {
        let child = if leaf == subtree.min {
            Child::Left
        } else {
            Child::Right
        };
        let mut value = [0u8; N];
        parent_prg.derive(child.leaf_offset::<N>(), &mut value);
        out.push(ConstrainedElement::leaf(value, tree_height, leaf)?);
    }
    Ok(())
}

/// Append to `out` the minimal set of elements covering `target` below the
/// node `subtree` represented by `base_prg`.
///
/// Requires `subtree.min <= target.min() <= target.max() <= subtree.max`.
pub fn generate_constrained_subkeys<const N: usize>(
    tree_height: u8,
    base_prg: &Prg,
    subtree: Subtree,
    target: RcPrfRange,
    out: &mut Vec<ConstrainedElement<N>>,
) -> Result<(), RcPrfError> {
    debug_assert!(subtree.min <= target.min() && target.max() <= subtree.max);

    if subtree.height <= 2 {
        return generate_leaves_from_parent(tree_height, base_prg, subtree, target, out);
    }

    let mid = subtree.mid();
    let (min, max) = (target.min(), target.max());

    if min <= mid {
        let left = subtree.left();
        let subkey = base_prg.derive_key(Child::Left.index());
        if min == left.min && max >= left.max {
            trace!(
                height = left.height,
                min = left.min,
                max = left.max,
                "keep left node"
            );
            out.push(ConstrainedElement::inner(
                subkey,
                tree_height,
                left.height,
                left.min,
                left.max,
            )?);
        } else {
            generate_constrained_subkeys(
                tree_height,
                &Prg::new(subkey),
                left,
                RcPrfRange::new_unchecked(min, max.min(left.max)),
                out,
            )?;
        }
    }

    if max > mid {
        let right = subtree.right();
        let subkey = base_prg.derive_key(Child::Right.index());
        if min <= right.min && max == right.max {
            trace!(
                height = right.height,
                min = right.min,
                max = right.max,
                "keep right node"
            );
            out.push(ConstrainedElement::inner(
                subkey,
                tree_height,
                right.height,
                right.min,
                right.max,
            )?);
        } else {
            generate_constrained_subkeys(
                tree_height,
                &Prg::new(subkey),
                right,
                RcPrfRange::new_unchecked(min.max(right.min), max),
                out,
            )?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{constants::PRG_KEY_SIZE, key::Key, tree::derive_leaf};

    fn decompose(height: u8, min: u64, max: u64) -> (Prg, Vec<ConstrainedElement<16>>) {
        let root = Prg::new(Key::new([0x11u8; PRG_KEY_SIZE]));
        let whole = Subtree {
            height,
            min: 0,
            max: (1u64 << (height - 1)) - 1,
        };
        let target = RcPrfRange::new(min, max).unwrap();
        let mut out = Vec::new();
        generate_constrained_subkeys(height, &root, whole, target, &mut out).unwrap();
        (root, out)
    }

    fn spans(elements: &[ConstrainedElement<16>]) -> Vec<(u64, u64, bool)> {
        let mut v: Vec<_> = elements
            .iter()
            .map(|e| (e.min_leaf(), e.max_leaf(), e.is_leaf()))
            .collect();
        v.sort_unstable();
        v
    }

    #[test]
    fn keeps_highest_nodes_inside_range() {
        // 8 leaves, [2, 5] -> {2,3} and {4,5}
        let (_, out) = decompose(4, 2, 5);
        assert_eq!(spans(&out), vec![(2, 3, false), (4, 5, false)]);

        // [1, 6] -> 1, {2,3}, {4,5}, 6
        let (_, out) = decompose(4, 1, 6);
        assert_eq!(
            spans(&out),
            vec![(1, 1, true), (2, 3, false), (4, 5, false), (6, 6, true)]
        );
    }

    #[test]
    fn whole_tree_is_split_at_the_root() {
        let (_, out) = decompose(4, 0, 7);
        assert_eq!(spans(&out), vec![(0, 3, false), (4, 7, false)]);
    }

    #[test]
    fn two_leaf_tree_yields_leaves() {
        let (_, out) = decompose(2, 0, 1);
        assert_eq!(spans(&out), vec![(0, 0, true), (1, 1, true)]);
        let (_, out) = decompose(1, 0, 0);
        assert_eq!(spans(&out), vec![(0, 0, true)]);
    }

    #[test]
    fn elements_agree_with_root_derivation() {
        let (root, out) = decompose(6, 3, 29);
        let mut covered = 0u64;
        for e in &out {
            for leaf in e.min_leaf()..=e.max_leaf() {
                let expected: [u8; 16] = derive_leaf(6, &root, 0, leaf);
                assert_eq!(e.eval(leaf).unwrap(), expected, "leaf {leaf}");
                covered += 1;
            }
        }
        assert_eq!(covered, 27);
    }

    #[test]
    fn element_count_is_logarithmic() {
        let (_, out) = decompose(20, 1, (1 << 19) - 2);
        assert!(out.len() <= 2 * 20);
        assert_eq!(out.len(), 2 * 18);
    }
}
