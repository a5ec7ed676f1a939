//! Geometry of the implicit binary tree and root-to-leaf derivation.
//!
//! The root sits at depth 0 and the leaves at depth `tree_height - 1`, so a
//! tree of height `h` has `2^(h-1)` leaves. Nodes are never materialized: a
//! node is a [`Prg`] together with the leaf range it spans.

use crate::{constants::SATURATED_HEIGHT, prg::Prg};

/// Number of leaves of a tree of the given height.
///
/// Height 0 has no leaves; heights from 65 on saturate at `u64::MAX`.
#[must_use]
pub const fn leaf_count(height: u8) -> u64 {
    if height == 0 {
        return 0;
    }
    if height >= SATURATED_HEIGHT {
        return u64::MAX;
    }
    1u64 << (height - 1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub(crate) enum Child {
    Left = 0,
    Right = 1,
}

impl Child {
    /// Index used when deriving this child's key from its parent.
    pub(crate) const fn index(self) -> u16 {
        self as u16
    }

    /// Offset of this child's value in its parent's output stream.
    pub(crate) const fn leaf_offset<const N: usize>(self) -> u64 {
        (self as u64) * (N as u64)
    }
}

/// Direction taken at `node_depth` on the path to `leaf`.
///
/// The leaves' parents are at depth `tree_height - 2`, whose choice is bit 0.
pub(crate) const fn child_of(tree_height: u8, leaf: u64, node_depth: u8) -> Child {
    let mask = 1u64 << (tree_height - node_depth - 2);
    if leaf & mask == 0 {
        Child::Left
    } else {
        Child::Right
    }
}

/// Value of `leaf` below the node at `base_depth` represented by `base_prg`.
///
/// The node must be strictly above the leaf's level: `tree_height > base_depth + 1`.
pub(crate) fn derive_leaf<const N: usize>(
    tree_height: u8,
    base_prg: &Prg,
    base_depth: u8,
    leaf: u64,
) -> [u8; N] {
    debug_assert!(tree_height > base_depth + 1);
    let parent_depth = tree_height - 2;
    let mut out = [0u8; N];

    if base_depth == parent_depth {
        base_prg.derive(
            child_of(tree_height, leaf, base_depth).leaf_offset::<N>(),
            &mut out,
        );
        return out;
    }

    let first = child_of(tree_height, leaf, base_depth);
    let mut prg = Prg::new(base_prg.derive_key(first.index()));
    for depth in base_depth + 1..parent_depth {
        let child = child_of(tree_height, leaf, depth);
        prg = Prg::new(prg.derive_key(child.index()));
    }
    prg.derive(
        child_of(tree_height, leaf, parent_depth).leaf_offset::<N>(),
        &mut out,
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{constants::PRG_KEY_SIZE, key::Key};

    #[test]
    fn leaf_count_edges() {
        assert_eq!(leaf_count(0), 0);
        assert_eq!(leaf_count(1), 1);
        assert_eq!(leaf_count(4), 8);
        assert_eq!(leaf_count(64), 1 << 63);
        assert_eq!(leaf_count(65), u64::MAX);
        assert_eq!(leaf_count(200), u64::MAX);
    }

    #[test]
    fn child_follows_leaf_bits_from_the_top() {
        // height 4: leaf 5 = 0b101 -> right, left, right
        assert_eq!(child_of(4, 5, 0), Child::Right);
        assert_eq!(child_of(4, 5, 1), Child::Left);
        assert_eq!(child_of(4, 5, 2), Child::Right);
        assert_eq!(child_of(2, 0, 0), Child::Left);
        assert_eq!(child_of(2, 1, 0), Child::Right);
    }

    #[test]
    fn offsets_scale_with_output_length() {
        assert_eq!(Child::Left.leaf_offset::<16>(), 0);
        assert_eq!(Child::Right.leaf_offset::<16>(), 16);
        assert_eq!(Child::Right.leaf_offset::<32>(), 32);
    }

    #[test]
    fn derivation_from_inner_node_matches_root() {
        let root = Prg::new(Key::new([4u8; PRG_KEY_SIZE]));
        // height 4, leaf 6 = 0b110: root -> right child -> right child -> left leaf
        let from_root: [u8; 16] = derive_leaf(4, &root, 0, 6);
        let right = Prg::new(root.derive_key(Child::Right.index()));
        let from_depth_1: [u8; 16] = derive_leaf(4, &right, 1, 6);
        assert_eq!(from_root, from_depth_1);

        let right_right = Prg::new(right.derive_key(Child::Right.index()));
        let from_parent: [u8; 16] = derive_leaf(4, &right_right, 2, 6);
        assert_eq!(from_root, from_parent);

        let mut direct = [0u8; 16];
        right_right.derive(0, &mut direct);
        assert_eq!(from_root, direct);
    }

    #[test]
    fn siblings_share_one_parent_stream() {
        let parent = Prg::new(Key::new([8u8; PRG_KEY_SIZE]));
        let left: [u8; 16] = derive_leaf(2, &parent, 0, 0);
        let right: [u8; 16] = derive_leaf(2, &parent, 0, 1);
        let mut stream = [0u8; 32];
        parent.derive(0, &mut stream);
        assert_eq!(&stream[..16], &left);
        assert_eq!(&stream[16..], &right);
    }
}
