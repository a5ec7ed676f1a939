use thiserror::Error;

use crate::range::RcPrfRange;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RcPrfError {
    #[error("invalid tree height: {height} not in [1, {max}]")]
    InvalidTreeHeight { height: u8, max: u8 },

    #[error("invalid subtree height: {subtree_height} for a tree of height {tree_height}")]
    InvalidSubtreeHeight { subtree_height: u8, tree_height: u8 },

    #[error("invalid range: min {min} is larger than max {max}")]
    InvalidRange { min: u64, max: u64 },

    #[error("range width mismatch: [{min}, {max}] should span {expected} leaves")]
    RangeWidthMismatch { min: u64, max: u64, expected: u64 },

    #[error("misaligned subtree: min {min} is not a multiple of the width {width}")]
    MisalignedSubtree { min: u64, width: u64 },

    #[error("range maximum {max} out of domain: must be < {leaf_count}")]
    RangeOutOfDomain { max: u64, leaf_count: u64 },

    #[error("empty constrained element collection")]
    EmptyElements,

    #[error("inconsistent tree heights: expected {expected} got {got}")]
    InconsistentTreeHeights { expected: u8, got: u8 },

    #[error("non consecutive elements: {previous_max} is followed by {next_min}")]
    NonConsecutiveElements { previous_max: u64, next_min: u64 },

    #[error("leaf {leaf} out of range {range}")]
    LeafOutOfRange { leaf: u64, range: RcPrfRange },

    #[error("range {requested} not contained in {available}")]
    RangeNotContained {
        requested: RcPrfRange,
        available: RcPrfRange,
    },

    #[error("range too wide: {width} leaves exceeds the cap of {max}")]
    RangeTooWide { width: u64, max: u64 },

    #[error("invalid key length: expected {expected} got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    #[error("invalid output length: {0} bytes")]
    InvalidOutputLength(usize),
}
