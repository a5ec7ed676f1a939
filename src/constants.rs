#![forbid(unsafe_code)]

/// Size in bytes of the keys used for tree derivation.
pub const PRG_KEY_SIZE: usize = 32;

/// Largest supported tree height: a tree of height 64 has 2^63 leaves.
pub const MAX_TREE_HEIGHT: u8 = 64;

/// Sentinel height past which `leaf_count` saturates.
pub const SATURATED_HEIGHT: u8 = MAX_TREE_HEIGHT + 1;

/// Cap on the number of leaves a single `eval_range` call may produce.
pub const MAX_EVAL_RANGE_WIDTH: u64 = 1 << 24;

pub const TAG_PRG_DERIVE: &str = "rcprf.prg.derive";
pub const TAG_PRG_KEY: &str = "rcprf.prg.key";
