#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

//! Range-constrained pseudo-random functions (RC-PRF).
//!
//! An [`RcPrf`] maps the leaves of an implicit binary tree to `N`-byte
//! pseudo-random values. From it one can derive a [`ConstrainedRcPrf`] that
//! evaluates the same function, but only on a contiguous range of leaves: the
//! constrained key is made of the tree nodes covering that range and nothing
//! above them, so values outside the range cannot be recomputed from it.
//
// Construction:
// - every node is a 32-byte key; a child's key is derived from its parent's
// - the two leaves below a node are read from that node's output stream at
//   offsets 0 and N
// - keyed BLAKE3 (XOF for output streams, hash for child keys)
// - constraining keeps at most two nodes per level

pub mod constants;
pub mod constrained;
mod decompose;
pub mod element;
pub mod errors;
pub mod key;
pub mod prg;
pub mod range;
pub mod rcprf;
pub mod traits;
pub mod tree;

pub use constrained::ConstrainedRcPrf;
pub use element::ConstrainedElement;
pub use errors::RcPrfError;
pub use key::Key;
pub use prg::Prg;
pub use range::RcPrfRange;
pub use rcprf::RcPrf;
pub use traits::RangePrf;
pub use tree::leaf_count;

/// RC-PRF with 16-byte outputs.
pub type RcPrf16 = RcPrf<16>;
/// RC-PRF with 32-byte outputs.
pub type RcPrf32 = RcPrf<32>;
/// Constrained RC-PRF with 16-byte outputs.
pub type ConstrainedRcPrf16 = ConstrainedRcPrf<16>;
/// Constrained RC-PRF with 32-byte outputs.
pub type ConstrainedRcPrf32 = ConstrainedRcPrf<32>;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
