use crate::hash::Checksum;
use thiserror::Error;

/// Result alias used by the fallible tree operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by tree construction and proof generation.
///
/// Proof verification never fails, it answers `false` instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// No leaf of the tree carries the requested checksum.
    #[error("no leaf with checksum {0:x} in the tree")]
    NotFound(Checksum),

    /// A tree was requested over an empty block list.
    #[error("must have at least 1 block to build a tree")]
    EmptyTree,

    /// A leaf position past the end of the leaf row was requested.
    #[error("{index} is out of bounds (max: {leafs})")]
    IndexOutOfBounds {
        /// Requested leaf position.
        index: usize,
        /// Number of leafs in the tree.
        leafs: usize,
    },
}
