//! Balanced binary _Merkle Tree_ with audit proofs.
//!
//! The tree is built row by row from an ordered list of data blocks. Every
//! row that has an odd number of nodes is padded with a copy of its last
//! node before the nodes are paired, so the tree stays strictly binary for
//! any number of blocks:
//!
//! ```text
//!               root = h(h12 + h33)
//!              /                    \
//!     h12 = h(h1 + h2)        h33 = h(h3 + h3')
//!      /          \            /          \
//!  h1 = L(b1)  h2 = L(b2)  h3 = L(b3)  h3' = copy of h3
//! ```
//!
//! Leaf and interior digests are domain separated, the same way as
//! _Certificate Transparency_ [RFC 6962](https://tools.ietf.org/html/rfc6962)
//! does it:
//!
//! ```text
//! L(b)    = ALG(0x00 || b)
//! N(l, r) = ALG(0x01 || l || r)
//! ```
//!
//! Without the prefixes a leaf whose data is `h1 || h2` would hash to the
//! same value as the interior node over `h1` and `h2`, and two differently
//! shaped trees could share a root.
//!
//! # Interface
//!
//! ```text
//! - from_blocks (algorithm, blocks) -> tree
//! - root -> checksum
//! - create_proof (leaf checksum) -> proof
//! - verify_proof (proof) -> bool
//! ```
//!
//! # Quick start
//!
//! ```
//! use merkle_audit::hash::Sha256d;
//! use merkle_audit::merkle::MerkleTree;
//!
//! let tree: MerkleTree<Sha256d> = MerkleTree::new(&["alpha", "beta", "kappa"]).unwrap();
//!
//! let target = tree.leaf_checksum("beta");
//! let proof = tree.create_proof(&target).unwrap();
//! assert!(tree.verify_proof(&proof));
//! ```

#![deny(
    missing_docs,
    unused_qualifications,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces
)]

/// Error type shared by the crate.
pub mod error;

/// Checksum values and the checksum algorithms the tree is built with.
pub mod hash;

/// Merkle tree audit proof.
pub mod proof;

/// Merkle tree construction and proof generation.
pub mod merkle;

pub use crate::error::{Error, Result};

/// Shared fixtures for unit tests.
#[cfg(test)]
mod test_common;
