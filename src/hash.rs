//! Checksum infrastructure for Merkle Tree nodes.

use ring::digest::{Context, SHA256};
use std::fmt;

/// Digest of a tree node.
///
/// Checksums are opaque byte strings compared by exact byte match. Their
/// length is whatever the [`Algorithm`] that produced them returns.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Checksum(Vec<u8>);

impl Checksum {
    /// Wraps raw digest bytes.
    pub fn new(bytes: Vec<u8>) -> Checksum {
        Checksum(bytes)
    }

    /// Returns the digest bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the digest length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for a zero length digest.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the checksum, returning its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Returns `self || other` as a fresh buffer.
    pub fn concat(&self, other: &Checksum) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.len() + other.len());
        buf.extend_from_slice(&self.0);
        buf.extend_from_slice(&other.0);
        buf
    }
}

impl AsRef<[u8]> for Checksum {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Checksum {
    fn from(bytes: Vec<u8>) -> Self {
        Checksum(bytes)
    }
}

impl From<&[u8]> for Checksum {
    fn from(bytes: &[u8]) -> Self {
        Checksum(bytes.to_vec())
    }
}

impl fmt::LowerHex for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        for b in &self.0 {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Checksum({:x})", self)
    }
}

/// Checksum algorithm the tree is built with.
///
/// An algorithm is a deterministic function of a role flag and a byte
/// string. Implementations used outside of tests must keep leaf and
/// interior digests apart: no leaf input may produce the digest of any
/// interior input. Prefixing the data with [`Algorithm::LEAF`] or
/// [`Algorithm::INTERIOR`] before hashing is the usual way to get there.
pub trait Algorithm {
    /// MT leaf hash prefix
    const LEAF: u8 = 0x00;

    /// MT interior node hash prefix
    const INTERIOR: u8 = 0x01;

    /// Returns the digest of `data` in the leaf (`is_leaf`) or interior role.
    fn checksum(&self, is_leaf: bool, data: &[u8]) -> Checksum;

    /// Returns the digest for MT leaf over block data.
    fn leaf(&self, block: &[u8]) -> Checksum {
        self.checksum(true, block)
    }

    /// Returns the digest for MT interior node, `left || right`.
    fn node(&self, left: &Checksum, right: &Checksum) -> Checksum {
        self.checksum(false, &left.concat(right))
    }
}

/// Double SHA-256 over the role prefixed data.
///
/// ```text
/// L(b)    = SHA256(SHA256(0x00 || b))
/// N(l, r) = SHA256(SHA256(0x01 || l || r))
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha256d;

impl Sha256d {
    /// Creates the algorithm.
    pub fn new() -> Sha256d {
        Sha256d
    }
}

impl Algorithm for Sha256d {
    fn checksum(&self, is_leaf: bool, data: &[u8]) -> Checksum {
        let prefix = if is_leaf { Self::LEAF } else { Self::INTERIOR };

        let mut c = Context::new(&SHA256);
        c.update(&[prefix]);
        c.update(data);
        let h1 = c.finish();

        // double sha256
        let mut c = Context::new(&SHA256);
        c.update(h1.as_ref());
        Checksum::from(c.finish().as_ref())
    }
}

/// Identity algorithm: the checksum is the data itself.
///
/// Leafs keep their block bytes and interior nodes the concatenation of
/// their children, so the tree can be read back as plain text. The role
/// flag is ignored, hence there is no domain separation and no security
/// whatsoever. Compiled for unit tests and behind the `insecure-identity`
/// feature only.
#[cfg(any(test, feature = "insecure-identity"))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

#[cfg(any(test, feature = "insecure-identity"))]
impl Algorithm for Identity {
    fn checksum(&self, _is_leaf: bool, data: &[u8]) -> Checksum {
        Checksum::from(data)
    }
}
