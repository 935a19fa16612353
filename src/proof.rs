use std::fmt;

use crate::hash::{Algorithm, Checksum};
use crate::merkle::short_hex;

/// Sibling met on the way from a leaf to the root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProofPart {
    checksum: Checksum,
    is_right: bool,
}

impl ProofPart {
    /// Creates new proof part. `is_right` tells that the sibling sits to
    /// the right of the path node.
    pub fn new(checksum: Checksum, is_right: bool) -> ProofPart {
        ProofPart { checksum, is_right }
    }

    /// Returns the sibling checksum.
    pub fn checksum(&self) -> &Checksum {
        &self.checksum
    }

    /// Returns `true` if the sibling is the right hand child.
    pub fn is_right(&self) -> bool {
        self.is_right
    }
}

/// Merkle tree audit proof for a leaf, for which target = Leaf(Block).
///
/// Parts layout, leaf to root:
///
/// ```text
/// [ sibling(leaf) sibling(parent) ... sibling(child of root) ]
/// ```
///
/// Proof validation folds the target with each sibling on its side and
/// matches the result against a root. A proof carries no reference to the
/// tree it came from and can be checked against any published root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Proof {
    target: Checksum,
    parts: Vec<ProofPart>,
}

impl Proof {
    /// Creates new MT audit proof
    pub fn new(target: Checksum, parts: Vec<ProofPart>) -> Proof {
        Proof { target, parts }
    }

    /// Return proof target leaf
    pub fn target(&self) -> &Checksum {
        &self.target
    }

    /// Returns the parts of this proof, leaf to root.
    pub fn parts(&self) -> &[ProofPart] {
        &self.parts
    }

    /// Returns the number of parts.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns `true` for the proof of a single block tree.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Recomputes the root the proof leads to.
    pub fn compute_root<A: Algorithm>(&self, alg: &A) -> Checksum {
        self.parts.iter().fold(self.target.clone(), |h, part| {
            if part.is_right {
                alg.node(&h, &part.checksum)
            } else {
                alg.node(&part.checksum, &h)
            }
        })
    }

    /// Verifies MT audit proof against `root`.
    pub fn validate<A: Algorithm>(&self, alg: &A, root: &Checksum) -> bool {
        self.compute_root(alg) == *root
    }

    /// Renders the route from the target leaf to the root, one hashing step
    /// per line, each checksum passed through `project`.
    ///
    /// ```text
    /// route from h3 (leaf) to root:
    ///
    /// h3 + h4 = h34
    /// h12 + h34 = h1234
    /// ```
    pub fn render<A: Algorithm, F: Fn(&Checksum) -> String>(&self, alg: &A, project: F) -> String {
        let mut out = format!("route from {} (leaf) to root:\n\n", project(&self.target));

        let mut h = self.target.clone();
        for part in &self.parts {
            let (left, right) = if part.is_right {
                (&h, &part.checksum)
            } else {
                (&part.checksum, &h)
            };
            let parent = alg.node(left, right);
            out.push_str(&format!(
                "{} + {} = {}\n",
                project(left),
                project(right),
                project(&parent)
            ));
            h = parent;
        }

        out
    }
}

impl fmt::Display for Proof {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "proof for {}:", short_hex(&self.target))?;
        for part in &self.parts {
            let side = if part.is_right { "right" } else { "left" };
            writeln!(f, "  {} {}", side, short_hex(&part.checksum))?;
        }
        Ok(())
    }
}
