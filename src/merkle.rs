use std::fmt;

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::hash::{Algorithm, Checksum};
use crate::proof::{Proof, ProofPart};

/// Node of a Merkle Tree row.
///
/// A branch refers to its two children by their positions in the row
/// directly beneath it. Padding copies are separate `Node` values that
/// happen to repeat the checksum (and children) of the node they copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Leaf over the digest of an input block.
    Leaf {
        /// `ALG.leaf(block)`
        checksum: Checksum,
    },
    /// Interior node over two children.
    Branch {
        /// `ALG.node(left, right)`
        checksum: Checksum,
        /// Position of the left child in the row below.
        left: usize,
        /// Position of the right child in the row below.
        right: usize,
    },
}

impl Node {
    /// Returns the cached checksum of the node.
    pub fn checksum(&self) -> &Checksum {
        match self {
            Node::Leaf { checksum } | Node::Branch { checksum, .. } => checksum,
        }
    }

    /// Returns `true` for a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// Merkle Tree.
///
/// Nodes are kept row by row, leafs first:
///
/// ```text
///         root = h1234 = h(h12 + h34)
///        /                           \
///  h12 = h(h1 + h2)            h34 = h(h3 + h4)
///   /            \              /            \
/// h1 = h(tx1)  h2 = h(tx2)    h3 = h(tx3)  h4 = h(tx4)
/// ```
///
/// In memory layout:
///
/// ```text
///     [[h1 h2 h3 h4] [h12 h34] [root]]
/// ```
///
/// The number of inputs is not always a power of two. A row with an odd
/// number of nodes gets a copy of its last node appended before pairing,
/// so parent nodes with a single left child are calculated by hashing the
/// child together with its copy. With a single block the leaf row is the
/// only row and the leaf itself is the root.
///
/// The tree is immutable once built and can be shared between threads for
/// concurrent proof generation and verification.
#[derive(Debug, Clone)]
pub struct MerkleTree<A: Algorithm> {
    rows: Vec<Vec<Node>>,
    leafs: usize,
    alg: A,
}

impl<A: Algorithm + Default> MerkleTree<A> {
    /// Creates new merkle tree from a list of blocks using the default
    /// instance of the algorithm.
    pub fn new<B: AsRef<[u8]>, I: IntoIterator<Item = B>>(blocks: I) -> Result<MerkleTree<A>> {
        Self::from_blocks(A::default(), blocks)
    }
}

impl<A: Algorithm> MerkleTree<A> {
    /// Creates new merkle tree from a list of blocks.
    ///
    /// Fails with [`Error::EmptyTree`] when `blocks` yields nothing.
    pub fn from_blocks<B: AsRef<[u8]>, I: IntoIterator<Item = B>>(
        alg: A,
        blocks: I,
    ) -> Result<MerkleTree<A>> {
        let row: Vec<Node> = blocks
            .into_iter()
            .map(|block| Node::Leaf {
                checksum: alg.leaf(block.as_ref()),
            })
            .collect();

        if row.is_empty() {
            return Err(Error::EmptyTree);
        }

        Ok(Self::build(alg, row))
    }

    fn build(alg: A, mut row: Vec<Node>) -> MerkleTree<A> {
        let leafs = row.len();
        let height = get_tree_height(leafs);
        let mut rows: Vec<Vec<Node>> = Vec::with_capacity(height);

        while row.len() > 1 {
            if row.len() & 1 == 1 {
                // Odd number of nodes, duplicate last.
                let last = row[row.len() - 1].clone();
                row.push(last);
            }

            let next: Vec<Node> = row
                .chunks(2)
                .enumerate()
                .map(|(i, pair)| Node::Branch {
                    checksum: alg.node(pair[0].checksum(), pair[1].checksum()),
                    left: 2 * i,
                    right: 2 * i + 1,
                })
                .collect();

            rows.push(row);
            row = next;
        }
        rows.push(row);

        debug_assert_eq!(rows.len(), height);

        let tree = MerkleTree { rows, leafs, alg };
        debug!(
            "leafs {}, padded leafs {}, height {}, root {:x}",
            tree.leafs,
            tree.rows[0].len(),
            tree.height(),
            tree.root()
        );
        tree
    }

    /// Generates the audit proof for the leaf with checksum `target`.
    ///
    /// Only the leaf row is searched; interior nodes are never proven. If
    /// several blocks share the checksum the leftmost leaf is used.
    pub fn create_proof(&self, target: &Checksum) -> Result<Proof> {
        match self.rows[0][..self.leafs]
            .iter()
            .position(|node| node.checksum() == target)
        {
            Some(i) => Ok(self.gen_proof(i)),
            None => {
                debug!("proof target {:x} is not a leaf", target);
                Err(Error::NotFound(target.clone()))
            }
        }
    }

    /// Generates the audit proof for the leaf at position `i`.
    pub fn create_proof_at(&self, i: usize) -> Result<Proof> {
        if i >= self.leafs {
            return Err(Error::IndexOutOfBounds {
                index: i,
                leafs: self.leafs,
            });
        }

        Ok(self.gen_proof(i))
    }

    fn gen_proof(&self, i: usize) -> Proof {
        let mut parts = Vec::with_capacity(self.height() - 1);
        let mut j = i;

        // every row below the root was padded to an even width
        for row in &self.rows[..self.rows.len() - 1] {
            let sibling = if j & 1 == 1 { j - 1 } else { j + 1 };
            parts.push(ProofPart::new(row[sibling].checksum().clone(), sibling > j));
            j >>= 1;
        }

        trace!("proof for leaf {} of {} has {} parts", i, self.leafs, parts.len());
        Proof::new(self.rows[0][i].checksum().clone(), parts)
    }

    /// Verifies an audit proof against the root of this tree.
    ///
    /// Never fails: a malformed or forged proof simply yields `false`.
    pub fn verify_proof(&self, proof: &Proof) -> bool {
        proof.validate(&self.alg, self.root())
    }

    /// Verifies an audit proof and that `block` is the data it was
    /// generated for.
    pub fn verify_block<B: AsRef<[u8]>>(&self, block: B, proof: &Proof) -> bool {
        *proof.target() == self.leaf_checksum(block) && self.verify_proof(proof)
    }

    /// Returns the leaf checksum of `block` under the tree's algorithm.
    pub fn leaf_checksum<B: AsRef<[u8]>>(&self, block: B) -> Checksum {
        self.alg.leaf(block.as_ref())
    }

    /// Returns merkle root
    pub fn root(&self) -> &Checksum {
        self.rows[self.rows.len() - 1][0].checksum()
    }

    /// Returns original number of blocks the tree was built upon.
    pub fn leafs(&self) -> usize {
        self.leafs
    }

    /// Returns the number of rows, root row included.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Returns the rows, leafs first. Padding copies are included.
    pub fn rows(&self) -> &[Vec<Node>] {
        &self.rows
    }

    /// Returns the algorithm the tree was built with.
    pub fn algorithm(&self) -> &A {
        &self.alg
    }

    /// Renders the tree as nested parenthesized nodes, root first, each
    /// checksum passed through `project`.
    ///
    /// ```text
    /// (B root: h12
    ///   (L root: h1)
    ///   (L root: h2))
    /// ```
    pub fn render<F: Fn(&Checksum) -> String>(&self, project: F) -> String {
        let mut out = String::new();
        self.render_node(self.rows.len() - 1, 0, 0, &project, &mut out);
        out
    }

    fn render_node<F: Fn(&Checksum) -> String>(
        &self,
        row: usize,
        i: usize,
        depth: usize,
        project: &F,
        out: &mut String,
    ) {
        let pad = "  ".repeat(depth);
        match &self.rows[row][i] {
            Node::Leaf { checksum } => {
                out.push_str(&format!("{}(L root: {})", pad, project(checksum)));
            }
            Node::Branch {
                checksum,
                left,
                right,
            } => {
                out.push_str(&format!("{}(B root: {}\n", pad, project(checksum)));
                self.render_node(row - 1, *left, depth + 1, project, out);
                out.push('\n');
                self.render_node(row - 1, *right, depth + 1, project, out);
                out.push(')');
            }
        }
    }
}

impl<A: Algorithm> fmt::Display for MerkleTree<A> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.render(short_hex))
    }
}

/// First 8 bytes of a checksum in hex.
pub(crate) fn short_hex(c: &Checksum) -> String {
    let mut s = format!("{:x}", c);
    s.truncate(16);
    s
}

/// Returns the number of rows of a tree over `leafs` blocks.
pub fn get_tree_height(leafs: usize) -> usize {
    log2_pow2(leafs.next_power_of_two()) + 1
}

/// find power of 2 of a number which is power of 2
pub fn log2_pow2(n: usize) -> usize {
    n.trailing_zeros() as usize
}
