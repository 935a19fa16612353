use crate::hash::{Algorithm, Checksum, Identity, Sha256d};
use crate::merkle::MerkleTree;
use crate::proof::{Proof, ProofPart};
use rand::prelude::*;

/// Drops the unprintable bytes of an identity checksum.
pub fn printable(c: &Checksum) -> String {
    c.as_bytes()
        .iter()
        .filter(|&&b| b > 31 && b < 128)
        .map(|&b| b as char)
        .collect()
}

pub fn identity_tree(blocks: &[&str]) -> MerkleTree<Identity> {
    MerkleTree::new(blocks).expect("failed to create identity tree")
}

pub fn sha256d_tree(leafs: usize) -> MerkleTree<Sha256d> {
    let mut x = Vec::with_capacity(leafs);
    for i in 0..leafs {
        x.push((i * 93).to_le_bytes());
    }
    MerkleTree::new(&x).expect("failed to create tree from slice")
}

/// Breaks either the target or one part of the proof.
pub fn modify_proof(proof: &mut Proof) {
    let mut rng = thread_rng();
    let i = rng.gen_range(0..=proof.len());
    let noise = Checksum::from(rng.gen::<u64>().to_le_bytes().to_vec());

    let mut target = proof.target().clone();
    let mut parts = proof.parts().to_vec();

    if i == parts.len() {
        target = Sha256d.node(&target, &noise);
    } else {
        let broken = ProofPart::new(Sha256d.node(parts[i].checksum(), &noise), parts[i].is_right());
        parts[i] = broken;
    }

    *proof = Proof::new(target, parts);
}
