use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use merkle_audit::hash::Sha256d;
use merkle_audit::merkle::MerkleTree;

fn blocks(n: usize) -> Vec<Vec<u8>> {
    (0..n).map(|i| (i * 93).to_le_bytes().to_vec()).collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &n in &[16usize, 1024, 1025] {
        let data = blocks(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &data, |b, data| {
            b.iter(|| MerkleTree::<Sha256d>::new(black_box(data)).unwrap())
        });
    }
    group.finish();
}

fn bench_create_proof(c: &mut Criterion) {
    let data = blocks(1025);
    let tree: MerkleTree<Sha256d> = MerkleTree::new(&data).unwrap();
    let first = tree.leaf_checksum(&data[0]);
    let last = tree.leaf_checksum(&data[1024]);

    c.bench_function("create_proof first leaf", |b| {
        b.iter(|| tree.create_proof(black_box(&first)).unwrap())
    });
    c.bench_function("create_proof last leaf", |b| {
        b.iter(|| tree.create_proof(black_box(&last)).unwrap())
    });
    c.bench_function("create_proof_at last leaf", |b| {
        b.iter(|| tree.create_proof_at(black_box(1024)).unwrap())
    });
}

fn bench_verify_proof(c: &mut Criterion) {
    let data = blocks(1025);
    let tree: MerkleTree<Sha256d> = MerkleTree::new(&data).unwrap();
    let proof = tree.create_proof_at(517).unwrap();

    c.bench_function("verify_proof 1025 leafs", |b| {
        b.iter(|| assert!(tree.verify_proof(black_box(&proof))))
    });
}

criterion_group!(benches, bench_build, bench_create_proof, bench_verify_proof);
criterion_main!(benches);
