// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use understory_treemap::{FileSystem, PixelRect, RandomColours, Resize, Subtree, Tree};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
}

fn gen_tree(rng: &mut Rng, depth: u32) -> Subtree {
    if depth == 0 {
        return Subtree::leaf("file", 100 + rng.next_u64() % 100_000);
    }
    let n = 1 + rng.next_u64() % 8;
    Subtree::branch("dir", (0..n).map(|_| gen_tree(rng, depth - 1)).collect::<Vec<_>>())
}

fn build(seed: u64) -> Tree<FileSystem> {
    let mut rng = Rng::new(seed);
    Tree::from_subtree(FileSystem, RandomColours::seeded(seed), gen_tree(&mut rng, 4))
        .expect("bench sizes are small")
}

fn bench_delete(c: &mut Criterion) {
    let mut group = c.benchmark_group("edits");
    let base = build(0xC1A5_7E55_9999_ABCD);
    let leaves: Vec<_> = base.leaves().collect();
    group.bench_function("delete_every_leaf", |b| {
        b.iter_batched(
            || build(0xC1A5_7E55_9999_ABCD),
            |mut tree| {
                for &leaf in &leaves {
                    let _ = black_box(tree.delete(leaf));
                }
                tree
            },
            BatchSize::SmallInput,
        );
    });
    group.bench_function("resize_then_layout", |b| {
        b.iter_batched(
            || build(0xC1A5_7E55_9999_ABCD),
            |mut tree| {
                for (i, &leaf) in leaves.iter().enumerate() {
                    let dir = if i % 2 == 0 { Resize::Grow } else { Resize::Shrink };
                    let _ = black_box(tree.resize(leaf, dir));
                }
                black_box(tree.layout(PixelRect::new(0, 0, 1024, 738)))
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_delete);
criterion_main!(benches);
