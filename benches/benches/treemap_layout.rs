// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;
use understory_treemap::{
    FileSystem, MissPolicy, PixelRect, RandomColours, Subtree, Tree, pick_ordinal,
};

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
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// A directory-like tree: `fanout` children per branch, `depth` levels, skewed leaf sizes.
fn gen_tree(rng: &mut Rng, depth: u32, fanout: u64) -> Subtree {
    if depth == 0 {
        // Long tail, like file sizes.
        let size = 1 + (rng.next_f64().powi(4) * 1_000_000.0) as u64;
        return Subtree::leaf("file", size);
    }
    let n = 1 + rng.next_u64() % fanout;
    Subtree::branch("dir", (0..n).map(|_| gen_tree(rng, depth - 1, fanout)).collect::<Vec<_>>())
}

fn build(seed: u64, depth: u32, fanout: u64) -> Tree<FileSystem> {
    let mut rng = Rng::new(seed);
    let subtree = gen_tree(&mut rng, depth, fanout);
    Tree::from_subtree(FileSystem, RandomColours::seeded(seed), subtree)
        .expect("bench sizes are small")
}

const SCREEN: PixelRect = PixelRect::new(0, 0, 1024, 738);

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    for &(depth, fanout) in &[(3_u32, 8_u64), (4, 8), (5, 8)] {
        let tree = build(0xCAFE_F00D_DEAD_BEEF, depth, fanout);
        let leaves = tree.leaf_count(tree.root());
        group.throughput(Throughput::Elements(leaves as u64));
        group.bench_function(format!("depth{depth}_fanout{fanout}"), |b| {
            b.iter(|| black_box(tree.layout(black_box(SCREEN))));
        });
    }
    group.finish();
}

fn bench_pick(c: &mut Criterion) {
    let mut group = c.benchmark_group("pick");
    let tree = build(0xBADC_F00D_1234_5678, 4, 8);
    let tiles = tree.layout(SCREEN);
    let mut rng = Rng::new(0xFACE_FEED_CAFE_BABE);
    let points: Vec<Point> = (0..256)
        .map(|_| Point::new(rng.next_f64() * 1024.0, rng.next_f64() * 738.0))
        .collect();
    group.throughput(Throughput::Elements(points.len() as u64));
    group.bench_function("pick_ordinal", |b| {
        b.iter(|| {
            for &pt in &points {
                black_box(pick_ordinal(pt, &tiles, MissPolicy::NoMatch));
            }
        });
    });
    group.bench_function("select", |b| {
        b.iter(|| {
            for &pt in &points {
                black_box(tree.select(pt, &tiles, MissPolicy::NoMatch));
            }
        });
    });
    group.bench_function("node_at_ordinal", |b| {
        b.iter(|| {
            for i in 0..tiles.len() {
                black_box(tree.node_at_ordinal(i));
            }
        });
    });
    group.finish();
}

criterion_group!(benches, bench_layout, bench_pick);
criterion_main!(benches);
