// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Treemap over a small population table.
//!
//! Lay out regions and countries, click a tile, grow it, and delete another.
//!
//! Run:
//! - `cargo run -p understory_demos --example treemap_population`

use kurbo::{Point, Rect};
use understory_treemap::{
    MissPolicy, PixelRect, RandomColours, Resize, Statistical, Subtree, Tree,
};

fn main() {
    // Populations in thousands.
    let table = Subtree::branch(
        "World",
        [
            Subtree::branch(
                "Asia",
                [
                    Subtree::leaf("India", 1_428_628),
                    Subtree::leaf("China", 1_425_671),
                    Subtree::leaf("Indonesia", 277_534),
                ],
            ),
            Subtree::branch(
                "Africa",
                [
                    Subtree::leaf("Nigeria", 223_805),
                    Subtree::leaf("Ethiopia", 126_527),
                ],
            ),
            Subtree::branch(
                "Americas",
                [
                    Subtree::leaf("United States", 339_997),
                    Subtree::leaf("Brazil", 216_422),
                ],
            ),
        ],
    );
    let mut tree = Tree::from_subtree(Statistical, RandomColours::seeded(2016), table)
        .expect("world population fits in a u64");
    let screen = PixelRect::new(0, 0, 1024, 570);

    let tiles = tree.layout(screen);
    for (i, tile) in tiles.iter().enumerate() {
        let leaf = tree.node_at_ordinal(i).unwrap();
        let kurbo_rect: Rect = tile.rect.into();
        println!(
            "{:>14}: {:?} colour {:?}",
            tree.label(leaf).unwrap_or("?"),
            kurbo_rect,
            tile.colour
        );
    }

    // Click somewhere in the top-left corner.
    let sel = tree
        .select(Point::new(20.0, 20.0), &tiles, MissPolicy::NoMatch)
        .expect("the tiles cover the screen");
    println!("selected: {}", sel.text);

    // Hold the up arrow for a few frames.
    for _ in 0..3 {
        tree.resize(sel.node, Resize::Grow).unwrap();
    }
    println!("after growing: {}", tree.selection_text(sel.node).unwrap());

    // Right-click near the bottom-right corner to delete that leaf.
    let tiles = tree.layout(screen);
    let gone = tree
        .delete_at(Point::new(1000.0, 560.0), &tiles, MissPolicy::NoMatch)
        .unwrap();
    println!("deleted {gone:?}; world is now {}", tree.size(tree.root()).unwrap());
    assert_eq!(tree.layout(screen).len(), tiles.len() - 1);
}
