// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle partitioning: turns node sizes into a sequence of [`Tile`]s.
//!
//! Each branch splits its rectangle along the longer side: columns when the
//! rectangle is wider than tall, rows otherwise. The choice is made afresh at
//! every level. A child's share of the split axis is its fraction of the parent's
//! size times the axis length, truncated toward zero. The final child instead gets
//! whatever is left up to the parent's far edge, so the shares always add up to
//! the full axis.

use alloc::vec::Vec;
use log::trace;

use crate::tree::Tree;
use crate::types::{NodeId, PixelRect, Tile};

/// Axis along which a branch divides its rectangle.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Split {
    /// Children are laid out left to right, sharing the width.
    Columns,
    /// Children are stacked top to bottom, sharing the height.
    Rows,
}

impl Split {
    fn for_rect(rect: PixelRect) -> Self {
        if rect.width > rect.height {
            Self::Columns
        } else {
            Self::Rows
        }
    }

    /// Start and length of `rect` along the split axis.
    fn span(self, rect: PixelRect) -> (i64, i64) {
        match self {
            Self::Columns => (rect.x, rect.width),
            Self::Rows => (rect.y, rect.height),
        }
    }

    /// The band of `rect` starting at `start` with `length` along the split axis.
    fn band(self, rect: PixelRect, start: i64, length: i64) -> PixelRect {
        match self {
            Self::Columns => PixelRect::new(start, rect.y, length, rect.height),
            Self::Rows => PixelRect::new(rect.x, start, rect.width, length),
        }
    }
}

/// `part / whole * length`, truncated toward zero.
///
/// Computed in floating point so results match pixel-for-pixel with renders that
/// were produced the same way, including cases such as `29 / 100 * 100 == 28`.
#[allow(
    clippy::cast_possible_truncation,
    reason = "Shares are truncated to whole pixels by design."
)]
fn proportional(part: u64, whole: u64, length: i64) -> i64 {
    (part as f64 / whole as f64 * length as f64) as i64
}

impl<D> Tree<D> {
    /// Lay out the whole tree inside `rect`.
    ///
    /// Returns one [`Tile`] per leaf of non-zero size, in depth-first order following
    /// each node's children. This is the same order used by
    /// [`Tree::node_at_ordinal`](crate::Tree::node_at_ordinal), so a tile's position in
    /// the result identifies its leaf.
    ///
    /// Subtrees of size zero produce nothing. A degenerate `rect` (zero or negative
    /// width or height) yields an empty result. Tiles nested inside a valid `rect` may
    /// still be degenerate when sizes are very skewed; those are kept so positions stay
    /// aligned with ordinals.
    pub fn layout(&self, rect: PixelRect) -> Vec<Tile> {
        self.layout_node(self.root(), rect)
    }

    /// Lay out the subtree rooted at `id` inside `rect`.
    ///
    /// Stale ids produce an empty result.
    pub fn layout_node(&self, id: NodeId, rect: PixelRect) -> Vec<Tile> {
        let mut out = Vec::new();
        if self.is_alive(id) && !rect.is_degenerate() {
            self.partition(id, rect, &mut out);
        }
        trace!("layout of {id:?} in {rect:?} produced {} tiles", out.len());
        out
    }

    fn partition(&self, id: NodeId, rect: PixelRect, out: &mut Vec<Tile>) {
        let node = self.node(id);
        if node.size == 0 {
            return;
        }
        if node.children.is_empty() {
            out.push(Tile {
                rect,
                colour: node.colour,
            });
            return;
        }
        let split = Split::for_rect(rect);
        let (start, length) = split.span(rect);
        let end = start + length;
        let last = node.children.len() - 1;
        let mut cursor = start;
        for (i, &child) in node.children.iter().enumerate() {
            let share = if i == last {
                end - cursor
            } else {
                proportional(self.node(child).size, node.size, length)
            };
            self.partition(child, split.band(rect, cursor, share), out);
            cursor += share;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::{Palette, RandomColours};
    use crate::domain::FileSystem;
    use crate::tree::Subtree;
    use crate::types::Rgb;

    const ROOT: Rgb = Rgb::new(1, 1, 1);
    const A: Rgb = Rgb::new(10, 0, 0);
    const B: Rgb = Rgb::new(0, 20, 0);
    const C: Rgb = Rgb::new(0, 0, 30);

    fn two_leaves(a: u64, b: u64) -> Tree<FileSystem> {
        Tree::from_subtree(
            FileSystem,
            Palette::new([ROOT, A, B]),
            Subtree::branch("root", [Subtree::leaf("a", a), Subtree::leaf("b", b)]),
        )
        .unwrap()
    }

    /// Tiles with area exactly cover `rect`: each lies inside it, none overlap, and
    /// their areas add up to the whole.
    fn assert_tiles(tiles: &[Tile], rect: PixelRect) {
        let mut area = 0;
        for (i, t) in tiles.iter().enumerate() {
            if t.rect.is_degenerate() {
                continue;
            }
            assert_eq!(t.rect.intersect(&rect), Some(t.rect), "tile {i} escapes the rect");
            for (j, u) in tiles.iter().enumerate().skip(i + 1) {
                assert_eq!(t.rect.intersect(&u.rect), None, "tiles {i} and {j} overlap");
            }
            area += t.rect.area();
        }
        assert_eq!(area, rect.area(), "tiles leave a gap");
    }

    /// Smallest rectangle holding every tile with area, or `None` if there is none.
    fn bounds(tiles: &[Tile]) -> Option<PixelRect> {
        let mut solid = tiles.iter().map(|t| t.rect).filter(|r| !r.is_degenerate());
        let first = solid.next()?;
        let (mut x0, mut y0, mut x1, mut y1) = (first.x, first.y, first.right(), first.bottom());
        for r in solid {
            x0 = x0.min(r.x);
            y0 = y0.min(r.y);
            x1 = x1.max(r.right());
            y1 = y1.max(r.bottom());
        }
        Some(PixelRect::new(x0, y0, x1 - x0, y1 - y0))
    }

    /// Each child's extent along its parent's split axis stays within rounding of
    /// `child / parent * length`: truncation costs under a pixel, and the last child
    /// picks up at most a pixel per sibling. Child rectangles are recovered from the
    /// tiles of their ordinal range, so the check recurses on actual output.
    fn assert_shares(tree: &Tree<FileSystem>, id: NodeId, rect: PixelRect, tiles: &[Tile]) {
        let node = tree.node(id);
        if node.children.is_empty() {
            return;
        }
        let split = Split::for_rect(rect);
        let (_, length) = split.span(rect);
        let siblings = node.children.len() as f64;
        let mut first = 0;
        for &child in &node.children {
            let count = tree.leaf_count(child);
            let own = &tiles[first..first + count];
            first += count;
            let Some(child_rect) = bounds(own) else {
                continue;
            };
            let (_, extent) = split.span(child_rect);
            let ideal = tree.node(child).size as f64 / node.size as f64 * length as f64;
            let extent = extent as f64;
            assert!(
                extent > ideal - 1.0 && extent < ideal + siblings,
                "{child:?} spans {extent} px, ideal {ideal:.2} px"
            );
            assert_shares(tree, child, child_rect, own);
        }
        assert_eq!(first, tiles.len());
    }

    /// A deterministic, uneven tree several levels deep.
    fn uneven(depth: u32, seed: &mut u64) -> Subtree {
        let mut next = || {
            *seed ^= *seed << 13;
            *seed ^= *seed >> 7;
            *seed ^= *seed << 17;
            *seed
        };
        if depth == 0 {
            return Subtree::leaf("leaf", 1 + next() % 997);
        }
        let fanout = 1 + next() % 5;
        let children: Vec<_> = (0..fanout).map(|_| uneven(depth - 1, seed)).collect();
        Subtree::branch("dir", children)
    }

    #[test]
    fn wide_rect_splits_into_columns() {
        let tree = two_leaves(30, 70);
        let tiles = tree.layout(PixelRect::new(0, 0, 100, 50));
        assert_eq!(
            tiles,
            [
                Tile {
                    rect: PixelRect::new(0, 0, 30, 50),
                    colour: A
                },
                Tile {
                    rect: PixelRect::new(30, 0, 70, 50),
                    colour: B
                },
            ]
        );
    }

    #[test]
    fn tall_and_square_rects_split_into_rows() {
        let tree = two_leaves(33, 67);
        let tiles = tree.layout(PixelRect::new(0, 0, 50, 100));
        assert_eq!(tiles[0].rect, PixelRect::new(0, 0, 50, 33));
        assert_eq!(tiles[1].rect, PixelRect::new(0, 33, 50, 67));

        let square = tree.layout(PixelRect::new(0, 0, 60, 60));
        assert_eq!(square[0].rect.width, 60, "ties split rows");
        assert_eq!(square[0].rect.height, 19);
        assert_eq!(square[1].rect, PixelRect::new(0, 19, 60, 41));
    }

    #[test]
    fn last_child_takes_the_rounding_remainder() {
        let tree = Tree::from_subtree(
            FileSystem,
            Palette::new([ROOT, A, B, C]),
            Subtree::branch(
                "root",
                [
                    Subtree::leaf("a", 1),
                    Subtree::leaf("b", 1),
                    Subtree::leaf("c", 1),
                ],
            ),
        )
        .unwrap();
        let rect = PixelRect::new(0, 0, 100, 50);
        let tiles = tree.layout(rect);
        let widths: Vec<_> = tiles.iter().map(|t| t.rect.width).collect();
        assert_eq!(widths, [33, 33, 34]);
        assert_eq!(tiles[2].rect.x, 66);
        assert_tiles(&tiles, rect);
    }

    #[test]
    fn shares_truncate_like_floating_point() {
        let tree = two_leaves(29, 71);
        let tiles = tree.layout(PixelRect::new(0, 0, 100, 50));
        assert_eq!(tiles[0].rect.width, 28);
        assert_eq!(tiles[1].rect, PixelRect::new(28, 0, 72, 50));
    }

    #[test]
    fn offset_rect_is_tiled_exactly() {
        let tree = two_leaves(33, 67);
        let rect = PixelRect::new(10, 20, 100, 50);
        let tiles = tree.layout(rect);
        assert_eq!(tiles[0].rect, PixelRect::new(10, 20, 33, 50));
        assert_eq!(tiles[1].rect, PixelRect::new(43, 20, 67, 50));
        assert_tiles(&tiles, rect);
    }

    #[test]
    fn orientation_alternates_by_depth() {
        let tree = Tree::from_subtree(
            FileSystem,
            Palette::new([ROOT, ROOT, A, B, C]),
            Subtree::branch(
                "root",
                [
                    Subtree::branch("left", [Subtree::leaf("a", 25), Subtree::leaf("b", 25)]),
                    Subtree::leaf("c", 50),
                ],
            ),
        )
        .unwrap();
        let rect = PixelRect::new(0, 0, 200, 100);
        let tiles = tree.layout(rect);
        // Root splits columns; the 100x100 left half splits rows.
        assert_eq!(tiles[0].rect, PixelRect::new(0, 0, 100, 50));
        assert_eq!(tiles[1].rect, PixelRect::new(0, 50, 100, 50));
        assert_eq!(tiles[2].rect, PixelRect::new(100, 0, 100, 100));
        assert_eq!(
            tiles.iter().map(|t| t.colour).collect::<Vec<_>>(),
            [A, B, C]
        );
        assert_tiles(&tiles, rect);
    }

    #[test]
    fn zero_size_subtrees_are_pruned() {
        let tree = Tree::from_subtree(
            FileSystem,
            RandomColours::seeded(9),
            Subtree::branch(
                "root",
                [
                    Subtree::leaf("a", 40),
                    Subtree::branch("hollow", [Subtree::leaf("z", 0), Subtree::branch("e", [])]),
                    Subtree::leaf("zero", 0),
                    Subtree::leaf("b", 60),
                ],
            ),
        )
        .unwrap();
        let tiles = tree.layout(PixelRect::new(0, 0, 100, 10));
        assert_eq!(tiles.len(), 2);
        assert_eq!(tiles[0].rect, PixelRect::new(0, 0, 40, 10));
        assert_eq!(tiles[1].rect, PixelRect::new(40, 0, 60, 10));
    }

    #[test]
    fn empty_inputs_produce_no_tiles() {
        let empty = Tree::new(FileSystem, RandomColours::seeded(0));
        assert!(empty.layout(PixelRect::new(0, 0, 100, 100)).is_empty());

        let tree = two_leaves(1, 1);
        assert!(tree.layout(PixelRect::new(0, 0, 0, 100)).is_empty());
        assert!(tree.layout(PixelRect::new(0, 0, 100, 0)).is_empty());
    }

    #[test]
    fn skewed_sizes_keep_degenerate_tiles() {
        let tree = two_leaves(1, 10_000);
        let tiles = tree.layout(PixelRect::new(0, 0, 100, 50));
        assert_eq!(tiles.len(), 2, "one tile per non-zero leaf");
        assert!(tiles[0].rect.is_degenerate());
        assert_eq!(tiles[1].rect, PixelRect::new(0, 0, 100, 50));
    }

    #[test]
    fn layout_node_covers_a_subtree() {
        let tree =
            Tree::from_subtree(FileSystem, RandomColours::seeded(1), uneven(2, &mut 99)).unwrap();
        let first = tree.children_of(tree.root())[0];
        let rect = PixelRect::new(5, 5, 40, 80);
        let tiles = tree.layout_node(first, rect);
        assert_tiles(&tiles, rect);
    }

    #[test]
    fn deep_trees_tile_and_conserve_leaf_count() {
        let mut seed = 0x9E37_79B9_7F4A_7C15;
        for round in 0..8 {
            let tree = Tree::from_subtree(
                FileSystem,
                RandomColours::seeded(round),
                uneven(4, &mut seed),
            )
            .unwrap();
            let rect = PixelRect::new(3, 7, 1024, 738);
            let tiles = tree.layout(rect);
            assert_eq!(tiles.len(), tree.leaf_count(tree.root()));
            assert_tiles(&tiles, rect);
            assert_shares(&tree, tree.root(), rect, &tiles);
        }
    }
}
