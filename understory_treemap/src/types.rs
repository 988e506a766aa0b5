// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the treemap: node identifiers, colours, and pixel geometry.

use kurbo::{Point, Rect};

/// Identifier for a node in the tree.
///
/// This is a small, copyable handle that stays stable across edits but becomes
/// invalid when the underlying node is deleted.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On delete, the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// Comparing two `NodeId`s is how edits find their target: equality is identity,
/// never a comparison of labels or sizes.
///
/// Use [`Tree::is_alive`](crate::Tree::is_alive) to check whether a `NodeId` still refers to a
/// live node.
/// Stale `NodeId`s never alias a different live node because the generation must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }
}

/// An opaque RGB colour. Channels are in `0..=255` by construction.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Create a colour from its three channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Axis-aligned rectangle in integer pixel units.
///
/// `x` grows to the right and `y` grows downward. The same format is used for the
/// rectangle handed to [`Tree::layout`](crate::Tree::layout) and for every rectangle
/// it returns.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct PixelRect {
    /// Left edge.
    pub x: i64,
    /// Top edge.
    pub y: i64,
    /// Extent along x.
    pub width: i64,
    /// Extent along y.
    pub height: i64,
}

impl PixelRect {
    /// Create a rectangle from its origin and extents.
    pub const fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// One past the right-most column.
    pub const fn right(&self) -> i64 {
        self.x + self.width
    }

    /// One past the bottom-most row.
    pub const fn bottom(&self) -> i64 {
        self.y + self.height
    }

    /// Area in square pixels. Zero for degenerate rectangles.
    pub const fn area(&self) -> i64 {
        if self.is_degenerate() {
            0
        } else {
            self.width * self.height
        }
    }

    /// True when the rectangle covers no pixels.
    ///
    /// Layout may produce such rectangles for very skewed sizes; renderers are
    /// expected to skip them.
    pub const fn is_degenerate(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Whether the point lies inside, using half-open edges: `[x, x + width)` by `[y, y + height)`.
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x as f64
            && pt.x < self.right() as f64
            && pt.y >= self.y as f64
            && pt.y < self.bottom() as f64
    }

    /// The overlap of two rectangles, or `None` when they share no pixels.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        (x1 > x0 && y1 > y0).then(|| Self::new(x0, y0, x1 - x0, y1 - y0))
    }
}

impl From<PixelRect> for Rect {
    fn from(r: PixelRect) -> Self {
        Self::new(
            r.x as f64,
            r.y as f64,
            r.right() as f64,
            r.bottom() as f64,
        )
    }
}

/// One rectangle of a treemap, paired with the colour of the leaf it stands for.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Tile {
    /// Area allotted to the leaf.
    pub rect: PixelRect,
    /// Colour of the leaf.
    pub colour: Rgb,
}
