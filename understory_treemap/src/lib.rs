// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_treemap --heading-base-level=0

//! Understory Treemap: size-weighted treemap layout over an arena tree.
//!
//! Understory Treemap turns a hierarchy of sized items (files in folders, categories in a
//! population table, ...) into rectangles whose areas follow the sizes, and keeps that
//! hierarchy editable while it is on screen.
//!
//! - Stores a single rooted tree whose branches always carry the sum of their children's sizes.
//! - Partitions a pixel rectangle among the leaves, switching between columns and rows by aspect.
//! - Maps a point back to the leaf under it and builds a breadcrumb for display.
//! - Deletes and resizes leaves in place, updating every ancestor.
//!
//! ## Not a renderer
//!
//! This crate does not draw, open windows, or read data sources.
//! Upstream code builds a [`Tree`] (for example by walking a directory) and downstream code
//! paints the [`Tile`]s it returns. Degenerate tiles are the renderer's to skip.
//!
//! ## Layout
//!
//! [`Tree::layout`] recomputes every tile from the current sizes; nothing is cached between
//! calls. Each branch splits along the longer side of its rectangle, giving each child a
//! share proportional to its size, truncated to whole pixels. The last child of each split
//! takes whatever is left, so the tiles cover the rectangle exactly.
//!
//! ## API overview
//!
//! - [`Tree`]: the arena that owns all nodes, generic over a [`Domain`].
//! - [`Subtree`]: bottom-up description used by loaders; see [`Tree::from_subtree`].
//! - [`NodeId`]: generational handle of a node.
//! - [`Tile`] / [`PixelRect`] / [`Rgb`]: layout output.
//! - [`MissPolicy`]: what a hit test returns outside every tile.
//! - [`ColourSource`]: where node colours come from ([`RandomColours`], [`Palette`]).
//! - [`TreeError`]: faults reported by construction and edits.
//!
//! Key operations:
//! - [`Tree::layout`](Tree::layout) → tiles in leaf order
//! - [`Tree::node_at_ordinal`](Tree::node_at_ordinal) and [`pick_ordinal`]
//! - [`Tree::select`](Tree::select) → [`Selection`] with display text
//! - [`Tree::delete`](Tree::delete), [`Tree::resize`](Tree::resize),
//!   [`Tree::delete_at`](Tree::delete_at)
//!
//! # Example
//!
//! ```rust
//! use kurbo::Point;
//! use understory_treemap::{
//!     FileSystem, MissPolicy, Palette, PixelRect, Resize, Rgb, Subtree, Tree,
//! };
//!
//! let grey = Rgb::new(40, 40, 40);
//! let red = Rgb::new(200, 30, 30);
//! let blue = Rgb::new(30, 30, 200);
//!
//! // Colours are handed out in pre-order: the root first, then its children.
//! let mut tree = Tree::from_subtree(
//!     FileSystem,
//!     Palette::new([grey, red, blue]),
//!     Subtree::branch("docs", [Subtree::leaf("a.txt", 33), Subtree::leaf("b.txt", 67)]),
//! )
//! .unwrap();
//!
//! // Wider than tall, so the leaves sit side by side.
//! let tiles = tree.layout(PixelRect::new(0, 0, 100, 50));
//! assert_eq!(tiles[0].rect, PixelRect::new(0, 0, 33, 50));
//! assert_eq!(tiles[1].rect, PixelRect::new(33, 0, 67, 50));
//! assert_eq!(tiles[1].colour, blue);
//!
//! // Click on the second tile.
//! let sel = tree.select(Point::new(60.0, 10.0), &tiles, MissPolicy::NoMatch).unwrap();
//! assert_eq!(sel.text, "docs/b.txt (67)");
//!
//! // Grow it by 1% and drop the other leaf.
//! assert_eq!(tree.resize(sel.node, Resize::Grow), Ok(67));
//! let a = tree.node_at_ordinal(0).unwrap();
//! assert_eq!(tree.delete(a), Ok(33));
//! assert_eq!(tree.size(tree.root()), Some(67));
//! assert_eq!(tree.layout(PixelRect::new(0, 0, 100, 50)).len(), 1);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod colour;
mod domain;
mod edit;
mod error;
mod hit;
mod layout;
mod tree;
mod types;

pub use colour::{ColourSource, Palette, RandomColours};
pub use domain::{Domain, FileSystem, Statistical};
pub use edit::Resize;
pub use error::TreeError;
pub use hit::{MissPolicy, Selection, pick_ordinal};
pub use tree::{Subtree, Tree};
pub use types::{NodeId, PixelRect, Rgb, Tile};
