// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping from screen points back to leaves.
//!
//! ## Ordinals
//!
//! Leaves of non-zero size are numbered `0..N` in the order [`Tree::layout`] emits
//! their tiles: depth first, children in order. A tile's index in a layout result is
//! therefore its leaf's ordinal, and [`Tree::node_at_ordinal`] recovers the node.
//!
//! ## Misses
//!
//! What happens when a point falls outside every tile is a [`MissPolicy`].
//! The default, [`MissPolicy::FirstTile`], resolves the miss to ordinal `0`, which is
//! how interactive treemap viewers have traditionally behaved. Use
//! [`MissPolicy::NoMatch`] to get `None` instead.

use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use kurbo::Point;
use log::trace;

use crate::domain::Domain;
use crate::tree::Tree;
use crate::types::{NodeId, Tile};

/// What a hit test reports when no tile contains the point.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum MissPolicy {
    /// Fall back to the first tile, if there is one.
    #[default]
    FirstTile,
    /// Report no match.
    NoMatch,
}

/// Index of the first tile containing `pt`, subject to `policy` on a miss.
///
/// Containment is half-open, see [`PixelRect::contains`](crate::PixelRect::contains).
/// Degenerate tiles never contain a point.
pub fn pick_ordinal(pt: Point, tiles: &[Tile], policy: MissPolicy) -> Option<usize> {
    let hit = tiles.iter().position(|t| t.rect.contains(pt));
    let resolved = match (hit, policy) {
        (Some(i), _) => Some(i),
        (None, MissPolicy::FirstTile) if !tiles.is_empty() => Some(0),
        (None, _) => None,
    };
    trace!("pick at {pt:?} over {} tiles: {resolved:?}", tiles.len());
    resolved
}

/// A leaf picked by a point, with its display text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Selection {
    /// The picked leaf.
    pub node: NodeId,
    /// Breadcrumb, label, and size, e.g. `docs/notes/a.txt (10)`.
    pub text: String,
}

impl<D> Tree<D> {
    /// Number of leaves of non-zero size at or below `id`.
    ///
    /// This equals the number of tiles [`Tree::layout_node`] produces for `id`.
    /// Stale ids count zero.
    pub fn leaf_count(&self, id: NodeId) -> usize {
        let Some(node) = self.node_opt(id) else {
            return 0;
        };
        if node.children.is_empty() {
            return usize::from(node.size > 0);
        }
        node.children.iter().map(|&c| self.leaf_count(c)).sum()
    }

    /// Leaves of non-zero size in ordinal order.
    ///
    /// The walk is lazy and borrows the tree; collect it first to edit while iterating.
    pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        Leaves {
            tree: self,
            stack: vec![self.root()],
        }
    }

    /// The leaf with the given ordinal, or `None` if there are not that many leaves.
    pub fn node_at_ordinal(&self, ordinal: usize) -> Option<NodeId> {
        let mut id = self.root();
        let mut ordinal = ordinal;
        loop {
            let node = self.node(id);
            if node.children.is_empty() {
                return (node.size > 0 && ordinal == 0).then_some(id);
            }
            let mut next = None;
            for &child in &node.children {
                let count = self.leaf_count(child);
                if ordinal < count {
                    next = Some(child);
                    break;
                }
                ordinal -= count;
            }
            id = next?;
        }
    }
}

/// Depth-first walk behind [`Tree::leaves`].
struct Leaves<'a, D> {
    tree: &'a Tree<D>,
    stack: Vec<NodeId>,
}

impl<D> Iterator for Leaves<'_, D> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        while let Some(id) = self.stack.pop() {
            let node = self.tree.node(id);
            if node.children.is_empty() {
                if node.size > 0 {
                    return Some(id);
                }
            } else {
                self.stack.extend(node.children.iter().rev().copied());
            }
        }
        None
    }
}

impl<D: Domain> Tree<D> {
    /// Labels of the ancestors of `id`, root first, each followed by the domain separator.
    ///
    /// The root's own path text is empty. Stale ids also yield an empty string.
    pub fn path_text(&self, id: NodeId) -> String {
        let mut chain = Vec::new();
        let mut cursor = self.parent_of(id);
        while let Some(p) = cursor {
            chain.push(p);
            cursor = self.parent_of(p);
        }
        let separator = self.domain().separator();
        let mut text = String::new();
        for &p in chain.iter().rev() {
            if let Some(label) = self.label(p) {
                text.push_str(label);
                text.push_str(separator);
            }
        }
        text
    }

    /// Display text for a node: path text, label, then the size in parentheses.
    ///
    /// `None` for stale ids and for the root of an empty tree.
    pub fn selection_text(&self, id: NodeId) -> Option<String> {
        let node = self.node_opt(id)?;
        let label = node.label.as_deref()?;
        Some(format!("{}{} ({})", self.path_text(id), label, node.size))
    }

    /// Resolve a point against a previous layout of this tree and describe the leaf under it.
    pub fn select(&self, pt: Point, tiles: &[Tile], policy: MissPolicy) -> Option<Selection> {
        let ordinal = pick_ordinal(pt, tiles, policy)?;
        let node = self.node_at_ordinal(ordinal)?;
        let text = self.selection_text(node)?;
        Some(Selection { node, text })
    }
}
