// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Faults reported by construction and edit operations.

use crate::types::NodeId;

/// Errors returned when a caller asks the tree to do something it cannot.
///
/// These are caller bugs surfaced as values rather than silently ignored.
/// Breakage of the tree's own size and parent invariants is not reported here;
/// debug builds assert on it instead.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum TreeError {
    /// The id does not refer to a live node of this tree (never inserted, or already deleted).
    #[error("node {0:?} is not alive in this tree")]
    StaleNode(NodeId),
    /// The target of a leaf edit still has children.
    #[error("node {0:?} has children and is not a leaf")]
    NotALeaf(NodeId),
    /// The root has no parent to be detached from.
    #[error("the root node cannot be deleted")]
    RootNotRemovable,
    /// A root was inserted into a tree that already has one.
    #[error("the tree already has a root")]
    RootOccupied,
    /// A child was inserted under the unlabelled root of an empty tree.
    #[error("an empty tree cannot take children; insert a root first")]
    EmptyParent,
    /// A child was inserted under a node created as a leaf.
    #[error("node {0:?} was created as a leaf and cannot take children")]
    LeafParent(NodeId),
    /// An insert, grow, or build would push an aggregate size past `u64::MAX`.
    #[error("aggregate size would exceed u64::MAX")]
    SizeOverflow,
}
