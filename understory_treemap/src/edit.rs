// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-place leaf edits: deletion and stepwise resizing.
//!
//! Both edits identify their target by [`NodeId`] and walk parent links to the root,
//! adjusting every ancestor by the same amount as the leaf so that each branch keeps
//! the sum of its children.

use kurbo::Point;
use log::debug;

use crate::error::TreeError;
use crate::hit::{MissPolicy, pick_ordinal};
use crate::tree::Tree;
use crate::types::{NodeId, Tile};

/// Direction of a [`Tree::resize`] step.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Resize {
    /// Add one step to the leaf.
    Grow,
    /// Take one step from the leaf.
    Shrink,
}

impl<D> Tree<D> {
    /// Delete a leaf, returning the size it held.
    ///
    /// Every ancestor shrinks by that size and the leaf is removed from its parent's
    /// children; its id becomes stale. A branch left without children stays in place
    /// with size zero, and is skipped by layout and ordinals.
    ///
    /// # Errors
    ///
    /// - [`TreeError::StaleNode`] if `id` is not alive.
    /// - [`TreeError::NotALeaf`] if `id` has children.
    /// - [`TreeError::RootNotRemovable`] if `id` is the root.
    pub fn delete(&mut self, id: NodeId) -> Result<u64, TreeError> {
        let node = self.node_opt(id).ok_or(TreeError::StaleNode(id))?;
        if !node.children.is_empty() {
            return Err(TreeError::NotALeaf(id));
        }
        let Some(parent) = node.parent else {
            return Err(TreeError::RootNotRemovable);
        };
        let size = node.size;
        self.update_ancestors(id, |s| s - size);
        self.unlink_parent(id, parent);
        self.release(id);
        debug!("deleted {id:?} of size {size} from {parent:?}");
        self.debug_check();
        Ok(size)
    }

    /// Grow or shrink a leaf by one step, returning its size afterwards.
    ///
    /// A step is 1% of the leaf's current size, rounded down, so leaves smaller than
    /// 100 do not change. Every ancestor moves by the same step. Steps are not
    /// reversible in general: growing then shrinking uses two different step sizes.
    ///
    /// Nothing changes while the root's size is at most 1.
    ///
    /// # Errors
    ///
    /// - [`TreeError::StaleNode`] if `id` is not alive.
    /// - [`TreeError::NotALeaf`] if `id` has children.
    /// - [`TreeError::SizeOverflow`] if growing would push the root past `u64::MAX`;
    ///   no size changes in that case.
    pub fn resize(&mut self, id: NodeId, direction: Resize) -> Result<u64, TreeError> {
        let node = self.node_opt(id).ok_or(TreeError::StaleNode(id))?;
        if !node.children.is_empty() {
            return Err(TreeError::NotALeaf(id));
        }
        let current = node.size;
        if self.node(self.root()).size <= 1 {
            return Ok(current);
        }
        let step = current / 100;
        if direction == Resize::Grow {
            self.check_growth(step)?;
        }
        let apply = |s: u64| match direction {
            Resize::Grow => s + step,
            Resize::Shrink => s - step,
        };
        let node = self.node_mut(id);
        node.size = apply(node.size);
        let resized = node.size;
        self.update_ancestors(id, apply);
        debug!("{direction:?} {id:?} by {step}: {current} -> {resized}");
        self.debug_check();
        Ok(resized)
    }

    /// Delete the leaf under `pt` in a previous layout of this tree.
    ///
    /// Returns the id of the deleted leaf (now stale), or `None` if `policy` resolved the
    /// point to nothing.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`Tree::delete`]; in particular a tree whose only leaf is
    /// the root reports [`TreeError::RootNotRemovable`].
    pub fn delete_at(
        &mut self,
        pt: Point,
        tiles: &[Tile],
        policy: MissPolicy,
    ) -> Result<Option<NodeId>, TreeError> {
        let Some(id) = pick_ordinal(pt, tiles, policy).and_then(|i| self.node_at_ordinal(i))
        else {
            return Ok(None);
        };
        self.delete(id)?;
        Ok(Some(id))
    }
}
