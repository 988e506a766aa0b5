// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: arena storage, construction, and accessors.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use log::debug;

use crate::colour::ColourSource;
use crate::error::TreeError;
use crate::types::{NodeId, Rgb};

/// How a node was created. Only branches accept children.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum NodeKind {
    Leaf,
    Branch,
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    generation: u32,
    pub(crate) label: Option<String>,
    pub(crate) size: u64,
    pub(crate) colour: Rgb,
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    fn new(
        generation: u32,
        label: Option<String>,
        kind: NodeKind,
        size: u64,
        colour: Rgb,
    ) -> Self {
        Self {
            generation,
            label,
            size,
            colour,
            kind,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// A detached description of a tree, assembled bottom-up by a loader.
///
/// Leaves carry their own size; a branch's size is always the sum of its children.
/// Hand the finished description to [`Tree::from_subtree`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Subtree {
    label: String,
    body: Body,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Body {
    Leaf(u64),
    Branch(Vec<Subtree>),
}

impl Subtree {
    /// A leaf with an intrinsic size (a byte count, a population, ...).
    pub fn leaf(label: impl Into<String>, size: u64) -> Self {
        Self {
            label: label.into(),
            body: Body::Leaf(size),
        }
    }

    /// A branch over already-built children, kept in the given order.
    pub fn branch(label: impl Into<String>, children: impl IntoIterator<Item = Self>) -> Self {
        Self {
            label: label.into(),
            body: Body::Branch(children.into_iter().collect()),
        }
    }

    /// The label of this subtree's root.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Aggregate size: the intrinsic size of a leaf, or the sum over a branch's children.
    ///
    /// `None` if the sum does not fit in a `u64`.
    pub fn size(&self) -> Option<u64> {
        match &self.body {
            Body::Leaf(size) => Some(*size),
            Body::Branch(children) => children
                .iter()
                .try_fold(0_u64, |total, c| total.checked_add(c.size()?)),
        }
    }
}

/// A size-weighted tree of labelled nodes.
///
/// The tree owns every node; children are held in insertion order and each node keeps a
/// non-owning [`NodeId`] back to its parent. The tree always has exactly one root.
/// An empty tree's root has no label, no children, and size zero.
///
/// Sizes are kept consistent by every public operation: a node with children always
/// has a size equal to the sum of its children's sizes.
pub struct Tree<D> {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    root: NodeId,
    domain: D,
    colours: Box<dyn ColourSource>,
}

impl<D: core::fmt::Debug> core::fmt::Debug for Tree<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .field("root", &self.root)
            .field("domain", &self.domain)
            .finish_non_exhaustive()
    }
}

impl<D> Tree<D> {
    /// Create an empty tree for `domain`, drawing node colours from `colours`.
    pub fn new(domain: D, colours: impl ColourSource + 'static) -> Self {
        let mut tree = Self::with_parts(domain, colours);
        tree.root = tree.alloc(None, NodeKind::Branch, 0);
        tree
    }

    /// Build a tree from a bottom-up description.
    ///
    /// Colours are drawn in pre-order (a node before its children, children in order).
    ///
    /// # Errors
    ///
    /// [`TreeError::SizeOverflow`] if some branch's total does not fit in a `u64`.
    pub fn from_subtree(
        domain: D,
        colours: impl ColourSource + 'static,
        subtree: Subtree,
    ) -> Result<Self, TreeError> {
        let mut tree = Self::with_parts(domain, colours);
        tree.root = tree.graft(None, subtree)?;
        debug!(
            "built tree with {} nodes and size {}",
            tree.node_count(),
            tree.node(tree.root).size
        );
        tree.debug_check();
        Ok(tree)
    }

    fn with_parts(domain: D, colours: impl ColourSource + 'static) -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: NodeId::new(0, 0),
            domain,
            colours: Box::new(colours),
        }
    }

    /// Insert a branch under `parent`, or as the root if `parent` is `None`.
    ///
    /// A branch starts with size zero and grows as leaves are added beneath it.
    pub fn insert_branch(
        &mut self,
        parent: Option<NodeId>,
        label: impl Into<String>,
    ) -> Result<NodeId, TreeError> {
        self.insert(parent, label.into(), NodeKind::Branch, 0)
    }

    /// Insert a leaf of intrinsic `size` under `parent`, or as the root if `parent` is `None`.
    ///
    /// Every ancestor grows by `size`.
    ///
    /// # Errors
    ///
    /// - [`TreeError::RootOccupied`] if `parent` is `None` and the tree has a root.
    /// - [`TreeError::StaleNode`], [`TreeError::EmptyParent`], or [`TreeError::LeafParent`]
    ///   if `parent` cannot take children.
    /// - [`TreeError::SizeOverflow`] if the root's size would exceed `u64::MAX`; the tree
    ///   is left unchanged.
    pub fn insert_leaf(
        &mut self,
        parent: Option<NodeId>,
        label: impl Into<String>,
        size: u64,
    ) -> Result<NodeId, TreeError> {
        self.insert(parent, label.into(), NodeKind::Leaf, size)
    }

    fn insert(
        &mut self,
        parent: Option<NodeId>,
        label: String,
        kind: NodeKind,
        size: u64,
    ) -> Result<NodeId, TreeError> {
        let Some(parent) = parent else {
            return self.install_root(label, kind, size);
        };
        let p = self.node_opt(parent).ok_or(TreeError::StaleNode(parent))?;
        if p.label.is_none() {
            return Err(TreeError::EmptyParent);
        }
        if p.kind == NodeKind::Leaf {
            return Err(TreeError::LeafParent(parent));
        }
        self.check_growth(size)?;
        let id = self.alloc(Some(label), kind, size);
        self.link_parent(id, parent);
        self.update_ancestors(id, |s| s + size);
        debug!("inserted {id:?} under {parent:?} with size {size}");
        self.debug_check();
        Ok(id)
    }

    fn install_root(
        &mut self,
        label: String,
        kind: NodeKind,
        size: u64,
    ) -> Result<NodeId, TreeError> {
        if !self.is_empty() {
            return Err(TreeError::RootOccupied);
        }
        self.release(self.root);
        self.root = self.alloc(Some(label), kind, size);
        debug!("installed root {:?} with size {size}", self.root);
        Ok(self.root)
    }

    fn graft(&mut self, parent: Option<NodeId>, subtree: Subtree) -> Result<NodeId, TreeError> {
        let Subtree { label, body } = subtree;
        let (kind, size) = match &body {
            Body::Leaf(size) => (NodeKind::Leaf, *size),
            Body::Branch(_) => (NodeKind::Branch, 0),
        };
        let id = self.alloc(Some(label), kind, size);
        if let Some(p) = parent {
            self.link_parent(id, p);
        }
        if let Body::Branch(children) = body {
            let mut total = 0_u64;
            for child in children {
                let child = self.graft(Some(id), child)?;
                total = total
                    .checked_add(self.node(child).size)
                    .ok_or(TreeError::SizeOverflow)?;
            }
            self.node_mut(id).size = total;
        }
        Ok(id)
    }

    /// Fail if adding `delta` to every ancestor of some node would overflow.
    ///
    /// No node is larger than the root, so only the root needs checking.
    pub(crate) fn check_growth(&self, delta: u64) -> Result<(), TreeError> {
        self.node(self.root)
            .size
            .checked_add(delta)
            .map(|_| ())
            .ok_or(TreeError::SizeOverflow)
    }

    /// The root node. For an empty tree this is the unlabelled placeholder.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// True if the tree has no labelled root.
    pub fn is_empty(&self) -> bool {
        self.node(self.root).label.is_none()
    }

    /// The domain this tree describes.
    pub fn domain(&self) -> &D {
        &self.domain
    }

    /// Number of live nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is considered live if its slot exists and its generation matches
    /// the current generation stored in that slot.
    /// See [`NodeId`] docs for the generational semantics.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some()
    }

    /// Label of a live node. `None` for stale ids and for the root of an empty tree.
    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.node_opt(id)?.label.as_deref()
    }

    /// Aggregate size of a live node.
    pub fn size(&self, id: NodeId) -> Option<u64> {
        self.node_opt(id).map(|n| n.size)
    }

    /// Colour assigned to a live node when it was created.
    pub fn colour(&self, id: NodeId) -> Option<Rgb> {
        self.node_opt(id).map(|n| n.colour)
    }

    /// Parent of a live node; `None` for the root and for stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id)?.parent
    }

    /// Children of a live node in layout order. Empty for leaves and stale ids.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// True if `id` is live and currently has no children.
    ///
    /// A branch whose leaves were all deleted counts as a leaf of size zero.
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some_and(|n| n.children.is_empty())
    }

    // --- internals ---

    /// Access a node; panics if `id` is stale.
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    /// Access a node mutably; panics if `id` is stale.
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    pub(crate) fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.generation()).then_some(n)
    }

    fn alloc(&mut self, label: Option<String>, kind: NodeKind, size: u64) -> NodeId {
        let colour = self.colours.next_colour();
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, label, kind, size, colour));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes
                .push(Some(Node::new(generation, label, kind, size, colour)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        NodeId::new(idx, generation)
    }

    /// Free the slot of a node that has already been unlinked.
    pub(crate) fn release(&mut self, id: NodeId) {
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        let parent_node = self.node_mut(parent);
        parent_node.children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    pub(crate) fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        let p = self.node_mut(parent);
        p.children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }

    /// Apply `f` to the size of every strict ancestor of `id`, nearest first.
    pub(crate) fn update_ancestors(&mut self, id: NodeId, f: impl Fn(u64) -> u64) {
        let mut cursor = self.node(id).parent;
        while let Some(p) = cursor {
            let node = self.node_mut(p);
            node.size = f(node.size);
            cursor = node.parent;
        }
    }

    /// Check size aggregation and parent links from the root down.
    pub(crate) fn invariants_hold(&self) -> bool {
        let Some(root) = self.node_opt(self.root) else {
            return false;
        };
        if root.parent.is_some() {
            return false;
        }
        if root.label.is_none() && (!root.children.is_empty() || root.size != 0) {
            return false;
        }
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            let mut total = 0_u64;
            for &child in &node.children {
                let Some(c) = self.node_opt(child) else {
                    return false;
                };
                if c.parent != Some(id) || c.label.is_none() {
                    return false;
                }
                total += c.size;
                stack.push(child);
            }
            if !node.children.is_empty() && total != node.size {
                return false;
            }
        }
        true
    }

    pub(crate) fn debug_check(&self) {
        debug_assert!(self.invariants_hold(), "tree size or parent invariants violated");
    }
}
