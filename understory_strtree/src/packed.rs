// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generic bulk-loaded packed tree.
//!
//! Items are staged by [`PackedTree::insert`] and packed bottom-up into a balanced
//! tree the first time the tree is queried (or when [`PackedTree::build`] is called).
//! After that the structure is fixed; only [`PackedTree::remove`] can change it,
//! by excising leaves without rebalancing.

use alloc::vec;
use alloc::vec::Vec;
use core::cell::{Cell, OnceCell};
use core::fmt::Debug;

use crate::bounds::Bounds;
use crate::config::TreeConfig;
use crate::error::TreeError;
use crate::node::{Arena, Boundable, Child, ItemSlot, NodeIdx, NodeRef};

/// How a packed tree orders and groups each level, and how it tests overlap.
///
/// The tree hands the strategy one level of children at a time together with their
/// bounds; the strategy returns the runs of children that become the parents of the
/// next level up. [`pack_runs`] is the plain grouping most strategies finish with.
pub trait PackStrategy<B: Bounds>: Debug {
    /// Overlap predicate used by queries and removal.
    fn intersects(&self, a: &B, b: &B) -> bool {
        a.intersects(b)
    }

    /// Order one level of children and split it into runs of at most `node_capacity`.
    fn group<C: Copy>(&self, children: Vec<(B, C)>, node_capacity: usize) -> Vec<Vec<C>>;
}

/// Group children into consecutive runs of `node_capacity`; the last run may be shorter.
pub fn pack_runs<B, C: Copy>(children: &[(B, C)], node_capacity: usize) -> Vec<Vec<C>> {
    children
        .chunks(node_capacity)
        .map(|run| run.iter().map(|(_, c)| *c).collect())
        .collect()
}

/// A query-only tree bulk-loaded from a batch of `(bounds, item)` pairs.
///
/// The tree builds lazily on first use behind a [`OnceCell`], so queries only need
/// `&self`. This also makes the tree `!Sync`: it is meant for a single thread.
pub struct PackedTree<B: Bounds, T, S: PackStrategy<B>> {
    node_capacity: usize,
    strategy: S,
    staged: Cell<Vec<ItemSlot<B, T>>>,
    built: OnceCell<Arena<B, T>>,
}

impl<B: Bounds, T, S: PackStrategy<B> + Default> Default for PackedTree<B, T, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Bounds, T, S: PackStrategy<B> + Default> PackedTree<B, T, S> {
    /// Create an empty tree with the default node capacity.
    pub fn new() -> Self {
        Self::from_parts(TreeConfig::default().node_capacity, S::default())
    }

    /// Create an empty tree with the given node capacity.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidNodeCapacity`] if `node_capacity < 2`.
    pub fn with_node_capacity(node_capacity: usize) -> Result<Self, TreeError> {
        Self::with_config(TreeConfig::with_node_capacity(node_capacity))
    }

    /// Create an empty tree from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn with_config(config: TreeConfig) -> Result<Self, TreeError> {
        Self::with_strategy(config, S::default())
    }
}

impl<B: Bounds, T, S: PackStrategy<B>> PackedTree<B, T, S> {
    /// Create an empty tree with an explicit strategy value.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn with_strategy(config: TreeConfig, strategy: S) -> Result<Self, TreeError> {
        config.validate()?;
        Ok(Self::from_parts(config.node_capacity, strategy))
    }

    fn from_parts(node_capacity: usize, strategy: S) -> Self {
        Self {
            node_capacity,
            strategy,
            staged: Cell::new(Vec::new()),
            built: OnceCell::new(),
        }
    }

    /// Maximum number of children per node.
    pub fn node_capacity(&self) -> usize {
        self.node_capacity
    }

    /// The packing strategy.
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Whether the tree has been built.
    pub fn is_built(&self) -> bool {
        self.built.get().is_some()
    }

    /// Stage an item for bulk loading.
    ///
    /// Items with null bounds are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::AlreadyBuilt`] once the tree has been built.
    pub fn insert(&mut self, bounds: B, item: T) -> Result<(), TreeError> {
        if self.is_built() {
            return Err(TreeError::AlreadyBuilt);
        }
        if bounds.is_null() {
            tracing::trace!("ignoring insert with null bounds");
            return Ok(());
        }
        self.staged.get_mut().push(ItemSlot { bounds, item });
        Ok(())
    }

    /// Pack the staged items. Does nothing if the tree is already built.
    pub fn build(&self) {
        let _ = self.arena();
    }

    pub(crate) fn arena(&self) -> &Arena<B, T> {
        self.built
            .get_or_init(|| Arena::pack(self.staged.take(), self.node_capacity, &self.strategy))
    }

    /// The root node, building first if needed.
    pub fn root(&self) -> NodeRef<'_, B, T> {
        let arena = self.arena();
        NodeRef::new(arena, arena.root)
    }

    /// Bounds of the root; null for an empty tree.
    pub fn root_bounds(&self) -> B {
        self.root().bounds()
    }

    pub(crate) fn root_boundable(&self) -> Boundable<'_, B, T> {
        Boundable::Node(self.root())
    }

    /// Items whose bounds intersect `bounds`, in tree order.
    pub fn query(&self, bounds: &B) -> Vec<&T> {
        let mut out = Vec::new();
        self.query_with(bounds, |item| out.push(item));
        out
    }

    /// Visit every item whose bounds intersect `bounds`.
    pub fn query_with<'a, F>(&'a self, bounds: &B, mut visitor: F)
    where
        F: FnMut(&'a T),
    {
        let arena = self.arena();
        if !self.strategy.intersects(&arena.node(arena.root).bounds, bounds) {
            return;
        }
        let mut stack = vec![arena.root];
        while let Some(idx) = stack.pop() {
            for child in &arena.node(idx).children {
                match *child {
                    Child::Node(ci) => {
                        if self.strategy.intersects(&arena.node(ci).bounds, bounds) {
                            stack.push(ci);
                        }
                    }
                    Child::Item(slot) => {
                        if let Some(entry) = &arena.items[slot]
                            && self.strategy.intersects(&entry.bounds, bounds)
                        {
                            visitor(&entry.item);
                        }
                    }
                }
            }
        }
    }

    /// Number of items reachable from the root.
    pub fn len(&self) -> usize {
        let arena = self.arena();
        let mut count = 0;
        let mut stack = vec![arena.root];
        while let Some(idx) = stack.pop() {
            for child in &arena.node(idx).children {
                match *child {
                    Child::Node(ci) => stack.push(ci),
                    Child::Item(_) => count += 1,
                }
            }
        }
        count
    }

    /// Whether the tree holds no items.
    pub fn is_empty(&self) -> bool {
        let arena = self.arena();
        arena.node(arena.root).children.is_empty()
    }

    /// Number of node levels; 0 for an empty tree.
    pub fn depth(&self) -> usize {
        let arena = self.arena();
        let root = arena.node(arena.root);
        if root.children.is_empty() {
            0
        } else {
            root.level + 1
        }
    }

    /// Remove one item equal to `item` that was inserted with bounds equal to `bounds`.
    ///
    /// Internal nodes left without children are pruned on the way back up. The tree is
    /// not rebalanced. Returns false if no such item is found.
    pub fn remove(&mut self, bounds: &B, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.build();
        let Some(arena) = self.built.get_mut() else {
            return false;
        };
        let root = arena.root;
        if !self.strategy.intersects(&arena.node(root).bounds, bounds) {
            return false;
        }
        let removed = remove_from(arena, &self.strategy, root, bounds, item);
        tracing::trace!(removed, "packed tree remove");
        removed
    }
}

fn remove_from<B, T, S>(
    arena: &mut Arena<B, T>,
    strategy: &S,
    node: NodeIdx,
    bounds: &B,
    item: &T,
) -> bool
where
    B: Bounds,
    T: PartialEq,
    S: PackStrategy<B>,
{
    let found = arena.node(node).children.iter().position(|c| match *c {
        Child::Item(slot) => arena.items[slot]
            .as_ref()
            .is_some_and(|entry| entry.bounds == *bounds && entry.item == *item),
        Child::Node(_) => false,
    });
    if let Some(pos) = found {
        if let Child::Item(slot) = arena.nodes[node.get()].children.remove(pos) {
            arena.items[slot] = None;
        }
        return true;
    }

    let candidates: Vec<NodeIdx> = arena
        .node(node)
        .children
        .iter()
        .filter_map(|c| match *c {
            Child::Node(ci) if strategy.intersects(&arena.node(ci).bounds, bounds) => Some(ci),
            _ => None,
        })
        .collect();
    for ci in candidates {
        if remove_from(arena, strategy, ci, bounds, item) {
            if arena.node(ci).children.is_empty() {
                arena.nodes[node.get()]
                    .children
                    .retain(|c| *c != Child::Node(ci));
            }
            return true;
        }
    }
    false
}

impl<B: Bounds, T> Arena<B, T> {
    /// Pack items bottom-up until a single root remains.
    pub(crate) fn pack<S: PackStrategy<B>>(
        items: Vec<ItemSlot<B, T>>,
        node_capacity: usize,
        strategy: &S,
    ) -> Self {
        let item_count = items.len();
        let mut arena = Self {
            nodes: Vec::new(),
            items: items.into_iter().map(Some).collect(),
            root: NodeIdx::new(0),
        };
        if item_count == 0 {
            arena.root = arena.push_node(0, Vec::new());
            tracing::debug!("built empty packed tree");
            return arena;
        }

        let mut level = 0;
        let mut boundables: Vec<Child> = (0..item_count).map(Child::Item).collect();
        loop {
            let parents =
                arena.create_parent_boundables(boundables, level, node_capacity, strategy);
            if let [Child::Node(root)] = parents.as_slice() {
                arena.root = *root;
                break;
            }
            boundables = parents;
            level += 1;
        }
        tracing::debug!(
            items = item_count,
            nodes = arena.nodes.len(),
            depth = level + 1,
            "built packed tree"
        );
        arena
    }

    /// Wrap each strategy-chosen run of `children` in a new node at `new_level`.
    fn create_parent_boundables<S: PackStrategy<B>>(
        &mut self,
        children: Vec<Child>,
        new_level: usize,
        node_capacity: usize,
        strategy: &S,
    ) -> Vec<Child> {
        assert!(
            !children.is_empty(),
            "cannot create parent boundables for an empty level"
        );
        let keyed: Vec<(B, Child)> = children
            .into_iter()
            .map(|c| (self.child_bounds(c), c))
            .collect();
        strategy
            .group(keyed, node_capacity)
            .into_iter()
            .map(|run| Child::Node(self.push_node(new_level, run)))
            .collect()
    }
}

impl<B: Bounds, T, S: PackStrategy<B>> Debug for PackedTree<B, T, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PackedTree")
            .field("node_capacity", &self.node_capacity)
            .field("strategy", &self.strategy)
            .field("built", &self.is_built())
            .field("arena_nodes", &self.built.get().map(|a| a.nodes.len()))
            .finish_non_exhaustive()
    }
}
