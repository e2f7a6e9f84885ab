// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arena storage for built trees and the boundable views handed to callers.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::bounds::Bounds;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeIdx(usize);

impl NodeIdx {
    pub(crate) const fn new(i: usize) -> Self {
        Self(i)
    }

    pub(crate) const fn get(self) -> usize {
        self.0
    }
}

/// A child reference inside a node: another node, or an item slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Child {
    Node(NodeIdx),
    Item(usize),
}

#[derive(Clone, Debug)]
pub(crate) struct Node<B> {
    /// Union of the children's bounds, fixed when the node is sealed.
    pub(crate) bounds: B,
    /// 0 for nodes whose children are items.
    pub(crate) level: usize,
    pub(crate) children: Vec<Child>,
}

#[derive(Clone, Debug)]
pub(crate) struct ItemSlot<B, T> {
    pub(crate) bounds: B,
    pub(crate) item: T,
}

/// Built form of a packed tree.
///
/// Items keep their insertion slot for the lifetime of the tree; a removed item
/// leaves `None` behind and is no longer referenced by any node.
pub(crate) struct Arena<B, T> {
    pub(crate) nodes: Vec<Node<B>>,
    pub(crate) items: Vec<Option<ItemSlot<B, T>>>,
    pub(crate) root: NodeIdx,
}

impl<B: Bounds, T> Arena<B, T> {
    #[inline]
    pub(crate) fn node(&self, idx: NodeIdx) -> &Node<B> {
        &self.nodes[idx.get()]
    }

    pub(crate) fn child_bounds(&self, child: Child) -> B {
        match child {
            Child::Node(idx) => self.node(idx).bounds,
            Child::Item(slot) => self.items[slot]
                .as_ref()
                .map_or_else(B::null, |entry| entry.bounds),
        }
    }

    /// Seal a new node over `children`, computing its bounds once.
    pub(crate) fn push_node(&mut self, level: usize, children: Vec<Child>) -> NodeIdx {
        let bounds = children
            .iter()
            .fold(B::null(), |acc, c| acc.union(&self.child_bounds(*c)));
        let idx = NodeIdx::new(self.nodes.len());
        self.nodes.push(Node {
            bounds,
            level,
            children,
        });
        idx
    }

    pub(crate) fn boundable(&self, child: Child) -> Option<Boundable<'_, B, T>> {
        match child {
            Child::Node(idx) => Some(Boundable::Node(NodeRef { arena: self, idx })),
            Child::Item(slot) => self.items[slot].as_ref().map(|entry| {
                Boundable::Item(ItemBoundable {
                    bounds: entry.bounds,
                    item: &entry.item,
                    slot: Some(slot),
                })
            }),
        }
    }
}

/// A leaf of a tree: an item together with the bounds it was inserted with.
///
/// Also used for query items that are not stored in any tree
/// (see [`PackedTree::nearest_neighbour_item`](crate::PackedTree::nearest_neighbour_item)).
pub struct ItemBoundable<'a, B, T> {
    /// Bounds the item was inserted with.
    pub bounds: B,
    /// The caller's payload.
    pub item: &'a T,
    slot: Option<usize>,
}

impl<'a, B, T> ItemBoundable<'a, B, T> {
    /// An item that is not stored in a tree.
    pub const fn new(bounds: B, item: &'a T) -> Self {
        Self {
            bounds,
            item,
            slot: None,
        }
    }

    /// Storage slot inside the owning tree, if the item lives in one.
    pub(crate) const fn slot(&self) -> Option<usize> {
        self.slot
    }
}

impl<B: Copy, T> Clone for ItemBoundable<'_, B, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: Copy, T> Copy for ItemBoundable<'_, B, T> {}

impl<B: Debug, T: Debug> Debug for ItemBoundable<'_, B, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ItemBoundable")
            .field("bounds", &self.bounds)
            .field("item", self.item)
            .finish_non_exhaustive()
    }
}

/// A borrowed internal node of a built tree.
pub struct NodeRef<'a, B, T> {
    arena: &'a Arena<B, T>,
    idx: NodeIdx,
}

impl<'a, B: Bounds, T> NodeRef<'a, B, T> {
    pub(crate) const fn new(arena: &'a Arena<B, T>, idx: NodeIdx) -> Self {
        Self { arena, idx }
    }

    /// Union of the children's bounds (null for a node without children).
    pub fn bounds(&self) -> B {
        self.arena.node(self.idx).bounds
    }

    /// Level in the tree; 0 for nodes whose children are items.
    pub fn level(&self) -> usize {
        self.arena.node(self.idx).level
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.arena.node(self.idx).children.len()
    }

    /// Whether the node has no children.
    pub fn is_empty(&self) -> bool {
        self.arena.node(self.idx).children.is_empty()
    }

    /// Direct children in stored order.
    pub fn children(self) -> impl Iterator<Item = Boundable<'a, B, T>> {
        let arena = self.arena;
        arena
            .node(self.idx)
            .children
            .iter()
            .filter_map(move |c| arena.boundable(*c))
    }
}

impl<B, T> Clone for NodeRef<'_, B, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B, T> Copy for NodeRef<'_, B, T> {}

impl<B: Bounds, T> Debug for NodeRef<'_, B, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NodeRef")
            .field("bounds", &self.bounds())
            .field("level", &self.level())
            .field("children", &self.len())
            .finish_non_exhaustive()
    }
}

/// Anything with bounds inside a tree: an internal node or an item.
pub enum Boundable<'a, B, T> {
    /// Internal node.
    Node(NodeRef<'a, B, T>),
    /// Leaf item.
    Item(ItemBoundable<'a, B, T>),
}

impl<B: Bounds, T> Boundable<'_, B, T> {
    /// Bounds of the node or item.
    pub fn bounds(&self) -> B {
        match self {
            Self::Node(node) => node.bounds(),
            Self::Item(item) => item.bounds,
        }
    }

    /// Whether this is a leaf item.
    pub fn is_item(&self) -> bool {
        matches!(self, Self::Item(_))
    }
}

impl<B: Copy, T> Clone for Boundable<'_, B, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: Copy, T> Copy for Boundable<'_, B, T> {}

impl<B: Bounds, T: Debug> Debug for Boundable<'_, B, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Node(node) => f.debug_tuple("Node").field(node).finish(),
            Self::Item(item) => f.debug_tuple("Item").field(item).finish(),
        }
    }
}
