// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input arena: groups and leaves carrying caller payloads.

use alloc::{vec, vec::Vec};
use core::hash::Hash;
use core::ops::Index;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use crate::error::PackError;
use crate::types::NodeId;

#[derive(Clone, Debug)]
enum Kind {
    Leaf,
    Group(Vec<NodeId>),
}

#[derive(Clone, Debug)]
struct Slot<T> {
    data: T,
    parent: Option<NodeId>,
    depth: usize,
    kind: Kind,
}

/// A tree of groups terminating in leaves, stored as an arena.
///
/// The root is always a group. Every node is created either as a group
/// ([`add_group`](Self::add_group)) or as a leaf ([`add_leaf`](Self::add_leaf)); the kind never
/// changes afterwards. Children keep insertion order; the packer applies its own sibling
/// ordering without touching the hierarchy.
///
/// ## Example
///
/// ```rust
/// use understory_rect_pack::Hierarchy;
///
/// let mut tree = Hierarchy::new("root");
/// let fruit = tree.add_group(tree.root(), "fruit").unwrap();
/// let apple = tree.add_leaf(fruit, "apple").unwrap();
///
/// assert_eq!(tree.children_of(fruit), &[apple]);
/// assert_eq!(tree.depth(apple), Some(2));
/// assert!(tree.add_leaf(apple, "seed").is_err());
/// ```
#[derive(Clone, Debug)]
pub struct Hierarchy<T> {
    nodes: Vec<Slot<T>>,
}

#[allow(
    clippy::len_without_is_empty,
    reason = "A hierarchy always contains its root."
)]
impl<T> Hierarchy<T> {
    /// Create a hierarchy containing only a root group.
    pub fn new(root: T) -> Self {
        Self {
            nodes: vec![Slot {
                data: root,
                parent: None,
                depth: 0,
                kind: Kind::Group(Vec::new()),
            }],
        }
    }

    /// Build a hierarchy from flat records, one grouping level per key function.
    ///
    /// For every record, each key in `keys` selects (or creates) a child group of the group
    /// chosen by the previous key, and the record is appended as a leaf of the last one.
    /// Groups appear in the order their key is first seen; `make_group` builds their payload.
    /// With no keys, every record becomes a leaf of the root.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use understory_rect_pack::Hierarchy;
    ///
    /// // Group 1..=5 by parity; group payloads are 0.
    /// let keys: [&dyn Fn(&u32) -> bool; 1] = [&|n: &u32| n % 2 == 0];
    /// let tree = Hierarchy::grouped(0, 1..=5_u32, &keys, |_| 0);
    ///
    /// let root = tree.root();
    /// assert_eq!(tree.children_of(root).len(), 2);
    /// let odd = tree.children_of(root)[0];
    /// assert_eq!(tree.children_of(odd).len(), 3);
    /// ```
    pub fn grouped<K, I>(
        root: T,
        items: I,
        keys: &[&dyn Fn(&T) -> K],
        mut make_group: impl FnMut(&K) -> T,
    ) -> Self
    where
        K: Hash + Eq,
        I: IntoIterator<Item = T>,
    {
        let mut tree = Self::new(root);
        let mut groups: HashMap<(NodeId, K), NodeId> = HashMap::new();
        for item in items {
            let mut parent = tree.root();
            for key in keys {
                parent = match groups.entry((parent, key(&item))) {
                    Entry::Occupied(entry) => *entry.get(),
                    Entry::Vacant(entry) => {
                        let data = make_group(&entry.key().1);
                        let id = tree.push_child(parent, data, Kind::Group(Vec::new()));
                        *entry.insert(id)
                    }
                };
            }
            tree.push_child(parent, item, Kind::Leaf);
        }
        tree
    }

    /// The root group.
    pub const fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Append a new group under `parent`.
    pub fn add_group(&mut self, parent: NodeId, data: T) -> Result<NodeId, PackError> {
        self.check_parent(parent)?;
        Ok(self.push_child(parent, data, Kind::Group(Vec::new())))
    }

    /// Append a new leaf under `parent`.
    pub fn add_leaf(&mut self, parent: NodeId, data: T) -> Result<NodeId, PackError> {
        self.check_parent(parent)?;
        Ok(self.push_child(parent, data, Kind::Leaf))
    }

    /// Payload of a node.
    pub fn data(&self, id: NodeId) -> Option<&T> {
        self.nodes.get(id.idx()).map(|slot| &slot.data)
    }

    /// Mutable payload of a node.
    pub fn data_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.nodes.get_mut(id.idx()).map(|slot| &mut slot.data)
    }

    /// Parent of a node; `None` for the root and for unknown identifiers.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.idx()).and_then(|slot| slot.parent)
    }

    /// Children of a node in insertion order. Empty for leaves and unknown identifiers.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        match self.nodes.get(id.idx()).map(|slot| &slot.kind) {
            Some(Kind::Group(children)) => children,
            _ => &[],
        }
    }

    /// Returns `true` if `id` is a leaf of this hierarchy.
    pub fn is_leaf(&self, id: NodeId) -> bool {
        matches!(
            self.nodes.get(id.idx()).map(|slot| &slot.kind),
            Some(Kind::Leaf)
        )
    }

    /// Returns `true` if `id` is a group of this hierarchy.
    pub fn is_group(&self, id: NodeId) -> bool {
        matches!(
            self.nodes.get(id.idx()).map(|slot| &slot.kind),
            Some(Kind::Group(_))
        )
    }

    /// Distance from the root; the root has depth `0`.
    pub fn depth(&self, id: NodeId) -> Option<usize> {
        self.nodes.get(id.idx()).map(|slot| slot.depth)
    }

    /// All nodes in pre-order (parents before children, siblings in insertion order).
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack = vec![self.root()];
        core::iter::from_fn(move || {
            let id = stack.pop()?;
            stack.extend(self.children_of(id).iter().rev().copied());
            Some(id)
        })
    }

    /// All leaves in pre-order.
    pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.iter().filter(|id| self.is_leaf(*id))
    }

    /// Check that no group mixes leaf and group children.
    ///
    /// Leaf-only groups are laid out as grids and group-only groups with the growing packer;
    /// a group with both kinds has no defined layout and is rejected with
    /// [`PackError::MixedChildren`].
    pub fn validate(&self) -> Result<(), PackError> {
        for id in self.iter() {
            let mut kinds = self.children_of(id).iter().map(|c| self.is_leaf(*c));
            if let Some(first) = kinds.next()
                && kinds.any(|leaf| leaf != first)
            {
                return Err(PackError::MixedChildren(id));
            }
        }
        Ok(())
    }

    fn check_parent(&self, parent: NodeId) -> Result<(), PackError> {
        match self.nodes.get(parent.idx()).map(|slot| &slot.kind) {
            None => Err(PackError::UnknownNode(parent)),
            Some(Kind::Leaf) => Err(PackError::NotAGroup(parent)),
            Some(Kind::Group(_)) => Ok(()),
        }
    }

    /// Append a child; `parent` must be a live group.
    fn push_child(&mut self, parent: NodeId, data: T, kind: Kind) -> NodeId {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices by design."
        )]
        let id = NodeId::new(self.nodes.len() as u32);
        let depth = self.nodes[parent.idx()].depth + 1;
        self.nodes.push(Slot {
            data,
            parent: Some(parent),
            depth,
            kind,
        });
        if let Kind::Group(children) = &mut self.nodes[parent.idx()].kind {
            children.push(id);
        }
        id
    }
}

impl<T> Index<NodeId> for Hierarchy<T> {
    type Output = T;

    fn index(&self, id: NodeId) -> &T {
        &self.nodes[id.idx()].data
    }
}
