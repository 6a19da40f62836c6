// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Output arena: per-node boxes produced by [`RectanglePacker::pack`](crate::RectanglePacker::pack).

use alloc::{vec, vec::Vec};
use core::ops::Index;

use kurbo::{Insets, Rect, Size};

use crate::types::NodeId;

/// Computed geometry for one node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeLayout {
    /// Content box in root coordinates.
    ///
    /// For a leaf this is the unit square. For a group it encloses everything laid out inside
    /// it; the group's own padding and margin sit outside this box.
    pub rect: Rect,
    /// Padding around the content box. Uniform `unit_padding` for leaves.
    pub padding: Insets,
    /// Margin around the padded box. Zero for leaves.
    pub margin: Insets,
    /// Footprint: `unit_size²` for leaves, `width × height` for leaf grids, and the sum of the
    /// children's areas for groups of groups.
    pub area: f64,
    /// Width actually consumed by a leaf grid: tight for a single row, nominal otherwise.
    /// `None` for leaves and groups of groups.
    pub real_width: Option<f64>,
    /// Distance from the root.
    pub depth: usize,
    /// `false` if this node, or one of its ancestors, could not be positioned.
    pub placed: bool,
}

impl NodeLayout {
    pub(crate) fn new(depth: usize, padding: Insets, margin: Insets) -> Self {
        Self {
            rect: Rect::ZERO,
            padding,
            margin,
            area: 0.0,
            real_width: None,
            depth,
            placed: true,
        }
    }

    /// Size of the content box.
    pub fn size(&self) -> Size {
        self.rect.size()
    }

    /// Content box grown by the padding; the visible frame of a group.
    pub fn padded_rect(&self) -> Rect {
        self.rect + self.padding
    }

    /// Padded box grown by the margin; the footprint reserved among siblings.
    pub fn margin_rect(&self) -> Rect {
        self.padded_rect() + self.margin
    }
}

/// Boxes for every node of a packed [`Hierarchy`](crate::Hierarchy), indexed by [`NodeId`].
///
/// The layout shares the hierarchy's identifiers but not its sibling order: children are
/// listed in the order they were laid out.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    pub(crate) nodes: Vec<NodeLayout>,
    pub(crate) children: Vec<Vec<NodeId>>,
}

#[allow(
    clippy::len_without_is_empty,
    reason = "A layout always contains its root."
)]
impl Layout {
    /// The root node.
    pub const fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Geometry of a node.
    pub fn get(&self, id: NodeId) -> Option<&NodeLayout> {
        self.nodes.get(id.idx())
    }

    /// Content box of a node in root coordinates.
    pub fn rect(&self, id: NodeId) -> Option<Rect> {
        self.get(id).map(|n| n.rect)
    }

    /// Content box of the root.
    pub fn bounds(&self) -> Rect {
        self.nodes[0].rect
    }

    /// Children of a node in laid-out order.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.children.get(id.idx()).map_or(&[], Vec::as_slice)
    }

    /// All nodes in pre-order, following laid-out sibling order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &NodeLayout)> + '_ {
        let mut stack = vec![self.root()];
        core::iter::from_fn(move || {
            let id = stack.pop()?;
            stack.extend(self.children_of(id).iter().rev().copied());
            Some((id, &self.nodes[id.idx()]))
        })
    }

    /// Nodes left without a position.
    pub fn unplaced(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.iter().filter(|(_, n)| !n.placed).map(|(id, _)| id)
    }
}

impl Index<NodeId> for Layout {
    type Output = NodeLayout;

    fn index(&self, id: NodeId) -> &NodeLayout {
        &self.nodes[id.idx()]
    }
}
