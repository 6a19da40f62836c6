// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by hierarchy construction and packing.

use crate::types::NodeId;

/// Reasons a hierarchy cannot be built or packed.
///
/// Geometric infeasibility is not an error: rectangles the growing packer cannot place are
/// reported through [`NodeLayout::placed`](crate::NodeLayout::placed) instead.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum PackError {
    /// `unit_size` must be positive and finite.
    #[error("unit size must be positive and finite, got {0}")]
    InvalidUnitSize(f64),
    /// `min_group_width` must be positive and finite.
    #[error("minimum group width must be positive and finite, got {0}")]
    InvalidMinGroupWidth(f64),
    /// `aspect_ratio` must be positive and finite.
    #[error("aspect ratio must be positive and finite, got {0}")]
    InvalidAspectRatio(f64),
    /// Unit padding, group padding and group margin must be finite and non-negative.
    #[error("padding and margin must be finite and non-negative")]
    NegativeSpacing,
    /// A group has both leaf and group children.
    #[error("group {0:?} mixes leaf and group children")]
    MixedChildren(NodeId),
    /// Children can only be added to groups.
    #[error("node {0:?} is a leaf and cannot have children")]
    NotAGroup(NodeId),
    /// The identifier does not refer to a node of this hierarchy.
    #[error("node {0:?} does not belong to this hierarchy")]
    UnknownNode(NodeId),
}
