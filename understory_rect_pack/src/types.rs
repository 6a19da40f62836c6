// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the packer: node identifiers, configuration, and caller hooks.

use kurbo::Insets;

use crate::error::PackError;

/// Identifier for a node in a [`Hierarchy`](crate::Hierarchy) and its [`Layout`](crate::Layout).
///
/// Identifiers are plain arena indices. They are only meaningful for the hierarchy that
/// issued them and for layouts packed from it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32) -> Self {
        Self(idx)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Position of this node in its arena; the root is `0`.
    pub const fn index(self) -> usize {
        self.idx()
    }
}

/// Payloads that expose a numeric weight for the default sibling ordering.
///
/// [`RectanglePacker::new`](crate::RectanglePacker::new) sorts siblings by descending
/// [`value`](Self::value). Group payloads take part in the ordering too, so they must
/// implement it even if they return a constant.
pub trait Weighted {
    /// Sort key; larger values come first.
    fn value(&self) -> f64;
}

/// Strategy for shaping leaf grids differently from the default square-ish rows.
///
/// Installed with
/// [`RectanglePacker::with_unit_pack_constraints`](crate::RectanglePacker::with_unit_pack_constraints).
pub trait UnitPackConstraints: Send + Sync {
    /// Units per row for a grid of `unit_count` leaves.
    ///
    /// `naive` is the default, `ceil(sqrt(unit_count))`. Returning `0` is treated as `1`.
    fn constrained_units_per_row(&self, aspect_ratio: f64, unit_count: usize, naive: usize)
    -> usize;

    /// Width multiplier applied to a leaf grid sitting directly in the root.
    ///
    /// Without constraints the root grid is stretched by `aspect_ratio` itself.
    fn constrained_aspect_ratio(&self, aspect_ratio: f64) -> f64;
}

/// Numeric layout parameters.
///
/// ## Example
///
/// ```rust
/// use kurbo::Insets;
/// use understory_rect_pack::PackConfig;
///
/// let config = PackConfig::default()
///     .with_unit_size(8.0)
///     .with_unit_padding(1.0)
///     .with_group_padding(Insets::new(10.0, 20.0, 10.0, 10.0));
/// assert!(config.validate().is_ok());
/// assert!(config.with_unit_size(0.0).validate().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PackConfig {
    /// Target `height / width` ratio. Biases group growth and stretches root leaf grids.
    pub aspect_ratio: f64,
    /// Lower bound for the width of a leaf grid.
    pub min_group_width: f64,
    /// Width and height of every leaf.
    pub unit_size: f64,
    /// Gap around each leaf inside a grid.
    pub unit_padding: f64,
    /// Space between a group's frame and its content.
    pub group_padding: Insets,
    /// Space reserved around a group's frame when its parent packs it among siblings.
    pub group_margin: Insets,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: 1.0,
            min_group_width: 1.0,
            unit_size: 10.0,
            unit_padding: 0.0,
            group_padding: Insets::uniform(10.0),
            group_margin: Insets::uniform(20.0),
        }
    }
}

impl PackConfig {
    /// Set the target aspect ratio.
    pub fn with_aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set the minimum leaf-grid width.
    pub fn with_min_group_width(mut self, min_group_width: f64) -> Self {
        self.min_group_width = min_group_width;
        self
    }

    /// Set the leaf size.
    pub fn with_unit_size(mut self, unit_size: f64) -> Self {
        self.unit_size = unit_size;
        self
    }

    /// Set the gap around leaves.
    pub fn with_unit_padding(mut self, unit_padding: f64) -> Self {
        self.unit_padding = unit_padding;
        self
    }

    /// Set the group padding.
    pub fn with_group_padding(mut self, group_padding: Insets) -> Self {
        self.group_padding = group_padding;
        self
    }

    /// Set the group margin.
    pub fn with_group_margin(mut self, group_margin: Insets) -> Self {
        self.group_margin = group_margin;
        self
    }

    /// Check that the parameters describe non-degenerate geometry.
    pub fn validate(&self) -> Result<(), PackError> {
        if !is_positive(self.unit_size) {
            return Err(PackError::InvalidUnitSize(self.unit_size));
        }
        if !is_positive(self.min_group_width) {
            return Err(PackError::InvalidMinGroupWidth(self.min_group_width));
        }
        if !is_positive(self.aspect_ratio) {
            return Err(PackError::InvalidAspectRatio(self.aspect_ratio));
        }
        let spacing_ok = is_non_negative(self.unit_padding)
            && insets_non_negative(self.group_padding)
            && insets_non_negative(self.group_margin);
        if !spacing_ok {
            return Err(PackError::NegativeSpacing);
        }
        Ok(())
    }
}

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

fn is_non_negative(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}

fn insets_non_negative(i: Insets) -> bool {
    [i.x0, i.y0, i.x1, i.y1].into_iter().all(is_non_negative)
}
