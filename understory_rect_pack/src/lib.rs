// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_rect_pack --heading-base-level=0

//! Understory Rect Pack: hierarchical rectangle packing for nested-box visualizations.
//!
//! Given a tree of groups terminating in fixed-size leaves, this crate computes a
//! non-overlapping box for every node, so the whole tree can be drawn as nested rectangles
//! (a treemap-like view where every leaf is the same size).
//!
//! - Leaves are `unit_size` squares.
//! - A group of leaves becomes a compact grid, stretched toward the target aspect ratio when it
//!   sits in the root and toward square when nested.
//! - A group of groups packs its children, each grown by padding and margin, with the
//!   [`GrowingPacker`](understory_growing_pack::GrowingPacker) from `understory_growing_pack`.
//!
//! Layout runs in two passes: sizes are computed bottom-up with positions relative to the
//! parent, then a top-down pass moves every box into root coordinates.
//!
//! ## Not a renderer
//!
//! The output is plain geometry. Drawing, hit testing, and incremental updates belong to the
//! caller; every [`RectanglePacker::pack`] call recomputes the whole layout.
//!
//! ## API overview
//!
//! - [`Hierarchy`]: input arena of groups and leaves carrying caller payloads.
//!   [`Hierarchy::grouped`] builds one from flat records and key functions.
//! - [`RectanglePacker`]: the layout driver, configured with [`PackConfig`], a
//!   [`SiblingOrder`] (default [`ByValue`] over [`Weighted`] payloads), and optional
//!   [`UnitPackConstraints`].
//! - [`Layout`] / [`NodeLayout`]: per-node boxes, padding, margin, area, and `real_width`,
//!   indexed by [`NodeId`].
//! - [`PackError`]: invalid configuration or hierarchies that mix leaves and groups as siblings.
//!
//! ## Example
//!
//! ```rust
//! use understory_rect_pack::{Hierarchy, PackConfig, RectanglePacker, Weighted};
//!
//! #[derive(Debug)]
//! enum Datum {
//!     Group(&'static str),
//!     Person { state: &'static str, score: f64 },
//! }
//!
//! impl Weighted for Datum {
//!     fn value(&self) -> f64 {
//!         match self {
//!             Self::Group(_) => 0.0,
//!             Self::Person { score, .. } => *score,
//!         }
//!     }
//! }
//!
//! let people = [("wa", 0.3), ("ca", 0.9), ("wa", 0.5), ("or", 0.1), ("ca", 0.2)]
//!     .map(|(state, score)| Datum::Person { state, score });
//! let by_state = |d: &Datum| match d {
//!     Datum::Person { state, .. } => *state,
//!     Datum::Group(name) => *name,
//! };
//! let keys: [&dyn Fn(&Datum) -> &'static str; 1] = [&by_state];
//! let tree = Hierarchy::grouped(Datum::Group("all"), people, &keys, |k| Datum::Group(*k));
//!
//! let layout = RectanglePacker::new(PackConfig::default()).pack(&tree).unwrap();
//! assert_eq!(layout.unplaced().count(), 0);
//!
//! // Every state group sits inside the root box.
//! let root = layout.bounds();
//! for state in layout.children_of(tree.root()) {
//!     let frame = layout[*state].margin_rect();
//!     assert_eq!(root.union(frame), root);
//! }
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod grid;
mod hierarchy;
mod layout;
mod packer;
mod types;

pub use error::PackError;
pub use hierarchy::Hierarchy;
pub use layout::{Layout, NodeLayout};
pub use packer::{ByValue, RectanglePacker, SiblingOrder};
pub use types::{NodeId, PackConfig, UnitPackConstraints, Weighted};
