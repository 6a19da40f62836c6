// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_growing_pack --heading-base-level=0

//! Understory Growing Pack: a binary-tree bin packer with a growing bounding box.
//!
//! Instead of packing into a fixed page, [`GrowingPacker`] starts with a box the size of the
//! first rectangle and grows it whenever the next rectangle does not fit any free region.
//! Each growth step widens *or* heightens the box, picking the direction that keeps the box
//! close to a target aspect ratio.
//!
//! - Free space is tracked as a binary tree of regions; placing a rectangle splits its region
//!   into a strip below and a strip to the right.
//! - Search is first-fit in depth-first order (right branch before down branch).
//! - Growth happens along one axis per step, so a rectangle that is both wider and taller than
//!   the current box cannot be placed. Such rectangles are reported as unplaced.
//!
//! Feed rectangles largest first (by area or by `max(width, height)`). The first rectangle
//! seeds the box; a small seed makes later rectangles unplaceable.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use understory_growing_pack::GrowingPacker;
//!
//! let sizes = [Size::new(40.0, 40.0), Size::new(50.0, 30.0)];
//! let mut packer = GrowingPacker::new();
//! let fit = packer.fit(&sizes, 1.0);
//!
//! assert_eq!(fit.placement(0), Some(Point::ORIGIN));
//! assert_eq!(fit.placement(1), Some(Point::new(40.0, 0.0)));
//! assert_eq!(fit.bounds, Size::new(90.0, 40.0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod packer;

pub use packer::{Fit, GrowingPacker, Growth, growth_direction};
