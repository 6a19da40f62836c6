// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The growing packer: free-region tree, first-fit search, and growth policy.

use alloc::vec::Vec;
use kurbo::{Point, Rect, Size};
use smallvec::SmallVec;

/// Direction in which the packer's bounding box is extended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Growth {
    /// Widen the box by the rectangle's width.
    Right,
    /// Heighten the box by the rectangle's height.
    Down,
}

/// Decide how a box of size `bounds` should grow to make room for `size`.
///
/// Growing down requires `size` to be no wider than `bounds`, and growing right requires it
/// to be no taller. Among the legal directions, right wins when the ratio
/// `bounds.height / (bounds.width + size.width)` would still exceed `aspect_ratio`, then
/// down when `bounds.width / (bounds.height + size.height)` would; otherwise right, then down.
///
/// Returns `None` when `size` exceeds `bounds` on both axes.
pub fn growth_direction(bounds: Size, size: Size, aspect_ratio: f64) -> Option<Growth> {
    let can_grow_down = size.width <= bounds.width;
    let can_grow_right = size.height <= bounds.height;

    let should_grow_right =
        can_grow_right && bounds.height / (bounds.width + size.width) > aspect_ratio;
    let should_grow_down =
        can_grow_down && bounds.width / (bounds.height + size.height) > aspect_ratio;

    if should_grow_right {
        Some(Growth::Right)
    } else if should_grow_down {
        Some(Growth::Down)
    } else if can_grow_right {
        Some(Growth::Right)
    } else if can_grow_down {
        Some(Growth::Down)
    } else {
        None
    }
}

/// Result of [`GrowingPacker::fit`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Fit {
    /// Top-left corner assigned to each input rectangle, in input order.
    /// `None` marks a rectangle that could not be placed.
    pub placements: Vec<Option<Point>>,
    /// Final bounding box of the packed region, anchored at the origin.
    pub bounds: Size,
}

impl Fit {
    /// Position assigned to the rectangle at `index`, if it was placed.
    pub fn placement(&self, index: usize) -> Option<Point> {
        self.placements.get(index).copied().flatten()
    }

    /// Indices of rectangles that could not be placed.
    pub fn unplaced(&self) -> impl Iterator<Item = usize> + '_ {
        self.placements
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.is_none().then_some(i))
    }

    /// Returns `true` if every rectangle received a position.
    pub fn is_complete(&self) -> bool {
        self.placements.iter().all(Option::is_some)
    }

    /// Placed rectangles as `(index, rect)` pairs, given the sizes passed to `fit`.
    pub fn rects<'a>(&'a self, sizes: &'a [Size]) -> impl Iterator<Item = (usize, Rect)> + 'a {
        self.placements
            .iter()
            .zip(sizes)
            .enumerate()
            .filter_map(|(i, (p, s))| p.map(|p| (i, Rect::from_origin_size(p, *s))))
    }
}

type RegionIdx = usize;

#[derive(Copy, Clone, Debug)]
struct Split {
    down: RegionIdx,
    right: RegionIdx,
}

/// A node of the free-region tree: either free, or used and split in two.
#[derive(Copy, Clone, Debug)]
struct Region {
    origin: Point,
    size: Size,
    split: Option<Split>,
}

impl Region {
    fn free(origin: Point, size: Size) -> Self {
        Self {
            origin,
            size,
            split: None,
        }
    }

    fn accepts(&self, size: Size) -> bool {
        size.width <= self.size.width && size.height <= self.size.height
    }
}

/// Packs rectangles into a bounding box that grows as needed.
///
/// The free-region tree lives only for the duration of one [`fit`](Self::fit) call; afterwards
/// the packer retains the final bounds (see [`bounds`](Self::bounds)) and the region storage
/// for reuse.
///
/// ## Example
///
/// ```rust
/// use kurbo::Size;
/// use understory_growing_pack::GrowingPacker;
///
/// // A seed smaller than the next rectangle on both axes cannot grow to fit it.
/// let mut packer = GrowingPacker::new();
/// let fit = packer.fit(&[Size::new(10.0, 10.0), Size::new(20.0, 20.0)], 1.0);
/// assert!(fit.placement(0).is_some());
/// assert_eq!(fit.placement(1), None);
/// assert_eq!(packer.bounds(), Size::new(10.0, 10.0));
/// ```
#[derive(Clone, Debug)]
pub struct GrowingPacker {
    regions: Vec<Region>,
    root: RegionIdx,
    aspect_ratio: f64,
    bounds: Size,
}

impl Default for GrowingPacker {
    fn default() -> Self {
        Self::new()
    }
}

impl GrowingPacker {
    /// Create a packer with empty bounds and a square target.
    pub fn new() -> Self {
        Self {
            regions: Vec::new(),
            root: 0,
            aspect_ratio: 1.0,
            bounds: Size::ZERO,
        }
    }

    /// Bounding box produced by the most recent [`fit`](Self::fit).
    pub fn bounds(&self) -> Size {
        self.bounds
    }

    /// Target aspect ratio used by the most recent [`fit`](Self::fit).
    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    /// Pack `sizes` in order and return their positions plus the final bounds.
    ///
    /// `aspect_ratio` is the target `height / width` of the bounding box and only biases the
    /// growth direction. Values that are not positive and finite fall back to `1.0`.
    ///
    /// An empty input yields empty placements and zero bounds.
    pub fn fit(&mut self, sizes: &[Size], aspect_ratio: f64) -> Fit {
        self.aspect_ratio = if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
            aspect_ratio
        } else {
            1.0
        };
        self.regions.clear();
        let seed = sizes.first().copied().unwrap_or(Size::ZERO);
        self.root = self.push(Region::free(Point::ORIGIN, seed));

        let mut placements = Vec::with_capacity(sizes.len());
        for &size in sizes {
            debug_assert!(
                size.is_finite() && size.width >= 0.0 && size.height >= 0.0,
                "rectangle sizes must be finite and non-negative, got {size:?}"
            );
            let placement = match self.find_region(self.root, size) {
                Some(idx) => Some(self.split_region(idx, size)),
                None => self.grow(size),
            };
            placements.push(placement);
        }

        self.bounds = self.regions[self.root].size;
        self.regions.clear();
        Fit {
            placements,
            bounds: self.bounds,
        }
    }

    fn push(&mut self, region: Region) -> RegionIdx {
        self.regions.push(region);
        self.regions.len() - 1
    }

    /// First free region under `start` that accepts `size`, right branches first.
    fn find_region(&self, start: RegionIdx, size: Size) -> Option<RegionIdx> {
        let mut stack: SmallVec<[RegionIdx; 32]> = SmallVec::new();
        stack.push(start);
        while let Some(idx) = stack.pop() {
            let region = &self.regions[idx];
            match region.split {
                Some(Split { down, right }) => {
                    stack.push(down);
                    stack.push(right);
                }
                None if region.accepts(size) => return Some(idx),
                None => {}
            }
        }
        None
    }

    /// Mark region `idx` used by a rectangle of `size` and return the rectangle's origin.
    fn split_region(&mut self, idx: RegionIdx, size: Size) -> Point {
        let Region {
            origin,
            size: avail,
            ..
        } = self.regions[idx];
        let down = self.push(Region::free(
            Point::new(origin.x, origin.y + size.height),
            Size::new(avail.width, avail.height - size.height),
        ));
        let right = self.push(Region::free(
            Point::new(origin.x + size.width, origin.y),
            Size::new(avail.width - size.width, size.height),
        ));
        self.regions[idx].split = Some(Split { down, right });
        origin
    }

    fn grow(&mut self, size: Size) -> Option<Point> {
        let bounds = self.regions[self.root].size;
        let Some(direction) = growth_direction(bounds, size, self.aspect_ratio) else {
            log::warn!(
                "unable to grow {}x{} box to fit {}x{} rectangle",
                bounds.width,
                bounds.height,
                size.width,
                size.height
            );
            return None;
        };
        log::trace!("growing {direction:?} to fit {}x{}", size.width, size.height);

        let old_root = self.root;
        self.root = match direction {
            Growth::Right => {
                let strip = self.push(Region::free(
                    Point::new(bounds.width, 0.0),
                    Size::new(size.width, bounds.height),
                ));
                self.push(Region {
                    origin: Point::ORIGIN,
                    size: Size::new(bounds.width + size.width, bounds.height),
                    split: Some(Split {
                        down: old_root,
                        right: strip,
                    }),
                })
            }
            Growth::Down => {
                let strip = self.push(Region::free(
                    Point::new(0.0, bounds.height),
                    Size::new(bounds.width, size.height),
                ));
                self.push(Region {
                    origin: Point::ORIGIN,
                    size: Size::new(bounds.width, bounds.height + size.height),
                    split: Some(Split {
                        down: strip,
                        right: old_root,
                    }),
                })
            }
        };

        match self.find_region(self.root, size) {
            Some(idx) => Some(self.split_region(idx, size)),
            None => {
                log::warn!(
                    "grew {direction:?} but found no region for {}x{} rectangle",
                    size.width,
                    size.height
                );
                None
            }
        }
    }
}
