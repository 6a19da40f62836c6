// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The hierarchical packer: bottom-up sizing followed by a top-down position pass.

use alloc::{boxed::Box, vec, vec::Vec};
use core::cmp::Ordering;
use core::fmt;

use kurbo::{Insets, Point, Rect, Size, Vec2};
use understory_growing_pack::GrowingPacker;

use crate::error::PackError;
use crate::grid::{ceil_sqrt, shelf_pack};
use crate::hierarchy::Hierarchy;
use crate::layout::{Layout, NodeLayout};
use crate::types::{NodeId, PackConfig, UnitPackConstraints, Weighted};

/// Ordering applied to the children of every group before layout.
///
/// Implemented for closures `Fn(&T, &T) -> Ordering` and for [`ByValue`].
///
/// The comparison must be a total order. Siblings are sorted with `sort_by`, which
/// may panic when it is not, for example when a `partial_cmp` over NaN values is flattened to
/// `Equal`. Use [`f64::total_cmp`] for floating-point keys.
pub trait SiblingOrder<T> {
    /// Compare two sibling payloads; `Less` is laid out first.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T, F> SiblingOrder<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// Default sibling ordering: descending by [`Weighted::value`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ByValue;

impl<T: Weighted> SiblingOrder<T> for ByValue {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        b.value().total_cmp(&a.value())
    }
}

/// Lays out a [`Hierarchy`] as nested, non-overlapping boxes.
///
/// Groups whose children are leaves become grids of `unit_size` squares. Groups whose children
/// are groups pack those children, each inflated by its padding and margin, with a
/// [`GrowingPacker`] biased toward the configured aspect ratio.
///
/// The type parameter `S` selects the sibling ordering. It defaults to [`ByValue`], so most
/// callers only name `RectanglePacker` and implement [`Weighted`] for their payload.
///
/// ## Example
///
/// ```rust
/// use understory_rect_pack::{Hierarchy, PackConfig, RectanglePacker, Weighted};
///
/// struct Item(f64);
///
/// impl Weighted for Item {
///     fn value(&self) -> f64 {
///         self.0
///     }
/// }
///
/// let mut tree = Hierarchy::new(Item(0.0));
/// for v in [1.0, 4.0, 2.0, 3.0] {
///     tree.add_leaf(tree.root(), Item(v)).unwrap();
/// }
///
/// let layout = RectanglePacker::new(PackConfig::default()).pack(&tree).unwrap();
///
/// // Four 10x10 units form a 2x2 grid, offset by the root's padding.
/// assert_eq!(layout.bounds().size(), kurbo::Size::new(20.0, 20.0));
/// // Siblings are laid out by descending value.
/// let first = layout.children_of(tree.root())[0];
/// assert_eq!(tree[first].0, 4.0);
/// ```
pub struct RectanglePacker<S = ByValue> {
    config: PackConfig,
    order: S,
    constraints: Option<Box<dyn UnitPackConstraints>>,
}

impl<S> fmt::Debug for RectanglePacker<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RectanglePacker")
            .field("config", &self.config)
            .field("unit_pack_constraints", &self.constraints.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for RectanglePacker {
    fn default() -> Self {
        Self::new(PackConfig::default())
    }
}

impl RectanglePacker {
    /// Create a packer that orders siblings by descending [`Weighted::value`].
    pub fn new(config: PackConfig) -> Self {
        Self::with_order(config, ByValue)
    }
}

impl<S> RectanglePacker<S> {
    /// Create a packer with a custom sibling ordering.
    pub fn with_order(config: PackConfig, order: S) -> Self {
        Self {
            config,
            order,
            constraints: None,
        }
    }

    /// Install a strategy that reshapes leaf grids.
    pub fn with_unit_pack_constraints(
        mut self,
        constraints: impl UnitPackConstraints + 'static,
    ) -> Self {
        self.constraints = Some(Box::new(constraints));
        self
    }

    /// The numeric configuration.
    pub fn config(&self) -> &PackConfig {
        &self.config
    }

    /// Compute boxes for every node of `hierarchy`.
    ///
    /// Each call recomputes the layout from scratch and leaves `hierarchy` untouched.
    /// Fails if the configuration is degenerate or a group mixes leaf and group children.
    /// Nodes the growing packer cannot place are returned with
    /// [`placed`](NodeLayout::placed) set to `false`.
    pub fn pack<T>(&self, hierarchy: &Hierarchy<T>) -> Result<Layout, PackError>
    where
        S: SiblingOrder<T>,
    {
        self.config.validate()?;
        hierarchy.validate()?;

        let order: Vec<NodeId> = hierarchy.iter().collect();
        let mut layout = self.seed_layout(hierarchy, &order);

        let mut packer = GrowingPacker::new();
        for &id in order.iter().rev() {
            if hierarchy.is_group(id) {
                self.size_group(hierarchy, &mut layout, id, &mut packer);
            }
        }

        let root = hierarchy.root();
        if let Some(&first) = layout.children[root.idx()].first() {
            let node = &mut layout.nodes[root.idx()];
            let inset = if hierarchy.is_leaf(first) {
                node.padding
            } else {
                sum_insets(node.padding, node.margin)
            };
            node.rect = node.rect + Vec2::new(inset.x0, inset.y0);
        }

        resolve_positions(&mut layout);

        let bounds = layout.bounds();
        log::debug!(
            "packed {} nodes into {}x{}",
            layout.len(),
            bounds.width(),
            bounds.height()
        );
        Ok(layout)
    }

    /// Fixed leaf geometry and sibling order for every node.
    fn seed_layout<T>(&self, hierarchy: &Hierarchy<T>, order: &[NodeId]) -> Layout
    where
        S: SiblingOrder<T>,
    {
        let config = &self.config;
        let mut layout = Layout {
            nodes: vec![NodeLayout::new(0, Insets::ZERO, Insets::ZERO); hierarchy.len()],
            children: vec![Vec::new(); hierarchy.len()],
        };
        for &id in order {
            let depth = hierarchy.depth(id).unwrap_or_default();
            let node = if hierarchy.is_leaf(id) {
                let mut leaf =
                    NodeLayout::new(depth, Insets::uniform(config.unit_padding), Insets::ZERO);
                leaf.rect = Rect::new(0.0, 0.0, config.unit_size, config.unit_size);
                leaf.area = config.unit_size * config.unit_size;
                leaf
            } else {
                NodeLayout::new(depth, config.group_padding, config.group_margin)
            };
            layout.nodes[id.idx()] = node;

            let mut children = hierarchy.children_of(id).to_vec();
            children.sort_by(|a, b| self.order.compare(&hierarchy[*a], &hierarchy[*b]));
            layout.children[id.idx()] = children;
        }
        layout
    }

    fn size_group<T>(
        &self,
        hierarchy: &Hierarchy<T>,
        layout: &mut Layout,
        id: NodeId,
        packer: &mut GrowingPacker,
    ) {
        let children = core::mem::take(&mut layout.children[id.idx()]);
        let children = match children.first() {
            None => children,
            Some(&first) if hierarchy.is_leaf(first) => {
                self.grid_units(layout, id, &children);
                children
            }
            Some(_) => self.pack_groups(layout, id, children, packer),
        };
        layout.children[id.idx()] = children;
    }

    /// Lay out leaf children as rows of units.
    fn grid_units(&self, layout: &mut Layout, id: NodeId, units: &[NodeId]) {
        let config = &self.config;
        let aspect_ratio = config.aspect_ratio;
        let count = units.len();
        let naive = ceil_sqrt(count);
        let per_row = self
            .constraints
            .as_ref()
            .map_or(naive, |c| {
                c.constrained_units_per_row(aspect_ratio, count, naive)
            })
            .max(1);

        // Only a grid directly in the root takes the full aspect ratio; nested grids trend
        // toward square.
        let stretch = match layout.nodes[id.idx()].depth {
            0 => self
                .constraints
                .as_ref()
                .map_or(aspect_ratio, |c| c.constrained_aspect_ratio(aspect_ratio)),
            1 => 1.0 + (aspect_ratio - 1.0) / 4.0,
            _ => 1.3,
        };
        let width = (per_row as f64 * (config.unit_size + config.unit_padding)
            + config.unit_padding)
            * stretch;
        let grid = shelf_pack(
            count,
            config.unit_size,
            config.unit_padding,
            width.max(config.min_group_width),
        );

        for (unit, cell) in units.iter().zip(&grid.cells) {
            let node = &mut layout.nodes[unit.idx()];
            node.rect = node.rect.with_origin(*cell);
        }

        let node = &mut layout.nodes[id.idx()];
        node.rect = Rect::new(0.0, 0.0, grid.width, grid.height);
        node.area = grid.width * grid.height;
        node.real_width = Some(grid.real_width);
    }

    /// Pack group children by their margin boxes; returns the children in packing order.
    fn pack_groups(
        &self,
        layout: &mut Layout,
        id: NodeId,
        mut groups: Vec<NodeId>,
        packer: &mut GrowingPacker,
    ) -> Vec<NodeId> {
        let footprint = |g: NodeId| layout.nodes[g.idx()].margin_rect().size();
        groups.sort_by(|a, b| footprint(*b).area().total_cmp(&footprint(*a).area()));
        let sizes: Vec<Size> = groups.iter().map(|g| footprint(*g)).collect();
        let fit = packer.fit(&sizes, self.config.aspect_ratio);

        let mut area = 0.0;
        for (group, placement) in groups.iter().zip(&fit.placements) {
            let node = &mut layout.nodes[group.idx()];
            let inset = sum_insets(node.padding, node.margin);
            let offset = Vec2::new(inset.x0, inset.y0);
            match placement {
                Some(origin) => node.rect = node.rect.with_origin(*origin + offset),
                None => {
                    node.placed = false;
                    node.rect = node.rect.with_origin(Point::ORIGIN + offset);
                }
            }
            area += node.area;
        }

        let node = &mut layout.nodes[id.idx()];
        node.rect = Rect::from_origin_size(Point::ORIGIN, fit.bounds);
        node.area = area;
        groups
    }
}

fn sum_insets(a: Insets, b: Insets) -> Insets {
    Insets::new(a.x0 + b.x0, a.y0 + b.y0, a.x1 + b.x1, a.y1 + b.y1)
}

/// Turn parent-relative origins into root coordinates, top-down.
///
/// Descendants of an unplaced node are marked unplaced as well.
fn resolve_positions(layout: &mut Layout) {
    let mut stack = vec![layout.root()];
    while let Some(id) = stack.pop() {
        let parent = &layout.nodes[id.idx()];
        let offset = parent.rect.origin().to_vec2();
        let placed = parent.placed;
        for &child in &layout.children[id.idx()] {
            let node = &mut layout.nodes[child.idx()];
            node.rect = node.rect + offset;
            node.placed &= placed;
            stack.push(child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Item(f64);

    impl Weighted for Item {
        fn value(&self) -> f64 {
            self.0
        }
    }

    fn flat(config: PackConfig, count: usize) -> (Hierarchy<Item>, Layout) {
        let mut tree = Hierarchy::new(Item(0.0));
        for _ in 0..count {
            tree.add_leaf(tree.root(), Item(1.0)).unwrap();
        }
        let layout = RectanglePacker::new(config).pack(&tree).unwrap();
        (tree, layout)
    }

    fn bare() -> PackConfig {
        PackConfig::default()
            .with_group_padding(Insets::ZERO)
            .with_group_margin(Insets::ZERO)
    }

    fn overlaps(a: Rect, b: Rect) -> bool {
        a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
    }

    #[test]
    fn empty_root_is_zero_sized() {
        let tree = Hierarchy::new(Item(0.0));
        let layout = RectanglePacker::default().pack(&tree).unwrap();
        let root = &layout[tree.root()];
        assert_eq!(root.rect, Rect::ZERO);
        assert_eq!(root.area, 0.0);
        assert_eq!(root.real_width, None);
    }

    #[test]
    fn four_leaves_form_two_by_two_grid() {
        let (tree, layout) = flat(PackConfig::default(), 4);
        let root = &layout[tree.root()];
        // Root grids are offset by the root padding only.
        assert_eq!(root.rect, Rect::new(10.0, 10.0, 30.0, 30.0));
        assert_eq!(root.area, 400.0);
        assert_eq!(root.real_width, Some(20.0));

        let origins: Vec<Point> = layout
            .children_of(tree.root())
            .iter()
            .map(|c| layout[*c].rect.origin())
            .collect();
        assert_eq!(
            origins,
            vec![
                Point::new(10.0, 10.0),
                Point::new(20.0, 10.0),
                Point::new(10.0, 20.0),
                Point::new(20.0, 20.0),
            ]
        );
        for c in layout.children_of(tree.root()) {
            assert_eq!(layout[*c].size(), Size::new(10.0, 10.0));
            assert_eq!(layout[*c].area, 100.0);
            assert_eq!(layout[*c].depth, 1);
        }
    }

    #[test]
    fn hundred_leaves_are_square() {
        let (tree, layout) = flat(PackConfig::default(), 100);
        let size = layout[tree.root()].size();
        assert_eq!(size, Size::new(100.0, 100.0));
    }

    #[test]
    fn root_grid_stretches_by_aspect_ratio() {
        let (tree, layout) = flat(bare().with_aspect_ratio(2.0), 4);
        let root = &layout[tree.root()];
        assert_eq!(root.size().width, 40.0);
        // All four units fit one row.
        assert_eq!(root.size().height, 10.0);
        assert_eq!(root.real_width, Some(40.0));
    }

    #[test]
    fn single_row_reports_tight_width() {
        let (tree, layout) = flat(bare().with_aspect_ratio(3.0), 2);
        let root = &layout[tree.root()];
        // 2 per row: (2 * 10) * 3 = 60, but only 20 is used.
        assert_eq!(root.size().width, 60.0);
        assert_eq!(root.real_width, Some(20.0));
    }

    #[test]
    fn min_group_width_clamps_grids() {
        let (tree, layout) = flat(bare().with_min_group_width(75.0), 4);
        let root = &layout[tree.root()];
        assert_eq!(root.size(), Size::new(75.0, 10.0));
    }

    #[test]
    fn nested_grids_damp_the_aspect_ratio() {
        let mut tree = Hierarchy::new(Item(0.0));
        let outer = tree.add_group(tree.root(), Item(0.0)).unwrap();
        let inner = tree.add_group(outer, Item(0.0)).unwrap();
        let sibling = tree.add_group(tree.root(), Item(0.0)).unwrap();
        for _ in 0..4 {
            tree.add_leaf(inner, Item(1.0)).unwrap();
            tree.add_leaf(sibling, Item(1.0)).unwrap();
        }
        let layout = RectanglePacker::new(bare().with_aspect_ratio(3.0))
            .pack(&tree)
            .unwrap();
        // Depth 1: 20 * (1 + (3 - 1) / 4) = 30.
        assert_eq!(layout[sibling].size().width, 30.0);
        // Depth 2: 20 * 1.3 = 26.
        assert_eq!(layout[inner].size().width, 26.0);
    }

    #[test]
    fn single_leaf_group_is_a_single_cell() {
        let mut tree = Hierarchy::new(Item(0.0));
        let group = tree.add_group(tree.root(), Item(0.0)).unwrap();
        let leaf = tree.add_leaf(group, Item(1.0)).unwrap();
        let layout = RectanglePacker::default().pack(&tree).unwrap();

        // Group content 10x10, plus 2 * (10 + 20) of padding and margin per axis.
        let root = &layout[tree.root()];
        assert_eq!(root.rect, Rect::new(30.0, 30.0, 100.0, 100.0));
        assert_eq!(layout[group].rect, Rect::new(60.0, 60.0, 70.0, 70.0));
        assert_eq!(layout[leaf].rect, Rect::new(60.0, 60.0, 70.0, 70.0));
        assert_eq!(layout[group].margin_rect(), root.rect);
        assert_eq!(root.area, 100.0);
    }

    #[test]
    fn groups_pack_largest_first() {
        let mut tree = Hierarchy::new(Item(0.0));
        let small = tree.add_group(tree.root(), Item(2.0)).unwrap();
        let large = tree.add_group(tree.root(), Item(1.0)).unwrap();
        for _ in 0..4 {
            tree.add_leaf(small, Item(1.0)).unwrap();
        }
        for _ in 0..9 {
            tree.add_leaf(large, Item(1.0)).unwrap();
        }
        let layout = RectanglePacker::new(bare()).pack(&tree).unwrap();

        // 30x30 seeds the packer; 20x20 grows it to the right.
        assert_eq!(layout.children_of(tree.root()), &[large, small]);
        assert_eq!(layout[large].rect, Rect::new(0.0, 0.0, 30.0, 30.0));
        assert_eq!(layout[small].rect, Rect::new(30.0, 0.0, 50.0, 20.0));
        let root = &layout[tree.root()];
        assert_eq!(root.rect, Rect::new(0.0, 0.0, 50.0, 30.0));
        assert_eq!(root.area, 1300.0);
        assert_eq!(root.real_width, None);
        assert!(!overlaps(layout[large].rect, layout[small].rect));
    }

    #[test]
    fn leaves_follow_sibling_order() {
        let mut tree = Hierarchy::new(Item(0.0));
        let ids: Vec<NodeId> = [0.5, 3.0, 1.0]
            .into_iter()
            .map(|v| tree.add_leaf(tree.root(), Item(v)).unwrap())
            .collect();
        let layout = RectanglePacker::default().pack(&tree).unwrap();
        assert_eq!(layout.children_of(tree.root()), &[ids[1], ids[2], ids[0]]);

        let ascending = RectanglePacker::with_order(PackConfig::default(), |a: &Item, b: &Item| {
            a.0.total_cmp(&b.0)
        });
        let layout = ascending.pack(&tree).unwrap();
        assert_eq!(layout.children_of(tree.root()), &[ids[0], ids[2], ids[1]]);
        // The hierarchy keeps insertion order.
        assert_eq!(tree.children_of(tree.root()), ids.as_slice());
    }

    #[derive(Debug)]
    struct Column;

    impl UnitPackConstraints for Column {
        fn constrained_units_per_row(&self, _: f64, _: usize, _: usize) -> usize {
            1
        }

        fn constrained_aspect_ratio(&self, _: f64) -> f64 {
            1.0
        }
    }

    #[test]
    fn constraints_reshape_root_grid() {
        let mut tree = Hierarchy::new(Item(0.0));
        for _ in 0..3 {
            tree.add_leaf(tree.root(), Item(1.0)).unwrap();
        }
        let layout = RectanglePacker::new(bare().with_aspect_ratio(4.0))
            .with_unit_pack_constraints(Column)
            .pack(&tree)
            .unwrap();
        assert_eq!(layout[tree.root()].size(), Size::new(10.0, 30.0));
    }

    #[test]
    fn rejects_bad_input() {
        let mut tree = Hierarchy::new(Item(0.0));
        tree.add_leaf(tree.root(), Item(1.0)).unwrap();
        let err = RectanglePacker::new(PackConfig::default().with_unit_size(0.0)).pack(&tree);
        assert_eq!(err, Err(PackError::InvalidUnitSize(0.0)));

        tree.add_group(tree.root(), Item(1.0)).unwrap();
        let err = RectanglePacker::default().pack(&tree);
        assert_eq!(err, Err(PackError::MixedChildren(tree.root())));
    }

    #[test]
    fn packer_keeps_its_config() {
        let config = bare().with_unit_size(4.0);
        let packer = RectanglePacker::new(config);
        assert_eq!(packer.config(), &config);
        assert_eq!(RectanglePacker::default().config(), &PackConfig::default());
    }

    #[test]
    fn nan_weights_sort_without_panicking() {
        let mut tree = Hierarchy::new(Item(0.0));
        let ids: Vec<NodeId> = [1.0, f64::NAN, 2.0, f64::NAN, 0.5]
            .into_iter()
            .map(|v| tree.add_leaf(tree.root(), Item(v)).unwrap())
            .collect();
        let layout = RectanglePacker::default().pack(&tree).unwrap();
        // Positive NaN orders above every number under `total_cmp`.
        let order = layout.children_of(tree.root());
        assert_eq!(&order[2..], &[ids[2], ids[0], ids[4]]);
    }

    #[test]
    fn packing_is_deterministic() {
        let mut tree = Hierarchy::new(Item(0.0));
        for g in 0..5 {
            let group = tree.add_group(tree.root(), Item(f64::from(g))).unwrap();
            for i in 0..(3 + g * 4) {
                tree.add_leaf(group, Item(f64::from(i))).unwrap();
            }
        }
        let packer = RectanglePacker::default();
        assert_eq!(packer.pack(&tree).unwrap(), packer.pack(&tree).unwrap());
    }

    #[test]
    fn unplaced_parents_taint_descendants() {
        let mut layout = Layout {
            nodes: vec![NodeLayout::new(0, Insets::ZERO, Insets::ZERO); 3],
            children: vec![vec![NodeId::new(1)], vec![NodeId::new(2)], vec![]],
        };
        layout.nodes[0].rect = Rect::new(5.0, 5.0, 50.0, 50.0);
        layout.nodes[1].rect = Rect::new(1.0, 2.0, 10.0, 10.0);
        layout.nodes[1].placed = false;
        layout.nodes[2].rect = Rect::new(1.0, 1.0, 2.0, 2.0);
        resolve_positions(&mut layout);

        assert_eq!(layout.nodes[1].rect, Rect::new(6.0, 7.0, 15.0, 15.0));
        assert_eq!(layout.nodes[2].rect, Rect::new(7.0, 8.0, 8.0, 9.0));
        assert_eq!(
            layout.unplaced().collect::<Vec<_>>(),
            vec![NodeId::new(1), NodeId::new(2)]
        );
    }
}
