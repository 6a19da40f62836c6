// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nested boxes for a fake population grouped by state, then by age group.
//!
//! Prints every group's box and a coarse character map where each leaf becomes one glyph
//! shaded by its heat value.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_rect_pack_demos --example people_by_state`

use kurbo::Insets;
use understory_rect_pack::{PackConfig, RectanglePacker};
use understory_rect_pack_demos::{fake_people, group_people, heat_glyph};

fn main() {
    env_logger::init();

    let tree = group_people(fake_people(1000, 42), &[|p| p.state, |p| p.age_group]);

    let config = PackConfig::default()
        .with_aspect_ratio(2.0)
        .with_unit_size(4.0)
        .with_unit_padding(1.0)
        .with_group_padding(Insets::new(10.0, 20.0, 10.0, 10.0))
        .with_group_margin(Insets::uniform(6.0));
    let layout = match RectanglePacker::new(config).pack(&tree) {
        Ok(layout) => layout,
        Err(err) => {
            eprintln!("layout failed: {err}");
            return;
        }
    };

    let bounds = layout.bounds();
    println!(
        "{} nodes in {:.0} x {:.0}",
        layout.len(),
        bounds.width(),
        bounds.height()
    );
    for id in tree.iter().filter(|id| tree.is_group(*id)) {
        let node = &layout[id];
        let indent = "  ".repeat(node.depth);
        println!(
            "{indent}{:<14} ({:>6.1}, {:>6.1}) {:>6.1} x {:<6.1} area {:>7.0}",
            tree[id].label(),
            node.rect.x0,
            node.rect.y0,
            node.rect.width(),
            node.rect.height(),
            node.area,
        );
    }

    // One character per unit cell.
    let cell = config.unit_size + config.unit_padding;
    let cols = (bounds.width() / cell).ceil() as usize;
    let rows = (bounds.height() / cell).ceil() as usize;
    let mut canvas = vec![vec![' '; cols]; rows];
    for leaf in tree.leaves() {
        let Some(person) = tree[leaf].person() else {
            continue;
        };
        let rect = layout[leaf].rect;
        let col = (rect.x0 / cell) as usize;
        let row = (rect.y0 / cell) as usize;
        if let Some(slot) = canvas.get_mut(row).and_then(|r| r.get_mut(col)) {
            *slot = heat_glyph(person.color);
        }
    }
    for line in canvas {
        println!("{}", line.into_iter().collect::<String>().trim_end());
    }
}
