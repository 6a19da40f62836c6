// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Feed random rectangles to a `GrowingPacker` and report how tightly they fill the bounds.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p understory_rect_pack_demos --example growing_packer`

use kurbo::Size;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use understory_growing_pack::GrowingPacker;
use understory_rect_pack_demos::aspect_ratio_of;

fn main() {
    env_logger::init();

    let mut rng = StdRng::seed_from_u64(7);
    let mut sizes: Vec<Size> = (0..40)
        .map(|_| {
            Size::new(
                rng.random_range(5.0_f64..60.0).round(),
                rng.random_range(5.0_f64..60.0).round(),
            )
        })
        .collect();
    // Largest first keeps every rectangle placeable.
    sizes.sort_by(|a, b| b.area().total_cmp(&a.area()));

    let mut packer = GrowingPacker::new();
    for aspect_ratio in [0.5, 1.0, 2.0] {
        let fit = packer.fit(&sizes, aspect_ratio);
        let used: f64 = fit.rects(&sizes).map(|(_, r)| r.area()).sum();
        let total = fit.bounds.area();
        println!(
            "target {aspect_ratio:>3}: bounds {:.0} x {:.0}, ratio {:.2}, {} unplaced, {:.1}% used",
            fit.bounds.width,
            fit.bounds.height,
            aspect_ratio_of(fit.bounds),
            fit.unplaced().count(),
            100.0 * used / total,
        );
    }

    let fit = packer.fit(&sizes, 1.0);
    for (index, rect) in fit.rects(&sizes).take(8) {
        println!(
            "#{index:<2} {:>4.0} x {:<4.0} at ({:.0}, {:.0})",
            rect.width(),
            rect.height(),
            rect.x0,
            rect.y0
        );
    }
}
