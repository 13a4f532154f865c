use std::collections::VecDeque;

use crate::domain::Point;
use crate::raster::{Color, PixelSurface};

/// Breadth-first 4-connected flood fill from `start`
///
/// Recolors the connected region sharing the start pixel's color. Nothing
/// happens when the start is off the surface or already holds `fill` or
/// `boundary`, which makes repeated calls idempotent. The boundary must be
/// closed under 4-connectivity; an 8-connected Bresenham outline is.
pub fn seed_fill(surface: &mut PixelSurface, start: Point, fill: Color, boundary: Color) {
    let target = match surface.get(start.x, start.y) {
        Some(c) if c != fill && c != boundary => c,
        _ => return,
    };

    let mut queue = VecDeque::new();
    queue.push_back(start);

    while let Some(p) = queue.pop_front() {
        if surface.get(p.x, p.y) != Some(target) {
            continue;
        }
        surface.set(p.x, p.y, fill);

        queue.push_back(Point::new(p.x + 1, p.y));
        queue.push_back(Point::new(p.x - 1, p.y));
        queue.push_back(Point::new(p.x, p.y + 1));
        queue.push_back(Point::new(p.x, p.y - 1));
    }
}
