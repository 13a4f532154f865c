use super::{Color, PixelSurface};
use crate::domain::{Point, Polygon};

/// Integer Bresenham walk between two endpoints, both included
///
/// The walk always starts from the lexicographically smaller endpoint so
/// that a segment yields the same pixels whichever way round it is given.
#[derive(Debug, Clone)]
pub struct BresenhamLine {
    x: i32,
    y: i32,
    end: Point,
    dx: i64,
    dy: i64,
    sx: i32,
    sy: i32,
    err: i64,
    done: bool,
}

impl BresenhamLine {
    pub fn new(from: Point, to: Point) -> Self {
        let (start, end) = if (from.x, from.y) <= (to.x, to.y) {
            (from, to)
        } else {
            (to, from)
        };

        // Widened so spans between extreme coordinates cannot overflow
        let dx = (end.x as i64 - start.x as i64).abs();
        let dy = (end.y as i64 - start.y as i64).abs();

        Self {
            x: start.x,
            y: start.y,
            end,
            dx,
            dy,
            sx: if start.x < end.x { 1 } else { -1 },
            sy: if start.y < end.y { 1 } else { -1 },
            err: dx - dy,
            done: false,
        }
    }
}

impl Iterator for BresenhamLine {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.done {
            return None;
        }

        let current = Point::new(self.x, self.y);
        if current == self.end {
            self.done = true;
            return Some(current);
        }

        let e2 = 2 * self.err;
        if e2 > -self.dy {
            self.err -= self.dy;
            self.x += self.sx;
        }
        if e2 < self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }

        Some(current)
    }
}

impl BresenhamLine {
    /// True once `p` is off a `width` x `height` surface on a side the walk
    /// keeps moving away from, so no later pixel can land on it
    fn left_for_good(&self, p: Point, width: i64, height: i64) -> bool {
        // x never decreases from the canonical start
        p.x as i64 >= width
            || (self.sy > 0 && p.y as i64 >= height)
            || (self.sy < 0 && p.y < 0)
    }
}

/// Draw a segment into the surface; pixels off the surface are dropped
pub fn rasterize_line(surface: &mut PixelSurface, from: Point, to: Point, color: Color) {
    let (width, height) = (surface.width() as i64, surface.height() as i64);
    let mut line = BresenhamLine::new(from, to);

    while let Some(p) = line.next() {
        if line.left_for_good(p, width, height) {
            break;
        }
        surface.set(p.x, p.y, color);
    }
}

/// Draw every edge of a polygon, closing edge included when it is closed
pub fn draw_outline(surface: &mut PixelSurface, polygon: &Polygon, color: Color) {
    if polygon.vertices().len() == 1 {
        let p = polygon.vertices()[0];
        surface.set(p.x, p.y, color);
        return;
    }
    for (from, to) in polygon.edges() {
        rasterize_line(surface, from, to, color);
    }
}
