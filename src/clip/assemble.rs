use super::boolean::Coord;
use crate::domain::{Point, Polygon};
use crate::geometry::predicates::{point_in_polygon, point_on_boundary, twice_signed_area};

fn round_half_up(v: f64) -> i32 {
    (v + 0.5).floor() as i32
}

fn is_collinear(a: Point, b: Point, c: Point) -> bool {
    let ab = (b.x as i128 - a.x as i128, b.y as i128 - a.y as i128);
    let bc = (c.x as i128 - b.x as i128, c.y as i128 - b.y as i128);
    ab.0 * bc.1 - ab.1 * bc.0 == 0
}

/// Round a result loop onto the pixel grid
///
/// Repeated vertices and vertices in the middle of a straight run are
/// removed. Returns `None` when fewer than 3 vertices or no area remain.
pub(crate) fn snap_loop(ring: &[Coord]) -> Option<Vec<Point>> {
    let mut points: Vec<Point> = ring
        .iter()
        .map(|&(x, y)| Point::new(round_half_up(x), round_half_up(y)))
        .collect();
    points.dedup();
    while points.len() > 1 && points.first() == points.last() {
        points.pop();
    }

    loop {
        let n = points.len();
        if n < 3 {
            return None;
        }

        let redundant = (0..n).find(|&i| {
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            prev == points[i] || is_collinear(prev, points[i], next)
        });

        match redundant {
            Some(i) => {
                points.remove(i);
            }
            None => break,
        }
    }

    (twice_signed_area(&points) != 0).then_some(points)
}

/// Containment judged by the first hole vertex off `outer`'s boundary.
/// A hole lying entirely on the boundary counts as inside.
fn hole_inside(hole: &[Point], outer: &[Point]) -> bool {
    for v in hole {
        let p = v.to_f64();
        if !point_on_boundary(outer, p) {
            return point_in_polygon(outer, p.0, p.1);
        }
    }
    true
}

/// Turn snapped result loops into polygons.
///
/// Positive loops become outer boundaries; each negative loop becomes a
/// hole of the smallest outer loop containing it, falling back to the
/// first outer loop. Fill state is copied from `template`.
pub(crate) fn assemble(loops: Vec<Vec<Point>>, template: &Polygon) -> Vec<Polygon> {
    let (outers, holes): (Vec<_>, Vec<_>) = loops
        .into_iter()
        .partition(|loop_| twice_signed_area(loop_) > 0);

    if outers.is_empty() {
        if !holes.is_empty() {
            tracing::warn!(holes = holes.len(), "result holes without an outer boundary");
        }
        return Vec::new();
    }

    let areas: Vec<i128> = outers.iter().map(|o| twice_signed_area(o)).collect();
    let mut hole_lists: Vec<Vec<Vec<Point>>> = vec![Vec::new(); outers.len()];

    for hole in holes {
        let owner = outers
            .iter()
            .enumerate()
            .filter(|(_, outer)| hole_inside(&hole, outer))
            .min_by_key(|&(i, _)| areas[i])
            .map(|(i, _)| i)
            .unwrap_or(0);
        hole_lists[owner].push(hole);
    }

    outers
        .into_iter()
        .zip(hole_lists)
        .map(|(outer, holes)| {
            let mut polygon = Polygon::from_parts(outer, holes);
            polygon.set_filled(template.is_filled());
            polygon.set_fill_mode(template.fill_mode());
            polygon
        })
        .collect()
}
