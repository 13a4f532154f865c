//! Boolean combination of two regions
//!
//! Algorithm:
//! 1. Split every edge of both regions at all mutual crossings and at the
//!    ends of collinear overlaps
//! 2. Classify each split edge by its midpoint against the other region:
//!    inside, outside, or lying on a boundary edge running the same or the
//!    opposite way
//! 3. Keep the edges that bound the requested result, reversing the
//!    clipper's edges for subtraction
//! 4. Chain the kept edges into closed loops, taking the tightest turn at
//!    vertices where several loops meet
//!
//! Interiors lie to the left of every directed edge, so result loops come
//! out with positive area for outer boundaries and negative for holes.

use std::collections::HashMap;
use std::f64::consts::TAU;

use super::region::Region;
use crate::domain::Point;

/// Continuous coordinate produced by splitting
pub(crate) type Coord = (f64, f64);

/// Distance below which a point counts as lying on a segment
const ON_SEGMENT_TOLERANCE: f64 = 1e-7;

/// Grid used to match split points shared by several edges
const KEY_SCALE: f64 = 1e6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Subtract,
    Intersect,
    Union,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EdgeClass {
    Inside,
    Outside,
    SharedSame,
    SharedOpposite,
}

#[derive(Debug, Clone, Copy)]
struct Edge {
    from: Coord,
    to: Coord,
}

impl Edge {
    fn reversed(self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }

    fn direction(&self) -> Coord {
        (self.to.0 - self.from.0, self.to.1 - self.from.1)
    }
}

fn key(c: Coord) -> (i64, i64) {
    ((c.0 * KEY_SCALE).round() as i64, (c.1 * KEY_SCALE).round() as i64)
}

fn cross_i(a: (i128, i128), b: (i128, i128)) -> i128 {
    a.0 * b.1 - a.1 * b.0
}

fn dot_i(a: (i128, i128), b: (i128, i128)) -> i128 {
    a.0 * b.0 + a.1 * b.1
}

fn delta(from: Point, to: Point) -> (i128, i128) {
    (
        to.x as i128 - from.x as i128,
        to.y as i128 - from.y as i128,
    )
}

fn cross(a: Coord, b: Coord) -> f64 {
    a.0 * b.1 - a.1 * b.0
}

fn dot(a: Coord, b: Coord) -> f64 {
    a.0 * b.0 + a.1 * b.1
}

fn boxes_overlap(a: (Point, Point), b: (Point, Point)) -> bool {
    a.0.x.min(a.1.x) <= b.0.x.max(b.1.x)
        && b.0.x.min(b.1.x) <= a.0.x.max(a.1.x)
        && a.0.y.min(a.1.y) <= b.0.y.max(b.1.y)
        && b.0.y.min(b.1.y) <= a.0.y.max(a.1.y)
}

/// Parameter of a collinear point strictly inside the segment
fn interior_param(from: Point, to: Point, p: Point) -> Option<f64> {
    let r = delta(from, to);
    let num = dot_i(delta(from, p), r);
    let den = dot_i(r, r);
    (num > 0 && num < den).then(|| num as f64 / den as f64)
}

type Cuts = Vec<Vec<(f64, Coord)>>;

/// Split parameters and points for each edge of `a` and of `b`
fn find_cuts(a: &[(Point, Point)], b: &[(Point, Point)]) -> (Cuts, Cuts) {
    let mut a_cuts: Cuts = vec![Vec::new(); a.len()];
    let mut b_cuts: Cuts = vec![Vec::new(); b.len()];

    for (i, &(a0, a1)) in a.iter().enumerate() {
        for (j, &(b0, b1)) in b.iter().enumerate() {
            if !boxes_overlap((a0, a1), (b0, b1)) {
                continue;
            }

            let r = delta(a0, a1);
            let s = delta(b0, b1);
            let qp = delta(a0, b0);
            let denom = cross_i(r, s);

            if denom == 0 {
                if cross_i(qp, r) != 0 {
                    // parallel, never meet
                    continue;
                }
                for p in [b0, b1] {
                    if let Some(t) = interior_param(a0, a1, p) {
                        a_cuts[i].push((t, p.to_f64()));
                    }
                }
                for p in [a0, a1] {
                    if let Some(u) = interior_param(b0, b1, p) {
                        b_cuts[j].push((u, p.to_f64()));
                    }
                }
                continue;
            }

            let (mut t_num, mut u_num, mut denom) = (cross_i(qp, s), cross_i(qp, r), denom);
            if denom < 0 {
                t_num = -t_num;
                u_num = -u_num;
                denom = -denom;
            }
            if t_num < 0 || t_num > denom || u_num < 0 || u_num > denom {
                continue;
            }

            let t = t_num as f64 / denom as f64;
            let u = u_num as f64 / denom as f64;

            // Prefer exact vertex coordinates when the crossing is at an endpoint
            let point = if t_num == 0 {
                a0.to_f64()
            } else if t_num == denom {
                a1.to_f64()
            } else if u_num == 0 {
                b0.to_f64()
            } else if u_num == denom {
                b1.to_f64()
            } else {
                (
                    a0.x as f64 + t * r.0 as f64,
                    a0.y as f64 + t * r.1 as f64,
                )
            };

            if t_num > 0 && t_num < denom {
                a_cuts[i].push((t, point));
            }
            if u_num > 0 && u_num < denom {
                b_cuts[j].push((u, point));
            }
        }
    }

    (a_cuts, b_cuts)
}

fn split_edges(edges: &[(Point, Point)], cuts: Cuts) -> Vec<Edge> {
    let mut pieces = Vec::with_capacity(edges.len());

    for (&(from, to), mut edge_cuts) in edges.iter().zip(cuts) {
        edge_cuts.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut start = from.to_f64();
        for (_, p) in edge_cuts {
            if key(p) != key(start) {
                pieces.push(Edge { from: start, to: p });
                start = p;
            }
        }

        let end = to.to_f64();
        if key(end) != key(start) {
            pieces.push(Edge { from: start, to: end });
        }
    }

    pieces
}

fn on_segment(p: Coord, a: Coord, b: Coord) -> bool {
    let ab = (b.0 - a.0, b.1 - a.1);
    let ap = (p.0 - a.0, p.1 - a.1);
    let len_sq = dot(ab, ab);
    if len_sq == 0.0 {
        return false;
    }

    let t = dot(ap, ab) / len_sq;
    let distance = cross(ab, ap).abs() / len_sq.sqrt();
    (0.0..=1.0).contains(&t) && distance < ON_SEGMENT_TOLERANCE
}

fn classify(edge: &Edge, region: &Region) -> EdgeClass {
    let mid = (
        (edge.from.0 + edge.to.0) / 2.0,
        (edge.from.1 + edge.to.1) / 2.0,
    );
    let dir = edge.direction();
    let dir_len = dot(dir, dir).sqrt();

    for (p, q) in region.edges() {
        let (p, q) = (p.to_f64(), q.to_f64());
        if !on_segment(mid, p, q) {
            continue;
        }

        let other = (q.0 - p.0, q.1 - p.1);
        let other_len = dot(other, other).sqrt();
        if cross(dir, other).abs() <= ON_SEGMENT_TOLERANCE * dir_len * other_len {
            return if dot(dir, other) > 0.0 {
                EdgeClass::SharedSame
            } else {
                EdgeClass::SharedOpposite
            };
        }
    }

    if region.contains(mid) {
        EdgeClass::Inside
    } else {
        EdgeClass::Outside
    }
}

/// Clockwise angle from the reversed incoming edge to the outgoing one,
/// in (0, 2π]. The smallest value is the tightest left-hand face.
fn clockwise_turn(incoming: &Edge, outgoing: &Edge) -> f64 {
    let back = {
        let d = incoming.direction();
        (-d.0, -d.1)
    };
    let out = outgoing.direction();

    let ccw = cross(back, out).atan2(dot(back, out));
    let ccw = if ccw < 0.0 { ccw + TAU } else { ccw };
    TAU - ccw
}

fn chain(edges: &[Edge]) -> Vec<Vec<Coord>> {
    let mut outgoing: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
    for (i, edge) in edges.iter().enumerate() {
        outgoing.entry(key(edge.from)).or_default().push(i);
    }

    let mut used = vec![false; edges.len()];
    let mut loops = Vec::new();

    for first in 0..edges.len() {
        if used[first] {
            continue;
        }
        used[first] = true;

        let mut ring = vec![edges[first].from];
        let mut current = first;

        loop {
            let incoming = &edges[current];
            let next = outgoing
                .get(&key(incoming.to))
                .into_iter()
                .flatten()
                .copied()
                .filter(|&i| !used[i] || i == first)
                .min_by(|&a, &b| {
                    clockwise_turn(incoming, &edges[a]).total_cmp(&clockwise_turn(incoming, &edges[b]))
                });

            match next {
                Some(i) if i == first => {
                    loops.push(ring);
                    break;
                }
                Some(i) => {
                    used[i] = true;
                    ring.push(edges[i].from);
                    current = i;
                }
                None => {
                    tracing::warn!(vertices = ring.len(), "dropping unclosed boundary chain");
                    break;
                }
            }
        }
    }

    loops
}

/// Combine two regions and return the boundary loops of the result
pub(crate) fn combine(a: &Region, b: &Region, op: Operation) -> Vec<Vec<Coord>> {
    let a_edges: Vec<(Point, Point)> = a.edges().collect();
    let b_edges: Vec<(Point, Point)> = b.edges().collect();

    let (a_cuts, b_cuts) = find_cuts(&a_edges, &b_edges);
    let a_pieces = split_edges(&a_edges, a_cuts);
    let b_pieces = split_edges(&b_edges, b_cuts);

    let mut kept = Vec::new();

    for edge in &a_pieces {
        let keep = matches!(
            (op, classify(edge, b)),
            (Operation::Subtract, EdgeClass::Outside | EdgeClass::SharedOpposite)
                | (Operation::Intersect, EdgeClass::Inside | EdgeClass::SharedSame)
                | (Operation::Union, EdgeClass::Outside | EdgeClass::SharedSame)
        );
        if keep {
            kept.push(*edge);
        }
    }

    // Shared edges of `b` are already represented by the matching edge of `a`
    for edge in &b_pieces {
        match (op, classify(edge, a)) {
            (Operation::Subtract, EdgeClass::Inside) => kept.push(edge.reversed()),
            (Operation::Intersect, EdgeClass::Inside) | (Operation::Union, EdgeClass::Outside) => {
                kept.push(*edge)
            }
            _ => {}
        }
    }

    let loops = chain(&kept);

    tracing::debug!(
        ?op,
        subject_pieces = a_pieces.len(),
        clipper_pieces = b_pieces.len(),
        kept = kept.len(),
        loops = loops.len(),
        "combined regions"
    );

    loops
}

/// Signed shoelace area of a continuous loop
pub(crate) fn ring_area(ring: &[Coord]) -> f64 {
    let n = ring.len();
    (0..n)
        .map(|i| cross(ring[i], ring[(i + 1) % n]))
        .sum::<f64>()
        / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(min: i32, max: i32) -> Region {
        Region::from_loop(&[
            Point::new(min, min),
            Point::new(max, min),
            Point::new(max, max),
            Point::new(min, max),
        ])
        .unwrap()
    }

    fn total_area(loops: &[Vec<Coord>]) -> f64 {
        loops.iter().map(|ring| ring_area(ring)).sum()
    }

    #[test]
    fn test_crossing_edges_are_cut_once() {
        let a = [(Point::new(0, 0), Point::new(10, 10))];
        let b = [(Point::new(0, 10), Point::new(10, 0))];
        let (a_cuts, b_cuts) = find_cuts(&a, &b);

        assert_eq!(a_cuts[0], vec![(0.5, (5.0, 5.0))]);
        assert_eq!(b_cuts[0], vec![(0.5, (5.0, 5.0))]);
    }

    #[test]
    fn test_collinear_overlap_cuts_both() {
        let a = [(Point::new(0, 0), Point::new(10, 0))];
        let b = [(Point::new(5, 0), Point::new(15, 0))];
        let (a_cuts, b_cuts) = find_cuts(&a, &b);

        assert_eq!(a_cuts[0], vec![(0.5, (5.0, 0.0))]);
        assert_eq!(b_cuts[0], vec![(0.5, (10.0, 0.0))]);
    }

    #[test]
    fn test_touching_endpoint_cuts_other_edge() {
        let a = [(Point::new(0, 0), Point::new(10, 0))];
        let b = [(Point::new(4, 0), Point::new(4, 8))];
        let (a_cuts, b_cuts) = find_cuts(&a, &b);

        assert_eq!(a_cuts[0], vec![(0.4, (4.0, 0.0))]);
        assert!(b_cuts[0].is_empty());
    }

    #[test]
    fn test_parallel_edges_do_not_cut() {
        let a = [(Point::new(0, 0), Point::new(10, 0))];
        let b = [(Point::new(0, 1), Point::new(10, 1))];
        let (a_cuts, b_cuts) = find_cuts(&a, &b);
        assert!(a_cuts[0].is_empty() && b_cuts[0].is_empty());
    }

    #[test]
    fn test_clockwise_turn_prefers_tight_loop() {
        let incoming = Edge { from: (10.0, 0.0), to: (10.0, 10.0) };
        let west = Edge { from: (10.0, 10.0), to: (0.0, 10.0) };
        let east = Edge { from: (10.0, 10.0), to: (20.0, 10.0) };
        let back = Edge { from: (10.0, 10.0), to: (10.0, 0.0) };

        assert!(clockwise_turn(&incoming, &west) < clockwise_turn(&incoming, &east));
        assert_eq!(clockwise_turn(&incoming, &back), TAU);
    }

    #[test]
    fn test_combine_overlapping_squares() {
        let a = square(0, 10);
        let b = square(5, 15);

        assert_eq!(total_area(&combine(&a, &b, Operation::Subtract)), 75.0);
        assert_eq!(total_area(&combine(&a, &b, Operation::Intersect)), 25.0);
        assert_eq!(total_area(&combine(&a, &b, Operation::Union)), 175.0);
    }

    #[test]
    fn test_combine_inner_square_makes_hole_loop() {
        let loops = combine(&square(0, 10), &square(3, 7), Operation::Subtract);

        assert_eq!(loops.len(), 2);
        let mut areas: Vec<f64> = loops.iter().map(|ring| ring_area(ring)).collect();
        areas.sort_by(f64::total_cmp);
        assert_eq!(areas, vec![-16.0, 100.0]);
    }

    #[test]
    fn test_combine_identical_squares() {
        let a = square(0, 10);
        assert!(combine(&a, &a, Operation::Subtract).is_empty());
        assert_eq!(total_area(&combine(&a, &a, Operation::Intersect)), 100.0);
        assert_eq!(total_area(&combine(&a, &a, Operation::Union)), 100.0);
    }

    #[test]
    fn test_combine_corner_touching_union_keeps_two_loops() {
        let a = square(0, 10);
        let b = square(10, 20);
        let loops = combine(&a, &b, Operation::Union);

        assert_eq!(loops.len(), 2);
        assert!(loops.iter().all(|ring| ring.len() == 4));
        assert_eq!(total_area(&loops), 200.0);
    }

    #[test]
    fn test_ring_area_orientation() {
        let ccw = vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)];
        let cw: Vec<Coord> = ccw.iter().rev().copied().collect();
        assert_eq!(ring_area(&ccw), 16.0);
        assert_eq!(ring_area(&cw), -16.0);
    }
}
