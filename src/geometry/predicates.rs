use crate::domain::Point;

/// Tolerance for collinearity tests in continuous coordinates
pub const EPSILON: f64 = 1e-6;

/// Winding of a vertex loop, read off the sign of its shoelace area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Positive signed area: an outer boundary
    Positive,
    /// Negative signed area: a hole
    Negative,
    /// Zero area (collinear or fewer than 3 vertices)
    Degenerate,
}

/// Twice the signed shoelace area, exact in integer arithmetic
pub fn twice_signed_area(vertices: &[Point]) -> i128 {
    let n = vertices.len();
    if n < 3 {
        return 0;
    }

    let mut sum = 0i128;
    for i in 0..n {
        let p = vertices[i];
        let q = vertices[(i + 1) % n];
        sum += p.x as i128 * q.y as i128 - q.x as i128 * p.y as i128;
    }
    sum
}

/// Signed area by the shoelace formula
pub fn signed_area(vertices: &[Point]) -> f64 {
    twice_signed_area(vertices) as f64 / 2.0
}

pub fn orientation(vertices: &[Point]) -> Orientation {
    match twice_signed_area(vertices) {
        a if a > 0 => Orientation::Positive,
        a if a < 0 => Orientation::Negative,
        _ => Orientation::Degenerate,
    }
}

/// Even-odd ray casting test against a single vertex loop
pub fn point_in_polygon(vertices: &[Point], x: f64, y: f64) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = vertices[i].to_f64();
        let (xj, yj) = vertices[j].to_f64();

        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Collinearity within [`EPSILON`] plus bounding-box containment
pub fn point_on_segment(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> bool {
    let cross = (p.0 - a.0) * (b.1 - a.1) - (p.1 - a.1) * (b.0 - a.0);
    cross.abs() < EPSILON
        && p.0 >= a.0.min(b.0)
        && p.0 <= a.0.max(b.0)
        && p.1 >= a.1.min(b.1)
        && p.1 <= a.1.max(b.1)
}

/// True if `p` lies on any edge of the closed loop
pub fn point_on_boundary(vertices: &[Point], p: (f64, f64)) -> bool {
    let n = vertices.len();
    (0..n).any(|i| point_on_segment(p, vertices[i].to_f64(), vertices[(i + 1) % n].to_f64()))
}

/// Area-weighted centroid of a closed loop
///
/// Returns `None` for loops with zero area. For strongly concave loops the
/// centroid may fall outside the loop.
pub fn centroid(vertices: &[Point]) -> Option<(f64, f64)> {
    let n = vertices.len();
    if n < 3 {
        return None;
    }

    let mut area = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let (x0, y0) = vertices[i].to_f64();
        let (x1, y1) = vertices[(i + 1) % n].to_f64();
        let a = x0 * y1 - x1 * y0;
        area += a;
        cx += (x0 + x1) * a;
        cy += (y0 + y1) * a;
    }
    area *= 0.5;

    if area == 0.0 {
        return None;
    }

    Some((cx / (6.0 * area), cy / (6.0 * area)))
}

/// Flood-fill start point: the centroid truncated toward zero
pub fn seed_point(vertices: &[Point]) -> Option<Point> {
    centroid(vertices).map(|(x, y)| Point::new(x as i32, y as i32))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(10, 10),
            Point::new(0, 10),
        ]
    }

    #[test]
    fn test_signed_area_square() {
        assert_eq!(signed_area(&square()), 100.0);
        assert_eq!(orientation(&square()), Orientation::Positive);

        let mut reversed = square();
        reversed.reverse();
        assert_eq!(signed_area(&reversed), -100.0);
        assert_eq!(orientation(&reversed), Orientation::Negative);
    }

    #[test]
    fn test_area_of_full_range_square() {
        let full = vec![
            Point::new(i32::MIN, i32::MIN),
            Point::new(i32::MAX, i32::MIN),
            Point::new(i32::MAX, i32::MAX),
            Point::new(i32::MIN, i32::MAX),
        ];
        let side = (1i128 << 32) - 1;
        assert_eq!(twice_signed_area(&full), 2 * side * side);
        assert_eq!(orientation(&full), Orientation::Positive);
    }

    #[test]
    fn test_degenerate_orientation() {
        let line = vec![Point::new(0, 0), Point::new(5, 5), Point::new(10, 10)];
        assert_eq!(orientation(&line), Orientation::Degenerate);
        assert_eq!(centroid(&line), None);
    }

    #[test]
    fn test_centroid_square() {
        assert_eq!(centroid(&square()), Some((5.0, 5.0)));
        assert_eq!(seed_point(&square()), Some(Point::new(5, 5)));
    }

    #[test]
    fn test_centroid_independent_of_winding() {
        let mut reversed = square();
        reversed.reverse();
        assert_eq!(centroid(&reversed), Some((5.0, 5.0)));
    }

    #[test]
    fn test_point_in_polygon() {
        let sq = square();
        assert!(point_in_polygon(&sq, 5.0, 5.0));
        assert!(point_in_polygon(&sq, 0.5, 9.5));
        assert!(!point_in_polygon(&sq, 15.0, 5.0));
        assert!(!point_in_polygon(&sq, -1.0, -1.0));
    }

    #[test]
    fn test_point_in_concave_polygon() {
        // U shape open at the top
        let u = vec![
            Point::new(0, 0),
            Point::new(30, 0),
            Point::new(30, 30),
            Point::new(20, 30),
            Point::new(20, 10),
            Point::new(10, 10),
            Point::new(10, 30),
            Point::new(0, 30),
        ];
        assert!(point_in_polygon(&u, 5.0, 20.0));
        assert!(!point_in_polygon(&u, 15.0, 20.0));
        assert!(point_in_polygon(&u, 15.0, 5.0));
    }

    #[test]
    fn test_point_on_segment() {
        assert!(point_on_segment((5.0, 0.0), (0.0, 0.0), (10.0, 0.0)));
        assert!(point_on_segment((3.0, 3.0), (0.0, 0.0), (10.0, 10.0)));
        assert!(!point_on_segment((11.0, 0.0), (0.0, 0.0), (10.0, 0.0)));
        assert!(!point_on_segment((5.0, 1.0), (0.0, 0.0), (10.0, 0.0)));
    }

    #[test]
    fn test_point_on_boundary() {
        let sq = square();
        assert!(point_on_boundary(&sq, (0.0, 4.0)));
        assert!(point_on_boundary(&sq, (10.0, 10.0)));
        assert!(!point_on_boundary(&sq, (4.0, 4.0)));
    }
}
