use crate::domain::{Point, Polygon};
use crate::raster::{Color, PixelSurface};

/// Round half up, matching how intercepts snap to pixel columns
fn round_half_up(v: f64) -> i32 {
    (v + 0.5).floor() as i32
}

/// Sorted x-intercepts of scanline `y` with the loop's edges
///
/// Horizontal edges are skipped and each edge covers the half-open range
/// `[min(y1, y2), max(y1, y2))`, so a vertex shared by a rising and a
/// falling edge is counted once.
pub fn scanline_intercepts(vertices: &[Point], y: i32) -> Vec<i32> {
    let n = vertices.len();
    let mut intercepts = Vec::new();

    for i in 0..n {
        let p1 = vertices[i];
        let p2 = vertices[(i + 1) % n];

        if p1.y == p2.y {
            continue;
        }

        if (y >= p1.y && y < p2.y) || (y >= p2.y && y < p1.y) {
            let (x1, y1) = p1.to_f64();
            let (x2, y2) = p2.to_f64();
            let x = x1 + (y as f64 - y1) * (x2 - x1) / (y2 - y1);
            intercepts.push(round_half_up(x));
        }
    }

    intercepts.sort_unstable();
    intercepts
}

/// Fill a vertex loop row by row between paired intercepts
///
/// Pixels already holding `boundary` are left alone. On a row with an odd
/// number of intercepts the last one stays unpaired and is not filled.
pub(crate) fn fill_loop(surface: &mut PixelSurface, vertices: &[Point], fill: Color, boundary: Color) {
    let Some(min_y) = vertices.iter().map(|p| p.y).min() else {
        return;
    };
    let max_y = vertices.iter().map(|p| p.y).max().unwrap_or(min_y);

    // Rows off the surface cannot receive writes
    let min_y = min_y.max(0);
    let max_y = max_y.min(surface.height() as i32 - 1);

    for y in min_y..=max_y {
        let intercepts = scanline_intercepts(vertices, y);

        for pair in intercepts.chunks_exact(2) {
            let start_x = pair[0].max(0);
            let end_x = pair[1].min(surface.width() as i32 - 1);
            for x in start_x..=end_x {
                if surface.get(x, y) != Some(boundary) {
                    surface.set(x, y, fill);
                }
            }
        }
    }
}

/// Scanline fill of a polygon's outer boundary. Holes are not subtracted.
pub fn scanline_fill(surface: &mut PixelSurface, polygon: &Polygon, fill: Color, boundary: Color) {
    fill_loop(surface, polygon.vertices(), fill, boundary);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::regular_pentagon;
    use crate::raster::draw_outline;

    const BG: Color = 0x000000;
    const EDGE: Color = 0xFFFFFF;
    const FILL: Color = 0x00FF00;

    fn filled_runs(surface: &PixelSurface, y: i32) -> Vec<(i32, i32)> {
        let mut runs = Vec::new();
        let mut start = None;
        for x in 0..=surface.width() as i32 {
            let is_fill = surface.get(x, y) == Some(FILL);
            match (is_fill, start) {
                (true, None) => start = Some(x),
                (false, Some(s)) => {
                    runs.push((s, x - 1));
                    start = None;
                }
                _ => {}
            }
        }
        runs
    }

    fn perimeter(vertices: &[Point]) -> f64 {
        let n = vertices.len();
        (0..n)
            .map(|i| {
                let a = vertices[i];
                let b = vertices[(i + 1) % n];
                (((b.x - a.x).pow(2) + (b.y - a.y).pow(2)) as f64).sqrt()
            })
            .sum()
    }

    #[test]
    fn test_intercepts_square() {
        let square = vec![
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(10, 10),
            Point::new(0, 10),
        ];
        assert_eq!(scanline_intercepts(&square, 5), vec![0, 10]);
        assert_eq!(scanline_intercepts(&square, 0), vec![0, 10]);
        // upper endpoint excluded
        assert!(scanline_intercepts(&square, 10).is_empty());
    }

    #[test]
    fn test_intercepts_with_extreme_vertices() {
        let wide = vec![Point::new(i32::MIN, 0), Point::new(i32::MAX, 0), Point::new(0, 10)];
        assert_eq!(scanline_intercepts(&wide, 5), vec![-1_073_741_824, 1_073_741_824]);

        let mut surface = PixelSurface::new(10, 10, BG);
        fill_loop(&mut surface, &wide, FILL, EDGE);
        assert_eq!(surface.count(FILL), 100);
    }

    #[test]
    fn test_intercepts_round_half_up() {
        let triangle = vec![Point::new(0, 0), Point::new(1, 2), Point::new(0, 2)];
        // edge (0,0)-(1,2) crosses y = 1 at x = 0.5
        assert_eq!(scanline_intercepts(&triangle, 1), vec![0, 1]);
    }

    #[test]
    fn test_convex_fill_single_run_per_row() {
        let mut surface = PixelSurface::new(100, 100, BG);
        let pentagon = regular_pentagon(Point::new(50, 50), 40);

        scanline_fill(&mut surface, &pentagon, FILL, EDGE);

        let min_y = pentagon.vertices().iter().map(|p| p.y).min().unwrap();
        let max_y = pentagon.vertices().iter().map(|p| p.y).max().unwrap();
        // the apex row may collapse to a single pixel; every row below it
        // down to the flat bottom edge is one contiguous run
        assert!(filled_runs(&surface, min_y).len() <= 1);
        for y in min_y + 1..max_y {
            assert_eq!(filled_runs(&surface, y).len(), 1, "row {}", y);
        }

        let area = pentagon.signed_area().abs();
        let filled = surface.count(FILL) as f64;
        assert!(
            (filled - area).abs() <= perimeter(pentagon.vertices()),
            "filled {} vs area {}",
            filled,
            area
        );
    }

    #[test]
    fn test_fill_preserves_boundary() {
        let mut surface = PixelSurface::new(20, 20, BG);
        let square = Polygon::closed(vec![
            Point::new(2, 2),
            Point::new(12, 2),
            Point::new(12, 12),
            Point::new(2, 12),
        ])
        .unwrap();
        draw_outline(&mut surface, &square, EDGE);

        scanline_fill(&mut surface, &square, FILL, EDGE);

        assert_eq!(surface.count(EDGE), 40);
        assert_eq!(surface.count(FILL), 81);
        assert_eq!(surface.get(7, 7), Some(FILL));
    }

    #[test]
    fn test_concave_fill_two_runs() {
        let mut surface = PixelSurface::new(40, 40, BG);
        let u = Polygon::closed(vec![
            Point::new(0, 0),
            Point::new(30, 0),
            Point::new(30, 30),
            Point::new(20, 30),
            Point::new(20, 10),
            Point::new(10, 10),
            Point::new(10, 30),
            Point::new(0, 30),
        ])
        .unwrap();

        scanline_fill(&mut surface, &u, FILL, EDGE);

        assert_eq!(filled_runs(&surface, 20), vec![(0, 10), (20, 30)]);
        assert_eq!(filled_runs(&surface, 5), vec![(0, 30)]);
    }

    #[test]
    fn test_fill_clips_to_surface() {
        let mut surface = PixelSurface::new(10, 10, BG);
        let big = Polygon::closed(vec![
            Point::new(-20, -20),
            Point::new(30, -20),
            Point::new(30, 30),
            Point::new(-20, 30),
        ])
        .unwrap();

        scanline_fill(&mut surface, &big, FILL, EDGE);
        assert_eq!(surface.count(FILL), 100);
    }
}
