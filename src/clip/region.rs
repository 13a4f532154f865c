use crate::domain::{InvalidShapeError, Point, Polygon};
use crate::geometry::predicates::{Orientation, orientation, point_in_polygon};

/// A polygon's area as oriented vertex loops
///
/// Outer loops run with positive signed area and hole loops with negative
/// signed area, so the interior always lies to the left of every edge.
/// Zero-area loops are dropped.
#[derive(Debug, Clone)]
pub(crate) struct Region {
    loops: Vec<Vec<Point>>,
}

fn check_vertices(vertices: &[Point]) -> Result<(), InvalidShapeError> {
    if vertices.len() < 3 {
        return Err(InvalidShapeError::TooFewVertices {
            count: vertices.len(),
        });
    }
    Ok(())
}

fn oriented(vertices: &[Point], wanted: Orientation) -> Option<Vec<Point>> {
    let current = orientation(vertices);
    if current == Orientation::Degenerate {
        return None;
    }

    let mut loop_ = vertices.to_vec();
    if current != wanted {
        loop_.reverse();
    }
    Some(loop_)
}

impl Region {
    /// Outer boundary plus holes of a polygon
    pub fn from_polygon(polygon: &Polygon) -> Result<Self, InvalidShapeError> {
        check_vertices(polygon.vertices())?;
        for hole in polygon.holes() {
            check_vertices(hole.vertices())?;
        }

        let Some(outer) = oriented(polygon.vertices(), Orientation::Positive) else {
            return Ok(Self { loops: Vec::new() });
        };

        let mut loops = vec![outer];
        loops.extend(
            polygon
                .holes()
                .iter()
                .filter_map(|hole| oriented(hole.vertices(), Orientation::Negative)),
        );
        Ok(Self { loops })
    }

    /// A single outer loop
    pub fn from_loop(vertices: &[Point]) -> Result<Self, InvalidShapeError> {
        check_vertices(vertices)?;
        Ok(Self {
            loops: oriented(vertices, Orientation::Positive).into_iter().collect(),
        })
    }

    pub fn loops(&self) -> &[Vec<Point>] {
        &self.loops
    }

    /// All directed edges of all loops, zero-length edges skipped
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.loops.iter().flat_map(|loop_| {
            let n = loop_.len();
            (0..n)
                .map(move |i| (loop_[i], loop_[(i + 1) % n]))
                .filter(|(a, b)| a != b)
        })
    }

    /// Even-odd membership over every loop
    pub fn contains(&self, p: (f64, f64)) -> bool {
        self.loops
            .iter()
            .filter(|loop_| point_in_polygon(loop_, p.0, p.1))
            .count()
            % 2
            == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::predicates::signed_area;

    fn square(min: i32, max: i32) -> Vec<Point> {
        vec![
            Point::new(min, min),
            Point::new(max, min),
            Point::new(max, max),
            Point::new(min, max),
        ]
    }

    #[test]
    fn test_region_orients_loops() {
        let mut outer = square(0, 10);
        outer.reverse();
        let mut polygon = Polygon::closed(outer).unwrap();
        polygon.add_hole(Polygon::closed(square(3, 7)).unwrap()).unwrap();

        let region = Region::from_polygon(&polygon).unwrap();
        assert_eq!(region.loops().len(), 2);
        assert!(signed_area(&region.loops()[0]) > 0.0);
        assert!(signed_area(&region.loops()[1]) < 0.0);
    }

    #[test]
    fn test_region_contains_with_hole() {
        let mut polygon = Polygon::closed(square(0, 10)).unwrap();
        polygon.add_hole(Polygon::closed(square(3, 7)).unwrap()).unwrap();
        let region = Region::from_polygon(&polygon).unwrap();

        assert!(region.contains((1.5, 1.5)));
        assert!(!region.contains((5.0, 5.0)));
        assert!(!region.contains((12.0, 5.0)));
    }

    #[test]
    fn test_region_rejects_short_loops() {
        let result = Region::from_loop(&[Point::new(0, 0), Point::new(1, 1)]);
        assert_eq!(result.unwrap_err(), InvalidShapeError::TooFewVertices { count: 2 });
    }

    #[test]
    fn test_region_skips_duplicate_vertices() {
        let region = Region::from_loop(&[
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(10, 0),
            Point::new(10, 10),
        ])
        .unwrap();
        assert_eq!(region.edges().count(), 3);
    }
}
