use serde::{Deserialize, Serialize};

use super::{InvalidShapeError, Point};
use crate::geometry::predicates::{self, Orientation};

/// Which interior fill algorithm a polygon is repainted with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillMode {
    #[default]
    SeedFill,
    ScanLine,
}

/// A vertex loop with fill state and a one-level list of holes
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Polygon {
    vertices: Vec<Point>,
    closed: bool,
    filled: bool,
    fill_mode: FillMode,
    holes: Vec<Polygon>,
    is_hole: bool,
}

impl Polygon {
    /// An empty, open polygon
    pub fn new() -> Self {
        Self::default()
    }

    /// A closed polygon from a vertex loop
    pub fn closed(vertices: Vec<Point>) -> Result<Self, InvalidShapeError> {
        let mut polygon = Self {
            vertices,
            ..Self::default()
        };
        polygon.close()?;
        Ok(polygon)
    }

    /// Assemble a closed polygon from an already validated outer loop and holes
    pub(crate) fn from_parts(vertices: Vec<Point>, holes: Vec<Vec<Point>>) -> Self {
        Self {
            vertices,
            closed: true,
            holes: holes.into_iter().map(Self::hole_from_loop).collect(),
            ..Self::default()
        }
    }

    fn hole_from_loop(vertices: Vec<Point>) -> Self {
        Self {
            vertices,
            closed: true,
            is_hole: true,
            ..Self::default()
        }
    }

    pub fn add_vertex(&mut self, point: Point) -> Result<(), InvalidShapeError> {
        if self.closed {
            return Err(InvalidShapeError::AlreadyClosed);
        }
        self.vertices.push(point);
        Ok(())
    }

    /// Freeze the vertex list; the closing edge runs from the last vertex to the first
    pub fn close(&mut self) -> Result<(), InvalidShapeError> {
        if self.vertices.len() < 3 {
            return Err(InvalidShapeError::TooFewVertices {
                count: self.vertices.len(),
            });
        }
        self.closed = true;
        Ok(())
    }

    /// Attach a closed polygon as a hole.
    ///
    /// The hole must be closed and its first vertex must lie inside this
    /// polygon's outer boundary. On error the hole list is untouched.
    pub fn add_hole(&mut self, mut hole: Polygon) -> Result<(), InvalidShapeError> {
        if !hole.closed {
            return Err(InvalidShapeError::NotClosed);
        }

        let (x, y) = hole.vertices[0].to_f64();
        if !self.contains(x, y) {
            return Err(InvalidShapeError::NotContained);
        }

        hole.is_hole = true;
        hole.filled = false;
        hole.holes.clear();
        self.holes.push(hole);
        Ok(())
    }

    /// Reset to the empty, open state
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Ray-casting test against the outer boundary only
    pub fn contains(&self, x: f64, y: f64) -> bool {
        predicates::point_in_polygon(&self.vertices, x, y)
    }

    /// Even-odd test that also honours holes
    pub fn area_contains(&self, x: f64, y: f64) -> bool {
        self.contains(x, y) && !self.holes.iter().any(|hole| hole.contains(x, y))
    }

    pub fn signed_area(&self) -> f64 {
        predicates::signed_area(&self.vertices)
    }

    pub fn orientation(&self) -> Orientation {
        predicates::orientation(&self.vertices)
    }

    /// Directed edges, including the closing edge when closed
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.vertices.len();
        let count = match (self.closed, n) {
            (_, 0 | 1) => 0,
            (true, _) => n,
            (false, _) => n - 1,
        };
        (0..count).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn holes(&self) -> &[Polygon] {
        &self.holes
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn is_filled(&self) -> bool {
        self.filled
    }

    pub fn set_filled(&mut self, filled: bool) {
        self.filled = filled;
    }

    pub fn fill_mode(&self) -> FillMode {
        self.fill_mode
    }

    pub fn set_fill_mode(&mut self, fill_mode: FillMode) {
        self.fill_mode = fill_mode;
    }

    pub fn is_hole(&self) -> bool {
        self.is_hole
    }
}

/// A closed regular pentagon with its first vertex straight above `center`
///
/// Screen coordinates grow downwards, so "above" subtracts from y.
pub fn regular_pentagon(center: Point, radius: i32) -> Polygon {
    let vertices = (0..5)
        .map(|i| {
            let angle = (90.0 + i as f64 * 72.0).to_radians();
            let r = radius as f64;
            Point::new(
                center.x + (r * angle.cos()) as i32,
                center.y - (r * angle.sin()) as i32,
            )
        })
        .collect();

    Polygon {
        vertices,
        closed: true,
        ..Polygon::default()
    }
}
