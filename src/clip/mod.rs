//! Boolean area algebra over polygons with holes
//!
//! Results are rebuilt as closed polygons on the integer grid: outer loops
//! with positive signed area, holes with negative signed area. Holes of the
//! operands take part in the operation, so every resulting fragment carries
//! exactly the holes that still lie inside it, each as its own copy.

mod assemble;
mod boolean;
mod containment;
mod region;

pub use boolean::Operation;
pub use containment::{Containment, classify_containment};

use crate::domain::{InvalidShapeError, Polygon};
use assemble::{assemble, snap_loop};
use region::Region;

/// Apply `op` to `a` and `b`. Fragments take their fill state from `a`.
pub fn combine(a: &Polygon, b: &Polygon, op: Operation) -> Result<Vec<Polygon>, InvalidShapeError> {
    let a_region = Region::from_polygon(a)?;
    let b_region = Region::from_polygon(b)?;

    let loops = boolean::combine(&a_region, &b_region, op)
        .iter()
        .filter_map(|ring| snap_loop(ring))
        .collect();

    Ok(assemble(loops, a))
}

/// Remove `clipper`'s area from `subject`.
///
/// An empty list means the subject was consumed entirely.
pub fn subtract(subject: &Polygon, clipper: &Polygon) -> Result<Vec<Polygon>, InvalidShapeError> {
    combine(subject, clipper, Operation::Subtract)
}

pub fn intersect(a: &Polygon, b: &Polygon) -> Result<Vec<Polygon>, InvalidShapeError> {
    combine(a, b, Operation::Intersect)
}

pub fn union(a: &Polygon, b: &Polygon) -> Result<Vec<Polygon>, InvalidShapeError> {
    combine(a, b, Operation::Union)
}
