use serde::Serialize;

use super::boolean::{Operation, combine, ring_area};
use super::region::Region;
use crate::domain::{InvalidShapeError, Polygon};
use crate::geometry::Bounds;
use crate::geometry::predicates::point_on_boundary;

/// Below this a result loop is treated as having no area
const AREA_EPSILON: f64 = 1e-9;

/// How one shape sits relative to another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Containment {
    /// The shapes share no area
    Disjoint,
    /// The shapes share area but `inner` is not cleanly inside `outer`
    Overlapping,
    /// `inner`'s bounding box lies within `outer`'s area and no vertex of
    /// `inner` touches `outer`'s boundary
    ContainedNotTouching,
}

fn has_area(loops: &[Vec<(f64, f64)>]) -> bool {
    loops.iter().any(|ring| ring_area(ring).abs() > AREA_EPSILON)
}

/// Classify `inner` against `outer`, holes of `outer` included
pub fn classify_containment(
    inner: &Polygon,
    outer: &Polygon,
) -> Result<Containment, InvalidShapeError> {
    let inner_region = Region::from_polygon(inner)?;
    let outer_region = Region::from_polygon(outer)?;

    if !has_area(&combine(&inner_region, &outer_region, Operation::Intersect)) {
        return Ok(Containment::Disjoint);
    }

    let Some(bounds) = Bounds::from_points(inner.vertices()) else {
        return Ok(Containment::Disjoint);
    };

    let bounds_inside = if bounds.is_degenerate() {
        inner
            .vertices()
            .iter()
            .all(|v| outer_region.contains(v.to_f64()))
    } else {
        let rect = Region::from_loop(&bounds.corners())?;
        !has_area(&combine(&rect, &outer_region, Operation::Subtract))
    };

    if !bounds_inside {
        return Ok(Containment::Overlapping);
    }

    let touching = inner.vertices().iter().any(|v| {
        outer_region
            .loops()
            .iter()
            .any(|loop_| point_on_boundary(loop_, v.to_f64()))
    });

    Ok(if touching {
        Containment::Overlapping
    } else {
        Containment::ContainedNotTouching
    })
}
