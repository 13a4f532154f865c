use crate::domain::Polygon;
use crate::geometry::Bounds;
use crate::raster::{Color, PixelSurface};

/// Even-odd fill of a polygon's area, holes excluded
///
/// Every pixel of the polygon's bounding box whose integer coordinate falls
/// inside the outer loop and outside all holes is painted, except pixels
/// already holding `boundary`.
pub fn fill_area(surface: &mut PixelSurface, polygon: &Polygon, fill: Color, boundary: Color) {
    let Some(bounds) = Bounds::from_points(polygon.vertices()) else {
        return;
    };
    let canvas = Bounds {
        min_x: 0,
        max_x: surface.width() as i32 - 1,
        min_y: 0,
        max_y: surface.height() as i32 - 1,
    };
    let Some(bounds) = bounds.intersect(&canvas) else {
        return;
    };

    for y in bounds.min_y..=bounds.max_y {
        for x in bounds.min_x..=bounds.max_x {
            if polygon.area_contains(x as f64, y as f64) && surface.get(x, y) != Some(boundary) {
                surface.set(x, y, fill);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Point;

    const BG: Color = 0x000000;
    const EDGE: Color = 0xFFFFFF;
    const FILL: Color = 0x00FF00;

    fn square(min: i32, max: i32) -> Vec<Point> {
        vec![
            Point::new(min, min),
            Point::new(max, min),
            Point::new(max, max),
            Point::new(min, max),
        ]
    }

    #[test]
    fn test_fill_area_respects_holes() {
        let mut surface = PixelSurface::new(30, 30, BG);
        let mut polygon = Polygon::closed(square(0, 20)).unwrap();
        polygon.add_hole(Polygon::closed(square(5, 15)).unwrap()).unwrap();

        fill_area(&mut surface, &polygon, FILL, EDGE);

        assert_eq!(surface.get(2, 2), Some(FILL));
        assert_eq!(surface.get(10, 10), Some(BG));
        assert_eq!(surface.get(25, 25), Some(BG));
        // 20x20 outer minus 10x10 hole, half-open on both
        assert_eq!(surface.count(FILL), 300);
    }

    #[test]
    fn test_fill_area_offscreen() {
        let mut surface = PixelSurface::new(10, 10, BG);
        let polygon = Polygon::closed(square(50, 60)).unwrap();
        fill_area(&mut surface, &polygon, FILL, EDGE);
        assert_eq!(surface.count(FILL), 0);
    }
}
