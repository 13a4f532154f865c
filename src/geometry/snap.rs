use crate::domain::Point;

const DIRECTIONS: [i32; 8] = [0, 45, 90, 135, 180, 225, 270, 315];

/// Align `to` with `from` along the nearest multiple of 45 degrees
///
/// Horizontal and vertical snaps keep one coordinate of `from`; diagonal
/// snaps step `min(|dx|, |dy|)` along both axes.
pub fn aligned_point(from: Point, to: Point) -> Point {
    let dx = to.x as i64 - from.x as i64;
    let dy = to.y as i64 - from.y as i64;

    if dx == 0 && dy == 0 {
        return to;
    }

    let angle = (dy as f64).atan2(dx as f64).to_degrees().rem_euclid(360.0);

    let mut closest = 0;
    let mut min_difference = 360.0;
    for dir in DIRECTIONS {
        let difference = (angle - dir as f64).abs();
        let difference = difference.min(360.0 - difference);
        if difference < min_difference {
            min_difference = difference;
            closest = dir;
        }
    }

    let offset = dx.abs().min(dy.abs());

    let (x, y) = (from.x as i64, from.y as i64);

    match closest {
        0 | 180 => Point::new(to.x, from.y),
        90 | 270 => Point::new(from.x, to.y),
        45 | 225 => saturated(x + dx.signum() * offset, y + dy.signum() * offset),
        135 => saturated(x - offset, y + offset),
        _ => saturated(x + offset, y - offset),
    }
}

fn saturated(x: i64, y: i64) -> Point {
    let clamp = |v: i64| v.clamp(i32::MIN as i64, i32::MAX as i64) as i32;
    Point::new(clamp(x), clamp(y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_horizontal() {
        let p = aligned_point(Point::new(10, 10), Point::new(50, 13));
        assert_eq!(p, Point::new(50, 10));
    }

    #[test]
    fn test_snap_vertical() {
        let p = aligned_point(Point::new(10, 10), Point::new(8, -30));
        assert_eq!(p, Point::new(10, -30));
    }

    #[test]
    fn test_snap_diagonal() {
        let p = aligned_point(Point::new(0, 0), Point::new(20, 18));
        assert_eq!(p, Point::new(18, 18));

        let p = aligned_point(Point::new(0, 0), Point::new(-20, 18));
        assert_eq!(p, Point::new(-18, 18));

        let p = aligned_point(Point::new(0, 0), Point::new(20, -18));
        assert_eq!(p, Point::new(18, -18));
    }

    #[test]
    fn test_snap_across_full_range() {
        let p = aligned_point(Point::new(i32::MIN, i32::MIN), Point::new(i32::MAX, i32::MAX - 3));
        assert_eq!(p, Point::new(i32::MAX - 3, i32::MAX - 3));

        let p = aligned_point(Point::new(i32::MAX, 0), Point::new(i32::MIN, 2));
        assert_eq!(p, Point::new(i32::MIN, 0));
    }

    #[test]
    fn test_snap_same_point() {
        let p = aligned_point(Point::new(4, 4), Point::new(4, 4));
        assert_eq!(p, Point::new(4, 4));
    }
}
