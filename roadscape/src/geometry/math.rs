use super::tolerance::{lerp, EPS_LEN};
use crate::primitives::Point;

pub fn distance(a: Point, b: Point) -> f64 { (a.x - b.x).hypot(a.y - b.y) }

pub fn add(a: Point, b: Point) -> Point { Point::new(a.x + b.x, a.y + b.y) }

pub fn subtract(a: Point, b: Point) -> Point { Point::new(a.x - b.x, a.y - b.y) }

pub fn average(a: Point, b: Point) -> Point { Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0) }

pub fn scale(p: Point, s: f64) -> Point { Point::new(p.x * s, p.y * s) }

pub fn dot(a: Point, b: Point) -> f64 { a.x * b.x + a.y * b.y }

pub fn magnitude(p: Point) -> f64 { p.x.hypot(p.y) }

/// Unit vector along `p`; the zero vector maps to itself.
pub fn normalize(p: Point) -> Point {
    let m = magnitude(p);
    if m <= EPS_LEN { Point::new(0.0, 0.0) } else { scale(p, 1.0 / m) }
}

/// Angle of `p` relative to the origin, in radians.
pub fn angle(p: Point) -> f64 { p.y.atan2(p.x) }

/// Move `loc` by `offset` along direction `angle`.
pub fn translate(loc: Point, angle: f64, offset: f64) -> Point {
    Point::new(loc.x + angle.cos() * offset, loc.y + angle.sin() * offset)
}

pub fn perpendicular(p: Point) -> Point { Point::new(-p.y, p.x) }

pub fn lerp2d(a: Point, b: Point, t: f64) -> Point {
    Point::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t))
}

/// Point lifted `z` units above `p` as seen from `view_point` (fake 3D).
pub fn point_on_z_plane(p: Point, view_point: Point, z: f64) -> Point {
    add(p, scale(subtract(p, view_point), z))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_and_angle_agree() {
        let o = Point::new(10.0, 10.0);
        let p = translate(o, std::f64::consts::FRAC_PI_2, 5.0);
        assert_eq!(p, Point::new(10.0, 15.0));
        assert!((angle(subtract(p, o)) - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
    }

    #[test]
    fn normalize_zero_is_zero() {
        assert_eq!(normalize(Point::new(0.0, 0.0)), Point::new(0.0, 0.0));
        let n = normalize(Point::new(3.0, 4.0));
        assert_eq!(n, Point::new(0.6, 0.8));
    }

    #[test]
    fn z_plane_moves_away_from_viewer() {
        let p = point_on_z_plane(Point::new(100.0, 0.0), Point::new(0.0, 0.0), 0.1);
        assert_eq!(p, Point::new(110.0, 0.0));
    }
}
