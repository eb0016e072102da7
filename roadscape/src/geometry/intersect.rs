// Parametric segment-segment intersection.
// Parallel and collinear pairs are reported as no intersection.

use super::tolerance::{lerp, EPS_DENOM};
use crate::primitives::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub point: Point,
    /// Parameter along the first segment (0 = A, 1 = B).
    pub offset: f64,
}

/// Intersection of the finite segments AB and CD.
///
/// Returns `None` when the denominator is within `EPS_DENOM` of zero or when
/// either parameter falls outside `[0, 1]`.
pub fn get_intersection(a: Point, b: Point, c: Point, d: Point) -> Option<Intersection> {
    let t_top = (d.x - c.x) * (a.y - c.y) - (d.y - c.y) * (a.x - c.x);
    let u_top = (c.y - a.y) * (a.x - b.x) - (c.x - a.x) * (a.y - b.y);
    let bottom = (d.y - c.y) * (b.x - a.x) - (d.x - c.x) * (b.y - a.y);

    if bottom.abs() <= EPS_DENOM {
        return None;
    }
    let t = t_top / bottom;
    let u = u_top / bottom;
    if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
        return None;
    }
    Some(Intersection {
        point: Point::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t)),
        offset: t,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point { Point::new(x, y) }

    #[test]
    fn proper_cross() {
        let r = get_intersection(p(0.0, 0.0), p(10.0, 0.0), p(5.0, -5.0), p(5.0, 5.0)).expect("cross");
        assert_eq!(r.point, p(5.0, 0.0));
        assert!((r.offset - 0.5).abs() < 1e-12);
    }

    #[test]
    fn endpoint_touch_reports_offset_one() {
        let r = get_intersection(p(0.0, 0.0), p(1.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)).expect("touch");
        assert_eq!(r.offset, 1.0);
    }

    #[test]
    fn parallel_and_collinear_are_none() {
        assert!(get_intersection(p(0.0, 0.0), p(3.0, 0.0), p(0.0, 1.0), p(3.0, 1.0)).is_none());
        assert!(get_intersection(p(0.0, 0.0), p(3.0, 0.0), p(1.0, 0.0), p(2.0, 0.0)).is_none());
    }

    #[test]
    fn out_of_range_is_none() {
        assert!(get_intersection(p(0.0, 0.0), p(1.0, 0.0), p(5.0, -1.0), p(5.0, 1.0)).is_none());
    }
}
