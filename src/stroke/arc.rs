//! Circular arcs approximated by a single cubic Bezier.
//!
//! An arc from `p0` to `p3` around `center` becomes
//! `[p0 (line), cp1 (none), cp2 (none), p3 (curve)]`. The handles are the
//! radii rotated a quarter turn and scaled by `4/3 * tan(theta / 4)`, where
//! `theta` is the swept angle.
//!
//! The radii are always rotated by +90°, which makes the arc sweep clockwise
//! (y-up) from `p0` to `p3`. Every caller hands the endpoints over in that
//! order.

use crate::types::{Marker, Point};

use super::defaults;

/// Cubic approximation of the arc from `p0` to `p3` around `center`.
///
/// The swept angle comes from the law of cosines on the triangle
/// `(p0, p3, center)` with both legs assumed to be `radius` long. The cosine
/// is clamped to `[-1, 1]` so nearly straight corners cannot leave the
/// domain of `acos` through rounding.
pub fn arc(p0: Point, p3: Point, center: Point, radius: f64) -> [Point; 4] {
    let a = center - p0;
    let b = center - p3;
    let c = p3 - p0;

    let half = (a.dot(a) + b.dot(b) - c.dot(c)) / 2.0;
    let cos = (half / (radius * radius)).clamp(-1.0, 1.0);
    sweep(p0, p3, center, cos.acos())
}

/// Cubic approximation of a quarter circle from `p0` to `p3`.
pub fn quarter(p0: Point, p3: Point, center: Point) -> [Point; 4] {
    sweep(p0, p3, center, std::f64::consts::FRAC_PI_2)
}

fn sweep(p0: Point, p3: Point, center: Point, theta: f64) -> [Point; 4] {
    let alpha = if theta == std::f64::consts::FRAC_PI_2 {
        defaults::KAPPA
    } else {
        4.0 / 3.0 * (theta / 4.0).tan()
    };

    let a = (center - p0).rotate(90.0).scale(alpha);
    let b = (center - p3).rotate(90.0).scale(alpha);

    [
        p0.marked(Marker::Line),
        p0.displace(a, Marker::OffCurve),
        p3.displace(-b, Marker::OffCurve),
        p3.marked(Marker::Curve),
    ]
}

/// Join consecutive arcs into one point run.
///
/// Each arc after the first starts where the previous one ended, so its
/// leading on-curve point is dropped.
pub fn chain<I>(arcs: I) -> Vec<Point>
where
    I: IntoIterator<Item = [Point; 4]>,
{
    let mut points = Vec::new();
    for (n, arc) in arcs.into_iter().enumerate() {
        let skip = if n == 0 { 0 } else { 1 };
        points.extend_from_slice(&arc[skip..]);
    }
    points
}
