//! Directed segments, offset rails and line-line intersection.

use crate::types::{Marker, NumericError, Point, Vector};

/// A directed line from `a` to `b`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub a: Point,
    pub b: Point,
}

impl Segment {
    pub fn new(a: Point, b: Point) -> Self {
        Segment { a, b }
    }

    /// Direction vector `b - a`.
    pub fn vector(&self) -> Vector {
        self.b - self.a
    }

    /// Unit direction; fails when `a` and `b` coincide.
    pub fn unit(&self) -> Result<Vector, NumericError> {
        self.vector().unit_vector()
    }

    /// The segment translated perpendicular to itself.
    ///
    /// The translation is the unit direction rotated by `direction` degrees
    /// (`+90` or `-90` for the two rails) and scaled by `distance`. Both
    /// endpoints of the rail are `line` points.
    pub fn parallel(&self, direction: f64, distance: f64) -> Result<Segment, NumericError> {
        let shift = self.unit()?.rotate(direction).scale(distance);
        Ok(Segment {
            a: self.a.displace(shift, Marker::Line),
            b: self.b.displace(shift, Marker::Line),
        })
    }

    /// Intersection of the two supporting lines.
    ///
    /// Solves `self.a + t*i = other.a + m*j`. Returns `None` for parallel
    /// lines. Unless `force` is set, the point is only returned when it lies
    /// strictly inside `other` (`0 < m < 1`).
    pub fn intersection(&self, other: &Segment, force: bool) -> Option<Point> {
        let (a, c) = (self.a, other.a);
        let (i, j) = (self.vector(), other.vector());

        let div = i.dx() * j.dy() - i.dy() * j.dx();
        if div == 0.0 {
            return None;
        }

        let m = (i.dx() * a.y - i.dx() * c.y - i.dy() * a.x + i.dy() * c.x) / div;
        if !m.is_finite() {
            return None;
        }
        if force || (0.0 < m && m < 1.0) {
            Some(c.displace(j.scale(m), Marker::Line))
        } else {
            None
        }
    }
}
