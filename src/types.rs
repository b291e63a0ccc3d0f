//! Geometry primitives: points, vectors and segment markers.
//!
//! `Point - Point` gives a [`Vector`] and `Point + Vector` gives a `Point`;
//! two points cannot be added. Both are small `Copy` values. Normalizing a
//! vector that has no usable length is an error, never a NaN.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use glam::DVec2;
use thiserror::Error;

/// Why a number was rejected, or why a vector has no direction.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericError {
    #[error("must be a number")]
    NaN,
    #[error("must be finite")]
    Infinite,
    /// Zero where a length or size was expected.
    #[error("must not be zero")]
    Zero,
    #[error("must be positive")]
    Negative,
}

/// `val` back if it is a finite number above zero.
pub fn try_positive(val: f64) -> Result<f64, NumericError> {
    match val {
        v if v.is_nan() => Err(NumericError::NaN),
        v if v.is_infinite() => Err(NumericError::Infinite),
        v if v == 0.0 => Err(NumericError::Zero),
        v if v < 0.0 => Err(NumericError::Negative),
        v => Ok(v),
    }
}

/// Segment marker carried by every point.
///
/// Follows the point-pen convention of font tools: an on-curve point says
/// how the segment *ending* at it is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Marker {
    /// Starts an open contour.
    Move,
    /// End of a straight segment.
    #[default]
    Line,
    /// End of a cubic Bezier; preceded by two off-curve points.
    Curve,
    /// Off-curve Bezier control point (the "none" marker).
    OffCurve,
}

impl Marker {
    pub fn is_on_curve(self) -> bool {
        !matches!(self, Marker::OffCurve)
    }

    pub fn name(self) -> &'static str {
        match self {
            Marker::Move => "move",
            Marker::Line => "line",
            Marker::Curve => "curve",
            Marker::OffCurve => "none",
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A position plus its segment marker.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub marker: Marker,
}

impl Point {
    /// A `line` point.
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y, marker: Marker::Line }
    }

    pub const fn with_marker(x: f64, y: f64, marker: Marker) -> Self {
        Point { x, y, marker }
    }

    /// Same position, different marker.
    pub fn marked(self, marker: Marker) -> Self {
        Point { marker, ..self }
    }

    /// Vector from `self` to `other`.
    pub fn vector_to(self, other: Point) -> Vector {
        other - self
    }

    pub fn distance(self, other: Point) -> f64 {
        self.vector_to(other).norm()
    }

    /// New point at `self + v` carrying `marker`.
    pub fn displace(self, v: Vector, marker: Marker) -> Point {
        (self + v).marked(marker)
    }

    /// Scale the coordinates about the origin, keeping the marker.
    pub fn scale(self, k: f64) -> Point {
        Point { x: self.x * k, y: self.y * k, ..self }
    }

    /// True when both coordinates are equal, markers ignored.
    pub fn same_position(self, other: Point) -> bool {
        self.x == other.x && self.y == other.y
    }

    pub fn to_dvec2(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {}", self.x, self.y, self.marker)
    }
}

/// Translate a point; the marker is kept
impl Add<Vector> for Point {
    type Output = Point;
    fn add(self, rhs: Vector) -> Point {
        Point { x: self.x + rhs.0.x, y: self.y + rhs.0.y, marker: self.marker }
    }
}

impl Sub<Vector> for Point {
    type Output = Point;
    fn sub(self, rhs: Vector) -> Point {
        self + (-rhs)
    }
}

/// Subtract two points to get a vector
impl Sub<Point> for Point {
    type Output = Vector;
    fn sub(self, rhs: Point) -> Vector {
        Vector(self.to_dvec2() - rhs.to_dvec2())
    }
}

/// A displacement (not an absolute position).
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Vector(DVec2);

impl Vector {
    pub const ZERO: Vector = Vector(DVec2::ZERO);

    pub const fn new(dx: f64, dy: f64) -> Self {
        Vector(DVec2::new(dx, dy))
    }

    pub fn dx(self) -> f64 {
        self.0.x
    }

    pub fn dy(self) -> f64 {
        self.0.y
    }

    /// Euclidean length, without overflowing for large finite components.
    pub fn norm(self) -> f64 {
        self.0.x.hypot(self.0.y)
    }

    /// Normalize to length 1.
    ///
    /// Fails with [`NumericError::Zero`] for the zero vector (two coincident
    /// points), and with `NaN`/`Infinite` when the length is not finite.
    pub fn unit_vector(self) -> Result<Vector, NumericError> {
        let norm = self.norm();
        if norm == 0.0 {
            Err(NumericError::Zero)
        } else if norm.is_nan() {
            Err(NumericError::NaN)
        } else if norm.is_infinite() {
            Err(NumericError::Infinite)
        } else {
            Ok(Vector(self.0 / norm))
        }
    }

    /// Rotate counter-clockwise (y-up) by `degrees`.
    pub fn rotate(self, degrees: f64) -> Vector {
        self.rotate_rad(degrees.to_radians())
    }

    pub fn rotate_rad(self, radians: f64) -> Vector {
        Vector(DVec2::from_angle(radians).rotate(self.0))
    }

    pub fn scale(self, k: f64) -> Vector {
        Vector(self.0 * k)
    }

    /// Z component of the 2D cross product.
    pub fn cross(self, other: Vector) -> f64 {
        self.0.perp_dot(other.0)
    }

    pub fn dot(self, other: Vector) -> f64 {
        self.0.dot(other.0)
    }
}

impl Add for Vector {
    type Output = Vector;
    fn add(self, rhs: Vector) -> Vector {
        Vector(self.0 + rhs.0)
    }
}

impl Sub for Vector {
    type Output = Vector;
    fn sub(self, rhs: Vector) -> Vector {
        Vector(self.0 - rhs.0)
    }
}

impl Neg for Vector {
    type Output = Vector;
    fn neg(self) -> Vector {
        Vector(-self.0)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;
    fn mul(self, rhs: f64) -> Vector {
        self.scale(rhs)
    }
}

/// Scalar * Vector = Vector
impl Mul<Vector> for f64 {
    type Output = Vector;
    fn mul(self, rhs: Vector) -> Vector {
        rhs.scale(self)
    }
}

impl From<DVec2> for Vector {
    fn from(v: DVec2) -> Self {
        Vector(v)
    }
}

impl From<Vector> for DVec2 {
    fn from(v: Vector) -> Self {
        v.0
    }
}
