//! Default stroke settings and fixed angles

use super::cap::{LineCap, Square};
use super::join::{LineJoin, Miter};

/// Stroke width used when a skeleton does not set one.
pub const WIDTH: f64 = 1.0;
pub const JOIN: LineJoin = LineJoin::Miter(Miter::UNLIMITED);
pub const CAP: LineCap = LineCap::Square(Square);

/// Rotation from a segment's direction to its outer rail, in degrees.
pub const OUTER: f64 = 90.0;
/// Rotation from a segment's direction to its inner rail, in degrees.
pub const INNER: f64 = -90.0;

/// Handle length of a cubic approximating a quarter circle of radius 1:
/// `4/3 * tan(pi/8)`.
pub const KAPPA: f64 = 0.552_284_749_830_793_4;

/// Largest cross product of two unit directions still treated as parallel.
pub const PARALLEL: f64 = 1e-9;
