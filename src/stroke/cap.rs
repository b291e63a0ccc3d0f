//! End caps for open paths and the single-point "dot" case.

use std::fmt;
use std::str::FromStr;

use enum_dispatch::enum_dispatch;

use crate::errors::ConfigError;
use crate::types::{Marker, NumericError, Point, Vector};

use super::arc;
use super::defaults;

/// Offsets from an endpoint, all of length `offset`.
///
/// `right` and `left` are the -90° and +90° perpendiculars of the
/// direction from the endpoint into the path; `back` points away from the
/// path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CapFrame {
    pub end: Point,
    pub right: Vector,
    pub back: Vector,
    pub left: Vector,
}

impl CapFrame {
    /// Frame at `end`, looking toward its neighbor `toward`.
    pub fn new(end: Point, toward: Point, offset: f64) -> Result<CapFrame, NumericError> {
        let unit = (toward - end).unit_vector()?;
        Ok(CapFrame {
            end: end.marked(Marker::Line),
            right: unit.rotate(defaults::INNER).scale(offset),
            back: unit.rotate(180.0).scale(offset),
            left: unit.rotate(defaults::OUTER).scale(offset),
        })
    }

    fn at(&self, v: Vector) -> Point {
        self.end.displace(v, Marker::Line)
    }
}

/// An end cap policy.
#[enum_dispatch]
pub trait CapStyle {
    /// Cap points at the end of an open path, from the -90° rail to the
    /// +90° rail.
    fn cap(&self, frame: &CapFrame) -> Vec<Point>;

    /// The whole outline of a one-point path of radius `offset`.
    fn dot(&self, at: Point, offset: f64) -> Vec<Point>;
}

/// Rails stop flush with the endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Butt;

/// Rails extend `offset` past the endpoint, closed flat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Square;

/// Half circle around the endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Round;

/// Triangle whose tip sits `offset` past the endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Sharp;

/// The four axis offsets of a dot, clockwise (y-up) from the bottom.
fn diamond(at: Point, offset: f64) -> [Point; 4] {
    [
        Vector::new(0.0, -offset),
        Vector::new(-offset, 0.0),
        Vector::new(0.0, offset),
        Vector::new(offset, 0.0),
    ]
    .map(|v| at.displace(v, Marker::Line))
}

impl CapStyle for Butt {
    fn cap(&self, frame: &CapFrame) -> Vec<Point> {
        vec![frame.at(frame.right), frame.at(frame.left)]
    }

    /// A dot has no direction to be flush with.
    fn dot(&self, _at: Point, _offset: f64) -> Vec<Point> {
        Vec::new()
    }
}

impl CapStyle for Square {
    fn cap(&self, frame: &CapFrame) -> Vec<Point> {
        vec![
            frame.at(frame.back + frame.right),
            frame.at(frame.back + frame.left),
        ]
    }

    fn dot(&self, at: Point, offset: f64) -> Vec<Point> {
        [
            Vector::new(offset, offset),
            Vector::new(offset, -offset),
            Vector::new(-offset, -offset),
            Vector::new(-offset, offset),
        ]
        .map(|v| at.displace(v, Marker::Line))
        .to_vec()
    }
}

impl CapStyle for Sharp {
    fn cap(&self, frame: &CapFrame) -> Vec<Point> {
        vec![
            frame.at(frame.right),
            frame.at(frame.back),
            frame.at(frame.left),
        ]
    }

    fn dot(&self, at: Point, offset: f64) -> Vec<Point> {
        diamond(at, offset).to_vec()
    }
}

impl CapStyle for Round {
    fn cap(&self, frame: &CapFrame) -> Vec<Point> {
        let (right, back, left) = (
            frame.at(frame.right),
            frame.at(frame.back),
            frame.at(frame.left),
        );
        arc::chain([
            arc::quarter(right, back, frame.end),
            arc::quarter(back, left, frame.end),
        ])
    }

    /// Four quarter arcs. The last one closes onto the first point, which
    /// therefore becomes the end of a curve and is not repeated.
    fn dot(&self, at: Point, offset: f64) -> Vec<Point> {
        let pts = diamond(at, offset);
        let mut points = arc::chain((0..4).map(|i| arc::quarter(pts[i], pts[(i + 1) % 4], at)));
        if let Some(closing) = points.pop() {
            points[0] = closing;
        }
        points
    }
}

/// The closed set of end cap policies.
#[enum_dispatch(CapStyle)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineCap {
    Butt,
    Square,
    Round,
    Sharp,
}

impl LineCap {
    pub fn name(&self) -> &'static str {
        match self {
            LineCap::Butt(_) => "butt",
            LineCap::Square(_) => "square",
            LineCap::Round(_) => "round",
            LineCap::Sharp(_) => "sharp",
        }
    }

    pub fn all() -> [LineCap; 4] {
        [Butt.into(), Square.into(), Round.into(), Sharp.into()]
    }
}

impl Default for LineCap {
    fn default() -> Self {
        defaults::CAP
    }
}

impl fmt::Display for LineCap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LineCap {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "butt" => Ok(Butt.into()),
            "square" => Ok(Square.into()),
            "round" => Ok(Round.into()),
            // "spike" is the older name of the sharp cap
            "sharp" | "spike" => Ok(Sharp.into()),
            _ => Err(ConfigError::UnknownCap { name: s.to_string() }),
        }
    }
}
