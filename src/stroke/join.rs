//! Corner joins: how the offset rails of two consecutive segments meet.
//!
//! Each policy is its own type implementing [`JoinStyle`]; [`LineJoin`] is
//! the closed set of policies, resolved from a name once and dispatched
//! with `enum_dispatch`.

use std::fmt;
use std::str::FromStr;

use enum_dispatch::enum_dispatch;

use crate::errors::ConfigError;
use crate::types::{NumericError, Point, try_positive};

use super::arc;
use super::defaults;
use super::segment::Segment;

/// Which rail of the stroke a join is computed for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// The +90° rail: outside of a clockwise contour.
    Outer,
    /// The -90° rail, read backwards when the inner contour is assembled.
    Inner,
}

impl Side {
    /// Rotation from segment direction to this rail, in degrees.
    pub fn angle(self) -> f64 {
        match self {
            Side::Outer => defaults::OUTER,
            Side::Inner => defaults::INNER,
        }
    }

    /// Put the two rail endpoints of a facet in emission order.
    ///
    /// The inner rail is traversed backwards, so its facet is reversed up
    /// front.
    fn facet(self, end0: Point, start1: Point) -> Vec<Point> {
        match self {
            Side::Outer => vec![end0, start1],
            Side::Inner => vec![start1, end0],
        }
    }
}

/// Three consecutive path points; the join is computed at `at`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Corner {
    pub prev: Point,
    pub at: Point,
    pub next: Point,
}

impl Corner {
    pub fn new(prev: Point, at: Point, next: Point) -> Self {
        Corner { prev, at, next }
    }

    /// Classify the corner from the directions of its two segments.
    ///
    /// Segments whose unit directions have a cross product within
    /// [`defaults::PARALLEL`] are parallel. Their rails would only meet
    /// through rounding noise, so they never reach the intersection code.
    pub fn turn(&self) -> Result<Turn, NumericError> {
        let incoming = Segment::new(self.prev, self.at).unit()?;
        let outgoing = Segment::new(self.at, self.next).unit()?;
        Ok(if incoming.cross(outgoing).abs() > defaults::PARALLEL {
            Turn::Bend
        } else if incoming.dot(outgoing) > 0.0 {
            Turn::Straight
        } else {
            Turn::Reversal
        })
    }

    /// Offset rails of the incoming and outgoing segments on `side`.
    pub fn rails(&self, side: Side, offset: f64) -> Result<Rails, NumericError> {
        Ok(Rails {
            incoming: Segment::new(self.prev, self.at).parallel(side.angle(), offset)?,
            outgoing: Segment::new(self.at, self.next).parallel(side.angle(), offset)?,
            side,
        })
    }
}

/// How the path runs through a corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    /// The segments meet at an angle.
    Bend,
    /// The outgoing segment carries on in the incoming direction.
    Straight,
    /// The outgoing segment doubles back over the incoming one.
    Reversal,
}

/// The two rails meeting at a corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rails {
    pub incoming: Segment,
    pub outgoing: Segment,
    pub side: Side,
}

impl Rails {
    /// Intersection of the rails, if they cross inside the outgoing rail.
    pub fn meet(&self) -> Option<Point> {
        self.incoming.intersection(&self.outgoing, false)
    }

    /// Intersection of the extended rails.
    pub fn meet_extended(&self) -> Option<Point> {
        self.incoming.intersection(&self.outgoing, true)
    }

    /// The flat corner cut between the raw rail endpoints.
    pub fn bevel(&self) -> Vec<Point> {
        self.side.facet(self.incoming.b, self.outgoing.a)
    }
}

/// A corner join policy.
#[enum_dispatch]
pub trait JoinStyle {
    /// Points emitted on `side` for `corner` at distance `offset`.
    fn join(&self, corner: &Corner, side: Side, offset: f64) -> Result<Vec<Point>, NumericError>;
}

/// Flat cut when the rails do not cross cleanly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Bevel;

/// Rails extended to their intersection.
///
/// Without a limit the spike is unbounded. With a limit, a miter whose tip
/// lies further than `limit * offset` from the corner falls back to a
/// bevel.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Miter {
    limit: Option<f64>,
}

/// Circular arc around the corner when the rails do not cross cleanly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Round;

impl Miter {
    pub const UNLIMITED: Miter = Miter { limit: None };

    pub fn with_limit(limit: f64) -> Result<Miter, ConfigError> {
        let limit = try_positive(limit)
            .map_err(|reason| ConfigError::InvalidMiterLimit { value: limit, reason })?;
        Ok(Miter { limit: Some(limit) })
    }

    pub fn limit(&self) -> Option<f64> {
        self.limit
    }
}

impl JoinStyle for Bevel {
    fn join(&self, corner: &Corner, side: Side, offset: f64) -> Result<Vec<Point>, NumericError> {
        let turn = corner.turn()?;
        let rails = corner.rails(side, offset)?;
        match rails.meet().filter(|_| turn == Turn::Bend) {
            Some(point) => Ok(vec![point]),
            None => Ok(rails.bevel()),
        }
    }
}

impl JoinStyle for Miter {
    fn join(&self, corner: &Corner, side: Side, offset: f64) -> Result<Vec<Point>, NumericError> {
        let turn = corner.turn()?;
        let rails = corner.rails(side, offset)?;
        let tip = match turn {
            // The rails continue each other; their shared end is the join
            Turn::Straight => return Ok(vec![rails.incoming.b]),
            Turn::Reversal => return Ok(rails.bevel()),
            Turn::Bend => match rails.meet_extended() {
                Some(tip) => tip,
                None => return Ok(rails.bevel()),
            },
        };
        if let Some(limit) = self.limit {
            if tip.distance(corner.at) > limit * offset {
                crate::log::trace!(x = corner.at.x, y = corner.at.y, "miter limit exceeded");
                return Ok(rails.bevel());
            }
        }
        Ok(vec![tip])
    }
}

impl JoinStyle for Round {
    fn join(&self, corner: &Corner, side: Side, offset: f64) -> Result<Vec<Point>, NumericError> {
        let turn = corner.turn()?;
        let rails = corner.rails(side, offset)?;
        if let Some(point) = rails.meet().filter(|_| turn == Turn::Bend) {
            return Ok(vec![point]);
        }
        let facet = rails.bevel();
        Ok(arc::arc(facet[0], facet[1], corner.at, offset).to_vec())
    }
}

/// The closed set of corner join policies.
#[enum_dispatch(JoinStyle)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LineJoin {
    Bevel,
    Miter,
    Round,
}

impl LineJoin {
    pub fn name(&self) -> &'static str {
        match self {
            LineJoin::Bevel(_) => "bevel",
            LineJoin::Miter(_) => "miter",
            LineJoin::Round(_) => "round",
        }
    }

    /// Every policy with default settings.
    pub fn all() -> [LineJoin; 3] {
        [Bevel.into(), Miter::UNLIMITED.into(), Round.into()]
    }
}

impl Default for LineJoin {
    fn default() -> Self {
        defaults::JOIN
    }
}

impl fmt::Display for LineJoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LineJoin {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bevel" => Ok(Bevel.into()),
            "miter" => Ok(Miter::UNLIMITED.into()),
            "round" => Ok(Round.into()),
            _ => Err(ConfigError::UnknownJoin { name: s.to_string() }),
        }
    }
}
