//! Contours, vectorized shapes and glyphs.
//!
//! A [`Contour`] is both the input of the vectorizer (a skeleton polyline)
//! and a piece of its output (an outline). Open contours start with a
//! `move` point; closed contours contain none.

use crate::errors::StrokeError;
use crate::pen::PointPen;
use crate::stroke::vectorize;
use crate::style::StrokeStyle;
use crate::types::{Marker, Point, Vector};

/// An ordered run of points, open or closed.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Contour {
    points: Vec<Point>,
    closed: bool,
}

impl Contour {
    /// Open polyline; the first point is marked `move`.
    pub fn open(points: Vec<Point>) -> Self {
        Self::from_points(points, false)
    }

    /// Closed polygon.
    pub fn closed(points: Vec<Point>) -> Self {
        Self::from_points(points, true)
    }

    /// Keep the markers of `points`, except that only the first point of an
    /// open contour may be a `move`.
    pub fn from_points(mut points: Vec<Point>, closed: bool) -> Self {
        for (i, p) in points.iter_mut().enumerate() {
            if !closed && i == 0 {
                p.marker = Marker::Move;
            } else if p.marker == Marker::Move {
                p.marker = Marker::Line;
            }
        }
        Contour { points, closed }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Shoelace area over every point; negative for clockwise (y-up).
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        let twice: f64 = (0..n)
            .map(|i| {
                let (a, b) = (self.points[i], self.points[(i + 1) % n]);
                a.x * b.y - b.x * a.y
            })
            .sum();
        twice / 2.0
    }

    pub fn is_clockwise(&self) -> bool {
        self.signed_area() < 0.0
    }

    /// Same points in the opposite order.
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self::from_points(points, self.closed)
    }

    fn map(&self, f: impl Fn(Point) -> Point) -> Self {
        Contour {
            points: self.points.iter().map(|&p| f(p)).collect(),
            closed: self.closed,
        }
    }

    /// Uniform scale about the origin.
    pub fn scale(&self, k: f64) -> Self {
        self.map(|p| p.scale(k))
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        let v = Vector::new(dx, dy);
        self.map(|p| p + v)
    }

    /// Slant by `degrees` about the horizontal line `y = baseline`.
    ///
    /// Works in pixel space (y down): for positive angles, points with
    /// `y < baseline` shift right and points below it shift left.
    pub fn oblique(&self, degrees: f64, baseline: f64) -> Self {
        let t = degrees.to_radians().tan();
        self.map(|p| Point { x: p.x + (baseline - p.y) * t, ..p })
    }

    /// Flip the y axis about `new_zero`: pixel rows (y down) become font
    /// units (y up).
    pub fn to_font_coords(&self, new_zero: f64) -> Self {
        self.map(|p| Point { y: new_zero - p.y, ..p })
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::of(&self.points)
    }

    /// Stream the points through a point pen.
    pub fn draw<P: PointPen + ?Sized>(&self, pen: &mut P) {
        pen.begin_path();
        for &p in &self.points {
            pen.add_point(p);
        }
        pen.end_path();
    }
}

/// Outline contours produced by vectorizing one skeleton contour.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Shape {
    contours: Vec<Contour>,
}

impl Shape {
    pub fn new(contours: Vec<Contour>) -> Self {
        Shape { contours }
    }

    pub fn empty() -> Self {
        Shape::default()
    }

    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    pub fn into_contours(self) -> Vec<Contour> {
        self.contours
    }

    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    pub fn draw<P: PointPen + ?Sized>(&self, pen: &mut P) {
        for contour in &self.contours {
            contour.draw(pen);
        }
    }
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Box around every point, control points included.
    pub fn of(points: &[Point]) -> Option<Bounds> {
        let (first, rest) = points.split_first()?;
        let start = Bounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        Some(rest.iter().fold(start, |b, p| Bounds {
            min_x: b.min_x.min(p.x),
            min_y: b.min_y.min(p.y),
            max_x: b.max_x.max(p.x),
            max_y: b.max_y.max(p.y),
        }))
    }

    pub fn union(self, other: Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// A named set of contours.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Glyph {
    pub name: String,
    pub contours: Vec<Contour>,
}

impl Glyph {
    pub fn new(name: impl Into<String>, contours: Vec<Contour>) -> Self {
        Glyph {
            name: name.into(),
            contours,
        }
    }

    /// Outline every contour and collect the results in input order.
    ///
    /// Stops at the first contour that fails.
    pub fn vectorize(&self, style: &StrokeStyle) -> Result<Glyph, StrokeError> {
        crate::log::debug!(glyph = %self.name, contours = self.contours.len(), "vectorize glyph");
        let mut contours = Vec::new();
        for contour in &self.contours {
            contours.extend(vectorize(contour, style)?.into_contours());
        }
        Ok(Glyph::new(self.name.clone(), contours))
    }

    fn map(&self, f: impl Fn(&Contour) -> Contour) -> Self {
        Glyph {
            name: self.name.clone(),
            contours: self.contours.iter().map(f).collect(),
        }
    }

    pub fn scale(&self, k: f64) -> Self {
        self.map(|c| c.scale(k))
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        self.map(|c| c.translate(dx, dy))
    }

    pub fn oblique(&self, degrees: f64, baseline: f64) -> Self {
        self.map(|c| c.oblique(degrees, baseline))
    }

    pub fn to_font_coords(&self, new_zero: f64) -> Self {
        self.map(|c| c.to_font_coords(new_zero))
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.contours
            .iter()
            .filter_map(Contour::bounds)
            .reduce(Bounds::union)
    }

    pub fn draw<P: PointPen + ?Sized>(&self, pen: &mut P) {
        for contour in &self.contours {
            contour.draw(pen);
        }
    }
}
