//! Point-pen protocol.
//!
//! A contour is streamed as `begin_path`, one `add_point` per point, then
//! `end_path`. Whether the contour is open is carried by the markers: an
//! open contour starts with a `move` point.

use crate::contour::Contour;
use crate::errors::StrokeError;
use crate::stroke::vectorize;
use crate::style::StrokeStyle;
use crate::types::{Marker, Point};

/// Consumer of streamed contours.
pub trait PointPen {
    fn begin_path(&mut self);
    fn add_point(&mut self, point: Point);
    fn end_path(&mut self);
}

impl<P: PointPen + ?Sized> PointPen for &mut P {
    fn begin_path(&mut self) {
        (**self).begin_path();
    }

    fn add_point(&mut self, point: Point) {
        (**self).add_point(point);
    }

    fn end_path(&mut self) {
        (**self).end_path();
    }
}

/// Collects streamed points back into contours.
#[derive(Debug, Default)]
pub struct RecordingPen {
    contours: Vec<Contour>,
    current: Option<Vec<Point>>,
}

impl RecordingPen {
    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    pub fn into_contours(self) -> Vec<Contour> {
        self.contours
    }
}

/// Finish a streamed path: open when the first point is a `move`.
fn finish_path(points: Vec<Point>) -> Contour {
    let open = points.first().is_some_and(|p| p.marker == Marker::Move);
    Contour::from_points(points, !open)
}

impl PointPen for RecordingPen {
    fn begin_path(&mut self) {
        if self.current.is_some() {
            crate::log::warn!("begin_path while a path is open; dropping it");
        }
        self.current = Some(Vec::new());
    }

    fn add_point(&mut self, point: Point) {
        match &mut self.current {
            Some(points) => points.push(point),
            None => {
                crate::log::warn!(%point, "add_point outside of a path");
            }
        }
    }

    fn end_path(&mut self) {
        if let Some(points) = self.current.take() {
            self.contours.push(finish_path(points));
        }
    }
}

/// Strokes each skeleton path drawn into it and forwards the outline to an
/// inner pen.
///
/// The pen protocol has no error channel, so the first failure is kept and
/// later paths are skipped; [`StrokePen::finish`] reports it.
#[derive(Debug)]
pub struct StrokePen<P> {
    inner: P,
    style: StrokeStyle,
    current: Option<Vec<Point>>,
    error: Option<StrokeError>,
}

impl<P: PointPen> StrokePen<P> {
    pub fn new(inner: P, style: StrokeStyle) -> Self {
        StrokePen {
            inner,
            style,
            current: None,
            error: None,
        }
    }

    /// Hand back the inner pen, or the first stroke error.
    pub fn finish(self) -> Result<P, StrokeError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.inner),
        }
    }
}

impl<P: PointPen> PointPen for StrokePen<P> {
    fn begin_path(&mut self) {
        self.current = Some(Vec::new());
    }

    fn add_point(&mut self, point: Point) {
        if let Some(points) = &mut self.current {
            points.push(point);
        }
    }

    fn end_path(&mut self) {
        let Some(points) = self.current.take() else {
            return;
        };
        if self.error.is_some() {
            return;
        }
        match vectorize(&finish_path(points), &self.style) {
            Ok(shape) => shape.draw(&mut self.inner),
            Err(err) => {
                crate::log::warn!(%err, "stroke failed; skipping remaining paths");
                self.error = Some(err);
            }
        }
    }
}
