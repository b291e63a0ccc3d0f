//! Contour vectorizer.
//!
//! Walks a path once, asking the cap engine for the ends of open paths and
//! the join engine for every other point. Outer rail points are appended in
//! path order. Inner rail points come back per corner and are kept as groups
//! so the inner contour can be reversed once, when the run is finished.
//!
//! # Stages
//!
//! - **AwaitingPath**: nothing emitted yet
//! - **BuildingOuter**: caps and joins are being collected
//! - **BuildingInner**: the inner groups are reversed and the output
//!   contours are assembled
//! - **Done**: the shape has been handed out

use crate::contour::{Contour, Shape};
use crate::errors::{ConfigError, GeometryError, StrokeError};
use crate::style::StrokeStyle;
use crate::types::{NumericError, Point};

use super::cap::{CapFrame, CapStyle, LineCap};
use super::join::{Corner, JoinStyle, LineJoin, Side};
use super::segment::Segment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    AwaitingPath,
    BuildingOuter,
    BuildingInner,
    Done,
}

/// Collects the offset geometry of one contour.
#[derive(Debug)]
struct OutlineBuilder {
    offset: f64,
    join: LineJoin,
    cap: LineCap,
    outer: Vec<Point>,
    /// Inner emissions, one group per corner, in path order.
    inner: Vec<Vec<Point>>,
    stage: Stage,
}

impl OutlineBuilder {
    fn new(style: &StrokeStyle) -> Self {
        Self {
            offset: style.half_width(),
            join: style.join(),
            cap: style.cap(),
            outer: Vec::new(),
            inner: Vec::new(),
            stage: Stage::AwaitingPath,
        }
    }

    fn advance(&mut self, stage: Stage) {
        if self.stage != stage {
            crate::log::trace!(from = ?self.stage, to = ?stage, "vectorizer stage");
            self.stage = stage;
        }
    }

    /// Cap at `end`; used for both ends of an open path.
    fn cap(&mut self, end: Point, toward: Point) -> Result<(), NumericError> {
        self.advance(Stage::BuildingOuter);
        let frame = CapFrame::new(end, toward, self.offset)?;
        self.outer.extend(self.cap.cap(&frame));
        Ok(())
    }

    fn corner(&mut self, corner: Corner) -> Result<(), NumericError> {
        self.advance(Stage::BuildingOuter);
        let outer = self.join.join(&corner, Side::Outer, self.offset)?;
        let inner = self.join.join(&corner, Side::Inner, self.offset)?;
        self.outer.extend(outer);
        self.inner.push(inner);
        Ok(())
    }

    fn finish(mut self, closed: bool) -> Shape {
        self.advance(Stage::BuildingInner);
        let inner: Vec<Point> = std::mem::take(&mut self.inner)
            .into_iter()
            .rev()
            .flatten()
            .collect();
        let mut outer = std::mem::take(&mut self.outer);

        let contours = if closed {
            vec![
                Contour::from_points(outer, true),
                Contour::from_points(inner, true),
            ]
        } else {
            outer.extend(inner);
            vec![Contour::from_points(outer, true)]
        };
        self.advance(Stage::Done);
        Shape::new(contours)
    }
}

/// Offset `contour` into the outline of a stroke drawn with `style`.
///
/// - one point: the cap's dot shape (nothing for a butt cap)
/// - open path: one contour, outer rail then inner rail reversed
/// - closed path: outer and inner contours; the path is first made
///   clockwise so the outer contour is the outside
///
/// # Errors
///
/// [`ConfigError::EmptyPath`] for an empty contour and
/// [`GeometryError::DegenerateSegment`] when two consecutive points
/// coincide, and [`GeometryError::UnmeasurableSegment`] when a segment's
/// length is not a finite number.
pub fn vectorize(contour: &Contour, style: &StrokeStyle) -> Result<Shape, StrokeError> {
    let points = contour.points();
    let closed = contour.is_closed();

    crate::log::debug!(points = points.len(), closed, join = %style.join(), cap = %style.cap(), "vectorize contour");

    match points {
        [] => return Err(ConfigError::EmptyPath.into()),
        [dot] => {
            let outline = style.cap().dot(*dot, style.half_width());
            if outline.is_empty() {
                crate::log::debug!(x = dot.x, y = dot.y, "single point with butt cap has no outline");
                return Ok(Shape::empty());
            }
            return Ok(Shape::new(vec![Contour::from_points(outline, true)]));
        }
        _ => {}
    }

    check_segments(points, closed)?;

    let len = points.len();
    let flipped = closed && contour.signed_area() > 0.0;
    let clockwise;
    let points = if flipped {
        clockwise = contour.reversed();
        clockwise.points()
    } else {
        points
    };
    // Index in the caller's contour of a point of `points`
    let source = |i: usize| if flipped { len - 1 - i } else { i };

    let mut builder = OutlineBuilder::new(style);
    for i in 0..len {
        let prev = (i + len - 1) % len;
        let next = (i + 1) % len;
        let (step, segments) = if !closed && i == 0 {
            (builder.cap(points[0], points[1]), vec![(0, 1)])
        } else if !closed && i == len - 1 {
            (builder.cap(points[i], points[prev]), vec![(prev, i)])
        } else {
            let corner = Corner::new(points[prev], points[i], points[next]);
            (builder.corner(corner), vec![(prev, i), (i, next)])
        };
        step.map_err(|err| {
            let (a, b, reason) = segments
                .iter()
                .find_map(|&(a, b)| Segment::new(points[a], points[b]).unit().err().map(|e| (a, b, e)))
                .unwrap_or((segments[0].0, segments[0].1, err));
            // Reversal swaps the direction of every segment
            let (index, next) = if flipped { (source(b), source(a)) } else { (a, b) };
            segment_error(contour.points(), index, next, reason)
        })?;
    }

    Ok(builder.finish(closed))
}

/// Why the segment `index -> next` of `points` could not be offset.
fn segment_error(points: &[Point], index: usize, next: usize, reason: NumericError) -> GeometryError {
    match reason {
        NumericError::Zero => degenerate(points, index, next),
        reason => GeometryError::UnmeasurableSegment { index, next, reason },
    }
}

/// Reject coincident consecutive points before any geometry runs.
fn check_segments(points: &[Point], closed: bool) -> Result<(), GeometryError> {
    let len = points.len();
    let pairs = if closed { len } else { len - 1 };
    for i in 0..pairs {
        let next = (i + 1) % len;
        if points[i].same_position(points[next]) {
            return Err(degenerate(points, i, next));
        }
    }
    Ok(())
}

fn degenerate(points: &[Point], index: usize, next: usize) -> GeometryError {
    GeometryError::DegenerateSegment {
        index,
        next,
        x: points[index].x,
        y: points[index].y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::cap::{Butt, Sharp, Square};
    use crate::stroke::join::{Bevel, Miter, Round};
    use crate::types::Marker;

    const EPSILON: f64 = 1e-9;

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn style(width: f64, join: impl Into<LineJoin>, cap: impl Into<LineCap>) -> StrokeStyle {
        StrokeStyle::new(width, join.into(), cap.into()).unwrap()
    }

    fn contains(points: &[Point], x: f64, y: f64) -> bool {
        points
            .iter()
            .any(|p| (p.x - x).abs() < EPSILON && (p.y - y).abs() < EPSILON)
    }

    fn square(closed: bool) -> Contour {
        let points = vec![pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 10.0), pt(0.0, 10.0)];
        if closed {
            Contour::closed(points)
        } else {
            Contour::open(points)
        }
    }

    #[test]
    fn closed_square_miter_reaches_offset_corners() {
        let shape = vectorize(&square(true), &style(2.0, Miter::UNLIMITED, Butt)).unwrap();
        assert_eq!(shape.contours().len(), 2);

        let outer = shape.contours()[0].points();
        assert_eq!(outer.len(), 4);
        for (x, y) in [(-1.0, -1.0), (11.0, -1.0), (11.0, 11.0), (-1.0, 11.0)] {
            assert!(contains(outer, x, y), "missing ({x}, {y}) in {outer:?}");
        }

        let inner = shape.contours()[1].points();
        assert_eq!(inner.len(), 4);
        for (x, y) in [(1.0, 1.0), (9.0, 1.0), (9.0, 9.0), (1.0, 9.0)] {
            assert!(contains(inner, x, y), "missing ({x}, {y}) in {inner:?}");
        }
    }

    #[test]
    fn closed_square_bevel_cuts_outer_corners() {
        let shape = vectorize(&square(true), &style(2.0, Bevel, Butt)).unwrap();
        let outer = shape.contours()[0].points();
        // Two facet points per convex corner, all on the rails
        assert_eq!(outer.len(), 8);
        for (x, y) in [(-1.0, 0.0), (0.0, -1.0), (11.0, 0.0), (10.0, 11.0)] {
            assert!(contains(outer, x, y), "missing ({x}, {y}) in {outer:?}");
        }
        // The inner rails meet cleanly at every corner
        assert_eq!(shape.contours()[1].points().len(), 4);
    }

    #[test]
    fn closed_outer_is_clockwise_and_inner_counter_clockwise() {
        for input in [square(true), square(true).reversed()] {
            let shape = vectorize(&input, &style(2.0, Round, Butt)).unwrap();
            assert!(shape.contours()[0].signed_area() < 0.0);
            assert!(shape.contours()[1].signed_area() > 0.0);
        }
    }

    #[test]
    fn open_segment_butt_is_a_rectangle() {
        let line = Contour::open(vec![pt(0.0, 0.0), pt(10.0, 0.0)]);
        let shape = vectorize(&line, &style(2.0, Bevel, Butt)).unwrap();
        assert_eq!(shape.contours().len(), 1);

        let points = shape.contours()[0].points();
        assert_eq!(points.len(), 4);
        let expected = [(0.0, -1.0), (0.0, 1.0), (10.0, 1.0), (10.0, -1.0)];
        for (p, (x, y)) in points.iter().zip(expected) {
            assert!((p.x - x).abs() < EPSILON && (p.y - y).abs() < EPSILON, "{p} != ({x}, {y})");
        }
    }

    #[test]
    fn open_path_merges_outer_and_reversed_inner() {
        // An L: (0,0) -> (10,0) -> (10,10)
        let path = Contour::open(vec![pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 10.0)]);
        let shape = vectorize(&path, &style(2.0, Miter::UNLIMITED, Butt)).unwrap();
        assert_eq!(shape.contours().len(), 1);

        let points = shape.contours()[0].points();
        let expected = [
            (0.0, -1.0),  // start cap, right rail
            (0.0, 1.0),   // start cap, left rail
            (9.0, 1.0),   // corner, left rail
            (9.0, 10.0),  // end cap
            (11.0, 10.0), // end cap
            (11.0, -1.0), // corner, right rail
        ];
        assert_eq!(points.len(), expected.len(), "{points:?}");
        for (p, (x, y)) in points.iter().zip(expected) {
            assert!((p.x - x).abs() < EPSILON && (p.y - y).abs() < EPSILON, "{p} != ({x}, {y})");
        }
    }

    #[test]
    fn inner_groups_are_reversed_but_kept_intact() {
        // Zigzag so that the inner side bevels at the first corner
        let path = Contour::open(vec![
            pt(0.0, 0.0),
            pt(10.0, 0.0),
            pt(10.0, 10.0),
            pt(20.0, 10.0),
        ]);
        let shape = vectorize(&path, &style(2.0, Bevel, Butt)).unwrap();
        let points = shape.contours()[0].points();
        // start cap 2 + corner1 outer 1 + corner2 outer 2 + end cap 2
        // + corner2 inner 1 + corner1 inner 2
        assert_eq!(points.len(), 10, "{points:?}");
        // Corner 1 inner facet comes last, in rail order
        assert!(contains(&points[8..], 10.0, -1.0));
        assert!(contains(&points[8..], 11.0, 0.0));
        let tail = &points[8..];
        assert!((tail[0].x - 11.0).abs() < EPSILON && tail[0].y.abs() < EPSILON);
    }

    #[test]
    fn round_join_emits_cubic_on_convex_corners() {
        let shape = vectorize(&square(true), &style(2.0, Round, Butt)).unwrap();
        let outer = shape.contours()[0].points();
        assert_eq!(outer.len(), 16);
        let curves = outer.iter().filter(|p| p.marker == Marker::Curve).count();
        assert_eq!(curves, 4);
    }

    #[test]
    fn closed_two_point_path_gives_two_contours() {
        let path = Contour::closed(vec![pt(0.0, 0.0), pt(10.0, 0.0)]);
        for join in LineJoin::all() {
            let shape = vectorize(&path, &style(2.0, join, Butt)).unwrap();
            assert_eq!(shape.contours().len(), 2, "{join}");
        }
    }

    #[test]
    fn single_point_sharp() {
        let dot = Contour::open(vec![pt(5.0, 5.0)]);
        let shape = vectorize(&dot, &style(4.0, Bevel, Sharp)).unwrap();
        assert_eq!(shape.contours().len(), 1);
        let points = shape.contours()[0].points();
        let expected = [(5.0, 3.0), (3.0, 5.0), (5.0, 7.0), (7.0, 5.0)];
        assert_eq!(points.len(), 4);
        for (p, (x, y)) in points.iter().zip(expected) {
            assert!((p.x - x).abs() < EPSILON && (p.y - y).abs() < EPSILON, "{p} != ({x}, {y})");
        }
    }

    #[test]
    fn single_point_square_and_butt() {
        let dot = Contour::open(vec![pt(5.0, 5.0)]);
        let shape = vectorize(&dot, &style(4.0, Bevel, Square)).unwrap();
        let points = shape.contours()[0].points();
        assert_eq!(points.len(), 4);
        let xs: Vec<f64> = points.iter().map(|p| (p.x - 5.0).abs()).collect();
        let ys: Vec<f64> = points.iter().map(|p| (p.y - 5.0).abs()).collect();
        assert!(xs.iter().chain(ys.iter()).all(|d| (d - 2.0).abs() < EPSILON));

        let shape = vectorize(&dot, &style(4.0, Bevel, Butt)).unwrap();
        assert!(shape.is_empty());
    }

    #[test]
    fn empty_path_is_a_config_error() {
        let empty = Contour::open(Vec::new());
        assert_eq!(
            vectorize(&empty, &StrokeStyle::default()),
            Err(StrokeError::Config(ConfigError::EmptyPath))
        );
    }

    #[test]
    fn coincident_points_are_reported() {
        let path = Contour::open(vec![pt(0.0, 0.0), pt(3.0, 4.0), pt(3.0, 4.0), pt(8.0, 4.0)]);
        let err = vectorize(&path, &StrokeStyle::default()).unwrap_err();
        assert_eq!(
            err,
            StrokeError::Geometry(GeometryError::DegenerateSegment {
                index: 1,
                next: 2,
                x: 3.0,
                y: 4.0
            })
        );
    }

    #[test]
    fn closing_pair_is_checked_for_closed_paths() {
        let path = Contour::closed(vec![pt(0.0, 0.0), pt(5.0, 0.0), pt(5.0, 5.0), pt(0.0, 0.0)]);
        let err = vectorize(&path, &StrokeStyle::default()).unwrap_err();
        assert!(matches!(
            err,
            StrokeError::Geometry(GeometryError::DegenerateSegment { index: 3, next: 0, .. })
        ));
    }

    #[test]
    fn non_finite_segment_names_its_points() {
        let path = Contour::open(vec![pt(0.0, 0.0), pt(1.0, 0.0), pt(f64::INFINITY, 0.0)]);
        let err = vectorize(&path, &StrokeStyle::default()).unwrap_err();
        assert_eq!(
            err,
            StrokeError::Geometry(GeometryError::UnmeasurableSegment {
                index: 1,
                next: 2,
                reason: NumericError::Infinite
            })
        );
    }

    #[test]
    fn huge_but_finite_coordinates_are_stroked() {
        let path = Contour::open(vec![pt(0.0, 0.0), pt(1e200, 1e200)]);
        let shape = vectorize(&path, &style(2.0, Miter::UNLIMITED, Butt)).unwrap();
        let points = shape.contours()[0].points();
        assert_eq!(points.len(), 4);
        assert!(points.iter().all(|p| p.x.is_finite() && p.y.is_finite()), "{points:?}");
    }

    #[test]
    fn closed_paths_report_indices_of_the_input() {
        // Counter-clockwise, so the vectorizer works on the reversed copy
        let path = Contour::closed(vec![
            pt(0.0, 0.0),
            pt(f64::MAX, 0.0),
            pt(f64::MAX, f64::MAX),
            pt(0.0, 1.0),
        ]);
        let err = vectorize(&path, &StrokeStyle::default()).unwrap_err();
        match err {
            StrokeError::Geometry(GeometryError::UnmeasurableSegment { index, next, .. }) => {
                let points = path.points();
                assert_eq!((index + 1) % points.len(), next);
                let (a, b) = (points[index], points[next]);
                assert!(!(b - a).norm().is_finite(), "{a} -> {b} is measurable");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn diagonal_straight_run_stays_inside_the_pen() {
        let (a, c) = (pt(0.0, 0.0), pt(6.0, 10.0));
        let path = Contour::open(vec![a, pt(3.0, 5.0), c]);
        for join in LineJoin::all() {
            let shape = vectorize(&path, &style(2.0, join, Butt)).unwrap();
            for p in shape.contours()[0].points() {
                let dist = distance_to_segment(*p, a, c);
                assert!(dist < 1.0 + EPSILON, "{join}: {p} is {dist} from the path");
            }
        }
    }

    fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
        let ab = b - a;
        let t = ((p - a).dot(ab) / ab.dot(ab)).clamp(0.0, 1.0);
        p.distance(a + ab.scale(t))
    }

    #[test]
    fn rail_points_keep_their_distance() {
        // Without round joins every outline point lies `offset` from the path
        let (a, b, c) = (pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 10.0));
        let path = Contour::open(vec![a, b, c]);
        let shape = vectorize(&path, &style(3.0, Bevel, Butt)).unwrap();
        for p in shape.contours()[0].points() {
            let nearest = distance_to_segment(*p, a, b).min(distance_to_segment(*p, b, c));
            assert!((nearest - 1.5).abs() < EPSILON, "{p} is {nearest} from the path");
        }
    }
}
