//! SVG output: path data from a point pen, and standalone documents.
//!
//! Path data and documents are built with the `svg` crate. Coordinates are
//! rounded to six significant digits before they are handed over, which
//! also clears the rotation noise left by the offset math.

use ::svg::Document;
use ::svg::node::element::path::{Command, Data, Number, Parameters, Position};
use ::svg::node::element::{Group, Path};

use crate::contour::{Bounds, Glyph};
use crate::pen::PointPen;
use crate::types::{Marker, Point};

const SIGNIFICANT_DIGITS: i32 = 6;

/// Builds SVG path data from streamed contours.
///
/// Off-curve points are buffered until the on-curve point that ends their
/// segment arrives: two give a cubic `C`, one a quadratic `Q`. A closed
/// contour is started at its first on-curve point so trailing control
/// points close the curve back onto it.
///
/// [`SvgPathPen::relative`] writes every segment relative to the previous
/// point, using `h`/`v` for axis-aligned lines. Each contour still starts
/// with an absolute `M`.
#[derive(Debug, Default)]
pub struct SvgPathPen {
    commands: Vec<Command>,
    current: Option<Vec<Point>>,
    relative: bool,
    cursor: Point,
}

#[derive(Clone, Copy)]
enum Op {
    Move,
    Line,
    Cubic,
    Quadratic,
}

impl SvgPathPen {
    pub fn new() -> Self {
        Self::default()
    }

    /// A pen that writes relative path commands.
    pub fn relative() -> Self {
        SvgPathPen { relative: true, ..Self::default() }
    }

    pub fn data(&self) -> Data {
        Data::from(self.commands.clone())
    }

    pub fn into_data(self) -> Data {
        Data::from(self.commands)
    }

    /// The path data as the text of a `d` attribute.
    pub fn d(&self) -> String {
        ::svg::node::Value::from(self.data()).to_string()
    }

    pub fn into_d(self) -> String {
        ::svg::node::Value::from(self.into_data()).to_string()
    }

    fn push(&mut self, op: Op, points: &[Point]) {
        let relative = self.relative && !matches!(op, Op::Move);
        let origin = if relative { self.cursor } else { Point::default() };
        let numbers: Vec<Number> = points
            .iter()
            .flat_map(|p| [round_coord(p.x - origin.x), round_coord(p.y - origin.y)])
            .collect();
        if let Some(&last) = points.last() {
            self.cursor = last;
        }

        let position = if relative { Position::Relative } else { Position::Absolute };
        let command = match op {
            Op::Line if relative && numbers[0] == 0.0 => {
                Command::VerticalLine(position, Parameters::from(vec![numbers[1]]))
            }
            Op::Line if relative && numbers[1] == 0.0 => {
                Command::HorizontalLine(position, Parameters::from(vec![numbers[0]]))
            }
            Op::Move => Command::Move(position, Parameters::from(numbers)),
            Op::Line => Command::Line(position, Parameters::from(numbers)),
            Op::Cubic => Command::CubicCurve(position, Parameters::from(numbers)),
            Op::Quadratic => Command::QuadraticCurve(position, Parameters::from(numbers)),
        };
        self.commands.push(command);
    }

    /// Segment ending at `end`, after the buffered `controls`.
    fn segment(&mut self, controls: &[Point], end: Point) {
        match (end.marker, controls) {
            (Marker::Curve, [c1, c2]) => self.push(Op::Cubic, &[*c1, *c2, end]),
            (Marker::Curve, [c]) => self.push(Op::Quadratic, &[*c, end]),
            (_, []) => self.push(Op::Line, &[end]),
            _ => {
                crate::log::warn!(%end, controls = controls.len(), "unsupported control points; drawing a line");
                self.push(Op::Line, &[end]);
            }
        }
    }

    fn contour(&mut self, points: &[Point]) {
        let Some(start) = points.iter().position(|p| p.marker.is_on_curve()) else {
            crate::log::warn!(points = points.len(), "contour without on-curve points skipped");
            return;
        };
        let closed = points[start].marker != Marker::Move;
        let ordered: Vec<Point> = if closed {
            points[start..].iter().chain(&points[..start]).copied().collect()
        } else {
            points[start..].to_vec()
        };

        self.push(Op::Move, &[ordered[0]]);
        let mut controls = Vec::new();
        for &p in &ordered[1..] {
            if p.marker.is_on_curve() {
                self.segment(&controls, p);
                controls.clear();
            } else {
                controls.push(p);
            }
        }

        if closed {
            if !controls.is_empty() {
                self.segment(&controls, ordered[0]);
            }
            self.commands.push(Command::Close);
            self.cursor = ordered[0];
        }
    }
}

impl PointPen for SvgPathPen {
    fn begin_path(&mut self) {
        self.current = Some(Vec::new());
    }

    fn add_point(&mut self, point: Point) {
        if let Some(points) = &mut self.current {
            points.push(point);
        }
    }

    fn end_path(&mut self) {
        if let Some(points) = self.current.take() {
            self.contour(&points);
        }
    }
}

/// Path data for every contour of `glyph`.
pub fn glyph_data(glyph: &Glyph) -> Data {
    let mut pen = SvgPathPen::new();
    glyph.draw(&mut pen);
    pen.into_data()
}

/// [`glyph_data`] as the text of a `d` attribute.
pub fn glyph_path(glyph: &Glyph) -> String {
    ::svg::node::Value::from(glyph_data(glyph)).to_string()
}

/// The `viewBox` of a document.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        ViewBox { x, y, width, height }
    }

    /// `bounds` grown by `margin` on every side.
    pub fn around(bounds: Bounds, margin: f64) -> Self {
        ViewBox {
            x: bounds.min_x - margin,
            y: bounds.min_y - margin,
            width: bounds.width() + 2.0 * margin,
            height: bounds.height() + 2.0 * margin,
        }
    }
}

/// A standalone SVG document with one black-filled `<path>` per entry.
///
/// Entries are `(name, data)` pairs; the name lands in a `data-name`
/// attribute.
pub fn document<I, S>(paths: I, view_box: ViewBox) -> Document
where
    I: IntoIterator<Item = (S, Data)>,
    S: Into<String>,
{
    let group = paths
        .into_iter()
        .fold(Group::new().set("fill", "black"), |group, (name, data)| {
            let name: String = name.into();
            group.add(Path::new().set("d", data).set("data-name", name))
        });

    Document::new()
        .set(
            "viewBox",
            (
                round_coord(view_box.x),
                round_coord(view_box.y),
                round_coord(view_box.width),
                round_coord(view_box.height),
            ),
        )
        .add(group)
}

/// Lay glyphs out left to right, `spacing` apart, and render them into one
/// document.
pub fn render_glyphs(glyphs: &[Glyph], spacing: f64, margin: f64) -> String {
    let mut cursor = 0.0;
    let mut placed = Vec::with_capacity(glyphs.len());
    let mut extent: Option<Bounds> = None;

    for glyph in glyphs {
        let Some(bounds) = glyph.bounds() else {
            crate::log::debug!(glyph = %glyph.name, "empty glyph skipped");
            continue;
        };
        let moved = glyph.translate(cursor - bounds.min_x, 0.0);
        cursor += bounds.width() + spacing;
        if let Some(b) = moved.bounds() {
            extent = Some(extent.map_or(b, |e| e.union(b)));
        }
        placed.push((moved.name.clone(), glyph_data(&moved)));
    }

    let view_box = match extent {
        Some(bounds) => ViewBox::around(bounds, margin),
        None => ViewBox::new(0.0, 0.0, 0.0, 0.0),
    };
    document(placed, view_box).to_string()
}

/// `value` rounded to six significant digits, as the path data stores it.
///
/// Magnitudes below `1e-9` are noise from rotating unit vectors and become
/// exactly zero.
pub(crate) fn round_coord(value: f64) -> Number {
    if value.abs() < 1e-9 {
        return 0.0;
    }
    if !value.is_finite() {
        return value as Number;
    }
    let magnitude = value.abs().log10().floor() as i32;
    let scale = 10_f64.powi(SIGNIFICANT_DIGITS - 1 - magnitude);
    ((value * scale).round() / scale) as Number
}
