//! Stroke-to-outline vectorization for pixel-traced glyph skeletons.
//!
//! A skeleton contour is the centerline of a stroke. [`vectorize`] offsets
//! it by half the stroke width on both sides, resolves every corner with a
//! join policy and every open end with a cap policy, and returns the
//! outline a pen of that width would paint.
//!
//! ```
//! use pxstroke::{Contour, Point, StrokeStyle, vectorize};
//!
//! let line = Contour::open(vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
//! let style = StrokeStyle::from_names(2.0, "bevel", "butt").unwrap();
//! let shape = vectorize(&line, &style).unwrap();
//! assert_eq!(shape.contours()[0].len(), 4);
//! ```

use pest_derive::Parser;

pub mod contour;
pub mod errors;
pub mod log;
pub mod parse;
pub mod pen;
pub mod stroke;
pub mod style;
pub mod svg;
pub mod types;

pub use contour::{Bounds, Contour, Glyph, Shape};
pub use errors::{ConfigError, GeometryError, ParseError, SourceContext, StrokeError};
pub use parse::{Skeleton, parse_skeleton};
pub use pen::{PointPen, RecordingPen, StrokePen};
pub use stroke::{LineCap, LineJoin, vectorize};
pub use style::StrokeStyle;
pub use crate::svg::SvgPathPen;
pub use types::{Marker, Point, Vector};

#[derive(Parser)]
#[grammar = "skeleton.pest"]
pub struct SkeletonParser;

/// Default gap between glyphs laid out in one document.
const GLYPH_SPACING: f64 = 1.0;

/// Stroke every glyph of a skeleton document and render them side by side
/// as SVG.
///
/// `name` is used in diagnostics (usually the file name).
pub fn stroke_skeleton(name: &str, source: &str) -> miette::Result<String> {
    let ctx = SourceContext::new(name, source);
    let skeleton = parse_skeleton(&ctx)?;
    let outlines = skeleton.vectorize()?;
    Ok(crate::svg::render_glyphs(&outlines, GLYPH_SPACING, skeleton.style.half_width()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pest::Parser;

    #[test]
    fn parse_simple_glyph() {
        let input = r#"glyph "l" { 0,0 0,6; }"#;
        let result = SkeletonParser::parse(Rule::file, input);
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn parse_closed_contour() {
        let input = "0,0 4,0 4,4 Z;";
        let result = SkeletonParser::parse(Rule::contour, input);
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn parse_signed_decimal_point() {
        let input = "-1.5,+.25";
        let result = SkeletonParser::parse(Rule::point, input);
        assert!(result.is_ok(), "Failed to parse point: {:?}", result.err());
    }

    #[test]
    fn point_has_no_inner_whitespace() {
        let result = SkeletonParser::parse(Rule::point, "1, 2");
        assert!(result.is_err());
    }

    #[test]
    fn parse_style_line() {
        let input = "style width=2.5 join=miter miter-limit=4";
        let result = SkeletonParser::parse(Rule::style, input);
        assert!(result.is_ok(), "Failed to parse style: {:?}", result.err());
    }

    #[test]
    fn parse_comments_everywhere() {
        let input = "# header\nglyph \"i\" { # body\n  0,0 0,4; # stem\n  0,6;\n}\n";
        let result = SkeletonParser::parse(Rule::file, input);
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn stroke_skeleton_renders_svg() {
        let svg = stroke_skeleton(
            "inline.skel",
            "style width=2 join=miter cap=butt\nglyph \"-\" { 0,0 10,0; }",
        )
        .unwrap();
        assert!(svg.contains(r#"<path d="M0,-1 L0,1 L10,1 L10,-1 z" data-name="-"/>"#), "{svg}");
        assert!(svg.contains(r#"viewBox="-1 -2 12 4""#), "{svg}");
    }

    #[test]
    fn stroke_skeleton_reports_parse_errors() {
        let err = stroke_skeleton("bad.skel", "style join=pointy").unwrap_err();
        assert!(err.to_string().contains("invalid style value"), "{err}");
    }

    #[test]
    fn stroke_skeleton_reports_geometry_errors() {
        let err = stroke_skeleton("dup.skel", "glyph \"x\" { 1,1 1,1; }").unwrap_err();
        assert!(err.to_string().contains("zero-length segment"), "{err}");
    }
}
