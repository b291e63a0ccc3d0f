//! Parse skeleton text into a stroke style and glyphs.

use std::collections::HashMap;

use miette::SourceSpan;
use pest::Parser;
use pest::error::InputLocation;
use pest::iterators::Pair;

use crate::contour::{Contour, Glyph};
use crate::errors::{ConfigError, ParseError, SourceContext, StrokeError};
use crate::stroke::LineJoin;
use crate::stroke::join::Miter;
use crate::style::StrokeStyle;
use crate::types::Point;
use crate::{Rule, SkeletonParser};

/// A parsed skeleton document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Skeleton {
    pub style: StrokeStyle,
    pub glyphs: Vec<Glyph>,
}

impl Skeleton {
    pub fn glyph(&self, name: &str) -> Option<&Glyph> {
        self.glyphs.iter().find(|g| g.name == name)
    }

    /// Outline every glyph with the document style.
    pub fn vectorize(&self) -> Result<Vec<Glyph>, StrokeError> {
        self.glyphs.iter().map(|g| g.vectorize(&self.style)).collect()
    }
}

/// Parse skeleton source into a [`Skeleton`].
pub fn parse_skeleton(ctx: &SourceContext) -> Result<Skeleton, ParseError> {
    let reader = Reader { ctx };
    let pairs = SkeletonParser::parse(Rule::file, &ctx.source).map_err(|e| reader.syntax(e))?;

    let mut skeleton = Skeleton::default();
    let mut names: HashMap<String, SourceSpan> = HashMap::new();

    for file in pairs {
        for item in file.into_inner() {
            match item.as_rule() {
                Rule::style => skeleton.style = reader.style(item)?,
                Rule::glyph => {
                    let (glyph, span) = reader.glyph(item)?;
                    if let Some(&first) = names.get(&glyph.name) {
                        return Err(ParseError::DuplicateGlyph {
                            name: glyph.name,
                            src: ctx.named_source(),
                            first,
                            span,
                        });
                    }
                    names.insert(glyph.name.clone(), span);
                    skeleton.glyphs.push(glyph);
                }
                Rule::EOI => {}
                _ => return Err(reader.unexpected(&item)),
            }
        }
    }

    crate::log::debug!(source = %ctx.name, glyphs = skeleton.glyphs.len(), "parsed skeleton");
    Ok(skeleton)
}

fn span_of(pair: &Pair<'_, Rule>) -> SourceSpan {
    let span = pair.as_span();
    (span.start(), span.end() - span.start()).into()
}

/// Turns pest pairs into values, attaching the source to every error.
struct Reader<'a> {
    ctx: &'a SourceContext,
}

impl Reader<'_> {
    fn syntax(&self, err: pest::error::Error<Rule>) -> ParseError {
        let span: SourceSpan = match err.location {
            InputLocation::Pos(pos) => (pos, 0).into(),
            InputLocation::Span((start, end)) => (start, end - start).into(),
        };
        ParseError::Syntax {
            message: err.variant.message().into_owned(),
            src: self.ctx.named_source(),
            span,
        }
    }

    fn unexpected(&self, pair: &Pair<'_, Rule>) -> ParseError {
        ParseError::Syntax {
            message: format!("unexpected {:?}", pair.as_rule()),
            src: self.ctx.named_source(),
            span: span_of(pair),
        }
    }

    fn invalid_style(&self, cause: ConfigError, pair: &Pair<'_, Rule>) -> ParseError {
        ParseError::InvalidStyle {
            cause,
            src: self.ctx.named_source(),
            span: span_of(pair),
        }
    }

    fn number(&self, pair: &Pair<'_, Rule>) -> Result<f64, ParseError> {
        let text = pair.as_str();
        text.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ParseError::InvalidNumber {
                text: text.to_string(),
                src: self.ctx.named_source(),
                span: span_of(pair),
            })
    }

    fn style(&self, pair: Pair<'_, Rule>) -> Result<StrokeStyle, ParseError> {
        let mut style = StrokeStyle::default();
        let mut miter_limit: Option<Miter> = None;
        let mut seen: HashMap<&str, SourceSpan> = HashMap::new();

        for setting in pair.into_inner() {
            let mut parts = setting.clone().into_inner();
            let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
                return Err(self.unexpected(&setting));
            };
            let name = key.as_str();
            let key_span = span_of(&key);

            if let Some(&first) = seen.get(name) {
                return Err(ParseError::DuplicateStyleKey {
                    key: name.to_string(),
                    src: self.ctx.named_source(),
                    first,
                    span: key_span,
                });
            }

            match name {
                "width" => {
                    let width = self.number(&value)?;
                    style = style
                        .with_width(width)
                        .map_err(|cause| self.invalid_style(cause, &value))?;
                }
                "join" => {
                    let join = value
                        .as_str()
                        .parse()
                        .map_err(|cause| self.invalid_style(cause, &value))?;
                    style = style.with_join(join);
                }
                "cap" => {
                    let cap = value
                        .as_str()
                        .parse()
                        .map_err(|cause| self.invalid_style(cause, &value))?;
                    style = style.with_cap(cap);
                }
                "miter-limit" => {
                    let limit = self.number(&value)?;
                    miter_limit =
                        Some(Miter::with_limit(limit).map_err(|cause| self.invalid_style(cause, &value))?);
                }
                _ => {
                    return Err(ParseError::UnknownStyleKey {
                        key: name.to_string(),
                        src: self.ctx.named_source(),
                        span: key_span,
                    });
                }
            }
            seen.insert(name, key_span);
        }

        if let Some(miter) = miter_limit {
            match style.join() {
                LineJoin::Miter(_) => style = style.with_join(miter.into()),
                _ => {
                    crate::log::warn!(join = %style.join(), "miter-limit ignored for non-miter join");
                }
            }
        }
        Ok(style)
    }

    fn glyph(&self, pair: Pair<'_, Rule>) -> Result<(Glyph, SourceSpan), ParseError> {
        let mut name = (String::new(), span_of(&pair));
        let mut contours = Vec::new();

        for part in pair.into_inner() {
            match part.as_rule() {
                Rule::name => {
                    let span = span_of(&part);
                    let text = part.into_inner().next().map(|t| t.as_str()).unwrap_or_default();
                    name = (text.to_string(), span);
                }
                Rule::contour => contours.push(self.contour(part)?),
                _ => return Err(self.unexpected(&part)),
            }
        }

        let (name, span) = name;
        Ok((Glyph::new(name, contours), span))
    }

    fn contour(&self, pair: Pair<'_, Rule>) -> Result<Contour, ParseError> {
        let mut points = Vec::new();
        let mut closed = false;

        for part in pair.into_inner() {
            match part.as_rule() {
                Rule::point => points.push(self.point(part)?),
                Rule::close => closed = true,
                _ => return Err(self.unexpected(&part)),
            }
        }

        Ok(if closed {
            Contour::closed(points)
        } else {
            Contour::open(points)
        })
    }

    fn point(&self, pair: Pair<'_, Rule>) -> Result<Point, ParseError> {
        let mut coords = pair.clone().into_inner();
        let (Some(x), Some(y)) = (coords.next(), coords.next()) else {
            return Err(self.unexpected(&pair));
        };
        Ok(Point::new(self.number(&x)?, self.number(&y)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::LineCap;
    use crate::stroke::cap::{Round, Square};
    use crate::types::Marker;

    fn parse(source: &str) -> Result<Skeleton, ParseError> {
        parse_skeleton(&SourceContext::new("test.skel", source))
    }

    const SAMPLE: &str = r#"
# Two glyphs
style width=2 join=round cap=square
glyph "A" {
    0,0 0,6 4,6 4,0;   # legs and top
    0,3 4,3;
}
glyph "o" {
    0,0 4,0 4,4 0,4 Z;
}
"#;

    #[test]
    fn parse_sample() {
        let skeleton = parse(SAMPLE).unwrap();
        assert_eq!(skeleton.style.width(), 2.0);
        assert_eq!(skeleton.style.join(), LineJoin::Round(crate::stroke::join::Round));
        assert_eq!(skeleton.style.cap(), LineCap::Square(Square));

        assert_eq!(skeleton.glyphs.len(), 2);
        let a = skeleton.glyph("A").unwrap();
        assert_eq!(a.contours.len(), 2);
        assert_eq!(a.contours[0].len(), 4);
        assert!(!a.contours[0].is_closed());
        assert_eq!(a.contours[0].points()[0], Point::with_marker(0.0, 0.0, Marker::Move));

        let o = skeleton.glyph("o").unwrap();
        assert!(o.contours[0].is_closed());
        assert_eq!(o.contours[0].points()[2], Point::new(4.0, 4.0));
    }

    #[test]
    fn style_line_is_optional() {
        let skeleton = parse("glyph \"dot\" { 1.5,-2 ; }").unwrap();
        assert_eq!(skeleton.style, StrokeStyle::default());
        assert_eq!(skeleton.glyphs[0].contours[0].points()[0].x, 1.5);
        assert_eq!(skeleton.glyphs[0].contours[0].points()[0].y, -2.0);
    }

    #[test]
    fn empty_document() {
        let skeleton = parse("# nothing here\n").unwrap();
        assert!(skeleton.glyphs.is_empty());
    }

    #[test]
    fn vectorize_whole_document() {
        let outlines = parse(SAMPLE).unwrap().vectorize().unwrap();
        assert_eq!(outlines.len(), 2);
        assert_eq!(outlines[0].contours.len(), 2);
        assert_eq!(outlines[1].contours.len(), 2);
    }

    #[test]
    fn miter_limit_is_applied() {
        let skeleton = parse("style miter-limit=4").unwrap();
        match skeleton.style.join() {
            LineJoin::Miter(m) => assert_eq!(m.limit(), Some(4.0)),
            other => panic!("unexpected join {other}"),
        }
    }

    #[test]
    fn miter_limit_is_ignored_for_other_joins() {
        let skeleton = parse("style miter-limit=4 join=round cap=round").unwrap();
        assert_eq!(skeleton.style.join(), LineJoin::Round(crate::stroke::join::Round));
        assert_eq!(skeleton.style.cap(), LineCap::Round(Round));
    }

    #[test]
    fn unknown_join_points_at_the_name() {
        let err = parse("style join=pointy\nglyph \"a\" { 0,0 1,0; }").unwrap_err();
        match err {
            ParseError::InvalidStyle { cause, span, .. } => {
                assert_eq!(cause, ConfigError::UnknownJoin { name: "pointy".to_string() });
                assert_eq!(span, SourceSpan::from((11, 6)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn invalid_width_is_a_style_error() {
        let err = parse("style width=0").unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidStyle { cause: ConfigError::InvalidWidth { .. }, .. }
        ));
    }

    #[test]
    fn non_numeric_width() {
        let err = parse("style width=wide").unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { ref text, .. } if text == "wide"));
    }

    #[test]
    fn overflowing_coordinate() {
        let err = parse("glyph \"x\" { 1e999,0; }").unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { ref text, .. } if text == "1e999"));
    }

    #[test]
    fn unknown_style_key() {
        let err = parse("style colour=red").unwrap_err();
        match err {
            ParseError::UnknownStyleKey { key, span, .. } => {
                assert_eq!(key, "colour");
                assert_eq!(span, SourceSpan::from((6, 6)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn duplicate_style_key() {
        let err = parse("style cap=butt cap=round").unwrap_err();
        match err {
            ParseError::DuplicateStyleKey { key, first, span, .. } => {
                assert_eq!(key, "cap");
                assert_eq!(first, SourceSpan::from((6, 3)));
                assert_eq!(span, SourceSpan::from((15, 3)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn duplicate_glyph() {
        let err = parse("glyph \"a\" { 0,0; }\nglyph \"a\" { 1,1; }").unwrap_err();
        assert!(matches!(err, ParseError::DuplicateGlyph { ref name, .. } if name == "a"));
    }

    #[test]
    fn missing_semicolon_is_a_syntax_error() {
        let err = parse("glyph \"a\" { 0,0 1,0 }").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
    }

    #[test]
    fn style_after_glyph_is_a_syntax_error() {
        let err = parse("glyph \"a\" { 0,0; }\nstyle width=2").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
    }
}
