//! Error types with rich diagnostics using miette
//!
//! Configuration and geometry errors are raised by the stroke engine; parse
//! errors carry source spans into the skeleton text.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::types::NumericError;

/// Source context for error reporting
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Name of the source (filename or "<input>")
    pub name: String,
    /// The full source text
    pub source: String,
}

impl SourceContext {
    /// Create a new source context
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Create a NamedSource for miette
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.source.clone())
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Errors in the stroke style or the input shape, raised before any geometry
/// runs.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("unknown line join: {name}")]
    #[diagnostic(
        code(pxstroke::config::unknown_join),
        help("expected one of: bevel, miter, round")
    )]
    UnknownJoin { name: String },

    #[error("unknown line cap: {name}")]
    #[diagnostic(
        code(pxstroke::config::unknown_cap),
        help("expected one of: butt, square, round, sharp")
    )]
    UnknownCap { name: String },

    #[error("cannot stroke an empty path")]
    #[diagnostic(code(pxstroke::config::empty_path))]
    EmptyPath,

    #[error("invalid stroke width {value}: {reason}")]
    #[diagnostic(
        code(pxstroke::config::invalid_width),
        help("the stroke width must be a positive, finite number")
    )]
    InvalidWidth { value: f64, reason: NumericError },

    #[error("invalid miter limit {value}: {reason}")]
    #[diagnostic(
        code(pxstroke::config::invalid_miter_limit),
        help("the miter limit is a ratio of the half width and must be positive")
    )]
    InvalidMiterLimit { value: f64, reason: NumericError },
}

// ============================================================================
// Geometry Errors
// ============================================================================

/// Errors raised while offsetting a contour
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("zero-length segment between points {index} and {next} at ({x}, {y})")]
    #[diagnostic(
        code(pxstroke::geometry::degenerate_segment),
        help("remove consecutive duplicate points before stroking")
    )]
    DegenerateSegment {
        index: usize,
        next: usize,
        x: f64,
        y: f64,
    },

    #[error("segment between points {index} and {next} cannot be measured: its length {reason}")]
    #[diagnostic(
        code(pxstroke::geometry::unmeasurable_segment),
        help("coordinates must be finite and small enough for their distance to be finite")
    )]
    UnmeasurableSegment {
        index: usize,
        next: usize,
        reason: NumericError,
    },
}

/// Any error the stroke engine can return for one contour
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum StrokeError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Geometry(#[from] GeometryError),
}

// ============================================================================
// Parse Errors
// ============================================================================

/// Errors that occur while reading skeleton text
#[derive(Error, Diagnostic, Debug)]
pub enum ParseError {
    #[error("syntax error: {message}")]
    #[diagnostic(code(pxstroke::parse::syntax))]
    Syntax {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("invalid number: {text}")]
    #[diagnostic(code(pxstroke::parse::invalid_number))]
    InvalidNumber {
        text: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("not a finite number")]
        span: SourceSpan,
    },

    #[error("unknown style key: {key}")]
    #[diagnostic(
        code(pxstroke::parse::unknown_style_key),
        help("valid keys are width, join, cap and miter-limit")
    )]
    UnknownStyleKey {
        key: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("unknown key")]
        span: SourceSpan,
    },

    #[error("style key given twice: {key}")]
    #[diagnostic(code(pxstroke::parse::duplicate_style_key))]
    DuplicateStyleKey {
        key: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("first set here")]
        first: SourceSpan,
        #[label("set again here")]
        span: SourceSpan,
    },

    #[error("invalid style value")]
    #[diagnostic(code(pxstroke::parse::invalid_style))]
    InvalidStyle {
        #[source]
        #[diagnostic_source]
        cause: ConfigError,
        #[source_code]
        src: NamedSource<String>,
        #[label("{cause}")]
        span: SourceSpan,
    },

    #[error("glyph defined twice: {name}")]
    #[diagnostic(code(pxstroke::parse::duplicate_glyph))]
    DuplicateGlyph {
        name: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("first defined here")]
        first: SourceSpan,
        #[label("defined again here")]
        span: SourceSpan,
    },
}
