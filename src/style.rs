//! Stroke style: width plus join and cap policies.

use crate::errors::ConfigError;
use crate::stroke::defaults;
use crate::stroke::{LineCap, LineJoin};
use crate::types::try_positive;

/// How a skeleton is stroked.
///
/// The width is the full stroke width; rails sit `width / 2` away from the
/// path. Construct through [`StrokeStyle::new`] or the `with_*` builders so
/// the width is always positive and finite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    width: f64,
    join: LineJoin,
    cap: LineCap,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        StrokeStyle {
            width: defaults::WIDTH,
            join: defaults::JOIN,
            cap: defaults::CAP,
        }
    }
}

impl StrokeStyle {
    pub fn new(width: f64, join: LineJoin, cap: LineCap) -> Result<Self, ConfigError> {
        Ok(StrokeStyle {
            width: validate_width(width)?,
            join,
            cap,
        })
    }

    /// Style from policy names, e.g. `"round"` and `"butt"`.
    pub fn from_names(width: f64, join: &str, cap: &str) -> Result<Self, ConfigError> {
        Self::new(width, join.parse()?, cap.parse()?)
    }

    pub fn with_width(self, width: f64) -> Result<Self, ConfigError> {
        Ok(StrokeStyle {
            width: validate_width(width)?,
            ..self
        })
    }

    pub fn with_join(self, join: LineJoin) -> Self {
        StrokeStyle { join, ..self }
    }

    pub fn with_cap(self, cap: LineCap) -> Self {
        StrokeStyle { cap, ..self }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Distance from the path to each rail.
    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    pub fn join(&self) -> LineJoin {
        self.join
    }

    pub fn cap(&self) -> LineCap {
        self.cap
    }
}

fn validate_width(width: f64) -> Result<f64, ConfigError> {
    try_positive(width).map_err(|reason| ConfigError::InvalidWidth { value: width, reason })
}
