//! Stroke-to-outline engine
//!
//! This module is organized into submodules:
//! - `defaults`: Default width, policies and rail rotations
//! - `segment`: Directed segments, offset rails and intersection
//! - `arc`: Cubic approximation of circular arcs
//! - `join`: Corner join policies (bevel, miter, round)
//! - `cap`: End cap policies (butt, square, round, sharp)
//! - `vectorize`: Drives joins and caps along a contour

pub mod arc;
pub mod cap;
pub mod defaults;
pub mod join;
pub mod segment;
pub mod vectorize;

// Re-export commonly used items
pub use cap::{CapFrame, CapStyle, LineCap};
pub use join::{Corner, JoinStyle, LineJoin, Side, Turn};
pub use segment::Segment;
pub use vectorize::vectorize;
