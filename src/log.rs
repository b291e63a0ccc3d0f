//! Log macros for the crate.
//!
//! Built with the `tracing` feature, `debug!`, `trace!` and `warn!` are the
//! `tracing` macros themselves. Built without it they discard their
//! arguments, so call sites stay in statement position and must not rely on
//! a logged binding being used.

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace, warn};

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub use crate::{debug, trace, warn};
