//! Errors reported by the validating entry points of the waiting widgets.
//!
//! Most operations on the indicators are total and never fail. Only the
//! constructors and setters that derive an animation speed from caller input
//! have something to reject, and they report it with [`Error`].

use thiserror::Error;

/// Error type for the waiting widgets.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum Error {
    /// A countdown was requested with a length of zero seconds.
    #[error("countdown duration must be at least one second")]
    ZeroDuration,

    /// A spinner speed that is not a positive, finite number of revolutions per second.
    #[error("spinner speed must be a positive, finite number of revolutions per second (got {0})")]
    InvalidRevolutions(f64),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
