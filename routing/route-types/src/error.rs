//! Error types for highway placement.
//!
//! This module defines the [`RoutingError`] enum which represents every way a
//! highway optimization request can fail. Unreachable demands are not errors:
//! they are priced into the fitness as a penalty and never surface here.

use cf_planar::PlanarError;

/// Errors that can occur during highway placement.
///
/// Input errors ([`RoutingError::InvalidConfig`], [`RoutingError::InvalidProblem`],
/// [`RoutingError::AnchorOutOfRange`], [`RoutingError::Geometry`]) are reported
/// before any optimization work begins.
///
/// # Example
///
/// ```
/// use route_types::RoutingError;
///
/// let error = RoutingError::AnchorOutOfRange {
///     demand: 2,
///     anchor: 7,
///     anchor_count: 4,
/// };
///
/// assert!(error.to_string().contains("anchor 7"));
/// assert!(error.is_invalid_input());
/// ```
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RoutingError {
    /// An invalid configuration parameter was provided.
    ///
    /// Covers waypoint count, radius, bounds, penalties, layer costs and
    /// swarm coefficients.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The problem description is unusable (no anchors, no demands,
    /// non-positive demand weights, non-finite anchor coordinates).
    #[error("invalid problem: {0}")]
    InvalidProblem(String),

    /// A demand refers to an anchor index that does not exist.
    #[error("demand {demand} refers to anchor {anchor}, but only {anchor_count} anchors exist")]
    AnchorOutOfRange {
        /// Index of the offending demand.
        demand: usize,
        /// The anchor index it refers to.
        anchor: usize,
        /// Number of anchors in the problem.
        anchor_count: usize,
    },

    /// An obstacle ring is degenerate.
    #[error("invalid geometry: {0}")]
    Geometry(#[from] PlanarError),

    /// The run was cancelled before it started or at an iteration boundary.
    #[error("optimization cancelled")]
    Cancelled,

    /// The background worker panicked; the payload message is captured.
    #[error("optimizer worker panicked: {0}")]
    WorkerPanicked(String),

    /// The background worker went away without delivering a result.
    #[error("optimizer worker disconnected without a result")]
    WorkerDisconnected,
}

impl RoutingError {
    /// Creates an invalid configuration error with the given message.
    ///
    /// # Example
    ///
    /// ```
    /// use route_types::RoutingError;
    ///
    /// let error = RoutingError::invalid_config("radius must be positive");
    /// assert!(error.to_string().contains("radius"));
    /// ```
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Creates an invalid problem error with the given message.
    #[must_use]
    pub fn invalid_problem(message: impl Into<String>) -> Self {
        Self::InvalidProblem(message.into())
    }

    /// Returns `true` if the run was cancelled.
    ///
    /// Cancellation is an outcome the caller asked for, not a failure.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Returns `true` if this error was raised by input validation.
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfig(_)
                | Self::InvalidProblem(_)
                | Self::AnchorOutOfRange { .. }
                | Self::Geometry(_)
        )
    }

    /// Returns `true` if the error was captured from the background worker.
    #[must_use]
    pub const fn is_worker_failure(&self) -> bool {
        matches!(self, Self::WorkerPanicked(_) | Self::WorkerDisconnected)
    }
}
