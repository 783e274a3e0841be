//! Error types for planar geometry.

/// Errors that can occur when constructing planar geometry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum PlanarError {
    /// An obstacle ring needs at least three vertices to enclose an area.
    #[error("obstacle ring needs at least 3 vertices, got {0}")]
    DegenerateRing(usize),

    /// A vertex has a NaN or infinite coordinate.
    #[error("vertex {index} has a non-finite coordinate")]
    NonFiniteVertex {
        /// Index of the offending vertex in the ring.
        index: usize,
    },

    /// Bounds whose minimum corner is not strictly below the maximum corner.
    #[error("invalid bounds: min {min:?} must be strictly below max {max:?}")]
    InvalidBounds {
        /// The minimum corner as `[x, y]`.
        min: [f64; 2],
        /// The maximum corner as `[x, y]`.
        max: [f64; 2],
    },
}
