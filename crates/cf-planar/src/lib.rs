//! Planar obstacle geometry for CortenForge routing.
//!
//! This crate provides the geometric predicates that decide where a route
//! may go in a 2D world made of open water and landmasses:
//!
//! - [`Obstacle`] - A closed polygon ring with cached bounds
//! - [`point_in_obstacle`] / [`point_on_any_land`] - Even-odd containment
//! - [`segment_crosses_obstacle`] / [`segment_crosses_any_obstacle`] -
//!   Visibility between two points
//! - [`Bounds`] - Axis-aligned rectangles for search boxes and rejection tests
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. All functions are
//! pure and hold no state, so they are safe to call from many threads at once.
//!
//! # Boundary Conventions
//!
//! Two tie-breaks keep results stable when points sit exactly on a coastline:
//!
//! - A point on an obstacle edge is **outside** the obstacle.
//! - A segment that only touches an edge or vertex does **not** cross it.
//!
//! # Example
//!
//! ```
//! use cf_planar::{Bounds, Obstacle, point_on_any_land, segment_crosses_any_obstacle};
//! use nalgebra::Point2;
//!
//! let island = Obstacle::new(vec![
//!     Point2::new(400.0, 200.0),
//!     Point2::new(600.0, 200.0),
//!     Point2::new(600.0, 500.0),
//!     Point2::new(400.0, 500.0),
//! ]);
//! let coastlines = vec![island];
//!
//! let west_port = Point2::new(100.0, 350.0);
//! let east_port = Point2::new(900.0, 350.0);
//!
//! // The direct lane runs aground
//! assert!(segment_crosses_any_obstacle(&west_port, &east_port, &coastlines));
//!
//! // A waypoint north of the island sees both ports
//! let waypoint = Point2::new(500.0, 100.0);
//! assert!(!point_on_any_land(&waypoint, &coastlines));
//! assert!(!segment_crosses_any_obstacle(&west_port, &waypoint, &coastlines));
//! assert!(!segment_crosses_any_obstacle(&waypoint, &east_port, &coastlines));
//!
//! let screen = Bounds::new(Point2::new(0.0, 0.0), Point2::new(1000.0, 700.0));
//! assert!(screen.contains(&waypoint));
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod bounds;
mod error;
mod polygon;
mod segment;

pub use bounds::Bounds;
pub use error::PlanarError;
pub use polygon::{Obstacle, point_in_obstacle, point_on_any_land};
pub use segment::{
    EPSILON, orientation, point_on_segment, segment_crosses_any_obstacle,
    segment_crosses_obstacle, segments_cross_properly,
};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Vector2};
