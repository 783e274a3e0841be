//! The highway placement problem.
//!
//! A [`HighwayProblem`] bundles everything the optimizer reads but never
//! changes: the anchors (ports), the demands between them, the obstacles
//! (landmasses), and the axis-aligned box waypoints should stay inside.
//!
//! # Example
//!
//! ```
//! use route_types::{Anchor, Demand, HighwayProblem};
//! use cf_planar::{Bounds, Obstacle};
//! use nalgebra::Point2;
//!
//! let problem = HighwayProblem::new(Bounds::new(
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1000.0, 700.0),
//! ))
//! .with_anchor(Anchor::at(100.0, 350.0))
//! .with_anchor(Anchor::at(900.0, 350.0))
//! .with_demand(Demand::new(0, 1, 2.0))
//! .with_obstacle(Obstacle::new(vec![
//!     Point2::new(450.0, 250.0),
//!     Point2::new(550.0, 250.0),
//!     Point2::new(550.0, 450.0),
//!     Point2::new(450.0, 450.0),
//! ]));
//!
//! assert!(problem.validate().is_ok());
//! assert_eq!(problem.anchor_count(), 2);
//! ```

use cf_planar::{Bounds, Obstacle};
use nalgebra::Point2;

use crate::RoutingError;
use crate::demand::{Anchor, Demand};

/// Inputs of one highway placement run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HighwayProblem {
    anchors: Vec<Anchor>,
    demands: Vec<Demand>,
    #[cfg_attr(feature = "serde", serde(default))]
    obstacles: Vec<Obstacle>,
    bounds: Bounds,
}

impl HighwayProblem {
    /// Creates an empty problem with the given waypoint bounds.
    #[must_use]
    pub const fn new(bounds: Bounds) -> Self {
        Self {
            anchors: Vec::new(),
            demands: Vec::new(),
            obstacles: Vec::new(),
            bounds,
        }
    }

    /// Adds an anchor. Its index is the number of anchors added before it.
    #[must_use]
    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchors.push(anchor);
        self
    }

    /// Appends several anchors.
    #[must_use]
    pub fn with_anchors(mut self, anchors: impl IntoIterator<Item = Anchor>) -> Self {
        self.anchors.extend(anchors);
        self
    }

    /// Adds a demand.
    #[must_use]
    pub fn with_demand(mut self, demand: Demand) -> Self {
        self.demands.push(demand);
        self
    }

    /// Appends several demands.
    #[must_use]
    pub fn with_demands(mut self, demands: impl IntoIterator<Item = Demand>) -> Self {
        self.demands.extend(demands);
        self
    }

    /// Adds an obstacle.
    #[must_use]
    pub fn with_obstacle(mut self, obstacle: Obstacle) -> Self {
        self.obstacles.push(obstacle);
        self
    }

    /// Appends several obstacles.
    #[must_use]
    pub fn with_obstacles(mut self, obstacles: impl IntoIterator<Item = Obstacle>) -> Self {
        self.obstacles.extend(obstacles);
        self
    }

    /// Returns the anchors.
    #[must_use]
    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    /// Returns the number of anchors (P).
    #[must_use]
    pub fn anchor_count(&self) -> usize {
        self.anchors.len()
    }

    /// Returns the anchor positions in index order.
    #[must_use]
    pub fn anchor_positions(&self) -> Vec<Point2<f64>> {
        self.anchors.iter().map(|a| *a.position()).collect()
    }

    /// Returns the demands.
    #[must_use]
    pub fn demands(&self) -> &[Demand] {
        &self.demands
    }

    /// Returns the obstacles.
    #[must_use]
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Returns the waypoint bounds.
    #[must_use]
    pub const fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Checks the problem before any optimization work.
    ///
    /// # Errors
    ///
    /// - [`RoutingError::InvalidConfig`] if the bounds are empty or not finite
    /// - [`RoutingError::InvalidProblem`] if there are no anchors or no
    ///   demands, an anchor is not finite, or a demand weight is not positive
    /// - [`RoutingError::AnchorOutOfRange`] if a demand names a missing anchor
    /// - [`RoutingError::Geometry`] if an obstacle ring is degenerate
    pub fn validate(&self) -> Result<(), RoutingError> {
        self.bounds
            .validate()
            .map_err(|e| RoutingError::invalid_config(e.to_string()))?;

        if self.anchors.is_empty() {
            return Err(RoutingError::invalid_problem(
                "at least one anchor is required",
            ));
        }
        if let Some(index) = self
            .anchors
            .iter()
            .position(|a| !(a.position().x.is_finite() && a.position().y.is_finite()))
        {
            return Err(RoutingError::invalid_problem(format!(
                "anchor {index} has a non-finite coordinate"
            )));
        }

        if self.demands.is_empty() {
            return Err(RoutingError::invalid_problem(
                "at least one demand is required",
            ));
        }
        let anchor_count = self.anchors.len();
        for (index, demand) in self.demands.iter().enumerate() {
            for anchor in [demand.origin(), demand.destination()] {
                if anchor >= anchor_count {
                    return Err(RoutingError::AnchorOutOfRange {
                        demand: index,
                        anchor,
                        anchor_count,
                    });
                }
            }
            if !(demand.weight().is_finite() && demand.weight() > 0.0) {
                return Err(RoutingError::invalid_problem(format!(
                    "demand {index} has weight {}, expected a finite positive value",
                    demand.weight()
                )));
            }
        }

        for obstacle in &self.obstacles {
            obstacle.validate()?;
        }
        Ok(())
    }
}
