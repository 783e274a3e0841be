//! Core types for highway placement: problems, configuration, errors, results.
//!
//! This crate provides the foundational types for placing shipping highways
//! between ports on a 2D map with landmasses.
//!
//! # Overview
//!
//! - **Problem**: Ports, traffic between them, and coastlines
//!   ([`HighwayProblem`], [`Anchor`], [`Demand`])
//! - **Orders**: Per-port order books that become demands ([`OrderBook`],
//!   [`demands_from_order_books`])
//! - **Costs**: Water, highway and mode-switch coefficients ([`LayerCosts`])
//! - **Configuration**: Placement and swarm settings ([`HighwayConfig`],
//!   [`SwarmConfig`])
//! - **Results**: The best layout with per-demand routes
//!   ([`OptimizationResult`], [`DemandRoute`], [`OptimizationStats`])
//!
//! # Example
//!
//! ```
//! use route_types::{
//!     Anchor, HighwayConfig, HighwayProblem, Order, OrderBook, SwarmConfig,
//!     demands_from_order_books,
//! };
//! use cf_planar::Bounds;
//! use nalgebra::Point2;
//!
//! let books = vec![
//!     OrderBook::new().with_order(Order::new(1, 3)),
//!     OrderBook::new().with_order(Order::new(0, 1)),
//! ];
//!
//! let problem = HighwayProblem::new(Bounds::new(
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1000.0, 700.0),
//! ))
//! .with_anchors([Anchor::at(100.0, 100.0), Anchor::at(900.0, 600.0)])
//! .with_demands(demands_from_order_books(&books));
//!
//! let config = HighwayConfig::default()
//!     .with_waypoint_count(3)
//!     .with_swarm(SwarmConfig::default().with_seed(1));
//!
//! assert!(problem.validate().is_ok());
//! assert!(config.validate().is_ok());
//! // The layout itself is computed by the route-optimize crate
//! ```
//!
//! # Feature Flags
//!
//! - `serde`: Enables serialization/deserialization for all types

#![doc(html_root_url = "https://docs.rs/route-types/0.3.0")]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

pub mod config;
pub mod cost;
pub mod demand;
pub mod error;
pub mod problem;
pub mod route;

// Re-export main types at crate root for convenience
pub use config::{HighwayConfig, SwarmConfig};
pub use cost::LayerCosts;
pub use demand::{Anchor, Demand, Order, OrderBook, demands_from_order_books};
pub use error::RoutingError;
pub use problem::HighwayProblem;
pub use route::{DemandRoute, OptimizationResult, OptimizationStats};

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod integration_tests {
    use super::*;
    use cf_planar::{Bounds, Obstacle};
    use nalgebra::Point2;

    /// Test that all types can be constructed and used together.
    #[test]
    fn test_full_workflow_types() {
        let mut books = vec![OrderBook::new(); 3];
        books[0].push(Order::new(2, 4));
        books[1].push(Order::new(0, 1));
        books[2].push(Order::new(1, 0));

        let demands = demands_from_order_books(&books);
        assert_eq!(demands.len(), 2);

        let problem = HighwayProblem::new(Bounds::new(
            Point2::new(0.0, 0.0),
            Point2::new(500.0, 500.0),
        ))
        .with_anchors([
            Anchor::at(50.0, 50.0),
            Anchor::at(450.0, 50.0),
            Anchor::at(250.0, 450.0),
        ])
        .with_demands(demands)
        .with_obstacle(Obstacle::new(vec![
            Point2::new(200.0, 200.0),
            Point2::new(300.0, 200.0),
            Point2::new(250.0, 300.0),
        ]));
        assert!(problem.validate().is_ok());

        let config = HighwayConfig::default()
            .with_waypoint_count(2)
            .with_radius(400.0)
            .with_layer_costs(LayerCosts::default().with_highway(0.5))
            .with_swarm(SwarmConfig::default().with_particles(8).with_iterations(4));
        assert!(config.validate().is_ok());
        assert_eq!(config.swarm().particles(), 8);
    }

    /// Test error classification.
    #[test]
    fn test_error_types() {
        let error = RoutingError::Cancelled;
        assert!(error.is_cancelled());
        assert!(!error.is_invalid_input());

        let error = RoutingError::invalid_config("negative radius");
        assert!(error.is_invalid_input());
        assert!(error.to_string().contains("negative radius"));

        let error = RoutingError::WorkerDisconnected;
        assert!(error.is_worker_failure());
    }

    /// Validation reports problem errors before config errors are looked at.
    #[test]
    fn test_problem_and_config_validate_independently() {
        let problem = HighwayProblem::new(Bounds::new(
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 10.0),
        ));
        assert!(problem.validate().is_err());
        assert!(HighwayConfig::default().validate().is_ok());
    }
}
