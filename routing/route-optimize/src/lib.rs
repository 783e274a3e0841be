//! Highway waypoint placement by particle swarm optimization.
//!
//! Given a set of anchors (ports), weighted demands between them, land
//! obstacles and a bounding box, this crate searches for the positions of a
//! fixed number of highway waypoints that minimize the total cost of routing
//! every demand over a two-layer water/highway graph.
//!
//! # Overview
//!
//! - **Fitness** ([`fitness`]): scores a waypoint layout with hard penalties,
//!   demand-weighted shortest paths and an optional spread penalty
//! - **Swarm** ([`swarm`]): a seeded, global-best particle swarm over any
//!   [`swarm::Objective`]
//! - **Entry point** ([`highways`]): validation, search and result assembly
//! - **Background runs** ([`worker`]): run on a separate thread with
//!   cancellation and panic capture
//!
//! # Quick Start
//!
//! ```
//! use route_optimize::optimize_highways;
//! use route_types::{Anchor, Demand, HighwayConfig, HighwayProblem, SwarmConfig};
//! use cf_planar::Bounds;
//! use nalgebra::Point2;
//!
//! let problem = HighwayProblem::new(Bounds::new(
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1000.0, 1000.0),
//! ))
//! .with_anchors([
//!     Anchor::at(100.0, 100.0),
//!     Anchor::at(900.0, 100.0),
//!     Anchor::at(500.0, 900.0),
//! ])
//! .with_demand(Demand::new(0, 1, 3.0))
//! .with_demand(Demand::new(1, 2, 1.0));
//!
//! let config = HighwayConfig::default()
//!     .with_waypoint_count(3)
//!     .with_radius(900.0)
//!     .with_swarm(SwarmConfig::default().with_particles(10).with_iterations(8).with_seed(42));
//!
//! let result = optimize_highways(&problem, &config).unwrap();
//! println!("{result}");
//!
//! assert_eq!(result.all_nodes.len(), 6);
//! assert_eq!(result.unreachable_demands(), 0);
//! ```
//!
//! # Determinism
//!
//! With [`route_types::SwarmConfig::with_seed`] set, a run is bit-for-bit
//! reproducible, including when particles are scored in parallel.

#![doc(html_root_url = "https://docs.rs/route-optimize/0.3.0")]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

pub mod assemble;
pub mod cancel;
pub mod fitness;
pub mod highways;
pub mod swarm;
pub mod worker;

// Re-export main types for convenience
pub use assemble::assemble_result;
pub use cancel::CancelToken;
pub use fitness::{FitnessBreakdown, FitnessEvaluator, flatten_layout, unflatten_layout};
pub use highways::{optimize_highways, optimize_highways_with_cancel};
pub use swarm::{Objective, Particle, SearchSpace, Swarm, SwarmOptimizer, SwarmOutcome};
pub use worker::{OptimizerHandle, spawn_optimizer, spawn_optimizer_with_token};
