//! Property-based tests for layout fitness.
//!
//! Waypoints are drawn from labelled regions of a fixed map, so the number
//! of penalized waypoints is known without asking the evaluator. One island
//! straddles the east edge of the map: a waypoint there is both off the map
//! and on land.
//!
//! Run with: cargo test -p route-optimize -- proptest

#![allow(clippy::unwrap_used, clippy::cast_precision_loss)]

use cf_planar::{Bounds, Obstacle};
use nalgebra::Point2;
use proptest::prelude::*;
use route_optimize::{FitnessEvaluator, flatten_layout};
use route_types::{Anchor, Demand, HighwayConfig, HighwayProblem};

// =============================================================================
// Fixture
// =============================================================================

fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Obstacle {
    Obstacle::new(vec![
        Point2::new(x0, y0),
        Point2::new(x1, y0),
        Point2::new(x1, y1),
        Point2::new(x0, y1),
    ])
}

/// A 1000 x 1000 map with a central island and one cut by the east edge.
fn map() -> HighwayProblem {
    let bounds = Bounds::new(Point2::new(0.0, 0.0), Point2::new(1000.0, 1000.0));
    HighwayProblem::new(bounds)
        .with_anchors([
            Anchor::at(50.0, 500.0),
            Anchor::at(300.0, 900.0),
            Anchor::at(800.0, 100.0),
        ])
        .with_demands([
            Demand::new(0, 2, 3.0),
            Demand::new(1, 2, 1.0),
            Demand::new(2, 0, 0.5),
        ])
        .with_obstacles([
            square(400.0, 400.0, 600.0, 600.0),
            square(900.0, 400.0, 1100.0, 600.0),
        ])
}

fn config() -> HighwayConfig {
    HighwayConfig::default().with_radius(500.0)
}

// =============================================================================
// Strategies
// =============================================================================

/// Where a generated waypoint lies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Water,
    Land,
    OffMap,
    OffMapLand,
}

impl Region {
    fn is_penalized(self) -> bool {
        self != Self::Water
    }
}

fn arb_water() -> impl Strategy<Value = Point2<f64>> {
    (10.0..350.0f64, 10.0..990.0f64).prop_map(|(x, y)| Point2::new(x, y))
}

fn arb_land() -> impl Strategy<Value = Point2<f64>> {
    (420.0..580.0f64, 420.0..580.0f64).prop_map(|(x, y)| Point2::new(x, y))
}

fn arb_off_map() -> impl Strategy<Value = Point2<f64>> {
    prop_oneof![
        (-800.0..-1.0f64, -800.0..1800.0f64),
        (1150.0..1800.0f64, -800.0..1800.0f64),
        (0.0..1000.0f64, -800.0..-1.0f64),
        (0.0..1000.0f64, 1001.0..1800.0f64),
    ]
    .prop_map(|(x, y)| Point2::new(x, y))
}

fn arb_off_map_land() -> impl Strategy<Value = Point2<f64>> {
    (1010.0..1090.0f64, 420.0..580.0f64).prop_map(|(x, y)| Point2::new(x, y))
}

fn arb_waypoint() -> impl Strategy<Value = (Region, Point2<f64>)> {
    prop_oneof![
        arb_water().prop_map(|p| (Region::Water, p)),
        arb_land().prop_map(|p| (Region::Land, p)),
        arb_off_map().prop_map(|p| (Region::OffMap, p)),
        arb_off_map_land().prop_map(|p| (Region::OffMapLand, p)),
    ]
}

fn arb_labelled_layout() -> impl Strategy<Value = Vec<(Region, Point2<f64>)>> {
    prop::collection::vec(arb_waypoint(), 1..7)
}

fn arb_off_map_layout() -> impl Strategy<Value = Vec<Point2<f64>>> {
    prop::collection::vec(prop_oneof![arb_off_map(), arb_off_map_land()], 1..7)
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    /// Every waypoint off the map costs at least one big penalty each.
    #[test]
    fn off_map_layout_pays_full_penalty(layout in arb_off_map_layout()) {
        let problem = map();
        let config = config();
        let evaluator = FitnessEvaluator::new(&problem, &config);
        let m = layout.len();

        let breakdown = evaluator.breakdown(&layout);
        prop_assert_eq!(breakdown.invalid_waypoints, m);
        prop_assert!(evaluator.evaluate(&layout) >= m as f64 * config.big_penalty());
    }

    /// A waypoint that is both off the map and on land is penalized once.
    #[test]
    fn penalty_counts_each_waypoint_once(labelled in arb_labelled_layout()) {
        let problem = map();
        let config = config();
        let evaluator = FitnessEvaluator::new(&problem, &config);
        let layout: Vec<_> = labelled.iter().map(|&(_, p)| p).collect();
        let expected = labelled.iter().filter(|(r, _)| r.is_penalized()).count();

        let breakdown = evaluator.breakdown(&layout);
        prop_assert_eq!(breakdown.invalid_waypoints, expected);
        prop_assert!(breakdown.invalid_waypoints <= layout.len());
        prop_assert_eq!(
            breakdown.hard_penalty,
            breakdown.invalid_waypoints as f64 * config.big_penalty()
        );
    }

    /// Scoring is a pure function of the layout.
    #[test]
    fn evaluate_is_deterministic(labelled in arb_labelled_layout()) {
        let problem = map();
        let config = config();
        let evaluator = FitnessEvaluator::new(&problem, &config);
        let layout: Vec<_> = labelled.iter().map(|&(_, p)| p).collect();

        let first = evaluator.evaluate(&layout);
        prop_assert!(first.is_finite());
        prop_assert!(first >= 0.0);
        prop_assert_eq!(first, evaluator.evaluate(&layout));
        prop_assert_eq!(first, evaluator.breakdown(&layout).total());
        prop_assert_eq!(first, evaluator.evaluate_flat(&flatten_layout(&layout)));
    }

    /// Waypoints in open water never add a hard penalty.
    #[test]
    fn water_layout_is_unpenalized(layout in prop::collection::vec(arb_water(), 1..7)) {
        let problem = map();
        let config = config();
        let evaluator = FitnessEvaluator::new(&problem, &config);

        let breakdown = evaluator.breakdown(&layout);
        prop_assert_eq!(breakdown.invalid_waypoints, 0);
        prop_assert_eq!(breakdown.hard_penalty, 0.0);
    }
}
